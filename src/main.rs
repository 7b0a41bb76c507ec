use std::path::Path;

use hh_scraper::client::{HttpClient, RetryPolicy};
use hh_scraper::hh::scraper::{run, CollectorConfig, HhClient};
use hh_scraper::output;

const OUTPUT_PATH: &str = "vacancies.csv";

#[tokio::main]
async fn main() {
    env_logger::init();
    let api = HhClient::new(HttpClient::new(RetryPolicy::default()));
    let config = CollectorConfig::default();
    let records = run(&api, &config).await.expect("collection run failed");
    output::write_csv(&records, Path::new(OUTPUT_PATH)).expect("failed to write csv");
    println!("\nSample data:");
    print!("{}", output::preview(&records, 5));
}
