use std::time::Duration;

use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use rand::Rng;
use reqwest::StatusCode;

use crate::client::HttpClient;
use crate::hh::types::{
    City, EmployerDetail, Salary, SearchPage, VacancyDetail, VacancyRecord, UNKNOWN_INDUSTRY,
};
use crate::hh::{Error, Result};

const API_BASE: &str = "https://api.hh.ru";
const PER_PAGE: u32 = 100;
const SPECIALIZATION: u32 = 1;

/// Per-call operations against the vacancy API, one method per resource.
#[async_trait]
pub trait VacancyApi {
    /// One page of search results for a (city, role) pair.
    async fn search_page(&self, city: City, role: &str, page: u32) -> Result<SearchPage>;

    /// Comma-joined key skills of a vacancy, empty when none are listed.
    async fn vacancy_skills(&self, vacancy_id: &str) -> Result<String>;

    /// Primary industry of an employer, "Unknown" when unresolvable.
    async fn employer_industry(&self, employer_id: Option<&str>) -> Result<String>;
}

pub struct HhClient {
    http: HttpClient,
    base_url: String,
}

impl HhClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: API_BASE.to_owned(),
        }
    }
}

#[async_trait]
impl VacancyApi for HhClient {
    async fn search_page(&self, city: City, role: &str, page: u32) -> Result<SearchPage> {
        let url = format!("{}/vacancies", self.base_url);
        // The free-text query pairs the role with the area id, matching the
        // query shape the search endpoint is known to accept.
        let query = [
            ("text", format!("{} {}", role, city.area_id())),
            ("area", city.area_id().to_string()),
            ("specialization", SPECIALIZATION.to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        log::debug!(
            "requesting vacancies, city: {}, role: {}, page: {}",
            city,
            role,
            page
        );
        self.http.get_json(&url, &query).await
    }

    async fn vacancy_skills(&self, vacancy_id: &str) -> Result<String> {
        let url = format!("{}/vacancies/{}", self.base_url, vacancy_id);
        let detail: VacancyDetail = self.http.get_json(&url, &[]).await?;
        Ok(join_skills(&detail))
    }

    async fn employer_industry(&self, employer_id: Option<&str>) -> Result<String> {
        let Some(id) = employer_id else {
            return Ok(UNKNOWN_INDUSTRY.to_owned());
        };
        let url = format!("{}/employers/{}", self.base_url, id);
        primary_industry(self.http.get_json(&url, &[]).await)
    }
}

fn join_skills(detail: &VacancyDetail) -> String {
    detail
        .key_skills
        .iter()
        .map(|skill| skill.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A missing employer resource is a plain "no data" outcome, not a failure.
fn primary_industry(resp: Result<EmployerDetail>) -> Result<String> {
    match resp {
        Ok(detail) => Ok(detail
            .industries
            .into_iter()
            .next()
            .map(|industry| industry.name)
            .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_owned())),
        Err(Error::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
            Ok(UNKNOWN_INDUSTRY.to_owned())
        }
        Err(e) => Err(e),
    }
}

/// Knobs for one collection pass. Defaults mirror the canonical run; tests
/// shrink the pauses and the cap.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub cities: Vec<City>,
    pub roles: Vec<String>,
    pub max_records: usize,
    /// Seconds slept after each collected item, sampled uniformly.
    pub item_pause: (f64, f64),
    /// Seconds slept between page requests, sampled uniformly.
    pub page_pause: (f64, f64),
    /// Base pause after a failed page fetch, doubling per attempt.
    pub error_pause: Duration,
    /// Fetch attempts per page before the role is abandoned.
    pub max_page_attempts: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            cities: vec![City::Moscow, City::SaintPetersburg],
            roles: [
                "Data Scientist",
                "Data Engineer",
                "Data Analyst",
                "Machine Learning Engineer",
                "Python Developer",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_records: 1000,
            item_pause: (2.0, 4.0),
            page_pause: (3.0, 5.0),
            error_pause: Duration::from_secs(10),
            max_page_attempts: 3,
        }
    }
}

async fn throttle(range: (f64, f64)) {
    let secs = rand::thread_rng().gen_range(range.0..=range.1);
    if secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

/// Lazily walks city → role → page → item, yielding every item whose title
/// contains the role keyword (case-insensitive), enriched with employer
/// industry and key skills. An empty page ends the current role's pagination;
/// a page fetch error is retried a bounded number of times before the role is
/// abandoned. Errors from the per-item lookups are yielded and end the stream.
/// Dropping the stream stops all further network traffic.
pub fn collect<'a, A: VacancyApi>(
    api: &'a A,
    config: &'a CollectorConfig,
) -> impl Stream<Item = Result<VacancyRecord>> + 'a {
    stream! {
        for &city in &config.cities {
            'roles: for role in &config.roles {
                let role_lower = role.to_lowercase();
                let mut page = 0u32;
                let mut attempts = 0u32;
                loop {
                    let search = match api.search_page(city, role, page).await {
                        Ok(search) => search,
                        Err(e) => {
                            attempts += 1;
                            if attempts >= config.max_page_attempts {
                                log::warn!(
                                    "giving up on '{}' in {} after {} failed page fetches: {}",
                                    role,
                                    city,
                                    attempts,
                                    e
                                );
                                continue 'roles;
                            }
                            let pause = config.error_pause * 2u32.saturating_pow(attempts - 1);
                            log::error!(
                                "API error on page {} for '{}' in {}: {}, retrying in {:?}",
                                page,
                                role,
                                city,
                                e,
                                pause
                            );
                            tokio::time::sleep(pause).await;
                            continue;
                        }
                    };
                    attempts = 0;
                    if search.items.is_empty() {
                        break;
                    }
                    for item in search.items {
                        if !item.name.to_lowercase().contains(&role_lower) {
                            continue;
                        }
                        let industry =
                            match api.employer_industry(item.employer.id.as_deref()).await {
                                Ok(industry) => industry,
                                Err(e) => {
                                    yield Err(e);
                                    return;
                                }
                            };
                        let skills = match api.vacancy_skills(&item.id).await {
                            Ok(skills) => skills,
                            Err(e) => {
                                yield Err(e);
                                return;
                            }
                        };
                        yield Ok(VacancyRecord {
                            city,
                            company: item.employer.name,
                            industry,
                            title: item.name,
                            skills,
                            salary: Salary::from_item(item.salary.as_ref()),
                            url: item.alternate_url,
                        });
                        throttle(config.item_pause).await;
                    }
                    page += 1;
                    throttle(config.page_pause).await;
                }
            }
        }
    }
}

/// Drains the collection stream into the bounded accumulator. Stops at the
/// record cap or when every (city, role) pair is exhausted; because the
/// stream is lazy, reaching the cap also stops all network calls.
pub async fn run<A: VacancyApi>(api: &A, config: &CollectorConfig) -> Result<Vec<VacancyRecord>> {
    let stream = collect(api, config);
    tokio::pin!(stream);
    let mut records = Vec::new();
    while records.len() < config.max_records {
        match stream.next().await {
            Some(Ok(record)) => {
                records.push(record);
                if records.len() % 100 == 0 {
                    log::info!("Collected {} vacancies", records.len());
                }
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }
    Ok(records)
}
