pub mod client;
pub mod hh;
pub mod output;

pub use hh::types::{City, Salary, VacancyRecord};
