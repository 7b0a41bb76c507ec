use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

pub const UNKNOWN_INDUSTRY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Moscow,
    #[serde(rename = "Saint Petersburg")]
    SaintPetersburg,
}

impl City {
    /// Area id used by the HH search endpoint.
    pub fn area_id(&self) -> u32 {
        match self {
            City::Moscow => 1,
            City::SaintPetersburg => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            City::Moscow => "Moscow",
            City::SaintPetersburg => "Saint Petersburg",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower salary bound of a posting, or the literal "Not specified" when the
/// posting carries no usable salary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salary {
    From(u64),
    NotSpecified,
}

impl Salary {
    pub(crate) fn from_item(info: Option<&SalaryInfo>) -> Self {
        match info.and_then(|s| s.from) {
            Some(lower) => Salary::From(lower),
            None => Salary::NotSpecified,
        }
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Salary::From(lower) => serializer.serialize_u64(*lower),
            Salary::NotSpecified => serializer.serialize_str("Not specified"),
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::From(lower) => write!(f, "{}", lower),
            Salary::NotSpecified => f.write_str("Not specified"),
        }
    }
}

/// One row of the output table. Field order matches the CSV header.
#[derive(Debug, Clone, Serialize)]
pub struct VacancyRecord {
    pub city: City,
    pub company: String,
    pub industry: String,
    pub title: String,
    pub skills: String,
    pub salary: Salary,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    pub employer: EmployerRef,
    pub salary: Option<SalaryInfo>,
    pub alternate_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryInfo {
    pub from: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VacancyDetail {
    #[serde(default)]
    pub key_skills: Vec<KeySkill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySkill {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerDetail {
    #[serde(default)]
    pub industries: Vec<Industry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Industry {
    pub name: String,
}
