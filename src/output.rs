use std::fmt::Write as _;
use std::path::Path;

use crate::hh::types::VacancyRecord;
use crate::hh::Result;

/// Serializes all records to UTF-8 CSV at `path`, header first, insertion
/// order preserved. An existing file is overwritten.
pub fn write_csv(records: &[VacancyRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::info!("Saved {} vacancies to {}", records.len(), path.display());
    Ok(())
}

/// Plain-text head of the table for stdout inspection.
pub fn preview(records: &[VacancyRecord], n: usize) -> String {
    let mut out = String::from("city | company | industry | title | skills | salary | url\n");
    for record in records.iter().take(n) {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {} | {} | {}",
            record.city,
            record.company,
            record.industry,
            record.title,
            record.skills,
            record.salary,
            record.url
        );
    }
    out
}
