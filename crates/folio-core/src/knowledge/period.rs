//! Human-readable year ranges for timeline entries.

use chrono::{Datelike, NaiveDate};

use folio_types::knowledge::{Certification, Experience, Project, ProjectStatus};

/// Label used for an entry that is still ongoing.
pub const PRESENT: &str = "Présent";

/// Render a period as a year range.
///
/// - current: `"2023 - Présent"` (any end date is ignored)
/// - end in the same year, or no end: `"2023"`
/// - end in a later year: `"2021-2022"`
pub fn format_period(start: NaiveDate, end: Option<NaiveDate>, is_current: bool) -> String {
    let start_year = start.year();
    if is_current {
        return format!("{start_year} - {PRESENT}");
    }
    match end {
        Some(end) if end.year() != start_year => format!("{start_year}-{}", end.year()),
        _ => start_year.to_string(),
    }
}

pub fn experience_period(experience: &Experience) -> String {
    format_period(
        experience.start_date,
        experience.end_date,
        experience.is_current,
    )
}

/// Issue year, or issue-expiration range when the certification expires.
pub fn certification_period(certification: &Certification) -> String {
    format_period(
        certification.issue_date,
        certification.expiration_date,
        false,
    )
}

/// Projects without a start date have no period. An in-progress project
/// with no end date counts as current.
pub fn project_period(project: &Project) -> Option<String> {
    let start = project.start_date?;
    let is_current = project.status == ProjectStatus::InProgress && project.end_date.is_none();
    Some(format_period(start, project.end_date, is_current))
}
