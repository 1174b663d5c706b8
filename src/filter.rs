use crate::errors::DashboardError;
use crate::models::{FilterCriteria, FilterMode, Record, Selection, ViewQuery};
use crate::storage::Dataset;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Apply the filter rules in order: selected subject or position, year set,
/// then the inclusive date range.
///
/// An empty `years` set is "no year filter", not "exclude every year".
pub fn apply_filters(records: &[Record], criteria: &FilterCriteria) -> Result<Vec<Record>, DashboardError> {
    validate_range(criteria)?;

    Ok(records
        .iter()
        .filter(|record| matches_selection(record, criteria))
        .filter(|record| criteria.years.is_empty() || criteria.years.contains(&record.date.year()))
        .filter(|record| record.date >= criteria.start && record.date <= criteria.end)
        .cloned()
        .collect())
}

pub fn validate_range(criteria: &FilterCriteria) -> Result<(), DashboardError> {
    if criteria.start > criteria.end {
        return Err(DashboardError::InvalidRange {
            start: criteria.start,
            end: criteria.end,
        });
    }
    Ok(())
}

fn matches_selection(record: &Record, criteria: &FilterCriteria) -> bool {
    let Selection::Only(value) = &criteria.selection else {
        return true;
    };
    match criteria.mode {
        FilterMode::Individual => record.subject_name == *value,
        FilterMode::Position => record.subject_position == *value,
    }
}

/// Build criteria from request parameters, defaulting the date range to the
/// full extent of the dataset. A missing `value` or the literal `all` selects
/// everything.
pub fn criteria_from_query(query: &ViewQuery, dataset: &Dataset) -> Result<FilterCriteria, DashboardError> {
    let selection = match query.value.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Selection::All,
        Some(value) => Selection::Only(value.to_string()),
    };

    Ok(FilterCriteria {
        mode: query.mode.unwrap_or_default(),
        selection,
        years: parse_years(query.years.as_deref().unwrap_or(""))?,
        start: parse_bound(query.start.as_deref(), "start")?.unwrap_or(dataset.min_date),
        end: parse_bound(query.end.as_deref(), "end")?.unwrap_or(dataset.max_date),
    })
}

fn parse_bound(raw: Option<&str>, name: &str) -> Result<Option<NaiveDate>, DashboardError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                DashboardError::InvalidQuery(format!("{name} date '{value}' is not YYYY-MM-DD"))
            }),
    }
}

fn parse_years(raw: &str) -> Result<BTreeSet<i32>, DashboardError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| DashboardError::InvalidQuery(format!("'{token}' is not a year")))
        })
        .collect()
}
