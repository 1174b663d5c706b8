use crate::errors::DashboardError;
use crate::models::{DailyAverage, ExportNames, MonthlyAverage, Record};
use crate::stats::round1;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Daily,
    Monthly,
    Raw,
}

impl ExportKind {
    /// Download name for this export. Spaces become `_`; quotes, backslashes
    /// and control characters are dropped so the name fits in a
    /// `Content-Disposition` header.
    pub fn file_name(self, selection_label: &str) -> String {
        let prefix = match self {
            ExportKind::Daily => "daily",
            ExportKind::Monthly => "monthly",
            ExportKind::Raw => "raw",
        };
        let label: String = selection_label
            .chars()
            .filter(|c| !c.is_control() && !matches!(c, '"' | '\\'))
            .map(|c| if c == ' ' { '_' } else { c })
            .collect();
        format!("{prefix}_weight_data_{label}.csv")
    }
}

pub fn export_names(selection_label: &str) -> ExportNames {
    ExportNames {
        daily: ExportKind::Daily.file_name(selection_label),
        monthly: ExportKind::Monthly.file_name(selection_label),
        raw: ExportKind::Raw.file_name(selection_label),
    }
}

/// Daily averages, newest first.
pub fn daily_csv(daily: &[DailyAverage]) -> Result<Vec<u8>, DashboardError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Average Weight (lbs)"])?;
    for entry in daily.iter().rev() {
        writer.write_record([entry.date.to_string(), format_weight(entry.mean_weight)])?;
    }
    finish(writer)
}

/// Monthly averages, newest first, months written as "January 2024".
pub fn monthly_csv(monthly: &[MonthlyAverage]) -> Result<Vec<u8>, DashboardError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Month", "Average Weight (lbs)"])?;
    for entry in monthly.iter().rev() {
        writer.write_record([
            entry.month_start.format("%B %Y").to_string(),
            format_weight(entry.mean_weight),
        ])?;
    }
    finish(writer)
}

/// Filtered input rows, newest first. Rows sharing a date keep input order.
pub fn raw_csv(records: &[Record]) -> Result<Vec<u8>, DashboardError> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Name", "Position", "Weight (lbs)"])?;
    for record in sorted {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.subject_name.clone(),
            record.subject_position.clone(),
            format_weight(record.weight),
        ])?;
    }
    finish(writer)
}

pub fn format_weight(weight: f64) -> String {
    format!("{:.1}", round1(weight))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, DashboardError> {
    writer
        .into_inner()
        .map_err(|err| DashboardError::Io(err.into_error()))
}
