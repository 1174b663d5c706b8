use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One weigh-in row from the input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    #[serde(rename = "name")]
    pub subject_name: String,
    #[serde(rename = "position")]
    pub subject_position: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Individual,
    Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub mode: FilterMode,
    pub selection: Selection,
    /// Empty means every year passes.
    pub years: BTreeSet<i32>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterCriteria {
    /// Human-readable name of the current selection, used in the title and
    /// export file names.
    pub fn selection_label(&self) -> String {
        match (&self.selection, self.mode) {
            (Selection::Only(value), _) => value.clone(),
            (Selection::All, FilterMode::Individual) => "All Individuals".to_string(),
            (Selection::All, FilterMode::Position) => "All Positions".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub mean_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month_start: NaiveDate,
    pub mean_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Daily,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub trace_type: TraceType,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub position: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportNames {
    pub daily: String,
    pub monthly: String,
    pub raw: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub selection: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// "Showing data from January 01, 2024 to ..."
    pub range_caption: String,
    pub segments: Vec<ChartSegment>,
    pub ticks: Vec<AxisTick>,
    pub daily: Vec<DailyAverage>,
    pub monthly: Vec<MonthlyAverage>,
    pub records: Vec<Record>,
    pub summary: SummaryStats,
    pub exports: ExportNames,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub names: Vec<String>,
    pub positions: Vec<String>,
    pub years: Vec<i32>,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub latest_entry: NaiveDate,
    pub total_records: usize,
    pub loaded_at: DateTime<Local>,
    pub dataset_caption: String,
    pub loaded_caption: String,
}

/// Query string shared by `/api/view` and the export routes.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub mode: Option<FilterMode>,
    pub value: Option<String>,
    /// Comma-separated list of years.
    pub years: Option<String>,
    /// `YYYY-MM-DD`; empty or absent means the dataset's first date.
    pub start: Option<String>,
    /// `YYYY-MM-DD`; empty or absent means the dataset's last date.
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_segments_serialize_for_the_browser() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let segment = ChartSegment {
            trace_type: TraceType::Monthly,
            points: vec![
                ChartPoint { x: day, y: 201.0, label: None },
                ChartPoint { x: day, y: 201.0, label: Some("201.0".to_string()) },
            ],
        };
        assert_eq!(
            serde_json::to_value(&segment).unwrap(),
            json!({
                "trace_type": "monthly",
                "points": [
                    { "x": "2024-01-01", "y": 201.0 },
                    { "x": "2024-01-01", "y": 201.0, "label": "201.0" }
                ]
            })
        );
    }

    #[test]
    fn records_use_short_field_names() {
        let record = Record {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            subject_name: "Al".to_string(),
            subject_position: "OL".to_string(),
            weight: 200.0,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Al");
        assert_eq!(value["position"], "OL");
    }

    #[test]
    fn selection_label_names_all_by_mode() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut criteria = FilterCriteria {
            mode: FilterMode::Position,
            selection: Selection::All,
            years: BTreeSet::new(),
            start: day,
            end: day,
        };
        assert_eq!(criteria.selection_label(), "All Positions");
        criteria.mode = FilterMode::Individual;
        assert_eq!(criteria.selection_label(), "All Individuals");
        criteria.selection = Selection::Only("Al".to_string());
        assert_eq!(criteria.selection_label(), "Al");
    }
}
