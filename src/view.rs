use crate::errors::DashboardError;
use crate::export::export_names;
use crate::filter::apply_filters;
use crate::models::{FilterCriteria, ViewModel};
use crate::segments::{axis_ticks, build_segments, chart_title};
use crate::stats::{daily_averages, monthly_averages, summarize};
use crate::storage::Dataset;
use chrono::NaiveDate;

/// `January 05, 2024`, the date style used in captions.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Run the whole pipeline for one set of filters.
///
/// Fails with `InvalidRange` before touching the data and with `EmptyResult`
/// when nothing survives the filters; no partial view is produced.
pub fn render_view(dataset: &Dataset, criteria: &FilterCriteria) -> Result<ViewModel, DashboardError> {
    let records = apply_filters(&dataset.records, criteria)?;
    let Some(summary) = summarize(&records) else {
        return Err(DashboardError::EmptyResult);
    };

    let daily = daily_averages(&records);
    let monthly = monthly_averages(&records);
    let label = criteria.selection_label();

    Ok(ViewModel {
        title: chart_title(&label),
        start: criteria.start,
        end: criteria.end,
        range_caption: format!(
            "Showing data from {} to {}",
            long_date(criteria.start),
            long_date(criteria.end)
        ),
        segments: build_segments(&daily, &monthly),
        ticks: axis_ticks(&monthly),
        exports: export_names(&label),
        selection: label,
        daily,
        monthly,
        records,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DailyAverage, FilterMode, MonthlyAverage, Record, Selection, TraceType,
    };
    use std::collections::BTreeSet;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, name: &str, weight: f64) -> Record {
        Record {
            date,
            subject_name: name.to_string(),
            subject_position: "OL".to_string(),
            weight,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record(day(2024, 1, 5), "Al", 200.0),
            record(day(2024, 1, 20), "Al", 202.0),
            record(day(2024, 2, 10), "Al", 210.0),
            record(day(2024, 1, 7), "Bo", 170.0),
        ])
        .unwrap()
    }

    fn criteria_for(selection: Selection) -> FilterCriteria {
        FilterCriteria {
            mode: FilterMode::Individual,
            selection,
            years: BTreeSet::new(),
            start: day(2024, 1, 1),
            end: day(2024, 12, 31),
        }
    }

    #[test]
    fn single_subject_end_to_end() {
        let view = render_view(&dataset(), &criteria_for(Selection::Only("Al".to_string()))).unwrap();

        assert_eq!(
            view.daily,
            vec![
                DailyAverage { date: day(2024, 1, 5), mean_weight: 200.0 },
                DailyAverage { date: day(2024, 1, 20), mean_weight: 202.0 },
                DailyAverage { date: day(2024, 2, 10), mean_weight: 210.0 },
            ]
        );
        assert_eq!(
            view.monthly,
            vec![
                MonthlyAverage { month_start: day(2024, 1, 1), mean_weight: 201.0 },
                MonthlyAverage { month_start: day(2024, 2, 1), mean_weight: 210.0 },
            ]
        );

        let traces: Vec<_> = view
            .segments
            .iter()
            .filter(|s| s.trace_type == TraceType::Daily)
            .collect();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].points.len(), 2);
        assert_eq!(traces[1].points.len(), 1);

        let labels: Vec<_> = view
            .segments
            .iter()
            .filter(|s| s.trace_type == TraceType::Monthly)
            .filter_map(|s| s.points[1].label.clone())
            .collect();
        assert_eq!(labels, vec!["201.0", "210.0"]);

        assert_eq!(view.title, "Body Weight per Month for Al");
        assert_eq!(
            view.range_caption,
            "Showing data from January 01, 2024 to December 31, 2024"
        );
        assert_eq!(view.summary.count, 3);
        assert_eq!(view.exports.raw, "raw_weight_data_Al.csv");
    }

    #[test]
    fn all_individuals_label_flows_into_title() {
        let view = render_view(&dataset(), &criteria_for(Selection::All)).unwrap();
        assert_eq!(view.title, "Body Weight per Month for All Individuals");
        assert_eq!(view.records.len(), 4);
        assert_eq!(view.ticks.len(), 2);
    }

    #[test]
    fn unknown_subject_is_empty_result() {
        let result = render_view(&dataset(), &criteria_for(Selection::Only("Zed".to_string())));
        assert!(matches!(result, Err(DashboardError::EmptyResult)));
    }

    #[test]
    fn reversed_range_is_reported_before_filtering() {
        let mut criteria = criteria_for(Selection::All);
        criteria.start = day(2024, 2, 1);
        criteria.end = day(2024, 1, 1);
        assert!(matches!(
            render_view(&dataset(), &criteria),
            Err(DashboardError::InvalidRange { .. })
        ));
    }
}
