use crate::models::{AxisTick, ChartPoint, ChartSegment, DailyAverage, MonthlyAverage, TraceType};
use crate::stats::round1;
use chrono::{Duration, NaiveDate};

/// Horizontal extent of a monthly marker. This is a fixed visual offset, not
/// the month's real length, so markers for short months can reach into the
/// next bucket.
pub const MARKER_SPAN_DAYS: i64 = 30;

/// Build the chart segments: one daily trace per monthly bucket (in bucket
/// order), followed by one marker per month.
///
/// Bucket `i` covers `[month_start[i], month_start[i + 1])` and the last bucket
/// is open-ended, so a daily point dated exactly on a later month start falls
/// into that later bucket. Buckets with no daily points yield empty traces.
pub fn build_segments(daily: &[DailyAverage], monthly: &[MonthlyAverage]) -> Vec<ChartSegment> {
    let mut segments = daily_traces(daily, monthly);
    segments.extend(monthly.iter().map(monthly_marker));
    segments
}

pub fn daily_traces(daily: &[DailyAverage], monthly: &[MonthlyAverage]) -> Vec<ChartSegment> {
    monthly
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let upper = monthly.get(i + 1).map(|next| next.month_start);
            let points = daily
                .iter()
                .filter(|entry| in_window(entry.date, bucket.month_start, upper))
                .map(|entry| ChartPoint {
                    x: entry.date,
                    y: entry.mean_weight,
                    label: None,
                })
                .collect();
            ChartSegment {
                trace_type: TraceType::Daily,
                points,
            }
        })
        .collect()
}

pub fn monthly_marker(month: &MonthlyAverage) -> ChartSegment {
    ChartSegment {
        trace_type: TraceType::Monthly,
        points: vec![
            ChartPoint {
                x: month.month_start,
                y: month.mean_weight,
                label: None,
            },
            ChartPoint {
                x: month.month_start + Duration::days(MARKER_SPAN_DAYS),
                y: month.mean_weight,
                label: Some(format!("{:.1}", round1(month.mean_weight))),
            },
        ],
    }
}

/// One tick per monthly bucket, labelled like "Jan 24".
pub fn axis_ticks(monthly: &[MonthlyAverage]) -> Vec<AxisTick> {
    monthly
        .iter()
        .map(|month| AxisTick {
            position: month.month_start,
            label: month.month_start.format("%b %y").to_string(),
        })
        .collect()
}

pub fn chart_title(selection_label: &str) -> String {
    format!("Body Weight per Month for {selection_label}")
}

fn in_window(date: NaiveDate, lower: NaiveDate, upper: Option<NaiveDate>) -> bool {
    date >= lower && upper.is_none_or(|upper| date < upper)
}
