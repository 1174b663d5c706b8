use crate::models::{DailyAverage, MonthlyAverage, Record, SummaryStats};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, weight: f64) {
        self.sum += weight;
        self.count += 1;
    }

    // Groups are only created by `push`, so count is never zero here.
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Mean weight per distinct date, ascending. Dates without records are
/// simply absent.
pub fn daily_averages(records: &[Record]) -> Vec<DailyAverage> {
    group_by(records, |record| record.date)
        .into_iter()
        .map(|(date, acc)| DailyAverage {
            date,
            mean_weight: acc.mean(),
        })
        .collect()
}

/// Mean weight per calendar month, keyed by the first day of the month.
pub fn monthly_averages(records: &[Record]) -> Vec<MonthlyAverage> {
    group_by(records, |record| month_start(record.date))
        .into_iter()
        .map(|(month_start, acc)| MonthlyAverage {
            month_start,
            mean_weight: acc.mean(),
        })
        .collect()
}

pub fn summarize(records: &[Record]) -> Option<SummaryStats> {
    if records.is_empty() {
        return None;
    }

    let mut acc = Accumulator::default();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        acc.push(record.weight);
        min = min.min(record.weight);
        max = max.max(record.weight);
    }

    Some(SummaryStats {
        count: acc.count,
        mean: acc.mean(),
        min,
        max,
    })
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn group_by(records: &[Record], key: impl Fn(&Record) -> NaiveDate) -> BTreeMap<NaiveDate, Accumulator> {
    let mut groups: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record.weight);
    }
    groups
}
