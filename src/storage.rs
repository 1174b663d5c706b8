use crate::errors::DashboardError;
use crate::models::{OptionsResponse, Record};
use crate::view::long_date;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};
use tokio::fs;
use tracing::{debug, info};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// The loaded input file plus the option lists the filter controls offer.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub names: Vec<String>,
    pub positions: Vec<String>,
    pub years: Vec<i32>,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub loaded_at: DateTime<Local>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Result<Self, DashboardError> {
        let (Some(min_date), Some(max_date)) = (
            records.iter().map(|r| r.date).min(),
            records.iter().map(|r| r.date).max(),
        ) else {
            return Err(DashboardError::EmptyDataset);
        };

        let names: BTreeSet<&str> = records.iter().map(|r| r.subject_name.as_str()).collect();
        let positions: BTreeSet<&str> =
            records.iter().map(|r| r.subject_position.as_str()).collect();
        let years: BTreeSet<i32> = records.iter().map(|r| r.date.year()).collect();

        Ok(Self {
            names: names.into_iter().map(str::to_string).collect(),
            positions: positions.into_iter().map(str::to_string).collect(),
            years: years.into_iter().collect(),
            min_date,
            max_date,
            loaded_at: Local::now(),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> OptionsResponse {
        OptionsResponse {
            names: self.names.clone(),
            positions: self.positions.clone(),
            years: self.years.clone(),
            min_date: self.min_date,
            max_date: self.max_date,
            latest_entry: self.max_date,
            total_records: self.len(),
            loaded_at: self.loaded_at,
            dataset_caption: format!(
                "Latest data entry: {} | Total records: {}",
                long_date(self.max_date),
                self.len()
            ),
            loaded_caption: format!("Data loaded: {}", self.loaded_at.format("%H:%M")),
        }
    }
}

/// Parse CSV bytes with `DATE`, `NAME`, `POS` and `WEIGHT` columns.
///
/// Row numbers in errors are 1-based and count data rows only. Any malformed
/// row aborts the whole parse.
pub fn parse_records(input: &[u8]) -> Result<Vec<Record>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(DashboardError::MissingColumn(name))
    };
    let date_idx = column("DATE")?;
    let name_idx = column("NAME")?;
    let pos_idx = column("POS")?;
    let weight_idx = column("WEIGHT")?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row_no = index + 1;
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let date = parse_date(field(date_idx)).ok_or_else(|| {
            DashboardError::parse(row_no, "DATE", format!("'{}' is not a date", field(date_idx)))
        })?;
        let weight = field(weight_idx)
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| {
                DashboardError::parse(
                    row_no,
                    "WEIGHT",
                    format!("'{}' is not a number", field(weight_idx)),
                )
            })?;

        records.push(Record {
            date,
            subject_name: field(name_idx).to_string(),
            subject_position: field(pos_idx).to_string(),
            weight,
        });
    }

    Ok(records)
}

/// Accepts a bare date or a timestamp; the time of day is dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub async fn load_dataset(path: &Path) -> Result<Dataset, DashboardError> {
    let bytes = fs::read(path).await?;
    let records = parse_records(&bytes)?;
    let dataset = Dataset::from_records(records)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "loaded weight data"
    );
    Ok(dataset)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

impl CacheKey {
    async fn probe(path: &Path) -> Result<Self, DashboardError> {
        let meta = fs::metadata(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Keeps the last loaded dataset and reloads it when the file's modification
/// time or length changes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(CacheKey, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, DashboardError> {
        let key = CacheKey::probe(path).await?;
        if let Some((cached_key, dataset)) = &self.entry {
            if *cached_key == key {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = Arc::new(load_dataset(path).await?);
        self.entry = Some((key, Arc::clone(&dataset)));
        Ok(dataset)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "DATE,NAME,POS,WEIGHT\n\
        2024-01-05,Al,OL,200\n\
        2024-01-20,Al,OL,202.5\n\
        2024-02-10,Bo,WR,180\n";

    #[test]
    fn parses_typed_records() {
        let records = parse_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(records[1].subject_name, "Al");
        assert_eq!(records[2].subject_position, "WR");
        assert_eq!(records[1].weight, 202.5);
    }

    #[test]
    fn accepts_us_dates_and_timestamps() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("03/07/2024"), Some(day));
        assert_eq!(parse_date("2024-03-07 06:30:00"), Some(day));
        assert_eq!(parse_date("2024/03/07"), Some(day));
        assert_eq!(parse_date("7 March"), None);
    }

    #[test]
    fn rejects_bad_date_with_row_number() {
        let input = "DATE,NAME,POS,WEIGHT\n2024-01-05,Al,OL,200\nyesterday,Al,OL,201\n";
        match parse_records(input.as_bytes()) {
            Err(DashboardError::Parse { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "DATE");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_weight() {
        let input = "DATE,NAME,POS,WEIGHT\n2024-01-05,Al,OL,heavy\n";
        assert!(matches!(
            parse_records(input.as_bytes()),
            Err(DashboardError::Parse { row: 1, column: "WEIGHT", .. })
        ));
    }

    #[test]
    fn rejects_missing_column() {
        let input = "DATE,NAME,WEIGHT\n2024-01-05,Al,200\n";
        assert!(matches!(
            parse_records(input.as_bytes()),
            Err(DashboardError::MissingColumn("POS"))
        ));
    }

    #[test]
    fn dataset_collects_sorted_options() {
        let dataset = Dataset::from_records(parse_records(SAMPLE.as_bytes()).unwrap()).unwrap();
        assert_eq!(dataset.names, vec!["Al", "Bo"]);
        assert_eq!(dataset.positions, vec!["OL", "WR"]);
        assert_eq!(dataset.years, vec![2024]);
        assert_eq!(dataset.min_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(dataset.max_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn options_carry_display_captions() {
        let dataset = Dataset::from_records(parse_records(SAMPLE.as_bytes()).unwrap()).unwrap();
        let options = dataset.options();
        assert_eq!(
            options.dataset_caption,
            "Latest data entry: February 10, 2024 | Total records: 3"
        );
        let expected = format!("Data loaded: {}", dataset.loaded_at.format("%H:%M"));
        assert_eq!(options.loaded_caption, expected);
        assert_eq!(options.loaded_caption.len(), "Data loaded: 00:00".len());
    }

    #[test]
    fn empty_input_is_not_a_dataset() {
        let records = parse_records(b"DATE,NAME,POS,WEIGHT\n").unwrap();
        assert!(matches!(
            Dataset::from_records(records),
            Err(DashboardError::EmptyDataset)
        ));
    }

    #[tokio::test]
    async fn cache_reloads_after_file_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).await.unwrap();
        let second = cache.get_or_load(file.path()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        file.write_all(b"2024-03-01,Cy,DL,300\n").unwrap();
        file.flush().unwrap();
        let third = cache.get_or_load(file.path()).await.unwrap();
        assert_eq!(third.len(), 4);

        cache.invalidate();
        assert!(!cache.is_loaded());
    }
}
