use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: &'static str,
        message: String,
    },
    #[error("input is missing the {0} column")]
    MissingColumn(&'static str),
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("end date must be after start date ({start} > {end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("no data available for the selected filters")]
    EmptyResult,
    #[error("data file contains no records")]
    EmptyDataset,
    #[error("invalid filter: {0}")]
    InvalidQuery(String),
}

impl DashboardError {
    pub fn parse(row: usize, column: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            row,
            column,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required".to_string(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        let status = match err {
            DashboardError::InvalidRange { .. } | DashboardError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::EmptyResult => StatusCode::NOT_FOUND,
            DashboardError::Parse { .. }
            | DashboardError::MissingColumn(_)
            | DashboardError::EmptyDataset
            | DashboardError::Csv(_)
            | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let range: AppError = DashboardError::InvalidRange { start, end }.into();
        assert_eq!(range.status, StatusCode::BAD_REQUEST);
        assert!(range.message.contains("2024-03-01"));

        let empty: AppError = DashboardError::EmptyResult.into();
        assert_eq!(empty.status, StatusCode::NOT_FOUND);

        let no_rows: AppError = DashboardError::EmptyDataset.into();
        assert_eq!(no_rows.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(no_rows.message, "data file contains no records");

        let parse: AppError = DashboardError::parse(3, "WEIGHT", "not a number").into();
        assert_eq!(parse.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(parse.message, "row 3, column WEIGHT: not a number");
    }
}
