use chrono::NaiveDate;
use thiserror::Error;

/// activity-heatmap error types
#[derive(Error, Debug)]
pub enum HeatmapError {
    /// A date string could not be parsed
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A week-aligned walk was started on a day other than Monday
    #[error("{0} is not a Monday")]
    NotMonday(NaiveDate),

    /// Range end lies before its start
    #[error("range start {start} is after range end {end}")]
    RangeReversed { start: NaiveDate, end: NaiveDate },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for activity-heatmap
pub type Result<T> = std::result::Result<T, HeatmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeatmapError::InvalidDate("2024-13-01".into());
        assert_eq!(err.to_string(), "invalid date: 2024-13-01");
    }

    #[test]
    fn test_not_monday_display() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 4).unwrap();
        let err = HeatmapError::NotMonday(date);
        assert_eq!(err.to_string(), "2022-10-04 is not a Monday");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HeatmapError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
