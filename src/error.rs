//! Error types for the capacity planner.
//!
//! The calculation core never fails on data-shape problems; these errors
//! cover the surrounding layers (configuration, storage, write-time
//! validation and import).

use thiserror::Error;

/// The main error type for the capacity planner.
///
/// # Example
///
/// ```
/// use capacity_planner::error::PlannerError;
///
/// let error = PlannerError::ConfigNotFound {
///     path: "/missing/planner.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/planner.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The storage collaborator failed to read or write PI data.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },

    /// A Program Increment has an unusable date range.
    #[error("Invalid date range for PI '{pi_id}': {start} to {end}")]
    InvalidDateRange {
        /// The ID of the offending PI.
        pi_id: String,
        /// The raw start date.
        start: String,
        /// The raw end date.
        end: String,
    },

    /// A sprint's dates are malformed, too long, or fall outside its PI.
    #[error("Invalid dates for sprint '{sprint_id}' in PI '{pi_id}': {message}")]
    InvalidSprintDates {
        /// The ID of the parent PI.
        pi_id: String,
        /// The ID of the offending sprint.
        sprint_id: String,
        /// A description of what is wrong with the dates.
        message: String,
    },

    /// An import document could not be applied.
    #[error("Import of '{name}' failed: {message}")]
    ImportError {
        /// The document (category) name.
        name: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return PlannerError.
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PlannerError::ConfigNotFound {
            path: "/missing/planner.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/planner.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PlannerError::ConfigParseError {
            path: "/config/PTO.json".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/PTO.json': expected value"
        );
    }

    #[test]
    fn test_storage_error_displays_message() {
        let error = PlannerError::StorageError {
            message: "disk full".to_string(),
        };
        assert_eq!(error.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_invalid_date_range_displays_pi_and_dates() {
        let error = PlannerError::InvalidDateRange {
            pi_id: "pi_1".to_string(),
            start: "2024-03-01".to_string(),
            end: "2024-01-01".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range for PI 'pi_1': 2024-03-01 to 2024-01-01"
        );
    }

    #[test]
    fn test_invalid_sprint_dates_displays_ids_and_message() {
        let error = PlannerError::InvalidSprintDates {
            pi_id: "pi_1".to_string(),
            sprint_id: "s_2".to_string(),
            message: "ends after PI".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid dates for sprint 's_2' in PI 'pi_1': ends after PI"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlannerError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_storage_error() -> PlannerResult<()> {
            Err(PlannerError::StorageError {
                message: "unavailable".to_string(),
            })
        }

        fn propagates_error() -> PlannerResult<()> {
            returns_storage_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
