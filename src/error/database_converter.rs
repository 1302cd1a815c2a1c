use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// PostgreSQL reports the table, column and constraint of a violation
/// alongside the message; those are used to build `Duplicate` and
/// `Validation` errors instead of an opaque database failure.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let entity = info.table_name().unwrap_or("resource").to_string();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let (field, value) = info
                    .details()
                    .and_then(Self::parse_key_detail)
                    .unwrap_or_else(|| ("unknown".to_string(), "duplicate_value".to_string()));
                AppError::Duplicate {
                    entity,
                    field,
                    value,
                }
            }
            DatabaseErrorKind::NotNullViolation => AppError::Validation {
                field: info.column_name().unwrap_or("unknown").to_string(),
                reason: format!("Field is required for {}", entity),
            },
            DatabaseErrorKind::ForeignKeyViolation => {
                let (field, value) = info
                    .details()
                    .and_then(Self::parse_key_detail)
                    .unwrap_or_else(|| ("unknown".to_string(), "unknown".to_string()));
                AppError::Validation {
                    field,
                    reason: format!("Invalid reference from {} with value '{}'", entity, value),
                }
            }
            DatabaseErrorKind::CheckViolation => AppError::Validation {
                field: info
                    .constraint_name()
                    .unwrap_or("unknown")
                    .to_string(),
                reason: format!("Check constraint failed for {}", entity),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(info.message().to_string()),
            },
        }
    }

    /// Parses PostgreSQL detail text of the form `Key (field)=(value) ...`.
    pub fn parse_key_detail(detail: &str) -> Option<(String, String)> {
        let rest = detail.strip_prefix("Key (")?;
        let (field, rest) = rest.split_once(")=(")?;
        let (value, _) = rest.split_once(')')?;
        Some((field.to_string(), value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_detail() {
        let parsed = DatabaseErrorConverter::parse_key_detail(
            "Key (email)=(admin@example.com) already exists.",
        );
        assert_eq!(
            parsed,
            Some(("email".to_string(), "admin@example.com".to_string()))
        );
    }

    #[test]
    fn test_parse_key_detail_rejects_other_text() {
        assert_eq!(DatabaseErrorConverter::parse_key_detail("Failing row contains"), None);
    }

    #[test]
    fn test_not_found_conversion() {
        let error = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find event");
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn test_other_errors_become_database_errors() {
        let error = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "create event",
        );
        match error {
            AppError::Database { operation, .. } => assert_eq!(operation, "create event"),
            other => panic!("Expected Database error, got {:?}", other),
        }
    }
}
