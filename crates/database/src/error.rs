use models::EntityKind;
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use uuid::Uuid;
use validation::ValidationError;

/// SQLSTATE raised when a serializable transaction loses a race
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} {id} does not exist")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("still referenced by other rows: {0}")]
    Referenced(String),

    #[error("database error: {0}")]
    Db(DbErr),
}

impl ServiceError {
    /// Classifies a storage error; constraint and serialization failures become conflicts
    pub fn from_db(err: DbErr) -> Self {
        let violation = err.sql_err();
        let code = sqlstate(&err);
        Self::classify(err, violation, code.as_deref())
    }

    fn classify(err: DbErr, violation: Option<SqlErr>, sqlstate: Option<&str>) -> Self {
        match violation {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                Self::Validation(ValidationError::conflict(detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::Referenced(detail),
            _ if sqlstate == Some(SERIALIZATION_FAILURE) => Self::Validation(
                ValidationError::conflict("the write raced a concurrent transaction"),
            ),
            _ => Self::Db(err),
        }
    }

    /// Whether reloading and retrying the write may succeed
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Validation(err) if err.is_conflict())
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        Self::from_db(err)
    }
}

/// SQLSTATE code reported by the database, if the error came from it
fn sqlstate(err: &DbErr) -> Option<String> {
    let (DbErr::Exec(RuntimeErr::SqlxError(err))
    | DbErr::Query(RuntimeErr::SqlxError(err))
    | DbErr::Conn(RuntimeErr::SqlxError(err))) = err
    else {
        return None;
    };

    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_db_errors_pass_through() {
        let err = ServiceError::from(DbErr::RecordNotUpdated);

        assert!(matches!(err, ServiceError::Db(DbErr::RecordNotUpdated)));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_validation_conflict_is_retryable() {
        let err = ServiceError::from(ValidationError::conflict("stale"));
        assert!(err.is_conflict());

        let err = ServiceError::from(ValidationError::rule("nope"));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = ServiceError::classify(
            DbErr::RecordNotInserted,
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"idx_trimesters_code\"".into(),
            )),
            Some("23505"),
        );

        assert!(err.is_conflict());
        assert!(err.to_string().contains("idx_trimesters_code"));
    }

    #[test]
    fn test_foreign_key_violation_is_referenced() {
        let err = ServiceError::classify(
            DbErr::RecordNotUpdated,
            Some(SqlErr::ForeignKeyConstraintViolation("fk-courses-section_id".into())),
            Some("23503"),
        );

        assert!(matches!(err, ServiceError::Referenced(detail) if detail == "fk-courses-section_id"));
    }

    #[test]
    fn test_serialization_failure_is_conflict() {
        let err = ServiceError::classify(DbErr::RecordNotUpdated, None, Some("40001"));
        assert!(err.is_conflict());

        let err = ServiceError::classify(DbErr::RecordNotUpdated, None, Some("22001"));
        assert!(matches!(err, ServiceError::Db(DbErr::RecordNotUpdated)));
    }

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = ServiceError::NotFound {
            kind: EntityKind::Section,
            id,
        };
        assert_eq!(err.to_string(), format!("Section {id} does not exist"));
    }
}
