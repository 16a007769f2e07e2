//! Classification of driver errors into domain errors

use sqlx::error::ErrorKind;

use crate::domain::{DomainError, UniqueField};

/// SQLSTATE raised by PostgreSQL on a unique constraint violation
pub const UNIQUE_VIOLATION: &str = "23505";

pub const USERNAME_CONSTRAINT: &str = "users_username_key";
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Capability of turning a low-level store error into a domain error
pub trait ClassifyStoreError {
    fn classify(self, context: &str) -> DomainError;
}

impl ClassifyStoreError for sqlx::Error {
    fn classify(self, context: &str) -> DomainError {
        match &self {
            sqlx::Error::RowNotFound => DomainError::not_found(format!("{}: no rows", context)),
            sqlx::Error::Database(db) if is_unique_violation(&**db) => {
                match db.constraint().and_then(constraint_field) {
                    Some(field) => DomainError::conflict(field, format!("{}: {}", context, self)),
                    None => DomainError::storage(format!("{}: {}", context, self)),
                }
            }
            _ => DomainError::storage(format!("{}: {}", context, self)),
        }
    }
}

fn is_unique_violation(db: &dyn sqlx::error::DatabaseError) -> bool {
    db.code().as_deref() == Some(UNIQUE_VIOLATION) || matches!(db.kind(), ErrorKind::UniqueViolation)
}

/// Map a constraint name to the field it protects
pub fn constraint_field(constraint: &str) -> Option<UniqueField> {
    match constraint {
        USERNAME_CONSTRAINT => Some(UniqueField::Username),
        EMAIL_CONSTRAINT => Some(UniqueField::Email),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::DatabaseError;

    /// Driver error as PostgreSQL would report it
    #[derive(Debug)]
    struct PgError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error returned from database: {}", self.message())
        }
    }

    impl StdError for PgError {}

    impl DatabaseError for PgError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgError { code, constraint }))
    }

    #[test]
    fn test_unique_violation_names_the_field() {
        let username = db_error(UNIQUE_VIOLATION, Some(USERNAME_CONSTRAINT)).classify("insert");
        assert!(matches!(
            username,
            DomainError::Conflict { field: UniqueField::Username, .. }
        ));

        let email = db_error(UNIQUE_VIOLATION, Some(EMAIL_CONSTRAINT)).classify("insert");
        assert!(matches!(
            email,
            DomainError::Conflict { field: UniqueField::Email, .. }
        ));
    }

    #[test]
    fn test_unique_violation_on_unknown_constraint_is_storage() {
        let other = db_error(UNIQUE_VIOLATION, Some("users_other_key")).classify("insert");
        assert!(matches!(other, DomainError::Storage { .. }));

        let unnamed = db_error(UNIQUE_VIOLATION, None).classify("insert");
        assert!(matches!(unnamed, DomainError::Storage { .. }));
    }

    #[test]
    fn test_other_sqlstate_on_known_constraint_is_storage() {
        let err = db_error("23503", Some(USERNAME_CONSTRAINT)).classify("insert");
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[test]
    fn test_classified_message_keeps_context() {
        let err = db_error(UNIQUE_VIOLATION, Some(EMAIL_CONSTRAINT)).classify("Failed to create user");
        assert!(err.to_string().contains("Failed to create user"));
    }

    #[test]
    fn test_constraint_field() {
        assert_eq!(constraint_field("users_username_key"), Some(UniqueField::Username));
        assert_eq!(constraint_field("users_email_key"), Some(UniqueField::Email));
        assert_eq!(constraint_field("users_pkey"), None);
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        let err = sqlx::Error::RowNotFound.classify("Failed to get user");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_errors_are_storage() {
        let err = sqlx::Error::PoolTimedOut.classify("Failed to list users");
        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
