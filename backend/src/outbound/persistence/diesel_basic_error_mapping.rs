//! Shared Diesel error mapping for the repositories.
//!
//! Driver text is logged at debug level and replaced by fixed phrases so
//! nothing from the database reaches a client.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether `error` is a violation of the named unique constraint.
pub fn is_unique_violation(error: &diesel::result::Error, constraint: &str) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name() == Some(constraint)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    #[case(diesel::result::Error::NotFound, Mapped::Query("record not found"))]
    #[case(diesel::result::Error::RollbackTransaction, Mapped::Query("database error"))]
    fn diesel_errors_map_to_fixed_phrases(
        #[case] error: diesel::result::Error,
        #[case] expected: Mapped,
    ) {
        let mapped = map_basic_diesel_error(error, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        });
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message_for_logging() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(
            &diesel::result::Error::NotFound,
            "users_username_key"
        ));
    }
}
