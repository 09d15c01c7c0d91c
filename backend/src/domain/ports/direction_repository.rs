//! Port for reading directions (curricula).
use async_trait::async_trait;

use crate::domain::{Direction, DirectionId, Error};

use super::define_port_error;

define_port_error! {
    /// Errors raised by direction repository adapters.
    pub enum DirectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "direction repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "direction repository query failed: {message}",
    }
}

impl From<DirectionRepositoryError> for Error {
    fn from(error: DirectionRepositoryError) -> Self {
        match error {
            DirectionRepositoryError::Connection { message } => Error::service_unavailable(message),
            DirectionRepositoryError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectionRepository: Send + Sync {
    /// All directions ordered by `(code, year)`.
    async fn list_all(&self) -> Result<Vec<Direction>, DirectionRepositoryError>;

    /// Fetch a direction by identifier.
    async fn find_by_id(&self, id: DirectionId)
    -> Result<Option<Direction>, DirectionRepositoryError>;

    /// The catalog-year record of `code` for `year`.
    async fn find_by_code_and_year(
        &self,
        code: &str,
        year: i32,
    ) -> Result<Option<Direction>, DirectionRepositoryError>;
}
