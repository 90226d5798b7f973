use super::domain::{PlayerId, PlayerSnapshot};

/// Read access to the scored player population.
pub trait RosterRepository: Send + Sync {
    fn fetch(&self, id: &PlayerId) -> Result<Option<PlayerSnapshot>, RepositoryError>;
    fn population(&self) -> Result<Vec<PlayerSnapshot>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
