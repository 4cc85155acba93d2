//! Error types for `postulog-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("application not found: {0}")]
  NotFound(Uuid),

  #[error("application id already present: {0}")]
  DuplicateId(Uuid),

  #[error("no application matches id prefix {0:?}")]
  NoMatch(String),

  #[error("id prefix {prefix:?} is ambiguous ({count} matches)")]
  AmbiguousPrefix { prefix: String, count: usize },

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
