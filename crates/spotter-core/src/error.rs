//! Error types for `spotter-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("actor {0} cannot like themselves")]
  SelfLike(Uuid),

  #[error("unknown kind discriminant: {0:?}")]
  UnknownKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
