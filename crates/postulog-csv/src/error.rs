//! Error types for the postulog-csv codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unterminated quoted field starting on line {line}")]
  UnterminatedQuote { line: usize },

  #[error("document is not valid UTF-8: {0}")]
  Encoding(#[from] std::str::Utf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
