//! SQLite backend for PostuLog's slot storage.
//!
//! One table of named text slots; each write is a single upsert, so a slot
//! is always either its old or its new value.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSlots;

#[cfg(test)]
mod tests;
