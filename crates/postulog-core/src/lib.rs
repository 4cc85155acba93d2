//! Core types and derived views for the PostuLog application tracker.
//!
//! This crate is deliberately free of database and CLI dependencies. The
//! codec (`postulog-csv`) and the SQLite slot backend
//! (`postulog-store-sqlite`) build on it.

pub mod agenda;
pub mod application;
pub mod error;
pub mod query;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
