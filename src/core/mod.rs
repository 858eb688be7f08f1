//! core
//!
//! Core domain types and configuration for gitrev.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Sha1
//! - [`commit`] - Commit, Signature and Reference records
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Records are immutable once parsed
//! - Schemas are strict and self-describing

pub mod commit;
pub mod config;
pub mod types;
