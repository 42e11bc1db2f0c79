//! Core types and trait definitions for the Pinboard asset service.
//!
//! This crate is deliberately free of HTTP and locking concerns. It defines
//! the entities (users, assets and their payload variants), the JSON codec
//! for the asset envelope, and the [`store::Store`] trait that storage
//! engines implement.

pub mod asset;
pub mod codec;
pub mod error;
pub mod store;
pub mod user;

pub use error::{Error, ErrorKind, Result};
