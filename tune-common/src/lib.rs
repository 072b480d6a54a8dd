//! # Tune Tracker Common Library
//!
//! Shared code for the Tune Tracker front-end:
//! - Catalog entity types (Artist, Album, Song) and their wire shapes
//! - Error types
//! - API base URL resolution

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
