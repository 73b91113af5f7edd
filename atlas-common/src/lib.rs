//! Shared types for the atlas-route toolkit.

pub mod error;

pub use error::{Error, Result};
