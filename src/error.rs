//! Error handling for cartpack operations
//!
//! This module re-exports the error types used throughout the crate. The
//! variants themselves live in [`crate::common`] next to the format constants
//! they describe.

pub use crate::common::CartPackError;
pub use crate::common::Result;
