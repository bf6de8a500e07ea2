//! # Formats Module
//!
//! Serialization for progress that leaves the process.
//!
//! This module contains:
//! - The binary session token (postcard + header)
//!
//! Note: Text encoding of the token (base64) stays in the app layer
//! (apps/pentama). This module only handles format conversion.

mod token;

pub use token::*;
