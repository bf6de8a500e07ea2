//! # Progress Module
//!
//! Milestone assessment, profile scoring and access gating.
//!
//! Data flows one way:
//!
//! ```text
//! UserSnapshot ──► profile  ──┐
//!              └─► stage ──► gating ──► ProgressFacade ──► caller
//! ```
//!
//! Every function here is pure and total. Absent data never raises; it
//! degrades to the NotStarted / zero-percent / locked result.

mod facade;
mod gating;
mod profile;
mod result;
mod stage;

pub use facade::*;
pub use gating::*;
pub use profile::*;
pub use result::*;
pub use stage::*;
