//! # Pentama Core
//!
//! The deterministic Progress & Gating Engine.
//!
//! Given a user snapshot (identity fields, a student or lecturer record and,
//! for students, the thesis project with its assessments), the engine computes:
//!
//! - a completeness percentage for the profile and for each thesis milestone,
//! - the boolean access gates (`completeProfile`, `canAccessResult`,
//!   `canAccessFinal`) used by route guards and navigation.
//!
//! The engine is a pure function of its inputs. It never mutates a snapshot,
//! performs no I/O and never fails: absent or incomplete data collapses to the
//! most conservative (locked) result.
//!
//! ## Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`model`] | Snapshot records (user, student, lecturer, thesis project) |
//! | [`schema`] | Typed required-field schemas per role |
//! | [`completeness`] | Fill-ratio evaluation over a schema |
//! | [`progress`] | Stage assessment, profile score, gating, facade |
//! | [`identity`] | NIM / NIP classification of usernames |
//! | [`guard`] | Route and navigation decisions over the gates |
//! | [`cache`] | Injectable TTL cache for computed progress |
//! | [`session`] | Session-level progress storage and recalculation |
//! | [`formats`] | Compact binary session token |

pub mod cache;
pub mod completeness;
pub mod error;
pub mod formats;
pub mod guard;
pub mod identity;
pub mod model;
pub mod progress;
pub mod schema;
pub mod session;

pub use cache::{ProgressCache, TtlCache};
pub use completeness::{CompletenessEvaluator, FieldValue};
pub use error::{FormatError, PercentageOutOfRange};
pub use formats::{decode_session, encode_session};
pub use guard::{AccessDecision, Area, NavItem, check_access, is_feature_enabled, navigation};
pub use identity::{IdentityKind, classify_identity, who_you_are};
pub use model::{
    Assessment, AssessmentStatus, AssessorAssignment, AssessorRole, EducationLevel, Gender,
    LecturerRecord, Milestone, ProjectStatus, Role, Stage, StudentRecord, ThesisProject,
    UserSnapshot,
};
pub use progress::{
    GatingResult, MilestoneResult, PercentageBand, ProgressFacade, ProgressKey, SimpleProgress,
    StageReport,
};
pub use session::{ProgressTracker, SessionProgress};
