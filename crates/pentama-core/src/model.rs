//! # Snapshot Model
//!
//! Read-only records handed to the engine by the data fetcher.
//!
//! All records are owned by the caller and arrive fully materialized
//! (assessments and assessor assignments are loaded, never lazy). The engine
//! only borrows them.

use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Role tag supplied by the identity classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Lecturer,
    Admin,
    Unknown,
}

impl Role {
    /// Parse a role name case-insensitively. Unrecognized names map to `Unknown`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "student" => Role::Student,
            "lecturer" => Role::Lecturer,
            "admin" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ENUM-TYPED PROFILE COLUMNS
// =============================================================================

/// Gender column. `Unknown` is a sentinel, but still a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// Education level column. `Unknown` is a sentinel, but still a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Diploma,
    Bachelor,
    Master,
    Doctor,
    Unknown,
}

impl EducationLevel {
    /// Map the single-digit level code used in student numbers.
    #[must_use]
    pub fn from_code(code: char) -> Self {
        match code {
            '0' => EducationLevel::Diploma,
            '1' => EducationLevel::Bachelor,
            '2' => EducationLevel::Master,
            '3' => EducationLevel::Doctor,
            _ => EducationLevel::Unknown,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Bachelor => "S1 (Sarjana)",
            EducationLevel::Master => "S2 (Magister)",
            EducationLevel::Doctor => "S3 (Doktor)",
            EducationLevel::Unknown => "unknown",
        }
    }
}

// =============================================================================
// THESIS PROGRESSION
// =============================================================================

/// Position of a thesis project in the ordered progression.
///
/// `Proposal < Result < Final < Completed`. A project's stage never moves
/// backwards; the engine relies on this but does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Proposal,
    Result,
    Final,
    Completed,
}

impl Stage {
    /// Ordinal of the stage in the progression.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Stage::Proposal => 0,
            Stage::Result => 1,
            Stage::Final => 2,
            Stage::Completed => 3,
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Proposal => Some(Stage::Result),
            Stage::Result => Some(Stage::Final),
            Stage::Final => Some(Stage::Completed),
            Stage::Completed => None,
        }
    }

    /// Check if this stage is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Completed)
    }
}

/// A progression checkpoint that requires quorum assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Milestone {
    Proposal,
    Result,
    Final,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [Milestone::Proposal, Milestone::Result, Milestone::Final];

    /// The stage this milestone is assessed in.
    #[must_use]
    pub fn own_stage(&self) -> Stage {
        match self {
            Milestone::Proposal => Stage::Proposal,
            Milestone::Result => Stage::Result,
            Milestone::Final => Stage::Final,
        }
    }

    /// The stage a project must have reached before this milestone is assessed.
    ///
    /// Final is assessed as soon as the project reaches Result, not Final.
    /// This mirrors the behavior the rest of the application was built on and
    /// is pinned by a regression test; do not change it without product sign-off.
    #[must_use]
    pub fn reference_stage(&self) -> Stage {
        match self {
            Milestone::Proposal => Stage::Proposal,
            Milestone::Result | Milestone::Final => Stage::Result,
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Milestone::Proposal => "proposal",
            Milestone::Result => "result",
            Milestone::Final => "final",
        };
        f.write_str(name)
    }
}

/// Workflow status of a thesis project within its current stage.
///
/// Statuses this crate does not know deserialize as `Other` and score like
/// `Revision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
    Submitted,
    Revision,
    Passed,
    Failed,
    #[serde(other)]
    Other,
}

/// Status of a single assessor's assessment. Only `Submitted` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    Draft,
    Submitted,
    #[serde(other)]
    Other,
}

/// The four fixed assessor roles that form a quorum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssessorRole {
    #[serde(rename = "SUPERVISOR_1")]
    Supervisor1,
    #[serde(rename = "SUPERVISOR_2")]
    Supervisor2,
    #[serde(rename = "EXAMINER_1")]
    Examiner1,
    #[serde(rename = "EXAMINER_2")]
    Examiner2,
}

impl AssessorRole {
    /// Every role required for quorum.
    pub const QUORUM: [AssessorRole; 4] = [
        AssessorRole::Supervisor1,
        AssessorRole::Supervisor2,
        AssessorRole::Examiner1,
        AssessorRole::Examiner2,
    ];
}

/// One assessor's assessment of one milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Milestone this assessment belongs to.
    #[serde(rename = "stage")]
    pub milestone: Milestone,
    pub status: AssessmentStatus,
    #[serde(default)]
    pub assessor_role: Option<AssessorRole>,
}

impl Assessment {
    #[must_use]
    pub fn new(milestone: Milestone, status: AssessmentStatus) -> Self {
        Self {
            milestone,
            status,
            assessor_role: None,
        }
    }

    #[must_use]
    pub fn by(mut self, role: AssessorRole) -> Self {
        self.assessor_role = Some(role);
        self
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.status == AssessmentStatus::Submitted
    }
}

/// Binds an assessor role to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessorAssignment {
    pub role: AssessorRole,
    #[serde(default)]
    pub lecturer_id: Option<String>,
}

impl AssessorAssignment {
    #[must_use]
    pub fn new(role: AssessorRole) -> Self {
        Self {
            role,
            lecturer_id: None,
        }
    }
}

/// A student's thesis project with its assessments and assessor bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisProject {
    #[serde(default)]
    pub title: Option<String>,
    pub stage: Stage,
    pub status: ProjectStatus,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub assessors: Vec<AssessorAssignment>,
}

impl ThesisProject {
    /// Create a project with no assessments or assessors.
    #[must_use]
    pub fn new(stage: Stage, status: ProjectStatus) -> Self {
        Self {
            title: None,
            stage,
            status,
            assessments: Vec::new(),
            assessors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_assessments(mut self, assessments: Vec<Assessment>) -> Self {
        self.assessments = assessments;
        self
    }

    #[must_use]
    pub fn with_assessors(mut self, assessors: Vec<AssessorAssignment>) -> Self {
        self.assessors = assessors;
        self
    }
}

// =============================================================================
// USER SNAPSHOT
// =============================================================================

/// Student-specific profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRecord {
    pub faculty: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub study_program: Option<String>,
    pub batch: Option<String>,
    pub research_field: Option<String>,
    pub final_project: Option<ThesisProject>,
}

/// Lecturer-specific profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LecturerRecord {
    pub position: Option<String>,
    pub expertise: Option<String>,
}

/// A user as fetched for one request.
///
/// At most one of `student` / `lecturer` is expected to be set; which one the
/// engine reads is decided by the role tag, not by presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSnapshot {
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub student: Option<StudentRecord>,
    pub lecturer: Option<LecturerRecord>,
}

impl UserSnapshot {
    /// The thesis project, if this user has a student record with one.
    #[must_use]
    pub fn final_project(&self) -> Option<&ThesisProject> {
        self.student.as_ref().and_then(|s| s.final_project.as_ref())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Proposal < Stage::Result);
        assert!(Stage::Result < Stage::Final);
        assert!(Stage::Final < Stage::Completed);
        assert_eq!(Stage::Completed.index(), 3);
        assert!(Stage::Completed.is_terminal());
        assert_eq!(Stage::Final.next(), Some(Stage::Completed));
    }

    #[test]
    fn final_milestone_references_result_stage() {
        assert_eq!(Milestone::Proposal.reference_stage(), Stage::Proposal);
        assert_eq!(Milestone::Result.reference_stage(), Stage::Result);
        assert_eq!(Milestone::Final.reference_stage(), Stage::Result);
        assert_eq!(Milestone::Final.own_stage(), Stage::Final);
    }

    #[test]
    fn role_from_name_is_total() {
        assert_eq!(Role::from_name("Student"), Role::Student);
        assert_eq!(Role::from_name(" LECTURER "), Role::Lecturer);
        assert_eq!(Role::from_name("admin"), Role::Admin);
        assert_eq!(Role::from_name("dean"), Role::Unknown);
        assert_eq!(Role::from_name(""), Role::Unknown);
    }

    #[test]
    fn snapshot_deserializes_from_camel_case_json() {
        let json = r#"{
            "username": "H1051211028",
            "name": "Ayu",
            "gender": "FEMALE",
            "avatarUrl": "/avatars/ayu.png",
            "student": {
                "faculty": "Teknik",
                "educationLevel": "BACHELOR",
                "finalProject": {
                    "stage": "RESULT",
                    "status": "PASSED",
                    "assessments": [
                        {"stage": "PROPOSAL", "status": "SUBMITTED", "assessorRole": "SUPERVISOR_1"}
                    ],
                    "assessors": [{"role": "EXAMINER_2"}]
                }
            }
        }"#;

        let user: UserSnapshot = serde_json::from_str(json).unwrap();
        assert!(!user.is_admin);
        assert_eq!(user.gender, Some(Gender::Female));
        let project = user.final_project().unwrap();
        assert_eq!(project.stage, Stage::Result);
        assert_eq!(project.assessments[0].milestone, Milestone::Proposal);
        assert_eq!(
            project.assessments[0].assessor_role,
            Some(AssessorRole::Supervisor1)
        );
        assert_eq!(project.assessors[0].role, AssessorRole::Examiner2);
        assert!(user.lecturer.is_none());
    }

    #[test]
    fn unlisted_statuses_deserialize_as_other() {
        let json = r#"{
            "stage": "PROPOSAL",
            "status": "REJECTED",
            "assessments": [
                {"stage": "PROPOSAL", "status": "PENDING", "assessorRole": "EXAMINER_1"}
            ]
        }"#;

        let project: ThesisProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::Other);
        assert_eq!(project.assessments[0].status, AssessmentStatus::Other);
        assert!(!project.assessments[0].is_submitted());
    }
}
