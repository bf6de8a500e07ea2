//! # Stage Assessment
//!
//! Milestone progress for a thesis project.
//!
//! ## Progression
//!
//! | Stage | Assessed milestones |
//! |-------|---------------------|
//! | Proposal | Proposal |
//! | Result | Proposal (moved past), Result, Final |
//! | Final | Proposal, Result (moved past), Final |
//! | Completed | all (moved past) |
//!
//! Stages only move forward, driven by whoever edits the project. The assessor
//! here never transitions a project; it only reads the stage.
//!
//! ## Percentage vs. completeness
//!
//! The percentage band and the completeness flag are decided separately.
//! A quorum of submitted assessments shows 100% even if the project status
//! never reached Passed, while the gate stays closed until it does (or until
//! the project moves past the milestone).

use crate::model::{AssessorRole, Milestone, ProjectStatus, Stage, ThesisProject};
use crate::progress::{MilestoneResult, PercentageBand};
use serde::{Deserialize, Serialize};

/// Number of assessor roles that form a quorum.
pub const QUORUM: usize = AssessorRole::QUORUM.len();

// =============================================================================
// STAGE REPORT
// =============================================================================

/// Full outcome of assessing one milestone, including diagnostic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub milestone: Milestone,
    /// Whether the project reached the milestone's reference stage.
    pub reached: bool,
    /// Submitted assessments tagged with this milestone.
    pub submitted_count: usize,
    /// At least a quorum of assessors is assigned.
    ///
    /// Diagnostic only: it does not feed the band or the completeness flag.
    pub assessors_present: bool,
    pub band: PercentageBand,
    pub result: MilestoneResult,
}

impl StageReport {
    fn not_started(milestone: Milestone) -> Self {
        Self {
            milestone,
            reached: false,
            submitted_count: 0,
            assessors_present: false,
            band: PercentageBand::NotStarted,
            result: MilestoneResult::from_band(false, PercentageBand::NotStarted),
        }
    }
}

// =============================================================================
// STAGE ASSESSOR
// =============================================================================

/// Stage Assessor - pure function from a project snapshot to milestone progress.
pub struct StageAssessor;

impl StageAssessor {
    /// Assess one milestone and return only the result.
    #[must_use]
    pub fn evaluate(project: Option<&ThesisProject>, milestone: Milestone) -> MilestoneResult {
        Self::assess(project, milestone).result
    }

    /// Assess one milestone with diagnostics.
    #[must_use]
    pub fn assess(project: Option<&ThesisProject>, milestone: Milestone) -> StageReport {
        let Some(project) = project else {
            return StageReport::not_started(milestone);
        };

        if project.stage < milestone.reference_stage() {
            return StageReport::not_started(milestone);
        }

        let submitted_count = project
            .assessments
            .iter()
            .filter(|a| a.milestone == milestone && a.is_submitted())
            .count();
        let assessors_present = project.assessors.len() >= QUORUM;

        let band = band_for(project, milestone, submitted_count);
        let is_complete = is_milestone_complete(project, milestone, submitted_count);

        tracing::debug!(
            %milestone,
            stage = ?project.stage,
            status = ?project.status,
            submitted_count,
            assessors_present,
            ?band,
            is_complete,
            "stage assessed"
        );

        StageReport {
            milestone,
            reached: true,
            submitted_count,
            assessors_present,
            band,
            result: MilestoneResult::from_band(is_complete, band),
        }
    }

    /// Check whether a project has moved beyond a milestone's own stage.
    #[must_use]
    pub fn has_moved_past(project: &ThesisProject, milestone: Milestone) -> bool {
        project.stage > milestone.own_stage()
    }
}

/// First matching rule wins; nothing matching leaves the band at NotStarted.
fn band_for(project: &ThesisProject, milestone: Milestone, submitted: usize) -> PercentageBand {
    match project.status {
        ProjectStatus::Draft => PercentageBand::InProgress,
        ProjectStatus::Submitted => PercentageBand::Submitted,
        _ if submitted > 0 && submitted < QUORUM => PercentageBand::Reviewed,
        status
            if submitted >= QUORUM
                || status == ProjectStatus::Passed
                || StageAssessor::has_moved_past(project, milestone) =>
        {
            PercentageBand::Completed
        }
        _ => PercentageBand::NotStarted,
    }
}

fn is_milestone_complete(project: &ThesisProject, milestone: Milestone, submitted: usize) -> bool {
    match milestone {
        Milestone::Proposal | Milestone::Result => {
            StageAssessor::has_moved_past(project, milestone)
                || (submitted >= QUORUM && project.status == ProjectStatus::Passed)
        }
        Milestone::Final => project.stage == Stage::Completed,
    }
}

// =============================================================================
// TESTS
// =============================================================================
