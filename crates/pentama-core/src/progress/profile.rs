//! # Profile Progress
//!
//! One "profile complete" score from the identity fields plus the
//! role-specific record.
//!
//! The combined percentage is re-derived from *estimated* filled counts: each
//! sub-score's rounded percentage is turned back into a count with
//! `floor(percentage * fields / 100)`. This can compound rounding error
//! relative to a single pass over all fields, and callers have been tuned
//! around it, so it is kept as is.

use crate::completeness::{CompletenessEvaluator, rounded_percent};
use crate::model::{Role, UserSnapshot};
use crate::progress::MilestoneResult;
use crate::schema::{LECTURER_REQUIRED_FIELDS, STUDENT_REQUIRED_FIELDS, USER_REQUIRED_FIELDS};

/// Filled-field count recovered from a rounded sub-score.
#[must_use]
pub fn estimated_filled(score: MilestoneResult, field_count: usize) -> usize {
    if score.is_complete {
        return field_count;
    }
    (score.percentage as usize).saturating_mul(field_count) / 100
}

/// Merge two sub-scores over their field counts into one profile result.
#[must_use]
pub fn combine_scores(
    user_score: MilestoneResult,
    user_fields: usize,
    role_score: MilestoneResult,
    role_fields: usize,
) -> MilestoneResult {
    let filled = estimated_filled(user_score, user_fields)
        .saturating_add(estimated_filled(role_score, role_fields));
    let total = user_fields.saturating_add(role_fields);

    MilestoneResult::new(
        user_score.is_complete && role_score.is_complete,
        rounded_percent(filled, total),
    )
}

/// Computes the unified profile score for students and lecturers.
pub struct ProfileProgressCalculator;

impl ProfileProgressCalculator {
    /// Evaluate profile completeness for the given role.
    ///
    /// Roles without a profile schema (admin, unknown) are `{false, 0}`.
    #[must_use]
    pub fn evaluate(user: &UserSnapshot, role: Role) -> MilestoneResult {
        let user_score = CompletenessEvaluator::evaluate(Some(user), USER_REQUIRED_FIELDS);

        let (role_score, role_fields) = match role {
            Role::Student => (
                CompletenessEvaluator::evaluate(user.student.as_ref(), STUDENT_REQUIRED_FIELDS),
                STUDENT_REQUIRED_FIELDS.len(),
            ),
            Role::Lecturer => (
                CompletenessEvaluator::evaluate(user.lecturer.as_ref(), LECTURER_REQUIRED_FIELDS),
                LECTURER_REQUIRED_FIELDS.len(),
            ),
            Role::Admin | Role::Unknown => return MilestoneResult::incomplete(),
        };

        let combined = combine_scores(user_score, USER_REQUIRED_FIELDS.len(), role_score, role_fields);
        tracing::trace!(
            %role,
            user = user_score.percentage,
            record = role_score.percentage,
            combined = combined.percentage,
            "profile scored"
        );
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationLevel, Gender, LecturerRecord, StudentRecord};

    fn full_user() -> UserSnapshot {
        UserSnapshot {
            username: Some("H1051211028".to_string()),
            name: Some("Ayu".to_string()),
            gender: Some(Gender::Female),
            avatar_url: Some("/avatars/ayu.png".to_string()),
            ..UserSnapshot::default()
        }
    }

    fn full_student() -> StudentRecord {
        StudentRecord {
            faculty: Some("Teknik".to_string()),
            education_level: Some(EducationLevel::Bachelor),
            study_program: Some("Teknik Informatika".to_string()),
            batch: Some("2021".to_string()),
            research_field: Some("Machine Learning".to_string()),
            final_project: None,
        }
    }

    #[test]
    fn complete_student_profile() {
        let user = UserSnapshot {
            student: Some(full_student()),
            ..full_user()
        };
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Student),
            MilestoneResult::new(true, 100)
        );
    }

    #[test]
    fn double_rounding_case() {
        // 1 of 4 identity fields, 2 of 5 student fields: 25% -> 1, 40% -> 2, 3/9 -> 33%.
        let user = UserSnapshot {
            username: Some("H1051211028".to_string()),
            student: Some(StudentRecord {
                faculty: Some("Teknik".to_string()),
                batch: Some("2021".to_string()),
                ..StudentRecord::default()
            }),
            ..UserSnapshot::default()
        };
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Student),
            MilestoneResult::new(false, 33)
        );
    }

    #[test]
    fn estimated_count_differs_from_true_count() {
        // 1 of 3 rounds to 33%, which estimates back to 0 filled fields.
        let third = MilestoneResult::new(false, rounded_percent(1, 3));
        assert_eq!(estimated_filled(third, 3), 0);

        // Two-stage: (0 + 3) / 6 -> 50%. A single pass would give 4 / 6 -> 67%.
        let full = MilestoneResult::new(true, 100);
        assert_eq!(combine_scores(third, 3, full, 3), MilestoneResult::new(false, 50));
        assert_eq!(rounded_percent(4, 6), 67);
    }

    #[test]
    fn missing_student_record_counts_as_zero() {
        let user = full_user();
        // (4 + 0) / 9 -> 44%
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Student),
            MilestoneResult::new(false, 44)
        );
    }

    #[test]
    fn completeness_is_and_of_sub_scores() {
        let user = UserSnapshot {
            avatar_url: None,
            lecturer: Some(LecturerRecord {
                position: Some("Lektor Kepala".to_string()),
                expertise: Some("Databases".to_string()),
            }),
            ..full_user()
        };
        // (3 + 2) / 6 -> 83%
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Lecturer),
            MilestoneResult::new(false, 83)
        );
    }

    #[test]
    fn lecturer_reads_lecturer_record_only() {
        let user = UserSnapshot {
            student: Some(full_student()),
            lecturer: Some(LecturerRecord {
                position: Some("Asisten Ahli".to_string()),
                expertise: None,
            }),
            ..full_user()
        };
        // (4 + 1) / 6 -> 83%
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Lecturer),
            MilestoneResult::new(false, 83)
        );
    }

    #[test]
    fn roles_without_schema_are_zero() {
        let user = full_user();
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Admin),
            MilestoneResult::incomplete()
        );
        assert_eq!(
            ProfileProgressCalculator::evaluate(&user, Role::Unknown),
            MilestoneResult::incomplete()
        );
    }
}
