//! # Completeness Evaluator
//!
//! Fill ratio of a record over an ordered list of required fields.
//!
//! A field is filled when it is present and, for text, non-blank after
//! trimming. Enum-typed columns listed in [`SENTINEL_TOLERANT_ENUMS`] count as
//! filled whenever a value is present, even the `Unknown` sentinel.
//!
//! All arithmetic is integer-only.

use crate::progress::MilestoneResult;

// =============================================================================
// FIELD VALUES
// =============================================================================

/// Enum-typed profile columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumKind {
    Gender,
    EducationLevel,
}

/// Enum columns whose sentinel value still counts as filled.
///
/// These are nullable-but-typed columns: a stored `UNKNOWN` means the user
/// went through the form, so the column is not reported as missing.
pub const SENTINEL_TOLERANT_ENUMS: &[EnumKind] = &[EnumKind::Gender, EnumKind::EducationLevel];

/// A field as seen by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Null or absent.
    Missing,
    /// Free text.
    Text(&'a str),
    /// A present enum value; `sentinel` marks the `Unknown` variant.
    Enum { kind: EnumKind, sentinel: bool },
}

impl FieldValue<'_> {
    /// Check whether this value counts toward completeness.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Enum { kind, sentinel } => {
                !sentinel || SENTINEL_TOLERANT_ENUMS.contains(kind)
            }
        }
    }
}

/// A record that exposes typed fields to the evaluator.
pub trait FieldSource {
    /// The field enum declared for this record.
    type Field: Copy;

    /// Read one field.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// Round `100 * part / whole` half-up to an integer percentage.
///
/// Returns 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    // round(x / y) == floor((2x + y) / 2y) for non-negative integers
    ((part.saturating_mul(200) + whole) / whole.saturating_mul(2)) as u8
}

/// Computes fill ratios over typed field schemas.
pub struct CompletenessEvaluator;

impl CompletenessEvaluator {
    /// Count how many of the required fields are filled.
    pub fn filled_count<R: FieldSource>(record: &R, required: &[R::Field]) -> usize {
        required
            .iter()
            .filter(|field| record.field(**field).is_filled())
            .count()
    }

    /// Evaluate a record against its required fields.
    ///
    /// An absent record, or an empty field list, is `{false, 0}`.
    pub fn evaluate<R: FieldSource>(record: Option<&R>, required: &[R::Field]) -> MilestoneResult {
        let Some(record) = record else {
            return MilestoneResult::incomplete();
        };
        if required.is_empty() {
            return MilestoneResult::incomplete();
        }

        let filled = Self::filled_count(record, required);
        let percentage = rounded_percent(filled, required.len());
        MilestoneResult::new(percentage == 100, percentage)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationLevel, Gender, StudentRecord, UserSnapshot};
    use crate::schema::{STUDENT_REQUIRED_FIELDS, USER_REQUIRED_FIELDS, UserField};

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_percent(0, 4), 0);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13); // 12.5
        assert_eq!(rounded_percent(3, 9), 33);
        assert_eq!(rounded_percent(5, 5), 100);
        assert_eq!(rounded_percent(1, 0), 0);
    }

    #[test]
    fn absent_record_is_zero() {
        let result = CompletenessEvaluator::evaluate::<UserSnapshot>(None, USER_REQUIRED_FIELDS);
        assert_eq!(result, MilestoneResult::new(false, 0));
    }

    #[test]
    fn empty_field_list_is_zero() {
        let user = UserSnapshot::default();
        let result = CompletenessEvaluator::evaluate(Some(&user), &[] as &[UserField]);
        assert_eq!(result, MilestoneResult::new(false, 0));
    }

    #[test]
    fn blank_text_is_not_filled() {
        let user = UserSnapshot {
            username: Some("H1051211028".to_string()),
            name: Some("   ".to_string()),
            avatar_url: Some(String::new()),
            ..UserSnapshot::default()
        };
        let result = CompletenessEvaluator::evaluate(Some(&user), USER_REQUIRED_FIELDS);
        assert_eq!(result, MilestoneResult::new(false, 25));
    }

    #[test]
    fn sentinel_enum_counts_as_filled() {
        let user = UserSnapshot {
            username: Some("H1051211028".to_string()),
            name: Some("Ayu".to_string()),
            gender: Some(Gender::Unknown),
            avatar_url: Some("/a.png".to_string()),
            ..UserSnapshot::default()
        };
        let result = CompletenessEvaluator::evaluate(Some(&user), USER_REQUIRED_FIELDS);
        assert_eq!(result, MilestoneResult::new(true, 100));

        let student = StudentRecord {
            education_level: Some(EducationLevel::Unknown),
            ..StudentRecord::default()
        };
        assert_eq!(
            CompletenessEvaluator::filled_count(&student, STUDENT_REQUIRED_FIELDS),
            1
        );
    }

    #[test]
    fn allow_list_covers_every_profile_enum() {
        assert!(SENTINEL_TOLERANT_ENUMS.contains(&EnumKind::Gender));
        assert!(SENTINEL_TOLERANT_ENUMS.contains(&EnumKind::EducationLevel));
        assert!(
            FieldValue::Enum {
                kind: EnumKind::Gender,
                sentinel: false
            }
            .is_filled()
        );
        assert!(!FieldValue::Missing.is_filled());
    }

    #[test]
    fn partial_student_record() {
        let student = StudentRecord {
            faculty: Some("Teknik".to_string()),
            study_program: Some("Teknik Informatika".to_string()),
            ..StudentRecord::default()
        };
        let result = CompletenessEvaluator::evaluate(Some(&student), STUDENT_REQUIRED_FIELDS);
        assert_eq!(result, MilestoneResult::new(false, 40));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_text() -> impl Strategy<Value = Option<String>> {
            prop_oneof![
                Just(None),
                Just(Some(String::new())),
                Just(Some("  ".to_string())),
                "[a-zA-Z0-9 ]{1,12}".prop_map(Some),
            ]
        }

        fn arb_gender() -> impl Strategy<Value = Option<Gender>> {
            prop_oneof![
                Just(None),
                Just(Some(Gender::Male)),
                Just(Some(Gender::Female)),
                Just(Some(Gender::Unknown)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_percentage_bounded_and_complete_iff_full(
                username in arb_text(),
                name in arb_text(),
                gender in arb_gender(),
                avatar_url in arb_text(),
                take in 1usize..=4,
            ) {
                let user = UserSnapshot { username, name, gender, avatar_url, ..UserSnapshot::default() };
                let result = CompletenessEvaluator::evaluate(Some(&user), &USER_REQUIRED_FIELDS[..take]);
                prop_assert!(result.percentage <= 100);
                prop_assert_eq!(result.is_complete, result.percentage == 100);
            }
        }
    }
}
