//! # Required-Field Schemas
//!
//! Flat, explicitly declared field sets per role. Each field is an enum
//! variant with a typed accessor, so a misspelled field is a compile error
//! rather than a silently empty lookup.

use crate::completeness::{EnumKind, FieldSource, FieldValue};
use crate::model::{EducationLevel, Gender, LecturerRecord, StudentRecord, UserSnapshot};

/// Identity fields every user must fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Username,
    Name,
    Gender,
    AvatarUrl,
}

/// Student record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    Faculty,
    EducationLevel,
    StudyProgram,
    Batch,
    ResearchField,
}

/// Lecturer record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LecturerField {
    Position,
    Expertise,
}

pub const USER_REQUIRED_FIELDS: &[UserField] = &[
    UserField::Username,
    UserField::Name,
    UserField::Gender,
    UserField::AvatarUrl,
];

pub const STUDENT_REQUIRED_FIELDS: &[StudentField] = &[
    StudentField::Faculty,
    StudentField::EducationLevel,
    StudentField::StudyProgram,
    StudentField::Batch,
    StudentField::ResearchField,
];

pub const LECTURER_REQUIRED_FIELDS: &[LecturerField] =
    &[LecturerField::Position, LecturerField::Expertise];

impl UserField {
    /// Column name as exposed to forms and JSON.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Name => "name",
            UserField::Gender => "gender",
            UserField::AvatarUrl => "avatarUrl",
        }
    }
}

impl StudentField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StudentField::Faculty => "faculty",
            StudentField::EducationLevel => "educationLevel",
            StudentField::StudyProgram => "studyProgram",
            StudentField::Batch => "batch",
            StudentField::ResearchField => "researchField",
        }
    }
}

impl LecturerField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LecturerField::Position => "position",
            LecturerField::Expertise => "expertise",
        }
    }
}

fn text(value: &Option<String>) -> FieldValue<'_> {
    match value {
        Some(s) => FieldValue::Text(s),
        None => FieldValue::Missing,
    }
}

fn gender(value: Option<Gender>) -> FieldValue<'static> {
    match value {
        Some(g) => FieldValue::Enum {
            kind: EnumKind::Gender,
            sentinel: g == Gender::Unknown,
        },
        None => FieldValue::Missing,
    }
}

fn education_level(value: Option<EducationLevel>) -> FieldValue<'static> {
    match value {
        Some(level) => FieldValue::Enum {
            kind: EnumKind::EducationLevel,
            sentinel: level == EducationLevel::Unknown,
        },
        None => FieldValue::Missing,
    }
}

impl FieldSource for UserSnapshot {
    type Field = UserField;

    fn field(&self, field: UserField) -> FieldValue<'_> {
        match field {
            UserField::Username => text(&self.username),
            UserField::Name => text(&self.name),
            UserField::Gender => gender(self.gender),
            UserField::AvatarUrl => text(&self.avatar_url),
        }
    }
}

impl FieldSource for StudentRecord {
    type Field = StudentField;

    fn field(&self, field: StudentField) -> FieldValue<'_> {
        match field {
            StudentField::Faculty => text(&self.faculty),
            StudentField::EducationLevel => education_level(self.education_level),
            StudentField::StudyProgram => text(&self.study_program),
            StudentField::Batch => text(&self.batch),
            StudentField::ResearchField => text(&self.research_field),
        }
    }
}

impl FieldSource for LecturerRecord {
    type Field = LecturerField;

    fn field(&self, field: LecturerField) -> FieldValue<'_> {
        match field {
            LecturerField::Position => text(&self.position),
            LecturerField::Expertise => text(&self.expertise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_sizes() {
        assert_eq!(USER_REQUIRED_FIELDS.len(), 4);
        assert_eq!(STUDENT_REQUIRED_FIELDS.len(), 5);
        assert_eq!(LECTURER_REQUIRED_FIELDS.len(), 2);
    }

    #[test]
    fn accessors_read_the_declared_column() {
        let user = UserSnapshot {
            username: Some("H1051211028".to_string()),
            gender: Some(Gender::Unknown),
            ..UserSnapshot::default()
        };
        assert_eq!(user.field(UserField::Username), FieldValue::Text("H1051211028"));
        assert_eq!(user.field(UserField::Name), FieldValue::Missing);
        assert_eq!(
            user.field(UserField::Gender),
            FieldValue::Enum {
                kind: EnumKind::Gender,
                sentinel: true
            }
        );

        let lecturer = LecturerRecord {
            position: Some("Lektor".to_string()),
            expertise: None,
        };
        assert_eq!(lecturer.field(LecturerField::Position), FieldValue::Text("Lektor"));
        assert_eq!(lecturer.field(LecturerField::Expertise), FieldValue::Missing);
    }

    #[test]
    fn field_names_are_camel_case() {
        let names: Vec<_> = STUDENT_REQUIRED_FIELDS.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec!["faculty", "educationLevel", "studyProgram", "batch", "researchField"]
        );
        assert_eq!(UserField::AvatarUrl.name(), "avatarUrl");
    }
}
