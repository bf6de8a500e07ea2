//! # Academic Identity
//!
//! Classifies a username as a student number (NIM) or a civil-servant
//! lecturer number (NIP) and extracts the fields encoded in it.
//!
//! | Kind | Shape | Example |
//! |------|-------|---------|
//! | NIM | faculty letter + 10 digits | `H1051211028` |
//! | NIP | 18 digits | `198203152008121002` |
//!
//! Classification is total: anything else is `Unknown`.

use crate::model::{EducationLevel, Gender, Role};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Patterns are matched against the upper-cased identity.
static NIM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{10}$").expect("NIM pattern compiles"));
static NIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{18}$").expect("NIP pattern compiles"));

/// What kind of academic identity a string is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityKind {
    Nim,
    Nip,
    Unknown,
}

/// Classify a raw identity string.
#[must_use]
pub fn classify_identity(raw: &str) -> IdentityKind {
    let upper = raw.to_uppercase();
    if NIM_RE.is_match(&upper) {
        IdentityKind::Nim
    } else if NIP_RE.is_match(&upper) {
        IdentityKind::Nip
    } else {
        IdentityKind::Unknown
    }
}

/// Role tag for a user.
///
/// A NIP holder flagged as admin is `Admin`; other NIP holders are lecturers;
/// NIM holders are students. Everything else, including a missing username,
/// is `Unknown`.
#[must_use]
pub fn who_you_are(username: Option<&str>, is_admin: bool) -> Role {
    let kind = username.map(classify_identity).unwrap_or(IdentityKind::Unknown);
    match kind {
        IdentityKind::Nip if is_admin => Role::Admin,
        IdentityKind::Nim => Role::Student,
        IdentityKind::Nip => Role::Lecturer,
        IdentityKind::Unknown => Role::Unknown,
    }
}

// =============================================================================
// NIM
// =============================================================================

/// Fields encoded in a student number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NimDetails {
    pub nim: String,
    pub faculty_code: char,
    pub faculty: Option<&'static str>,
    pub education_level: EducationLevel,
    pub program_code: String,
    pub program_study: &'static str,
    pub regular: bool,
    pub entry_year: String,
    pub odd_semester: bool,
    pub registration_number: String,
}

fn faculty_name(code: char) -> Option<&'static str> {
    match code {
        'A' => Some("Hukum"),
        'B' => Some("Ekonomi"),
        'C' => Some("Kedokteran"),
        'D' => Some("Teknik"),
        'E' => Some("Pertanian"),
        'F' => Some("Keguruan dan Ilmu Pendidikan"),
        'G' => Some("Ilmu Sosial dan Ilmu Politik"),
        'H' => Some("Matematika dan Ilmu Pengetahuan Alam"),
        _ => None,
    }
}

fn program_study(faculty: char, program: &str) -> Option<&'static str> {
    let name = match (faculty, program) {
        ('A', "01") => "Ilmu Hukum",
        ('A', "02") => "Hukum Bisnis",
        ('B', "01") => "Manajemen",
        ('B', "02") => "Akuntansi",
        ('B', "03") => "Ekonomi Pembangunan",
        ('C', "01") => "Pendidikan Dokter",
        ('C', "02") => "Ilmu Keperawatan",
        ('D', "01") => "Teknik Sipil",
        ('D', "02") => "Teknik Elektro",
        ('D', "03") => "Teknik Mesin",
        ('D', "04") => "Teknik Informatika",
        ('D', "05") => "Sistem Informasi",
        ('E', "01") => "Agribisnis",
        ('E', "02") => "Agroteknologi",
        ('F', "01") => "Pendidikan Matematika",
        ('F', "02") => "Pendidikan Bahasa Indonesia",
        ('F', "03") => "Pendidikan Bahasa Inggris",
        ('G', "01") => "Ilmu Administrasi Negara",
        ('G', "02") => "Sosiologi",
        ('G', "03") => "Ilmu Komunikasi",
        ('H', "01") => "Matematika",
        ('H', "02") => "Fisika",
        ('H', "03") => "Kimia",
        ('H', "04") => "Biologi",
        ('H', "05") => "Ilmu Komputer",
        _ => return None,
    };
    Some(name)
}

/// Decode a student number. Returns `None` unless it is a valid NIM.
///
/// Layout: `F L PP R YY S NNN` (faculty, level, program, regularity,
/// entry year, semester, registration number).
#[must_use]
pub fn parse_nim(raw: &str) -> Option<NimDetails> {
    let nim = raw.to_uppercase();
    if classify_identity(&nim) != IdentityKind::Nim {
        return None;
    }

    let chars: Vec<char> = nim.chars().collect();
    let faculty_code = chars[0];
    let program_code: String = chars[2..4].iter().collect();

    Some(NimDetails {
        faculty_code,
        faculty: faculty_name(faculty_code),
        education_level: EducationLevel::from_code(chars[1]),
        program_study: program_study(faculty_code, &program_code)
            .unwrap_or("Unknown Study Programmes"),
        program_code,
        regular: chars[4] == '1',
        entry_year: format!("20{}", chars[5..7].iter().collect::<String>()),
        odd_semester: chars[7] == '1',
        registration_number: chars[8..].iter().collect(),
        nim,
    })
}

// =============================================================================
// NIP
// =============================================================================

/// Fields encoded in a lecturer number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NipDetails {
    pub nip: String,
    /// `yyyy-mm-dd`
    pub birth_date: String,
    /// `yyyy-mm`
    pub appointment_date: String,
    pub serial_number: String,
    pub gender: Gender,
}

/// Decode a lecturer number. Returns `None` unless it is a valid NIP.
///
/// Layout: 8-digit birth date, 6-digit appointment month, 4-digit serial.
/// The second serial digit encodes gender (odd male, even female); this is a
/// common convention, not a guarantee.
#[must_use]
pub fn parse_nip(raw: &str) -> Option<NipDetails> {
    let nip = raw.to_string();
    if classify_identity(&nip) != IdentityKind::Nip {
        return None;
    }

    let serial_number = nip[14..].to_string();
    let gender = match serial_number.chars().nth(1).and_then(|c| c.to_digit(10)) {
        Some(d) if d % 2 == 1 => Gender::Male,
        Some(_) => Gender::Female,
        None => Gender::Unknown,
    };

    Some(NipDetails {
        birth_date: format!("{}-{}-{}", &nip[0..4], &nip[4..6], &nip[6..8]),
        appointment_date: format!("{}-{}", &nip[8..12], &nip[12..14]),
        serial_number,
        gender,
        nip,
    })
}
