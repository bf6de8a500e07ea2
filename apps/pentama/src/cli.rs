//! # CLI Commands
//!
//! Each `cmd_*` function backs one subcommand. They read snapshot files,
//! call into `pentama_core` and print to stdout. Logging goes to stderr.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use pentama_core::identity::{parse_nim, parse_nip};
use pentama_core::progress::QUORUM;
use pentama_core::{
    AccessDecision, Area, FormatError, GatingResult, IdentityKind, MilestoneResult,
    ProgressFacade, ProgressKey, Role, SessionProgress, StageReport, UserSnapshot, check_access,
    classify_identity, decode_session, encode_session, who_you_are,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid token encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid token: {0}")]
    Format(#[from] FormatError),
    #[error("unknown role '{0}' (expected student, lecturer, admin or auto)")]
    UnknownRole(String),
    #[error("unknown route '{0}'")]
    UnknownRoute(String),
}

// =============================================================================
// HELPERS
// =============================================================================

/// Parse a `--role` argument. `auto` means "derive from the username".
pub fn parse_role(name: &str) -> Result<Option<Role>, CliError> {
    if name.trim().eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match Role::from_name(name) {
        Role::Unknown => Err(CliError::UnknownRole(name.to_string())),
        role => Ok(Some(role)),
    }
}

/// Load a user snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<UserSnapshot, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let user = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "snapshot loaded");
    Ok(user)
}

/// The requested role, or the classifier's answer when none was requested.
pub fn resolve_role(user: &UserSnapshot, requested: Option<Role>) -> Role {
    requested.unwrap_or_else(|| ProgressFacade::resolve_role(user))
}

/// Compute both views for a snapshot file.
pub fn evaluate_file(input: &Path, role: Option<Role>) -> Result<(Role, GatingResult), CliError> {
    let user = load_snapshot(input)?;
    let role = resolve_role(&user, role);
    Ok((role, ProgressFacade::compute_detailed(&user, role)))
}

/// Encode a snapshot's progress as a printable session token.
pub fn encode_token(input: &Path, role: Option<Role>) -> Result<String, CliError> {
    let (_, detailed) = evaluate_file(input, role)?;
    let bytes = encode_session(&SessionProgress::from_detailed(detailed))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a printable session token.
pub fn decode_token(token: &str) -> Result<SessionProgress, CliError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
    Ok(decode_session(&bytes)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_gates(detailed: &GatingResult) {
    for key in ProgressKey::ALL {
        let MilestoneResult {
            is_complete,
            percentage,
        } = detailed.get(key);
        let mark = if is_complete { "x" } else { " " };
        println!("  {:<16} [{}] {:>3}%", key.name(), mark, percentage);
    }
}

/// One line of the per-milestone breakdown.
pub fn format_report(report: &StageReport) -> String {
    format!(
        "  {:<9} reached={:<5} submitted={}/{} assessors_present={:<5} {:>3}%{}",
        report.milestone.to_string(),
        report.reached,
        report.submitted_count,
        QUORUM,
        report.assessors_present,
        report.result.percentage,
        if report.result.is_complete { " complete" } else { "" }
    )
}

// =============================================================================
// COMMANDS
// =============================================================================

/// `pentama evaluate`
pub fn cmd_evaluate(
    input: &Path,
    role: Option<Role>,
    simple: bool,
    json: bool,
) -> Result<(), CliError> {
    let user = load_snapshot(input)?;
    let role = resolve_role(&user, role);
    let detailed = ProgressFacade::compute_detailed(&user, role);

    if json {
        if simple {
            return print_json(&detailed.to_simple());
        }
        return print_json(&detailed);
    }

    println!("Role: {}", role);
    if simple {
        for key in ProgressKey::ALL {
            println!("  {:<16} {}", key.name(), detailed.to_simple().get(key));
        }
        return Ok(());
    }

    print_gates(&detailed);
    if role == Role::Student {
        println!("Milestones:");
        for report in ProgressFacade::milestone_reports(&user) {
            println!("{}", format_report(&report));
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification {
    identity: String,
    kind: IdentityKind,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    nim: Option<pentama_core::identity::NimDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nip: Option<pentama_core::identity::NipDetails>,
}

/// `pentama classify`
pub fn cmd_classify(identity: &str, is_admin: bool, json: bool) -> Result<(), CliError> {
    let classification = Classification {
        identity: identity.to_string(),
        kind: classify_identity(identity),
        role: who_you_are(Some(identity), is_admin),
        nim: parse_nim(identity),
        nip: parse_nip(identity),
    };

    if json {
        return print_json(&classification);
    }

    println!("Identity: {}", classification.identity);
    println!("Kind:     {:?}", classification.kind);
    println!("Role:     {}", classification.role);
    if let Some(nim) = &classification.nim {
        println!("Faculty:  {}", nim.faculty.unwrap_or("unknown"));
        println!("Program:  {}", nim.program_study);
        println!("Level:    {}", nim.education_level.label());
        println!("Entry:    {}", nim.entry_year);
    }
    if let Some(nip) = &classification.nip {
        println!("Born:     {}", nip.birth_date);
        println!("Appointed: {}", nip.appointment_date);
        println!("Gender:   {:?}", nip.gender);
    }
    Ok(())
}

/// `pentama guard`
pub fn cmd_guard(
    input: &Path,
    role: Option<Role>,
    route: &str,
    json: bool,
) -> Result<AccessDecision, CliError> {
    let area = Area::from_path(route).ok_or_else(|| CliError::UnknownRoute(route.to_string()))?;
    let (_, detailed) = evaluate_file(input, role)?;
    let decision = check_access(&detailed.to_simple(), area);

    if json {
        print_json(&decision)?;
    } else {
        match decision {
            AccessDecision::Allow => println!("allow {}", area.path()),
            AccessDecision::Redirect(to) => println!("redirect {} -> {}", area.path(), to.path()),
        }
    }
    Ok(decision)
}

/// `pentama token encode`
pub fn cmd_token_encode(input: &Path, role: Option<Role>) -> Result<(), CliError> {
    println!("{}", encode_token(input, role)?);
    Ok(())
}

/// `pentama token decode`
pub fn cmd_token_decode(token: &str, json: bool) -> Result<(), CliError> {
    let session = decode_token(token)?;
    let detailed = session.resolve_detailed();

    if json {
        return print_json(&detailed);
    }
    if session.is_reconstructed() {
        println!("(approximated from flags; intermediate percentages are not recoverable)");
    }
    print_gates(&detailed);
    Ok(())
}
