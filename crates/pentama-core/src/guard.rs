//! # Access Guard
//!
//! Route and navigation decisions over the computed gates.
//!
//! | Area | Requires | Otherwise redirect to |
//! |------|----------|-----------------------|
//! | Dashboard `/` | completeProfile | Profile |
//! | Profile `/profile` | nothing | - |
//! | Proposal `/proposal` | completeProfile | Profile |
//! | Result `/result` | canAccessResult | Proposal |
//! | Final `/final` | canAccessFinal | Result |
//!
//! Route guards read the boolean view only. Navigation also accepts a
//! percentage of 100 as enabled, so either progress view can unlock it.

use crate::progress::{GatingResult, ProgressKey, SimpleProgress};
use serde::{Deserialize, Serialize};

/// A gated application area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Area {
    Dashboard,
    Profile,
    Proposal,
    Result,
    Final,
}

impl Area {
    pub const ALL: [Area; 5] = [
        Area::Dashboard,
        Area::Profile,
        Area::Proposal,
        Area::Result,
        Area::Final,
    ];

    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Area::Dashboard => "/",
            Area::Profile => "/profile",
            Area::Proposal => "/proposal",
            Area::Result => "/result",
            Area::Final => "/final",
        }
    }

    /// Area served at `path`, ignoring a trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Area> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Area::ALL.into_iter().find(|area| area.path() == normalized)
    }

    /// The gate this area requires, if any.
    #[must_use]
    pub fn required_key(&self) -> Option<ProgressKey> {
        match self {
            Area::Profile => None,
            Area::Dashboard | Area::Proposal => Some(ProgressKey::CompleteProfile),
            Area::Result => Some(ProgressKey::CanAccessResult),
            Area::Final => Some(ProgressKey::CanAccessFinal),
        }
    }

    /// Where a denied request is sent.
    #[must_use]
    pub fn fallback(&self) -> Area {
        match self {
            Area::Dashboard | Area::Profile | Area::Proposal => Area::Profile,
            Area::Result => Area::Proposal,
            Area::Final => Area::Result,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Area::Dashboard => "Dashboard",
            Area::Profile => "Profile",
            Area::Proposal => "Proposal",
            Area::Result => "Result",
            Area::Final => "Final",
        }
    }
}

/// Outcome of a route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "to", rename_all = "camelCase")]
pub enum AccessDecision {
    Allow,
    Redirect(Area),
}

/// Decide whether a user with the given flags may enter `area`.
#[must_use]
pub fn check_access(progress: &SimpleProgress, area: Area) -> AccessDecision {
    match area.required_key() {
        Some(key) if !progress.get(key) => {
            tracing::debug!(area = area.path(), gate = key.name(), "access redirected");
            AccessDecision::Redirect(area.fallback())
        }
        _ => AccessDecision::Allow,
    }
}

/// A feature is enabled when its flag is set or its percentage is full.
#[must_use]
pub fn is_feature_enabled(flag: bool, percentage: u8) -> bool {
    flag || percentage >= 100
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub area: Area,
    pub enabled: bool,
}

/// Sidebar entries for every area, enabled from either progress view.
#[must_use]
pub fn navigation(simple: &SimpleProgress, detailed: &GatingResult) -> Vec<NavItem> {
    Area::ALL
        .into_iter()
        .map(|area| {
            let enabled = area.required_key().is_none_or(|key| {
                is_feature_enabled(simple.get(key), detailed.get(key).percentage)
            });
            NavItem { area, enabled }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MilestoneResult;

    #[test]
    fn paths_round_trip() {
        for area in Area::ALL {
            assert_eq!(Area::from_path(area.path()), Some(area));
        }
        assert_eq!(Area::from_path("/result/"), Some(Area::Result));
        assert_eq!(Area::from_path("/admin"), None);
    }

    #[test]
    fn locked_user_is_sent_back_a_step() {
        let locked = SimpleProgress::locked();
        assert_eq!(check_access(&locked, Area::Profile), AccessDecision::Allow);
        assert_eq!(
            check_access(&locked, Area::Dashboard),
            AccessDecision::Redirect(Area::Profile)
        );
        assert_eq!(
            check_access(&locked, Area::Proposal),
            AccessDecision::Redirect(Area::Profile)
        );
        assert_eq!(
            check_access(&locked, Area::Result),
            AccessDecision::Redirect(Area::Proposal)
        );
        assert_eq!(
            check_access(&locked, Area::Final),
            AccessDecision::Redirect(Area::Result)
        );
    }

    #[test]
    fn open_gates_allow() {
        let open = SimpleProgress {
            complete_profile: true,
            can_access_result: true,
            can_access_final: false,
        };
        assert_eq!(check_access(&open, Area::Dashboard), AccessDecision::Allow);
        assert_eq!(check_access(&open, Area::Result), AccessDecision::Allow);
        assert_eq!(
            check_access(&open, Area::Final),
            AccessDecision::Redirect(Area::Result)
        );
    }

    #[test]
    fn navigation_accepts_full_percentage() {
        let simple = SimpleProgress::locked();
        let detailed = GatingResult {
            complete_profile: MilestoneResult::new(false, 100),
            can_access_result: MilestoneResult::new(false, 75),
            can_access_final: MilestoneResult::new(false, 0),
        };
        let enabled: Vec<(Area, bool)> = navigation(&simple, &detailed)
            .into_iter()
            .map(|item| (item.area, item.enabled))
            .collect();
        assert_eq!(
            enabled,
            vec![
                (Area::Dashboard, true),
                (Area::Profile, true),
                (Area::Proposal, true),
                (Area::Result, false),
                (Area::Final, false),
            ]
        );
    }

    #[test]
    fn decision_serializes_with_target() {
        let json = serde_json::to_string(&AccessDecision::Redirect(Area::Proposal)).unwrap();
        assert_eq!(json, r#"{"decision":"redirect","to":"proposal"}"#);
        let json = serde_json::to_string(&AccessDecision::Allow).unwrap();
        assert_eq!(json, r#"{"decision":"allow"}"#);
    }
}
