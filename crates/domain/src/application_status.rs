// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status tracking and transition rules.
//!
//! Every legal status transition is defined in one table
//! ([`ApplicationStatus::transition_to`]). Admission decisions are
//! administrator-initiated only; the system never advances status
//! based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a student application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Self-registered, application form not yet submitted for review
    Registered,
    /// Submitted, awaiting an administrator decision
    Pending,
    /// Accepted; an account identifier has been assigned
    Approved,
    /// Denied for this admission cycle
    Rejected,
    /// Administratively disabled (graduated or removed); blocks login
    Inactive,
}

/// Outcome of consulting the transition table for a (from, to) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    /// The transition is legal and changes the status.
    Apply,
    /// Same-status request: legal, but produces no state change and no
    /// side effects (no history entry, no notification, no identifier).
    Noop,
    /// The transition is not permitted.
    Deny(&'static str),
}

impl ApplicationStatus {
    /// Returns the persisted string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parses a status from its persisted string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the label is unknown.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "REGISTERED" => Ok(Self::Registered),
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// The transition table: decides whether moving from this status to
    /// `target` is applied, a guarded no-op, or denied.
    ///
    /// This is the only place transition legality is defined.
    #[must_use]
    pub const fn transition_to(self, target: Self) -> TransitionRule {
        match (self, target) {
            // Repeated administrative actions (double-submitted clicks)
            // must not create duplicate audit entries or notifications.
            (Self::Registered, Self::Registered)
            | (Self::Pending, Self::Pending)
            | (Self::Approved, Self::Approved)
            | (Self::Rejected, Self::Rejected)
            | (Self::Inactive, Self::Inactive) => TransitionRule::Noop,

            // Submission for review, including resubmission after rejection.
            (Self::Registered | Self::Rejected, Self::Pending) => TransitionRule::Apply,

            // Administrator decisions, including revisions of a prior decision.
            (Self::Pending | Self::Rejected, Self::Approved)
            | (Self::Pending | Self::Approved, Self::Rejected) => TransitionRule::Apply,

            // Administrative deactivation is reachable from any state.
            (_, Self::Inactive) => TransitionRule::Apply,

            (Self::Inactive, _) => {
                TransitionRule::Deny("deactivated applications cannot change status")
            }
            (Self::Registered, _) => {
                TransitionRule::Deny("application has not been submitted for review")
            }
            (Self::Approved, Self::Pending) => {
                TransitionRule::Deny("approved applications cannot be resubmitted")
            }
            _ => TransitionRule::Deny("transition not permitted by the admission lifecycle"),
        }
    }

    /// Builds the error for a denied transition.
    #[must_use]
    pub const fn denial(self, target: Self, reason: &'static str) -> DomainError {
        DomainError::InvalidTransition {
            from: self.as_str(),
            to: target.as_str(),
            reason,
        }
    }

    /// Humanized form used in notification messages, e.g. "approved".
    #[must_use]
    pub fn humanized(&self) -> String {
        self.as_str().to_lowercase().replace('_', " ")
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An administrator decision on a pending application.
///
/// Only these two outcomes are recorded in the application history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Returns the persisted string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// The application status this decision resolves to.
    #[must_use]
    pub const fn status(self) -> ApplicationStatus {
        match self {
            Self::Approved => ApplicationStatus::Approved,
            Self::Rejected => ApplicationStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Registered,
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Inactive,
    ];

    #[test]
    fn test_status_string_round_trip() {
        for status in ALL {
            let s = status.as_str();
            match ApplicationStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = ApplicationStatus::parse_str("ENROLLED");
        assert!(matches!(result, Err(DomainError::InvalidStatus(_))));
    }

    #[test]
    fn test_self_transition_is_noop_for_every_status() {
        for status in ALL {
            assert_eq!(status.transition_to(status), TransitionRule::Noop);
        }
    }

    #[test]
    fn test_submission_paths() {
        assert_eq!(
            ApplicationStatus::Registered.transition_to(ApplicationStatus::Pending),
            TransitionRule::Apply
        );
        assert_eq!(
            ApplicationStatus::Rejected.transition_to(ApplicationStatus::Pending),
            TransitionRule::Apply
        );
        assert!(matches!(
            ApplicationStatus::Approved.transition_to(ApplicationStatus::Pending),
            TransitionRule::Deny(_)
        ));
    }

    #[test]
    fn test_decision_paths() {
        assert_eq!(
            ApplicationStatus::Pending.transition_to(ApplicationStatus::Approved),
            TransitionRule::Apply
        );
        assert_eq!(
            ApplicationStatus::Pending.transition_to(ApplicationStatus::Rejected),
            TransitionRule::Apply
        );
        // Decision revisions
        assert_eq!(
            ApplicationStatus::Rejected.transition_to(ApplicationStatus::Approved),
            TransitionRule::Apply
        );
        assert_eq!(
            ApplicationStatus::Approved.transition_to(ApplicationStatus::Rejected),
            TransitionRule::Apply
        );
    }

    #[test]
    fn test_registered_cannot_be_decided() {
        assert!(matches!(
            ApplicationStatus::Registered.transition_to(ApplicationStatus::Approved),
            TransitionRule::Deny(_)
        ));
        assert!(matches!(
            ApplicationStatus::Registered.transition_to(ApplicationStatus::Rejected),
            TransitionRule::Deny(_)
        ));
    }

    #[test]
    fn test_deactivation_reachable_from_every_other_status() {
        for status in ALL {
            let rule = status.transition_to(ApplicationStatus::Inactive);
            if status == ApplicationStatus::Inactive {
                assert_eq!(rule, TransitionRule::Noop);
            } else {
                assert_eq!(rule, TransitionRule::Apply);
            }
        }
    }

    #[test]
    fn test_inactive_is_terminal() {
        for target in [
            ApplicationStatus::Registered,
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert!(matches!(
                ApplicationStatus::Inactive.transition_to(target),
                TransitionRule::Deny(_)
            ));
        }
    }

    #[test]
    fn test_humanized_status() {
        assert_eq!(ApplicationStatus::Approved.humanized(), "approved");
        assert_eq!(ApplicationStatus::Pending.humanized(), "pending");
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("APPROVED".parse::<Decision>(), Ok(Decision::Approved));
        assert_eq!("REJECTED".parse::<Decision>(), Ok(Decision::Rejected));
        assert!(matches!(
            "approved".parse::<Decision>(),
            Err(DomainError::InvalidDecision(_))
        ));
        assert!(matches!(
            "WAITLISTED".parse::<Decision>(),
            Err(DomainError::InvalidDecision(_))
        ));
    }

    #[test]
    fn test_decision_resolves_to_status() {
        assert_eq!(Decision::Approved.status(), ApplicationStatus::Approved);
        assert_eq!(Decision::Rejected.status(), ApplicationStatus::Rejected);
    }
}
