//! Dashboard shell shown to an authenticated session.
//!
//! The dashboard never mutates the session; it reads the identity through an
//! [`AuthContext`] and renders one of three sections.

use std::fmt;

use serde::Serialize;

use crate::domain::{AuthContext, Identity};

const UID_PREVIEW_LEN: usize = 10;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    /// Profile summary.
    #[default]
    Profile,
    /// Recent activity.
    Activity,
    /// Account actions.
    Settings,
}

impl DashboardSection {
    /// Every section in tab order.
    pub const ALL: [Self; 3] = [Self::Profile, Self::Activity, Self::Settings];
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Profile => "Profile",
            Self::Activity => "Activity",
            Self::Settings => "Settings",
        })
    }
}

/// Rendering was attempted without a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// No identity in the auth context.
    #[error("Please log in to access the dashboard")]
    NotAuthenticated,
}

/// Profile card contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Display name, or "User".
    pub display_name: String,
    /// Upper-case avatar letter.
    pub avatar_initial: char,
    /// Account email.
    pub email: Option<String>,
    /// First ten characters of the uid followed by "...".
    pub uid_preview: String,
    /// "Email Verified" or "Email Not Verified".
    pub verification: &'static str,
    /// Account creation date as `YYYY-MM-DD`.
    pub joined: Option<String>,
}

impl ProfileSummary {
    /// Summarise an identity for the profile card.
    pub fn from_identity(identity: &Identity) -> Self {
        let display_name = identity.display_name().unwrap_or("User").to_owned();
        let avatar_initial = identity
            .display_name()
            .or_else(|| identity.email())
            .and_then(|source| source.chars().next())
            .map_or('U', |initial| initial.to_ascii_uppercase());
        let uid_preview: String = identity
            .uid()
            .as_ref()
            .chars()
            .take(UID_PREVIEW_LEN)
            .collect();

        Self {
            display_name,
            avatar_initial,
            email: identity.email().map(str::to_owned),
            uid_preview: format!("{uid_preview}..."),
            verification: if identity.email_verified() {
                "Email Verified"
            } else {
                "Email Not Verified"
            },
            joined: identity
                .metadata()
                .created_at
                .map(|created| created.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Rendered body of the selected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum DashboardView {
    /// Profile card.
    Profile(ProfileSummary),
    /// Activity feed.
    Activity {
        /// Placeholder shown while there is no activity.
        message: &'static str,
    },
    /// Account actions.
    Settings {
        /// Action labels in display order.
        actions: &'static [&'static str],
    },
}

/// Activity placeholder.
pub const NO_ACTIVITY: &str = "No recent activity to display.";

/// Settings action labels.
pub const SETTINGS_ACTIONS: &[&str] = &["Edit Profile", "Reset Password"];

/// Dashboard state: the auth subscription plus the selected tab.
#[derive(Debug, Clone)]
pub struct Dashboard {
    context: AuthContext,
    section: DashboardSection,
}

impl Dashboard {
    /// Dashboard opened on the profile tab.
    pub fn new(context: AuthContext) -> Self {
        Self {
            context,
            section: DashboardSection::default(),
        }
    }

    /// Selected tab.
    pub const fn section(&self) -> DashboardSection {
        self.section
    }

    /// Switch tab.
    pub const fn select(&mut self, section: DashboardSection) {
        self.section = section;
    }

    /// Render the selected tab for the current identity.
    pub fn render(&self) -> Result<DashboardView, DashboardError> {
        let identity = self
            .context
            .identity()
            .ok_or(DashboardError::NotAuthenticated)?;
        Ok(match self.section {
            DashboardSection::Profile => {
                DashboardView::Profile(ProfileSummary::from_identity(&identity))
            }
            DashboardSection::Activity => DashboardView::Activity {
                message: NO_ACTIVITY,
            },
            DashboardSection::Settings => DashboardView::Settings {
                actions: SETTINGS_ACTIONS,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{IdentityMetadata, Uid};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn identity(display_name: Option<&str>, email: Option<&str>, verified: bool) -> Identity {
        Identity::builder(Uid::new("abcdefghijklmnop").expect("uid"))
            .display_name(display_name.map(str::to_owned))
            .email(email.map(str::to_owned))
            .email_verified(verified)
            .metadata(IdentityMetadata {
                created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).single(),
                last_sign_in_at: None,
            })
            .build()
    }

    #[test]
    fn profile_summary_formats_the_identity() {
        let summary = ProfileSummary::from_identity(&identity(
            Some("ada lovelace"),
            Some("ada@example.com"),
            true,
        ));
        assert_eq!(summary.display_name, "ada lovelace");
        assert_eq!(summary.avatar_initial, 'A');
        assert_eq!(summary.uid_preview, "abcdefghij...");
        assert_eq!(summary.verification, "Email Verified");
        assert_eq!(summary.joined.as_deref(), Some("2024-01-15"));
    }

    #[rstest]
    #[case(None, Some("zed@example.com"), 'Z')]
    #[case(None, None, 'U')]
    fn missing_display_name_falls_back(
        #[case] display_name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] initial: char,
    ) {
        let summary = ProfileSummary::from_identity(&identity(display_name, email, false));
        assert_eq!(summary.display_name, "User");
        assert_eq!(summary.avatar_initial, initial);
        assert_eq!(summary.verification, "Email Not Verified");
    }

    #[test]
    fn sections_default_to_profile_in_tab_order() {
        assert_eq!(DashboardSection::default(), DashboardSection::Profile);
        let labels: Vec<String> = DashboardSection::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Profile", "Activity", "Settings"]);
    }
}
