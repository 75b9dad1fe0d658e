//! Post-login redirect dispatch based on the user's role claim.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

pub const LOGIN_PATH: &str = "/login";
pub const CABINET_DASHBOARD_PATH: &str = "/cabinet/dashboard";
pub const DOCTOR_DASHBOARD_PATH: &str = "/doctor/dashboard";
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Resolution state of the framework-managed user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SessionStatus {
    Loading,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    /// Employer.
    Cabinet,
    /// Candidate.
    Doctor,
}

impl Role {
    /// Parses a role claim. Anything other than the two known roles counts as unset.
    pub fn from_claim(claim: Option<&str>) -> Option<Self> {
        match claim {
            Some("CABINET") => Some(Role::Cabinet),
            Some("DOCTOR") => Some(Role::Doctor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionUser {
    #[serde(default)]
    pub role: Option<String>,
}

/// The user session as handed over by the auth provider. Read, never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserSession {
    #[serde(default)]
    pub user: SessionUser,
}

impl UserSession {
    pub fn with_role(role: Option<&str>) -> Self {
        Self {
            user: SessionUser {
                role: role.map(str::to_string),
            },
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::from_claim(self.user.role.as_deref())
    }
}

/// resolve_destination
///
/// Where the dashboard entry point should send the user, or `None` while the
/// session is still loading. A missing session object means login, whatever the
/// reported status.
pub fn resolve_destination(
    status: SessionStatus,
    session: Option<&UserSession>,
) -> Option<&'static str> {
    if status == SessionStatus::Loading {
        return None;
    }

    let Some(session) = session else {
        return Some(LOGIN_PATH);
    };
    if status == SessionStatus::Unauthenticated {
        return Some(LOGIN_PATH);
    }

    Some(match session.role() {
        Some(Role::Cabinet) => CABINET_DASHBOARD_PATH,
        Some(Role::Doctor) => DOCTOR_DASHBOARD_PATH,
        None => ONBOARDING_PATH,
    })
}

/// Something that can move the user to another path.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// DashboardRedirect
///
/// One-shot redirect dispatcher for a single dashboard visit. Call
/// [`DashboardRedirect::on_change`] whenever the session or its status changes.
/// Sending the user to login ends the instance; later changes are ignored.
#[derive(Debug, Default)]
pub struct DashboardRedirect {
    finished: bool,
}

impl DashboardRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Evaluates the current session and navigates if a destination is known.
    /// Returns the path navigated to.
    pub fn on_change<N: Navigator + ?Sized>(
        &mut self,
        status: SessionStatus,
        session: Option<&UserSession>,
        navigator: &mut N,
    ) -> Option<&'static str> {
        if self.finished {
            return None;
        }

        let destination = resolve_destination(status, session)?;
        if destination == LOGIN_PATH {
            self.finished = true;
        }
        tracing::debug!(destination, "dashboard redirect");
        navigator.navigate(destination);
        Some(destination)
    }
}
