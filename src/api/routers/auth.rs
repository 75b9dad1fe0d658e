use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::{
    api::{FeatureRouter, RequestContext, parse_input, to_output},
    error::ApiError,
    models::AuthStatus,
    repository::RepositoryState,
    session::{SessionStatus, UserSession, resolve_destination},
};

/// Input of `auth.destination`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DestinationInput {
    pub status: SessionStatus,
    #[serde(default)]
    pub session: Option<UserSession>,
}

/// Output of `auth.destination`; `None` while the session is still loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DestinationOutput {
    pub destination: Option<String>,
}

/// `auth.*`: registration reference data and session routing.
pub struct AuthRouter {
    repo: RepositoryState,
}

impl AuthRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for AuthRouter {
    fn namespace(&self) -> &'static str {
        "auth"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["specialties", "adminStatus", "destination"]
    }

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            // Specialties a new account can pick during onboarding.
            "specialties" => to_output(self.repo.list_specialties().await?),
            "adminStatus" => to_output(AuthStatus {
                authenticated: ctx.is_admin(),
            }),
            "destination" => {
                let input: DestinationInput = parse_input(input)?;
                let destination = resolve_destination(input.status, input.session.as_ref());
                to_output(DestinationOutput {
                    destination: destination.map(str::to_string),
                })
            }
            other => Err(ApiError::NotFound(format!("no procedure `auth.{other}`"))),
        }
    }
}
