use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    api::{FeatureRouter, RequestContext, parse_input, to_output},
    error::ApiError,
    repository::RepositoryState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForApplicationInput {
    application_id: Uuid,
}

/// `messages.*`: conversation threads attached to an application.
pub struct MessagesRouter {
    repo: RepositoryState,
}

impl MessagesRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for MessagesRouter {
    fn namespace(&self) -> &'static str {
        "messages"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["forApplication"]
    }

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            // Moderation view; participants read threads through their own session.
            "forApplication" => {
                ctx.require_admin()?;
                let input: ForApplicationInput = parse_input(input)?;
                to_output(
                    self.repo
                        .messages_for_application(input.application_id)
                        .await?,
                )
            }
            other => Err(ApiError::NotFound(format!("no procedure `messages.{other}`"))),
        }
    }
}
