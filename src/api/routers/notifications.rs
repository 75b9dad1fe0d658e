use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    api::{FeatureRouter, RequestContext, parse_input, to_output},
    error::ApiError,
    repository::RepositoryState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCountInput {
    user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct UnreadCount {
    count: i64,
}

/// `notifications.*`
pub struct NotificationsRouter {
    repo: RepositoryState,
}

impl NotificationsRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for NotificationsRouter {
    fn namespace(&self) -> &'static str {
        "notifications"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["unreadCount"]
    }

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            "unreadCount" => {
                ctx.require_admin()?;
                let input: UnreadCountInput = parse_input(input)?;
                let count = self.repo.unread_notification_count(input.user_id).await?;
                to_output(UnreadCount { count })
            }
            other => Err(ApiError::NotFound(format!("no procedure `notifications.{other}`"))),
        }
    }
}
