use async_trait::async_trait;
use serde_json::Value;

use crate::{
    api::{FeatureRouter, RequestContext, to_output},
    error::ApiError,
    repository::RepositoryState,
};

/// `analytics.*`: admin dashboard counters.
pub struct AnalyticsRouter {
    repo: RepositoryState,
}

impl AnalyticsRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for AnalyticsRouter {
    fn namespace(&self) -> &'static str {
        "analytics"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["overview"]
    }

    async fn call(
        &self,
        procedure: &str,
        _input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            "overview" => {
                ctx.require_admin()?;
                to_output(self.repo.analytics_overview().await?)
            }
            other => Err(ApiError::NotFound(format!("no procedure `analytics.{other}`"))),
        }
    }
}
