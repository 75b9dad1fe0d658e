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
struct ForOfferInput {
    offer_id: Uuid,
}

/// `applications.*`: admin review of applications per offer.
pub struct ApplicationsRouter {
    repo: RepositoryState,
}

impl ApplicationsRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for ApplicationsRouter {
    fn namespace(&self) -> &'static str {
        "applications"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["forOffer"]
    }

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            "forOffer" => {
                ctx.require_admin()?;
                let input: ForOfferInput = parse_input(input)?;
                to_output(self.repo.applications_for_offer(input.offer_id).await?)
            }
            other => Err(ApiError::NotFound(format!("no procedure `applications.{other}`"))),
        }
    }
}
