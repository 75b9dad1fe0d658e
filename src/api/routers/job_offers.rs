use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    api::{FeatureRouter, RequestContext, parse_input, to_output},
    error::ApiError,
    repository::RepositoryState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListInput {
    #[serde(default)]
    specialty_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ByIdInput {
    id: Uuid,
}

/// `jobOffers.*`: public browsing of posted offers.
pub struct JobOffersRouter {
    repo: RepositoryState,
}

impl JobOffersRouter {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeatureRouter for JobOffersRouter {
    fn namespace(&self) -> &'static str {
        "jobOffers"
    }

    fn procedures(&self) -> &'static [&'static str] {
        &["list", "byId"]
    }

    async fn call(
        &self,
        procedure: &str,
        input: Value,
        _ctx: &RequestContext,
    ) -> Result<Value, ApiError> {
        match procedure {
            "list" => {
                let input: ListInput = parse_input(input)?;
                to_output(self.repo.list_job_offers(input.specialty_id).await?)
            }
            "byId" => {
                let input: ByIdInput = parse_input(input)?;
                match self.repo.get_job_offer(input.id).await? {
                    Some(offer) => to_output(offer),
                    None => Err(ApiError::NotFound(format!("job offer {} not found", input.id))),
                }
            }
            other => Err(ApiError::NotFound(format!("no procedure `jobOffers.{other}`"))),
        }
    }
}
