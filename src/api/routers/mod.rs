//! Feature routers registered in the API surface, one namespace each.

mod analytics;
mod applications;
mod auth;
mod job_offers;
mod messages;
mod notifications;

pub use analytics::AnalyticsRouter;
pub use applications::ApplicationsRouter;
pub use auth::{AuthRouter, DestinationInput, DestinationOutput};
pub use job_offers::JobOffersRouter;
pub use messages::MessagesRouter;
pub use notifications::NotificationsRouter;
