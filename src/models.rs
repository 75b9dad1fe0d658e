use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Reference Data ---

/// Specialty
///
/// Medical specialty reference record from the `specialties` table. Inserted once by
/// the seed loader and never updated; `id` is a stable slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Specialty {
    pub id: String,
    pub name: String,
    pub category: String,
}

// --- Platform Records ---

/// JobOffer
///
/// An offer posted by a cabinet (employer).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct JobOffer {
    pub id: Uuid,
    // FK to the posting cabinet's user id.
    pub cabinet_id: Uuid,
    pub specialty_id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Application
///
/// A doctor's application to a job offer.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Application {
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub doctor_id: Uuid,
    // 'PENDING' | 'ACCEPTED' | 'REJECTED'
    pub status: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Message {
    pub id: Uuid,
    pub application_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Admin Endpoint Payloads ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Response of `GET /api/admin/check-auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AuthStatus {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// AnalyticsOverview
///
/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AnalyticsOverview {
    pub total_specialties: i64,
    pub total_job_offers: i64,
    pub total_applications: i64,
    pub total_messages: i64,
    pub unread_notifications: i64,
}
