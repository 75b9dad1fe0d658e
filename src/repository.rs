use crate::models::{AnalyticsOverview, Application, JobOffer, Message, Specialty};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Repository Trait
///
/// Persistence contract shared by the seed loader and the feature routers. Errors are
/// returned rather than swallowed: the seed loader must abort on the first failure and
/// the API layer maps them to a generic 500.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Reference Data ---
    /// Inserts a specialty unless one with the same id exists.
    /// Returns `true` if a row was inserted, `false` on conflict.
    async fn insert_specialty(&self, specialty: &Specialty) -> Result<bool, sqlx::Error>;
    async fn list_specialties(&self) -> Result<Vec<Specialty>, sqlx::Error>;

    // --- Job Offers ---
    async fn list_job_offers(
        &self,
        specialty_id: Option<String>,
    ) -> Result<Vec<JobOffer>, sqlx::Error>;
    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>, sqlx::Error>;

    // --- Applications & Messages ---
    async fn applications_for_offer(&self, offer_id: Uuid)
    -> Result<Vec<Application>, sqlx::Error>;
    async fn messages_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error>;

    // --- Notifications & Analytics ---
    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;
    async fn analytics_overview(&self) -> Result<AnalyticsOverview, sqlx::Error>;
}

pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Queries are built at runtime so the crate builds
/// without a live database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// insert_specialty
    ///
    /// `ON CONFLICT (id) DO NOTHING` keeps seeding idempotent; `rows_affected` tells
    /// an insert from a skipped duplicate.
    async fn insert_specialty(&self, specialty: &Specialty) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO specialties (id, name, category) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&specialty.id)
        .bind(&specialty.name)
        .bind(&specialty.category)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, sqlx::Error> {
        sqlx::query_as::<_, Specialty>(
            "SELECT id, name, category FROM specialties ORDER BY category, name",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn list_job_offers(
        &self,
        specialty_id: Option<String>,
    ) -> Result<Vec<JobOffer>, sqlx::Error> {
        sqlx::query_as::<_, JobOffer>(
            r#"
            SELECT id, cabinet_id, specialty_id, title, description, city, created_at
            FROM job_offers
            WHERE ($1::text IS NULL OR specialty_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(specialty_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>, sqlx::Error> {
        sqlx::query_as::<_, JobOffer>(
            "SELECT id, cabinet_id, specialty_id, title, description, city, created_at FROM job_offers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn applications_for_offer(
        &self,
        offer_id: Uuid,
    ) -> Result<Vec<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            "SELECT id, job_offer_id, doctor_id, status, created_at FROM applications WHERE job_offer_id = $1 ORDER BY created_at ASC",
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn messages_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT id, application_id, sender_id, body, created_at FROM messages WHERE application_id = $1 ORDER BY created_at ASC",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// analytics_overview
    ///
    /// All dashboard counters in a single round trip.
    async fn analytics_overview(&self) -> Result<AnalyticsOverview, sqlx::Error> {
        let row: (i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM specialties),
                (SELECT COUNT(*) FROM job_offers),
                (SELECT COUNT(*) FROM applications),
                (SELECT COUNT(*) FROM messages),
                (SELECT COUNT(*) FROM notifications WHERE is_read = false)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AnalyticsOverview {
            total_specialties: row.0,
            total_job_offers: row.1,
            total_applications: row.2,
            total_messages: row.3,
            unread_notifications: row.4,
        })
    }
}

// --- In-Memory Implementation (For Tests) ---

#[derive(Default)]
struct MemoryTables {
    specialties: Vec<Specialty>,
    job_offers: Vec<JobOffer>,
    applications: Vec<Application>,
    messages: Vec<Message>,
    // (recipient, is_read)
    notifications: Vec<(Uuid, bool)>,
    failing_insert: Option<String>,
}

/// InMemoryRepository
///
/// `Repository` kept in process memory, used by tests to exercise handlers, the
/// registry and the seed loader without PostgreSQL. `failing_on` makes inserts of
/// one specialty id fail, to simulate a database error mid-seed, until
/// `clear_failure` is called.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<MemoryTables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(specialty_id: &str) -> Self {
        let repo = Self::default();
        repo.lock().failing_insert = Some(specialty_id.to_string());
        repo
    }

    /// Lets the previously failing specialty id insert normally again.
    pub fn clear_failure(&self) {
        self.lock().failing_insert = None;
    }

    pub fn with_job_offer(self, offer: JobOffer) -> Self {
        self.lock().job_offers.push(offer);
        self
    }

    pub fn with_application(self, application: Application) -> Self {
        self.lock().applications.push(application);
        self
    }

    pub fn with_message(self, message: Message) -> Self {
        self.lock().messages.push(message);
        self
    }

    pub fn with_notification(self, user_id: Uuid, is_read: bool) -> Self {
        self.lock().notifications.push((user_id, is_read));
        self
    }

    /// Snapshot of stored specialties in insertion order.
    pub fn specialties(&self) -> Vec<Specialty> {
        self.lock().specialties.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryTables> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_specialty(&self, specialty: &Specialty) -> Result<bool, sqlx::Error> {
        let mut tables = self.lock();
        if tables.failing_insert.as_deref() == Some(specialty.id.as_str()) {
            return Err(sqlx::Error::Protocol(format!(
                "simulated failure inserting specialty {}",
                specialty.id
            )));
        }

        if tables.specialties.iter().any(|s| s.id == specialty.id) {
            return Ok(false);
        }
        tables.specialties.push(specialty.clone());
        Ok(true)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, sqlx::Error> {
        let mut specialties = self.lock().specialties.clone();
        specialties.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        Ok(specialties)
    }

    async fn list_job_offers(
        &self,
        specialty_id: Option<String>,
    ) -> Result<Vec<JobOffer>, sqlx::Error> {
        let mut offers: Vec<JobOffer> = self
            .lock()
            .job_offers
            .iter()
            .filter(|o| specialty_id.as_ref().is_none_or(|s| &o.specialty_id == s))
            .cloned()
            .collect();
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>, sqlx::Error> {
        Ok(self.lock().job_offers.iter().find(|o| o.id == id).cloned())
    }

    async fn applications_for_offer(
        &self,
        offer_id: Uuid,
    ) -> Result<Vec<Application>, sqlx::Error> {
        Ok(self
            .lock()
            .applications
            .iter()
            .filter(|a| a.job_offer_id == offer_id)
            .cloned()
            .collect())
    }

    async fn messages_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<Message>, sqlx::Error> {
        Ok(self
            .lock()
            .messages
            .iter()
            .filter(|m| m.application_id == application_id)
            .cloned()
            .collect())
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .filter(|(recipient, is_read)| *recipient == user_id && !is_read)
            .count() as i64)
    }

    async fn analytics_overview(&self) -> Result<AnalyticsOverview, sqlx::Error> {
        let tables = self.lock();
        Ok(AnalyticsOverview {
            total_specialties: tables.specialties.len() as i64,
            total_job_offers: tables.job_offers.len() as i64,
            total_applications: tables.applications.len() as i64,
            total_messages: tables.messages.len() as i64,
            unread_notifications: tables.notifications.iter().filter(|(_, r)| !r).count() as i64,
        })
    }
}
