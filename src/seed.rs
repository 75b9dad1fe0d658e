//! Bootstrap data: the medical specialties every other record refers to.

use thiserror::Error;

use crate::{models::Specialty, repository::Repository};

/// (id, name, category)
const SPECIALTIES: &[(&str, &str, &str)] = &[
    ("medecine-generale", "Médecine générale", "Médecine"),
    ("cardiologie", "Cardiologie", "Médecine"),
    ("dermatologie", "Dermatologie", "Médecine"),
    ("endocrinologie", "Endocrinologie", "Médecine"),
    ("gastro-enterologie", "Gastro-entérologie", "Médecine"),
    ("geriatrie", "Gériatrie", "Médecine"),
    ("neurologie", "Neurologie", "Médecine"),
    ("pediatrie", "Pédiatrie", "Médecine"),
    ("pneumologie", "Pneumologie", "Médecine"),
    ("psychiatrie", "Psychiatrie", "Médecine"),
    ("rhumatologie", "Rhumatologie", "Médecine"),
    ("medecine-urgence", "Médecine d'urgence", "Médecine"),
    ("chirurgie-generale", "Chirurgie générale", "Chirurgie"),
    ("chirurgie-orthopedique", "Chirurgie orthopédique", "Chirurgie"),
    ("gynecologie-obstetrique", "Gynécologie-obstétrique", "Chirurgie"),
    ("ophtalmologie", "Ophtalmologie", "Chirurgie"),
    ("orl", "Oto-rhino-laryngologie", "Chirurgie"),
    ("urologie", "Urologie", "Chirurgie"),
    ("anesthesie-reanimation", "Anesthésie-réanimation", "Chirurgie"),
    ("radiologie", "Radiologie", "Imagerie et biologie"),
    ("biologie-medicale", "Biologie médicale", "Imagerie et biologie"),
    ("chirurgie-dentaire", "Chirurgie dentaire", "Dentaire"),
    ("orthodontie", "Orthodontie", "Dentaire"),
    ("kinesitherapie", "Masso-kinésithérapie", "Paramédical"),
    ("soins-infirmiers", "Soins infirmiers", "Paramédical"),
    ("sage-femme", "Maïeutique", "Paramédical"),
    ("orthophonie", "Orthophonie", "Paramédical"),
];

/// The fixed specialty list inserted at bootstrap.
pub fn specialties() -> Vec<Specialty> {
    SPECIALTIES
        .iter()
        .map(|(id, name, category)| Specialty {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    /// Rows that already existed.
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed configuration: {0}")]
    Config(String),
    #[error("failed to insert specialty {id}: {source}")]
    Insert {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),
}

/// Connection string for the seed run. Only `DATABASE_URL` is read; the server's
/// admin secrets play no part in seeding.
pub fn database_url_from_env() -> Result<String, SeedError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        Ok(_) => Err(SeedError::Config("DATABASE_URL is empty".to_string())),
        Err(e) => Err(SeedError::Config(format!("DATABASE_URL: {e}"))),
    }
}

/// seed_specialties
///
/// Inserts each specialty in order, one at a time, skipping ids that already exist.
/// Stops at the first failing insert; rows inserted before it stay in place, which
/// is harmless since re-running skips them.
pub async fn seed_specialties(
    repo: &dyn Repository,
    specialties: &[Specialty],
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    tracing::info!(count = specialties.len(), "seeding specialties");
    for specialty in specialties {
        let inserted =
            repo.insert_specialty(specialty)
                .await
                .map_err(|source| SeedError::Insert {
                    id: specialty.id.clone(),
                    source,
                })?;

        if inserted {
            report.inserted += 1;
            tracing::info!(id = %specialty.id, name = %specialty.name, "specialty inserted");
        } else {
            report.skipped += 1;
            tracing::debug!(id = %specialty.id, "specialty already present");
        }
    }

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "specialty seeding complete"
    );
    Ok(report)
}
