use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{query, query_as, FromRow};
use std::sync::Arc;
use tracing::error;

#[cfg(feature = "sqlite")]
use sqlx::SqlitePool;

#[cfg(feature = "postgres")]
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::errors::{SiteError, SiteResult};

/// A talent profile shown on the public site.
///
/// Talents are seeded out of band; this surface only lists them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Talent {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A booking request submitted through the public site.
///
/// Append-only: nothing on this surface updates or deletes a booking, and
/// `status` stays at its `"pending"` default (no transition set is defined).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: String,
    pub talent_id: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub meeting_time: Option<NaiveDateTime>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// An inquiry question submitted through the public contact form.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub created_at: NaiveDateTime,
}

/// Default status assigned to every new booking.
pub const BOOKING_STATUS_PENDING: &str = "pending";

/// Validated input for a new booking row. The id, status, and timestamp
/// are server-assigned at insert time.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub talent_id: Option<String>,
    pub client_name: String,
    pub client_email: String,
    pub meeting_time: Option<NaiveDateTime>,
}

/// Validated input for a new question row.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
}

/// Unified database abstraction over SQLite and Postgres.
///
/// Available variants depend on enabled features:
/// - `sqlite` feature enables `Database::SQLite`
/// - `postgres` feature enables `Database::Postgres`
#[derive(Debug, Clone)]
pub enum Database {
    #[cfg(feature = "sqlite")]
    SQLite(SqlitePool),
    #[cfg(feature = "postgres")]
    Postgres(PgPool),
}

impl Database {
    /// Connect to the backend selected by the configured URL scheme.
    ///
    /// The caller decides what an unconfigured URL means; this function
    /// expects one to be present.
    pub async fn connect(config: &DatabaseConfig) -> SiteResult<Arc<Self>> {
        let url = config.url.trim();

        if url.starts_with("sqlite") {
            #[cfg(feature = "sqlite")]
            {
                let pool = SqlitePool::connect(url).await.map_err(|e| {
                    error!("Failed to connect to SQLite: {e}");
                    SiteError::Database(format!("failed to connect to SQLite: {e}"))
                })?;
                return Ok(Arc::new(Database::SQLite(pool)));
            }
            #[cfg(not(feature = "sqlite"))]
            return Err(SiteError::Config(
                "SQLite support not compiled in. Enable the 'sqlite' feature.".to_string(),
            ));
        }

        if url.starts_with("postgres") {
            #[cfg(feature = "postgres")]
            {
                let pool = PgPool::connect(url).await.map_err(|e| {
                    error!("Failed to connect to PostgreSQL: {e}");
                    SiteError::Database(format!("failed to connect to PostgreSQL: {e}"))
                })?;
                return Ok(Arc::new(Database::Postgres(pool)));
            }
            #[cfg(not(feature = "postgres"))]
            return Err(SiteError::Config(
                "PostgreSQL support not compiled in. Enable the 'postgres' feature.".to_string(),
            ));
        }

        Err(SiteError::Config(format!(
            "unsupported database url: {url}"
        )))
    }

    /// Create the three tables if they do not exist yet.
    ///
    /// There is no migration versioning; the schema is small enough that
    /// idempotent creation at startup is the whole story.
    pub async fn migrate(&self) -> SiteResult<()> {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => {
                for stmt in [
                    r#"
                    CREATE TABLE IF NOT EXISTS talents (
                        id            TEXT PRIMARY KEY,
                        name          TEXT NOT NULL,
                        bio           TEXT,
                        portfolio_url TEXT,
                        created_at    TEXT NOT NULL
                    )
                    "#,
                    r#"
                    CREATE TABLE IF NOT EXISTS bookings (
                        id           TEXT PRIMARY KEY,
                        talent_id    TEXT,
                        client_name  TEXT NOT NULL,
                        client_email TEXT NOT NULL,
                        meeting_time TEXT,
                        status       TEXT NOT NULL DEFAULT 'pending',
                        created_at   TEXT NOT NULL
                    )
                    "#,
                    r#"
                    CREATE TABLE IF NOT EXISTS questions (
                        id         TEXT PRIMARY KEY,
                        name       TEXT,
                        email      TEXT,
                        message    TEXT NOT NULL,
                        created_at TEXT NOT NULL
                    )
                    "#,
                ] {
                    query(stmt).execute(pool).await.map_err(|e| {
                        error!("SQLite migrate failed: {e}");
                        SiteError::Database(format!("database error: {e}"))
                    })?;
                }
            }
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => {
                for stmt in [
                    r#"
                    CREATE TABLE IF NOT EXISTS talents (
                        id            TEXT PRIMARY KEY,
                        name          TEXT NOT NULL,
                        bio           TEXT,
                        portfolio_url TEXT,
                        created_at    TIMESTAMP NOT NULL
                    )
                    "#,
                    r#"
                    CREATE TABLE IF NOT EXISTS bookings (
                        id           TEXT PRIMARY KEY,
                        talent_id    TEXT,
                        client_name  TEXT NOT NULL,
                        client_email TEXT NOT NULL,
                        meeting_time TIMESTAMP,
                        status       TEXT NOT NULL DEFAULT 'pending',
                        created_at   TIMESTAMP NOT NULL
                    )
                    "#,
                    r#"
                    CREATE TABLE IF NOT EXISTS questions (
                        id         TEXT PRIMARY KEY,
                        name       TEXT,
                        email      TEXT,
                        message    TEXT NOT NULL,
                        created_at TIMESTAMP NOT NULL
                    )
                    "#,
                ] {
                    query(stmt).execute(pool).await.map_err(|e| {
                        error!("Postgres migrate failed: {e}");
                        SiteError::Database(format!("database error: {e}"))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Fetch all talents, newest first. No pagination, no filtering.
    pub async fn list_talents(&self) -> SiteResult<Vec<Talent>> {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => query_as::<_, Talent>(
                "SELECT id, name, bio, portfolio_url, created_at \
                 FROM talents ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("SQLite list_talents failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => query_as::<_, Talent>(
                "SELECT id, name, bio, portfolio_url, created_at \
                 FROM talents ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Postgres list_talents failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
        }
    }

    /// Insert a talent row.
    ///
    /// No endpoint exposes this; it exists for out-of-band seeding and
    /// tests.
    pub async fn insert_talent(&self, talent: &Talent) -> SiteResult<()> {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => {
                query(
                    "INSERT INTO talents (id, name, bio, portfolio_url, created_at) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&talent.id)
                .bind(&talent.name)
                .bind(&talent.bio)
                .bind(&talent.portfolio_url)
                .bind(talent.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("SQLite insert_talent failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => {
                query(
                    "INSERT INTO talents (id, name, bio, portfolio_url, created_at) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(&talent.id)
                .bind(&talent.name)
                .bind(&talent.bio)
                .bind(&talent.portfolio_url)
                .bind(talent.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("Postgres insert_talent failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
        }

        Ok(())
    }

    /// Persist a booking request and return the created record with its
    /// server-assigned id, status, and timestamp.
    pub async fn insert_booking(&self, new: NewBooking) -> SiteResult<Booking> {
        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            talent_id: new.talent_id,
            client_name: new.client_name,
            client_email: new.client_email,
            meeting_time: new.meeting_time,
            status: BOOKING_STATUS_PENDING.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => {
                query(
                    "INSERT INTO bookings \
                     (id, talent_id, client_name, client_email, meeting_time, status, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&booking.id)
                .bind(&booking.talent_id)
                .bind(&booking.client_name)
                .bind(&booking.client_email)
                .bind(booking.meeting_time)
                .bind(&booking.status)
                .bind(booking.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("SQLite insert_booking failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => {
                query(
                    "INSERT INTO bookings \
                     (id, talent_id, client_name, client_email, meeting_time, status, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(&booking.id)
                .bind(&booking.talent_id)
                .bind(&booking.client_name)
                .bind(&booking.client_email)
                .bind(booking.meeting_time)
                .bind(&booking.status)
                .bind(booking.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("Postgres insert_booking failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
        }

        Ok(booking)
    }

    /// Persist a question and return the created record.
    pub async fn insert_question(&self, new: NewQuestion) -> SiteResult<Question> {
        let question = Question {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            message: new.message,
            created_at: chrono::Utc::now().naive_utc(),
        };

        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => {
                query(
                    "INSERT INTO questions (id, name, email, message, created_at) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&question.id)
                .bind(&question.name)
                .bind(&question.email)
                .bind(&question.message)
                .bind(question.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("SQLite insert_question failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => {
                query(
                    "INSERT INTO questions (id, name, email, message, created_at) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(&question.id)
                .bind(&question.name)
                .bind(&question.email)
                .bind(&question.message)
                .bind(question.created_at)
                .execute(pool)
                .await
                .map_err(|e| {
                    error!("Postgres insert_question failed: {e}");
                    SiteError::Database(format!("database error: {e}"))
                })?;
            }
        }

        Ok(question)
    }

    /// Fetch all bookings, newest first. Admin panel only.
    pub async fn list_bookings(&self) -> SiteResult<Vec<Booking>> {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => query_as::<_, Booking>(
                "SELECT id, talent_id, client_name, client_email, meeting_time, status, created_at \
                 FROM bookings ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("SQLite list_bookings failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => query_as::<_, Booking>(
                "SELECT id, talent_id, client_name, client_email, meeting_time, status, created_at \
                 FROM bookings ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Postgres list_bookings failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
        }
    }

    /// Fetch all questions, newest first. Admin panel only.
    pub async fn list_questions(&self) -> SiteResult<Vec<Question>> {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => query_as::<_, Question>(
                "SELECT id, name, email, message, created_at \
                 FROM questions ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("SQLite list_questions failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => query_as::<_, Question>(
                "SELECT id, name, email, message, created_at \
                 FROM questions ORDER BY created_at DESC",
            )
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Postgres list_questions failed: {e}");
                SiteError::Database(format!("database error: {e}"))
            }),
        }
    }

    /// Whether a round trip to the backend currently succeeds.
    pub async fn is_reachable(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(pool) => query("SELECT 1").execute(pool).await.is_ok(),
            #[cfg(feature = "postgres")]
            Database::Postgres(pool) => query("SELECT 1").execute(pool).await.is_ok(),
        }
    }

    /// Name of the active backend, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Database::SQLite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Database::Postgres(_) => "postgres",
        }
    }
}
