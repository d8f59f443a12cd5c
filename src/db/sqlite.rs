use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::{NewUser, UserRecord};
use crate::db::schema::SQLITE_INIT;
use crate::error::StoreError;

pub type SqlitePool = Pool<Sqlite>;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pooled user storage. Every operation borrows a connection from the
/// pool and returns it on every exit path, success or error.
#[derive(Clone, Debug)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`, creating the file if missing.
    /// Failures here are connectivity errors by definition.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        Self::connect_with_limit(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Same as [`connect`](Self::connect) with an explicit cap on pool
    /// size; the cap bounds the process's connection count regardless of
    /// call volume.
    pub async fn connect_with_limit(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Connectivity {
                context: "connection string did not parse".to_string(),
                source: e,
            })?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(connect_opts)
            .await
            .map_err(|e| StoreError::Connectivity {
                context: "pool could not be opened".to_string(),
                source: e,
            })?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Upsert by unique name. Returns the row id.
    /// Uses SQLite `INSERT ... ON CONFLICT(name) DO UPDATE`.
    pub async fn insert(&self, user: NewUser) -> Result<i64, StoreError> {
        let created_at = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO users (name, email, created_at, active)
            VALUES (?, ?, ?, 1)
            ON CONFLICT(name) DO UPDATE SET
                email=excluded.email
            "#,
        )
        .bind(user.name.clone())
        .bind(user.email)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        // Fetch id after upsert
        let rec: (i64,) = sqlx::query_as("SELECT id FROM users WHERE name = ?")
            .bind(user.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, created_at, active
               FROM users ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            r#"SELECT id, name, email, created_at, active
               FROM users WHERE name = ?"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn set_active(&self, id: i64, active: bool) -> Result<(), StoreError> {
        let active_i = if active { 1 } else { 0 };
        sqlx::query("UPDATE users SET active = ? WHERE id = ?")
            .bind(active_i)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_model(row: SqliteRow) -> Result<UserRecord, StoreError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: Option<String> = row.try_get("email")?;
        let created_at_str: String = row.try_get("created_at")?;
        let active_i: i64 = row.try_get("active")?;

        let created_at: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);
        let active = active_i != 0;

        Ok(UserRecord {
            id,
            name,
            email,
            created_at,
            active,
        })
    }
}
