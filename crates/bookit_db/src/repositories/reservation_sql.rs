//! SQL implementation of the reservation repository
//!
//! Instants are stored as Unix seconds in `BIGINT` columns; the `Any` driver
//! has no portable timestamp type.

use crate::client::DbBackend;
use crate::error::DbError;
use crate::repositories::reservation::ReservationRepository;
use crate::DbClient;
use bookit_common::models::{Interval, NewReservation, Reservation, ReservationId};
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const COLUMNS: &str = "id, name, phone, start_at, end_at, created_at";

/// SQL implementation of the reservation repository
#[derive(Debug, Clone)]
pub struct SqlReservationRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlReservationRepository {
    /// Create a new SQL reservation repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }

    fn create_table_sql(&self) -> &'static str {
        match self.db_client.backend() {
            DbBackend::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS reservations (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    start_at BIGINT NOT NULL,
                    end_at BIGINT NOT NULL,
                    created_at BIGINT NOT NULL,
                    CHECK (end_at > start_at)
                )
            "#
            }
            _ => {
                r#"
                CREATE TABLE IF NOT EXISTS reservations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    start_at BIGINT NOT NULL,
                    end_at BIGINT NOT NULL,
                    created_at BIGINT NOT NULL,
                    CHECK (end_at > start_at)
                )
            "#
            }
        }
    }
}

fn to_instant(secs: i64, column: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::DecodeError(format!("{} out of range: {}", column, secs)))
}

fn row_to_reservation(row: &AnyRow) -> Result<Reservation, DbError> {
    Ok(Reservation {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        start_time: to_instant(row.try_get("start_at")?, "start_at")?,
        end_time: to_instant(row.try_get("end_at")?, "end_at")?,
        created_at: to_instant(row.try_get("created_at")?, "created_at")?,
    })
}

impl ReservationRepository for SqlReservationRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing reservation schema");

        self.db_client.execute(self.create_table_sql()).await?;
        self.db_client
            .execute("CREATE INDEX IF NOT EXISTS idx_reservations_start_at ON reservations (start_at)")
            .await?;

        info!("Reservation schema initialized successfully");
        Ok(())
    }

    async fn insert_if_free(
        &self,
        reservation: NewReservation,
    ) -> Result<Option<Reservation>, DbError> {
        debug!(
            "Inserting reservation {} - {}",
            reservation.interval.start, reservation.interval.end
        );

        // The overlap test and the insert are one statement, so no other
        // writer can slip a booking in between them.
        let query = format!(
            r#"
            INSERT INTO reservations (name, phone, start_at, end_at, created_at)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (
                SELECT 1 FROM reservations WHERE start_at < $6 AND end_at > $7
            )
            RETURNING {COLUMNS}
        "#
        );

        let start = reservation.interval.start.timestamp();
        let end = reservation.interval.end.timestamp();

        let mut tx = self.db_client.begin_serializable().await?;
        let row = sqlx::query(&query)
            .bind(&reservation.name)
            .bind(&reservation.phone)
            .bind(start)
            .bind(end)
            .bind(reservation.created_at.timestamp())
            .bind(end)
            .bind(start)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert reservation: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        match row {
            Some(row) => {
                let stored = row_to_reservation(&row)?;
                info!("Stored reservation {}", stored.id);
                Ok(Some(stored))
            }
            None => {
                debug!("Slot already taken, nothing inserted");
                Ok(None)
            }
        }
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_reservation).transpose()
    }

    async fn find_in_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reservation>, DbError> {
        let rows = match (from, to) {
            (Some(from), Some(to)) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reservations \
                     WHERE start_at >= $1 AND start_at < $2 ORDER BY start_at ASC, id ASC"
                );
                sqlx::query(&query)
                    .bind(from.timestamp())
                    .bind(to.timestamp())
                    .fetch_all(self.db_client.pool())
                    .await
            }
            (Some(from), None) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reservations \
                     WHERE start_at >= $1 ORDER BY start_at ASC, id ASC"
                );
                sqlx::query(&query)
                    .bind(from.timestamp())
                    .fetch_all(self.db_client.pool())
                    .await
            }
            (None, Some(to)) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM reservations \
                     WHERE start_at < $1 ORDER BY start_at ASC, id ASC"
                );
                sqlx::query(&query)
                    .bind(to.timestamp())
                    .fetch_all(self.db_client.pool())
                    .await
            }
            (None, None) => {
                let query =
                    format!("SELECT {COLUMNS} FROM reservations ORDER BY start_at ASC, id ASC");
                sqlx::query(&query).fetch_all(self.db_client.pool()).await
            }
        }
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_reservation).collect()
    }

    async fn has_conflict(
        &self,
        candidate: Interval,
        exclude: Option<ReservationId>,
    ) -> Result<bool, DbError> {
        let row = match exclude {
            Some(id) => {
                sqlx::query(
                    "SELECT 1 AS hit FROM reservations \
                     WHERE start_at < $1 AND end_at > $2 AND id <> $3 LIMIT 1",
                )
                .bind(candidate.end.timestamp())
                .bind(candidate.start.timestamp())
                .bind(id)
                .fetch_optional(self.db_client.pool())
                .await
            }
            None => {
                sqlx::query(
                    "SELECT 1 AS hit FROM reservations \
                     WHERE start_at < $1 AND end_at > $2 LIMIT 1",
                )
                .bind(candidate.end.timestamp())
                .bind(candidate.start.timestamp())
                .fetch_optional(self.db_client.pool())
                .await
            }
        }
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn update_if_free(&self, reservation: Reservation) -> Result<bool, DbError> {
        debug!("Rescheduling reservation {}", reservation.id);

        let query = r#"
            UPDATE reservations
            SET name = $1, phone = $2, start_at = $3, end_at = $4
            WHERE id = $5 AND NOT EXISTS (
                SELECT 1 FROM reservations
                WHERE id <> $6 AND start_at < $7 AND end_at > $8
            )
        "#;

        let start = reservation.start_time.timestamp();
        let end = reservation.end_time.timestamp();

        let mut tx = self.db_client.begin_serializable().await?;
        let result = sqlx::query(query)
            .bind(&reservation.name)
            .bind(&reservation.phone)
            .bind(start)
            .bind(end)
            .bind(reservation.id)
            .bind(reservation.id)
            .bind(end)
            .bind(start)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to update reservation {}: {}", reservation.id, e);
                DbError::QueryError(e.to_string())
            })?;
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_details(
        &self,
        id: ReservationId,
        name: String,
        phone: String,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE reservations SET name = $1, phone = $2 WHERE id = $3")
            .bind(name)
            .bind(phone)
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ReservationId) -> Result<bool, DbError> {
        debug!("Deleting reservation {}", id);

        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
