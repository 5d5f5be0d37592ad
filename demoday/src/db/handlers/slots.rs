//! Database repository for demo slots.

use crate::db::{errors::Result, models::slots::SlotOccupancyDBResponse};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Slots<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Slots<'c> {
    /// Create a new Slots repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get a slot's capacity while taking a row lock on it. Must run inside a
    /// transaction; the lock is held until that transaction ends, serializing
    /// concurrent registrations targeting the same slot.
    #[instrument(skip(self), err)]
    pub async fn lock_capacity(&mut self, id: i32) -> Result<Option<i32>> {
        let capacity = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT capacity
            FROM demo_slots
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(capacity)
    }

    /// Count registrations currently referencing a slot
    #[instrument(skip(self), err)]
    pub async fn occupancy(&mut self, id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM students
            WHERE demo_slot_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }

    /// List all slots with their derived occupancy, ordered by start time
    #[instrument(skip(self), err)]
    pub async fn list_with_occupancy(&mut self) -> Result<Vec<SlotOccupancyDBResponse>> {
        let slots = sqlx::query_as::<_, SlotOccupancyDBResponse>(
            r#"
            SELECT ds.id, ds.time, ds.capacity, COUNT(s.student_id) AS current_count
            FROM demo_slots ds
            LEFT JOIN students s ON ds.id = s.demo_slot_id
            GROUP BY ds.id, ds.time, ds.capacity
            ORDER BY ds.time ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(slots)
    }
}
