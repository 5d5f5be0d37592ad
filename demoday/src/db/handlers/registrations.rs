//! The capacity-enforcing registration transaction.
//!
//! Registration is a check-then-act over a derived aggregate (slot occupancy),
//! so the whole decision runs inside one transaction that takes a row lock on
//! the target slot. Two concurrent registrations for the same slot serialize
//! on that lock; the second one re-reads occupancy after the first commits and
//! cannot push the slot past capacity.
//!
//! The decision itself is a pure function ([`decide`]) so the accept/update/
//! reject truth table is testable without a database.

use crate::config::RegistrationConfig;
use crate::db::{
    errors::Result,
    handlers::{Slots, Students},
    models::students::StudentWriteDBRequest,
};
use sqlx::{Connection, PgConnection};
use tracing::{instrument, warn};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new registration row was inserted
    Created,
    /// The student's existing row was updated in place
    Updated,
    /// Rejected: the target slot is at capacity and the student is a new entrant
    SlotFull,
}

/// What the transaction decided to do, before any write happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Insert,
    Update,
    Reject,
}

/// The registration decision. Capacity gates new entrants only: an existing
/// registrant re-submitting (including moving between slots) is not blocked
/// unless `block_moves_to_full_slot` is set, and even then a re-submission
/// keeping the student's current slot always goes through, since the student
/// already occupies a seat there.
///
/// `existing_slot` is `None` when the student has no registration yet, and
/// `Some(previous)` (itself optional, a row may be unassigned) when they do.
fn decide(
    existing_slot: Option<Option<i32>>,
    target_slot: i32,
    slot_full: bool,
    block_moves_to_full_slot: bool,
) -> Decision {
    match existing_slot {
        None if slot_full => Decision::Reject,
        None => Decision::Insert,
        Some(previous) => {
            let is_move = previous != Some(target_slot);
            if block_moves_to_full_slot && slot_full && is_move {
                Decision::Reject
            } else {
                Decision::Update
            }
        }
    }
}

pub struct Registrations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Registrations<'c> {
    /// Create a new Registrations repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Execute the registration transaction for one submission.
    ///
    /// Inside a single transaction: lock the target slot row and read its
    /// capacity (falling back to the configured default when the row is
    /// missing), look up the student's existing registration, count current
    /// occupants, then insert, update, or reject. Nothing is written on
    /// rejection.
    #[instrument(skip(self, request, config), fields(student_id = %request.student_id, demo_slot_id = request.demo_slot_id), err)]
    pub async fn register(
        &mut self,
        request: &StudentWriteDBRequest,
        config: &RegistrationConfig,
    ) -> Result<RegistrationOutcome> {
        let mut tx = self.db.begin().await?;

        let limit = match Slots::new(&mut tx).lock_capacity(request.demo_slot_id).await? {
            Some(capacity) => capacity,
            None => {
                // Masking behavior kept for contract compatibility: a slot id
                // with no demo_slots row still accepts registrations, capped
                // at the configured default.
                warn!(
                    demo_slot_id = request.demo_slot_id,
                    fallback = config.default_slot_capacity,
                    "registration targets a slot with no demo_slots row, using fallback capacity"
                );
                config.default_slot_capacity
            }
        };

        let existing = Students::new(&mut tx).get_by_student_id(&request.student_id).await?;
        let current = Slots::new(&mut tx).occupancy(request.demo_slot_id).await?;
        let slot_full = current >= i64::from(limit);

        let decision = decide(
            existing.map(|s| s.demo_slot_id),
            request.demo_slot_id,
            slot_full,
            config.block_moves_to_full_slot,
        );

        let outcome = match decision {
            Decision::Reject => {
                // Dropping the transaction rolls back; the row lock releases
                // without any write.
                return Ok(RegistrationOutcome::SlotFull);
            }
            Decision::Update => {
                Students::new(&mut tx).update(request).await?;
                RegistrationOutcome::Updated
            }
            Decision::Insert => {
                Students::new(&mut tx).insert(request).await?;
                RegistrationOutcome::Created
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }
}
