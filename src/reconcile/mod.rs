//! Occupancy reconciliation: derive true per-night occupancy from active
//! bookings and sync it into rate `sold` counters.
//!
//! The `sold` counter on a rate row is an eventually-consistent mirror of
//! the active bookings covering that night. The reconciler recomputes the
//! truth from bookings and writes back only the rows that drifted, so it is
//! idempotent and safe to run at any cadence; it is also the sole writer of
//! `sold`. Concurrent overlapping runs converge on the same recomputed
//! state.

mod store;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub use store::{InventoryStore, MemoryStore, SoldUpdate};

/// Key identifying one (night, room type) occupancy bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyKey {
    /// The occupied night.
    pub date: NaiveDate,
    /// The room type occupied.
    pub room_type_id: String,
}

impl std::fmt::Display for OccupancyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.date, self.room_type_id)
    }
}

/// Per-night, per-room-type occupancy counts.
pub type OccupancyMap = HashMap<OccupancyKey, u32>;

/// The outcome of a sold-counter sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Number of rate rows whose `sold` actually changed and was written.
    pub synced: usize,
}

/// Derives true occupancy from active bookings over `[start, end)`.
///
/// Every room line of every active booking contributes its quantity to each
/// occupied night, clamped to the requested range. Check-in is inclusive,
/// check-out exclusive: the checkout night is never counted.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when `start >= end`, or a
/// store error from the booking query.
pub fn calculate_occupancy_from_bookings<S: InventoryStore>(
    store: &S,
    hotel_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<OccupancyMap> {
    if start >= end {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let bookings = store.active_bookings(hotel_id, start, end)?;
    let mut occupancy = OccupancyMap::new();

    for booking in &bookings {
        let first_night = booking.check_in.max(start);
        let last_exclusive = booking.check_out.min(end);

        for room in &booking.rooms {
            let mut night = first_night;
            while night < last_exclusive {
                let key = OccupancyKey {
                    date: night,
                    room_type_id: room.room_type_id.clone(),
                };
                *occupancy.entry(key).or_insert(0) += room.quantity;
                night = night.succ_opt().ok_or(EngineError::InvalidDateRange {
                    start: night,
                    end,
                })?;
            }
        }
    }

    tracing::debug!(
        hotel_id,
        %start,
        %end,
        bookings = bookings.len(),
        buckets = occupancy.len(),
        "derived occupancy from bookings"
    );
    Ok(occupancy)
}

/// Syncs rate `sold` counters to a derived occupancy map.
///
/// Loads the rate rows in `[start, end)`, compares each row's `sold` to the
/// derived count for its (date, room type) bucket, and batches a single
/// write of only the rows that actually changed. A second run with an
/// unchanged booking set performs zero writes.
pub fn sync_rate_sold_fields<S: InventoryStore>(
    store: &mut S,
    hotel_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    occupancy: &OccupancyMap,
) -> EngineResult<SyncOutcome> {
    if start >= end {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let rates = store.rates_in_range(hotel_id, start, end)?;
    let updates: Vec<SoldUpdate> = rates
        .iter()
        .filter_map(|rate| {
            let key = OccupancyKey {
                date: rate.date,
                room_type_id: rate.room_type_id.clone(),
            };
            let expected = occupancy.get(&key).copied().unwrap_or(0);
            (rate.sold != expected).then(|| SoldUpdate {
                rate_id: rate.id.clone(),
                sold: expected,
            })
        })
        .collect();

    if updates.is_empty() {
        tracing::debug!(hotel_id, "sold counters already consistent");
        return Ok(SyncOutcome { synced: 0 });
    }

    tracing::debug!(hotel_id, updates = updates.len(), "writing sold counters");
    let synced = store.apply_sold_updates(&updates)?;
    Ok(SyncOutcome { synced })
}

/// Recomputes occupancy and syncs sold counters in one pass.
pub fn reconcile<S: InventoryStore>(
    store: &mut S,
    hotel_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<SyncOutcome> {
    let occupancy = calculate_occupancy_from_bookings(store, hotel_id, start, end)?;
    sync_rate_sold_fields(store, hotel_id, start, end, &occupancy)
}
