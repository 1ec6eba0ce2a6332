//! Inventory store abstraction for the occupancy reconciler.
//!
//! The reconciler is the only part of the engine that reads and writes
//! persisted state, so its data access goes through one narrow trait.
//! Persistence adapters implement it outside this crate; [`MemoryStore`]
//! is the in-memory implementation backing tests and benchmarks.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Booking, Rate};

/// One pending write to a rate row's `sold` counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoldUpdate {
    /// The rate row to update.
    pub rate_id: String,
    /// The recomputed sold count.
    pub sold: u32,
}

/// Data access required by the occupancy reconciler.
///
/// Implementations must scope queries to one hotel and a half-open date
/// range `[start, end)`, and apply sold updates as a single batch.
pub trait InventoryStore {
    /// Loads active bookings overlapping `[start, end)` for a hotel.
    ///
    /// Only bookings whose status counts toward occupancy (pending,
    /// confirmed, checked-in) are returned.
    fn active_bookings(
        &self,
        hotel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Booking>>;

    /// Loads rate rows dated within `[start, end)` for a hotel.
    fn rates_in_range(
        &self,
        hotel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Rate>>;

    /// Applies a batch of sold-counter updates, returning how many rows
    /// were written.
    fn apply_sold_updates(&mut self, updates: &[SoldUpdate]) -> EngineResult<usize>;
}

/// In-memory [`InventoryStore`] for tests, benchmarks, and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bookings: Vec<Booking>,
    rates: Vec<Rate>,
}

impl MemoryStore {
    /// Creates a store seeded with bookings and rates.
    pub fn new(bookings: Vec<Booking>, rates: Vec<Rate>) -> Self {
        MemoryStore { bookings, rates }
    }

    /// Adds a booking.
    pub fn push_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Looks up a rate row by id.
    pub fn rate(&self, rate_id: &str) -> Option<&Rate> {
        self.rates.iter().find(|r| r.id == rate_id)
    }
}

impl InventoryStore for MemoryStore {
    fn active_bookings(
        &self,
        hotel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.hotel_id == hotel_id && b.is_active() && b.overlaps(start, end))
            .cloned()
            .collect())
    }

    fn rates_in_range(
        &self,
        hotel_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Rate>> {
        Ok(self
            .rates
            .iter()
            .filter(|r| r.hotel_id == hotel_id && r.date >= start && r.date < end)
            .cloned()
            .collect())
    }

    fn apply_sold_updates(&mut self, updates: &[SoldUpdate]) -> EngineResult<usize> {
        let mut written = 0;
        for update in updates {
            if let Some(rate) = self.rates.iter_mut().find(|r| r.id == update.rate_id) {
                rate.sold = update.sold;
                written += 1;
            }
        }
        Ok(written)
    }
}
