//! Pricing and availability engine for a multi-tenant hotel booking platform.
//!
//! This crate turns layered, overridable commercial configuration
//! (RoomType, Market, Season, Rate) into guest-facing channel prices,
//! decides whether a candidate stay is sellable, and keeps sold-room
//! counters consistent with real bookings.

#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod pricing;
pub mod reconcile;
pub mod resolver;
pub mod restrictions;
