//! Core data models for the pricing engine.
//!
//! This module contains the configuration and inventory records the engine
//! operates on: the four override layers (RoomType, Market, Season, Rate)
//! and the bookings occupancy is derived from.

mod booking;
mod market;
mod rate;
mod room_type;
mod season;

pub use booking::{Booking, BookingRoom, BookingStatus};
pub use market::{
    ChildAgeGroup, ChildAgeSettings, Market, Markup, PricingOverride, RoomTypeRef, SalesSettings,
    WorkingMode,
};
pub use rate::Rate;
pub use room_type::{
    CombinationEntry, MultiplierMap, MultiplierTemplate, OccupancyRange, PricingType, RoomType,
    RoundingRule,
};
pub use season::Season;
