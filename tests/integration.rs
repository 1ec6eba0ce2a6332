//! Integration tests for the pricing engine.
//!
//! This suite covers the full search flow end to end:
//! - restriction filtering per rate
//! - override resolution across RoomType/Market/Season/Rate
//! - occupancy multipliers for unit pricing
//! - NET and COMMISSION channel tier pricing
//! - occupancy reconciliation feeding back into restriction checks

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use pricing_engine::models::{
    Booking, BookingRoom, BookingStatus, ChildAgeGroup, ChildAgeSettings, CombinationEntry,
    Market, Markup, MultiplierMap, MultiplierTemplate, OccupancyRange, PricingOverride,
    PricingType, Rate, RoomType, RoomTypeRef, RoundingRule, SalesSettings, Season, WorkingMode,
};
use pricing_engine::pricing::{
    RateCandidate, StayRequest, calculate_tier_pricing, effective_sales_settings, quote_rates,
};
use pricing_engine::reconcile::{MemoryStore, calculate_occupancy_from_bookings, reconcile};
use pricing_engine::resolver::{OverrideSource, ResolutionScope, effective_min_adults};
use pricing_engine::restrictions::{RestrictionContext, check_restrictions};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn double_room() -> RoomType {
    RoomType {
        id: "rt_dbl".to_string(),
        name: "Deluxe Double".to_string(),
        occupancy: OccupancyRange {
            min_adults: 1,
            max_adults: 3,
        },
        pricing_type: PricingType::Unit,
        use_multipliers: true,
        multiplier_template: Some(MultiplierTemplate {
            adult_multipliers: [("1", dec("0.8")), ("2", dec("1.0")), ("3", dec("1.3"))]
                .into_iter()
                .collect::<MultiplierMap>(),
            child_multipliers: [("infant", dec("0.0")), ("child", dec("0.5"))]
                .into_iter()
                .collect::<MultiplierMap>(),
            combination_table: vec![CombinationEntry {
                adults: 2,
                children: 2,
                multiplier: dec("1.8"),
            }],
            rounding_rule: RoundingRule::None,
        }),
    }
}

fn commission_market() -> Market {
    Market {
        id: "mkt_agency".to_string(),
        hotel_id: "htl_1".to_string(),
        channel: "b2b-agency".to_string(),
        currency: "EUR".to_string(),
        pricing_overrides: vec![],
        sales_settings: Some(SalesSettings {
            working_mode: WorkingMode::Commission,
            commission_rate: dec("10"),
            markup: Markup::default(),
            agency_commission: dec("10"),
            agency_margin_share: dec("100"),
        }),
        child_age_settings: Some(ChildAgeSettings {
            inherit_from_hotel: false,
            child_age_groups: vec![
                ChildAgeGroup {
                    id: "infant".to_string(),
                    label: "Infant".to_string(),
                    min_age: 0,
                    max_age: 1,
                },
                ChildAgeGroup {
                    id: "child".to_string(),
                    label: "Child".to_string(),
                    min_age: 2,
                    max_age: 11,
                },
            ],
        }),
    }
}

fn open_rate(id: &str, date_str: &str, price: &str) -> Rate {
    Rate {
        id: id.to_string(),
        hotel_id: "htl_1".to_string(),
        room_type_id: "rt_dbl".to_string(),
        meal_plan: "BB".to_string(),
        market_id: "mkt_agency".to_string(),
        date: date(date_str),
        stop_sale: false,
        single_stop: false,
        allotment: Some(5),
        sold: 0,
        available: None,
        release_days: 0,
        min_stay: None,
        max_stay: None,
        closed_to_arrival: false,
        closed_to_departure: false,
        price_per_night: dec(price),
        currency: "EUR".to_string(),
        pricing_type: None,
        use_multiplier_override: false,
        multiplier_override: None,
    }
}

fn stay(adults: u32) -> StayRequest {
    StayRequest {
        adults,
        child_ages: vec![],
        check_in: date("2026-03-01"),
        check_out: date("2026-03-04"),
        booking_date: Some(date("2026-02-01")),
        required_rooms: 1,
    }
}

fn booking(check_in: &str, check_out: &str, quantity: u32) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        hotel_id: "htl_1".to_string(),
        status: BookingStatus::Confirmed,
        check_in: date(check_in),
        check_out: date(check_out),
        rooms: vec![BookingRoom {
            room_type_id: "rt_dbl".to_string(),
            quantity,
            adults: 2,
            child_ages: vec![],
        }],
    }
}

// =============================================================================
// Search flow
// =============================================================================

#[test]
fn full_search_flow_commission_market() {
    let room_type = double_room();
    let market = commission_market();
    let rate = open_rate("rate_1", "2026-03-01", "1100");

    let candidates = [RateCandidate {
        rate: &rate,
        room_type: Some(&room_type),
        market: Some(&market),
        season: None,
    }];

    let quotes = quote_rates(&stay(2), &candidates);
    assert_eq!(quotes.len(), 1);

    let quote = &quotes[0];
    assert!(quote.is_bookable());
    // 2 adults -> multiplier 1.0, price unchanged.
    assert_eq!(quote.nightly_price, Some(dec("1100.0")));

    let pricing = quote.pricing.as_ref().unwrap();
    assert_eq!(pricing.hotel_cost, dec("1000.00"));
    // agency_margin_share=100: b2b collapses to hotel cost.
    assert_eq!(pricing.b2b_price, dec("1000.00"));
    assert!(pricing.b2b_price >= pricing.hotel_cost);
}

#[test]
fn search_filters_blocked_rates_and_prices_the_rest() {
    let room_type = double_room();
    let market = commission_market();

    let open = open_rate("rate_open", "2026-03-01", "500");
    let mut stopped = open_rate("rate_stopped", "2026-03-01", "500");
    stopped.stop_sale = true;

    let candidates = [
        RateCandidate {
            rate: &open,
            room_type: Some(&room_type),
            market: Some(&market),
            season: None,
        },
        RateCandidate {
            rate: &stopped,
            room_type: Some(&room_type),
            market: Some(&market),
            season: None,
        },
    ];

    let quotes = quote_rates(&stay(2), &candidates);
    assert_eq!(quotes.len(), 2);

    let open_quote = quotes.iter().find(|q| q.rate_id == "rate_open").unwrap();
    let stopped_quote = quotes.iter().find(|q| q.rate_id == "rate_stopped").unwrap();

    assert!(open_quote.is_bookable());
    assert!(open_quote.pricing.is_some());
    assert!(!stopped_quote.is_bookable());
    assert!(stopped_quote.pricing.is_none());
    assert!(stopped_quote.restriction.restrictions.stop_sale);
}

#[test]
fn children_priced_individually_by_age_group() {
    let room_type = double_room();
    let market = commission_market();
    let rate = open_rate("rate_1", "2026-03-01", "100");

    let candidates = [RateCandidate {
        rate: &rate,
        room_type: Some(&room_type),
        market: Some(&market),
        season: None,
    }];

    // 2 adults + infant(0) + child(6): no (2,2) per-guest path because
    // the combination table has an exact (2,2) entry at 1.8.
    let mut family_stay = stay(2);
    family_stay.child_ages = vec![0, 6];

    let quotes = quote_rates(&family_stay, &candidates);
    assert_eq!(quotes[0].nightly_price, Some(dec("180.0")));

    // One child only: per-guest path, 1.0 + 0.5 = 1.5.
    family_stay.child_ages = vec![6];
    let quotes = quote_rates(&family_stay, &candidates);
    assert_eq!(quotes[0].nightly_price, Some(dec("150.0")));
}

#[test]
fn unresolved_multiplier_excludes_rate_but_not_search() {
    let room_type = double_room();
    let market = commission_market();

    // rate_plain opts out of multipliers at the rate level: per-person
    // pricing passes the price through untouched.
    let mut plain = open_rate("rate_plain", "2026-03-01", "90");
    plain.pricing_type = Some(PricingType::PerPerson);
    let broken = open_rate("rate_broken", "2026-03-01", "90");

    let candidates = [
        RateCandidate {
            rate: &plain,
            room_type: Some(&room_type),
            market: Some(&market),
            season: None,
        },
        RateCandidate {
            rate: &broken,
            room_type: Some(&room_type),
            market: Some(&market),
            season: None,
        },
    ];

    // A teenager's age matches no configured group: unresolvable for the
    // multiplier path, irrelevant for the per-person rate.
    let mut teen_stay = stay(2);
    teen_stay.child_ages = vec![14];

    let quotes = quote_rates(&teen_stay, &candidates);
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].rate_id, "rate_plain");
}

// =============================================================================
// Override precedence across layers
// =============================================================================

#[test]
fn season_override_beats_market_beats_room_type() {
    let room_type = double_room();

    let mut market = commission_market();
    market.pricing_overrides = vec![PricingOverride {
        room_type: Some(RoomTypeRef::Id("rt_dbl".to_string())),
        use_min_adults_override: true,
        min_adults: Some(2),
        ..Default::default()
    }];

    let season = Season {
        id: "sea_peak".to_string(),
        market_id: "mkt_agency".to_string(),
        start_date: date("2026-07-01"),
        end_date: date("2026-08-31"),
        inherit_from_market: false,
        inherit_from_hotel: false,
        pricing_overrides: vec![PricingOverride {
            room_type: Some(RoomTypeRef::Embedded {
                id: "rt_dbl".to_string(),
            }),
            use_min_adults_override: true,
            min_adults: Some(3),
            ..Default::default()
        }],
        sales_settings: None,
        child_age_settings: None,
    };

    let base_scope = ResolutionScope {
        room_type: Some(&room_type),
        ..Default::default()
    };
    assert_eq!(effective_min_adults(&base_scope).value, 1);

    let market_scope = ResolutionScope {
        room_type: Some(&room_type),
        market: Some(&market),
        ..Default::default()
    };
    let resolved = effective_min_adults(&market_scope);
    assert_eq!(resolved.value, 2);
    assert_eq!(resolved.source, OverrideSource::Market);

    let season_scope = ResolutionScope {
        room_type: Some(&room_type),
        market: Some(&market),
        season: Some(&season),
        ..Default::default()
    };
    let resolved = effective_min_adults(&season_scope);
    assert_eq!(resolved.value, 3);
    assert_eq!(resolved.source, OverrideSource::Season);
}

#[test]
fn min_adults_override_feeds_restriction_check() {
    let room_type = double_room();
    let mut market = commission_market();
    market.pricing_overrides = vec![PricingOverride {
        room_type: Some(RoomTypeRef::Id("rt_dbl".to_string())),
        use_min_adults_override: true,
        min_adults: Some(2),
        ..Default::default()
    }];
    let rate = open_rate("rate_1", "2026-03-01", "100");

    let candidates = [RateCandidate {
        rate: &rate,
        room_type: Some(&room_type),
        market: Some(&market),
        season: None,
    }];

    let quotes = quote_rates(&stay(1), &candidates);
    assert!(!quotes[0].is_bookable());
    assert!(quotes[0].restriction.restrictions.below_min_adults);
}

// =============================================================================
// Tier pricing algebra
// =============================================================================

#[test]
fn commission_margin_share_bounds() {
    // basePrice=1100, commissionRate=10, agencyMarginShare=0 -> b2b 1100
    let zero_share = SalesSettings {
        working_mode: WorkingMode::Commission,
        commission_rate: dec("10"),
        markup: Markup::default(),
        agency_commission: dec("10"),
        agency_margin_share: dec("0"),
    };
    let pricing = calculate_tier_pricing(dec("1100"), &zero_share).unwrap();
    assert_eq!(pricing.hotel_cost, dec("1000.00"));
    assert_eq!(pricing.b2b_price, dec("1100.00"));

    // agencyMarginShare=100 -> b2b collapses to hotel cost
    let full_share = SalesSettings {
        agency_margin_share: dec("100"),
        ..zero_share
    };
    let pricing = calculate_tier_pricing(dec("1100"), &full_share).unwrap();
    assert_eq!(pricing.b2b_price, dec("1000.00"));
}

#[test]
fn seasonal_sales_settings_override_market() {
    let market = commission_market();
    let season = Season {
        id: "sea_winter".to_string(),
        market_id: "mkt_agency".to_string(),
        start_date: date("2026-01-01"),
        end_date: date("2026-03-31"),
        inherit_from_market: false,
        inherit_from_hotel: false,
        pricing_overrides: vec![],
        sales_settings: Some(SalesSettings {
            working_mode: WorkingMode::Net,
            commission_rate: dec("0"),
            markup: Markup {
                b2c: dec("20"),
                b2b: dec("5"),
            },
            agency_commission: dec("10"),
            agency_margin_share: dec("0"),
        }),
        child_age_settings: None,
    };

    let settings = effective_sales_settings(Some(&market), Some(&season));
    assert_eq!(settings.working_mode, WorkingMode::Net);

    let pricing = calculate_tier_pricing(dec("200"), &settings).unwrap();
    assert_eq!(pricing.hotel_cost, dec("200.00"));
    assert_eq!(pricing.b2c_price, dec("240.00"));
    assert_eq!(pricing.b2b_price, dec("210.00"));
}

// =============================================================================
// Reconciliation and sold freshness
// =============================================================================

#[test]
fn reconciler_restores_sold_then_restrictions_see_it() {
    let mut store = MemoryStore::new(
        vec![
            booking("2026-03-01", "2026-03-04", 2),
            booking("2026-03-01", "2026-03-02", 3),
        ],
        vec![{
            let mut r = open_rate("rate_1", "2026-03-01", "100");
            r.allotment = Some(5);
            r.sold = 0; // counter has drifted
            r
        }],
    );

    let outcome = reconcile(&mut store, "htl_1", date("2026-03-01"), date("2026-03-31")).unwrap();
    assert_eq!(outcome.synced, 1);

    let rate = store.rate("rate_1").unwrap();
    assert_eq!(rate.sold, 5);

    // Re-evaluated at commit time against the fresh counter, the rate is
    // now sold out.
    let result = check_restrictions(
        rate,
        &RestrictionContext {
            adults: Some(2),
            check_in_date: Some(date("2026-03-01")),
            check_out_date: Some(date("2026-03-02")),
            booking_date: Some(date("2026-02-01")),
            ..Default::default()
        },
    );
    assert!(!result.is_bookable);
    assert!(result.restrictions.no_availability);
}

#[test]
fn occupancy_map_counts_only_stay_nights() {
    // A booking 2026-03-01 -> 2026-03-04 occupies 03-01/02/03, never 03-04.
    let store = MemoryStore::new(vec![booking("2026-03-01", "2026-03-04", 1)], vec![]);

    let occupancy = calculate_occupancy_from_bookings(
        &store,
        "htl_1",
        date("2026-03-01"),
        date("2026-03-31"),
    )
    .unwrap();

    assert_eq!(occupancy.len(), 3);
    let occupied: Vec<String> = {
        let mut keys: Vec<String> = occupancy.keys().map(|k| k.to_string()).collect();
        keys.sort();
        keys
    };
    assert_eq!(
        occupied,
        vec![
            "2026-03-01_rt_dbl".to_string(),
            "2026-03-02_rt_dbl".to_string(),
            "2026-03-03_rt_dbl".to_string(),
        ]
    );
}
