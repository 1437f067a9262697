//! Offer data structures and input loading

mod data;
pub mod loader;

pub use data::{
    Offer, OfferInput, validate_offers, validate_offer_count,
    FIELD_COST_PER_MONTH, FIELD_DEDUCTIBLE, FIELD_EXCESS,
};
pub use loader::{load_offers, load_offers_from_reader, load_offers_from_json};
