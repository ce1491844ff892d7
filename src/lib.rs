//! Listing normalization, geographic filtering and promotional ranking for a
//! classifieds marketplace client.
//!
//! Raw search payload → [`normalize`] → [`filters`] → [`ranking`]; the whole
//! chain is available as [`pipeline::run`].

pub mod config;
pub mod favorites;
pub mod filters;
pub mod geo;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod polling;
pub mod ranking;
pub mod sources;
pub mod text;

pub use filters::FilterCriteria;
pub use geo::Taxonomy;
pub use models::{NormalizedListing, RawListingRecord};
pub use ranking::{partition, RankedListings, Tier};
