pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, PRICE_CAP};
pub use engine::{filter_listings, matches};
