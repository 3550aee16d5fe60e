pub mod analytics;
pub mod features;
pub mod inference;
