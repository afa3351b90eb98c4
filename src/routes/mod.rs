pub mod analytics;
pub mod entries;
pub mod vocab;
