pub mod analytics;
pub mod entries;
pub mod moods;
pub mod search;
pub mod tags;
pub mod vocab;
