pub mod analytics;
pub mod category;
pub mod entry;
pub mod mood;
pub mod tag;

pub use category::Category;
pub use entry::{EntryListItem, EntrySummary, JournalEntry};
pub use mood::{Mood, MoodCategory, MoodRole, MoodSelection};
pub use tag::Tag;
