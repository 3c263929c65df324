pub mod entry;

pub use entry::{BuildStatus, FeedEntry};
