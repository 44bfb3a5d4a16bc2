//! Content-hierarchy entities as the REST backend serves them.

mod category;
mod lesson;
mod refs;
mod sentence;
mod topic;

pub use category::Category;
pub use lesson::Lesson;
pub use refs::{AssetRef, EntityRef, EntitySummary};
pub use sentence::Sentence;
pub use topic::Topic;
