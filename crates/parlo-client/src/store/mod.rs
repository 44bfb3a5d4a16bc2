//! Resource stores: one cache per backend collection plus the dashboard
//! snapshots, all sharing the [`Collection`] lifecycle.

pub mod category;
pub mod collection;
pub mod dashboard;
pub mod lesson;
pub mod sentence;
pub mod topic;

pub use category::CategoryStore;
pub use collection::{Collection, Keyed};
pub use dashboard::DashboardStore;
pub use lesson::LessonStore;
pub use sentence::SentenceStore;
pub use topic::TopicStore;
