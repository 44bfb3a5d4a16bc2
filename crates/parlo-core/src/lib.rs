//! # parlo-core
//!
//! Entity types shared across the Parlo admin console crates.
//!
//! Everything here mirrors the REST backend's resource shapes 1:1 — the
//! client never derives its own identity or denormalizes beyond what the
//! server already sends:
//! - The four-level content hierarchy: Category → Topic → Lesson → Sentence
//! - Media asset and parent-entity references
//! - Difficulty level and stats-range enums
//! - Read-only analytics snapshots (stats summary, system health)

pub mod entities;
pub mod enums;
pub mod snapshots;

pub use entities::{AssetRef, Category, EntityRef, EntitySummary, Lesson, Sentence, Topic};
pub use enums::{Level, StatsRange};
pub use snapshots::{GrowthPoint, HealthDetails, HealthSnapshot, StatsSnapshot};
