//! The shared cache shape behind every resource store.
//!
//! One ordered collection plus the uniform request-lifecycle flags:
//! - `loading` — set synchronously when a call is issued, cleared
//!   synchronously at its resolution; overlapping calls on the same
//!   collection can flip-flop it, a consumer never sees a false idle for a
//!   single outstanding call.
//! - `error` — last failure message; cleared at the next dispatch or by
//!   [`Collection::reset`].
//! - `success` — raised by a fulfilled mutation, consumed via `reset`.
//!
//! List fetches additionally carry a generation number: a fetch that
//! resolves after a newer fetch was issued on the same collection is
//! discarded instead of overwriting newer state (operations still return
//! their own `Result` directly, so nothing is lost for the caller).
//!
//! Insertion order on create is an explicit policy: newest first, at the
//! head, regardless of where the server would sort the entity.

use parlo_core::{Category, Lesson, Sentence, Topic};

/// Anything cached by id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Topic {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Lesson {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Sentence {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    success: bool,
    generation: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Mark a mutation as in flight. Clears stale `error`/`success` so a
    /// previous outcome cannot leak into this operation's reporting.
    pub fn begin_mutation(&mut self) {
        self.loading = true;
        self.error = None;
        self.success = false;
    }

    /// Mark a list fetch as in flight. Returns the generation ticket the
    /// resolution must present.
    pub fn begin_fetch(&mut self) -> u64 {
        self.begin_mutation();
        self.generation += 1;
        self.generation
    }

    /// Replace the whole collection with the server result, preserving the
    /// server's order. A stale ticket (a newer fetch was issued since) is
    /// discarded; returns whether the result was applied.
    pub fn apply_list(&mut self, ticket: u64, items: Vec<T>) -> bool {
        if ticket != self.generation {
            tracing::warn!(ticket, current = self.generation, "discarding stale list fetch");
            return false;
        }
        self.loading = false;
        self.items = items;
        true
    }

    /// Record a failed list fetch, unless a newer fetch superseded it.
    pub fn fail_fetch(&mut self, ticket: u64, message: String) -> bool {
        if ticket != self.generation {
            tracing::warn!(ticket, current = self.generation, "discarding stale fetch failure");
            return false;
        }
        self.fail(message);
        true
    }

    /// Newest-first insertion policy for freshly created entities.
    pub fn insert_newest_first(&mut self, item: T) {
        self.loading = false;
        self.success = true;
        self.items.insert(0, item);
    }

    /// Record a failed mutation.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.success = false;
        self.error = Some(message);
    }

    /// Clear outcome flags. Idempotent: with nothing pending this is a
    /// no-op.
    pub fn reset(&mut self) {
        self.loading = false;
        self.error = None;
        self.success = false;
    }

    /// Drop all cached items without touching flags (navigation away).
    pub fn clear_items(&mut self) {
        self.items.clear();
    }
}

impl<T: Keyed> Collection<T> {
    /// Replace the element with the entity's id in place. An id unknown to
    /// the local cache is silently dropped — no insert.
    pub fn replace_existing(&mut self, item: T) {
        self.loading = false;
        self.success = true;
        if let Some(index) = self.items.iter().position(|x| x.key() == item.key()) {
            self.items[index] = item;
        }
    }

    /// Splice out the element with the given id.
    pub fn remove(&mut self, id: &str) {
        self.loading = false;
        self.success = true;
        self.items.retain(|x| x.key() != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn topic(id: &str, name: &str) -> Topic {
        serde_json::from_str(&format!(r#"{{"_id": "{id}", "name": "{name}"}}"#)).unwrap()
    }

    #[test]
    fn reset_is_idempotent() {
        let mut collection: Collection<Topic> = Collection::new();
        collection.reset();
        assert!(!collection.loading());
        assert!(collection.error().is_none());
        assert!(!collection.success());

        collection.fail("boom".into());
        collection.reset();
        collection.reset();
        assert!(collection.error().is_none());
    }

    #[test]
    fn create_inserts_at_head_regardless_of_server_order() {
        let mut collection = Collection::new();
        let ticket = collection.begin_fetch();
        collection.apply_list(ticket, vec![topic("t1", "Kitchen")]);

        collection.begin_mutation();
        collection.insert_newest_first(topic("t2", "Bedroom"));

        let ids: Vec<&str> = collection.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert!(collection.success());
        assert!(!collection.loading());
    }

    #[test]
    fn update_preserves_position_and_length() {
        let mut collection = Collection::new();
        let ticket = collection.begin_fetch();
        collection.apply_list(
            ticket,
            vec![topic("t1", "Kitchen"), topic("t2", "Bedroom"), topic("t3", "Garden")],
        );

        collection.begin_mutation();
        collection.replace_existing(topic("t2", "Master Bedroom"));

        assert_eq!(collection.items().len(), 3);
        assert_eq!(collection.items()[1].id, "t2");
        assert_eq!(collection.items()[1].name, "Master Bedroom");
    }

    #[test]
    fn update_of_unknown_id_is_silently_dropped() {
        let mut collection = Collection::new();
        let ticket = collection.begin_fetch();
        collection.apply_list(ticket, vec![topic("t1", "Kitchen")]);

        collection.begin_mutation();
        collection.replace_existing(topic("t9", "Ghost"));

        assert_eq!(collection.items().len(), 1);
        assert_eq!(collection.items()[0].id, "t1");
        // The operation itself still succeeded server-side.
        assert!(collection.success());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut collection = Collection::new();
        let ticket = collection.begin_fetch();
        collection.apply_list(ticket, vec![topic("t1", "Kitchen"), topic("t2", "Bedroom")]);

        collection.begin_mutation();
        collection.remove("t1");

        assert_eq!(collection.items().len(), 1);
        assert!(collection.items().iter().all(|t| t.id != "t1"));
    }

    #[test]
    fn stale_fetch_cannot_overwrite_newer_state() {
        let mut collection = Collection::new();
        let first = collection.begin_fetch();
        let second = collection.begin_fetch();

        // Newer fetch resolves first.
        assert!(collection.apply_list(second, vec![topic("t2", "Bedroom")]));
        // Older fetch arrives late and is discarded.
        assert!(!collection.apply_list(first, vec![topic("t1", "Kitchen")]));

        assert_eq!(collection.items().len(), 1);
        assert_eq!(collection.items()[0].id, "t2");
        assert!(!collection.loading());
    }

    #[test]
    fn stale_fetch_failure_does_not_clobber_flags() {
        let mut collection: Collection<Topic> = Collection::new();
        let first = collection.begin_fetch();
        let second = collection.begin_fetch();

        assert!(collection.apply_list(second, vec![]));
        assert!(!collection.fail_fetch(first, "timed out".into()));
        assert!(collection.error().is_none());
    }

    #[test]
    fn dispatch_clears_previous_outcome() {
        let mut collection: Collection<Topic> = Collection::new();
        collection.fail("Failed to load topics".into());
        assert!(collection.error().is_some());

        collection.begin_fetch();
        assert!(collection.loading());
        assert!(collection.error().is_none());
        assert!(!collection.success());
    }

    #[test]
    fn clear_items_leaves_flags_alone() {
        let mut collection = Collection::new();
        let ticket = collection.begin_fetch();
        collection.apply_list(ticket, vec![topic("t1", "Kitchen")]);
        collection.begin_mutation();
        collection.insert_newest_first(topic("t2", "Bedroom"));

        collection.clear_items();
        assert!(collection.items().is_empty());
        assert!(collection.success());
    }
}
