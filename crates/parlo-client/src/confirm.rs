//! Destructive-action confirmation.
//!
//! Topic deletion cascades the most descendant data (every lesson and slide
//! underneath), so it alone gets a two-stage typed gate: the admin must type
//! the exact phrase before the destructive call is enabled. The other three
//! resources use a single yes/no confirmation in the UI shell and their
//! `delete` methods take no proof. The asymmetry is deliberate.

/// Confirmation strictness required before deleting a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Single "are you sure" confirmation, handled by the UI shell.
    Simple,
    /// Two-stage gate requiring the literal [`DELETE_PHRASE`].
    TypedPhrase,
}

/// The literal an admin must type to arm a [`TypedDeleteGate`].
pub const DELETE_PHRASE: &str = "DELETE";

/// Arming state for a typed deletion gate.
///
/// Only an exact, case-sensitive match arms the gate; canceling discards
/// whatever was typed. An armed gate yields a [`DeleteArmed`] proof, which is
/// the only way to call [`crate::store::TopicStore::delete`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedDeleteGate {
    typed: String,
}

/// Proof that a typed gate was armed. Cannot be constructed elsewhere.
#[derive(Debug)]
pub struct DeleteArmed(());

impl TypedDeleteGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the typed text with the admin's current input.
    pub fn enter_text(&mut self, text: &str) {
        self.typed = text.to_string();
    }

    /// Exact literal match only — no trimming, no case folding.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.typed == DELETE_PHRASE
    }

    /// Produce the proof the destructive call demands, if armed.
    #[must_use]
    pub fn arm(&self) -> Option<DeleteArmed> {
        self.is_armed().then_some(DeleteArmed(()))
    }

    /// Discard the typed text (closing or canceling the dialog).
    pub fn cancel(&mut self) {
        self.typed.clear();
    }
}
