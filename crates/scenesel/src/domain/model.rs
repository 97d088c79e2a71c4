//! Domain models for selection requests and their outcomes.

use std::fmt;

use crate::domain::errors::DomainError;

/// How a batch of name matches interacts with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Drop the current selection and select exactly the matches.
    Replace,
    /// Select the matches, leaving everything else untouched.
    Add,
    /// Deselect the matches, leaving everything else untouched.
    Remove,
}

/// One select-by-name invocation, built fresh from user input each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub search_text: String,
    pub mode: SelectMode,
}

impl SelectionRequest {
    pub fn new<S: Into<String>>(search_text: S, mode: SelectMode) -> Self {
        Self {
            search_text: search_text.into(),
            mode,
        }
    }

    /// Fold the dialog's two checkboxes into a mode.
    ///
    /// Requesting add and remove at the same time is rejected rather than
    /// resolved by precedence.
    pub fn from_flags<S: Into<String>>(
        search_text: S,
        add: bool,
        remove: bool,
    ) -> Result<Self, DomainError> {
        let mode = match (add, remove) {
            (true, true) => return Err(DomainError::ConflictingModes),
            (true, false) => SelectMode::Add,
            (false, true) => SelectMode::Remove,
            (false, false) => SelectMode::Replace,
        };
        Ok(Self::new(search_text, mode))
    }
}

/// Outcome of applying a [`SelectionRequest`] to a scene.
///
/// `selected` and `deselected` count flags that actually flipped, so a
/// repeated request reports zero changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub matched: usize,
    pub selected: usize,
    pub deselected: usize,
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched · {} selected · {} deselected",
            self.matched, self.selected, self.deselected
        )
    }
}
