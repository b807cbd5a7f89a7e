//! Per-session search state and search outcomes.

use crate::search::{OptionSelection, OptionSet, SearchType, SpaceCaption};

/// Options offered by the latest search and the rows currently chosen.
///
/// A session belongs to one form; nothing is shared between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    /// Rows from the latest completed search.
    pub options: OptionSet,
    /// Rows currently chosen.
    pub selection: OptionSelection,
}

impl SearchSession {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every option and selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the session with the result of a completed search.
    pub fn replace(&mut self, options: OptionSet, selection: OptionSelection) {
        self.options = options;
        self.selection = selection;
    }
}

/// Non-blocking message shown in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormWarning {
    /// Short heading.
    pub title: String,
    /// Message body.
    pub message: String,
}

impl FormWarning {
    /// Warning with `title` and `message`.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Nothing matched `value`.
    #[must_use]
    pub fn no_results(value: &str) -> Self {
        Self::new(
            "Inga resultat",
            format!("Kunde inte hitta något resultat för {value}"),
        )
    }

    /// The form offered a pair that has no handler.
    #[must_use]
    pub fn unsupported_combination(search_type: SearchType, caption: SpaceCaption) -> Self {
        Self::new(
            "Ogiltig sökning",
            format!(
                "Sökning på {} stöds inte för utrymme {caption}",
                search_type.label()
            ),
        )
    }
}

/// Result of a form search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Not enough input to search yet.
    Pending,

    /// Options were replaced and the first of each relevant kind selected.
    Completed,

    /// The search ran but the user should be told something.
    Warning(FormWarning),
}

impl SearchOutcome {
    /// Warning carried by this outcome.
    #[must_use]
    pub fn warning(&self) -> Option<&FormWarning> {
        match self {
            Self::Warning(warning) => Some(warning),
            Self::Pending | Self::Completed => None,
        }
    }
}
