use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{SnippetId, UserId};

/// Highlight style applied when rendering a snippet.
///
/// The set mirrors the formatter themes the rendered markup carries as CSS
/// classes; `friendly` is the default for new snippets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum HighlightStyle {
    #[default]
    Friendly,
    Monokai,
    Native,
    Colorful,
    Emacs,
    Vs,
    Tango,
    Bw,
}

impl HighlightStyle {
    /// Every supported style, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Friendly,
        Self::Monokai,
        Self::Native,
        Self::Colorful,
        Self::Emacs,
        Self::Vs,
        Self::Tango,
        Self::Bw,
    ];

    /// The wire name of this style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friendly => "friendly",
            Self::Monokai => "monokai",
            Self::Native => "native",
            Self::Colorful => "colorful",
            Self::Emacs => "emacs",
            Self::Vs => "vs",
            Self::Tango => "tango",
            Self::Bw => "bw",
        }
    }

    /// Looks up a style by its wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for HighlightStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored code snippet.
///
/// `id`, `created_at`, and `owner` are fixed at creation and never change;
/// updates go through [`Snippet::apply`], which only touches the mutable
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Snippet {
    /// Unique identifier, assigned at creation.
    pub id: SnippetId,
    /// The identity that created this snippet; `None` for an ownerless
    /// record, which no identity may mutate.
    pub owner: Option<UserId>,
    /// Optional display title; empty when not supplied.
    pub title: String,
    /// The source text. Never blank.
    pub code: String,
    /// Whether the rendered view shows a line-number gutter.
    pub linenos: bool,
    /// Style applied by the rendered view.
    pub style: HighlightStyle,
    /// When this snippet was created.
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    /// Materializes a validated draft into a stored record, assigning the
    /// identifier and creation timestamp.
    #[must_use]
    pub fn create(draft: SnippetDraft, owner: Option<UserId>) -> Self {
        Self {
            id: SnippetId::new(),
            owner,
            title: draft.title,
            code: draft.code,
            linenos: draft.linenos,
            style: draft.style,
            created_at: Utc::now(),
        }
    }

    /// Applies a validated patch to the mutable fields.
    pub fn apply(&mut self, patch: SnippetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(linenos) = patch.linenos {
            self.linenos = linenos;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
    }
}

/// The raw field bag a caller submits for create or update.
///
/// Nothing here is trusted: [`SnippetInput::into_draft`] and
/// [`SnippetInput::into_patch`] apply the per-field rules and report every
/// failing field at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetInput {
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub style: Option<String>,
}

impl SnippetInput {
    /// Validates the input as a creation payload: `code` is required and
    /// must not be blank, `style` (if given) must be a known name; the
    /// remaining fields take their defaults.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming every failing field.
    pub fn into_draft(self) -> Result<SnippetDraft, ValidationError> {
        let mut errors = ValidationError::new();

        let code = match self.code {
            None => {
                errors.push("code", "this field is required");
                String::new()
            }
            Some(code) if code.trim().is_empty() => {
                errors.push("code", "this field may not be blank");
                String::new()
            }
            Some(code) => code,
        };
        let style = parse_style(self.style.as_deref(), &mut errors);

        errors.into_result(SnippetDraft {
            title: self.title.unwrap_or_default(),
            code,
            linenos: self.linenos.unwrap_or(false),
            style: style.unwrap_or_default(),
        })
    }

    /// Validates the input as an update payload: every field is optional,
    /// but a supplied `code` must not be blank and a supplied `style` must
    /// be a known name.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming every failing field.
    pub fn into_patch(self) -> Result<SnippetPatch, ValidationError> {
        let mut errors = ValidationError::new();

        if let Some(code) = &self.code {
            if code.trim().is_empty() {
                errors.push("code", "this field may not be blank");
            }
        }
        let style = parse_style(self.style.as_deref(), &mut errors);

        errors.into_result(SnippetPatch {
            title: self.title,
            code: self.code,
            linenos: self.linenos,
            style,
        })
    }
}

fn parse_style(name: Option<&str>, errors: &mut ValidationError) -> Option<HighlightStyle> {
    let name = name?;
    match HighlightStyle::parse(name) {
        Some(style) => Some(style),
        None => {
            errors.push("style", format!("\"{name}\" is not a valid choice"));
            None
        }
    }
}

/// A fully validated creation payload, with defaults filled in.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SnippetDraft {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub style: HighlightStyle,
}

/// A fully validated update payload; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub style: Option<HighlightStyle>,
}
