//! Wire representations.
//!
//! Explicit struct-to-wire mapping: each representation is built from the
//! stored record plus the directory lookup it needs, never by reflecting
//! over the record itself. URLs are rooted at the service root.

use chrono::{DateTime, Utc};
use serde::Serialize;
use snipbin_core::{HighlightStyle, Snippet, SnippetId, User, UserDirectory, UserId};

/// A snippet as returned by the snippet endpoints.
#[derive(Debug, Serialize)]
pub struct SnippetRepr {
    pub id: SnippetId,
    pub url: String,
    pub highlight: String,
    /// Owner's username, or `null` for an ownerless record.
    pub owner: Option<String>,
    pub title: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub linenos: bool,
    pub style: HighlightStyle,
}

impl SnippetRepr {
    /// Maps a stored record to its wire form, resolving the owner's
    /// username through the directory.
    #[must_use]
    pub fn new(snippet: &Snippet, users: &UserDirectory) -> Self {
        Self {
            id: snippet.id,
            url: snippet_url(snippet.id),
            highlight: highlight_url(snippet.id),
            owner: snippet
                .owner
                .and_then(|id| users.username(id))
                .map(str::to_owned),
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            created_at: snippet.created_at,
            linenos: snippet.linenos,
            style: snippet.style,
        }
    }
}

/// A user as returned by the user endpoints.
#[derive(Debug, Serialize)]
pub struct UserRepr {
    pub id: UserId,
    pub username: String,
    /// URLs of the snippets this user owns, in store order.
    pub snippets: Vec<String>,
}

impl UserRepr {
    /// Maps a directory user to its wire form, listing the URLs of the
    /// snippets it owns.
    #[must_use]
    pub fn new(user: &User, owned: impl IntoIterator<Item = SnippetId>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            snippets: owned.into_iter().map(snippet_url).collect(),
        }
    }
}

/// Canonical address of a snippet.
#[must_use]
pub fn snippet_url(id: SnippetId) -> String {
    format!("/snippets/{id}/")
}

/// Canonical address of a snippet's rendered view.
#[must_use]
pub fn highlight_url(id: SnippetId) -> String {
    format!("/snippets/{id}/highlight/")
}
