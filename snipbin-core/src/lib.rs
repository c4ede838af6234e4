//! Core types for the snipbin snippet sharing service.
//!
//! Defines the domain: snippet records and their validation, the ownership
//! policy, the repository interface with its in-memory store, the user
//! directory, and highlight rendering. No HTTP or async types live here.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod highlight;
pub mod id;
pub mod policy;
pub mod snippet;
pub mod store;
pub mod user;

pub use error::ValidationError;
pub use id::{SnippetId, UserId};
pub use policy::{permits, Access};
pub use snippet::{HighlightStyle, Snippet, SnippetDraft, SnippetInput, SnippetPatch};
pub use store::{MemoryStore, SnippetStore};
pub use user::{User, UserDirectory, UserSeed};
