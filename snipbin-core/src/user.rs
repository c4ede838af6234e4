//! The read-only user directory.
//!
//! Users are an external identity concern: the directory is seeded once at
//! startup from `{username, token}` entries and never mutated afterwards,
//! so it needs no locking.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::id::UserId;

/// A known identity, exposed read-only through the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// One entry of the startup seed file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserSeed {
    /// Name shown as a snippet's owner.
    pub username: String,
    /// Opaque bearer token this user authenticates with.
    pub token: String,
}

/// Token-to-identity directory, fixed after construction.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: IndexMap<UserId, User>,
    tokens: HashMap<String, UserId>,
}

impl UserDirectory {
    /// Builds a directory from seed entries, assigning each user an ID.
    ///
    /// A repeated token keeps its first binding; a repeated username still
    /// gets its own identity (usernames are display names, not keys).
    #[must_use]
    pub fn from_seeds(seeds: impl IntoIterator<Item = UserSeed>) -> Self {
        let mut directory = Self::default();
        for seed in seeds {
            let id = UserId::new();
            directory.users.insert(id, User { id, username: seed.username });
            directory.tokens.entry(seed.token).or_insert(id);
        }
        directory
    }

    /// Resolves a bearer token to an identity.
    #[must_use]
    pub fn authenticate(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).copied()
    }

    /// Looks up a user by ID.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// The username for an ID, if the user exists.
    #[must_use]
    pub fn username(&self, id: UserId) -> Option<&str> {
        self.users.get(&id).map(|u| u.username.as_str())
    }

    /// Every user, in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Number of users in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// `true` if no users were seeded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
