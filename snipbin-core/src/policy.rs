//! Ownership policy for snippet access.
//!
//! The one piece of authorization logic in the system: reads are open to
//! everyone, writes only to the snippet's owner. Pure and stateless; the
//! HTTP layer translates a denial into a 403 and must not proceed.

use crate::id::UserId;

/// The kind of access a request wants on a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Safe methods: always permitted, regardless of identity.
    Read,
    /// Update or delete: owner only.
    Write,
}

/// Decides whether `actor` may perform `access` on a snippet owned by
/// `owner`.
///
/// `Read` is a structural carve-out, not an ownership check. `Write`
/// requires a present actor equal to a present owner; an anonymous actor
/// or an ownerless snippet never passes.
#[must_use]
pub fn permits(access: Access, actor: Option<&UserId>, owner: Option<&UserId>) -> bool {
    match access {
        Access::Read => true,
        Access::Write => matches!((actor, owner), (Some(a), Some(o)) if a == o),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn owner_may_write() {
        let owner = UserId::new();
        assert!(permits(Access::Write, Some(&owner), Some(&owner)));
    }

    #[test]
    fn non_owner_may_not_write() {
        let owner = UserId::new();
        let other = UserId::new();
        assert!(!permits(Access::Write, Some(&other), Some(&owner)));
    }

    #[test]
    fn anonymous_may_not_write() {
        let owner = UserId::new();
        assert!(!permits(Access::Write, None, Some(&owner)));
    }

    #[test]
    fn ownerless_snippet_admits_no_writer() {
        let actor = UserId::new();
        assert!(!permits(Access::Write, Some(&actor), None));
        assert!(!permits(Access::Write, None, None));
    }

    #[test]
    fn read_is_always_permitted() {
        let a = UserId::new();
        let b = UserId::new();
        assert!(permits(Access::Read, None, None));
        assert!(permits(Access::Read, None, Some(&a)));
        assert!(permits(Access::Read, Some(&b), Some(&a)));
    }

    proptest! {
        #[test]
        fn write_permitted_iff_actor_equals_owner(actor in any::<u128>(), owner in any::<u128>()) {
            let actor = UserId::from(Uuid::from_u128(actor));
            let owner = UserId::from(Uuid::from_u128(owner));
            let decision = permits(Access::Write, Some(&actor), Some(&owner));
            prop_assert_eq!(decision, actor == owner);
        }

        #[test]
        fn read_ignores_identities(actor in any::<u128>(), owner in any::<u128>()) {
            let actor = UserId::from(Uuid::from_u128(actor));
            let owner = UserId::from(Uuid::from_u128(owner));
            prop_assert!(permits(Access::Read, Some(&actor), Some(&owner)));
            prop_assert!(permits(Access::Read, None, Some(&owner)));
        }
    }
}
