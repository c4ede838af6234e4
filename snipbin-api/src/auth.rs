//! Bearer-token identity resolution.
//!
//! A request carries `Authorization: Bearer <token>`; the token is looked
//! up in the user directory. Anything else resolves to anonymous — the
//! handlers decide whether anonymous is acceptable for the operation.

use axum::http::{header, HeaderMap};
use snipbin_core::{UserDirectory, UserId};

/// Resolves the acting identity from the request headers, if any.
#[must_use]
pub fn identify(directory: &UserDirectory, headers: &HeaderMap) -> Option<UserId> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    directory.authenticate(token)
}
