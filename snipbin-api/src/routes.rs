//! Axum route handlers for the snipbin API.
//!
//! One explicit handler per verb; each mutating handler composes the same
//! steps in order: authenticate, fetch-or-404, ownership check, validate,
//! persist, serialize.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use snipbin_core::{
    highlight, permits, Access, MemoryStore, Snippet, SnippetId, SnippetInput, SnippetStore,
    UserDirectory, UserId, UserSeed,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::wire::{SnippetRepr, UserRepr};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Handler context: the snippet repository and the user directory.
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    /// State backed by the in-memory store and the given user seeds.
    #[must_use]
    pub fn in_memory(seeds: impl IntoIterator<Item = UserSeed>) -> Self {
        Self {
            snippets: Arc::new(MemoryStore::new()),
            users: Arc::new(UserDirectory::from_seeds(seeds)),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_root))
        .route("/snippets/", get(list_snippets).post(create_snippet))
        .route(
            "/snippets/{id}/",
            get(retrieve_snippet)
                .put(update_snippet)
                .patch(update_snippet)
                .delete(delete_snippet),
        )
        .route("/snippets/{id}/highlight/", get(highlight_snippet))
        .route("/users/", get(list_users))
        .route("/users/{id}/", get(retrieve_user))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — static map of collection names to their addresses.
pub async fn api_root() -> impl IntoResponse {
    Json(json!({"snippets": "/snippets/", "users": "/users/"}))
}

/// `GET /snippets/` — every snippet, in store order.
pub async fn list_snippets(State(state): State<AppState>) -> impl IntoResponse {
    let reprs: Vec<SnippetRepr> = state
        .snippets
        .list()
        .iter()
        .map(|s| SnippetRepr::new(s, &state.users))
        .collect();
    Json(reprs)
}

/// `POST /snippets/` — create a snippet owned by the acting identity.
///
/// # Errors
/// [`ApiError::AuthenticationRequired`] for anonymous callers (nothing is
/// persisted), [`ApiError::Validation`] for a failing payload.
pub async fn create_snippet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SnippetInput>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = auth::identify(&state.users, &headers).ok_or(ApiError::AuthenticationRequired)?;
    let draft = payload.into_draft()?;
    let snippet = Snippet::create(draft, Some(actor));
    state.snippets.create(snippet.clone());
    tracing::info!(id = %snippet.id, owner = %actor, "snippet created");
    Ok((StatusCode::CREATED, Json(SnippetRepr::new(&snippet, &state.users))))
}

/// `GET /snippets/:id/` — one snippet, open to anyone.
///
/// # Errors
/// [`ApiError::SnippetNotFound`] if the ID does not resolve.
pub async fn retrieve_snippet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let snippet = fetch(&state, id)?;
    Ok(Json(SnippetRepr::new(&snippet, &state.users)))
}

/// `PUT`/`PATCH /snippets/:id/` — update a snippet's mutable fields.
///
/// Accepts a full or partial payload; `id`, `owner`, and `created_at`
/// never change.
///
/// # Errors
/// [`ApiError::AuthenticationRequired`] for anonymous callers,
/// [`ApiError::SnippetNotFound`] for an unknown ID,
/// [`ApiError::PermissionDenied`] when the actor is not the owner,
/// [`ApiError::Validation`] for a failing payload.
pub async fn update_snippet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SnippetInput>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = auth::identify(&state.users, &headers).ok_or(ApiError::AuthenticationRequired)?;
    let mut snippet = fetch(&state, id)?;
    check_write(&actor, &snippet)?;
    let patch = payload.into_patch()?;
    snippet.apply(patch);
    if !state.snippets.update(snippet.id, snippet.clone()) {
        return Err(ApiError::SnippetNotFound(id));
    }
    tracing::info!(id = %snippet.id, actor = %actor, "snippet updated");
    Ok(Json(SnippetRepr::new(&snippet, &state.users)))
}

/// `DELETE /snippets/:id/` — remove a snippet.
///
/// Not idempotent: a second delete of the same ID is a 404.
///
/// # Errors
/// Same gate as update: 401 anonymous, 404 unknown ID, 403 non-owner.
pub async fn delete_snippet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = auth::identify(&state.users, &headers).ok_or(ApiError::AuthenticationRequired)?;
    let snippet = fetch(&state, id)?;
    check_write(&actor, &snippet)?;
    if !state.snippets.delete(snippet.id) {
        return Err(ApiError::SnippetNotFound(id));
    }
    tracing::info!(id = %snippet.id, actor = %actor, "snippet deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /snippets/:id/highlight/` — the pre-rendered HTML view.
///
/// # Errors
/// [`ApiError::SnippetNotFound`] if the ID does not resolve.
pub async fn highlight_snippet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let snippet = fetch(&state, id)?;
    Ok(Html(highlight::render(&snippet.code, snippet.style, snippet.linenos)))
}

/// `GET /users/` — every directory user.
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let snippets = state.snippets.list();
    let reprs: Vec<UserRepr> = state
        .users
        .iter()
        .map(|user| UserRepr::new(user, owned_ids(&snippets, user.id)))
        .collect();
    Json(reprs)
}

/// `GET /users/:id/` — one directory user.
///
/// # Errors
/// [`ApiError::UserNotFound`] if the ID does not resolve.
pub async fn retrieve_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get(UserId::from(id)).ok_or(ApiError::UserNotFound(id))?;
    let snippets = state.snippets.list();
    Ok(Json(UserRepr::new(user, owned_ids(&snippets, user.id))))
}

// ── Shared steps ──────────────────────────────────────────────────────────────

fn fetch(state: &AppState, id: Uuid) -> Result<Snippet, ApiError> {
    state
        .snippets
        .get(SnippetId::from(id))
        .ok_or(ApiError::SnippetNotFound(id))
}

fn check_write(actor: &UserId, snippet: &Snippet) -> Result<(), ApiError> {
    if permits(Access::Write, Some(actor), snippet.owner.as_ref()) {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied)
    }
}

fn owned_ids(snippets: &[Snippet], owner: UserId) -> Vec<SnippetId> {
    snippets
        .iter()
        .filter(|s| s.owner == Some(owner))
        .map(|s| s.id)
        .collect()
}
