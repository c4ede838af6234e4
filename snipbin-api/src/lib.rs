//! HTTP API for the snipbin snippet sharing service.
//!
//! Exposes the snippet lifecycle (list, create, retrieve, update, delete),
//! the rendered highlight view, the read-only user endpoints, and the
//! discovery root.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod error;
pub mod routes;
pub mod wire;
