//! Shared types, collaborator traits, and error types for the edgegate
//! request gatekeeper.
//!
//! This crate contains the foundational types shared between the core
//! gatekeeper crate and the server wiring. The identity store, the
//! organization-membership store, and the locale router are external
//! collaborators; they appear here only as trait boundaries.

#![forbid(unsafe_code)]

pub mod error;
pub mod identity_adapter;
pub mod locale_router;
pub mod membership_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
