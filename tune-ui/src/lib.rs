//! # Tune Tracker UI
//!
//! Front-end logic for the Tune Tracker music catalog, shared by the CLI
//! binary and the integration tests:
//! - `store`: the RemoteStore trait and its REST implementation
//! - `filter`: client-side single-field substring filtering
//! - `form`: add/edit draft buffers with parse-at-submit semantics
//! - `controller`: the per-entity-kind list/filter/CRUD state machine

pub mod controller;
pub mod filter;
pub mod form;
pub mod store;
