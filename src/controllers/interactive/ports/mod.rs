//! Port definitions for the interactive controller.
//!
//! Contains trait definitions that define interfaces between the controller
//! and external systems (presentation layer, bookmark persistence).

pub mod bookmark_store;
pub mod presenter;
