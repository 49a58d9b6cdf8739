//! Taskboard - task item and status management service.
//!
//! This crate provides the storage, validation and HTTP layers for task items
//! and the statuses they move through, served over a legacy and a versioned
//! REST surface, plus health reporting.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// HTTP routes, handlers and error rendering.
pub mod api;
/// Task item and status entities.
pub mod domain;
/// Health checks, aggregation and health logging.
pub mod health;
/// Infrastructure components (config, server, telemetry).
pub mod infrastructure;
/// Validating services over the stores.
pub mod service;
/// Shared state handed to the HTTP layer.
pub mod state;
/// Persistence for task items and statuses.
pub mod store;
/// Field rules for task items and statuses.
pub mod validation;
