//! Dermalens - a mock skin-analysis HTTP service.
//!
//! # Overview
//!
//! Dermalens accepts an uploaded skin image and returns a simulated
//! analysis report: a fixed catalog of conditions, each with a random
//! severity score, a tier label, and a random blob mask encoded as base64
//! PNG. The real-inference path is deliberately unimplemented and fails
//! loudly rather than falling back to mock output.
//!
//! # Request Lifecycle
//!
//! Every report is built fresh per request and dropped after
//! serialization:
//!
//! - No persistence of uploads, masks, or scores
//! - No shared mutable state across requests
//! - No randomness hidden in globals (the RNG is caller-supplied)
//!
//! The core is safe to invoke concurrently from any number of handlers.
//!
//! # Modules
//!
//! - [`model`]: Data types for scores, results, and reports
//! - [`analyzer`]: The mock report generator
//! - [`codec`]: Image decode/encode and base64 transport
//! - [`api`]: HTTP API handlers and router
//! - [`config`]: Environment-driven service configuration
//! - [`error`]: Error taxonomy for the analysis core

pub mod analyzer;
pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
