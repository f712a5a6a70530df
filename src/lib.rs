//! Compensation Engine
//!
//! This crate derives monthly and annual salary breakdowns from an
//! employee's annual cost to company, applies salary revisions whose fixed
//! allowance is a derived remainder, and serves both over HTTP alongside a
//! small employee record store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
