//! Cardioscore - Hypertension Risk Assessment Core
//!
//! This crate computes an individual's probability of hypertension from a
//! short clinical questionnaire using a fixed logistic-regression model, and
//! registers confirmed assessments in a remote document store under
//! human-readable sequential identifiers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
