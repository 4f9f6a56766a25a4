//! HTTP middleware: principal extraction and observability

pub mod auth;
pub mod metrics;
