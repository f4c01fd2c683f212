//! Symptom self-screening core.
//!
//! The [`screening`] module owns the answer accumulator, the triage classifier and the
//! guidance mapping. `config`, `error` and `telemetry` carry the service plumbing shared
//! with the `self-screener-api` binary.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
