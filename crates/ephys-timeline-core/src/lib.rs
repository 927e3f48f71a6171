//! Core engine for presenting segmented electrophysiology recordings as one
//! logical, randomly-addressable multichannel timeseries.
//!
//! This crate provides the foundational pieces for `ephys-timeline`:
//!
//! - A `Recording` trait describing the finite-timeseries contract that
//!   format-specific readers implement (`recording` module), plus an
//!   in-memory leaf implementation.
//! - A `CompositeTimeline` that validates cross-segment consistency, builds
//!   monotonic frame- and time-offset tables once at construction, and
//!   answers arbitrary range queries that may span multiple underlying
//!   segments (`timeline` module).
//! - A typed annotation store for extensible channel/unit metadata
//!   (`annotations` module).
//!
//! Trace blocks are Arrow `RecordBatch` values with one `Float32` column per
//! channel; cross-segment reads are stitched with Arrow's concat kernel.
//! Format-specific readers and file writers are expected to depend on this
//! core crate rather than re-implementing the composition logic.
#![deny(missing_docs)]
pub mod annotations;
pub mod recording;
pub mod timeline;
