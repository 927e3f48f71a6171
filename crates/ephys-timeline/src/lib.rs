//! # ephys-timeline
//!
//! Unified view over segmented electrophysiology recordings: N independent
//! finite recordings stitched into one virtual, randomly-addressable
//! multichannel timeseries.
//!
//! This crate is the supported public entry point and provides a small,
//! stable surface over `ephys-timeline-core`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ephys_timeline::prelude::*;
//!
//! let timeline = CompositeTimeline::compose(segments, None)?;
//! let batch = timeline.traces(None, Some(90), Some(110))?;
//! ```
#![deny(missing_docs)]

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

pub use ephys_timeline_core::annotations::{AnnotationStore, AnnotationValue};
pub use ephys_timeline_core::recording::in_memory::InMemoryRecording;
pub use ephys_timeline_core::recording::{ChannelId, Recording};
pub use ephys_timeline_core::timeline::{
    CompositeTimeline, Epoch, TimelineError, TimelineResult,
};
