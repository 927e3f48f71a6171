//! Wrapper prelude.
//!
//! The `ephys-timeline` crate is the supported public entry point.
//! Downstream code should prefer importing from this prelude instead of
//! depending on internal core module paths.

pub use crate::{
    AnnotationStore, AnnotationValue, ChannelId, CompositeTimeline, Epoch, InMemoryRecording,
    Recording, TimelineError, TimelineResult,
};
