//! The finite-timeseries contract consumed by the composition engine.
//!
//! A [`Recording`] is one finite, independently addressable multichannel
//! timeseries with its own frame/time conversion. Format-specific readers
//! implement this trait; so does [`CompositeTimeline`], which is what makes
//! recursive composition (a composite used as a segment inside another
//! composite) work by construction.
//!
//! Trace blocks are Arrow [`RecordBatch`] values with one non-nullable
//! `Float32` column per channel (field name = channel id) and one row per
//! frame. Range arguments follow numpy-style conventions throughout the
//! crate: `start_frame` inclusive, `end_frame` exclusive.
//!
//! [`CompositeTimeline`]: crate::timeline::CompositeTimeline

pub mod in_memory;

use std::fmt;

use arrow::array::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationStore;
use crate::timeline::TimelineResult;

/// Identifier for a single channel.
///
/// This is the logical id carried in recording metadata and used as the
/// Arrow field name in trace batches. Using a newtype makes it harder to
/// mix up channel ids with other stringly-typed fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ChannelId {
    fn from(v: &str) -> Self {
        ChannelId(v.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(v: String) -> Self {
        ChannelId(v)
    }
}

/// One finite, independently addressable multichannel timeseries.
///
/// Implementations own (or lazily read) their sample data; the composition
/// engine holds segments behind shared ownership and never copies trace
/// data eagerly.
///
/// # Contract
///
/// - `channel_ids` is stable across calls (same ids, same order).
/// - `frame_to_time` / `time_to_frame` are total over `[0, num_frames]` and
///   over the matching time span; each segment may carry its own clock
///   offset or drift representation, so the engine never assumes simple
///   linear scaling by the sampling frequency.
/// - Composites built on top of a recording perform concurrent reads with
///   no extra synchronization, so `traces` must be safe for concurrent
///   invocation. This requirement is documented, not enforced.
pub trait Recording: Send + Sync {
    /// Ordered, unique channel identifiers of this recording.
    fn channel_ids(&self) -> &[ChannelId];

    /// Sampling frequency in Hz.
    fn sampling_frequency(&self) -> f64;

    /// Number of frames (samples per channel) in this recording.
    fn num_frames(&self) -> u64;

    /// Reads traces for the half-open frame range `[start_frame, end_frame)`.
    ///
    /// `channel_ids` selects a subset of channels in the requested order;
    /// `None` means all channels in native order. `start_frame` defaults to
    /// `0` and `end_frame` to [`num_frames`](Recording::num_frames).
    fn traces(
        &self,
        channel_ids: Option<&[ChannelId]>,
        start_frame: Option<u64>,
        end_frame: Option<u64>,
    ) -> TimelineResult<RecordBatch>;

    /// Converts a local frame index to a time in seconds on this
    /// recording's own clock.
    fn frame_to_time(&self, frame: u64) -> TimelineResult<f64>;

    /// Converts a time on this recording's own clock to a local frame index.
    fn time_to_frame(&self, time: f64) -> TimelineResult<u64>;

    /// Channel-level annotations attached to this recording.
    ///
    /// The default is an empty store; composites inherit the annotations of
    /// their first segment only.
    fn channel_annotations(&self) -> AnnotationStore<ChannelId> {
        AnnotationStore::new()
    }
}
