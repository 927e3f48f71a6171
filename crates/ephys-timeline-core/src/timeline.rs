//! Composite timeline: the virtual concatenation of segments into one
//! frame/time space.
//!
//! [`CompositeTimeline`] wraps an ordered sequence of [`Recording`]
//! segments, validates cross-segment consistency once at construction, and
//! builds two monotonic offset tables (frame space and time space). Every
//! subsequent query is a pure lookup plus delegation to one or more
//! segments:
//!
//! - `compose` — consistency validation and offset-table construction
//!   (`compose` module).
//! - `locate_by_frame` / `locate_by_time` — binary search over the offset
//!   tables (`locate` module).
//! - `traces` — range reads stitched across segment boundaries (`traces`
//!   module).
//! - `frame_to_time` / `time_to_frame` — conversion by delegation to the
//!   owning segment's clock (`convert` module).
//!
//! The composite is immutable after construction and adds only `O(log N)`
//! lookup plus `O(segments spanned)` delegation overhead per query, so it
//! may be shared across concurrent readers without locking as long as each
//! segment's own `traces` is concurrency-safe.

pub mod error;

mod compose;
mod convert;
mod locate;
mod traces;

#[cfg(test)]
pub(crate) mod test_util;

use std::fmt;
use std::sync::Arc;

use arrow::array::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationStore;
use crate::recording::{ChannelId, Recording};

pub use error::{TimelineError, TimelineResult};

/// The global frame range occupied by one source segment within a
/// composite, as a half-open interval `[start_frame, end_frame)`.
///
/// Epochs are contiguous and non-overlapping by construction and are
/// recorded in segment order; together they partition `[0, num_frames)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    /// Caller-supplied label, or the segment's stringified ordinal when no
    /// labels were given.
    pub name: String,
    /// First global frame covered by this epoch (inclusive).
    pub start_frame: u64,
    /// One past the last global frame covered by this epoch (exclusive).
    pub end_frame: u64,
}

/// An ordered sequence of segments presented as a single recording.
///
/// The composite owns only its derived offset tables and shared references
/// to the segments; segment data is never copied eagerly and segments may
/// be shared by other composites. Because `CompositeTimeline` itself
/// implements [`Recording`], composites nest: a composite is usable
/// anywhere a segment is expected.
pub struct CompositeTimeline {
    pub(crate) segments: Vec<Arc<dyn Recording>>,
    pub(crate) channel_ids: Vec<ChannelId>,
    pub(crate) sampling_frequency: f64,
    /// Global frame index at which each segment begins; the final entry is
    /// the total frame count (length N+1, non-decreasing).
    pub(crate) frame_offsets: Vec<u64>,
    /// Global time at which each segment begins, aligned index-for-index
    /// with `frame_offsets`.
    pub(crate) time_offsets: Vec<f64>,
    pub(crate) epochs: Vec<Epoch>,
    pub(crate) annotations: AnnotationStore<ChannelId>,
}

impl CompositeTimeline {
    /// Ordered channel identifiers, copied from the first segment.
    pub fn channel_ids(&self) -> &[ChannelId] {
        &self.channel_ids
    }

    /// Sampling frequency in Hz, copied from the first segment.
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Total number of frames across all segments.
    pub fn num_frames(&self) -> u64 {
        self.frame_offsets[self.segments.len()]
    }

    /// Number of segments in this composite.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Epochs in segment order; their union exactly covers
    /// `[0, num_frames)`.
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Channel annotations inherited from the first segment.
    pub fn annotations(&self) -> &AnnotationStore<ChannelId> {
        &self.annotations
    }
}

impl Recording for CompositeTimeline {
    fn channel_ids(&self) -> &[ChannelId] {
        CompositeTimeline::channel_ids(self)
    }

    fn sampling_frequency(&self) -> f64 {
        CompositeTimeline::sampling_frequency(self)
    }

    fn num_frames(&self) -> u64 {
        CompositeTimeline::num_frames(self)
    }

    fn traces(
        &self,
        channel_ids: Option<&[ChannelId]>,
        start_frame: Option<u64>,
        end_frame: Option<u64>,
    ) -> TimelineResult<RecordBatch> {
        CompositeTimeline::traces(self, channel_ids, start_frame, end_frame)
    }

    fn frame_to_time(&self, frame: u64) -> TimelineResult<f64> {
        CompositeTimeline::frame_to_time(self, frame)
    }

    fn time_to_frame(&self, time: f64) -> TimelineResult<u64> {
        CompositeTimeline::time_to_frame(self, time)
    }

    fn channel_annotations(&self) -> AnnotationStore<ChannelId> {
        self.annotations.clone()
    }
}

impl fmt::Debug for CompositeTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTimeline")
            .field("num_segments", &self.segments.len())
            .field("num_frames", &self.num_frames())
            .field("channel_ids", &self.channel_ids)
            .field("sampling_frequency", &self.sampling_frequency)
            .field("epochs", &self.epochs)
            .finish()
    }
}
