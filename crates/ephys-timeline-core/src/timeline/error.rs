//! Error types and SNAFU context selectors for the composition engine.
//!
//! This module centralizes the `TimelineError` enum used by the public API
//! and exposes context selectors (via `#[snafu(visibility(pub(crate)))]`)
//! so implementation details in sibling modules can attach error context
//! without re-exporting everything at the crate root. Keep new variants
//! here to ensure consistent user-facing messages.

use arrow::error::ArrowError;
use snafu::prelude::*;

use crate::recording::ChannelId;

/// Result alias used throughout the composition engine.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Errors from timeline composition, addressing, and trace assembly.
///
/// Every variant carries the offending value and the violated expectation
/// so callers can act on the failure without re-deriving engine state.
/// Nothing is retried internally and no argument is silently clamped;
/// retry or clamping policy belongs to the caller.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TimelineError {
    /// Composition requires at least one segment.
    #[snafu(display("Cannot compose a timeline from an empty segment list"))]
    EmptyComposition,

    /// An epoch label list was supplied but its length does not match the
    /// segment count.
    #[snafu(display("Epoch label count mismatch: {labels} labels for {segments} segments"))]
    LabelCountMismatch {
        /// Number of segments passed to composition.
        segments: usize,
        /// Number of labels passed to composition.
        labels: usize,
    },

    /// A segment's channel ids differ from the first segment's, in set or
    /// in order.
    #[snafu(display(
        "Inconsistent channel ids between segment 0 and segment {segment_index}: expected {expected:?}, found {actual:?}"
    ))]
    InconsistentChannelIds {
        /// Index of the offending segment in the composition order.
        segment_index: usize,
        /// Channel ids of the first segment.
        expected: Vec<ChannelId>,
        /// Channel ids of the offending segment.
        actual: Vec<ChannelId>,
    },

    /// A segment's sampling frequency differs from the first segment's.
    /// Equality is exact; there is no tolerance.
    #[snafu(display(
        "Inconsistent sampling frequency between segment 0 and segment {segment_index}: expected {expected}, found {actual}"
    ))]
    InconsistentSamplingFrequency {
        /// Index of the offending segment in the composition order.
        segment_index: usize,
        /// Sampling frequency of the first segment.
        expected: f64,
        /// Sampling frequency of the offending segment.
        actual: f64,
    },

    /// A frame argument lies outside `[0, num_frames]` (the upper bound is
    /// the one-past-end sentinel accepted as an exclusive range bound).
    #[snafu(display("Frame {frame} out of range (recording spans {num_frames} frames)"))]
    FrameOutOfRange {
        /// The offending frame index.
        frame: u64,
        /// Total frame count of the recording.
        num_frames: u64,
    },

    /// A time argument lies outside the recording's time span.
    #[snafu(display("Time {time} out of range [{start}, {end}]"))]
    TimeOutOfRange {
        /// The offending time value.
        time: f64,
        /// Start of the valid time span.
        start: f64,
        /// End of the valid time span.
        end: f64,
    },

    /// A frame range was requested with `start_frame > end_frame`.
    #[snafu(display(
        "Invalid frame range: start={start_frame}, end={end_frame} (expect start <= end)"
    ))]
    InvalidRange {
        /// Inclusive lower frame bound supplied by the caller.
        start_frame: u64,
        /// Exclusive upper frame bound supplied by the caller.
        end_frame: u64,
    },

    /// A requested channel id is not present in the recording.
    #[snafu(display("Unknown channel id: {channel_id}"))]
    UnknownChannel {
        /// The channel id that was requested but not found.
        channel_id: ChannelId,
    },

    /// Channel id count does not match the trace row count when building an
    /// in-memory recording.
    #[snafu(display("Trace shape mismatch: {channels} channel ids for {trace_rows} trace rows"))]
    ShapeMismatch {
        /// Number of channel ids supplied.
        channels: usize,
        /// Number of per-channel trace rows supplied.
        trace_rows: usize,
    },

    /// Per-channel traces have unequal lengths when building an in-memory
    /// recording.
    #[snafu(display(
        "Ragged traces: channel {channel_index} has {actual} frames, expected {expected}"
    ))]
    RaggedTraces {
        /// Index of the channel with the deviating length.
        channel_index: usize,
        /// Frame count of channel 0.
        expected: usize,
        /// Frame count of the offending channel.
        actual: usize,
    },

    /// The same channel id appears more than once in a channel id list.
    #[snafu(display("Duplicate channel id: {channel_id}"))]
    DuplicateChannel {
        /// The repeated channel id.
        channel_id: ChannelId,
    },

    /// Arrow error while assembling or concatenating trace batches.
    #[snafu(display("Arrow error while assembling traces: {source}"))]
    Arrow {
        /// Underlying Arrow error raised during batch assembly or concat.
        source: ArrowError,
    },
}
