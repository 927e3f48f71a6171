//! Frame/time conversion by delegation.
//!
//! The composite never converts with its own sampling frequency. Each
//! query locates the owning segment, delegates to that segment's own
//! conversion function, and adds the precomputed global offset — so
//! per-segment clock offsets and drift representations survive
//! composition, and no constant sample spacing is assumed across segment
//! boundaries.

use crate::timeline::{CompositeTimeline, TimelineResult};

impl CompositeTimeline {
    /// Converts a global frame index to a global time in seconds.
    ///
    /// Total over `[0, num_frames]` (the sentinel maps to the end of the
    /// last segment's clock).
    ///
    /// # Errors
    ///
    /// `FrameOutOfRange` when `frame` exceeds the sentinel.
    pub fn frame_to_time(&self, frame: u64) -> TimelineResult<f64> {
        let (index, local_frame) = self.locate_by_frame(frame)?;
        Ok(self.segments[index].frame_to_time(local_frame)? + self.time_offsets[index])
    }

    /// Converts a global time in seconds to a global frame index.
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` when `time` lies outside the composite's span.
    pub fn time_to_frame(&self, time: f64) -> TimelineResult<u64> {
        let (index, local_time) = self.locate_by_time(time)?;
        Ok(self.segments[index].time_to_frame(local_time)? + self.frame_offsets[index])
    }
}
