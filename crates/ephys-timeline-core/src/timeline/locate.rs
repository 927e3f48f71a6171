//! Segment lookup: binary search over the offset tables.
//!
//! Both locators find the greatest index `i` with `offsets[i] <= query`
//! over the first N table entries and return the query translated into
//! that segment's local coordinates. The one-past-end frame sentinel
//! resolves to the *last* segment with a local coordinate equal to that
//! segment's own frame count, so an exclusive range bound never names a
//! segment that does not exist. Off-by-one changes here are the most
//! likely regression; see the boundary tests below.

use snafu::prelude::*;

use crate::timeline::error::{FrameOutOfRangeSnafu, TimeOutOfRangeSnafu};
use crate::timeline::{CompositeTimeline, TimelineResult};

impl CompositeTimeline {
    /// Resolves a global frame to `(segment_index, local_frame)`.
    ///
    /// Valid for `frame` in `[0, num_frames]`; the upper bound is the
    /// end-of-composite sentinel and maps to the end of the last segment.
    ///
    /// # Errors
    ///
    /// `FrameOutOfRange` when `frame > num_frames`. Nothing is clamped.
    pub fn locate_by_frame(&self, frame: u64) -> TimelineResult<(usize, u64)> {
        let n = self.segments.len();
        let num_frames = self.frame_offsets[n];
        ensure!(
            frame <= num_frames,
            FrameOutOfRangeSnafu { frame, num_frames }
        );

        // Rightmost segment start at or before the query. The first offset
        // is always 0, so the partition point is at least 1.
        let index = self.frame_offsets[..n].partition_point(|&offset| offset <= frame) - 1;
        Ok((index, frame - self.frame_offsets[index]))
    }

    /// Resolves a global time to `(segment_index, local_time)`.
    ///
    /// Valid for `time` in `[time_offsets[0], time_offsets[N]]` — note that
    /// the composite's time origin is not necessarily zero when segments
    /// carry intrinsic start offsets.
    ///
    /// # Errors
    ///
    /// `TimeOutOfRange` when `time` lies outside the composite's time span.
    pub fn locate_by_time(&self, time: f64) -> TimelineResult<(usize, f64)> {
        let n = self.segments.len();
        let (start, end) = (self.time_offsets[0], self.time_offsets[n]);
        ensure!(
            time >= start && time <= end,
            TimeOutOfRangeSnafu { time, start, end }
        );

        let index = self.time_offsets[..n].partition_point(|&offset| offset <= time) - 1;
        Ok((index, time - self.time_offsets[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::test_util::*;
    use crate::timeline::TimelineError;

    #[test]
    fn scenario_boundary_and_sentinel_lookups() -> TestResult {
        let (s0, s1) = scenario_recordings();
        let timeline = CompositeTimeline::compose(segments([s0, s1]), None)?;

        assert_eq!(timeline.locate_by_frame(0)?, (0, 0));
        assert_eq!(timeline.locate_by_frame(99)?, (0, 99));
        // First frame of the second segment.
        assert_eq!(timeline.locate_by_frame(100)?, (1, 0));
        // End sentinel: end of the last segment, not "segment 2".
        assert_eq!(timeline.locate_by_frame(150)?, (1, 50));
        Ok(())
    }

    #[test]
    fn frames_past_the_sentinel_are_rejected() -> TestResult {
        let (s0, s1) = scenario_recordings();
        let timeline = CompositeTimeline::compose(segments([s0, s1]), None)?;

        let err = timeline.locate_by_frame(151).expect_err("past the end");
        assert!(matches!(
            err,
            TimelineError::FrameOutOfRange {
                frame: 151,
                num_frames: 150
            }
        ));
        Ok(())
    }

    #[test]
    fn zero_length_segments_resolve_to_the_rightmost_start() -> TestResult {
        let s0 = ramp_recording(&["a"], 1_000.0, 10, 0.0);
        let s1 = ramp_recording(&["a"], 1_000.0, 0, 0.0);
        let s2 = ramp_recording(&["a"], 1_000.0, 5, 0.0);
        let timeline = CompositeTimeline::compose(segments([s0, s1, s2]), None)?;

        // Offsets are [0, 10, 10, 15]; frame 10 belongs to the rightmost
        // segment starting there.
        assert_eq!(timeline.locate_by_frame(10)?, (2, 0));
        assert_eq!(timeline.locate_by_frame(9)?, (0, 9));
        Ok(())
    }

    #[test]
    fn time_lookup_translates_to_segment_clocks() -> TestResult {
        let s0 = ramp_recording(&["a"], 10.0, 20, 0.0); // 2 s
        let s1 = ramp_recording(&["a"], 10.0, 30, 0.0); // 3 s
        let timeline = CompositeTimeline::compose(segments([s0, s1]), None)?;

        assert_eq!(timeline.locate_by_time(0.0)?, (0, 0.0));
        assert_eq!(timeline.locate_by_time(1.5)?, (0, 1.5));
        assert_eq!(timeline.locate_by_time(2.0)?, (1, 0.0));
        let (index, local) = timeline.locate_by_time(4.25)?;
        assert_eq!(index, 1);
        assert!((local - 2.25).abs() < 1e-12);
        // Inclusive end of the composite's span.
        assert_eq!(timeline.locate_by_time(5.0)?, (1, 3.0));
        Ok(())
    }

    #[test]
    fn times_outside_the_span_are_rejected() -> TestResult {
        let s0 = ramp_recording(&["a"], 10.0, 20, 0.0);
        let timeline = CompositeTimeline::compose(segments([s0]), None)?;

        assert!(matches!(
            timeline.locate_by_time(-0.1).expect_err("before start"),
            TimelineError::TimeOutOfRange { .. }
        ));
        assert!(matches!(
            timeline.locate_by_time(2.1).expect_err("after end"),
            TimelineError::TimeOutOfRange { .. }
        ));
        Ok(())
    }

    #[test]
    fn offset_tables_are_non_decreasing() -> TestResult {
        let s0 = ramp_recording(&["a"], 10.0, 20, 0.0);
        let s1 = ramp_recording(&["a"], 10.0, 0, 0.0);
        let s2 = ramp_recording(&["a"], 10.0, 7, 0.0);
        let timeline = CompositeTimeline::compose(segments([s0, s1, s2]), None)?;

        assert!(timeline.frame_offsets.windows(2).all(|w| w[0] <= w[1]));
        assert!(timeline.time_offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(timeline.frame_offsets.len(), 4);
        assert_eq!(timeline.time_offsets.len(), 4);
        Ok(())
    }
}
