//! In-memory leaf recording.
//!
//! Holds channel-major `f32` samples with an evenly sampled clock and an
//! optional start offset. This is both a real leaf (the natural target when
//! converting decoded vendor data) and the fixture the engine's tests are
//! built on. Range and channel-selection validation follows the same
//! conventions as the composite, so delegation is indistinguishable from a
//! direct call.

use std::collections::BTreeSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array, RecordBatch, RecordBatchOptions};
use arrow::datatypes::{DataType, Field, Schema};
use snafu::prelude::*;

use crate::annotations::{AnnotationStore, AnnotationValue};
use crate::recording::{ChannelId, Recording};
use crate::timeline::error::{
    ArrowSnafu, DuplicateChannelSnafu, FrameOutOfRangeSnafu, InvalidRangeSnafu, RaggedTracesSnafu,
    ShapeMismatchSnafu, TimeOutOfRangeSnafu, UnknownChannelSnafu,
};
use crate::timeline::TimelineResult;

/// A finite recording held entirely in memory.
///
/// Samples are channel-major: `samples[c][f]` is the value of channel `c`
/// at local frame `f`. The clock is evenly sampled with an optional start
/// offset, so `frame_to_time` and `time_to_frame` are exact inverses.
#[derive(Clone, Debug)]
pub struct InMemoryRecording {
    channel_ids: Vec<ChannelId>,
    sampling_frequency: f64,
    start_time: f64,
    samples: Vec<Vec<f32>>,
    annotations: AnnotationStore<ChannelId>,
}

impl InMemoryRecording {
    /// Builds a recording from channel ids and channel-major samples.
    ///
    /// Channel ids must be unique, `samples` must have one row per channel
    /// id, and all rows must have the same length.
    pub fn new(
        channel_ids: Vec<ChannelId>,
        sampling_frequency: f64,
        samples: Vec<Vec<f32>>,
    ) -> TimelineResult<Self> {
        let mut seen = BTreeSet::new();
        for id in &channel_ids {
            ensure!(
                seen.insert(id),
                DuplicateChannelSnafu {
                    channel_id: id.clone()
                }
            );
        }
        ensure!(
            samples.len() == channel_ids.len(),
            ShapeMismatchSnafu {
                channels: channel_ids.len(),
                trace_rows: samples.len(),
            }
        );
        let expected = samples.first().map(Vec::len).unwrap_or(0);
        for (channel_index, row) in samples.iter().enumerate() {
            ensure!(
                row.len() == expected,
                RaggedTracesSnafu {
                    channel_index,
                    expected,
                    actual: row.len(),
                }
            );
        }

        Ok(Self {
            channel_ids,
            sampling_frequency,
            start_time: 0.0,
            samples,
            annotations: AnnotationStore::new(),
        })
    }

    /// Shifts this recording's clock so that frame 0 maps to `start_time`
    /// seconds.
    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    /// Attaches an annotation to one of this recording's channels.
    ///
    /// Fails with `UnknownChannel` when `channel` is not part of the
    /// recording; annotation writes are validated, reads are not.
    pub fn set_annotation(
        &mut self,
        channel: ChannelId,
        name: impl Into<String>,
        value: impl Into<AnnotationValue>,
    ) -> TimelineResult<()> {
        ensure!(
            self.channel_ids.contains(&channel),
            UnknownChannelSnafu {
                channel_id: channel.clone()
            }
        );
        self.annotations.set(channel, name, value.into());
        Ok(())
    }

    /// Maps requested channel ids to sample-row indices, preserving the
    /// requested order. `None` selects all channels in native order.
    fn resolve_selection(&self, requested: Option<&[ChannelId]>) -> TimelineResult<Vec<usize>> {
        match requested {
            None => Ok((0..self.channel_ids.len()).collect()),
            Some(ids) => ids
                .iter()
                .map(|id| {
                    self.channel_ids
                        .iter()
                        .position(|c| c == id)
                        .context(UnknownChannelSnafu {
                            channel_id: id.clone(),
                        })
                })
                .collect(),
        }
    }
}

impl Recording for InMemoryRecording {
    fn channel_ids(&self) -> &[ChannelId] {
        &self.channel_ids
    }

    fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    fn num_frames(&self) -> u64 {
        self.samples.first().map(Vec::len).unwrap_or(0) as u64
    }

    fn traces(
        &self,
        channel_ids: Option<&[ChannelId]>,
        start_frame: Option<u64>,
        end_frame: Option<u64>,
    ) -> TimelineResult<RecordBatch> {
        let num_frames = self.num_frames();
        let start = start_frame.unwrap_or(0);
        let end = end_frame.unwrap_or(num_frames);
        ensure!(
            start <= end,
            InvalidRangeSnafu {
                start_frame: start,
                end_frame: end,
            }
        );
        ensure!(
            end <= num_frames,
            FrameOutOfRangeSnafu {
                frame: end,
                num_frames,
            }
        );

        let selection = self.resolve_selection(channel_ids)?;
        let (start, end) = (start as usize, end as usize);

        let fields: Vec<Field> = selection
            .iter()
            .map(|&c| Field::new(self.channel_ids[c].0.clone(), DataType::Float32, false))
            .collect();
        let columns: Vec<ArrayRef> = selection
            .iter()
            .map(|&c| {
                Arc::new(Float32Array::from(self.samples[c][start..end].to_vec())) as ArrayRef
            })
            .collect();

        // Explicit row count keeps zero-channel and zero-frame reads valid.
        let options = RecordBatchOptions::new().with_row_count(Some(end - start));
        RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)
            .context(ArrowSnafu)
    }

    fn frame_to_time(&self, frame: u64) -> TimelineResult<f64> {
        let num_frames = self.num_frames();
        ensure!(
            frame <= num_frames,
            FrameOutOfRangeSnafu { frame, num_frames }
        );
        Ok(self.start_time + frame as f64 / self.sampling_frequency)
    }

    fn time_to_frame(&self, time: f64) -> TimelineResult<u64> {
        let start = self.start_time;
        let end = self.start_time + self.num_frames() as f64 / self.sampling_frequency;
        ensure!(
            time >= start && time <= end,
            TimeOutOfRangeSnafu { time, start, end }
        );
        Ok(((time - start) * self.sampling_frequency).round() as u64)
    }

    fn channel_annotations(&self) -> AnnotationStore<ChannelId> {
        self.annotations.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::test_util::{channel_ids, column, ramp_recording, TestResult};
    use crate::timeline::TimelineError;

    #[test]
    fn new_rejects_duplicate_channel_ids() {
        let err = InMemoryRecording::new(
            channel_ids(&["a", "b", "a"]),
            1_000.0,
            vec![vec![0.0; 4]; 3],
        )
        .expect_err("duplicate ids should fail");
        assert!(matches!(err, TimelineError::DuplicateChannel { .. }));
    }

    #[test]
    fn new_rejects_shape_mismatch() {
        let err = InMemoryRecording::new(channel_ids(&["a", "b"]), 1_000.0, vec![vec![0.0; 4]])
            .expect_err("row count mismatch should fail");
        assert!(matches!(
            err,
            TimelineError::ShapeMismatch {
                channels: 2,
                trace_rows: 1
            }
        ));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = InMemoryRecording::new(
            channel_ids(&["a", "b"]),
            1_000.0,
            vec![vec![0.0; 4], vec![0.0; 3]],
        )
        .expect_err("ragged rows should fail");
        assert!(matches!(
            err,
            TimelineError::RaggedTraces {
                channel_index: 1,
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn traces_default_range_returns_everything() -> TestResult {
        let rec = ramp_recording(&["a", "b"], 1_000.0, 5, 0.0);
        let batch = rec.traces(None, None, None)?;
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 5);
        assert_eq!(column(&batch, 0), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(column(&batch, 1), vec![1_000.0, 1_001.0, 1_002.0, 1_003.0, 1_004.0]);
        Ok(())
    }

    #[test]
    fn traces_channel_subset_preserves_requested_order() -> TestResult {
        let rec = ramp_recording(&["a", "b", "c"], 1_000.0, 3, 0.0);
        let wanted = channel_ids(&["c", "a"]);
        let batch = rec.traces(Some(wanted.as_slice()), Some(1), Some(3))?;
        assert_eq!(batch.schema().field(0).name(), "c");
        assert_eq!(batch.schema().field(1).name(), "a");
        assert_eq!(column(&batch, 0), vec![2_001.0, 2_002.0]);
        assert_eq!(column(&batch, 1), vec![1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn traces_rejects_unknown_channel_and_bad_ranges() {
        let rec = ramp_recording(&["a"], 1_000.0, 4, 0.0);

        let wanted = channel_ids(&["nope"]);
        let err = rec
            .traces(Some(wanted.as_slice()), None, None)
            .expect_err("unknown channel");
        assert!(matches!(err, TimelineError::UnknownChannel { .. }));

        let err = rec.traces(None, Some(3), Some(2)).expect_err("start > end");
        assert!(matches!(err, TimelineError::InvalidRange { .. }));

        let err = rec.traces(None, Some(0), Some(5)).expect_err("end > total");
        assert!(matches!(err, TimelineError::FrameOutOfRange { .. }));
    }

    #[test]
    fn traces_empty_range_yields_zero_rows() -> TestResult {
        let rec = ramp_recording(&["a", "b"], 1_000.0, 4, 0.0);
        let batch = rec.traces(None, Some(2), Some(2))?;
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 0);
        Ok(())
    }

    #[test]
    fn clock_conversions_are_exact_inverses() -> TestResult {
        let rec = ramp_recording(&["a"], 250.0, 10, 0.0);
        for frame in 0..=10 {
            assert_eq!(rec.time_to_frame(rec.frame_to_time(frame)?)?, frame);
        }
        Ok(())
    }

    #[test]
    fn start_time_shifts_the_clock() -> TestResult {
        let rec = InMemoryRecording::new(channel_ids(&["a"]), 10.0, vec![vec![0.0; 20]])?
            .with_start_time(5.0);
        assert_eq!(rec.frame_to_time(0)?, 5.0);
        assert_eq!(rec.frame_to_time(20)?, 7.0);
        assert_eq!(rec.time_to_frame(6.0)?, 10);

        let err = rec.time_to_frame(4.9).expect_err("before clock start");
        assert!(matches!(err, TimelineError::TimeOutOfRange { .. }));
        Ok(())
    }

    #[test]
    fn conversions_reject_out_of_domain_frames() {
        let rec = ramp_recording(&["a"], 1_000.0, 4, 0.0);
        let err = rec.frame_to_time(5).expect_err("past sentinel");
        assert!(matches!(
            err,
            TimelineError::FrameOutOfRange {
                frame: 5,
                num_frames: 4
            }
        ));
    }

    #[test]
    fn annotations_are_validated_on_write_and_exposed() -> TestResult {
        let mut rec =
            InMemoryRecording::new(channel_ids(&["a", "b"]), 1_000.0, vec![vec![0.0; 2]; 2])?;
        rec.set_annotation(ChannelId::from("a"), "location", vec![0.0, 1.5])?;

        let err = rec
            .set_annotation(ChannelId::from("zz"), "location", 1_i64)
            .expect_err("unknown channel");
        assert!(matches!(err, TimelineError::UnknownChannel { .. }));

        let store = rec.channel_annotations();
        assert_eq!(
            store
                .get(&ChannelId::from("a"), "location")
                .and_then(AnnotationValue::as_float_list),
            Some(&[0.0, 1.5][..])
        );
        Ok(())
    }
}
