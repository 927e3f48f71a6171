//! Construction: consistency validation and offset-table building.
//!
//! `compose` runs exactly once per composite and is the only phase that can
//! fail. It verifies that every segment agrees with segment 0 on channel
//! ids (set and order) and sampling frequency (exact equality), then lays
//! the segments end-to-end in frame space and in time space. Failure
//! produces no partial composite.
//!
//! The time table accumulates each segment's intrinsic start offset
//! (`frame_to_time(0)`) *and* its intrinsic duration, using each segment's
//! own clock semantics rather than assuming uniform sample spacing across
//! boundaries. A segment whose clock does not start at zero therefore
//! shifts the composite's time origin; this is observable behavior carried
//! over from the source layout rule and is tested explicitly, not "fixed".

use std::sync::Arc;

use log::debug;
use snafu::prelude::*;

use crate::recording::Recording;
use crate::timeline::error::{
    EmptyCompositionSnafu, InconsistentChannelIdsSnafu, InconsistentSamplingFrequencySnafu,
    LabelCountMismatchSnafu,
};
use crate::timeline::{CompositeTimeline, Epoch, TimelineResult};

impl CompositeTimeline {
    /// Composes an ordered list of segments into one timeline.
    ///
    /// `labels`, when given, names the per-segment epochs and must have one
    /// entry per segment; otherwise epochs are named by the segment's
    /// stringified ordinal. Construction queries each segment only for its
    /// frame count and for `frame_to_time` at frames `0` and `num_frames`.
    ///
    /// # Errors
    ///
    /// `EmptyComposition` for a zero-length segment list,
    /// `LabelCountMismatch` when a label list of the wrong length is given,
    /// and `InconsistentChannelIds` / `InconsistentSamplingFrequency`
    /// naming the first offending segment.
    pub fn compose(
        segments: Vec<Arc<dyn Recording>>,
        labels: Option<Vec<String>>,
    ) -> TimelineResult<Self> {
        ensure!(!segments.is_empty(), EmptyCompositionSnafu);
        if let Some(labels) = &labels {
            ensure!(
                labels.len() == segments.len(),
                LabelCountMismatchSnafu {
                    segments: segments.len(),
                    labels: labels.len(),
                }
            );
        }

        let channel_ids = segments[0].channel_ids().to_vec();
        let sampling_frequency = segments[0].sampling_frequency();

        for (segment_index, segment) in segments.iter().enumerate().skip(1) {
            ensure!(
                segment.channel_ids() == channel_ids.as_slice(),
                InconsistentChannelIdsSnafu {
                    segment_index,
                    expected: channel_ids.clone(),
                    actual: segment.channel_ids().to_vec(),
                }
            );
            ensure!(
                segment.sampling_frequency() == sampling_frequency,
                InconsistentSamplingFrequencySnafu {
                    segment_index,
                    expected: sampling_frequency,
                    actual: segment.sampling_frequency(),
                }
            );
        }

        let mut frame_offsets = Vec::with_capacity(segments.len() + 1);
        let mut time_offsets = Vec::with_capacity(segments.len() + 1);
        let mut frame = 0u64;
        let mut time = 0f64;
        for segment in &segments {
            let num_frames = segment.num_frames();
            frame_offsets.push(frame);
            frame += num_frames;
            // Intrinsic start offset first, then intrinsic duration.
            time += segment.frame_to_time(0)?;
            time_offsets.push(time);
            time += segment.frame_to_time(num_frames)? - segment.frame_to_time(0)?;
        }
        frame_offsets.push(frame);
        time_offsets.push(time);

        let epochs = (0..segments.len())
            .map(|i| Epoch {
                name: match &labels {
                    Some(labels) => labels[i].clone(),
                    None => i.to_string(),
                },
                start_frame: frame_offsets[i],
                end_frame: frame_offsets[i + 1],
            })
            .collect();

        let annotations = segments[0].channel_annotations();

        debug!(
            "composed timeline: {} segments, {} frames, {} channels at {} Hz",
            segments.len(),
            frame,
            channel_ids.len(),
            sampling_frequency
        );

        Ok(Self {
            segments,
            channel_ids,
            sampling_frequency,
            frame_offsets,
            time_offsets,
            epochs,
            annotations,
        })
    }
}
