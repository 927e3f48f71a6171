//! Range reads stitched across segment boundaries.
//!
//! A request fully inside one segment is a single delegation with
//! translated local bounds and its result is returned unmodified. A
//! spanning request reads three kinds of pieces — the tail of the start
//! segment, every whole intervening segment, and the head of the end
//! segment — and concatenates them along the frame axis in strict segment
//! order using Arrow's concat kernel. Channel selection is validated here,
//! before any delegation, and the requested order is passed through as-is.

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use snafu::prelude::*;

use crate::recording::ChannelId;
use crate::timeline::error::{
    ArrowSnafu, FrameOutOfRangeSnafu, InvalidRangeSnafu, UnknownChannelSnafu,
};
use crate::timeline::{CompositeTimeline, TimelineResult};

impl CompositeTimeline {
    /// Reads traces for the half-open global frame range
    /// `[start_frame, end_frame)`.
    ///
    /// `channel_ids` selects a subset of the composite's channels in the
    /// requested order; `None` returns all channels in native order.
    /// `start_frame` defaults to `0`, `end_frame` to the total frame
    /// count. An empty range yields a zero-row batch with the requested
    /// channel columns.
    ///
    /// # Errors
    ///
    /// `InvalidRange` when `start_frame > end_frame`, `FrameOutOfRange`
    /// when either bound exceeds the total frame count, and
    /// `UnknownChannel` for a requested channel id the composite does not
    /// have.
    pub fn traces(
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
        if let Some(requested) = channel_ids {
            for channel in requested {
                ensure!(
                    self.channel_ids.contains(channel),
                    UnknownChannelSnafu {
                        channel_id: channel.clone()
                    }
                );
            }
        }

        let (first, local_start) = self.locate_by_frame(start)?;
        let (last, local_end) = self.locate_by_frame(end)?;

        if first == last {
            return self.segments[first].traces(channel_ids, Some(local_start), Some(local_end));
        }

        let mut pieces = Vec::with_capacity(last - first + 1);
        let head = &self.segments[first];
        pieces.push(head.traces(channel_ids, Some(local_start), Some(head.num_frames()))?);
        for segment in &self.segments[first + 1..last] {
            pieces.push(segment.traces(channel_ids, None, None)?);
        }
        pieces.push(self.segments[last].traces(channel_ids, Some(0), Some(local_end))?);

        let schema = pieces[0].schema();
        concat_batches(&schema, &pieces).context(ArrowSnafu)
    }
}
