//! Shared fixtures for the engine's tests.

use std::sync::Arc;

use arrow::array::{Float32Array, RecordBatch};

use crate::recording::in_memory::InMemoryRecording;
use crate::recording::{ChannelId, Recording};

pub(crate) type TestResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) fn channel_ids(names: &[&str]) -> Vec<ChannelId> {
    names.iter().map(|name| ChannelId::from(*name)).collect()
}

/// Evenly sampled ramp fixture: `sample[c][f] = base + 1000 * c + f`, so
/// every (channel, frame) pair has a distinct, predictable value.
pub(crate) fn ramp_recording(
    channels: &[&str],
    sampling_frequency: f64,
    num_frames: u64,
    base: f32,
) -> Arc<InMemoryRecording> {
    let samples = (0..channels.len())
        .map(|c| {
            (0..num_frames)
                .map(|f| base + 1_000.0 * c as f32 + f as f32)
                .collect()
        })
        .collect();
    Arc::new(
        InMemoryRecording::new(channel_ids(channels), sampling_frequency, samples)
            .expect("valid fixture"),
    )
}

/// The two-segment reference setup: 100 + 50 frames, 4 channels, 1 kHz.
pub(crate) fn scenario_recordings() -> (Arc<InMemoryRecording>, Arc<InMemoryRecording>) {
    let channels = ["ch0", "ch1", "ch2", "ch3"];
    (
        ramp_recording(&channels, 1_000.0, 100, 0.0),
        ramp_recording(&channels, 1_000.0, 50, 10_000.0),
    )
}

pub(crate) fn segments<const N: usize>(list: [Arc<InMemoryRecording>; N]) -> Vec<Arc<dyn Recording>> {
    list.into_iter().map(|s| s as Arc<dyn Recording>).collect()
}

pub(crate) fn column(batch: &RecordBatch, index: usize) -> Vec<f32> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<Float32Array>()
        .expect("float32 column")
        .values()
        .to_vec()
}
