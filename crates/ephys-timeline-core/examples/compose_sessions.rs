//! Compose two synthetic recording sessions and read across the seam.

use std::sync::Arc;

use ephys_timeline_core::recording::in_memory::InMemoryRecording;
use ephys_timeline_core::recording::{ChannelId, Recording};
use ephys_timeline_core::timeline::CompositeTimeline;

fn session(num_frames: u64, base: f32) -> Result<Arc<InMemoryRecording>, Box<dyn std::error::Error>> {
    let channels: Vec<ChannelId> = (0..4).map(|c| ChannelId(format!("ch{c}"))).collect();
    let samples = (0..channels.len())
        .map(|c| {
            (0..num_frames)
                .map(|f| base + 1_000.0 * c as f32 + f as f32)
                .collect()
        })
        .collect();
    Ok(Arc::new(InMemoryRecording::new(channels, 30_000.0, samples)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let morning = session(100, 0.0)?;
    let afternoon = session(50, 10_000.0)?;

    let timeline = CompositeTimeline::compose(
        vec![morning as Arc<dyn Recording>, afternoon],
        Some(vec!["morning".to_string(), "afternoon".to_string()]),
    )?;

    println!(
        "composite: {} frames, {} channels at {} Hz",
        timeline.num_frames(),
        timeline.channel_ids().len(),
        timeline.sampling_frequency()
    );
    for epoch in timeline.epochs() {
        println!("epoch {:12} [{:3}, {:3})", epoch.name, epoch.start_frame, epoch.end_frame);
    }

    // A read spanning the session boundary comes back as one stitched batch.
    let batch = timeline.traces(None, Some(90), Some(110))?;
    println!("traces(90, 110): {} channels x {} frames", batch.num_columns(), batch.num_rows());

    Ok(())
}
