use std::path::Path;

use crate::{
    config::BloomConfig,
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    foundation::{
        color::Rgba8,
        core::TimeMs,
        error::{BloomError, BloomResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        display_list::DisplayList,
        surface::Surface,
    },
    scene::bouquet::Bouquet,
};

/// Timestamp of frame `frame` at `fps`, with frame 0 at t = 0.
pub fn frame_time_ms(frame: u64, fps: u32) -> TimeMs {
    (frame as f64) * 1000.0 / f64::from(fps)
}

/// Number of frames needed to cover `duration_ms` at `fps`.
pub fn frame_count(duration_ms: TimeMs, fps: u32) -> u64 {
    if duration_ms.is_nan() || duration_ms <= 0.0 || fps == 0 {
        return 0;
    }
    (duration_ms * f64::from(fps) / 1000.0).ceil() as u64
}

/// Record one frame: clear to `background`, then update and draw every rose.
pub fn record_frame(bouquet: &mut Bouquet, now: TimeMs, background: Rgba8) -> DisplayList {
    let mut list = DisplayList::new(bouquet.canvas());
    list.clear(background);
    bouquet.step(now, &mut list);
    list
}

/// Record and rasterize one frame.
#[tracing::instrument(skip(bouquet, backend))]
pub fn render_frame(
    bouquet: &mut Bouquet,
    now: TimeMs,
    background: Rgba8,
    backend: &mut dyn RenderBackend,
) -> BloomResult<FrameRGBA> {
    let list = record_frame(bouquet, now, background);
    backend.render_list(&list)
}

/// Render the bouquet as it looks `at_ms` after the animation was started.
///
/// The bloom clock is started at t = 0 before the requested frame is drawn.
pub fn render_still(
    config: &BloomConfig,
    at_ms: TimeMs,
    backend: &mut dyn RenderBackend,
) -> BloomResult<FrameRGBA> {
    config.validate()?;
    if !at_ms.is_finite() || at_ms < 0.0 {
        return Err(BloomError::validation(
            "frame time must be finite and non-negative",
        ));
    }
    let mut bouquet = config.bouquet();
    for rose in bouquet.roses_mut() {
        rose.update(0.0);
    }
    render_frame(&mut bouquet, at_ms, config.background, backend)
}

/// Counters from a multi-frame render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_rendered: u64,
    /// First frame index at which every rose was in full bloom.
    pub full_bloom_frame: Option<u64>,
}

/// Drive a freshly laid-out bouquet from t = 0 for the configured duration, handing
/// each frame to `sink` in order.
pub fn render_sequence<F>(
    config: &BloomConfig,
    backend: &mut dyn RenderBackend,
    mut sink: F,
) -> BloomResult<RenderStats>
where
    F: FnMut(u64, &FrameRGBA) -> BloomResult<()>,
{
    config.validate()?;
    let total = frame_count(config.duration_ms, config.fps);
    if total == 0 {
        return Err(BloomError::validation("render duration must cover at least one frame"));
    }

    let mut bouquet = config.bouquet();
    let mut stats = RenderStats::default();
    for f in 0..total {
        let now = frame_time_ms(f, config.fps);
        let frame = render_frame(&mut bouquet, now, config.background, backend)?;
        sink(f, &frame)?;
        stats.frames_rendered += 1;
        if stats.full_bloom_frame.is_none() && bouquet.is_full_bloom() {
            stats.full_bloom_frame = Some(f);
        }
    }

    tracing::info!(
        frames = stats.frames_rendered,
        full_bloom_frame = ?stats.full_bloom_frame,
        "sequence rendered"
    );
    Ok(stats)
}

/// Render the configured animation to an MP4 file through the system `ffmpeg`.
pub fn render_to_mp4(
    config: &BloomConfig,
    out_path: &Path,
    overwrite: bool,
    backend: &mut dyn RenderBackend,
) -> BloomResult<RenderStats> {
    config.validate()?;
    let mut encoder = FfmpegEncoder::new(EncodeConfig {
        canvas: config.canvas,
        fps: config.fps,
        background: config.background,
        out_path: out_path.to_path_buf(),
        overwrite,
    })?;
    let stats = render_sequence(config, backend, |_, frame| encoder.encode_frame(frame))?;
    encoder.finish()?;
    tracing::info!(path = %out_path.display(), "mp4 written");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
