//! rosebloom renders procedurally generated rose bouquets that bloom petal by petal and
//! then sway.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: [`create_bouquet`] places six [`Rose`]s (a main ring and a secondary
//!    ring) whose stems converge below the canvas.
//! 2. **Animate**: every frame, each rose gets [`Rose::update`] then [`Rose::draw`] with the
//!    same millisecond timestamp. Drawing goes through the [`Surface`] trait.
//! 3. **Render**: a [`DisplayList`] recorded for the frame is rasterized by a
//!    [`RenderBackend`] (CPU, `vello_cpu`).
//! 4. **Encode** (optional): frames are streamed to the system `ffmpeg` for MP4 output.
//!
//! Layout and animation never fail; errors only come from configuration, rasterization
//! and encoding.
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod geometry;
mod render;
mod scene;

pub use config::BloomConfig;
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use foundation::color::Rgba8;
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, TimeMs, Vec2};
pub use foundation::error::{BloomError, BloomResult};
pub use geometry::bezier::{cubic_point, cubic_tangent, tangent_angle};
pub use geometry::petal::petal_outline;
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::cpu::CpuBackend;
pub use render::display_list::{DisplayList, DrawOp};
pub use render::pipeline::{
    RenderStats, frame_count, frame_time_ms, record_frame, render_frame, render_sequence,
    render_still, render_to_mp4,
};
pub use render::surface::{Brush, Painter, Surface};
pub use scene::bouquet::{
    Bouquet, CONVERGENCE_DROP_PX, DEFAULT_PALETTES, LayoutParams, RING_SIZE, convergence_point,
    create_bouquet,
};
pub use scene::rose::{
    BloomTiming, LEAF_POSITIONS, Palette, Rose, RoseParams, RoseRole, RoseStyle, Stem,
    SwayParams,
};
