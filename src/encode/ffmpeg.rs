//! MP4 output through the system `ffmpeg` binary.
//!
//! Frames are flattened over the bouquet background and piped as raw RGBA; `ffmpeg`
//! converts to yuv420p H.264.

use std::{
    ffi::OsString,
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        color::Rgba8,
        core::Canvas,
        error::{BloomError, BloomResult},
    },
    render::backend::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub canvas: Canvas,
    pub fps: u32,
    /// Color every frame is composited over; the video has no alpha.
    pub background: Rgba8,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> BloomResult<()> {
        self.canvas.validate()?;
        if self.fps == 0 {
            return Err(BloomError::validation("encode fps must be non-zero"));
        }
        // yuv420p subsamples chroma 2x2.
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(BloomError::validation(format!(
                "mp4 output needs even canvas sides, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }

    /// Bytes of one raw RGBA frame on the pipe.
    pub fn frame_len(&self) -> usize {
        (self.canvas.width as usize) * (self.canvas.height as usize) * 4
    }

    /// Full `ffmpeg` argument list: raw RGBA on stdin in, H.264 MP4 at `out_path` out.
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            if self.overwrite { "-y" } else { "-n" }.into(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "rgba".into(),
            "-s".into(),
            format!("{}x{}", self.canvas.width, self.canvas.height).into(),
            "-r".into(),
            self.fps.to_string().into(),
            "-i".into(),
            "pipe:0".into(),
            "-an".into(),
            "-c:v".into(),
            "libx264".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-movflags".into(),
            "+faststart".into(),
        ];
        args.push(self.out_path.clone().into_os_string());
        args
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

pub fn ensure_parent_dir(path: &Path) -> BloomResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// A running `ffmpeg` child fed one flattened frame at a time.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames_written: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> BloomResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(BloomError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(BloomError::encode(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        tracing::debug!(path = %cfg.out_path.display(), fps = cfg.fps, "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BloomError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BloomError::encode("ffmpeg stdin is not piped"))?;

        Ok(Self {
            scratch: vec![0u8; cfg.frame_len()],
            cfg,
            child,
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> BloomResult<()> {
        let canvas = self.cfg.canvas;
        if frame.width != canvas.width || frame.height != canvas.height {
            return Err(BloomError::validation(format!(
                "frame is {}x{} but the encoder expects {}x{}",
                frame.width, frame.height, canvas.width, canvas.height
            )));
        }
        flatten_over(&mut self.scratch, frame, self.cfg.background)?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BloomError::encode("ffmpeg encoder is already finalized"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| BloomError::encode(format!("failed to write frame to ffmpeg: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    /// Close the pipe and wait for `ffmpeg` to finish the file.
    pub fn finish(mut self) -> BloomResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| BloomError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BloomError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::debug!(frames = self.frames_written, "ffmpeg finished");
        Ok(())
    }
}

/// Composite `frame` over the opaque `background` into `dst` (alpha forced to 255).
pub(crate) fn flatten_over(
    dst: &mut [u8],
    frame: &FrameRGBA,
    background: Rgba8,
) -> BloomResult<()> {
    if dst.len() != frame.data.len() || !dst.len().is_multiple_of(4) {
        return Err(BloomError::validation(
            "frame data must be width*height*4 bytes",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let [r, g, b] = over([s[0], s[1], s[2], s[3]], frame.premultiplied, background);
        d.copy_from_slice(&[r, g, b, 255]);
    }
    Ok(())
}

fn over(px: [u8; 4], premultiplied: bool, bg: Rgba8) -> [u8; 3] {
    let a = u16::from(px[3]);
    let inv = 255 - a;
    let blend = |fg: u8, bg: u8| {
        let fg = if premultiplied {
            u16::from(fg)
        } else {
            mul_div255(u16::from(fg), a)
        };
        (fg + mul_div255(u16::from(bg), inv)).min(255) as u8
    };
    [blend(px[0], bg.r), blend(px[1], bg.g), blend(px[2], bg.b)]
}

/// `x * y / 255`, rounded.
fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
