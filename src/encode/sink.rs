use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    foundation::core::Canvas,
    foundation::error::{AutographError, AutographResult},
    render::backend::FrameRGBA,
};

/// Receives captured frames in presentation order.
pub trait FrameSink {
    fn begin(&mut self, canvas: Canvas, frames: usize) -> AutographResult<()>;

    /// `at` is the animation time from which `frame` is on screen.
    fn push_frame(&mut self, at: Duration, frame: &FrameRGBA) -> AutographResult<()>;

    fn end(&mut self) -> AutographResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub canvas: Option<Canvas>,
    pub frames: Vec<(Duration, FrameRGBA)>,
    pub ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameRGBA> {
        self.frames.last().map(|(_, f)| f)
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas, frames: usize) -> AutographResult<()> {
        self.canvas = Some(canvas);
        self.frames.clear();
        self.frames.reserve(frames);
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, at: Duration, frame: &FrameRGBA) -> AutographResult<()> {
        if self.ended {
            return Err(AutographError::encode("sink already ended"));
        }
        self.frames.push((at, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> AutographResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    canvas: Option<Canvas>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            canvas: None,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, canvas: Canvas, _frames: usize) -> AutographResult<()> {
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frames directory '{}'", self.dir.display()))?;
        self.canvas = Some(canvas);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, at: Duration, frame: &FrameRGBA) -> AutographResult<()> {
        let Some(canvas) = self.canvas else {
            return Err(AutographError::encode("png sequence sink used before begin"));
        };
        if frame.width != canvas.width || frame.height != canvas.height {
            return Err(AutographError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, canvas.width, canvas.height
            )));
        }
        let path = self.frame_path(self.written.len());
        crate::encode::png::save_png(frame, &path)?;
        tracing::trace!(at_ms = at.as_millis() as u64, path = %path.display(), "frame written");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> AutographResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence done");
        self.canvas = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
