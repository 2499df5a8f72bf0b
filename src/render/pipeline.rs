use std::{sync::Arc, time::Duration};

use rayon::prelude::*;

use crate::{
    animation::clock::{Clock, VirtualClock},
    animation::events::RenderObserver,
    animation::signature::{RenderSummary, SignatureAnimation},
    assets::fonts::{FontBook, TextShaper},
    encode::sink::FrameSink,
    foundation::core::Canvas,
    foundation::error::{AutographError, AutographResult},
    layout::measure::GlyphMeasure,
    render::backend::FrameRGBA,
    render::cpu::CpuRasterizer,
    render::display_list::DrawOp,
    render::surface::RecordingSurface,
};

/// Display-list length at the moment a step finished drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Animation time from which this state is on screen.
    pub at: Duration,
    pub op_count: usize,
}

/// Everything an animation drew, plus where each visible state ends.
#[derive(Clone, Debug)]
pub struct RecordedRun {
    pub ops: Vec<DrawOp>,
    pub checkpoints: Vec<Checkpoint>,
    pub summary: RenderSummary,
}

#[derive(Clone, Debug)]
pub struct CaptureThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for CaptureThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub frames_total: u64,
    /// Draw ops recorded over the whole run.
    pub ops_recorded: u64,
}

/// Drive `animation` to completion on `surface`, checkpointing after every step that drew.
///
/// Steps that only wait (character delays, the flourish pause) add no checkpoint.
pub fn record_run<M, C, O>(
    animation: &mut SignatureAnimation,
    surface: &mut RecordingSurface<M>,
    clock: &mut C,
    observer: &mut O,
) -> RecordedRun
where
    M: GlyphMeasure,
    C: Clock + ?Sized,
    O: RenderObserver + ?Sized,
{
    let mut checkpoints: Vec<Checkpoint> = Vec::new();
    loop {
        let at = animation.elapsed();
        let wait = animation.step(surface, observer);
        let op_count = surface.mutation_count();
        if checkpoints.last().is_none_or(|c| c.op_count != op_count) {
            checkpoints.push(Checkpoint { at, op_count });
        }
        match wait {
            Some(w) => clock.sleep(w),
            None => break,
        }
    }

    RecordedRun {
        ops: surface.display_list().to_vec(),
        checkpoints,
        summary: animation.summary(),
    }
}

/// Offline capture of a signature animation into frames.
pub struct FrameCapture {
    canvas: Canvas,
    book: Arc<FontBook>,
    threading: CaptureThreading,
}

impl FrameCapture {
    pub fn new(canvas: Canvas, book: Arc<FontBook>) -> Self {
        Self {
            canvas,
            book,
            threading: CaptureThreading::default(),
        }
    }

    pub fn with_threading(mut self, threading: CaptureThreading) -> Self {
        self.threading = threading;
        self
    }

    /// Run `animation` on a virtual clock against a fresh recording surface.
    ///
    /// Measurement uses the same font book as rasterization.
    pub fn record<O>(&self, animation: &mut SignatureAnimation, observer: &mut O) -> RecordedRun
    where
        O: RenderObserver + ?Sized,
    {
        let mut surface = RecordingSurface::new(self.canvas, TextShaper::new(self.book.clone()));
        let mut clock = VirtualClock::new();
        record_run(animation, &mut surface, &mut clock, observer)
    }

    /// Rasterize every checkpoint of `run`; output order matches `run.checkpoints`.
    #[tracing::instrument(skip(self, run), fields(checkpoints = run.checkpoints.len(), parallel = self.threading.parallel))]
    pub fn rasterize(&self, run: &RecordedRun) -> AutographResult<Vec<(Duration, FrameRGBA)>> {
        for c in &run.checkpoints {
            if c.op_count > run.ops.len() {
                return Err(AutographError::render(format!(
                    "checkpoint references {} ops but only {} were recorded",
                    c.op_count,
                    run.ops.len()
                )));
            }
        }

        if !self.threading.parallel {
            let mut raster = CpuRasterizer::new(self.book.clone());
            let mut out = Vec::with_capacity(run.checkpoints.len());
            for c in &run.checkpoints {
                out.push((c.at, raster.rasterize(&run.ops[..c.op_count], self.canvas)?));
            }
            return Ok(out);
        }

        let pool = build_thread_pool(self.threading.threads)?;
        let rendered = pool.install(|| {
            run.checkpoints
                .par_iter()
                .map_init(
                    || CpuRasterizer::new(self.book.clone()),
                    |raster, c| -> AutographResult<(Duration, FrameRGBA)> {
                        Ok((c.at, raster.rasterize(&run.ops[..c.op_count], self.canvas)?))
                    },
                )
                .collect::<Vec<_>>()
        });
        rendered.into_iter().collect()
    }

    /// Record, rasterize and deliver frames to `sink` in order.
    pub fn capture<O, K>(
        &self,
        animation: &mut SignatureAnimation,
        observer: &mut O,
        sink: &mut K,
    ) -> AutographResult<(RenderSummary, CaptureStats)>
    where
        O: RenderObserver + ?Sized,
        K: FrameSink + ?Sized,
    {
        let run = self.record(animation, observer);
        let frames = self.rasterize(&run)?;

        sink.begin(self.canvas, frames.len())?;
        for (at, frame) in &frames {
            sink.push_frame(*at, frame)?;
        }
        sink.end()?;

        let stats = CaptureStats {
            frames_total: frames.len() as u64,
            ops_recorded: run.ops.len() as u64,
        };
        tracing::debug!(frames = stats.frames_total, "frame capture done");
        Ok((run.summary, stats))
    }
}

fn build_thread_pool(threads: Option<usize>) -> AutographResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AutographError::validation(
            "capture threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AutographError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
