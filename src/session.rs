use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rand::Rng;

use crate::{
    animation::clock::Clock,
    animation::events::{RenderEvent, RenderObserver},
    animation::params::{AnimationTiming, FlourishStyle},
    animation::signature::{RenderSummary, SignatureAnimation},
    config::SignatureConfig,
    encode::png::{download_file_name, save_png},
    foundation::core::Canvas,
    foundation::error::{AutographError, AutographResult},
    layout::measure::GlyphMeasure,
    render::backend::FrameRGBA,
    render::cpu::CpuRasterizer,
    render::surface::{RecordingSurface, Surface},
    style::request::RenderRequest,
    style::selector::{StyleDescriptor, select_style},
};

/// What happens when a new name arrives while a signature is still animating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Stop the running animation and start the new one.
    #[default]
    CancelAndRestart,
    /// Drop the new request until the current animation finishes.
    IgnoreWhileBusy,
}

/// Result of [`SignaturePad::generate`].
#[derive(Clone, Debug, PartialEq)]
pub enum GenerateOutcome {
    /// Blank input; nothing was drawn.
    Rejected,
    Started(StyleDescriptor),
    /// Busy and the policy is [`ReentryPolicy::IgnoreWhileBusy`].
    Ignored,
}

/// A drawing surface plus everything needed to turn names into animated signatures.
pub struct SignaturePad<M, R> {
    surface: RecordingSurface<M>,
    rng: R,
    timing: AnimationTiming,
    flourish: FlourishStyle,
    policy: ReentryPolicy,
    active: Option<SignatureAnimation>,
    completed: Option<RenderRequest>,
}

impl<M: GlyphMeasure, R: Rng> SignaturePad<M, R> {
    pub fn new(canvas: Canvas, measure: M, rng: R) -> Self {
        Self {
            surface: RecordingSurface::new(canvas, measure),
            rng,
            timing: AnimationTiming::default(),
            flourish: FlourishStyle::default(),
            policy: ReentryPolicy::default(),
            active: None,
            completed: None,
        }
    }

    pub fn from_config(config: &SignatureConfig, measure: M, rng: R) -> AutographResult<Self> {
        config.validate()?;
        Ok(Self::new(config.canvas, measure, rng)
            .with_timing(config.timing)
            .with_flourish(config.flourish)
            .with_policy(config.reentry))
    }

    pub fn with_timing(mut self, timing: AnimationTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_flourish(mut self, flourish: FlourishStyle) -> Self {
        self.flourish = flourish;
        self
    }

    pub fn with_policy(mut self, policy: ReentryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ReentryPolicy {
        self.policy
    }

    pub fn surface(&self) -> &RecordingSurface<M> {
        &self.surface
    }

    pub fn active(&self) -> Option<&SignatureAnimation> {
        self.active.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.is_finished())
    }

    /// Name of the last signature that finished animating. Cleared when a later render is
    /// cancelled, since the surface then holds a partial drawing.
    pub fn last_completed(&self) -> Option<&RenderRequest> {
        self.completed.as_ref()
    }

    /// Accept a raw name and set up its animation. Nothing is drawn until the pad is stepped.
    pub fn generate<O>(&mut self, raw: &str, observer: &mut O) -> GenerateOutcome
    where
        O: RenderObserver + ?Sized,
    {
        let Some(request) = RenderRequest::new(raw) else {
            tracing::debug!("blank name rejected");
            observer.on_event(&RenderEvent::Rejected);
            return GenerateOutcome::Rejected;
        };

        if self.is_animating() {
            match self.policy {
                ReentryPolicy::IgnoreWhileBusy => {
                    tracing::debug!(name = %request, "busy, request ignored");
                    return GenerateOutcome::Ignored;
                }
                ReentryPolicy::CancelAndRestart => self.cancel(observer),
            }
        }

        self.surface.reset_state();
        let style = select_style(&request, &mut self.rng);
        self.active = Some(SignatureAnimation::new(
            request,
            style.clone(),
            self.timing,
            self.flourish,
        ));
        GenerateOutcome::Started(style)
    }

    /// Advance the active animation by one step; see [`SignatureAnimation::step`].
    pub fn step<O>(&mut self, observer: &mut O) -> Option<Duration>
    where
        O: RenderObserver + ?Sized,
    {
        let animation = self.active.as_mut()?;
        let wait = animation.step(&mut self.surface, observer);
        if wait.is_none() && !animation.summary().cancelled {
            self.completed = Some(animation.request().clone());
        }
        wait
    }

    /// Finish the active animation, sleeping on `clock` between steps.
    pub fn run<C, O>(&mut self, clock: &mut C, observer: &mut O) -> Option<RenderSummary>
    where
        C: Clock + ?Sized,
        O: RenderObserver + ?Sized,
    {
        self.active.as_ref()?;
        while let Some(wait) = self.step(observer) {
            clock.sleep(wait);
        }
        self.active.as_ref().map(SignatureAnimation::summary)
    }

    /// [`Self::generate`] followed by [`Self::run`] when the request started.
    pub fn render<C, O>(
        &mut self,
        raw: &str,
        clock: &mut C,
        observer: &mut O,
    ) -> (GenerateOutcome, Option<RenderSummary>)
    where
        C: Clock + ?Sized,
        O: RenderObserver + ?Sized,
    {
        let outcome = self.generate(raw, observer);
        let summary = match outcome {
            GenerateOutcome::Started(_) => self.run(clock, observer),
            GenerateOutcome::Rejected | GenerateOutcome::Ignored => None,
        };
        (outcome, summary)
    }

    pub fn cancel<O>(&mut self, observer: &mut O)
    where
        O: RenderObserver + ?Sized,
    {
        if let Some(animation) = self.active.as_mut()
            && !animation.is_finished()
        {
            animation.cancel(&mut self.surface, observer);
            self.completed = None;
        }
    }

    /// Current pixels of the surface.
    pub fn snapshot(&self, raster: &mut CpuRasterizer) -> AutographResult<FrameRGBA> {
        raster.rasterize(self.surface.display_list(), self.surface.canvas())
    }

    /// File name for the last completed signature.
    pub fn download_file_name(&self) -> Option<String> {
        self.completed.as_ref().map(download_file_name)
    }

    /// Save the finished signature as `dir/signature-<name>.png`.
    pub fn export_png(&self, raster: &mut CpuRasterizer, dir: &Path) -> AutographResult<PathBuf> {
        if self.is_animating() {
            return Err(AutographError::validation(
                "signature is still animating, nothing to export yet",
            ));
        }
        let name = self
            .download_file_name()
            .ok_or_else(|| AutographError::validation("no completed signature to export"))?;
        let path = dir.join(name);
        self.export_png_to(raster, &path)?;
        Ok(path)
    }

    /// Save the current surface to an explicit path.
    pub fn export_png_to(&self, raster: &mut CpuRasterizer, path: &Path) -> AutographResult<()> {
        let frame = self.snapshot(raster)?;
        save_png(&frame, path)?;
        tracing::info!(path = %path.display(), "signature exported");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
