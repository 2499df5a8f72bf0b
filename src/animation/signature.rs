use std::time::Duration;

use crate::animation::clock::Clock;
use crate::animation::events::{Phase, RenderEvent, RenderObserver};
use crate::animation::params::{AnimationTiming, FlourishStyle};
use crate::layout::flourish::FlourishGeometry;
use crate::layout::placement::SignatureLayout;
use crate::render::display_list::{LineCap, TextAlign, TextBaseline};
use crate::render::surface::Surface;
use crate::style::request::RenderRequest;
use crate::style::selector::StyleDescriptor;

/// Widths closer than this are treated as the same measurement.
const WIDTH_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cue {
    Start,
    CharacterDelay(usize),
    Fade { index: usize, step: u32 },
    FinishCharacter(usize),
    FlourishPause,
    Flourish(u32),
    FinishFlourish,
    Done,
    Cancelled,
}

/// Outcome of one render invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
    /// Sum of all scheduled waits.
    pub elapsed: Duration,
    pub characters: usize,
    /// Width used for centering.
    pub text_width: f64,
    /// Width re-measured for the flourish, if it started.
    pub flourish_width: Option<f64>,
    pub cancelled: bool,
}

/// One signature reveal: clear, fade characters in one by one, then sweep the flourish.
///
/// State advances only through [`SignatureAnimation::step`]; nothing happens between calls, so
/// pausing is simply not stepping.
#[derive(Clone, Debug)]
pub struct SignatureAnimation {
    request: RenderRequest,
    chars: Vec<char>,
    style: StyleDescriptor,
    timing: AnimationTiming,
    flourish: FlourishStyle,
    cue: Cue,
    layout: Option<SignatureLayout>,
    geometry: Option<FlourishGeometry>,
    flourish_width: Option<f64>,
    elapsed: Duration,
    total: Duration,
    open_saves: usize,
}

impl SignatureAnimation {
    pub fn new(
        request: RenderRequest,
        style: StyleDescriptor,
        timing: AnimationTiming,
        flourish: FlourishStyle,
    ) -> Self {
        let chars: Vec<char> = request.text().chars().collect();
        let total = timing.total_duration(chars.len());
        Self {
            request,
            chars,
            style,
            timing,
            flourish,
            cue: Cue::Start,
            layout: None,
            geometry: None,
            flourish_width: None,
            elapsed: Duration::ZERO,
            total,
            open_saves: 0,
        }
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    /// Layout computed when the surface was cleared.
    pub fn layout(&self) -> Option<&SignatureLayout> {
        self.layout.as_ref()
    }

    pub fn flourish_geometry(&self) -> Option<&FlourishGeometry> {
        self.geometry.as_ref()
    }

    /// Time scheduled so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Scheduled length of the complete animation.
    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.cue, Cue::Done | Cue::Cancelled)
    }

    /// Started and not yet finished.
    pub fn is_in_flight(&self) -> bool {
        !matches!(self.cue, Cue::Start) && !self.is_finished()
    }

    pub fn phase(&self) -> Phase {
        match self.cue {
            Cue::Start => Phase::Idle,
            Cue::CharacterDelay(index)
            | Cue::Fade { index, .. }
            | Cue::FinishCharacter(index) => Phase::DrawingCharacters { index },
            Cue::FlourishPause => Phase::DrawingCharacters {
                index: self.chars.len().saturating_sub(1),
            },
            Cue::Flourish(step) => Phase::Flourishing { step },
            Cue::FinishFlourish => Phase::Flourishing {
                step: self.timing.flourish_steps,
            },
            Cue::Done => Phase::Done,
            Cue::Cancelled => Phase::Cancelled,
        }
    }

    pub fn summary(&self) -> RenderSummary {
        RenderSummary {
            elapsed: self.elapsed,
            characters: self.chars.len(),
            text_width: self.layout.as_ref().map_or(0.0, |l| l.text_width),
            flourish_width: self.flourish_width,
            cancelled: matches!(self.cue, Cue::Cancelled),
        }
    }

    /// Perform everything due now and return the wait before the next call.
    ///
    /// Returns `None` once the animation is done or cancelled.
    pub fn step<S, O>(&mut self, surface: &mut S, observer: &mut O) -> Option<Duration>
    where
        S: Surface + ?Sized,
        O: RenderObserver + ?Sized,
    {
        let wait = self.advance(surface, observer)?;
        self.elapsed += wait;
        observer.on_event(&RenderEvent::Progress {
            elapsed: self.elapsed,
            total: self.total,
        });
        Some(wait)
    }

    /// Drive to completion, sleeping on `clock` between steps.
    pub fn run<S, C, O>(&mut self, surface: &mut S, clock: &mut C, observer: &mut O) -> RenderSummary
    where
        S: Surface + ?Sized,
        C: Clock + ?Sized,
        O: RenderObserver + ?Sized,
    {
        while let Some(wait) = self.step(surface, observer) {
            clock.sleep(wait);
        }
        self.summary()
    }

    /// Stop where we are. Pending saved states are unwound; drawn pixels stay.
    pub fn cancel<S, O>(&mut self, surface: &mut S, observer: &mut O)
    where
        S: Surface + ?Sized,
        O: RenderObserver + ?Sized,
    {
        if self.is_finished() {
            return;
        }
        for _ in 0..self.open_saves {
            surface.restore();
        }
        self.open_saves = 0;
        self.cue = Cue::Cancelled;
        tracing::debug!(elapsed = ?self.elapsed, "signature animation cancelled");
        observer.on_event(&RenderEvent::Cancelled {
            elapsed: self.elapsed,
        });
    }

    fn advance<S, O>(&mut self, surface: &mut S, observer: &mut O) -> Option<Duration>
    where
        S: Surface + ?Sized,
        O: RenderObserver + ?Sized,
    {
        loop {
            match self.cue {
                Cue::Start => {
                    self.begin(surface, observer);
                    self.enter_character(0, observer);
                }
                Cue::CharacterDelay(index) => {
                    self.cue = Cue::Fade { index, step: 0 };
                    return Some(self.timing.char_delay());
                }
                Cue::Fade { index, step } => {
                    let placement = self.layout.as_ref()?.placements[index];
                    let steps = self.timing.fade_step_count();
                    surface.state_mut().global_alpha = step as f32 / steps as f32;
                    surface.fill_char(placement.ch, (placement.x, self.baseline()).into());
                    self.cue = if step + 1 < steps {
                        Cue::Fade {
                            index,
                            step: step + 1,
                        }
                    } else {
                        Cue::FinishCharacter(index)
                    };
                    return Some(self.timing.fade_step_delay());
                }
                Cue::FinishCharacter(index) => {
                    surface.state_mut().global_alpha = 1.0;
                    let placement = self.layout.as_ref()?.placements[index];
                    observer.on_event(&RenderEvent::CharacterRevealed {
                        index,
                        ch: placement.ch,
                        x: placement.x,
                        at: self.elapsed,
                    });
                    if index + 1 < self.chars.len() {
                        self.enter_character(index + 1, observer);
                    } else {
                        self.pop_state(surface);
                        self.cue = Cue::FlourishPause;
                    }
                }
                Cue::FlourishPause => {
                    self.cue = Cue::Flourish(0);
                    return Some(self.timing.flourish_pause());
                }
                Cue::Flourish(step) => {
                    if step == 0 {
                        self.begin_flourish(surface, observer);
                    }
                    let geometry = self.geometry?;
                    surface.stroke_line(geometry.start, geometry.point_at(step));
                    self.cue = if step < geometry.steps {
                        Cue::Flourish(step + 1)
                    } else {
                        Cue::FinishFlourish
                    };
                    return Some(self.timing.flourish_step_delay());
                }
                Cue::FinishFlourish => {
                    surface.state_mut().global_alpha = 1.0;
                    self.pop_state(surface);
                    self.cue = Cue::Done;
                    tracing::info!(
                        name = %self.request,
                        elapsed_ms = self.elapsed.as_millis() as u64,
                        "signature rendered"
                    );
                    observer.on_event(&RenderEvent::PhaseChanged {
                        phase: Phase::Done,
                        at: self.elapsed,
                    });
                    observer.on_event(&RenderEvent::Completed {
                        elapsed: self.elapsed,
                        characters: self.chars.len(),
                    });
                    return None;
                }
                Cue::Done | Cue::Cancelled => return None,
            }
        }
    }

    #[tracing::instrument(skip_all, fields(name = %self.request, font = %self.style.font))]
    fn begin<S, O>(&mut self, surface: &mut S, observer: &mut O)
    where
        S: Surface + ?Sized,
        O: RenderObserver + ?Sized,
    {
        observer.on_event(&RenderEvent::Started {
            text: self.request.text().to_owned(),
            style: self.style.clone(),
            total: self.total,
        });
        observer.on_event(&RenderEvent::PhaseChanged {
            phase: Phase::Clearing,
            at: self.elapsed,
        });

        surface.clear();
        let ink = self.style.ink.rgba();
        {
            let s = surface.state_mut();
            s.font = self.style.font_spec();
            s.text_align = TextAlign::Center;
            s.text_baseline = TextBaseline::Middle;
            s.fill = ink;
            s.stroke = ink;
        }

        let center = surface.canvas().center();
        self.push_state(surface);
        if self.style.rotation_degrees != 0.0 {
            surface.rotate_about(center, self.style.rotation_degrees);
        }

        let layout = SignatureLayout::compute(
            self.request.text(),
            self.style.letter_spacing,
            center,
            |ch| surface.measure_char(ch),
        );
        tracing::debug!(
            text_width = layout.text_width,
            start_x = layout.start_x,
            "signature layout"
        );
        self.layout = Some(layout);
    }

    fn begin_flourish<S, O>(&mut self, surface: &mut S, observer: &mut O)
    where
        S: Surface + ?Sized,
        O: RenderObserver + ?Sized,
    {
        self.push_state(surface);
        {
            let s = surface.state_mut();
            s.stroke = self.style.ink.rgba();
            s.line_width = self.flourish.line_width;
            s.line_cap = LineCap::Round;
            s.global_alpha = self.flourish.alpha;
        }

        let measured = surface.measure_text(self.request.text(), self.style.letter_spacing);
        let (center, layout_width) = match &self.layout {
            Some(l) => (l.center, l.text_width),
            None => (surface.canvas().center(), measured),
        };
        if (measured - layout_width).abs() > WIDTH_EPSILON {
            tracing::warn!(
                layout_width,
                measured,
                "flourish width differs from centering width"
            );
        }

        self.flourish_width = Some(measured);
        self.geometry = Some(FlourishGeometry::new(
            center,
            measured,
            self.flourish.overhang,
            self.flourish.drop,
            self.timing.flourish_steps,
        ));
        observer.on_event(&RenderEvent::PhaseChanged {
            phase: Phase::Flourishing { step: 0 },
            at: self.elapsed,
        });
        observer.on_event(&RenderEvent::FlourishStarted {
            layout_width,
            measured_width: measured,
            at: self.elapsed,
        });
    }

    fn enter_character<O: RenderObserver + ?Sized>(&mut self, index: usize, observer: &mut O) {
        self.cue = Cue::CharacterDelay(index);
        tracing::trace!(index, "character reveal");
        observer.on_event(&RenderEvent::PhaseChanged {
            phase: Phase::DrawingCharacters { index },
            at: self.elapsed,
        });
    }

    fn baseline(&self) -> f64 {
        self.layout.as_ref().map_or(0.0, SignatureLayout::baseline_y)
    }

    fn push_state<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.save();
        self.open_saves += 1;
    }

    fn pop_state<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.open_saves > 0 {
            surface.restore();
            self.open_saves -= 1;
        }
    }
}

/// Render `request` with `style` on `surface`, sleeping on `clock` until the animation completes.
pub fn render_signature<S, C, O>(
    request: RenderRequest,
    style: StyleDescriptor,
    surface: &mut S,
    clock: &mut C,
    observer: &mut O,
) -> RenderSummary
where
    S: Surface + ?Sized,
    C: Clock + ?Sized,
    O: RenderObserver + ?Sized,
{
    SignatureAnimation::new(
        request,
        style,
        AnimationTiming::default(),
        FlourishStyle::default(),
    )
    .run(surface, clock, observer)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signature.rs"]
mod tests;
