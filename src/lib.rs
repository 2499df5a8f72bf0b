#![forbid(unsafe_code)]
//! Animated handwritten-style signatures.
//!
//! A name is turned into a randomized [`StyleDescriptor`], laid out character by character and
//! revealed on a [`Surface`] through the [`SignatureAnimation`] state machine: every character
//! fades in over a few opacity steps, then an underline flourish is swept beneath the text.
//!
//! Drawing is recorded ([`RecordingSurface`]) and rasterized on the CPU ([`CpuRasterizer`]); the
//! result can be exported as a transparent PNG or captured frame by frame ([`FrameCapture`]).

pub mod animation;
pub mod assets;
pub mod config;
pub mod encode;
mod foundation;
pub mod layout;
pub mod render;
pub mod session;
pub mod style;

pub use animation::clock::{Clock, SystemClock, VirtualClock};
pub use animation::events::{FnObserver, NoopObserver, Phase, RenderEvent, RenderObserver};
pub use animation::params::{AnimationTiming, FlourishStyle};
pub use animation::signature::{RenderSummary, SignatureAnimation, render_signature};
pub use assets::fonts::{FontBook, FontFace, TextShaper};
pub use config::SignatureConfig;
pub use encode::png::{download_file_name, encode_png, save_png};
pub use encode::sink::{FrameSink, InMemorySink, PngSequenceSink};
pub use foundation::core::{Affine, Canvas, Point, Rgba8, Vec2};
pub use foundation::error::{AutographError, AutographResult};
pub use layout::measure::{FixedAdvance, GlyphMeasure, measure_text};
pub use layout::placement::{CharacterPlacement, SignatureLayout};
pub use render::backend::FrameRGBA;
pub use render::cpu::CpuRasterizer;
pub use render::display_list::{DrawOp, LineCap, TextAlign, TextBaseline};
pub use render::pipeline::{CaptureStats, CaptureThreading, FrameCapture, RecordedRun, record_run};
pub use render::surface::{DrawState, RecordingSurface, Surface};
pub use session::{GenerateOutcome, ReentryPolicy, SignaturePad};
pub use style::font::{FontSpec, SignatureFont};
pub use style::ink::InkColor;
pub use style::request::RenderRequest;
pub use style::selector::{StyleDescriptor, select_style};
