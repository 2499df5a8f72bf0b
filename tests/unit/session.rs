use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::animation::clock::VirtualClock;
use crate::animation::events::NoopObserver;
use crate::assets::fonts::FontBook;
use crate::layout::measure::FixedAdvance;

fn pad() -> SignaturePad<FixedAdvance, StdRng> {
    SignaturePad::new(
        Canvas::default(),
        FixedAdvance::default(),
        StdRng::seed_from_u64(11),
    )
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "autograph_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn blank_input_is_rejected_without_touching_the_surface() {
    let mut p = pad();
    let mut events = Vec::new();
    let mut clock = VirtualClock::new();
    let (outcome, summary) = p.render("   ", &mut clock, &mut events);

    assert_eq!(outcome, GenerateOutcome::Rejected);
    assert!(summary.is_none());
    assert_eq!(events, vec![RenderEvent::Rejected]);
    assert_eq!(p.surface().mutation_count(), 0);
    assert_eq!(clock.sleeps(), 0);
    assert!(p.step(&mut NoopObserver).is_none());
}

#[test]
fn render_completes_and_names_the_download() {
    let mut p = pad();
    let mut clock = VirtualClock::new();
    let (outcome, summary) = p.render("  Jane Doe ", &mut clock, &mut NoopObserver);

    assert!(matches!(outcome, GenerateOutcome::Started(_)));
    let summary = summary.unwrap();
    assert_eq!(summary.characters, 8);
    assert_eq!(summary.elapsed, Duration::from_millis(8 * 144 + 368));
    assert!(!p.is_animating());
    assert_eq!(p.last_completed().unwrap().text(), "Jane Doe");
    assert_eq!(p.download_file_name().as_deref(), Some("signature-Jane-Doe.png"));
}

#[test]
fn same_seed_gives_same_style() {
    let mut a = pad();
    let mut b = pad();
    assert_eq!(
        a.generate("Ada", &mut NoopObserver),
        b.generate("Ada", &mut NoopObserver)
    );
}

#[test]
fn cancel_and_restart_replaces_running_animation() {
    let mut p = pad();
    p.generate("First", &mut NoopObserver);
    for _ in 0..5 {
        p.step(&mut NoopObserver);
    }
    assert!(p.is_animating());

    let mut events = Vec::new();
    let outcome = p.generate("Second", &mut events);
    assert!(matches!(outcome, GenerateOutcome::Started(_)));
    assert!(matches!(events.first(), Some(RenderEvent::Cancelled { .. })));
    assert_eq!(p.surface().saved_depth(), 0);
    assert_eq!(p.active().unwrap().request().text(), "Second");

    let summary = p.run(&mut VirtualClock::new(), &mut NoopObserver).unwrap();
    assert!(!summary.cancelled);
    assert_eq!(p.last_completed().unwrap().text(), "Second");
}

#[test]
fn ignore_while_busy_keeps_running_animation() {
    let mut p = pad().with_policy(ReentryPolicy::IgnoreWhileBusy);
    p.generate("First", &mut NoopObserver);
    p.step(&mut NoopObserver);

    let outcome = p.generate("Second", &mut NoopObserver);
    assert_eq!(outcome, GenerateOutcome::Ignored);
    assert_eq!(p.active().unwrap().request().text(), "First");

    p.run(&mut VirtualClock::new(), &mut NoopObserver);
    assert!(matches!(
        p.generate("Second", &mut NoopObserver),
        GenerateOutcome::Started(_)
    ));
}

#[test]
fn cancelled_render_is_not_exportable() {
    let mut p = pad();
    p.generate("Ada", &mut NoopObserver);
    p.step(&mut NoopObserver);
    p.cancel(&mut NoopObserver);
    assert!(!p.is_animating());
    assert!(p.download_file_name().is_none());

    let mut raster = CpuRasterizer::new(Arc::new(FontBook::new()));
    assert!(p.export_png(&mut raster, &temp_dir("no_export")).is_err());
}

#[test]
fn export_is_refused_while_animating() {
    let mut p = pad();
    p.render("Ada", &mut VirtualClock::new(), &mut NoopObserver);
    p.generate("Bob", &mut NoopObserver);
    p.step(&mut NoopObserver);

    let mut raster = CpuRasterizer::new(Arc::new(FontBook::new()));
    let err = p.export_png(&mut raster, &temp_dir("busy")).unwrap_err();
    assert!(err.to_string().contains("still animating"));
}

#[test]
fn export_writes_named_png() {
    let mut p = pad();
    p.render("Jane Doe", &mut VirtualClock::new(), &mut NoopObserver);

    let dir = temp_dir("export");
    let mut raster = CpuRasterizer::new(Arc::new(FontBook::new()));
    let path = p.export_png(&mut raster, &dir).unwrap();
    assert_eq!(path, dir.join("signature-Jane-Doe.png"));

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (800, 300));
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn from_config_applies_policy_and_timing() {
    let cfg = SignatureConfig {
        reentry: ReentryPolicy::IgnoreWhileBusy,
        timing: AnimationTiming {
            char_delay_ms: 10,
            ..AnimationTiming::default()
        },
        ..SignatureConfig::default()
    };
    let mut p =
        SignaturePad::from_config(&cfg, FixedAdvance::default(), StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(p.policy(), ReentryPolicy::IgnoreWhileBusy);
    let (_, summary) = p.render("A", &mut VirtualClock::new(), &mut NoopObserver);
    assert_eq!(summary.unwrap().elapsed, Duration::from_millis(10 + 64 + 368));
}

#[test]
fn cancelling_a_later_render_drops_the_earlier_download_name() {
    let mut p = pad();
    p.render("Alice", &mut VirtualClock::new(), &mut NoopObserver);
    assert_eq!(p.download_file_name().as_deref(), Some("signature-Alice.png"));

    p.generate("Bob", &mut NoopObserver);
    for _ in 0..5 {
        p.step(&mut NoopObserver);
    }
    p.cancel(&mut NoopObserver);

    assert!(!p.is_animating());
    assert!(p.last_completed().is_none());
    assert!(p.download_file_name().is_none());
    let mut raster = CpuRasterizer::new(Arc::new(FontBook::new()));
    let err = p
        .export_png(&mut raster, &temp_dir("cancelled_later"))
        .unwrap_err();
    assert!(err.to_string().contains("no completed signature"));
}

#[test]
fn restart_over_a_running_render_clears_the_download_name_until_it_completes() {
    let mut p = pad();
    p.render("Alice", &mut VirtualClock::new(), &mut NoopObserver);
    p.generate("Bob", &mut NoopObserver);
    p.step(&mut NoopObserver);

    p.generate("Carol", &mut NoopObserver);
    assert!(p.download_file_name().is_none());

    p.run(&mut VirtualClock::new(), &mut NoopObserver);
    assert_eq!(p.download_file_name().as_deref(), Some("signature-Carol.png"));
}

#[test]
fn ignored_request_keeps_the_completed_download_name() {
    let mut p = pad().with_policy(ReentryPolicy::IgnoreWhileBusy);
    p.render("Alice", &mut VirtualClock::new(), &mut NoopObserver);
    p.generate("Bob", &mut NoopObserver);
    p.step(&mut NoopObserver);

    assert_eq!(
        p.generate("Carol", &mut NoopObserver),
        GenerateOutcome::Ignored
    );
    assert!(p.is_animating());
    assert_eq!(p.download_file_name().as_deref(), Some("signature-Alice.png"));

    let mut raster = CpuRasterizer::new(Arc::new(FontBook::new()));
    let err = p.export_png(&mut raster, &temp_dir("ignored")).unwrap_err();
    assert!(err.to_string().contains("still animating"));

    p.run(&mut VirtualClock::new(), &mut NoopObserver);
    assert_eq!(p.download_file_name().as_deref(), Some("signature-Bob.png"));
}

#[test]
fn zero_fade_steps_still_matches_scheduled_total() {
    let mut p = pad().with_timing(AnimationTiming {
        fade_steps: 0,
        ..AnimationTiming::default()
    });
    let mut events = Vec::new();
    let (_, summary) = p.render("Ada", &mut VirtualClock::new(), &mut events);
    let summary = summary.unwrap();

    assert_eq!(summary.elapsed, Duration::from_millis(3 * 88 + 368));
    assert_eq!(summary.elapsed, p.active().unwrap().total());
    let last_total = events.iter().rev().find_map(|e| match e {
        RenderEvent::Progress { total, .. } => Some(*total),
        _ => None,
    });
    assert_eq!(last_total, Some(summary.elapsed));
}
