#![forbid(unsafe_code)]

//! End-to-end positioning checks driven through pointer input.
//!
//! Every assertion reads painted frames only, the way a user would see them.
//!
//! Run:
//!   cargo test -p hovertip-harness --test positioning_properties

use hovertip_core::geometry::{AnchorRect, Px, Translation};
use hovertip_harness::{Scenario, assert_flicker_free, detect_flicker};
use hovertip_render::content::ContentMetrics;
use hovertip_runtime::{MeasurementTiming, RuntimeConfig};
use hovertip_widgets::TooltipState;

const BUTTON: AnchorRect = AnchorRect::new(100, 50, 140, 80);

/// Metrics giving a one-line content box exactly `height` pixels tall.
fn one_line_of(height: Px) -> ContentMetrics {
    ContentMetrics {
        line_height: height - 8,
        padding_y: 4,
        ..ContentMetrics::default()
    }
}

fn scenario(timing: MeasurementTiming, content_height: Px) -> Scenario {
    Scenario::new(
        RuntimeConfig::default()
            .with_measurement_timing(timing)
            .with_content_metrics(one_line_of(content_height)),
    )
}

#[test]
fn nothing_is_mounted_without_an_anchor() {
    for timing in [MeasurementTiming::PostPaint, MeasurementTiming::PrePaint] {
        let mut sc = scenario(timing, 30);
        let h = sc.add_tooltip("tip", BUTTON, "content");
        sc.settle();
        sc.move_pointer(5, 5);
        sc.settle();
        assert!(sc.runtime().root().is_empty());
        assert!(sc.timeline(&h).iter().all(Option::is_none));
    }
}

#[test]
fn post_paint_shows_one_jump_before_settling() {
    let mut sc = scenario(MeasurementTiming::PostPaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    sc.settle();
    sc.hover(&h);
    sc.settle();

    assert_eq!(
        sc.timeline(&h),
        vec![
            None,
            Some(Translation::new(100, 50)),
            Some(Translation::new(100, 20)),
        ]
    );
    let report = detect_flicker(sc.frames());
    assert_eq!(report.jumps.len(), 1);
    assert_eq!(report.jumps[0].from.y, 50);
    assert_eq!(report.jumps[0].to.y, 20);
}

#[test]
fn pre_paint_only_ever_paints_the_corrected_position() {
    let mut sc = scenario(MeasurementTiming::PrePaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    sc.settle();
    sc.hover(&h);
    sc.settle();

    assert_eq!(sc.translations(&h), vec![Translation::new(100, 20)]);
    assert_flicker_free(sc.frames());
}

#[test]
fn unmeasured_frame_sits_on_anchor_top() {
    let mut sc = scenario(MeasurementTiming::PostPaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    sc.settle();
    sc.hover(&h);
    sc.step();
    assert_eq!(h.state.get(), TooltipState::ShowingUnmeasured);
    assert_eq!(sc.translations(&h).last(), Some(&Translation::new(100, 50)));
}

#[test]
fn steady_state_is_identical_for_both_timings() {
    let settled: Vec<Translation> = [MeasurementTiming::PostPaint, MeasurementTiming::PrePaint]
        .into_iter()
        .map(|timing| {
            let mut sc = scenario(timing, 30);
            let h = sc.add_tooltip("tip", BUTTON, "content");
            sc.hover(&h);
            sc.settle();
            assert_eq!(h.state.get(), TooltipState::ShowingMeasured { height: 30 });
            *sc.translations(&h).last().unwrap()
        })
        .collect();
    assert_eq!(settled[0], settled[1]);
}

#[test]
fn too_tall_near_the_top_flips_below() {
    let mut sc = scenario(MeasurementTiming::PrePaint, 40);
    let h = sc.add_tooltip("tip", AnchorRect::new(10, 5, 50, 25), "content");
    sc.hover(&h);
    sc.settle();
    assert_eq!(sc.translations(&h), vec![Translation::new(10, 25)]);
}

#[test]
fn room_above_places_above() {
    let mut sc = scenario(MeasurementTiming::PrePaint, 20);
    let h = sc.add_tooltip("tip", AnchorRect::new(200, 300, 260, 330), "content");
    sc.hover(&h);
    sc.settle();
    assert_eq!(sc.translations(&h), vec![Translation::new(200, 280)]);
}

#[test]
fn leaving_before_measurement_never_repositions() {
    let mut sc = scenario(MeasurementTiming::PostPaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    sc.settle();
    sc.hover(&h);
    sc.step();
    assert_eq!(sc.runtime().pending_post_paint(), 1);

    sc.leave();
    let report = sc.step();
    assert_eq!(report.discarded, 1);
    sc.settle();

    assert!(sc.runtime().root().is_empty());
    assert_eq!(h.state.get(), TooltipState::Hidden);
    assert_eq!(sc.translations(&h), vec![Translation::new(100, 50)]);
}

#[test]
fn every_reshow_measures_from_scratch() {
    let mut sc = scenario(MeasurementTiming::PostPaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    for _ in 0..3 {
        sc.hover(&h);
        sc.settle();
        sc.leave();
        sc.settle();
    }
    let ys: Vec<Px> = sc.translations(&h).iter().map(|t| t.y).collect();
    assert_eq!(ys, vec![50, 20, 50, 20, 50, 20]);
    assert_eq!(detect_flicker(sc.frames()).jumps.len(), 3);
}

#[test]
fn unmeasured_overlay_does_not_steal_hover() {
    let mut sc = scenario(MeasurementTiming::PostPaint, 30);
    let h = sc.add_tooltip("tip", BUTTON, "content");
    sc.hover(&h);
    sc.step();
    // The height-0 container now covers the trigger's own center.
    let (x, y) = h.center();
    assert!(sc.runtime().root().hit_test(x, y).is_none());
    assert!(!sc.move_pointer(x + 1, y));
    assert_eq!(sc.runtime().hovered(), Some(h.trigger));
    sc.settle();
    assert_eq!(h.anchor.get(), Some(BUTTON));
}
