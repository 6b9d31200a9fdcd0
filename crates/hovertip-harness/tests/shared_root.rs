#![forbid(unsafe_code)]

//! Several tooltips sharing one portal root.
//!
//! Run:
//!   cargo test -p hovertip-harness --test shared_root

use hovertip_core::geometry::{AnchorRect, Size, Translation};
use hovertip_harness::{Scenario, detect_flicker, timeline_checksums};
use hovertip_render::content::{Content, ContentMetrics};
use hovertip_render::style::ContainerStyle;
use hovertip_runtime::{MeasurementTiming, RuntimeConfig};
use hovertip_widgets::TooltipState;

fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_content_metrics(ContentMetrics {
        line_height: 22,
        padding_y: 4,
        ..ContentMetrics::default()
    })
}

#[test]
fn instances_manage_their_own_containers() {
    let mut sc = Scenario::new(config());
    let left = sc.add_tooltip_with(
        "left",
        AnchorRect::new(100, 50, 140, 80),
        "left tip",
        Some(MeasurementTiming::PostPaint),
    );
    let right = sc.add_tooltip_with(
        "right",
        AnchorRect::new(300, 50, 340, 80),
        "right tip",
        Some(MeasurementTiming::PrePaint),
    );

    sc.hover(&left);
    sc.settle();
    sc.hover(&right);
    sc.settle();

    assert_eq!(left.state.get(), TooltipState::Hidden);
    assert_eq!(right.state.get(), TooltipState::ShowingMeasured { height: 30 });
    assert_eq!(sc.runtime().root().len(), 1);

    assert_eq!(
        sc.translations(&left),
        vec![Translation::new(100, 50), Translation::new(100, 20)]
    );
    assert_eq!(sc.translations(&right), vec![Translation::new(300, 20)]);

    let report = detect_flicker(sc.frames());
    assert_eq!(report.jumps_for("left").count(), 1);
    assert_eq!(report.jumps_for("right").count(), 0);
}

#[test]
fn removing_one_instance_leaves_the_other_alone() {
    let mut sc = Scenario::new(config());
    let a = sc.add_tooltip("a", AnchorRect::new(100, 50, 140, 80), "a");
    let b = sc.add_tooltip("b", AnchorRect::new(100, 150, 140, 180), "b");

    // Publish both anchors directly; only one pointer can hover.
    a.anchor.set(Some(a.bounds));
    b.anchor.set(Some(b.bounds));
    sc.settle();
    assert_eq!(sc.runtime().root().len(), 2);

    assert!(sc.runtime_mut().remove(a.tooltip));
    assert_eq!(sc.runtime().root().len(), 1);
    assert_eq!(b.state.get(), TooltipState::ShowingMeasured { height: 30 });

    b.anchor.set(Some(AnchorRect::new(100, 160, 140, 190)));
    sc.settle();
    let last = sc.frames().last().unwrap();
    assert!(last.layer_by_label("a").is_none());
    assert_eq!(
        last.layer_by_label("b").map(|l| l.translation),
        Some(Translation::new(100, 130))
    );
}

#[test]
fn interactive_node_blocks_hover_but_tooltips_do_not() {
    let mut sc = Scenario::new(config());
    let h = sc.add_tooltip("tip", AnchorRect::new(100, 50, 140, 80), "tip");
    sc.hover(&h);
    sc.settle();
    assert_eq!(sc.runtime().hovered(), Some(h.trigger));

    sc.runtime().root().mount(
        "modal",
        Content::text("modal"),
        ContainerStyle::interactive(Translation::new(90, 40)),
    );
    let (x, y) = h.center();
    assert!(sc.move_pointer(x, y + 1));
    assert_eq!(sc.runtime().hovered(), None);
    sc.settle();
    assert_eq!(h.state.get(), TooltipState::Hidden);
}

#[test]
fn same_script_same_checksums() {
    let run = || {
        let mut sc = Scenario::new(config().with_measurement_timing(MeasurementTiming::PostPaint));
        let h = sc.add_tooltip("tip", AnchorRect::new(10, 5, 50, 25), "line one\nline two");
        sc.hover(&h);
        sc.settle();
        sc.leave();
        sc.settle();
        timeline_checksums(sc.frames())
    };
    let first = run();
    assert_eq!(first.len(), 3);
    assert_eq!(first, run());
}

#[test]
fn resize_rerenders_without_remounting() {
    let mut sc = Scenario::new(config());
    let h = sc.add_tooltip("tip", AnchorRect::new(100, 50, 140, 80), "tip");
    sc.hover(&h);
    sc.settle();
    let before = sc.runtime().root().node_ids();

    sc.runtime_mut()
        .dispatch(hovertip_core::event::Event::Resize(Size::new(640, 480)));
    sc.settle();
    assert_eq!(sc.runtime().root().node_ids(), before);
    assert_eq!(sc.frames().last().unwrap().viewport, Size::new(640, 480));
}

#[test]
fn removing_a_hovered_trigger_hides_its_tooltip() {
    let mut sc = Scenario::new(config());
    let h = sc.add_tooltip("tip", AnchorRect::new(200, 300, 260, 330), "tip");
    sc.hover(&h);
    sc.settle();
    assert_eq!(sc.runtime().root().len(), 1);

    assert!(sc.runtime_mut().remove(h.trigger));
    sc.settle();
    assert_eq!(h.anchor.get(), None);
    assert_eq!(h.state.get(), TooltipState::Hidden);
    assert!(sc.runtime().root().is_empty());
    assert!(sc.frames().last().unwrap().layer_by_label("tip").is_none());
}
