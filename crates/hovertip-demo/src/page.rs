#![forbid(unsafe_code)]

//! The demo page: two buttons near the top edge, each with a tooltip that
//! does not fit above it.

use hovertip_core::geometry::{AnchorRect, Px, Size, Translation};
use hovertip_harness::{FlickerReport, Scenario, detect_flicker};
use hovertip_render::content::{Content, ContentMetrics};
use hovertip_render::frame::FrameLog;
use hovertip_render::style::ContainerStyle;
use hovertip_runtime::{MeasurementTiming, RuntimeConfig};
use tracing::info;

pub const BUTTON_TEXT: &str = "Hover over me (tooltip above)";

pub const TOOLTIP_LINES: [&str; 2] = [
    "This tooltip does not fit above the button.",
    "This is why it's displayed below instead!",
];

/// Viewport used when no config file is given.
pub const DEMO_VIEWPORT: Size = Size::new(720, 120);

const MARGIN: Px = 16;

/// Bounds of the left and right buttons.
#[must_use]
pub fn button_bounds(metrics: &ContentMetrics) -> [AnchorRect; 2] {
    let size = Content::text(BUTTON_TEXT).layout(metrics);
    let left = AnchorRect::from_origin_size(MARGIN, MARGIN, size.width, size.height);
    let right = AnchorRect::from_origin_size(
        left.right + MARGIN * 2,
        MARGIN,
        size.width,
        size.height,
    );
    [left, right]
}

/// Outcome of one scripted pass over the page.
#[derive(Debug, Clone)]
pub struct PageRun {
    pub title: String,
    pub timings: [MeasurementTiming; 2],
    pub frames: FrameLog,
    pub flicker: FlickerReport,
}

/// Hover the left button, then the right one, then leave the page.
#[must_use]
pub fn run_page(config: &RuntimeConfig, timings: [MeasurementTiming; 2]) -> PageRun {
    let title = format!("left={} right={}", timings[0], timings[1]);
    info!(
        target: "hovertip.demo",
        %title,
        latency_ms = config.render_latency_ms,
        "running page"
    );

    let mut sc = Scenario::new(config.clone());
    let bounds = button_bounds(&config.content);

    for (side, rect) in ["left", "right"].into_iter().zip(bounds) {
        // Painted scenery only; hover is routed by the trigger's hit region.
        sc.runtime().root().mount(
            format!("button:{side}"),
            Content::text(BUTTON_TEXT),
            ContainerStyle::overlay(Translation::new(rect.left, rect.top)),
        );
    }

    let content = Content::from_lines(TOOLTIP_LINES);
    let left = sc.add_tooltip_with("left", bounds[0], content.clone(), Some(timings[0]));
    let right = sc.add_tooltip_with("right", bounds[1], content, Some(timings[1]));

    sc.settle();
    sc.hover(&left);
    sc.settle();
    sc.hover(&right);
    sc.settle();
    sc.leave();
    sc.settle();

    let frames = sc.frames().clone();
    let flicker = detect_flicker(&frames);
    info!(target: "hovertip.demo", %title, summary = %flicker.summary(), "page done");
    PageRun {
        title,
        timings,
        frames,
        flicker,
    }
}
