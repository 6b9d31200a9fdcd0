#![forbid(unsafe_code)]

//! Flicker detection over a painted timeline.
//!
//! A jump is a container that was painted in two consecutive frames under
//! the same node id at two different translations. A container that is
//! unmounted and mounted again gets a new node id and is not a jump.
//!
//! Post-paint measurement produces exactly one jump per show cycle whose
//! measured height is non-zero; pre-paint measurement produces none.

use std::fmt;

use hovertip_core::geometry::Translation;
use hovertip_render::frame::FrameLog;
use hovertip_render::portal::NodeId;
use serde::Serialize;

/// One container moving between consecutive painted frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jump {
    pub node: NodeId,
    pub label: String,
    pub from_frame: u64,
    pub to_frame: u64,
    pub from: Translation,
    pub to: Translation,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) frame {} -> {}: ({}, {}) -> ({}, {})",
            self.label,
            self.node,
            self.from_frame,
            self.to_frame,
            self.from.x,
            self.from.y,
            self.to.x,
            self.to.y
        )
    }
}

/// Result of scanning a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlickerReport {
    pub frames_scanned: usize,
    pub jumps: Vec<Jump>,
}

impl FlickerReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.jumps.is_empty()
    }

    /// Jumps of containers labelled `label`.
    pub fn jumps_for<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Jump> + 'a {
        self.jumps.iter().filter(move |j| j.label == label)
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_clean() {
            format!("CLEAN frames={}", self.frames_scanned)
        } else {
            format!(
                "FLICKER frames={} jumps={}",
                self.frames_scanned,
                self.jumps.len()
            )
        }
    }
}

/// Scan every pair of consecutive painted frames for jumps.
#[must_use]
pub fn detect_flicker(log: &FrameLog) -> FlickerReport {
    let frames = log.frames();
    let mut jumps = Vec::new();
    for pair in frames.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        for layer in &next.layers {
            let Some(before) = prev.layer(layer.node) else {
                continue;
            };
            if before.translation != layer.translation {
                jumps.push(Jump {
                    node: layer.node,
                    label: layer.label.clone(),
                    from_frame: prev.index,
                    to_frame: next.index,
                    from: before.translation,
                    to: layer.translation,
                });
            }
        }
    }
    FlickerReport {
        frames_scanned: frames.len(),
        jumps,
    }
}

/// Panic with every jump listed if the timeline is not flicker-free.
///
/// # Panics
///
/// Panics when [`detect_flicker`] reports at least one jump.
pub fn assert_flicker_free(log: &FrameLog) {
    let report = detect_flicker(log);
    if !report.is_clean() {
        let details: Vec<String> = report.jumps.iter().map(ToString::to_string).collect();
        panic!("{}\n  {}", report.summary(), details.join("\n  "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hovertip_core::geometry::Size;
    use hovertip_render::content::{Content, ContentMetrics};
    use hovertip_render::portal::PortalRoot;
    use hovertip_render::style::ContainerStyle;
    use web_time::Duration;

    fn root() -> PortalRoot {
        PortalRoot::new(Size::new(200, 100), ContentMetrics::default())
    }

    #[test]
    fn moved_node_is_a_jump() {
        let root = root();
        let mut log = FrameLog::new();
        let id = root.mount("t", Content::text("x"), ContainerStyle::overlay(Translation::new(5, 50)));
        log.push(root.paint(0, Duration::ZERO));
        root.set_transform(id, Translation::new(5, 20)).unwrap();
        log.push(root.paint(1, Duration::ZERO));

        let report = detect_flicker(&log);
        assert_eq!(report.jumps.len(), 1);
        let jump = &report.jumps[0];
        assert_eq!((jump.from.y, jump.to.y), (50, 20));
        assert_eq!(report.jumps_for("t").count(), 1);
        assert!(report.summary().starts_with("FLICKER"));
    }

    #[test]
    fn remount_is_not_a_jump() {
        let root = root();
        let mut log = FrameLog::new();
        let id = root.mount("t", Content::text("x"), ContainerStyle::overlay(Translation::new(5, 50)));
        log.push(root.paint(0, Duration::ZERO));
        root.unmount(id).unwrap();
        root.mount("t", Content::text("x"), ContainerStyle::overlay(Translation::new(5, 20)));
        log.push(root.paint(1, Duration::ZERO));
        assert_flicker_free(&log);
    }

    #[test]
    #[should_panic(expected = "FLICKER")]
    fn assert_panics_on_jump() {
        let root = root();
        let mut log = FrameLog::new();
        let id = root.mount("t", Content::text("x"), ContainerStyle::overlay(Translation::ORIGIN));
        log.push(root.paint(0, Duration::ZERO));
        root.set_transform(id, Translation::new(1, 1)).unwrap();
        log.push(root.paint(1, Duration::ZERO));
        assert_flicker_free(&log);
    }

    #[test]
    fn empty_log_is_clean() {
        let report = detect_flicker(&FrameLog::new());
        assert!(report.is_clean());
        assert_eq!(report.summary(), "CLEAN frames=0");
    }
}
