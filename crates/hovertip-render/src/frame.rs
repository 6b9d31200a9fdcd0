#![forbid(unsafe_code)]

//! Painted frames: what an observer sees after each paint.
//!
//! A [`PaintedFrame`] is an immutable snapshot of the portal root taken at
//! paint time. Mutations committed to the root between paints are never
//! visible on their own; only the state at the next paint is recorded.

use hovertip_core::geometry::{Size, Translation};
use serde::Serialize;
use web_time::Duration;

use crate::portal::NodeId;

/// One mounted container as it was painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintedLayer {
    pub node: NodeId,
    pub label: String,
    pub translation: Translation,
    pub size: Size,
    pub inert: bool,
    pub lines: Vec<String>,
}

/// Snapshot of the portal root at one paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintedFrame {
    /// Monotonic paint counter, starting at 0.
    pub index: u64,
    /// Time since the runtime started.
    pub painted_at: Duration,
    pub viewport: Size,
    /// Layers bottom first.
    pub layers: Vec<PaintedLayer>,
}

impl PaintedFrame {
    /// Layer painted for `node`, if it was mounted.
    #[must_use]
    pub fn layer(&self, node: NodeId) -> Option<&PaintedLayer> {
        self.layers.iter().find(|l| l.node == node)
    }

    /// First layer with the given label.
    #[must_use]
    pub fn layer_by_label(&self, label: &str) -> Option<&PaintedLayer> {
        self.layers.iter().find(|l| l.label == label)
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.layers.is_empty()
    }

    /// Draw the frame onto a character grid.
    ///
    /// Each cell covers `cell_width` x `cell_height` pixels. Layers are drawn
    /// as boxed text, bottom first, clipped to the viewport.
    #[must_use]
    pub fn render_text(&self, cell_width: i32, cell_height: i32) -> String {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let cols = usize::try_from(self.viewport.width / cell_width).unwrap_or(0);
        let rows = usize::try_from(self.viewport.height / cell_height).unwrap_or(0);
        let mut grid = vec![vec![' '; cols]; rows];

        for layer in &self.layers {
            let x0 = layer.translation.x.div_euclid(cell_width);
            let y0 = layer.translation.y.div_euclid(cell_height);
            let w = (layer.size.width / cell_width).max(2);
            let h = (layer.size.height / cell_height).max(2);
            draw_box(&mut grid, x0, y0, w, h);
            let last_row = y0.saturating_add(h - 1);
            let last_col = x0.saturating_add(w - 1);
            for (i, line) in layer.lines.iter().enumerate() {
                let row = y0
                    .saturating_add(1)
                    .saturating_add(i32::try_from(i).unwrap_or(i32::MAX));
                if row >= last_row || row >= i32::try_from(rows).unwrap_or(i32::MAX) {
                    break;
                }
                for (j, ch) in line.chars().enumerate() {
                    let col = x0
                        .saturating_add(1)
                        .saturating_add(i32::try_from(j).unwrap_or(i32::MAX));
                    if col >= last_col || col >= i32::try_from(cols).unwrap_or(i32::MAX) {
                        break;
                    }
                    put(&mut grid, col, row, ch);
                }
            }
        }

        let mut out = String::with_capacity(rows * (cols + 1));
        for row in grid {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn put(grid: &mut [Vec<char>], x: i32, y: i32, ch: char) {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return;
    };
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        *cell = ch;
    }
}

fn draw_box(grid: &mut [Vec<char>], x: i32, y: i32, w: i32, h: i32) {
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    let rows = i32::try_from(grid.len()).unwrap_or(i32::MAX);
    let cols = i32::try_from(grid.first().map_or(0, Vec::len)).unwrap_or(i32::MAX);
    // Only visit cells that land on the grid.
    for row in y.max(0)..=bottom.min(rows - 1) {
        for col in x.max(0)..=right.min(cols - 1) {
            let ch = match (col == x, col == right, row == y, row == bottom) {
                (true, _, true, _) => '┌',
                (_, true, true, _) => '┐',
                (true, _, _, true) => '└',
                (_, true, _, true) => '┘',
                (_, _, true, _) | (_, _, _, true) => '─',
                (true, _, _, _) | (_, true, _, _) => '│',
                _ => ' ',
            };
            put(grid, col, row, ch);
        }
    }
}

/// Ordered record of every painted frame.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    frames: Vec<PaintedFrame>,
}

impl FrameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: PaintedFrame) {
        self.frames.push(frame);
    }

    #[must_use]
    pub fn frames(&self) -> &[PaintedFrame] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&PaintedFrame> {
        self.frames.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Every translation painted for `node`, in paint order.
    #[must_use]
    pub fn translations_of(&self, node: NodeId) -> Vec<Translation> {
        self.frames
            .iter()
            .filter_map(|f| f.layer(node).map(|l| l.translation))
            .collect()
    }

    /// Every translation painted for layers labelled `label`, in paint order.
    #[must_use]
    pub fn translations_by_label(&self, label: &str) -> Vec<Translation> {
        self.frames
            .iter()
            .filter_map(|f| f.layer_by_label(label).map(|l| l.translation))
            .collect()
    }

    /// Frames painted after index `after` (exclusive).
    pub fn since(&self, after: u64) -> impl Iterator<Item = &PaintedFrame> {
        self.frames.iter().filter(move |f| f.index > after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, ContentMetrics};
    use crate::portal::PortalRoot;
    use crate::style::ContainerStyle;

    fn small_root() -> PortalRoot {
        PortalRoot::new(
            Size::new(40, 10),
            ContentMetrics {
                line_height: 1,
                char_width: 1,
                padding_y: 1,
                padding_x: 1,
            },
        )
    }

    #[test]
    fn render_text_draws_boxed_content() {
        let root = small_root();
        root.mount(
            "tip",
            Content::text("hi"),
            ContainerStyle::overlay(Translation::new(2, 1)),
        );
        let text = root.paint(0, Duration::ZERO).render_text(1, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "  ┌──┐");
        assert_eq!(lines[2], "  │hi│");
        assert_eq!(lines[3], "  └──┘");
    }

    #[test]
    fn render_text_clips_offscreen_layers() {
        let root = small_root();
        root.mount(
            "tip",
            Content::text("hello"),
            ContainerStyle::overlay(Translation::new(-3, -1)),
        );
        let text = root.paint(0, Duration::ZERO).render_text(1, 1);
        assert_eq!(text.lines().count(), 10);
        assert!(text.lines().next().unwrap_or_default().starts_with("llo│"));
    }

    #[test]
    fn render_text_survives_extreme_translations() {
        let node = small_root().mount("tip", Content::text("far away"), ContainerStyle::default());
        let layer = |x, y| PaintedLayer {
            node,
            label: "tip".to_owned(),
            translation: Translation::new(x, y),
            size: Size::new(40, 3),
            inert: true,
            lines: vec!["far away".to_owned()],
        };
        let frame = PaintedFrame {
            index: 0,
            painted_at: Duration::ZERO,
            viewport: Size::new(40, 10),
            layers: vec![layer(i32::MAX - 1, i32::MAX - 1), layer(i32::MIN, i32::MIN)],
        };
        let text = frame.render_text(1, 1);
        assert_eq!(text.lines().count(), 10);
        assert!(text.lines().all(str::is_empty));
    }

    #[test]
    fn log_tracks_translations_per_node() {
        let root = small_root();
        let id = root.mount(
            "tip",
            Content::text("x"),
            ContainerStyle::overlay(Translation::new(1, 1)),
        );
        let mut log = FrameLog::new();
        log.push(root.paint(0, Duration::ZERO));
        root.set_transform(id, Translation::new(1, 5)).unwrap();
        log.push(root.paint(1, Duration::from_millis(16)));
        root.unmount(id).unwrap();
        log.push(root.paint(2, Duration::from_millis(32)));

        assert_eq!(
            log.translations_of(id),
            vec![Translation::new(1, 1), Translation::new(1, 5)]
        );
        assert_eq!(log.translations_by_label("tip").len(), 2);
        assert!(log.last().is_some_and(PaintedFrame::is_blank));
        assert_eq!(log.since(0).count(), 2);
    }

    #[test]
    fn frame_serializes_to_json() {
        let root = small_root();
        root.mount("tip", Content::text("x"), ContainerStyle::default());
        let json = serde_json::to_value(root.paint(3, Duration::ZERO)).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["layers"][0]["label"], "tip");
    }
}
