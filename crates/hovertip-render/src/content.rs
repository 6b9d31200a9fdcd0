#![forbid(unsafe_code)]

//! Opaque overlay content and its deterministic layout.
//!
//! Content is a list of text lines. Its laid-out box is derived from
//! [`ContentMetrics`]: each line contributes `line_height` pixels, vertical
//! padding is added on both edges, and the width follows the widest line's
//! display width.

use hovertip_core::geometry::{Px, Size};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Layout metrics used to size content boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentMetrics {
    /// Pixels per text line.
    pub line_height: Px,
    /// Pixels per display column.
    pub char_width: Px,
    /// Padding above and below the text.
    pub padding_y: Px,
    /// Padding left and right of the text.
    pub padding_x: Px,
}

impl Default for ContentMetrics {
    fn default() -> Self {
        Self {
            line_height: 20,
            char_width: 8,
            padding_y: 4,
            padding_x: 8,
        }
    }
}

/// Renderable payload of an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    lines: Vec<String>,
}

impl Content {
    /// Content from text; `\n` separates lines.
    #[must_use]
    pub fn text(text: impl AsRef<str>) -> Self {
        Self {
            lines: text.as_ref().lines().map(str::to_owned).collect(),
        }
    }

    /// Content from pre-split lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The text lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest line in display columns.
    #[must_use]
    pub fn max_columns(&self) -> usize {
        self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
    }

    /// Lay out the content box.
    ///
    /// Empty content still occupies its padding.
    #[must_use]
    pub fn layout(&self, metrics: &ContentMetrics) -> Size {
        let lines = Px::try_from(self.line_count()).unwrap_or(Px::MAX);
        let cols = Px::try_from(self.max_columns()).unwrap_or(Px::MAX);
        let height = lines
            .saturating_mul(metrics.line_height)
            .saturating_add(metrics.padding_y.saturating_mul(2));
        let width = cols
            .saturating_mul(metrics.char_width)
            .saturating_add(metrics.padding_x.saturating_mul(2));
        Size::new(width, height)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}
