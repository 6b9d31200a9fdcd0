#![forbid(unsafe_code)]

//! JSONL export of painted timelines.
//!
//! One line per painted frame:
//!
//! ```json
//! {"run":"post-paint","frame":1,"painted_at_us":1042,"checksum":"blake3:…","layers":[{"label":"tip","node":1,"x":100,"y":20,"width":40,"height":30,"inert":true,"css":"position: absolute; …"}]}
//! ```

use std::io::{self, Write};

use hovertip_render::frame::{FrameLog, PaintedFrame, PaintedLayer};
use hovertip_render::style::ContainerStyle;
use serde::Serialize;

use crate::checksum::frame_checksum;

/// One painted container in a [`FrameRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerRecord {
    pub label: String,
    pub node: u64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub inert: bool,
    pub css: String,
}

impl From<&PaintedLayer> for LayerRecord {
    fn from(layer: &PaintedLayer) -> Self {
        let style = if layer.inert {
            ContainerStyle::overlay(layer.translation)
        } else {
            ContainerStyle::interactive(layer.translation)
        };
        Self {
            label: layer.label.clone(),
            node: layer.node.get(),
            x: layer.translation.x,
            y: layer.translation.y,
            width: layer.size.width,
            height: layer.size.height,
            inert: layer.inert,
            css: style.css(),
        }
    }
}

/// One JSONL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub run: String,
    pub frame: u64,
    pub painted_at_us: u64,
    pub checksum: String,
    pub layers: Vec<LayerRecord>,
}

impl FrameRecord {
    #[must_use]
    pub fn new(run: &str, frame: &PaintedFrame) -> Self {
        Self {
            run: run.to_owned(),
            frame: frame.index,
            painted_at_us: u64::try_from(frame.painted_at.as_micros()).unwrap_or(u64::MAX),
            checksum: frame_checksum(frame),
            layers: frame.layers.iter().map(LayerRecord::from).collect(),
        }
    }
}

/// Write every frame of `log` as one JSON object per line.
pub fn write_jsonl<W: Write>(out: &mut W, run: &str, log: &FrameLog) -> io::Result<()> {
    for frame in log.frames() {
        serde_json::to_writer(&mut *out, &FrameRecord::new(run, frame))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
