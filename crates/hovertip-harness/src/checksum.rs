#![forbid(unsafe_code)]

//! BLAKE3 digests of painted frames.
//!
//! The digest covers what an observer sees: the viewport and, per layer, its
//! label, translation, size, pointer behavior, and text. Frame index, paint
//! timestamp, and node ids are excluded, so two runs of the same script
//! produce the same checksums even when wall-clock timing differs.

use hovertip_render::frame::{FrameLog, PaintedFrame};

/// Prefix of every checksum string.
pub const CHECKSUM_PREFIX: &str = "blake3:";

/// Digest of one painted frame, as `blake3:<hex>`.
#[must_use]
pub fn frame_checksum(frame: &PaintedFrame) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&frame.viewport.width.to_le_bytes());
    hasher.update(&frame.viewport.height.to_le_bytes());
    hasher.update(&(frame.layers.len() as u64).to_le_bytes());
    for layer in &frame.layers {
        hasher.update(layer.label.as_bytes());
        hasher.update(&[0]);
        hasher.update(&layer.translation.x.to_le_bytes());
        hasher.update(&layer.translation.y.to_le_bytes());
        hasher.update(&layer.size.width.to_le_bytes());
        hasher.update(&layer.size.height.to_le_bytes());
        hasher.update(&[u8::from(layer.inert)]);
        hasher.update(&(layer.lines.len() as u64).to_le_bytes());
        for line in &layer.lines {
            hasher.update(line.as_bytes());
            hasher.update(&[b'\n']);
        }
    }
    format!("{CHECKSUM_PREFIX}{}", hasher.finalize().to_hex())
}

/// Digest of every frame in the log, in paint order.
#[must_use]
pub fn timeline_checksums(log: &FrameLog) -> Vec<String> {
    log.frames().iter().map(frame_checksum).collect()
}
