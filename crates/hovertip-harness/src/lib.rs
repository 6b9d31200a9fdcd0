#![forbid(unsafe_code)]

//! Test harness for hovertip.
//!
//! - [`Scenario`] wires triggers and tooltips into a runtime and drives the
//!   pointer, so tests read like user interactions.
//! - [`detect_flicker`] scans a painted timeline for containers that jumped
//!   between consecutive frames.
//! - [`frame_checksum`] digests painted frames for determinism checks.
//! - [`timeline`] renders a frame log as JSONL for CI and the demo.

pub mod checksum;
pub mod flicker;
pub mod scenario;
pub mod timeline;

pub use checksum::{frame_checksum, timeline_checksums};
pub use flicker::{FlickerReport, Jump, assert_flicker_free, detect_flicker};
pub use scenario::{Scenario, TooltipHandle};
pub use timeline::{FrameRecord, LayerRecord, write_jsonl};
