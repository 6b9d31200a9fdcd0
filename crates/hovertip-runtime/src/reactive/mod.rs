#![forbid(unsafe_code)]

//! Reactive state shared between components.
//!
//! A trigger publishes its anchor rectangle through an [`Observable`]; the
//! tooltip that reads it subscribes and invalidates itself on change, so it
//! always renders from the latest value no matter how often it toggles.

pub mod observable;

pub use observable::{Observable, Subscription};
