#![forbid(unsafe_code)]

use hovertip_runtime::ConfigError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("flicker detected: {jumps} container jump(s)")]
    FlickerDetected { jumps: usize },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 1,
            Self::FlickerDetected { .. } => 3,
        }
    }
}
