use std::io;
use thiserror::Error;

/// Everything that can stop a session. The core computations themselves
/// can't fail; errors come from bad configuration or from the devices.
#[derive(Debug, Error)]
pub enum QixError {
    /// invalid settings; the session never starts
    #[error("invalid configuration: {0}")]
    Config(String),

    /// display or input device failed; fatal to the session
    #[error("device error: {0}")]
    Device(#[from] io::Error),
}
