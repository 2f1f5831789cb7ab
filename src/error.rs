use std::io;
use thiserror::Error;

/// Fatal conditions raised by the output adapters.
///
/// The simulation core itself never fails; everything here comes from the
/// terminal or the framebuffer device.
#[derive(Debug, Error)]
pub enum Error {
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot query framebuffer screen info: {0}")]
    ScreenInfo(#[source] io::Error),

    #[error("cannot map framebuffer memory: {0}")]
    Map(#[source] io::Error),

    #[error("unsupported framebuffer depth: {bits} bits per pixel (need 32)")]
    UnsupportedDepth { bits: u32 },

    #[error("output device reports an empty {rows}x{cols} screen")]
    DeviceSize { rows: usize, cols: usize },
}

impl Error {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ScreenInfo(_) => 3,
            Error::Map(_) => 4,
            Error::UnsupportedDepth { .. } => 5,
            Error::Io(_) | Error::DeviceSize { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
