use std::path::PathBuf;
use std::time::Duration;

/// Resolved run configuration (command line layered over `Settings`)
#[derive(Clone, Debug)]
pub struct LifeConfig {
    pub generations: u32,
    pub delay: Duration,
    pub fraction: f64,
    pub seed: u64,
    pub prefer_text: bool,
    pub rows: Option<u16>,
    pub cols: Option<u16>,
    pub fallback_size: (u16, u16),  // rows, cols when no terminal is attached
    pub glyph: char,
    pub device: PathBuf,
    pub color: u32,
}
