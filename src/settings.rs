use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional user defaults read from `config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub text: TextSettings,
    #[serde(default)]
    pub framebuffer: FramebufferSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub glyph: char,
    pub rows: u16,   // used when the terminal size cannot be queried
    pub cols: u16,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            glyph: 'O',
            rows: 24,
            cols: 80,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FramebufferSettings {
    pub device: PathBuf,
    pub color: u32,  // aarrggbb
}

impl Default for FramebufferSettings {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            color: 0x0000_ff00,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                log::warn!("ignoring {}: {}", path.display(), err);
                Self::default()
            }),
            Err(err) => {
                log::warn!("cannot read {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("torolife")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = Settings::parse("").unwrap();
        assert_eq!(s.text.glyph, 'O');
        assert_eq!((s.text.rows, s.text.cols), (24, 80));
        assert_eq!(s.framebuffer.device, PathBuf::from("/dev/fb0"));
        assert_eq!(s.framebuffer.color, 0x0000_ff00);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let s = Settings::parse(
            r##"
            [text]
            glyph = "#"

            [framebuffer]
            color = 0xffff0000
            "##,
        )
        .unwrap();
        assert_eq!(s.text.glyph, '#');
        assert_eq!(s.text.cols, 80);
        assert_eq!(s.framebuffer.color, 0xffff_0000);
        assert_eq!(s.framebuffer.device, PathBuf::from("/dev/fb0"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Settings::parse("[text]\nglyph = 12").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = Settings::load_from(Path::new("/nonexistent/torolife/config.toml"));
        assert_eq!(s.text.glyph, 'O');
    }
}
