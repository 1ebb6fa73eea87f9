use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use thiserror::Error;

/// Fonts tried when the template does not name one, roughly "Arial or a
/// metric-compatible substitute" on each platform.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} is not a usable font")]
    Invalid { path: PathBuf },
    #[error("no usable font found (tried {tried} locations)")]
    NotFound { tried: usize },
}

pub fn load_font_file(path: &Path) -> Result<FontArc, FontError> {
    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| FontError::Invalid {
        path: path.to_path_buf(),
    })
}

/// Load the configured font, falling back to well-known system fonts.
pub fn load_font(configured: Option<&Path>) -> Result<FontArc, FontError> {
    if let Some(path) = configured {
        match load_font_file(path) {
            Ok(font) => return Ok(font),
            Err(err) => tracing::warn!("{err}; trying system fonts"),
        }
    }

    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match load_font_file(path) {
            Ok(font) => {
                tracing::debug!(path = %path.display(), "loaded system font");
                return Ok(font);
            }
            Err(err) => tracing::debug!("{err}"),
        }
    }

    Err(FontError::NotFound {
        tried: SYSTEM_FONT_CANDIDATES.len() + usize::from(configured.is_some()),
    })
}

/// Advance width of `text` at `size` pixels, including trailing spaces.
pub fn measure_text(font: &FontArc, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let glyph = scaled.glyph_id(ch);
        if let Some(previous) = previous {
            width += scaled.kern(previous, glyph);
        }
        width += scaled.h_advance(glyph);
        previous = Some(glyph);
    }
    width
}

/// Distance from the top of the line box to the baseline.
pub fn ascent(font: &FontArc, size: f32) -> f32 {
    font.as_scaled(PxScale::from(size)).ascent()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configured_font_is_reported() {
        let result = load_font_file(Path::new("/no/such/font.ttf"));
        assert!(matches!(result, Err(FontError::Io { .. })));
    }

    #[test]
    fn test_garbage_font_is_invalid() {
        let path = std::env::temp_dir().join(format!("ad-font-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let result = load_font_file(&path);
        assert!(matches!(result, Err(FontError::Invalid { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_measure_grows_with_text() {
        // Only meaningful where a system font is installed.
        let Ok(font) = load_font(None) else {
            return;
        };
        let short = measure_text(&font, 30.0, "Hello");
        let long = measure_text(&font, 30.0, "Hello world");
        assert!(short > 0.0);
        assert!(long > short);
        assert!(measure_text(&font, 30.0, "Hello ") > short);
    }
}
