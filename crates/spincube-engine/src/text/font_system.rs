use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned when a font cannot be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(String),

    #[error("no usable font found in {0} candidate path(s)")]
    NotFound(usize),
}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub usize);

/// Owns the loaded fonts. Fonts are immutable after loading.
///
/// The system is owned by the application and passed to the text renderer
/// each frame so new glyphs can be rasterized on demand.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn load_font_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font(&bytes)
    }

    /// Loads the first candidate that exists and parses.
    ///
    /// Failures on individual candidates are logged at debug level.
    pub fn load_first<P: AsRef<Path>>(&mut self, candidates: &[P]) -> Result<FontId, FontLoadError> {
        for path in candidates {
            let path = path.as_ref();
            match self.load_font_file(path) {
                Ok(id) => {
                    log::info!("loaded UI font {}", path.display());
                    return Ok(id);
                }
                Err(e) => log::debug!("font candidate skipped: {e}"),
            }
        }
        Err(FontLoadError::NotFound(candidates.len()))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Measures a single line of text, returning `(width, height)` in logical pixels.
    ///
    /// Unknown fonts measure as zero width with a nominal line height, so
    /// layout still reserves vertical space.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let line_height = size * 1.2;
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, line_height);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        // Pen position after each glyph, not the bitmap edge.
        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let height = layout.height().max(line_height);

        Vec2::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_font_measures_line_height_only() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("Start", FontId(3), 20.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 24.0).abs() < 1e-4);
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut fonts = FontSystem::new();
        assert!(matches!(fonts.load_font(b"not a font"), Err(FontLoadError::Parse(_))));
    }

    #[test]
    fn load_first_reports_missing_candidates() {
        let mut fonts = FontSystem::new();
        let err = fonts
            .load_first(&["/definitely/missing/a.ttf", "/definitely/missing/b.ttf"])
            .unwrap_err();
        assert!(matches!(err, FontLoadError::NotFound(2)));
    }
}
