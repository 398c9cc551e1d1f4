//! # Fonts
//!
//! TrueType fonts are looked up once, when a renderer is constructed. If a
//! font can not be found or parsed, the built-in face takes its place, so
//! drawing never has to deal with missing fonts.

use std::{
    fs::DirEntry,
    path::{Path, PathBuf},
};

use fontdue::{Font, FontSettings};
use log::{debug, warn};

use crate::style::{FontSources, Metrics};

/// A rasterized glyph
///
/// `coverage` holds `width * height` bytes, row by row, top to bottom.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Offset of the bitmap's left edge from the pen position
    pub xmin: i32,
    /// Offset of the bitmap's bottom edge from the baseline (up is positive)
    pub ymin: i32,
    /// Bitmap width
    pub width: usize,
    /// Bitmap height
    pub height: usize,
    /// Horizontal pen advance
    pub advance: f32,
    /// Ink coverage, 0 (none) to 255 (full)
    pub coverage: Vec<u8>,
}

/// A font at a fixed pixel size
#[derive(Clone)]
pub enum Face {
    /// A TrueType/OpenType font
    TrueType {
        /// Where the font was loaded from
        path: PathBuf,
        /// The parsed font
        font: Font,
        /// Pixel size
        px: f32,
    },
    /// The built-in face, which draws every visible character as a box
    Builtin {
        /// Pixel size
        px: f32,
    },
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::TrueType { path, px, .. } => f
                .debug_struct("TrueType")
                .field("path", path)
                .field("px", px)
                .finish(),
            Face::Builtin { px } => f.debug_struct("Builtin").field("px", px).finish(),
        }
    }
}

impl Face {
    /// The built-in face at `size` pixels
    pub fn builtin(size: u32) -> Self {
        Face::Builtin {
            px: size.max(1) as f32,
        }
    }

    /// Parse font data
    pub fn from_bytes(path: PathBuf, data: Vec<u8>, size: u32) -> Option<Self> {
        let px = size.max(1) as f32;
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        match Font::from_bytes(data, settings) {
            Ok(font) => Some(Face::TrueType { path, font, px }),
            Err(e) => {
                debug!("Failed to parse font '{}': {}", path.display(), e);
                None
            }
        }
    }

    /// The same font at a different size
    pub fn with_size(&self, size: u32) -> Self {
        let px = size.max(1) as f32;
        match self {
            Face::TrueType { path, font, .. } => Face::TrueType {
                path: path.clone(),
                font: font.clone(),
                px,
            },
            Face::Builtin { .. } => Face::Builtin { px },
        }
    }

    /// Whether this is the built-in face
    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Builtin { .. })
    }

    /// Pixel size
    pub fn px(&self) -> f32 {
        match self {
            Face::TrueType { px, .. } | Face::Builtin { px } => *px,
        }
    }

    /// Distance from the top of a line to the baseline
    pub fn ascent(&self) -> f32 {
        match self {
            Face::TrueType { font, px, .. } => font
                .horizontal_line_metrics(*px)
                .map(|lm| lm.ascent)
                .unwrap_or(*px * 0.8),
            Face::Builtin { px } => *px * 0.8,
        }
    }

    /// Distance from the baseline to the bottom of a line (negative)
    pub fn descent(&self) -> f32 {
        match self {
            Face::TrueType { font, px, .. } => font
                .horizontal_line_metrics(*px)
                .map(|lm| lm.descent)
                .unwrap_or(*px * -0.2),
            Face::Builtin { px } => *px * -0.2,
        }
    }

    /// Height of a line of text
    pub fn text_height(&self) -> u32 {
        (self.ascent() - self.descent()).round() as u32
    }

    /// Width of `text` when drawn on one line
    pub fn text_width(&self, text: &str) -> u32 {
        let width: f32 = text.chars().map(|c| self.advance(c)).sum();
        width.ceil() as u32
    }

    fn advance(&self, c: char) -> f32 {
        match self {
            Face::TrueType { font, px, .. } => font.metrics(c, *px).advance_width,
            Face::Builtin { px } => *px / 2.0,
        }
    }

    /// Rasterize a single character
    pub fn glyph(&self, c: char) -> Glyph {
        match self {
            Face::TrueType { font, px, .. } => {
                let (metrics, coverage) = font.rasterize(c, *px);
                Glyph {
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    width: metrics.width,
                    height: metrics.height,
                    advance: metrics.advance_width,
                    coverage,
                }
            }
            Face::Builtin { px } => builtin_glyph(c, *px),
        }
    }
}

/// An outlined box, a bit narrower than the advance and as tall as a capital
fn builtin_glyph(c: char, px: f32) -> Glyph {
    let advance = px / 2.0;
    if c.is_whitespace() {
        return Glyph {
            xmin: 0,
            ymin: 0,
            width: 0,
            height: 0,
            advance,
            coverage: vec![],
        };
    }
    let width = ((advance * 0.7).round() as usize).max(1);
    let height = ((px * 0.7).round() as usize).max(1);
    let stroke = ((px / 12.0).round() as usize).max(1);
    let mut coverage = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let edge = x < stroke || y < stroke || x + stroke >= width || y + stroke >= height;
            if edge {
                coverage[y * width + x] = 0xFF;
            }
        }
    }
    Glyph {
        xmin: (advance * 0.15).round() as i32,
        ymin: 0,
        width,
        height,
        advance,
        coverage,
    }
}

/// Search `folder` and its subfolders for a file called `name`
fn find_font_file(folder: &Path, name: &str) -> Option<PathBuf> {
    let candidate = folder.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }

    let dir_iter = std::fs::read_dir(folder).ok()?;
    dir_iter.filter_map(|entry| entry.ok()).find_map(|entry| {
        let path = DirEntry::path(&entry);
        if path.is_dir() {
            find_font_file(&path, name)
        } else if path
            .file_name()
            .and_then(|f| f.to_str())
            .map_or(false, |f| f.eq_ignore_ascii_case(name))
        {
            Some(path)
        } else {
            None
        }
    })
}

/// Look up a font by path or file name and load it at `size` pixels
pub fn load_font(name: &str, size: u32, dirs: &[PathBuf]) -> Option<Face> {
    let direct = Path::new(name);
    let path = if direct.is_file() {
        direct.to_path_buf()
    } else {
        dirs.iter().find_map(|dir| find_font_file(dir, name))?
    };
    let data = std::fs::read(&path)
        .map_err(|e| debug!("Failed to read font '{}': {}", path.display(), e))
        .ok()?;
    Face::from_bytes(path, data, size)
}

/// The first candidate that loads, or the built-in face
pub fn resolve_font(candidates: &[String], size: u32, dirs: &[PathBuf]) -> Face {
    for name in candidates {
        if let Some(face) = load_font(name, size, dirs) {
            debug!("Using font {:?}", face);
            return face;
        }
    }
    if !candidates.is_empty() {
        warn!(
            "None of the fonts {:?} could be loaded, using the built-in face",
            candidates
        );
    }
    Face::builtin(size)
}

/// The three faces used when drawing a schedule
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Cell text
    pub regular: Face,
    /// Column headers
    pub bold: Face,
    /// Day titles
    pub title: Face,
}

impl FontSet {
    /// Load all faces for the given sizes
    pub fn resolve(sources: &FontSources, metrics: &Metrics) -> Self {
        let regular = resolve_font(&sources.regular, metrics.font_size, &sources.dirs);
        let bold = resolve_font(&sources.bold, metrics.bold_font_size, &sources.dirs);
        let title = bold.with_size(metrics.title_font_size);
        FontSet {
            regular,
            bold,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{load_font, resolve_font, Face, FontSet};
    use crate::Style;

    #[test]
    fn test_missing_font_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = vec![dir.path().to_path_buf()];
        assert!(load_font("no-such-font.ttf", 18, &dirs).is_none());
        let face = resolve_font(&["no-such-font.ttf".to_string()], 18, &dirs);
        assert!(face.is_builtin());
        assert_eq!(face.px(), 18.0);
    }

    #[test]
    fn test_garbage_font_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("truetype").join("broken");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("broken.ttf"), b"not a font").unwrap();
        let dirs: Vec<PathBuf> = vec![dir.path().to_path_buf()];
        assert!(load_font("broken.ttf", 18, &dirs).is_none());
        assert!(resolve_font(&["broken.ttf".to_string()], 18, &dirs).is_builtin());
    }

    #[test]
    fn test_builtin_metrics_follow_wrap_heuristic() {
        let face = Face::builtin(6);
        assert_eq!(face.text_width("abcd"), 12);
        assert_eq!(face.text_width(""), 0);
        assert_eq!(face.text_height(), 6);
        let g = face.glyph('Ж');
        assert_eq!(g.coverage.len(), g.width * g.height);
        assert!(g.coverage.contains(&0xFF));
        assert!(face.glyph(' ').coverage.is_empty());
    }

    #[test]
    fn test_compact_style_uses_builtin_faces() {
        let style = Style::compact();
        let fonts = FontSet::resolve(&style.fonts, &style.metrics().unwrap());
        assert!(fonts.regular.is_builtin());
        assert!(fonts.bold.is_builtin());
        assert_eq!(fonts.title.px(), 8.0);
    }
}
