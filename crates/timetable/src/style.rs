//! # Geometry, colors and fonts
//!
//! All sizes in [`Geometry`] are given in unscaled units. The renderer works
//! with [`Metrics`], where every size has been multiplied by [`Style::scale`],
//! so changing the scale rescales the whole layout uniformly.

use std::{fmt, path::PathBuf, str::FromStr};

use image::Rgb;
use serde::{Deserialize, Deserializer};

use crate::{layout::COLUMN_COUNT, Error};

/// An RGB color, written as `#rrggbb` in style files
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub Rgb<u8>);

impl Color {
    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(Rgb([r, g, b]))
    }
}

/// Failed to parse a `#rrggbb` color
#[derive(Debug)]
pub struct ColorError(String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected a color like `#1e88e5`, got `{}`", self.0)
    }
}

impl std::error::Error for ColorError {}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// The fixed color scheme
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas background
    pub background: Color,
    /// Fill of the column header cells
    pub header: Color,
    /// Text in the column header cells
    pub header_text: Color,
    /// Titles and cell text
    pub text: Color,
    /// Row and column separators
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Color::rgb(0xff, 0xff, 0xff),
            header: Color::rgb(0x1e, 0x88, 0xe5),
            header_text: Color::rgb(0xff, 0xff, 0xff),
            text: Color::rgb(0x33, 0x33, 0x33),
            border: Color::rgb(0xe3, 0xf2, 0xfd),
        }
    }
}

/// Unscaled sizes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Width of every column
    pub column_width: u32,
    /// Height of title rows, header rows and the minimum lesson row height
    pub row_height: u32,
    /// Inner padding of a cell (each side)
    pub cell_padding: u32,
    /// Outer margin of the canvas
    pub margin: u32,
    /// Space after each day block in the week view
    pub day_spacing: u32,
    /// Extra space between wrapped lines
    pub line_gap: u32,
    /// Size of the cell text
    pub font_size: u32,
    /// Size of the column header text
    pub bold_font_size: u32,
    /// Size of the day titles
    pub title_font_size: u32,
    /// Thickness of the separator lines
    pub border_width: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            column_width: 180,
            row_height: 60,
            cell_padding: 20,
            margin: 40,
            day_spacing: 40,
            line_gap: 4,
            font_size: 18,
            bold_font_size: 18,
            title_font_size: 24,
            border_width: 1,
        }
    }
}

/// Where to look for TrueType fonts
///
/// Each entry in `regular` and `bold` is either a path to a font file or a
/// file name that is searched for (recursively) in `dirs`. The first entry
/// that loads wins; if none does, the built-in face is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontSources {
    /// Candidates for the cell text
    pub regular: Vec<String>,
    /// Candidates for headers and titles
    pub bold: Vec<String>,
    /// Font directories
    pub dirs: Vec<PathBuf>,
}

impl FontSources {
    /// Always use the built-in face
    pub fn builtin() -> Self {
        FontSources {
            regular: vec![],
            bold: vec![],
            dirs: vec![],
        }
    }
}

impl Default for FontSources {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        FontSources {
            regular: names(&["arial.ttf", "DejaVuSans.ttf", "LiberationSans-Regular.ttf"]),
            bold: names(&["arialbd.ttf", "DejaVuSans-Bold.ttf", "LiberationSans-Bold.ttf"]),
            dirs: [
                "/usr/share/fonts",
                "/usr/local/share/fonts",
                "/Library/Fonts",
                "/System/Library/Fonts",
                "C:\\Windows\\Fonts",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

/// The complete rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Multiplier applied to every size in `geometry`
    pub scale: u32,
    /// Unscaled sizes
    pub geometry: Geometry,
    /// Colors
    pub palette: Palette,
    /// Font lookup
    pub fonts: FontSources,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            scale: 3,
            geometry: Geometry::default(),
            palette: Palette::default(),
            fonts: FontSources::default(),
        }
    }
}

impl Style {
    /// The default style at a different scale
    pub fn with_scale(scale: u32) -> Self {
        Style {
            scale,
            ..Style::default()
        }
    }

    /// A tiny style with the built-in face, for tests and previews
    pub fn compact() -> Self {
        Style {
            scale: 1,
            geometry: Geometry {
                column_width: 40,
                row_height: 12,
                cell_padding: 2,
                margin: 4,
                day_spacing: 4,
                line_gap: 1,
                font_size: 6,
                bold_font_size: 6,
                title_font_size: 8,
                border_width: 1,
            },
            palette: Palette::default(),
            fonts: FontSources::builtin(),
        }
    }

    /// Resolve the scaled pixel sizes
    ///
    /// Fails with [`Error::InvalidInput`] if a scaled size, or the canvas
    /// width derived from them, does not fit into a `u32`.
    pub fn metrics(&self) -> crate::Result<Metrics> {
        let s = self.scale.max(1);
        let g = &self.geometry;
        let scaled = |name: &str, value: u32| {
            value.checked_mul(s).ok_or_else(|| {
                Error::InvalidInput(format!("{} of {} is too large at scale {}", name, value, s))
            })
        };
        let metrics = Metrics {
            column_width: scaled("column_width", g.column_width)?,
            row_height: scaled("row_height", g.row_height)?,
            cell_padding: scaled("cell_padding", g.cell_padding)?,
            margin: scaled("margin", g.margin)?,
            day_spacing: scaled("day_spacing", g.day_spacing)?,
            line_gap: scaled("line_gap", g.line_gap)?,
            font_size: scaled("font_size", g.font_size)?,
            bold_font_size: scaled("bold_font_size", g.bold_font_size)?,
            title_font_size: scaled("title_font_size", g.title_font_size)?,
            border_width: scaled("border_width", g.border_width)?.max(1),
        };
        let width = (COLUMN_COUNT as u32)
            .checked_mul(metrics.column_width)
            .zip(metrics.margin.checked_mul(2))
            .and_then(|(columns, margins)| columns.checked_add(margins));
        let line_height = metrics.font_size.checked_add(metrics.line_gap);
        if width.is_none() || line_height.is_none() {
            return Err(Error::InvalidInput(format!(
                "Canvas is too large at scale {}",
                s
            )));
        }
        Ok(metrics)
    }
}

/// Scaled sizes in pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// Width of every column
    pub column_width: u32,
    /// Base row height
    pub row_height: u32,
    /// Inner padding of a cell
    pub cell_padding: u32,
    /// Outer margin
    pub margin: u32,
    /// Space after each day block in the week view
    pub day_spacing: u32,
    /// Extra space between wrapped lines
    pub line_gap: u32,
    /// Cell text size
    pub font_size: u32,
    /// Header text size
    pub bold_font_size: u32,
    /// Title text size
    pub title_font_size: u32,
    /// Separator thickness
    pub border_width: u32,
}

impl Metrics {
    /// Distance between the tops of two wrapped lines
    pub fn line_height(&self) -> u32 {
        self.font_size + self.line_gap
    }

    /// Width available for text inside a cell
    pub fn content_width(&self) -> u32 {
        self.column_width.saturating_sub(2 * self.cell_padding)
    }

    /// Width of the canvas, which never depends on content
    pub fn canvas_width(&self) -> u32 {
        COLUMN_COUNT as u32 * self.column_width + 2 * self.margin
    }
}
