//! # Emitting images
//!
//! Rendered images go to an [`ImageSink`]. [`FileSink`] encodes into a
//! temporary file next to the destination and renames it into place once
//! encoding has succeeded, so a failed render never leaves a partial file.

use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{
    codecs::jpeg::{JpegEncoder, PixelDensity},
    RgbImage,
};
use log::info;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Resolution tag written into every image
pub const DPI: u16 = 300;

/// Quality used for lossy formats
pub const JPEG_QUALITY: u8 = 95;

const METERS_PER_INCH: f64 = 0.0254;

/// Something that accepts a finished image
pub trait ImageSink {
    /// Take the rendered image
    fn emit(&mut self, image: &RgbImage) -> Result<()>;
}

/// Supported file formats
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG
    Png,
    /// Lossy JPEG
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            _ => Err(Error::InvalidInput(format!(
                "Unsupported image file extension: '{}'",
                path.display()
            ))),
        }
    }
}

/// Encode `image` as PNG with a 300 DPI `pHYs` chunk
pub fn write_png<W: Write>(image: &RgbImage, writer: W) -> Result<()> {
    let ppm = (f64::from(DPI) / METERS_PER_INCH).round() as u32;
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Encode `image` as JPEG at quality 95 with a 300 DPI density
pub fn write_jpeg<W: Write>(image: &RgbImage, mut writer: W) -> Result<()> {
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    encoder.set_pixel_density(PixelDensity::dpi(DPI));
    encoder.encode_image(image)?;
    Ok(())
}

/// Encode `image` in the given format
pub fn encode<W: Write>(image: &RgbImage, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Png => write_png(image, writer),
        OutputFormat::Jpeg => write_jpeg(image, writer),
    }
}

/// Writes images to a file, atomically
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    /// Write to `path`, picking the format from its extension
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(FileSink { path, format })
    }

    /// Write to `path` in the given format
    pub fn with_format(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        FileSink {
            path: path.into(),
            format,
        }
    }

    /// The destination
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for FileSink {
    fn emit(&mut self, image: &RgbImage) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        let mut writer = BufWriter::new(tmp);
        encode(image, self.format, &mut writer)?;
        let tmp = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        info!(
            "Saved {}x{} image to '{}'",
            image.width(),
            image.height(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes PNG data to any stream
#[derive(Debug)]
pub struct StreamSink<W>(pub W);

impl<W: Write> ImageSink for StreamSink<W> {
    fn emit(&mut self, image: &RgbImage) -> Result<()> {
        write_png(image, &mut self.0)?;
        self.0.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::RgbImage;

    use super::{FileSink, ImageSink, OutputFormat, StreamSink};
    use crate::Error;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("b.jpeg")).unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("b.gif")),
            Err(Error::InvalidInput(_))
        ));
        assert!(FileSink::new("schedule").is_err());
    }

    #[test]
    fn test_png_carries_300_dpi() {
        let mut sink = StreamSink(Vec::new());
        sink.emit(&RgbImage::new(3, 2)).unwrap();
        let decoder = png::Decoder::new(&sink.0[..]);
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (3, 2));
        let dims = info.pixel_dims.unwrap();
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
    }

    #[test]
    fn test_file_sink_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.jpg");
        FileSink::new(&path).unwrap().emit(&RgbImage::new(16, 8)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));

        // JFIF APP0: units = dots per inch, 300 x 300
        assert_eq!(&bytes[2..4], &[0xFF, 0xE0]);
        assert_eq!(&bytes[6..11], b"JFIF\0");
        assert_eq!(bytes[13], 1);
        assert_eq!(&bytes[14..16], &300u16.to_be_bytes());
        assert_eq!(&bytes[16..18], &300u16.to_be_bytes());

        // At quality 95 the luma DC step shrinks from 16 to 2 (it is 8 at 75)
        let dqt = bytes
            .windows(2)
            .position(|w| w == [0xFF, 0xDB])
            .expect("quantization table");
        assert_eq!(bytes[dqt + 4] & 0x0F, 0, "luma table comes first");
        assert!(bytes[dqt + 5] <= 2, "DC step {}", bytes[dqt + 5]);
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("week.png");
        let res = FileSink::new(&path).unwrap().emit(&RgbImage::new(4, 4));
        assert!(matches!(res, Err(Error::Io(_))));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
