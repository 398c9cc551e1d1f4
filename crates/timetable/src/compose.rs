//! # Page composition
//!
//! [`ScheduleRenderer`] ties the sizing pass and the drawing pass together
//! for the two views: a whole week, or a single day.

use image::RgbImage;
use log::debug;

use crate::{
    font::{Face, FontSet},
    layout::{self, COLUMN_LABELS},
    model::{Day, Week},
    output::ImageSink,
    raster::{table::TableRenderer, Canvas},
    style::{Metrics, Style},
    Result,
};

/// Renders schedules with a fixed style
///
/// Fonts are resolved once, in [`ScheduleRenderer::new`]. Rendering itself
/// keeps no state, so a renderer can be reused for any number of schedules.
#[derive(Debug, Clone)]
pub struct ScheduleRenderer {
    style: Style,
    metrics: Metrics,
    fonts: FontSet,
}

impl ScheduleRenderer {
    /// Create a renderer, loading the fonts named in the style
    ///
    /// Fails if the style's scaled sizes overflow, see [`Style::metrics`].
    pub fn new(style: Style) -> Result<Self> {
        let metrics = style.metrics()?;
        let fonts = FontSet::resolve(&style.fonts, &metrics);
        Ok(ScheduleRenderer {
            style,
            metrics,
            fonts,
        })
    }

    /// The style this renderer was created with
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The scaled sizes
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The resolved faces
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    fn table(&self) -> TableRenderer<'_> {
        TableRenderer {
            metrics: &self.metrics,
            palette: &self.style.palette,
            fonts: &self.fonts,
        }
    }

    fn draw_title(&self, canvas: &mut Canvas, label: &str, y: u32) {
        let face: &Face = &self.fonts.title;
        let x = (i64::from(canvas.width()) - i64::from(face.text_width(label))).div_euclid(2);
        canvas.draw_text(face, x as i32, y as i32, label, self.style.palette.text);
    }

    /// Draw all days of `week` onto a new image
    pub fn compose_week(&self, week: &Week) -> RgbImage {
        let m = &self.metrics;
        let page = layout::layout_week(week, m);
        let mut canvas = Canvas::new(page.width, page.height, self.style.palette.background);
        let table = self.table();

        let mut y = m.margin;
        for day in &week.days {
            self.draw_title(&mut canvas, day.day.label(), y);
            y += m.row_height;
            y = table.render(&mut canvas, day, &COLUMN_LABELS, y, page.width);
            y += m.day_spacing;
        }
        debug!("composed week: {}x{}, cursor at {}", page.width, page.height, y);
        canvas.into_image()
    }

    /// Draw a single day onto a new image
    pub fn compose_day(&self, day: &Day) -> RgbImage {
        let m = &self.metrics;
        let page = layout::layout_single_day(day, m);
        let mut canvas = Canvas::new(page.width, page.height, self.style.palette.background);

        self.draw_title(&mut canvas, day.day.label(), m.margin);
        let y = self.table().render(
            &mut canvas,
            day,
            &COLUMN_LABELS,
            m.margin + m.row_height,
            page.width,
        );
        debug!("composed {}: {}x{}, cursor at {}", day.day, page.width, page.height, y);
        canvas.into_image()
    }

    /// Render a whole week and emit it to `sink`
    pub fn render_week<S: ImageSink + ?Sized>(&self, week: &Week, sink: &mut S) -> Result<()> {
        let image = self.compose_week(week);
        sink.emit(&image)
    }

    /// Render a single day and emit it to `sink`
    pub fn render_day<S: ImageSink + ?Sized>(&self, day: &Day, sink: &mut S) -> Result<()> {
        let image = self.compose_day(day);
        sink.emit(&image)
    }
}
