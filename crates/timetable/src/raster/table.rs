//! # Drawing one day's table

use crate::{
    font::FontSet,
    layout::{self, COLUMN_COUNT},
    model::Day,
    style::{Metrics, Palette},
    text,
};

use super::Canvas;

/// Draws the header row and lesson rows of a day
pub struct TableRenderer<'a> {
    /// Sizes
    pub metrics: &'a Metrics,
    /// Colors
    pub palette: &'a Palette,
    /// Faces
    pub fonts: &'a FontSet,
}

impl TableRenderer<'_> {
    /// Draw the table for `day` starting at `start_y`
    ///
    /// Returns the Y coordinate right below the last row, so that blocks can
    /// be stacked without gaps.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        day: &Day,
        columns: &[&str; COLUMN_COUNT],
        start_y: u32,
        canvas_width: u32,
    ) -> u32 {
        let m = self.metrics;
        let mut y = start_y;

        self.render_header(canvas, columns, y);
        y += m.row_height;

        let right = canvas_width.saturating_sub(m.margin) as i32;
        for lesson in &day.lessons {
            let row_height = layout::row_height(lesson, m);

            for (col, value) in lesson.cells().iter().enumerate() {
                let x = self.column_x(col);
                if col > 0 {
                    canvas.vline(
                        x,
                        y as i32,
                        (y + row_height) as i32,
                        m.border_width,
                        self.palette.border,
                    );
                }
                self.render_cell(canvas, value, x, y, row_height);
            }

            let bottom = y + row_height;
            canvas.hline(
                m.margin as i32,
                right,
                bottom.saturating_sub(m.border_width) as i32,
                m.border_width,
                self.palette.border,
            );
            y = bottom;
        }
        y
    }

    fn column_x(&self, col: usize) -> i32 {
        (self.metrics.margin + col as u32 * self.metrics.column_width) as i32
    }

    fn render_header(&self, canvas: &mut Canvas, columns: &[&str; COLUMN_COUNT], y: u32) {
        let m = self.metrics;
        let face = &self.fonts.bold;
        for (col, label) in columns.iter().enumerate() {
            let x = self.column_x(col);
            canvas.fill_rect(x, y as i32, m.column_width, m.row_height, self.palette.header);

            let text_x = x + centered(m.column_width, face.text_width(label));
            let text_y = y as i32 + centered(m.row_height, face.text_height());
            canvas.draw_text(face, text_x, text_y, label, self.palette.header_text);
        }
    }

    fn render_cell(&self, canvas: &mut Canvas, value: &str, x: i32, row_top: u32, row_height: u32) {
        let m = self.metrics;
        let face = &self.fonts.regular;
        let wrapped = text::wrap(value, m.content_width(), m);

        let mut text_y = row_top as i32 + centered(row_height, wrapped.height);
        for line in &wrapped.lines {
            let text_x = x + centered(m.column_width, face.text_width(line));
            canvas.draw_text(face, text_x, text_y, line, self.palette.text);
            text_y += m.line_height() as i32;
        }
    }
}

/// Offset that centers `inner` in `outer` (negative if it does not fit)
fn centered(outer: u32, inner: u32) -> i32 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2) as i32
}
