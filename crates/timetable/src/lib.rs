#![warn(missing_docs)]
//! # Class schedule rendering
//!
//! This crate turns a week (or a single day) of lessons into a raster image
//! laid out as a table: one block per day with a centered title, a header
//! row and one row per lesson. Rows grow to fit wrapped cell text.
//!
//! Rendering is a two-pass pipeline. The [`layout`] module sizes every row
//! and the canvas, then the [`raster`] module draws onto a canvas of exactly
//! that size. Both passes share the pure wrapping code in [`text`], so they
//! always agree on row heights.
//!
//! ```no_run
//! use timetable::{Day, Lesson, ScheduleRenderer, Style, Week, WeekDay};
//! use timetable::output::FileSink;
//!
//! # fn main() -> timetable::Result<()> {
//! let mut week = Week::new();
//! week.add_day(Day::new(
//!     WeekDay::Monday,
//!     vec![Lesson::new("09:00", "10:30", "Физика", "408", "Сидоров С.С.", "Лекция")],
//! ));
//!
//! let renderer = ScheduleRenderer::new(Style::default())?;
//! renderer.render_week(&week, &mut FileSink::new("week.png")?)?;
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod output;
pub mod raster;
pub mod style;
pub mod text;

pub use compose::ScheduleRenderer;
pub use error::{Error, Result};
pub use model::{Classroom, Day, Lesson, Week, WeekDay};
pub use style::{Metrics, Style};
