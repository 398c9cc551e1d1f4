//! # Sizing pass
//!
//! Computes row heights and canvas sizes before anything is drawn. The
//! drawing code in [`crate::raster::table`] calls [`row_height`] again for
//! every row it draws, so both passes always agree.

use log::debug;

use crate::{
    model::{Day, Lesson, Week},
    style::Metrics,
    text,
};

/// Number of table columns
pub const COLUMN_COUNT: usize = 5;

/// Header labels, in column order
pub const COLUMN_LABELS: [&str; COLUMN_COUNT] =
    ["Время", "Предмет", "Аудитория", "Преподаватель", "Тип"];

/// Height of the row for `lesson`
///
/// The tallest wrapped cell plus padding, but never less than the base row
/// height.
pub fn row_height(lesson: &Lesson, metrics: &Metrics) -> u32 {
    lesson
        .cells()
        .iter()
        .map(|value| text::wrap(value, metrics.content_width(), metrics).height)
        .map(|h| h + 2 * metrics.cell_padding)
        .fold(metrics.row_height, u32::max)
}

/// Row heights of all lessons of a day, in row order
pub fn row_heights(day: &Day, metrics: &Metrics) -> Vec<u32> {
    day.lessons
        .iter()
        .map(|lesson| row_height(lesson, metrics))
        .collect()
}

/// Vertical extents of one day block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    /// Height of the title row
    pub title: u32,
    /// Height of the column header row
    pub header: u32,
    /// Height of every lesson row
    pub rows: Vec<u32>,
    /// Space after the block (zero in the single day view)
    pub spacing: u32,
}

impl DayLayout {
    /// Size a day block, including the trailing day spacing
    pub fn new(day: &Day, metrics: &Metrics) -> Self {
        DayLayout {
            title: metrics.row_height,
            header: metrics.row_height,
            rows: row_heights(day, metrics),
            spacing: metrics.day_spacing,
        }
    }

    /// Height of the header row and all lesson rows
    pub fn table_height(&self) -> u32 {
        self.header + self.rows.iter().sum::<u32>()
    }

    /// Height of the whole block
    pub fn block_height(&self) -> u32 {
        self.title + self.table_height() + self.spacing
    }
}

/// Size of a complete canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// The blocks, top to bottom
    pub days: Vec<DayLayout>,
}

/// Size the canvas for a whole week
pub fn layout_week(week: &Week, metrics: &Metrics) -> PageLayout {
    let days: Vec<DayLayout> = week
        .days
        .iter()
        .map(|day| DayLayout::new(day, metrics))
        .collect();
    let height = 2 * metrics.margin + days.iter().map(DayLayout::block_height).sum::<u32>();
    debug!("week layout: {} days, height {}", days.len(), height);
    PageLayout {
        width: metrics.canvas_width(),
        height,
        days,
    }
}

/// Size the canvas for a single day (no trailing day spacing)
pub fn layout_single_day(day: &Day, metrics: &Metrics) -> PageLayout {
    let block = DayLayout {
        spacing: 0,
        ..DayLayout::new(day, metrics)
    };
    let height = 2 * metrics.margin + block.block_height();
    debug!("{} layout: rows {:?}, height {}", day.day, block.rows, height);
    PageLayout {
        width: metrics.canvas_width(),
        height,
        days: vec![block],
    }
}

#[cfg(test)]
mod tests {
    use super::{layout_single_day, layout_week, row_height, row_heights, DayLayout};
    use crate::{Day, Lesson, Style, Week, WeekDay};

    fn short_lesson() -> Lesson {
        Lesson::new("09:00", "10:30", "Art", 1u32, "Ann", "Lab")
    }

    #[test]
    fn test_single_line_row_has_base_height() {
        let m = Style::compact().metrics().unwrap();
        assert_eq!(row_height(&short_lesson(), &m), m.row_height);
    }

    #[test]
    fn test_longer_content_never_shrinks_rows() {
        let m = Style::compact().metrics().unwrap();
        let mut prev = 0;
        for len in [0, 5, 12, 13, 30, 60, 200] {
            let name = "x".repeat(len);
            let lesson = Lesson::new("09:00", "10:30", name, 1u32, "Ann", "Lab");
            let h = row_height(&lesson, &m);
            assert!(h >= prev, "{} < {} at {}", h, prev, len);
            prev = h;
        }
        // 200 chars at 12 per line: 17 lines of 7px plus padding
        assert_eq!(prev, 17 * 7 + 4);
    }

    #[test]
    fn test_tallest_cell_wins() {
        let m = Style::compact().metrics().unwrap();
        let lesson = Lesson::new("09:00", "10:30", "Art", 1u32, "a b c d e f g h i j k l m n", "Lab");
        // 12 chars per line: "a b c d e f", "g h i j k l", "m n"
        assert_eq!(row_height(&lesson, &m), 3 * m.line_height() + 2 * m.cell_padding);
    }

    #[test]
    fn test_row_heights_are_deterministic() {
        let m = Style::default().metrics().unwrap();
        let day = Day::new(
            WeekDay::Monday,
            vec![
                Lesson::new("09:00", "10:30", "Математический анализ", "301", "Иванов И.И.", "Лекция"),
                Lesson::new("10:40", "12:10", "Программирование", "215A", "Петров П.П.", "Семинар"),
            ],
        );
        assert_eq!(row_heights(&day, &m), row_heights(&day, &m));
        assert_eq!(row_heights(&day, &m), [2 * 66 + 120, 2 * 66 + 120]);
    }

    #[test]
    fn test_week_and_single_day_heights() {
        let m = Style::compact().metrics().unwrap();
        let day = Day::new(WeekDay::Monday, vec![short_lesson(), short_lesson()]);
        let mut week = Week::new();
        week.add_day(day.clone());
        week.add_day(Day::new(WeekDay::Tuesday, vec![]));

        let single = layout_single_day(&day, &m);
        assert_eq!(single.height, 2 * m.margin + 4 * m.row_height);
        assert_eq!(single.width, m.canvas_width());

        let page = layout_week(&week, &m);
        let block = DayLayout::new(&day, &m).block_height();
        assert_eq!(block, 4 * m.row_height + m.day_spacing);
        let empty = 2 * m.row_height + m.day_spacing;
        assert_eq!(page.height, 2 * m.margin + block + empty);
        assert_eq!(page.width, m.canvas_width());
    }

    #[test]
    fn test_empty_week_is_just_margins() {
        let m = Style::compact().metrics().unwrap();
        let page = layout_week(&Week::new(), &m);
        assert_eq!(page.height, 2 * m.margin);
        assert!(page.days.is_empty());
    }
}
