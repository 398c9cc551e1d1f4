//! # Schedule data
//!
//! Plain records describing lessons, days and weeks. The renderer never
//! mutates or reorders them.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A day of the (six day) teaching week
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekDay {
    /// Понедельник
    Monday,
    /// Вторник
    Tuesday,
    /// Среда
    Wednesday,
    /// Четверг
    Thursday,
    /// Пятница
    Friday,
    /// Суббота
    Saturday,
}

impl WeekDay {
    /// All days in calendar order
    pub const ALL: [WeekDay; 6] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// The title printed above the day block
    pub fn label(self) -> &'static str {
        match self {
            WeekDay::Monday => "Понедельник",
            WeekDay::Tuesday => "Вторник",
            WeekDay::Wednesday => "Среда",
            WeekDay::Thursday => "Четверг",
            WeekDay::Friday => "Пятница",
            WeekDay::Saturday => "Суббота",
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The room a lesson takes place in
///
/// Schedules mix plain room numbers (`301`) with codes (`"215A"`), so both
/// are accepted and rendered through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classroom {
    /// A room number
    Number(i64),
    /// A free-form room code
    Text(String),
}

impl fmt::Display for Classroom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classroom::Number(n) => write!(f, "{}", n),
            Classroom::Text(t) => f.write_str(t),
        }
    }
}

impl From<&str> for Classroom {
    fn from(value: &str) -> Self {
        Classroom::Text(value.to_owned())
    }
}

impl From<String> for Classroom {
    fn from(value: String) -> Self {
        Classroom::Text(value)
    }
}

impl From<i64> for Classroom {
    fn from(value: i64) -> Self {
        Classroom::Number(value)
    }
}

impl From<u32> for Classroom {
    fn from(value: u32) -> Self {
        Classroom::Number(value.into())
    }
}

impl Serialize for Classroom {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Classroom::Number(n) => serializer.serialize_i64(*n),
            Classroom::Text(t) => serializer.serialize_str(t),
        }
    }
}

struct ClassroomVisitor;

impl<'de> de::Visitor<'de> for ClassroomVisitor {
    type Value = Classroom;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a room number or a room code string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Classroom, E> {
        Ok(Classroom::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Classroom, E> {
        i64::try_from(v)
            .map(Classroom::Number)
            .map_err(|_| E::custom(format!("room number {} is out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Classroom, E> {
        if v.is_finite() {
            Ok(Classroom::Text(v.to_string()))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Classroom, E> {
        Ok(Classroom::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Classroom, E> {
        Ok(Classroom::Text(v))
    }
}

impl<'de> Deserialize<'de> for Classroom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ClassroomVisitor)
    }
}

/// A single lesson (one table row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Start time, e.g. `09:00`
    pub start: String,
    /// End time, e.g. `10:30`
    pub end: String,
    /// Subject name
    pub name: String,
    /// Room
    pub classroom: Classroom,
    /// Teacher name
    pub teacher: String,
    /// Kind of lesson (lecture, seminar, ...)
    #[serde(rename = "type")]
    pub kind: String,
}

impl Lesson {
    /// Create a new lesson
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        name: impl Into<String>,
        classroom: impl Into<Classroom>,
        teacher: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Lesson {
            start: start.into(),
            end: end.into(),
            name: name.into(),
            classroom: classroom.into(),
            teacher: teacher.into(),
            kind: kind.into(),
        }
    }

    /// The `start-end` text of the first column
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// The five cell texts, in column order
    pub fn cells(&self) -> [String; 5] {
        [
            self.time_range(),
            self.name.clone(),
            self.classroom.to_string(),
            self.teacher.clone(),
            self.kind.clone(),
        ]
    }
}

/// The lessons of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Which day this is
    pub day: WeekDay,
    /// Lessons in row order
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Day {
    /// Create a new day
    pub fn new(day: WeekDay, lessons: Vec<Lesson>) -> Self {
        Day { day, lessons }
    }
}

/// A week as an ordered list of days
///
/// Days are rendered in the order they were added.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// Days in render order
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Week {
    /// Create an empty week
    pub fn new() -> Self {
        Week::default()
    }

    /// Append a day
    pub fn add_day(&mut self, day: Day) {
        self.days.push(day);
    }

    /// Find the first block for the given day
    pub fn day(&self, day: WeekDay) -> Option<&Day> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Parse a week from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Read a week from a RON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Serialize the week to pretty RON text
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Classroom, Day, Lesson, Week, WeekDay};
    use crate::Error;

    #[test]
    fn test_cells_in_column_order() {
        let lesson = Lesson::new("09:00", "10:30", "Физика", 408u32, "Сидоров С.С.", "Лекция");
        assert_eq!(
            lesson.cells(),
            [
                "09:00-10:30".to_string(),
                "Физика".to_string(),
                "408".to_string(),
                "Сидоров С.С.".to_string(),
                "Лекция".to_string(),
            ]
        );
    }

    #[test]
    fn test_add_day_keeps_insertion_order() {
        let mut week = Week::new();
        week.add_day(Day::new(WeekDay::Friday, vec![]));
        week.add_day(Day::new(WeekDay::Monday, vec![]));
        let days: Vec<_> = week.days.iter().map(|d| d.day).collect();
        assert_eq!(days, [WeekDay::Friday, WeekDay::Monday]);
        assert_eq!(WeekDay::Monday.label(), "Понедельник");
    }

    #[test]
    fn test_from_ron_accepts_text_and_number_rooms() {
        let week = Week::from_ron(
            r#"(days: [(day: Monday, lessons: [
                (start: "09:00", end: "10:30", name: "A", classroom: 301, teacher: "T", type: "Лекция"),
                (start: "10:40", end: "12:10", name: "B", classroom: "215A", teacher: "T", type: "Семинар"),
            ])])"#,
        )
        .unwrap();
        let lessons = &week.days[0].lessons;
        assert_eq!(lessons[0].classroom, Classroom::Number(301));
        assert_eq!(lessons[1].classroom, Classroom::Text("215A".into()));
        assert_eq!(lessons[1].kind, "Семинар");
    }

    #[test]
    fn test_from_ron_rejects_malformed_room() {
        let res = Week::from_ron(
            r#"(days: [(day: Monday, lessons: [
                (start: "09:00", end: "10:30", name: "A", classroom: [3, 0, 1], teacher: "T", type: "L"),
            ])])"#,
        );
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_ron_roundtrip_of_sample_week() {
        let mut week = Week::new();
        week.add_day(Day::new(
            WeekDay::Tuesday,
            vec![Lesson::new("13:00", "14:30", "Физика", 408u32, "Сидоров С.С.", "Лекция")],
        ));
        let text = week.to_ron().unwrap();
        assert_eq!(Week::from_ron(&text).unwrap(), week);
    }
}
