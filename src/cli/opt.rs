use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use timetable::{style::FontSources, Style, WeekDay};

#[derive(Parser, Debug)]
#[clap(version, about)]
/// Render class schedules to images
pub struct Options {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every day of a schedule file into one image
    Week(WeekArgs),
    /// Render a single day of a schedule file
    Day(DayArgs),
    /// Render the built-in sample schedule
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub struct WeekArgs {
    /// The schedule (*.ron)
    pub schedule: PathBuf,
    /// Where to store the image (*.png, *.jpg). Defaults to the schedule
    /// path with a `png` extension.
    #[clap(long, short)]
    pub out: Option<PathBuf>,
    #[clap(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct DayArgs {
    /// The schedule (*.ron)
    pub schedule: PathBuf,
    /// The day to render, e.g. `monday`, `mon` or `Понедельник`
    #[clap(long, short)]
    pub day: DayName,
    /// Where to store the image (*.png, *.jpg)
    #[clap(long, short)]
    pub out: Option<PathBuf>,
    #[clap(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// The output folder
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,
    #[clap(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Style file (*.ron)
    #[clap(long)]
    pub style: Option<PathBuf>,
    /// Override the scale factor
    #[clap(long)]
    pub scale: Option<u32>,
    /// Don't look for system fonts
    #[clap(long)]
    pub builtin_font: bool,
}

impl StyleArgs {
    pub fn style(&self) -> eyre::Result<Style> {
        let mut style = if let Some(path) = &self.style {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read style '{}'", path.display()))?;
            ron::from_str::<Style>(&text)
                .wrap_err_with(|| format!("Failed to parse style '{}'", path.display()))?
        } else {
            Style::default()
        };
        if let Some(scale) = self.scale {
            style.scale = scale;
        }
        if self.builtin_font {
            style.fonts = FontSources::builtin();
        }
        Ok(style)
    }
}

/// A day given on the command line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DayName(pub WeekDay);

#[derive(Debug)]
/// Failed to parse a day name
pub struct DayNameError {}

impl fmt::Display for DayNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `monday`, `tuesday`, ..., `saturday`")?;
        Ok(())
    }
}

impl std::error::Error for DayNameError {}

impl FromStr for DayName {
    type Err = DayNameError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        let lower = val.to_lowercase();
        match lower.as_str() {
            "mon" | "monday" => Ok(Self(WeekDay::Monday)),
            "tue" | "tuesday" => Ok(Self(WeekDay::Tuesday)),
            "wed" | "wednesday" => Ok(Self(WeekDay::Wednesday)),
            "thu" | "thursday" => Ok(Self(WeekDay::Thursday)),
            "fri" | "friday" => Ok(Self(WeekDay::Friday)),
            "sat" | "saturday" => Ok(Self(WeekDay::Saturday)),
            _ => WeekDay::ALL
                .iter()
                .copied()
                .find(|d| d.label().to_lowercase() == lower)
                .map(Self)
                .ok_or(DayNameError {}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DayName, StyleArgs};
    use timetable::WeekDay;

    #[test]
    fn test_day_names() {
        assert_eq!("Mon".parse::<DayName>().unwrap().0, WeekDay::Monday);
        assert_eq!("saturday".parse::<DayName>().unwrap().0, WeekDay::Saturday);
        assert_eq!("среда".parse::<DayName>().unwrap().0, WeekDay::Wednesday);
        assert!("sunday".parse::<DayName>().is_err());
    }

    #[test]
    fn test_style_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.ron");
        std::fs::write(&path, "(scale: 2, geometry: (column_width: 100))").unwrap();
        let args = StyleArgs {
            style: Some(path),
            scale: Some(1),
            builtin_font: true,
        };
        let style = args.style().unwrap();
        assert_eq!(style.scale, 1);
        assert_eq!(style.geometry.column_width, 100);
        assert!(style.fonts.regular.is_empty());
    }
}
