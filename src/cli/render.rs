use std::path::{Path, PathBuf};

use color_eyre::eyre::{self, eyre, WrapErr};
use log::info;
use timetable::{output::FileSink, ScheduleRenderer, Week};

use super::opt::{DayArgs, WeekArgs};

fn load_week(path: &Path) -> eyre::Result<Week> {
    let week = Week::load(path)
        .wrap_err_with(|| format!("Failed to load schedule '{}'", path.display()))?;
    info!("Loaded {} day(s) from '{}'", week.days.len(), path.display());
    Ok(week)
}

fn default_out(schedule: &Path, suffix: Option<&str>) -> PathBuf {
    match suffix {
        Some(suffix) => {
            let stem = schedule
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "schedule".to_owned());
            schedule.with_file_name(format!("{}-{}.png", stem, suffix))
        }
        None => schedule.with_extension("png"),
    }
}

pub fn week(args: WeekArgs) -> eyre::Result<()> {
    let week = load_week(&args.schedule)?;
    let renderer = ScheduleRenderer::new(args.style.style()?)?;
    let out = args
        .out
        .unwrap_or_else(|| default_out(&args.schedule, None));
    renderer.render_week(&week, &mut FileSink::new(&out)?)?;
    Ok(())
}

pub fn day(args: DayArgs) -> eyre::Result<()> {
    let week = load_week(&args.schedule)?;
    let weekday = args.day.0;
    let day = week
        .day(weekday)
        .ok_or_else(|| eyre!("No {:?} in '{}'", weekday, args.schedule.display()))?;
    let renderer = ScheduleRenderer::new(args.style.style()?)?;
    let suffix = format!("{:?}", weekday).to_lowercase();
    let out = args
        .out
        .unwrap_or_else(|| default_out(&args.schedule, Some(&suffix)));
    renderer.render_day(day, &mut FileSink::new(&out)?)?;
    Ok(())
}
