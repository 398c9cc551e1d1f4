use color_eyre::eyre::{self, WrapErr};
use timetable::{output::FileSink, Day, Lesson, ScheduleRenderer, Week, WeekDay};

use super::opt::DemoArgs;

/// The sample schedule: two lessons on Monday and Tuesday each
pub fn sample_week() -> Week {
    let mut week = Week::new();
    week.add_day(Day::new(
        WeekDay::Monday,
        vec![
            Lesson::new("09:00", "10:30", "Математический анализ", "301", "Иванов И.И.", "Лекция"),
            Lesson::new("10:40", "12:10", "Программирование", "215A", "Петров П.П.", "Семинар"),
        ],
    ));
    week.add_day(Day::new(
        WeekDay::Tuesday,
        vec![
            Lesson::new("13:00", "14:30", "Физика", "408", "Сидоров С.С.", "Лекция"),
            Lesson::new("14:40", "16:10", "Английский язык", "315", "Смирнова А.А.", "Семинар"),
        ],
    ));
    week
}

/// Write the week view, the Tuesday view and the schedule itself
pub fn run(args: DemoArgs) -> eyre::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .wrap_err_with(|| format!("Failed to create '{}'", args.out_dir.display()))?;
    let week = sample_week();
    let renderer = ScheduleRenderer::new(args.style.style()?)?;

    let week_path = args.out_dir.join("week_schedule.png");
    renderer.render_week(&week, &mut FileSink::new(week_path)?)?;

    let day_path = args.out_dir.join("day_schedule.png");
    renderer.render_day(&week.days[1], &mut FileSink::new(day_path)?)?;

    let ron_path = args.out_dir.join("schedule.ron");
    std::fs::write(&ron_path, week.to_ron()?)
        .wrap_err_with(|| format!("Failed to write '{}'", ron_path.display()))?;
    Ok(())
}
