//! Calendar command handler.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, TimeZone};

use super::print_notes;
use crate::cli::CalendarArgs;
use crate::cli::date_arg::parse_day;
use crate::cli::output::{CalendarListing, NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::store::NoteRepository;
use crate::view::{CalendarMonth, CalendarState, DayCell};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Builds the calendar state for `args`.
///
/// A `--month` that does not contain the selected day moves the selection
/// to the first of that month.
pub(crate) fn calendar_state(args: &CalendarArgs, today: NaiveDate) -> Result<CalendarState> {
    let selected =
        parse_day(&args.date, today).map_err(|e| anyhow!("invalid --date: {}", e))?;
    let mut state = CalendarState::new(selected);

    if let Some(month_str) = &args.month {
        let month: CalendarMonth = month_str
            .parse()
            .map_err(|e| anyhow!("invalid --month: {}", e))?;
        if !month.contains(selected) {
            state = CalendarState::new(month.first_day());
        }
    }

    Ok(state)
}

/// Renders the month grid as text.
///
/// The selected day is bracketed, days with notes carry a `*`, and today is
/// marked with `>` when it is not selected.
pub(crate) fn render_month(month: &CalendarMonth, weeks: &[[Option<DayCell>; 7]]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:^35}", month.to_string()).trim_end());
    out.push('\n');

    let header: String = WEEKDAYS.iter().map(|d| format!(" {}  ", d)).collect();
    out.push_str(header.trim_end());
    out.push('\n');

    for week in weeks {
        let line: String = week.iter().map(|cell| render_cell(cell.as_ref())).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn render_cell(cell: Option<&DayCell>) -> String {
    let Some(cell) = cell else {
        return "     ".to_string();
    };

    let (open, close) = match (cell.is_selected, cell.is_today) {
        (true, _) => ('[', ']'),
        (false, true) => ('>', ' '),
        (false, false) => (' ', ' '),
    };
    let star = if cell.has_notes { '*' } else { ' ' };

    format!("{}{:>2}{}{}", open, cell.day, star, close)
}

fn days_with_notes<Tz: TimeZone>(month: &CalendarMonth, notes: &[Note], tz: &Tz) -> Vec<u32> {
    (1..=month.days_in_month())
        .filter(|day| month.has_notes_on_day(notes, *day, tz))
        .collect()
}

pub fn handle_calendar<R, Tz>(args: &CalendarArgs, repo: &R, today: NaiveDate, tz: &Tz) -> Result<()>
where
    R: NoteRepository + ?Sized,
    Tz: TimeZone,
{
    let state = calendar_state(args, today)?;
    let month = state.month();
    let notes = repo.list_all();
    let selected = state.selected_notes(&notes, tz);

    match args.format {
        OutputFormat::Human => {
            let weeks = month.grid(&notes, state.selected(), today, tz);
            print!("{}", render_month(&month, &weeks));
            println!();
            println!("Notes on {}:", state.selected().format("%Y-%m-%d"));
            print_notes(&selected, OutputFormat::Human)?;
        }
        OutputFormat::Json => {
            let listing = CalendarListing {
                month: month.first_day().format("%Y-%m").to_string(),
                selected: state.selected().format("%Y-%m-%d").to_string(),
                days_with_notes: days_with_notes(&month, &notes, tz),
                notes: selected.iter().map(|n| NoteListing::from(*n)).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(listing))?);
        }
        OutputFormat::Ids => print_notes(&selected, OutputFormat::Ids)?,
    }

    Ok(())
}
