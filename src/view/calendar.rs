//! Calendar projection: notes bucketed by local creation day.
//!
//! Every function takes the time zone explicitly. The CLI passes
//! `chrono::Local`; tests pin a fixed offset.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeZone};

use crate::domain::Note;

/// Returns the calendar date `note` was created on, in `tz`.
pub fn created_on<Tz: TimeZone>(note: &Note, tz: &Tz) -> NaiveDate {
    note.created().with_timezone(tz).date_naive()
}

/// Returns the notes created on `date` in `tz`, in input order.
pub fn notes_on<'a, Tz: TimeZone>(notes: &'a [Note], date: NaiveDate, tz: &Tz) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| created_on(note, tz) == date)
        .collect()
}

/// A displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Returns the month for `year`/`month` (1-12), or `None` if out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Returns day 1 of this month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Returns the following month.
    ///
    /// Month arithmetic always starts from day 1, so there is no overflow
    /// from long months into short ones.
    pub fn next(&self) -> Self {
        self.shift(1)
    }

    /// Returns the preceding month.
    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    /// Moves by `offset` months; saturates at the ends of chrono's range.
    pub fn shift(&self, offset: i32) -> Self {
        let months = Months::new(offset.unsigned_abs());
        let first = if offset >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        Self {
            first: first.unwrap_or(self.first),
        }
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }

    /// Number of blank cells before day 1 in a Sunday-first grid.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Returns the date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Returns true if `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Returns true if any note was created on `day` of this month.
    pub fn has_notes_on_day<Tz: TimeZone>(&self, notes: &[Note], day: u32, tz: &Tz) -> bool {
        let Some(date) = self.date(day) else {
            return false;
        };
        notes.iter().any(|note| created_on(note, tz) == date)
    }

    /// Builds the Sunday-first grid of weeks for this month.
    ///
    /// Cells before day 1 and after the last day are `None`.
    pub fn grid<Tz: TimeZone>(
        &self,
        notes: &[Note],
        selected: NaiveDate,
        today: NaiveDate,
        tz: &Tz,
    ) -> Vec<[Option<DayCell>; 7]> {
        let mut cells: Vec<Option<DayCell>> = vec![None; self.first_weekday_offset() as usize];

        for day in 1..=self.days_in_month() {
            let Some(date) = self.date(day) else { continue };
            cells.push(Some(DayCell {
                day,
                has_notes: notes.iter().any(|note| created_on(note, tz) == date),
                is_today: date == today,
                is_selected: date == selected,
            }));
        }

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                for (slot, cell) in week.iter_mut().zip(chunk) {
                    *slot = *cell;
                }
                week
            })
            .collect()
    }
}

impl fmt::Display for CalendarMonth {
    /// Formats as `January 2024`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

impl FromStr for CalendarMonth {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| format!("invalid month (expected YYYY-MM): {s}"))
    }
}

/// One day cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub has_notes: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Calendar view state: the selected day, which also fixes the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    selected: NaiveDate,
}

impl CalendarState {
    pub fn new(selected: NaiveDate) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Returns the month being displayed.
    pub fn month(&self) -> CalendarMonth {
        CalendarMonth::of(self.selected)
    }

    /// Moves the selection to day 1 of the month `offset` months away.
    pub fn change_month(&mut self, offset: i32) {
        self.selected = self.month().shift(offset).first_day();
    }

    /// Selects `day` of the displayed month; out-of-range days are ignored.
    pub fn select_day(&mut self, day: u32) {
        if let Some(date) = self.month().date(day) {
            self.selected = date;
        }
    }

    /// Returns the notes created on the selected day.
    pub fn selected_notes<'a, Tz: TimeZone>(&self, notes: &'a [Note], tz: &Tz) -> Vec<&'a Note> {
        notes_on(notes, self.selected, tz)
    }
}
