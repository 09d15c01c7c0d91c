//! Derivations from group labels and the calendar.
//!
//! Group labels look like `2131`: the first two characters are the last two
//! digits of the admission year and the third is the course year.

use chrono::{Datelike, NaiveDate};

/// Century offset applied to the two-digit admission year.
pub const ADMISSION_CENTURY: i32 = 2000;
/// Earliest admission year accepted at registration.
pub const MIN_ADMISSION_YEAR: i32 = 2000;
/// Course year assumed when the group label does not encode one.
pub const DEFAULT_COURSE_YEAR: u32 = 1;

/// Half of the academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// February through July.
    Spring,
    /// August through January.
    Autumn,
}

impl Term {
    /// Term in effect during `month` (1-12).
    pub fn for_month(month: u32) -> Self {
        if (2..=7).contains(&month) {
            Self::Spring
        } else {
            Self::Autumn
        }
    }
}

fn digit_at(label: &str, position: usize) -> Option<u32> {
    label.chars().nth(position).and_then(|c| c.to_digit(10))
}

/// Admission year encoded in the first two characters of `group`.
///
/// Returns `None` unless both characters are decimal digits.
///
/// # Examples
/// ```
/// use electives::domain::admission_year_from_group;
///
/// assert_eq!(admission_year_from_group("2131"), Some(2021));
/// assert_eq!(admission_year_from_group("A1"), None);
/// ```
pub fn admission_year_from_group(group: &str) -> Option<i32> {
    let tens = digit_at(group, 0)?;
    let units = digit_at(group, 1)?;
    let short = i32::try_from(tens * 10 + units).ok()?;
    Some(ADMISSION_CENTURY + short)
}

/// Course year encoded in the third character of `group`.
///
/// Falls back to [`DEFAULT_COURSE_YEAR`] when the label is missing, shorter
/// than three characters, or the character is not a digit in `1..=9`.
pub fn course_year_from_group(group: Option<&str>) -> u32 {
    group
        .and_then(|label| digit_at(label, 2))
        .filter(|year| *year >= 1)
        .unwrap_or(DEFAULT_COURSE_YEAR)
}

/// Semester number studied in `course_year` during `month`.
///
/// # Examples
/// ```
/// use electives::domain::semester_for;
///
/// assert_eq!(semester_for(3, 3), 6);
/// assert_eq!(semester_for(3, 10), 5);
/// ```
pub fn semester_for(course_year: u32, month: u32) -> i32 {
    let year = i32::try_from(course_year).unwrap_or(i32::MAX / 2);
    match Term::for_month(month) {
        Term::Spring => year * 2,
        Term::Autumn => year * 2 - 1,
    }
}

/// Latest admission year accepted on `today`.
pub fn max_admission_year(today: NaiveDate) -> i32 {
    today.year() + 1
}

/// Whether `year` is an acceptable admission year on `today`.
pub fn admission_year_in_range(year: i32, today: NaiveDate) -> bool {
    (MIN_ADMISSION_YEAR..=max_admission_year(today)).contains(&year)
}
