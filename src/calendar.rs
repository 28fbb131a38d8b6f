/*!
Small calendar helpers shared by frames and recurrence rules.

Everything here works on Jiff's civil `Date` and `Weekday` types. Functions
that can fail only because a date would leave Jiff's supported range either
return an error (when that is a caller problem) or `None` (when it is just
"no such date").
*/

use {
    anyhow::Context,
    jiff::{
        ToSpan,
        civil::{Date, Weekday},
    },
};

/// Returns the start of the week that the given date resides in.
///
/// The starting point of the week is determined by `start`.
pub fn first_of_week(start: Weekday, date: Date) -> anyhow::Result<Date> {
    let wd = date.weekday();
    if start == wd {
        Ok(date)
    } else {
        date.nth_weekday(-1, start).with_context(|| {
            format!(
                "failed to find first day of week containing \
                 {date}, for weeks starting on {start:?}",
            )
        })
    }
}

/// Converts a weekday number to a weekday, where `0` is Sunday and `6` is
/// Saturday.
pub fn weekday_from_number(number: i8) -> anyhow::Result<Weekday> {
    anyhow::ensure!(
        0 <= number && number <= 6,
        "invalid weekday number `{number}` \
         (values must be in range 0..=6, where 0 is Sunday)",
    );
    Ok(Weekday::from_sunday_zero_offset(number)?)
}

/// The inverse of `weekday_from_number`.
pub fn weekday_number(weekday: Weekday) -> i8 {
    weekday.to_sunday_zero_offset()
}

/// Returns a three letter English abbreviation for the given weekday.
pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sun",
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
    }
}

/// Returns a three letter English abbreviation for the given month.
///
/// `None` is returned when `month` is not in the range `1..=12`.
pub fn month_abbreviation(month: i8) -> Option<&'static str> {
    let abbr = match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => return None,
    };
    Some(abbr)
}

/// Returns the `nth` weekday of the given month.
///
/// A positive `nth` counts from the first day of the month and a negative
/// `nth` counts backwards from the last day. `None` is returned when there
/// is no such weekday in the month, e.g., the 5th Saturday of a month with
/// only four Saturdays.
pub fn nth_weekday_of_month(
    year: i16,
    month: i8,
    nth: i8,
    weekday: Weekday,
) -> Option<Date> {
    Date::new(year, month, 1).ok()?.nth_weekday_of_month(nth, weekday).ok()
}

/// Returns the date for the given day of the month.
///
/// A negative `day` counts backwards from the end of the month, so `-1` is
/// always the last day of the month. `None` is returned when the day doesn't
/// exist in that month, e.g., February 30 or April 31.
pub fn month_day(year: i16, month: i8, day: i8) -> Option<Date> {
    if day >= 0 {
        return Date::new(year, month, day).ok();
    }
    let last = Date::new(year, month, 1).ok()?.last_of_month();
    // `last.day()` is at most 31 and `day` is negative, so this can't
    // overflow.
    let day = last.day() + day + 1;
    if day < 1 {
        return None;
    }
    Date::new(year, month, day).ok()
}

/// Returns the largest number of days the given month can ever have.
///
/// That is, February is considered to have 29 days.
pub fn max_days_in_month(month: i8) -> anyhow::Result<i8> {
    let date = Date::new(2000, month, 1).with_context(|| {
        format!("invalid month `{month}` (values must be in range 1..=12)")
    })?;
    Ok(date.days_in_month())
}

/// Returns the number of whole days from `d1` to `d2`.
///
/// This is negative when `d2 < d1`.
pub fn days_between(d1: Date, d2: Date) -> i64 {
    // Civil dates have no time zone transitions, so every day is exactly
    // 86,400 seconds long.
    d1.duration_until(d2).as_secs() / 86_400
}

/// Returns the difference in calendar years from `d1` to `d2`.
pub fn years_between(d1: Date, d2: Date) -> i64 {
    i64::from(d2.year()) - i64::from(d1.year())
}

/// Returns the difference in calendar months from `d1` to `d2`.
///
/// Days are ignored, so 2021-01-31 and 2021-02-01 are one month apart.
pub fn months_between(d1: Date, d2: Date) -> i64 {
    let months = |d: Date| i64::from(d.year()) * 12 + i64::from(d.month());
    months(d2) - months(d1)
}

/// Returns the number of weeks from the week containing `d1` to the week
/// containing `d2`, where weeks start on `start`.
///
/// `d1` must already be the first day of a week starting on `start`. This
/// avoids needing to compute the start of a week for `d2`, which can fail at
/// the boundaries of Jiff's supported range.
pub fn weeks_between(start: Weekday, d1: Date, d2: Date) -> i64 {
    debug_assert_eq!(d1.weekday(), start);
    let offset = i64::from(d2.weekday().since(start));
    (days_between(d1, d2) - offset).div_euclid(7)
}

/// Adds the given number of days to a date, returning `None` on overflow.
pub fn add_days(date: Date, days: i8) -> Option<Date> {
    date.checked_add(days.days()).ok()
}
