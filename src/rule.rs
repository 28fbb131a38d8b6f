use jiff::civil::{Date, Weekday};

use crate::{calendar, frame::FrameKind};

/// A rule for picking at most one date out of every frame.
///
/// Each variant corresponds to a frame kind (see `RecurrenceRule::frame_kind`)
/// and is applied to the first day of a frame by
/// `RecurrenceRule::occurrence_in_frame`.
///
/// Days of the month may be negative, in which case they count backwards
/// from the end of the month. That is, `-1` is always the last day of the
/// month. Similarly, `nth` may be negative to count weekdays backwards from
/// the end of the month.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RecurrenceRule {
    /// The same month and day every year, e.g., every August 5th.
    YearlyByMonthDay { month: i8, day: i8 },
    /// The `nth` weekday of a particular month every year, e.g., the first
    /// Friday in August.
    YearlyByDay { month: i8, nth: i8, weekday: Weekday },
    /// The same day every month, e.g., the 15th.
    MonthlyByMonthDay { day: i8 },
    /// The `nth` weekday of every month, e.g., the last Saturday.
    MonthlyByDay { nth: i8, weekday: Weekday },
    /// The same weekday every week.
    Weekly { weekday: Weekday },
    /// Every day.
    Daily,
}

impl RecurrenceRule {
    /// Returns the kind of frame this rule picks its dates from.
    pub fn frame_kind(&self) -> FrameKind {
        match *self {
            RecurrenceRule::YearlyByMonthDay { .. }
            | RecurrenceRule::YearlyByDay { .. } => FrameKind::Yearly,
            RecurrenceRule::MonthlyByMonthDay { .. }
            | RecurrenceRule::MonthlyByDay { .. } => FrameKind::Monthly,
            RecurrenceRule::Weekly { .. } => FrameKind::Weekly,
            RecurrenceRule::Daily => FrameKind::Daily,
        }
    }

    /// Returns the date this rule selects from the frame beginning at
    /// `frame`.
    ///
    /// `frame` must be the first day of a frame of this rule's kind. For
    /// weekly rules, that is the first day of the week (whatever day that
    /// may be).
    ///
    /// This returns `None` when the frame has no such date. For example,
    /// there is no April 31st and not every month has a 5th Saturday. This
    /// is not an error and iteration should just move on to the next frame.
    pub fn occurrence_in_frame(&self, frame: Date) -> Option<Date> {
        match *self {
            RecurrenceRule::YearlyByMonthDay { month, day } => {
                calendar::month_day(frame.year(), month, day)
            }
            RecurrenceRule::YearlyByDay { month, nth, weekday } => {
                calendar::nth_weekday_of_month(
                    frame.year(),
                    month,
                    nth,
                    weekday,
                )
            }
            RecurrenceRule::MonthlyByMonthDay { day } => {
                calendar::month_day(frame.year(), frame.month(), day)
            }
            RecurrenceRule::MonthlyByDay { nth, weekday } => {
                calendar::nth_weekday_of_month(
                    frame.year(),
                    frame.month(),
                    nth,
                    weekday,
                )
            }
            RecurrenceRule::Weekly { weekday } => {
                calendar::add_days(frame, weekday.since(frame.weekday()))
            }
            RecurrenceRule::Daily => Some(frame),
        }
    }

    /// Checks that every parameter of this rule is in range.
    ///
    /// A rule that passes validation may still fail to produce a date in
    /// some frames (e.g., the 31st of a monthly rule), but it is guaranteed
    /// to produce a date in at least some frames.
    pub fn validate(&self) -> anyhow::Result<()> {
        match *self {
            RecurrenceRule::YearlyByMonthDay { month, day } => {
                validate_month(month)?;
                validate_day(day)?;
                let max = calendar::max_days_in_month(month)?;
                anyhow::ensure!(
                    day.unsigned_abs() <= max.unsigned_abs(),
                    "day `{day}` never occurs in {month} \
                     (it has at most {max} days)",
                    month = MonthName(month),
                );
            }
            RecurrenceRule::YearlyByDay { month, nth, .. } => {
                validate_month(month)?;
                validate_nth(nth)?;
            }
            RecurrenceRule::MonthlyByMonthDay { day } => {
                validate_day(day)?;
            }
            RecurrenceRule::MonthlyByDay { nth, .. } => {
                validate_nth(nth)?;
            }
            RecurrenceRule::Weekly { .. } | RecurrenceRule::Daily => {}
        }
        Ok(())
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let wd = |weekday| calendar::weekday_abbreviation(weekday);
        let mon = MonthName;
        match *self {
            RecurrenceRule::YearlyByMonthDay { month, day } => {
                write!(f, "yearly on day {day} of {}", mon(month))
            }
            RecurrenceRule::YearlyByDay { month, nth, weekday } => {
                write!(f, "yearly on {} #{nth} of {}", wd(weekday), mon(month))
            }
            RecurrenceRule::MonthlyByMonthDay { day } => {
                write!(f, "monthly on day {day}")
            }
            RecurrenceRule::MonthlyByDay { nth, weekday } => {
                write!(f, "monthly on {} #{nth}", wd(weekday))
            }
            RecurrenceRule::Weekly { weekday } => {
                write!(f, "weekly on {}", wd(weekday))
            }
            RecurrenceRule::Daily => write!(f, "daily"),
        }
    }
}

/// Displays a month by its abbreviation, or by its number when it is out
/// of range.
struct MonthName(i8);

impl std::fmt::Display for MonthName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match calendar::month_abbreviation(self.0) {
            Some(abbr) => f.write_str(abbr),
            None => write!(f, "month {}", self.0),
        }
    }
}

fn validate_month(month: i8) -> anyhow::Result<()> {
    anyhow::ensure!(
        1 <= month && month <= 12,
        "invalid month `{month}` (values must be in range 1..=12)",
    );
    Ok(())
}

fn validate_day(day: i8) -> anyhow::Result<()> {
    anyhow::ensure!(
        day != 0 && -31 <= day && day <= 31,
        "invalid day of month `{day}` \
         (values must be in range 1..=31 or -31..=-1)",
    );
    Ok(())
}

fn validate_nth(nth: i8) -> anyhow::Result<()> {
    anyhow::ensure!(
        nth != 0 && -5 <= nth && nth <= 5,
        "invalid nth weekday `{nth}` \
         (values must be in range 1..=5 or -5..=-1)",
    );
    Ok(())
}
