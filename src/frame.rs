/*!
Frames are the calendar units that recurrences step through.

A frame is a year, a month, a week or a single day. `Frames` is an iterator
over the first day of every `interval`-th frame, starting with the frame that
contains some given date. Recurrence rules then pick (at most) one date out
of each frame.
*/

use {
    anyhow::Context,
    jiff::{
        Span,
        civil::{Date, Weekday},
    },
};

use crate::calendar;

/// The calendar unit that a sequence of frames steps through.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FrameKind {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl FrameKind {
    /// Returns the first day of the frame that `date` resides in.
    ///
    /// `week_start` is only consulted for weekly frames.
    pub fn beginning(
        &self,
        date: Date,
        week_start: Weekday,
    ) -> anyhow::Result<Date> {
        Ok(match *self {
            FrameKind::Yearly => date.first_of_year(),
            FrameKind::Monthly => date.first_of_month(),
            FrameKind::Weekly => calendar::first_of_week(week_start, date)?,
            FrameKind::Daily => date,
        })
    }

    /// Returns the number of frames from the frame starting at `first` to
    /// the frame containing `date`.
    ///
    /// `first` must be the beginning of a frame of this kind.
    fn distance(&self, first: Date, date: Date, week_start: Weekday) -> i64 {
        match *self {
            FrameKind::Yearly => calendar::years_between(first, date),
            FrameKind::Monthly => calendar::months_between(first, date),
            FrameKind::Weekly => {
                calendar::weeks_between(week_start, first, date)
            }
            FrameKind::Daily => calendar::days_between(first, date),
        }
    }

    /// Adds `frames` frames to the given date.
    ///
    /// This returns `None` when the result would be outside of Jiff's
    /// supported range.
    fn advance(&self, date: Date, frames: i64) -> Option<Date> {
        let span = match *self {
            FrameKind::Yearly => {
                Span::new().try_months(frames.checked_mul(12)?).ok()?
            }
            FrameKind::Monthly => Span::new().try_months(frames).ok()?,
            FrameKind::Weekly => {
                Span::new().try_days(frames.checked_mul(7)?).ok()?
            }
            FrameKind::Daily => Span::new().try_days(frames).ok()?,
        };
        date.checked_add(span).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            FrameKind::Yearly => "yearly",
            FrameKind::Monthly => "monthly",
            FrameKind::Weekly => "weekly",
            FrameKind::Daily => "daily",
        }
    }
}

impl std::str::FromStr for FrameKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<FrameKind> {
        use self::FrameKind::*;

        let kind = match &*s.to_lowercase() {
            "yearly" | "year" | "yr" | "y" => Yearly,
            // No `m`. Like Jiff's span units, `m` is minutes and `mo`
            // is months.
            "monthly" | "month" | "mo" => Monthly,
            "weekly" | "week" | "wk" | "w" => Weekly,
            "daily" | "day" | "d" => Daily,
            unk => anyhow::bail!("unrecognized frame kind: `{unk}`"),
        };
        Ok(kind)
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An iterator over the first day of every `interval`-th frame.
///
/// The iterator is practically infinite. It only stops once the next frame
/// would start beyond Jiff's maximum supported date.
///
/// The position of the iterator is tracked as the number of intervals since
/// the first frame. Every frame start is computed directly from the first
/// frame, which makes `rewind` and `forward_to` constant time operations.
#[derive(Clone, Debug)]
pub struct Frames {
    kind: FrameKind,
    first: Date,
    interval: i32,
    week_start: Weekday,
    /// The number of intervals since `first` of the next frame to emit.
    ///
    /// When this is `None`, iteration has ceased.
    cycle: Option<i64>,
}

impl Frames {
    /// Create a new sequence of frames beginning with the frame containing
    /// `date`.
    ///
    /// `interval` must be at least `1`. `week_start` is only used by weekly
    /// frames.
    pub fn new(
        kind: FrameKind,
        date: Date,
        interval: i32,
        week_start: Weekday,
    ) -> anyhow::Result<Frames> {
        anyhow::ensure!(
            interval >= 1,
            "interval value of `{interval}` is invalid \
             (interval must be greater than or equal to 1)",
        );
        let first = kind.beginning(date, week_start).with_context(|| {
            format!("could not find the {kind} frame containing {date}")
        })?;
        Ok(Frames { kind, first, interval, week_start, cycle: Some(0) })
    }

    /// Returns the kind of frame this iterator steps through.
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Returns the first day of the first frame.
    pub fn first_frame(&self) -> Date {
        self.first
    }

    /// Returns the number of frames between each emitted frame start.
    pub fn interval(&self) -> i32 {
        self.interval
    }

    /// Returns the day on which weekly frames begin.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Move this iterator back to the first frame.
    pub fn rewind(&mut self) -> &mut Frames {
        self.cycle = Some(0);
        self
    }

    /// Move this iterator to the earliest frame, on the original cadence,
    /// that doesn't start before the frame containing `date`.
    ///
    /// This is not the same as starting over from `date`. For example, a
    /// yearly sequence of frames starting in 2021 with an interval of 2
    /// forwarded to 2100 will next emit 2101-01-01, and not 2100-01-01.
    ///
    /// When `date` is in or before the first frame, this is equivalent to
    /// `rewind`.
    pub fn forward_to(&mut self, date: Date) -> &mut Frames {
        let frames = self.kind.distance(self.first, date, self.week_start);
        let interval = i64::from(self.interval);
        let cycles = if frames > 0 {
            // Round up to the next multiple of our interval.
            (frames + (interval - 1)) / interval
        } else {
            0
        };
        log::debug!(
            "forwarding {kind} frames starting at {first} \
             (interval {interval}) to {date}: skipping {cycles} interval(s)",
            kind = self.kind,
            first = self.first,
        );
        self.cycle = Some(cycles);
        self
    }

    /// Returns the first day of the frame that is `cycle` intervals after
    /// the first frame.
    fn start_of_cycle(&self, cycle: i64) -> Option<Date> {
        let frames = cycle.checked_mul(i64::from(self.interval))?;
        self.kind.advance(self.first, frames)
    }
}

impl Iterator for Frames {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let cycle = self.cycle?;
        let Some(start) = self.start_of_cycle(cycle) else {
            self.cycle = None;
            return None;
        };
        self.cycle = cycle.checked_add(1);
        Some(start)
    }
}

impl std::iter::FusedIterator for Frames {}
