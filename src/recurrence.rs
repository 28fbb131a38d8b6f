/*!
Recurrences turn a rule and an anchor date into a lazy sequence of dates.

A `Recurrence` walks frames (years, months, weeks or days) starting with the
frame containing its first date, and asks its rule for the occurrence within
each frame. The first date itself is always part of the sequence, even when
it doesn't match the rule. This mirrors how `DTSTART` works in RFC 5545.
*/

use jiff::civil::{Date, Weekday};

use crate::{
    builder::{RecurrenceBuilder, RuleKind},
    frame::Frames,
    rule::RecurrenceRule,
    sequence::DateSequence,
};

/// A lazy and (practically) unbounded sequence of dates generated by a
/// recurrence rule.
///
/// Use one of the builder constructors, e.g., `Recurrence::monthly_by_day`,
/// to create one. Omitted rule parameters are derived from the first date.
///
/// # Example
///
/// ```
/// use enumdate::Recurrence;
/// use jiff::civil::date;
///
/// // The first Friday of every August.
/// let rec = Recurrence::yearly_by_day(date(2018, 8, 3)).build()?;
/// let dates: Vec<_> = rec.take(3).collect();
/// assert_eq!(dates, vec![
///     date(2018, 8, 3),
///     date(2019, 8, 2),
///     date(2020, 8, 7),
/// ]);
///
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Recurrence {
    rule: RecurrenceRule,
    first: Date,
    frames: Frames,
    /// Occurrences before this date are not emitted. This starts as the
    /// first date and is moved by `forward_to`.
    begin: Date,
    until: Option<Date>,
    state: State,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// The first date has not been considered yet.
    Anchor,
    /// Occurrences are being pulled out of frames.
    Frames,
    /// The sequence has ended. Only `rewind` or `forward_to` can revive it.
    Done,
}

impl Recurrence {
    /// Create a builder for a recurrence of the given kind anchored at
    /// `first`.
    pub fn builder(kind: RuleKind, first: Date) -> RecurrenceBuilder {
        RecurrenceBuilder::new(kind, first)
    }

    /// Create a builder seeded with a fully specified rule.
    ///
    /// The rule is still validated when the recurrence is built.
    pub fn with_rule(rule: RecurrenceRule, first: Date) -> RecurrenceBuilder {
        RecurrenceBuilder::from_rule(rule, first)
    }

    /// The same month and day every year.
    ///
    /// Both default to the month and day of `first`.
    pub fn yearly_by_month_day(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::YearlyByMonthDay, first)
    }

    /// The `nth` weekday of some month every year.
    ///
    /// The month, weekday and `nth` all default to where `first` is. For
    /// example, 2018-08-03 is the first Friday in August.
    pub fn yearly_by_day(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::YearlyByDay, first)
    }

    /// The same day of every month. Defaults to the day of `first`.
    pub fn monthly_by_month_day(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::MonthlyByMonthDay, first)
    }

    /// The `nth` weekday of every month.
    pub fn monthly_by_day(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::MonthlyByDay, first)
    }

    /// The same weekday every week. Defaults to the weekday of `first`.
    pub fn weekly(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::Weekly, first)
    }

    /// Every day.
    pub fn daily(first: Date) -> RecurrenceBuilder {
        Recurrence::builder(RuleKind::Daily, first)
    }

    /// Assemble a recurrence from parts that have already been validated.
    pub(crate) fn new(
        rule: RecurrenceRule,
        first: Date,
        interval: i32,
        week_start: Weekday,
        until: Option<Date>,
    ) -> anyhow::Result<Recurrence> {
        let kind = rule.frame_kind();
        let frames = Frames::new(kind, first, interval, week_start)?;
        Ok(Recurrence {
            rule,
            first,
            frames,
            begin: first,
            until,
            state: State::Anchor,
        })
    }

    /// Returns the rule used to pick dates out of each frame.
    pub fn rule(&self) -> RecurrenceRule {
        self.rule
    }

    /// Returns the anchor date of this recurrence.
    pub fn first_date(&self) -> Date {
        self.first
    }

    /// Returns the number of frames between each candidate occurrence.
    pub fn interval(&self) -> i32 {
        self.frames.interval()
    }

    /// Returns the day that weeks start on.
    pub fn week_start(&self) -> Weekday {
        self.frames.week_start()
    }

    /// Returns the upper bound of this recurrence, if one is set.
    pub fn until_date(&self) -> Option<Date> {
        self.until
    }

    fn exceeds_until(&self, date: Date) -> bool {
        self.until.is_some_and(|until| date > until)
    }

    /// Pulls the next occurrence out of the frames, skipping frames without
    /// an eligible date.
    fn next_from_frames(&mut self) -> Option<Date> {
        while let Some(frame) = self.frames.next() {
            if self.exceeds_until(frame) {
                return None;
            }
            let Some(date) = self.rule.occurrence_in_frame(frame) else {
                log::trace!(
                    "no occurrence of '{}' in frame starting at {frame}",
                    self.rule,
                );
                continue;
            };
            if self.exceeds_until(date) {
                return None;
            }
            if date < self.begin || date == self.first {
                continue;
            }
            return Some(date);
        }
        None
    }
}

impl Iterator for Recurrence {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.state == State::Anchor {
            self.state = State::Frames;
            if self.first >= self.begin && !self.exceeds_until(self.first) {
                return Some(self.first);
            }
        }
        if self.state == State::Done {
            return None;
        }
        let next = self.next_from_frames();
        if next.is_none() {
            self.state = State::Done;
        }
        next
    }
}

impl std::iter::FusedIterator for Recurrence {}

impl DateSequence for Recurrence {
    fn rewind(&mut self) -> &mut Recurrence {
        self.frames.rewind();
        self.state = State::Anchor;
        self
    }

    /// Move this recurrence to the first occurrence on or after `date`.
    ///
    /// The cadence of the recurrence is kept. That is, with an interval of
    /// `2`, the frames considered after forwarding are still every other
    /// frame counting from the first date.
    fn forward_to(&mut self, date: Date) -> &mut Recurrence {
        log::debug!(
            "forwarding '{rule}' anchored at {first} to {date}",
            rule = self.rule,
            first = self.first,
        );
        self.frames.forward_to(date);
        // Nothing precedes the first date, even in its own frame.
        self.begin = date.max(self.first);
        self.state = State::Anchor;
        self
    }

    fn until(&mut self, date: Date) -> &mut Recurrence {
        self.until = Some(date);
        self
    }
}
