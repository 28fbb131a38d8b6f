use {
    anyhow::Context,
    jiff::civil::{Date, Weekday},
};

use crate::{frame::FrameKind, recurrence::Recurrence, rule::RecurrenceRule};

/// The kinds of recurrence rules, without their parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleKind {
    YearlyByMonthDay,
    YearlyByDay,
    MonthlyByMonthDay,
    MonthlyByDay,
    Weekly,
    Daily,
}

impl RuleKind {
    /// Returns the kind of frame that rules of this kind step through.
    pub fn frame_kind(&self) -> FrameKind {
        match *self {
            RuleKind::YearlyByMonthDay | RuleKind::YearlyByDay => {
                FrameKind::Yearly
            }
            RuleKind::MonthlyByMonthDay | RuleKind::MonthlyByDay => {
                FrameKind::Monthly
            }
            RuleKind::Weekly => FrameKind::Weekly,
            RuleKind::Daily => FrameKind::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            RuleKind::YearlyByMonthDay => "yearly-by-month-day",
            RuleKind::YearlyByDay => "yearly-by-day",
            RuleKind::MonthlyByMonthDay => "monthly-by-month-day",
            RuleKind::MonthlyByDay => "monthly-by-day",
            RuleKind::Weekly => "weekly",
            RuleKind::Daily => "daily",
        }
    }

    /// Returns true when rules of this kind have the given parameter.
    fn accepts(&self, param: Param) -> bool {
        match *self {
            RuleKind::YearlyByMonthDay => {
                matches!(param, Param::Month | Param::Day)
            }
            RuleKind::YearlyByDay => {
                matches!(param, Param::Month | Param::Nth | Param::Weekday)
            }
            RuleKind::MonthlyByMonthDay => matches!(param, Param::Day),
            RuleKind::MonthlyByDay => {
                matches!(param, Param::Nth | Param::Weekday)
            }
            RuleKind::Weekly => matches!(param, Param::Weekday),
            RuleKind::Daily => false,
        }
    }
}

impl std::str::FromStr for RuleKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<RuleKind> {
        use self::RuleKind::*;

        let kind = match &*s.to_lowercase() {
            "yearly-by-month-day" | "yearly-by-monthday" => YearlyByMonthDay,
            "yearly-by-day" => YearlyByDay,
            "monthly-by-month-day" | "monthly-by-monthday" => {
                MonthlyByMonthDay
            }
            "monthly-by-day" => MonthlyByDay,
            "weekly" => Weekly,
            "daily" => Daily,
            unk => anyhow::bail!("unrecognized recurrence kind: `{unk}`"),
        };
        Ok(kind)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
enum Param {
    Month,
    Day,
    Nth,
    Weekday,
}

impl Param {
    fn as_str(&self) -> &'static str {
        match *self {
            Param::Month => "month",
            Param::Day => "day",
            Param::Nth => "nth",
            Param::Weekday => "weekday",
        }
    }
}

/// A builder for constructing a valid recurrence.
///
/// Any rule parameter that isn't set explicitly is derived from the first
/// date:
///
/// * `month` is the month of the first date.
/// * `day` is the day of the first date.
/// * `nth` is the week of the month the first date falls in, i.e.,
/// `(day + 6) / 7`. So the 29th, 30th and 31st are always the 5th weekday
/// of their month.
/// * `weekday` is the weekday of the first date.
///
/// Setting a parameter that a rule kind doesn't have, e.g., `day` for a
/// weekly rule, is an error reported by `build`.
#[derive(Clone, Debug)]
pub struct RecurrenceBuilder {
    kind: RuleKind,
    first: Date,
    until: Option<Date>,
    interval: i32,
    week_start: Weekday,
    month: Option<i8>,
    day: Option<i8>,
    nth: Option<i8>,
    weekday: Option<Weekday>,
}

impl RecurrenceBuilder {
    pub(crate) fn new(kind: RuleKind, first: Date) -> RecurrenceBuilder {
        RecurrenceBuilder {
            kind,
            first,
            until: None,
            interval: 1,
            week_start: Weekday::Monday,
            month: None,
            day: None,
            nth: None,
            weekday: None,
        }
    }

    pub(crate) fn from_rule(
        rule: RecurrenceRule,
        first: Date,
    ) -> RecurrenceBuilder {
        let (kind, month, day, nth, weekday) = match rule {
            RecurrenceRule::YearlyByMonthDay { month, day } => (
                RuleKind::YearlyByMonthDay,
                Some(month),
                Some(day),
                None,
                None,
            ),
            RecurrenceRule::YearlyByDay { month, nth, weekday } => (
                RuleKind::YearlyByDay,
                Some(month),
                None,
                Some(nth),
                Some(weekday),
            ),
            RecurrenceRule::MonthlyByMonthDay { day } => {
                (RuleKind::MonthlyByMonthDay, None, Some(day), None, None)
            }
            RecurrenceRule::MonthlyByDay { nth, weekday } => {
                (RuleKind::MonthlyByDay, None, None, Some(nth), Some(weekday))
            }
            RecurrenceRule::Weekly { weekday } => {
                (RuleKind::Weekly, None, None, None, Some(weekday))
            }
            RecurrenceRule::Daily => (RuleKind::Daily, None, None, None, None),
        };
        let mut builder = RecurrenceBuilder::new(kind, first);
        builder.month = month;
        builder.day = day;
        builder.nth = nth;
        builder.weekday = weekday;
        builder
    }

    pub fn build(&self) -> anyhow::Result<Recurrence> {
        for (param, set) in [
            (Param::Month, self.month.is_some()),
            (Param::Day, self.day.is_some()),
            (Param::Nth, self.nth.is_some()),
            (Param::Weekday, self.weekday.is_some()),
        ] {
            anyhow::ensure!(
                !set || self.kind.accepts(param),
                "the '{param}' parameter cannot be used \
                 with {kind} recurrences",
                param = param.as_str(),
                kind = self.kind,
            );
        }
        anyhow::ensure!(
            self.interval >= 1,
            "interval value of `{}` is invalid \
             (interval must be greater than or equal to 1)",
            self.interval,
        );
        if let Some(until) = self.until {
            anyhow::ensure!(
                self.first <= until,
                "until date {until} is before the first date {first}",
                first = self.first,
            );
        }

        let rule = self.rule();
        rule.validate().with_context(|| {
            format!("invalid {kind} recurrence", kind = self.kind)
        })?;
        log::debug!(
            "building recurrence '{rule}' anchored at {first} \
             (interval {interval}, weeks start on {week_start:?})",
            first = self.first,
            interval = self.interval,
            week_start = self.week_start,
        );
        Recurrence::new(
            rule,
            self.first,
            self.interval,
            self.week_start,
            self.until,
        )
    }

    /// Returns the rule with every unset parameter derived from the first
    /// date.
    fn rule(&self) -> RecurrenceRule {
        let first = self.first;
        let month = self.month.unwrap_or(first.month());
        let day = self.day.unwrap_or(first.day());
        let nth = self.nth.unwrap_or((first.day() + 6) / 7);
        let weekday = self.weekday.unwrap_or(first.weekday());
        match self.kind {
            RuleKind::YearlyByMonthDay => {
                RecurrenceRule::YearlyByMonthDay { month, day }
            }
            RuleKind::YearlyByDay => {
                RecurrenceRule::YearlyByDay { month, nth, weekday }
            }
            RuleKind::MonthlyByMonthDay => {
                RecurrenceRule::MonthlyByMonthDay { day }
            }
            RuleKind::MonthlyByDay => {
                RecurrenceRule::MonthlyByDay { nth, weekday }
            }
            RuleKind::Weekly => RecurrenceRule::Weekly { weekday },
            RuleKind::Daily => RecurrenceRule::Daily,
        }
    }

    /// No dates after `until` are produced. It must not precede the first
    /// date.
    pub fn until(&mut self, until: Date) -> &mut RecurrenceBuilder {
        self.until = Some(until);
        self
    }

    /// Only every `interval`-th frame is considered. The default is `1`.
    pub fn interval(&mut self, interval: i32) -> &mut RecurrenceBuilder {
        self.interval = interval;
        self
    }

    /// Sets the day on which weeks begin. The default is Monday.
    ///
    /// This only has an effect on weekly recurrences.
    pub fn week_start(&mut self, weekday: Weekday) -> &mut RecurrenceBuilder {
        self.week_start = weekday;
        self
    }

    pub fn month(&mut self, month: i8) -> &mut RecurrenceBuilder {
        self.month = Some(month);
        self
    }

    /// Sets the day of the month. Negative values count backwards from the
    /// end of the month.
    pub fn day(&mut self, day: i8) -> &mut RecurrenceBuilder {
        self.day = Some(day);
        self
    }

    pub fn nth(&mut self, nth: i8) -> &mut RecurrenceBuilder {
        self.nth = Some(nth);
        self
    }

    pub fn weekday(&mut self, weekday: Weekday) -> &mut RecurrenceBuilder {
        self.weekday = Some(weekday);
        self
    }
}
