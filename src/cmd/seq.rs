use std::io::Write;

use anyhow::Context;

use enumdate::{DateList, DateSequence, Merge, Recurrence, RuleKind, calendar};

use crate::{
    args::{
        self, Usage,
        flags::{self, CommaSequence},
    },
    style::Theme,
};

const USAGE: &'static str = r#"
Generate the dates of one or more recurrence rules, in chronological order.

The first date is always part of the sequence, even when it doesn't match
the rule. Every subsequent date matches the rule. If a first date is not
given, then today is used.

Rule parameters that aren't given are taken from the first date. For
example, `monthly-by-day` without `-n/--nth` or `-w/--weekday` repeats on
the same weekday in the same week of the month as the first date.

Parameter flags accept comma separated lists. Every combination of the
values given becomes its own recurrence, and all of them are merged into one
sequence without duplicates.

Unless the `-c/--count` or `-u/--until` flags are used, this command will
generate dates until the maximum supported date (9999-12-31) is reached.

USAGE:
    enumdate seq <rule> [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the last Friday of the month, for the next four months:

        $ enumdate seq monthly-by-day -n -1 -w fri -c4 2024-07-26
        2024-07-26
        2024-08-30
        2024-09-27
        2024-10-25

    %snip-start%

    Every Monday, Wednesday and Friday, starting on a Monday:

        $ enumdate seq weekly -w mon,wed,fri -c6 2024-07-22
        2024-07-22
        2024-07-24
        2024-07-26
        2024-07-29
        2024-07-31
        2024-08-02

    The last day of every month, along with the day of the week:

        $ enumdate seq monthly-by-month-day -d -1 -W -c3 2024-01-31
        2024-01-31 Wed
        2024-02-29 Thu
        2024-03-31 Sun

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let mut seq = config.sequence()?;
    if let Some(ref date) = config.forward_to {
        seq.forward_to(date.get());
    }
    let mut wtr = std::io::stdout().lock();
    for date in seq.take(config.count.unwrap_or(usize::MAX)) {
        if config.with_weekday {
            let weekday = calendar::weekday_abbreviation(date.weekday());
            writeln!(wtr, "{date} {}", Theme::stdout().weekday(weekday))?;
        } else {
            writeln!(wtr, "{date}")?;
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    rule: Option<RuleKind>,
    date: Option<flags::Date>,
    months: Vec<CommaSequence<flags::Month>>,
    days: Vec<CommaSequence<i8>>,
    nths: Vec<CommaSequence<i8>>,
    weekdays: Vec<CommaSequence<flags::Weekday>>,
    interval: Option<i32>,
    week_start: flags::Weekday,
    until: Option<flags::Date>,
    forward_to: Option<flags::Date>,
    count: Option<usize>,
    also: Vec<CommaSequence<flags::Date>>,
    with_weekday: bool,
}

impl Config {
    /// Builds one recurrence for every combination of rule parameters, and
    /// merges them together with any extra dates.
    fn sequence(&self) -> anyhow::Result<Merge> {
        let kind = self.rule.context("missing required <rule>")?;
        let first = self.date.unwrap_or_else(flags::Date::today).get();
        let months = choices(self.months.iter().flatten().map(|m| m.get()));
        let days = choices(self.days.iter().flatten().copied());
        let nths = choices(self.nths.iter().flatten().copied());
        let weekdays =
            choices(self.weekdays.iter().flatten().map(|wd| wd.get()));

        let mut merge: Merge = Merge::new();
        for &month in months.iter() {
            for &day in days.iter() {
                for &nth in nths.iter() {
                    for &weekday in weekdays.iter() {
                        let mut b = Recurrence::builder(kind, first);
                        b.interval(self.interval.unwrap_or(1))
                            .week_start(self.week_start.get());
                        if let Some(month) = month {
                            b.month(month);
                        }
                        if let Some(day) = day {
                            b.day(day);
                        }
                        if let Some(nth) = nth {
                            b.nth(nth);
                        }
                        if let Some(weekday) = weekday {
                            b.weekday(weekday);
                        }
                        if let Some(ref until) = self.until {
                            b.until(until.get());
                        }
                        merge.add(b.build()?);
                    }
                }
            }
        }
        if !self.also.is_empty() {
            let mut list: DateList =
                self.also.iter().flatten().map(|d| d.get()).collect();
            if let Some(ref until) = self.until {
                list.until(until.get());
            }
            merge.add(list);
        }
        Ok(merge)
    }
}

/// Returns every value given for a parameter, or a single `None` when no
/// value was given, so that the parameter is derived from the first date.
fn choices<T>(values: impl Iterator<Item = T>) -> Vec<Option<T>> {
    let mut choices: Vec<Option<T>> = values.map(Some).collect();
    if choices.is_empty() {
        choices.push(None);
    }
    choices
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.rule.is_none() {
                    self.rule = Some(args::parse_value(v, "<rule>")?);
                    return Ok(true);
                }
                if self.date.is_none() {
                    self.date = Some(args::parse_value(v, "<date>")?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('m') | Long("month") => {
                self.months.push(args::parse(p, "-m/--month")?);
            }
            Short('d') | Long("day") => {
                self.days.push(args::parse(p, "-d/--day")?);
            }
            Short('n') | Long("nth") => {
                self.nths.push(args::parse(p, "-n/--nth")?);
            }
            Short('w') | Long("weekday") => {
                self.weekdays.push(args::parse(p, "-w/--weekday")?);
            }
            Short('i') | Long("interval") => {
                self.interval = Some(args::parse(p, "-i/--interval")?);
            }
            Long("week-start") => {
                self.week_start = args::parse(p, "--week-start")?;
            }
            Short('u') | Long("until") => {
                self.until = Some(args::parse(p, "-u/--until")?);
            }
            Short('f') | Long("forward-to") => {
                self.forward_to = Some(args::parse(p, "-f/--forward-to")?);
            }
            Short('c') | Long("count") => {
                self.count = Some(args::parse(p, "-c/--count")?);
            }
            Short('a') | Long("also") => {
                self.also.push(args::parse(p, "-a/--also")?);
            }
            Short('W') | Long("with-weekday") => {
                self.with_weekday = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const RULE: Usage = Usage::arg(
            "<rule>",
            "The kind of recurrence rule, e.g., weekly or monthly-by-day.",
            r#"
The kind of recurrence rule. One of the following:

yearly-by-month-day: the same month and day every year, e.g., Aug 5. Uses
-m/--month and -d/--day.

yearly-by-day: the nth weekday of a month every year, e.g., the first Friday
of August. Uses -m/--month, -n/--nth and -w/--weekday.

monthly-by-month-day: the same day every month, e.g., the 15th. Uses
-d/--day.

monthly-by-day: the nth weekday every month, e.g., the last Friday. Uses
-n/--nth and -w/--weekday.

weekly: the same weekday every week. Uses -w/--weekday.

daily: every day.

Using a parameter flag with a rule that doesn't use it is an error.
"#,
        );
        const MONTH: Usage = Usage::flag(
            "-m/--month <month-list>",
            "Provide one or more months of the year.",
            r#"
Provide one or more months of the year.

Months may be given by name (e.g., jan, February) or by number, where 1 is
January and 12 is December.

Multiple months can be specified with repeated use of this flag, or by
separating values with a comma.
"#,
        );
        const DAY: Usage = Usage::flag(
            "-d/--day <day-list>",
            "Provide one or more days of the month.",
            r#"
Provide one or more days of the month.

Legal values are the integers 1 through 31 or -31 through -1. Negative days
count backwards from the end of a month, such that -1 is the last day of the
month. Months without the given day are skipped.

For yearly recurrences, the day must exist in the month in at least some
years. For example, February 30 is an error, but February 29 is not.

Multiple days can be specified with repeated use of this flag, or by
separating values with a comma.
"#,
        );
        const NTH: Usage = Usage::flag(
            "-n/--nth <number-list>",
            "Provide which occurrence of a weekday in its month to use.",
            r#"
Provide which occurrence of a weekday in its month to use.

Legal values are the integers 1 through 5 or -5 through -1. Negative values
count backwards from the end of the month, such that -1 is the last
occurrence. Months without the given occurrence (for example, a month with
only four Fridays) are skipped.

When not given, this is derived from the first date as `(day + 6) / 7`.

Multiple values can be specified with repeated use of this flag, or by
separating values with a comma.
"#,
        );
        const WEEKDAY: Usage = Usage::flag(
            "-w/--weekday <weekday-list>",
            "Provide one or more days of the week.",
            r#"
Provide one or more days of the week.

Weekdays may be given by name (e.g., sun, Monday, TU) or by number, where 0
is Sunday and 6 is Saturday.

Multiple weekdays can be specified with repeated use of this flag, or by
separating values with a comma.
"#,
        );
        const INTERVAL: Usage = Usage::flag(
            "-i/--interval <number>",
            "Sets the interval at which the sequence repeats.",
            r#"
Sets the interval at which the sequence repeats (defaults to 1).

For example, an interval of 2 on a weekly rule repeats every other week. The
interval must be greater than or equal to 1.
"#,
        );
        const UNTIL: Usage = Usage::flag(
            "-u/--until <date>",
            "Repeat a sequence until this date (inclusive).",
            r#"
Repeat a sequence until this date (inclusive).

This also applies to dates given via `-a/--also`. It is an error for this
date to be before the first date.
"#,
        );
        const FORWARD_TO: Usage = Usage::flag(
            "-f/--forward-to <date>",
            "Skip all dates before this date.",
            r#"
Skip all dates before this date.

The sequence keeps its original cadence. For example, a weekly rule with an
interval of 2 will still only produce dates in every other week counting
from the first date.
"#,
        );
        const COUNT: Usage = Usage::flag(
            "-c/--count <number>",
            "Generate at most this number of dates.",
            r#"
Generate at most this number of dates.

Zero is a legal value, but always results in an empty sequence. This may be
combined with `-u/--until`, in which case whichever limit is reached first
ends the sequence.
"#,
        );
        const ALSO: Usage = Usage::flag(
            "-a/--also <date-list>",
            "Include these dates in the sequence.",
            r#"
Include these dates in the sequence.

The dates are merged into the sequence in chronological order. Dates that
the rule already produces are not repeated.

Multiple dates can be specified with repeated use of this flag, or by
separating values with a comma.
"#,
        );
        const WITH_WEEKDAY: Usage = Usage::flag(
            "-W/--with-weekday",
            "Print the abbreviated weekday after each date.",
            r#"
Print the abbreviated weekday after each date, e.g., `2021-08-02 Mon`.
"#,
        );
        &[
            RULE,
            flags::Date::ARG,
            MONTH,
            DAY,
            NTH,
            WEEKDAY,
            INTERVAL,
            flags::Weekday::USAGE_WEEK_START,
            UNTIL,
            FORWARD_TO,
            COUNT,
            ALSO,
            WITH_WEEKDAY,
        ]
    }
}
