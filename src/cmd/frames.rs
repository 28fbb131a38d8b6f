use std::io::Write;

use anyhow::Context;

use enumdate::{FrameKind, Frames};

use crate::args::{self, Usage, flags};

const USAGE: &'static str = r#"
Print the first day of every frame, at a given interval.

A frame is a year, month, week or day. The first frame printed is the one
containing the given date. If a date is not given, then today is used.

Unless the `-c/--count` flag is used, this command will print frames until
the maximum supported date (9999-12-31) is reached.

USAGE:
    enumdate frames <kind> [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the start of every other week, with weeks starting on Sunday:

        $ enumdate frames weekly -i2 --week-start sun -c3 2021-06-08
        2021-06-06
        2021-06-20
        2021-07-04

    %snip-start%

    Forwarding keeps the original cadence. Here, frames start in odd years:

        $ enumdate frames yearly -i2 -f 2100-01-01 -c3 2021-01-01
        2101-01-01
        2103-01-01
        2105-01-01

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let mut frames = config.frames()?;
    if let Some(ref date) = config.forward_to {
        frames.forward_to(date.get());
    }
    let mut wtr = std::io::stdout().lock();
    for start in frames.take(config.count.unwrap_or(usize::MAX)) {
        writeln!(wtr, "{start}")?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    kind: Option<FrameKind>,
    date: Option<flags::Date>,
    interval: Option<i32>,
    week_start: flags::Weekday,
    forward_to: Option<flags::Date>,
    count: Option<usize>,
}

impl Config {
    fn frames(&self) -> anyhow::Result<Frames> {
        let kind = self.kind.context("missing required <kind>")?;
        let date = self.date.unwrap_or_else(flags::Date::today).get();
        Frames::new(
            kind,
            date,
            self.interval.unwrap_or(1),
            self.week_start.get(),
        )
    }
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
                if self.kind.is_none() {
                    self.kind = Some(args::parse_value(v, "<kind>")?);
                    return Ok(true);
                }
                if self.date.is_none() {
                    self.date = Some(args::parse_value(v, "<date>")?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('i') | Long("interval") => {
                self.interval = Some(args::parse(p, "-i/--interval")?);
            }
            Long("week-start") => {
                self.week_start = args::parse(p, "--week-start")?;
            }
            Short('f') | Long("forward-to") => {
                self.forward_to = Some(args::parse(p, "-f/--forward-to")?);
            }
            Short('c') | Long("count") => {
                self.count = Some(args::parse(p, "-c/--count")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const KIND: Usage = Usage::arg(
            "<kind>",
            "The kind of frame: yearly, monthly, weekly or daily.",
            r#"
The kind of frame: yearly, monthly, weekly or daily.

Yearly frames start on January 1. Monthly frames start on the first day of
the month. Weekly frames start on the day given by `--week-start`. Daily
frames start on every day.

The abbreviations `y`, `mo`, `w` and `d` are also accepted.
"#,
        );
        const INTERVAL: Usage = Usage::flag(
            "-i/--interval <number>",
            "Print every Nth frame (defaults to 1).",
            r#"
Print every Nth frame (defaults to 1).

The interval must be greater than or equal to 1.
"#,
        );
        const FORWARD_TO: Usage = Usage::flag(
            "-f/--forward-to <date>",
            "Skip frames before the frame containing this date.",
            r#"
Skip frames before the frame containing this date.

Frames keep their original cadence. That is, the first frame printed is the
earliest frame, counting in steps of the interval from the first frame, that
doesn't start before the frame containing this date. When this date is before
the first frame, then it has no effect.
"#,
        );
        const COUNT: Usage = Usage::flag(
            "-c/--count <number>",
            "Print at most this number of frames.",
            r#"
Print at most this number of frames.

Zero is a legal value, but always results in no output.
"#,
        );
        &[
            KIND,
            flags::Date::ARG,
            INTERVAL,
            flags::Weekday::USAGE_WEEK_START,
            FORWARD_TO,
            COUNT,
        ]
    }
}
