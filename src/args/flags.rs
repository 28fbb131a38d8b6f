use {anyhow::Context, jiff::civil};

use crate::args::Usage;

/// A civil date given on the command line.
///
/// This accepts `YYYY-MM-DD` or the special value `today`.
#[derive(Clone, Copy, Debug)]
pub struct Date(civil::Date);

impl Date {
    pub const ARG: Usage = Usage::arg(
        "<date>",
        "The date to start from (defaults to today).",
        r#"
The date to start from. When omitted, today's date is used.

Dates are written as YYYY-MM-DD, e.g., 2024-07-20. The special value `today`
may also be used. The `ENUMDATE_TODAY` environment variable can be set to a
YYYY-MM-DD date to override what today is.
"#,
    );

    /// Returns today's date.
    pub fn today() -> Date {
        Date(*crate::TODAY)
    }

    /// Return the parsed date.
    pub fn get(&self) -> civil::Date {
        self.0
    }
}

impl std::str::FromStr for Date {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Date> {
        if s.eq_ignore_ascii_case("today") {
            return Ok(Date::today());
        }
        let date = s.parse::<civil::Date>().with_context(|| {
            format!("failed to parse `{s}` as a YYYY-MM-DD date")
        })?;
        Ok(Date(date))
    }
}

/// Provides parsing for the English name or number of a month.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Month(i8);

impl Month {
    /// Return the parsed month as an integer in the range `1..=12`.
    pub fn get(&self) -> i8 {
        self.0
    }
}

impl std::str::FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Month> {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            let month = s.parse::<i8>().with_context(|| {
                format!("failed to parse `{s}` as an integer month")
            })?;
            anyhow::ensure!(
                1 <= month && month <= 12,
                "parsed `{month}` as an integer month, but it's not \
                 in the required range of `1..=12`",
            );
            return Ok(Month(month));
        }
        let month = match &*s.to_lowercase() {
            "january" | "jan" => 1,
            "february" | "feb" => 2,
            "march" | "mar" => 3,
            "april" | "apr" => 4,
            "may" => 5,
            "june" | "jun" => 6,
            "july" | "jul" => 7,
            "august" | "aug" => 8,
            "september" | "sept" | "sep" => 9,
            "october" | "oct" => 10,
            "november" | "nov" => 11,
            "december" | "dec" => 12,
            unk => anyhow::bail!("unrecognized month name/number: `{unk}`"),
        };
        Ok(Month(month))
    }
}

/// Provides parsing for Jiff's civil `Weekday` type.
///
/// Weekdays can be given by name or by number, where `0` is Sunday and `6`
/// is Saturday.
#[derive(Clone, Copy, Debug)]
pub struct Weekday(civil::Weekday);

impl Weekday {
    pub const USAGE_WEEK_START: Usage = Usage::flag(
        "--week-start <weekday>",
        "The weekday on which weeks start (defaults to Monday).",
        r#"
The weekday on which weeks start (defaults to Monday).

This determines where weekly frames begin. For weekly recurrences with an
interval greater than 1, this changes which weeks are considered.

Any day of the week may be given. They can be specified in the following way
(without regard for case):

Sunday, Sun, SU, 0

Monday, Mon, MO, 1

Tuesday, Tues, Tue, TU, 2

Wednesday, Wed, WE, 3

Thursday, Thurs, Thu, TH, 4

Friday, Fri, FR, 5

Saturday, Sat, SA, 6
"#,
    );

    /// Return the parsed weekday.
    pub fn get(&self) -> civil::Weekday {
        self.0
    }
}

impl Default for Weekday {
    fn default() -> Weekday {
        Weekday(civil::Weekday::Monday)
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Weekday> {
        use jiff::civil::Weekday::*;

        if let Ok(number) = s.parse::<i8>() {
            return Ok(Weekday(enumdate::calendar::weekday_from_number(
                number,
            )?));
        }
        let weekday = match &*s.to_lowercase() {
            "sunday" | "sun" | "su" => Sunday,
            "monday" | "mon" | "mo" => Monday,
            "tuesday" | "tues" | "tue" | "tu" => Tuesday,
            "wednesday" | "wed" | "we" => Wednesday,
            "thursday" | "thurs" | "thu" | "th" => Thursday,
            "friday" | "fri" | "fr" => Friday,
            "saturday" | "sat" | "sa" => Saturday,
            unk => anyhow::bail!("unrecognized weekday: `{unk}`"),
        };
        Ok(Weekday(weekday))
    }
}

/// A scrappy comma delimited sequence of values.
///
/// This type doesn't have any requirements on `T` other than that it can be
/// parsed. There's no support for quoting or escaping commas, so `,` must
/// not appear within the format of `T`.
///
/// The sequence is never empty.
#[derive(Clone, Debug)]
pub struct CommaSequence<T>(Vec<T>);

impl<T> CommaSequence<T> {
    /// Returns an iterator over every item in this sequence.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a CommaSequence<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.0.iter()
    }
}

impl<T, E> std::str::FromStr for CommaSequence<T>
where
    T: std::str::FromStr<Err = E>,
    E: std::fmt::Display,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<CommaSequence<T>> {
        let mut seq = vec![];
        for item in s.split(',') {
            seq.push(item.parse::<T>().map_err(|err| {
                anyhow::Error::msg(format!(
                    "failed to parse `{item}` within sequence `{s}`: {err}",
                ))
            })?);
        }
        anyhow::ensure!(!seq.is_empty(), "empty sequences are not allowed");
        Ok(CommaSequence(seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays() {
        let parse = |s: &str| s.parse::<Weekday>().map(|wd| wd.get());
        assert_eq!(parse("0").unwrap(), civil::Weekday::Sunday);
        assert_eq!(parse("6").unwrap(), civil::Weekday::Saturday);
        assert_eq!(parse("TUES").unwrap(), civil::Weekday::Tuesday);
        assert_eq!(parse("th").unwrap(), civil::Weekday::Thursday);
        insta::assert_snapshot!(
            parse("7").unwrap_err(),
            @"invalid weekday number `7` (values must be in range 0..=6, where 0 is Sunday)",
        );
        insta::assert_snapshot!(
            parse("someday").unwrap_err(),
            @"unrecognized weekday: `someday`",
        );
    }

    #[test]
    fn months() {
        assert_eq!("12".parse::<Month>().unwrap().get(), 12);
        assert_eq!("Sept".parse::<Month>().unwrap().get(), 9);
        insta::assert_snapshot!(
            "13".parse::<Month>().unwrap_err(),
            @"parsed `13` as an integer month, but it's not in the required range of `1..=12`",
        );
    }

    #[test]
    fn dates() {
        let date = "2021-08-02".parse::<Date>().unwrap().get();
        assert_eq!(date, civil::date(2021, 8, 2));
        assert!("2021-02-30".parse::<Date>().is_err());
        assert!("tomorrow".parse::<Date>().is_err());
    }

    #[test]
    fn sequences() {
        let seq: CommaSequence<i8> = "1,-1,15".parse().unwrap();
        assert_eq!(seq.iter().copied().collect::<Vec<i8>>(), vec![1, -1, 15]);
        insta::assert_snapshot!(
            "1,,2".parse::<CommaSequence<i8>>().unwrap_err(),
            @"failed to parse `` within sequence `1,,2`: cannot parse integer from empty string",
        );
    }
}
