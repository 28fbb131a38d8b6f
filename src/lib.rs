/*!
Lazy enumeration of recurring calendar dates.

This crate computes the occurrences of recurring dates, in the spirit of the
yearly, monthly, weekly and daily rules of RFC 5545, as lazy and practically
unbounded iterators. Sequences can be bounded, jumped forward in constant
time and merged into a single ordered stream without duplicates.

The building blocks are:

* [`Frames`] steps through years, months, weeks or days with an interval.
* [`RecurrenceRule`] picks at most one date out of each frame.
* [`Recurrence`] drives both of the above from an anchor date. It is
usually created through a [`RecurrenceBuilder`].
* [`DateList`] is an explicit list of dates that behaves like any other
sequence.
* [`Merge`] combines any number of sequences.

All sequences implement [`DateSequence`], which provides `rewind`,
`forward_to` and `until`.

# Example

```
use enumdate::{DateList, DateSequence, Merge, Recurrence};
use jiff::civil::date;

// The last day of every month, plus a couple of extra days.
let mut merge: Merge = Merge::new();
merge
    .add(Recurrence::monthly_by_month_day(date(2024, 1, 31)).day(-1).build()?)
    .add(DateList::new([date(2024, 2, 14), date(2024, 3, 17)]));
merge.forward_to(date(2024, 2, 1));

let dates: Vec<String> = merge.take(4).map(|d| d.to_string()).collect();
assert_eq!(
    dates,
    vec!["2024-02-14", "2024-02-29", "2024-03-17", "2024-03-31"],
);

# Ok::<(), anyhow::Error>(())
```
*/

pub use crate::{
    builder::{RecurrenceBuilder, RuleKind},
    frame::{FrameKind, Frames},
    list::DateList,
    merge::Merge,
    recurrence::Recurrence,
    rule::RecurrenceRule,
    sequence::{DateEnumerator, DateSequence},
};

mod builder;
pub mod calendar;
mod frame;
mod list;
mod merge;
mod recurrence;
mod rule;
mod sequence;
