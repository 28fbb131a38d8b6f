use jiff::civil::Date;

use crate::{list::DateList, recurrence::Recurrence};

/// An ordered sequence of dates that can be repositioned.
///
/// Implementations yield dates in non-decreasing order via `Iterator`. The
/// methods here only ever move a cursor or adjust bounds. None of them
/// compute any dates themselves, so they are cheap.
pub trait DateSequence: Iterator<Item = Date> {
    /// Move back to the beginning of the sequence.
    ///
    /// Bounds set by `forward_to` and `until` are kept.
    fn rewind(&mut self) -> &mut Self;

    /// Skip all dates before `date`.
    ///
    /// This also resets any previous iteration, so the next date yielded
    /// is the first date in the sequence that is on or after `date`.
    fn forward_to(&mut self, date: Date) -> &mut Self;

    /// Stop the sequence after `date`.
    ///
    /// This doesn't reposition the sequence.
    fn until(&mut self, date: Date) -> &mut Self;
}

/// Any one of the date sequences provided by this crate.
///
/// This is useful for merging sequences of different types.
#[derive(Clone, Debug)]
pub enum DateEnumerator {
    Recurrence(Recurrence),
    List(DateList),
}

impl Iterator for DateEnumerator {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        match *self {
            DateEnumerator::Recurrence(ref mut rec) => rec.next(),
            DateEnumerator::List(ref mut list) => list.next(),
        }
    }
}

impl std::iter::FusedIterator for DateEnumerator {}

impl DateSequence for DateEnumerator {
    fn rewind(&mut self) -> &mut DateEnumerator {
        match *self {
            DateEnumerator::Recurrence(ref mut rec) => {
                rec.rewind();
            }
            DateEnumerator::List(ref mut list) => {
                list.rewind();
            }
        }
        self
    }

    fn forward_to(&mut self, date: Date) -> &mut DateEnumerator {
        match *self {
            DateEnumerator::Recurrence(ref mut rec) => {
                rec.forward_to(date);
            }
            DateEnumerator::List(ref mut list) => {
                list.forward_to(date);
            }
        }
        self
    }

    fn until(&mut self, date: Date) -> &mut DateEnumerator {
        match *self {
            DateEnumerator::Recurrence(ref mut rec) => {
                rec.until(date);
            }
            DateEnumerator::List(ref mut list) => {
                list.until(date);
            }
        }
        self
    }
}

impl From<Recurrence> for DateEnumerator {
    fn from(rec: Recurrence) -> DateEnumerator {
        DateEnumerator::Recurrence(rec)
    }
}

impl From<DateList> for DateEnumerator {
    fn from(list: DateList) -> DateEnumerator {
        DateEnumerator::List(list)
    }
}
