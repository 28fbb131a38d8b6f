use jiff::civil::Date;

use crate::sequence::DateSequence;

/// An explicit, finite sequence of dates.
///
/// Dates are kept sorted and duplicates are collapsed, so iteration always
/// yields strictly increasing dates. Unlike a `Recurrence`, a list has no
/// anchor date that is always emitted. The lower bound set by `forward_to`
/// and the upper bound set by `until` apply to every date.
#[derive(Clone, Debug, Default)]
pub struct DateList {
    dates: Vec<Date>,
    /// Index of the next date to consider.
    pos: usize,
    begin: Option<Date>,
    until: Option<Date>,
}

impl DateList {
    /// Create a new list from the given dates, in any order.
    pub fn new<I: IntoIterator<Item = Date>>(dates: I) -> DateList {
        let mut dates: Vec<Date> = dates.into_iter().collect();
        dates.sort();
        dates.dedup();
        DateList { dates, pos: 0, begin: None, until: None }
    }

    /// Add a date to this list.
    ///
    /// Adding a date that is already present does nothing. A date inserted
    /// before the current position of the cursor is only yielded after a
    /// rewind.
    pub fn push(&mut self, date: Date) -> &mut DateList {
        if let Err(i) = self.dates.binary_search(&date) {
            self.dates.insert(i, date);
            if i < self.pos {
                self.pos += 1;
            }
        }
        self
    }

    /// Returns all dates in this list, ignoring any bounds.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl Iterator for DateList {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        while let Some(&date) = self.dates.get(self.pos) {
            if self.until.is_some_and(|until| date > until) {
                self.pos = self.dates.len();
                return None;
            }
            self.pos += 1;
            if self.begin.is_some_and(|begin| date < begin) {
                continue;
            }
            return Some(date);
        }
        None
    }
}

impl std::iter::FusedIterator for DateList {}

impl DateSequence for DateList {
    fn rewind(&mut self) -> &mut DateList {
        self.pos = 0;
        self
    }

    fn forward_to(&mut self, date: Date) -> &mut DateList {
        self.begin = Some(date);
        self.pos = self.dates.partition_point(|&d| d < date);
        log::debug!(
            "forwarded list of {len} date(s) to {date}, \
             {skipped} date(s) skipped",
            len = self.dates.len(),
            skipped = self.pos,
        );
        self
    }

    fn until(&mut self, date: Date) -> &mut DateList {
        self.until = Some(date);
        self
    }
}

impl FromIterator<Date> for DateList {
    fn from_iter<I: IntoIterator<Item = Date>>(it: I) -> DateList {
        DateList::new(it)
    }
}

impl Extend<Date> for DateList {
    fn extend<I: IntoIterator<Item = Date>>(&mut self, it: I) {
        for date in it {
            self.push(date);
        }
    }
}
