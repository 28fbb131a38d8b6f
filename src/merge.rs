use jiff::civil::Date;

use crate::sequence::{DateEnumerator, DateSequence};

/// Merges any number of ordered date sequences into one.
///
/// The merged sequence is ordered and never yields the same date twice in
/// a row. Since every source is itself ordered, that means every date is
/// yielded at most once.
///
/// Each source is advanced lazily. At any point in time, at most one date
/// per source has been pulled out but not yet yielded.
///
/// # Example
///
/// ```
/// use enumdate::{Merge, Recurrence};
/// use jiff::civil::{Weekday, date};
///
/// // Mondays and Wednesdays, starting on Wednesday 2021-08-04.
/// let first = date(2021, 8, 4);
/// let mut merge: Merge = Merge::new();
/// merge
///     .add(Recurrence::weekly(first).build()?)
///     .add(Recurrence::weekly(first).weekday(Weekday::Monday).build()?);
/// let dates: Vec<_> = merge.take(4).collect();
/// assert_eq!(dates, vec![
///     date(2021, 8, 4),
///     date(2021, 8, 9),
///     date(2021, 8, 11),
///     date(2021, 8, 16),
/// ]);
///
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Merge<S = DateEnumerator> {
    sources: Vec<Source<S>>,
    last: Option<Date>,
}

#[derive(Clone, Debug)]
struct Source<S> {
    seq: S,
    /// `None` when nothing has been pulled out of `seq` yet, and
    /// `Some(None)` when `seq` is exhausted.
    peeked: Option<Option<Date>>,
}

impl<S: Iterator<Item = Date>> Source<S> {
    fn peek(&mut self) -> Option<Date> {
        *self.peeked.get_or_insert_with(|| self.seq.next())
    }
}

impl<S: DateSequence> Merge<S> {
    /// Create an empty merge. It yields nothing until a source is added.
    pub fn new() -> Merge<S> {
        Merge { sources: vec![], last: None }
    }

    /// Add another sequence to this merge.
    pub fn add<T: Into<S>>(&mut self, seq: T) -> &mut Merge<S> {
        self.sources.push(Source { seq: seq.into(), peeked: None });
        log::debug!("added merge source #{}", self.sources.len());
        self
    }

    /// Returns the number of sources in this merge.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Applies the given repositioning to every source and drops all
    /// lookahead.
    fn reset(&mut self, mut f: impl FnMut(&mut S)) {
        for source in self.sources.iter_mut() {
            f(&mut source.seq);
            source.peeked = None;
        }
        self.last = None;
    }
}

impl<S: DateSequence> Default for Merge<S> {
    fn default() -> Merge<S> {
        Merge::new()
    }
}

impl<S: DateSequence> Iterator for Merge<S> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        loop {
            let mut min: Option<(usize, Date)> = None;
            for (i, source) in self.sources.iter_mut().enumerate() {
                let Some(date) = source.peek() else { continue };
                if min.is_none_or(|(_, m)| date < m) {
                    min = Some((i, date));
                }
            }
            let (i, date) = min?;
            self.sources[i].peeked = None;
            if self.last == Some(date) {
                continue;
            }
            self.last = Some(date);
            return Some(date);
        }
    }
}

impl<S: DateSequence> std::iter::FusedIterator for Merge<S> {}

impl<S: DateSequence> DateSequence for Merge<S> {
    fn rewind(&mut self) -> &mut Merge<S> {
        self.reset(|seq| {
            seq.rewind();
        });
        self
    }

    fn forward_to(&mut self, date: Date) -> &mut Merge<S> {
        self.reset(|seq| {
            seq.forward_to(date);
        });
        self
    }

    fn until(&mut self, date: Date) -> &mut Merge<S> {
        // Lookahead beyond the new bound must not be yielded.
        for source in self.sources.iter_mut() {
            source.seq.until(date);
            if let Some(Some(peeked)) = source.peeked {
                if peeked > date {
                    source.peeked = Some(None);
                }
            }
        }
        self
    }
}

impl<S: DateSequence> FromIterator<S> for Merge<S> {
    fn from_iter<I: IntoIterator<Item = S>>(it: I) -> Merge<S> {
        let mut merge = Merge::new();
        for seq in it {
            merge.add(seq);
        }
        merge
    }
}
