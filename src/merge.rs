//! Merge classification of two sorted line sequences.
//!
//! # Algorithm
//!
//! Hold one pending line per side:
//! 1. Both sides pending: compare them.
//!    - A < B: emit A-only, advance A
//!    - A > B: emit B-only, advance B
//!    - equal: emit common (B's text), advance both
//! 2. One side pending: emit it as that side's column, advance it
//! 3. Neither pending: done
//!
//! # Memory Complexity
//!
//! O(1) lines - one lookahead per side, regardless of input size.
//!
//! Inputs are never checked for sort order. Unsorted input follows the same
//! step rule and yields a deterministic, if meaningless, result.

use crate::compare::CompareMode;
use crate::line::Line;
use std::cmp::Ordering;

/// One of the three report columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Lines only in the first input.
    OnlyA,
    /// Lines only in the second input.
    OnlyB,
    /// Lines in both inputs.
    Both,
}

impl Column {
    /// All columns in report order.
    pub const ALL: [Column; 3] = [Column::OnlyA, Column::OnlyB, Column::Both];
}

/// A classified line: exactly one column is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    OnlyA(Line),
    OnlyB(Line),
    /// Carries the line from B, so its casing wins under case folding.
    Both(Line),
}

impl Row {
    #[inline]
    pub fn column(&self) -> Column {
        match self {
            Row::OnlyA(_) => Column::OnlyA,
            Row::OnlyB(_) => Column::OnlyB,
            Row::Both(_) => Column::Both,
        }
    }

    #[inline]
    pub fn text(&self) -> &[u8] {
        match self {
            Row::OnlyA(line) | Row::OnlyB(line) | Row::Both(line) => line,
        }
    }

    /// The row's text if it sits in `column`.
    #[inline]
    pub fn get(&self, column: Column) -> Option<&[u8]> {
        (self.column() == column).then(|| self.text())
    }
}

/// Lazy merge classifier over two ordered line sequences.
///
/// Works over any pair of iterators: in-memory vectors, [`LineReader`]s, or
/// the receiving ends of the pipeline queues.
///
/// [`LineReader`]: crate::line::LineReader
pub struct Classifier<A, B>
where
    A: Iterator<Item = Line>,
    B: Iterator<Item = Line>,
{
    a: A,
    b: B,
    head_a: Option<Line>,
    head_b: Option<Line>,
    mode: CompareMode,
}

impl<A, B> Classifier<A, B>
where
    A: Iterator<Item = Line>,
    B: Iterator<Item = Line>,
{
    /// Create a classifier, priming one pending line from each side.
    pub fn new<IA, IB>(a: IA, b: IB, mode: CompareMode) -> Self
    where
        IA: IntoIterator<IntoIter = A>,
        IB: IntoIterator<IntoIter = B>,
    {
        let mut a = a.into_iter();
        let mut b = b.into_iter();
        let head_a = a.next();
        let head_b = b.next();
        Self {
            a,
            b,
            head_a,
            head_b,
            mode,
        }
    }

    #[inline]
    fn advance_a(&mut self) -> Option<Line> {
        std::mem::replace(&mut self.head_a, self.a.next())
    }

    #[inline]
    fn advance_b(&mut self) -> Option<Line> {
        std::mem::replace(&mut self.head_b, self.b.next())
    }
}

impl<A, B> Iterator for Classifier<A, B>
where
    A: Iterator<Item = Line>,
    B: Iterator<Item = Line>,
{
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let order = match (&self.head_a, &self.head_b) {
            (Some(a), Some(b)) => self.mode.compare(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return None,
        };

        match order {
            Ordering::Less => self.advance_a().map(Row::OnlyA),
            Ordering::Greater => self.advance_b().map(Row::OnlyB),
            Ordering::Equal => {
                self.advance_a();
                self.advance_b().map(Row::Both)
            }
        }
    }
}

/// Classify two ordered sequences.
pub fn classify<IA, IB>(a: IA, b: IB, mode: CompareMode) -> Classifier<IA::IntoIter, IB::IntoIter>
where
    IA: IntoIterator<Item = Line>,
    IB: IntoIterator<Item = Line>,
{
    Classifier::new(a, b, mode)
}
