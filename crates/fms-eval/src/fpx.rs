//! `Fpx`: an owned, row-major two-dimensional array of `f64`.
//!
//! This is the in-memory array behind array handles. Every shape-changing
//! operation works in place. Operations that count "items" treat a genuine
//! matrix (more than one row and more than one column) as a list of rows and
//! anything else as a flat list of elements.

use std::cmp::Ordering;

use fms_common::{ExcelError, ExcelErrorKind, LiteralValue};
use fms_core::{ArrayView, Foldable, Iota, Iterable, Monoid, Take, UnOp, drop, reduce};

/// Longest sequence `ARRAY.SEQUENCE` will build (Excel's row limit).
pub const MAX_SEQUENCE: usize = 1 << 20;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fpx {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Fpx {
    /// Zero-filled `rows x columns` array. A zero dimension gives the empty array.
    pub fn new(rows: usize, columns: usize) -> Self {
        if rows == 0 || columns == 0 {
            return Self::default();
        }
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    pub fn column(data: Vec<f64>) -> Self {
        let rows = data.len();
        Self::shaped(rows, 1, data)
    }

    pub fn row(data: Vec<f64>) -> Self {
        let columns = data.len();
        Self::shaped(1, columns, data)
    }

    /// Build from ragged-free rows. Mismatched row lengths are `#VALUE!`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ExcelError> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != columns) {
            return Err(ExcelError::value("rows have different lengths"));
        }
        let n = rows.len();
        Ok(Self::shaped(n, columns, rows.into_iter().flatten().collect()))
    }

    fn shaped(rows: usize, columns: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * columns, data.len());
        if data.is_empty() {
            Self::default()
        } else {
            Self {
                rows,
                columns,
                data,
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn view(&self) -> ArrayView<'_, f64> {
        ArrayView::new(&self.data)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.columns {
            Some(self.data[i * self.columns + j])
        } else {
            None
        }
    }

    /// Element at `(i, j)` with both indices taken modulo the shape.
    pub fn index(&self, i: i64, j: i64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let i = i.rem_euclid(self.rows as i64) as usize;
        let j = j.rem_euclid(self.columns as i64) as usize;
        self.get(i, j)
    }

    fn by_rows(&self) -> bool {
        self.rows > 1 && self.columns > 1
    }

    /// Elements per item: a whole row for a matrix, otherwise one.
    fn unit(&self) -> usize {
        if self.by_rows() { self.columns } else { 1 }
    }

    fn items(&self) -> usize {
        self.size() / self.unit().max(1)
    }

    /// Reshape after the buffer now holds `k` items, keeping orientation.
    fn set_items(&mut self, k: usize) {
        if k == 0 {
            *self = Self::default();
        } else if self.by_rows() {
            self.rows = k;
        } else if self.rows == 1 && self.columns > 1 {
            self.columns = k;
        } else {
            self.rows = k;
            self.columns = 1;
        }
        debug_assert_eq!(self.rows * self.columns, self.data.len());
    }

    /* ───────────────────────── shape ───────────────────────── */

    /// Keep the row-major prefix, zero-fill any growth.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        if rows == 0 || columns == 0 {
            *self = Self::default();
            return;
        }
        self.data.resize(rows * columns, 0.0);
        self.rows = rows;
        self.columns = columns;
    }

    /// Keep `n` items from the front (`n > 0`) or back (`n < 0`).
    pub fn take(&mut self, n: i64) {
        let unit = self.unit();
        let count = self.items();
        let k = (n.unsigned_abs() as usize).min(count);
        if n >= 0 {
            self.data.truncate(k * unit);
        } else {
            self.data.drain(..(count - k) * unit);
        }
        self.set_items(k);
    }

    /// Remove `n` items from the front (`n > 0`) or back (`n < 0`).
    pub fn drop(&mut self, n: i64) {
        let unit = self.unit();
        let count = self.items();
        let k = (n.unsigned_abs() as usize).min(count);
        if n >= 0 {
            self.data.drain(..k * unit);
        } else {
            self.data.truncate((count - k) * unit);
        }
        self.set_items(count - k);
    }

    /// Append `other`, shaped by `self`. A matrix keeps its column count and
    /// silently drops a trailing partial row.
    pub fn join(&mut self, other: &Fpx) {
        if self.is_empty() {
            *self = other.clone();
            return;
        }
        let mut data = std::mem::take(&mut self.data);
        data.extend_from_slice(&other.data);
        *self = Self::reshape_like(self.rows, self.columns, data);
    }

    fn reshape_like(rows: usize, columns: usize, mut data: Vec<f64>) -> Self {
        let n = data.len();
        if columns == 1 {
            Self::shaped(n, 1, data)
        } else if rows == 1 {
            Self::shaped(1, n, data)
        } else {
            let r = n / columns;
            data.truncate(r * columns);
            Self::shaped(r, columns, data)
        }
    }

    /// Keep the items whose cyclically indexed mask value is non-zero.
    /// An empty mask keeps nothing.
    pub fn mask(&mut self, m: &[f64]) {
        if m.is_empty() {
            *self = Self::default();
            return;
        }
        let unit = self.unit();
        let mut kept = 0;
        let mut out = Vec::with_capacity(self.data.len());
        for (i, item) in self.data.chunks(unit).enumerate() {
            if m[i % m.len()] != 0.0 {
                out.extend_from_slice(item);
                kept += 1;
            }
        }
        self.data = out;
        self.set_items(kept);
    }

    /// Move elements `n` places toward the end (`n > 0`) or front (`n < 0`).
    /// Vacated slots become NaN.
    pub fn shift(&mut self, n: i64) {
        let len = self.data.len();
        let k = (n.unsigned_abs() as usize).min(len);
        if n >= 0 {
            self.data.rotate_right(k);
            self.data[..k].fill(f64::NAN);
        } else {
            self.data.rotate_left(k);
            self.data[len - k..].fill(f64::NAN);
        }
    }

    /* ───────────────────────── order ───────────────────────── */

    /// `0` ascending, `-1` descending, `n > 0` the `n` smallest ascending at
    /// the front, `n < -1` the `-n` largest descending at the front.
    pub fn sort(&mut self, n: i64) {
        partial_sort_by(&mut self.data, n, f64::total_cmp);
    }

    /// Zero-based positions that would sort the array, as a column.
    pub fn grade(&self, n: i64) -> Fpx {
        let mut idx: Vec<usize> = (0..self.data.len()).collect();
        let data = &self.data;
        let k = partial_sort_by(&mut idx, n, |&a, &b| data[a].total_cmp(&data[b]));
        Fpx::column(idx[..k].iter().map(|&i| i as f64).collect())
    }

    /// Remove consecutive duplicates. Vectors shrink; a matrix keeps its
    /// shape and pads the tail with NaN.
    pub fn unique(&mut self) {
        let len = self.data.len();
        self.data.dedup();
        let n = self.data.len();
        if self.by_rows() {
            self.data.resize(len, f64::NAN);
        } else {
            self.set_items(n);
        }
    }

    /// `{a0, a1 - a0, a2 - a1, ...}`
    pub fn diff(&mut self) {
        for i in (1..self.data.len()).rev() {
            self.data[i] -= self.data[i - 1];
        }
    }

    /* ───────────────────────── numeric ───────────────────────── */

    /// Autocovariance at every lag, or autocorrelation if `correlation`.
    ///
    /// Lag `i` pairs `a[0..n-i]` with `a[i..n]`, centres each window on its
    /// own mean and divides by `n - i`.
    pub fn acf(&self, correlation: bool) -> Fpx {
        let n = self.data.len();
        let mut out = Fpx::shaped(self.rows, self.columns, vec![0.0; n]);
        for i in 0..n {
            let m = n - i;
            let head = Take::new(m, self.view());
            let tail = drop(i, self.view());
            let head_mean = reduce(&fms_core::Standard::Add, head) / m as f64;
            let tail_mean = reduce(&fms_core::Standard::Add, tail) / m as f64;
            let c: f64 = head
                .iter()
                .zip(tail.iter())
                .map(|(x, y)| (x - head_mean) * (y - tail_mean))
                .sum();
            out.data[i] = c / m as f64;
        }
        if correlation && n > 0 {
            let c0 = out.data[0];
            for x in &mut out.data[1..] {
                *x /= c0;
            }
            out.data[0] = 1.0;
        }
        out
    }

    /// Column `start, start + incr, ...` up to and including `stop`.
    pub fn sequence(start: f64, stop: f64, incr: f64) -> Result<Fpx, ExcelError> {
        if incr == 0.0 || !incr.is_finite() || !start.is_finite() || !stop.is_finite() {
            return Err(ExcelError::new(ExcelErrorKind::Num)
                .with_message("sequence needs finite bounds and a non-zero increment"));
        }
        let q = (stop - start) / incr;
        if q < 0.0 {
            return Ok(Fpx::default());
        }
        // absorb rounding in (stop - start) / incr
        let steps = if (q - q.round()).abs() < 1e-9 { q.round() } else { q.floor() };
        if steps >= MAX_SEQUENCE as f64 {
            return Err(ExcelError::new(ExcelErrorKind::Num)
                .with_message(format!("sequence longer than {MAX_SEQUENCE} elements")));
        }
        let n = steps as usize + 1;
        Ok(Fpx::column(
            Take::new(n, Iota::with_step(start, incr)).iter().collect(),
        ))
    }

    pub fn apply(&mut self, op: &dyn UnOp<f64>) {
        for x in &mut self.data {
            *x = op.apply(*x);
        }
    }

    pub fn fold(&self, m: &dyn Monoid<f64>) -> f64 {
        reduce(m, self.view())
    }

    /// Running folds, one per element, in the shape of `self`.
    pub fn scan(&mut self, m: &dyn Monoid<f64>) {
        let partials: Vec<f64> = drop(1, Foldable::new(m, self.view())).iter().collect();
        self.data = partials;
    }

    /* ───────────────────────── conversion ───────────────────────── */

    pub fn to_literal(&self) -> LiteralValue {
        LiteralValue::Array(
            self.data
                .chunks(self.columns.max(1))
                .map(|r| r.iter().copied().map(LiteralValue::Number).collect())
                .collect(),
        )
    }
}

impl TryFrom<&LiteralValue> for Fpx {
    type Error = ExcelError;

    /// Scalars become `1 x 1`, `Empty` becomes the empty array, array cells
    /// coerce like scalar arguments.
    fn try_from(v: &LiteralValue) -> Result<Self, ExcelError> {
        match v {
            LiteralValue::Empty => Ok(Fpx::default()),
            LiteralValue::Array(rows) => Fpx::from_rows(
                rows.iter()
                    .map(|r| r.iter().map(LiteralValue::as_number).collect::<Result<Vec<f64>, _>>())
                    .collect::<Result<_, _>>()?,
            ),
            other => Ok(Fpx::shaped(1, 1, vec![other.as_number()?])),
        }
    }
}

impl From<Fpx> for LiteralValue {
    fn from(a: Fpx) -> Self {
        a.to_literal()
    }
}

/// Partial sort with the `n` convention of [`Fpx::sort`]. Returns how many
/// leading elements are in order.
fn partial_sort_by<T, F>(v: &mut [T], n: i64, cmp: F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = v.len() as i64;
    let (k, descending) = match n.clamp(-len, len) {
        0 => (len, false),
        -1 => (len, true),
        n if n > 0 => (n, false),
        n => (-n, true),
    };
    let k = k as usize;
    let ord = |a: &T, b: &T| if descending { cmp(b, a) } else { cmp(a, b) };
    if k == 0 {
        return 0;
    }
    if k < v.len() {
        v.select_nth_unstable_by(k - 1, |a, b| ord(a, b));
    }
    v[..k].sort_by(|a, b| ord(a, b));
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use fms_core::{Standard, Unary};

    fn seq(a: f64, b: f64) -> Fpx {
        Fpx::sequence(a, b, 1.0).unwrap()
    }

    fn matrix(rows: usize, columns: usize) -> Fpx {
        let mut a = seq(1.0, (rows * columns) as f64);
        a.resize(rows, columns);
        a
    }

    #[test]
    fn resize_keeps_prefix() {
        let mut a = Fpx::row(vec![2.0]);
        a.resize(2, 3);
        assert_eq!((a.rows(), a.columns(), a.size()), (2, 3, 6));
        assert_eq!(a.as_slice(), &[2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        a.resize(0, 3);
        assert!(a.is_empty());
        assert_eq!((a.rows(), a.columns()), (0, 0));
    }

    #[test]
    fn take_front_and_back() {
        let a = seq(1.0, 10.0);
        let t = |n| {
            let mut b = a.clone();
            b.take(n);
            b
        };
        assert_eq!((t(0).rows(), t(0).columns()), (0, 0));
        assert_eq!(t(5).rows(), 5);
        assert_eq!(t(5).as_slice()[0], 1.0);
        assert_eq!(t(-5).rows(), 5);
        assert_eq!(t(-5).as_slice()[0], 6.0);
        assert_eq!(t(100).rows(), 10);
        assert_eq!(t(-100).rows(), 10);
    }

    #[test]
    fn take_counts_rows_of_a_matrix() {
        let mut m = matrix(3, 2);
        m.take(-2);
        assert_eq!((m.rows(), m.columns()), (2, 2));
        assert_eq!(m.as_slice(), &[3.0, 4.0, 5.0, 6.0]);

        let mut r = Fpx::row(vec![1.0, 2.0, 3.0]);
        r.take(2);
        assert_eq!((r.rows(), r.columns()), (1, 2));
    }

    #[test]
    fn drop_front_and_back() {
        let a = seq(1.0, 10.0);
        let d = |n| {
            let mut b = a.clone();
            b.drop(n);
            b
        };
        assert_eq!(d(0), a);
        assert_eq!(d(5).rows(), 5);
        assert_eq!(d(5).as_slice()[0], 6.0);
        assert_eq!(d(-5).rows(), 5);
        assert_eq!(d(-5).as_slice()[0], 1.0);
        assert_eq!(d(100).rows(), 0);
        assert_eq!(d(-100).rows(), 0);
    }

    #[test]
    fn join_follows_first_shape() {
        let mut a = seq(1.0, 3.0);
        a.join(&seq(4.0, 7.0));
        assert_eq!((a.rows(), a.columns()), (7, 1));
        assert_eq!(a.as_slice()[3], 4.0);

        let mut r = Fpx::row(vec![1.0, 2.0]);
        r.join(&seq(3.0, 4.0));
        assert_eq!((r.rows(), r.columns()), (1, 4));

        let mut m = matrix(2, 2);
        m.join(&seq(5.0, 7.0));
        assert_eq!((m.rows(), m.columns()), (3, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let mut e = Fpx::default();
        e.join(&r);
        assert_eq!(e, r);
    }

    #[test]
    fn mask_is_cyclic() {
        let mut a = seq(1.0, 6.0);
        a.mask(&[1.0, 0.0]);
        assert_eq!(a.as_slice(), &[1.0, 3.0, 5.0]);
        assert_eq!(a.rows(), 3);

        let mut m = matrix(3, 2);
        m.mask(&[0.0, 1.0, 1.0]);
        assert_eq!((m.rows(), m.columns()), (2, 2));
        assert_eq!(m.as_slice(), &[3.0, 4.0, 5.0, 6.0]);

        let mut z = seq(1.0, 3.0);
        z.mask(&[0.0]);
        assert!(z.is_empty());
    }

    #[test]
    fn shift_fills_with_nan() {
        let mut a = seq(1.0, 4.0);
        a.shift(1);
        assert!(a.as_slice()[0].is_nan());
        assert_eq!(&a.as_slice()[1..], &[1.0, 2.0, 3.0]);

        let mut b = seq(1.0, 4.0);
        b.shift(-2);
        assert_eq!(&b.as_slice()[..2], &[3.0, 4.0]);
        assert!(b.as_slice()[2..].iter().all(|x| x.is_nan()));

        let mut c = seq(1.0, 2.0);
        c.shift(9);
        assert!(c.as_slice().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn sort_conventions() {
        let base = Fpx::column(vec![3.0, 1.0, 4.0, 1.5, 9.0, 2.0]);
        let s = |n| {
            let mut a = base.clone();
            a.sort(n);
            a
        };
        assert_eq!(s(0).as_slice(), &[1.0, 1.5, 2.0, 3.0, 4.0, 9.0]);
        assert_eq!(s(-1).as_slice(), &[9.0, 4.0, 3.0, 2.0, 1.5, 1.0]);
        assert_eq!(&s(2).as_slice()[..2], &[1.0, 1.5]);
        assert_eq!(&s(-3).as_slice()[..3], &[9.0, 4.0, 3.0]);
        assert_eq!(s(100).as_slice(), s(0).as_slice());
        assert_eq!(s(-100).as_slice(), s(-1).as_slice());
        assert_eq!(s(3).size(), 6);
    }

    #[test]
    fn grade_indexes_sort() {
        let a = Fpx::column(vec![3.0, 1.0, 2.0]);
        assert_eq!(a.grade(0).as_slice(), &[1.0, 2.0, 0.0]);
        assert_eq!(a.grade(-1).as_slice(), &[0.0, 2.0, 1.0]);
        let g = a.grade(-2);
        assert_eq!((g.rows(), g.columns()), (2, 1));
        assert_eq!(g.as_slice(), &[0.0, 2.0]);
        assert!(Fpx::default().grade(0).is_empty());
    }

    #[test]
    fn unique_shrinks_vectors() {
        let mut a = Fpx::row(vec![1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 1.0]);
        a.unique();
        assert_eq!((a.rows(), a.columns()), (1, 4));
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 1.0]);

        let mut m = Fpx::from_rows(vec![vec![1.0, 1.0], vec![2.0, 3.0]]).unwrap();
        m.unique();
        assert_eq!((m.rows(), m.columns()), (2, 2));
        assert_eq!(&m.as_slice()[..3], &[1.0, 2.0, 3.0]);
        assert!(m.as_slice()[3].is_nan());
    }

    #[test]
    fn diff_is_adjacent_difference() {
        let mut a = Fpx::column(vec![1.0, 4.0, 9.0, 16.0]);
        a.diff();
        assert_eq!(a.as_slice(), &[1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn acf_of_alternating_series() {
        let a = Fpx::column(vec![1.0, -1.0, 1.0, -1.0]);
        let c = a.acf(false);
        assert_eq!(c.as_slice()[0], 1.0);
        // windows {1,-1,1} and {-1,1,-1} have means 1/3 and -1/3
        assert!((c.as_slice()[1] + 8.0 / 9.0).abs() < 1e-12);
        assert_eq!(c.as_slice()[2], 1.0);
        assert_eq!(c.as_slice()[3], -1.0);
        let r = a.acf(true);
        assert_eq!(r.as_slice()[0], 1.0);
        assert!((r.as_slice()[1] + 8.0 / 9.0).abs() < 1e-12);
        assert_eq!((r.rows(), r.columns()), (4, 1));
    }

    #[test]
    fn sequence_bounds() {
        assert_eq!(seq(1.0, 3.0).as_slice(), &[1.0, 2.0, 3.0]);
        let s = Fpx::sequence(0.0, 1.0, 0.1).unwrap();
        assert_eq!(s.size(), 11);
        let d = Fpx::sequence(3.0, 1.0, -1.0).unwrap();
        assert_eq!(d.as_slice(), &[3.0, 2.0, 1.0]);
        assert!(Fpx::sequence(3.0, 1.0, 1.0).unwrap().is_empty());
        assert_eq!(
            Fpx::sequence(0.0, 1.0, 0.0).unwrap_err().kind,
            ExcelErrorKind::Num
        );
    }

    #[test]
    fn cyclic_index() {
        let m = matrix(2, 3);
        assert_eq!(m.index(0, 0), Some(1.0));
        assert_eq!(m.index(3, 4), Some(5.0));
        assert_eq!(m.index(-1, -1), Some(6.0));
        assert_eq!(Fpx::default().index(0, 0), None);
    }

    #[test]
    fn apply_fold_scan() {
        let mut a = seq(1.0, 4.0);
        assert_eq!(a.fold(&Standard::Add), 10.0);
        assert_eq!(a.fold(&Standard::Max), 4.0);
        a.scan(&Standard::Mul);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 6.0, 24.0]);
        assert_eq!(a.rows(), 4);
        a.apply(&Unary::Negate);
        assert_eq!(a.as_slice(), &[-1.0, -2.0, -6.0, -24.0]);
    }

    #[test]
    fn literal_conversion() {
        let v = LiteralValue::Array(vec![
            vec![LiteralValue::Int(1), LiteralValue::Boolean(true)],
            vec![LiteralValue::Number(2.5), LiteralValue::Empty],
        ]);
        let a = Fpx::try_from(&v).unwrap();
        assert_eq!((a.rows(), a.columns()), (2, 2));
        assert_eq!(a.as_slice(), &[1.0, 1.0, 2.5, 0.0]);
        assert_eq!(
            a.to_literal(),
            LiteralValue::Array(vec![
                vec![LiteralValue::Number(1.0), LiteralValue::Number(1.0)],
                vec![LiteralValue::Number(2.5), LiteralValue::Number(0.0)],
            ])
        );
        assert_eq!(Fpx::try_from(&LiteralValue::Number(7.0)).unwrap().size(), 1);
        assert!(Fpx::try_from(&LiteralValue::Text("x".into())).is_err());
        let ragged = LiteralValue::Array(vec![vec![LiteralValue::Int(1)], vec![]]);
        assert!(Fpx::try_from(&ragged).is_err());
    }
}
