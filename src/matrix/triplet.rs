use std::{
    cmp::Ordering,
    ops::{Add, Mul},
    slice,
};

use num::Zero;

use crate::error::MatrixError;

/// A single stored entry of a [`TripletMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triple<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> Triple<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }

    /// Coordinates used for ordering
    #[inline]
    pub fn coords(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Sparse `rows x cols` matrix storing triples strictly ascending by `(row, col)`.
///
/// A missing entry reads as "zero"; explicitly inserting zero is permitted and stores the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripletMatrix<T> {
    rows: usize,
    cols: usize,
    entries: Vec<Triple<T>>,
}

impl<T> Default for TripletMatrix<T> {
    /// The empty `0 x 0` matrix
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T> TripletMatrix<T> {
    /// Creates an empty `rows x cols` matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Creates a matrix from arbitrary-ordered triples. Later duplicates overwrite earlier ones.
    pub fn from_triples<I>(rows: usize, cols: usize, triples: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(rows, cols);
        for (r, c, v) in triples {
            matrix.insert(r, c, v)?;
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    #[inline]
    fn search(&self, row: usize, col: usize) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|t| t.coords().cmp(&(row, col)))
    }

    /// Stores `value` at `(row, col)`, overwriting a present entry.
    /// Fails if the coordinate lies outside of the matrix.
    pub fn insert(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        self.upsert(row, col, value);
        Ok(())
    }

    /// Sorted insertion without bounds check
    fn upsert(&mut self, row: usize, col: usize, value: T) {
        match self.search(row, col) {
            Ok(pos) => self.entries[pos].value = value,
            Err(pos) => self.entries.insert(pos, Triple::new(row, col, value)),
        }
    }

    /// Returns the value stored at `(row, col)`, if any
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.search(row, col).ok().map(|pos| &self.entries[pos].value)
    }

    /// Returns a mutable reference to the value stored at `(row, col)`, if any
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.search(row, col)
            .ok()
            .map(|pos| &mut self.entries[pos].value)
    }

    /// Returns *true* if an entry is stored at `(row, col)`
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.search(row, col).is_ok()
    }

    /// Removes and returns the entry at `(row, col)`, if any
    pub fn remove(&mut self, row: usize, col: usize) -> Option<T> {
        self.search(row, col)
            .ok()
            .map(|pos| self.entries.remove(pos).value)
    }

    /// Removes all entries but keeps the shape
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Ordered iterator over all stored entries
    pub fn iter(&self) -> slice::Iter<'_, Triple<T>> {
        self.entries.iter()
    }

    /// Returns the (sorted) entries of row `row`; empty if the row is out of bounds
    pub fn row(&self, row: usize) -> &[Triple<T>] {
        let begin = self.entries.partition_point(|t| t.row < row);
        let end = begin + self.entries[begin..].partition_point(|t| t.row == row);
        &self.entries[begin..end]
    }

    /// Drops row `k` and column `k` and shifts all entries with a higher row/col index down by one.
    /// The shape is kept.
    pub fn remove_row_and_col(&mut self, k: usize) {
        let shift = |i: usize| if i > k { i - 1 } else { i };
        self.entries.retain(|t| t.row != k && t.col != k);
        for t in &mut self.entries {
            t.row = shift(t.row);
            t.col = shift(t.col);
        }
    }
}

impl<T: Clone> TripletMatrix<T> {
    /// Naive transposition: re-inserts every entry as `(col, row, value)` into an empty `cols x rows` matrix
    pub fn transpose(&self) -> Self {
        let mut result = Self::new(self.cols, self.rows);
        for t in &self.entries {
            result.upsert(t.col, t.row, t.value.clone());
        }
        result
    }

    /// Transposition via counting sort in `O(rows + cols + nnz)`
    pub fn transpose_fast(&self) -> Self {
        // offsets[c] is the first slot of source column c in the result
        let mut offsets = vec![0usize; self.cols + 1];
        for t in &self.entries {
            offsets[t.col + 1] += 1;
        }
        for c in 0..self.cols {
            offsets[c + 1] += offsets[c];
        }

        let mut slots: Vec<Option<Triple<T>>> = vec![None; self.entries.len()];
        for t in &self.entries {
            let pos = &mut offsets[t.col];
            slots[*pos] = Some(Triple::new(t.col, t.row, t.value.clone()));
            *pos += 1;
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            entries: slots.into_iter().flatten().collect(),
        }
    }
}

impl<T> TripletMatrix<T>
where
    T: Zero + PartialEq + Copy,
{
    /// Sum of all stored values
    pub fn sum_of_values(&self) -> T {
        self.entries.iter().fold(T::zero(), |acc, t| acc + t.value)
    }

    /// Entry-wise sum. Coordinates summing to zero are dropped.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut entries = Vec::with_capacity(self.len() + other.len());
        let (mut lhs, mut rhs) = (self.entries.iter().peekable(), other.entries.iter().peekable());
        loop {
            let next = match (lhs.peek().copied(), rhs.peek().copied()) {
                (Some(a), Some(b)) => match a.coords().cmp(&b.coords()) {
                    Ordering::Less => lhs.next().copied(),
                    Ordering::Greater => rhs.next().copied(),
                    Ordering::Equal => {
                        let sum = a.value + b.value;
                        let t = Triple::new(a.row, a.col, sum);
                        lhs.next();
                        rhs.next();
                        if sum.is_zero() {
                            continue;
                        }
                        Some(t)
                    }
                },
                (Some(_), None) => lhs.next().copied(),
                (None, Some(_)) => rhs.next().copied(),
                (None, None) => break,
            };
            entries.extend(next);
        }

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            entries,
        })
    }
}

impl<T> TripletMatrix<T>
where
    T: Zero + Mul<Output = T> + Copy,
{
    /// Naive matrix product in `O(rows * cols * inner)`; only non-zero results are stored.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut entries = Vec::new();
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = T::zero();
                for k in 0..self.cols {
                    if let (Some(&a), Some(&b)) = (self.get(i, k), other.get(k, j)) {
                        sum = sum + a * b;
                    }
                }
                if !sum.is_zero() {
                    entries.push(Triple::new(i, j, sum));
                }
            }
        }

        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            entries,
        })
    }
}

/// Returns the empty `0 x 0` matrix if the shapes differ
impl<T> Add for &TripletMatrix<T>
where
    T: Zero + PartialEq + Copy,
{
    type Output = TripletMatrix<T>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or_default()
    }
}

/// Returns the empty `0 x 0` matrix if the inner dimensions differ
impl<T> Mul for &TripletMatrix<T>
where
    T: Zero + Mul<Output = T> + Copy,
{
    type Output = TripletMatrix<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).unwrap_or_default()
    }
}

impl<'a, T> IntoIterator for &'a TripletMatrix<T> {
    type Item = &'a Triple<T>;
    type IntoIter = slice::Iter<'a, Triple<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for TripletMatrix<T> {
    type Item = Triple<T>;
    type IntoIter = std::vec::IntoIter<Triple<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn random_matrix(rng: &mut impl Rng, rows: usize, cols: usize, nnz: usize) -> TripletMatrix<i64> {
        TripletMatrix::from_triples(
            rows,
            cols,
            (0..nnz).map(|_| {
                (
                    rng.random_range(0..rows),
                    rng.random_range(0..cols),
                    rng.random_range(-5..=5),
                )
            }),
        )
        .unwrap()
    }

    #[test]
    fn insert_keeps_entries_sorted() {
        let mut m = TripletMatrix::new(3, 4);
        m.insert(2, 1, 7).unwrap();
        m.insert(0, 3, 1).unwrap();
        m.insert(2, 0, 5).unwrap();
        m.insert(0, 3, 9).unwrap();
        m.insert(1, 1, 0).unwrap();

        assert_eq!(
            m.iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
            vec![(0, 3, 9), (1, 1, 0), (2, 0, 5), (2, 1, 7)]
        );
        assert_eq!(m.get(1, 1), Some(&0));
        assert_eq!(m.get(1, 2), None);
        assert_eq!(m.row(2).len(), 2);
        assert!(m.row(7).is_empty());
    }

    #[test]
    fn insert_rejects_out_of_bounds() {
        let mut m = TripletMatrix::new(2, 2);
        assert_eq!(
            m.insert(2, 0, 1),
            Err(MatrixError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
        assert!(m.insert(0, 2, 1).is_err());
        assert!(m.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut m = TripletMatrix::from_triples(3, 3, [(0, 0, 1), (1, 2, 2)]).unwrap();
        assert_eq!(m.remove(1, 2), Some(2));
        assert_eq!(m.remove(1, 2), None);
        assert_eq!(m.len(), 1);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.shape(), (3, 3));
    }

    #[test]
    fn remove_row_and_col_shifts_indices() {
        let mut m =
            TripletMatrix::from_triples(4, 4, [(0, 1, 1), (1, 3, 2), (2, 0, 3), (3, 2, 4), (3, 3, 5)])
                .unwrap();
        m.remove_row_and_col(1);
        assert_eq!(
            m.iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
            vec![(1, 0, 3), (2, 1, 4), (2, 2, 5)]
        );
    }

    #[test]
    fn transpose_variants_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        for (rows, cols) in [(1, 1), (3, 7), (10, 4), (20, 20)] {
            for nnz in [0, rows, rows * cols / 2] {
                let m = random_matrix(rng, rows, cols, nnz);
                let t = m.transpose();
                assert_eq!(t.shape(), (cols, rows));
                assert_eq!(t, m.transpose_fast());
                assert_eq!(t.transpose(), m);
                assert_eq!(m.transpose_fast().transpose_fast(), m);
            }
        }
    }

    #[test]
    fn add_drops_cancelled_entries() {
        let a = TripletMatrix::from_triples(2, 3, [(0, 0, 1), (0, 2, 4), (1, 1, -3)]).unwrap();
        let b = TripletMatrix::from_triples(2, 3, [(0, 1, 2), (0, 2, -4), (1, 1, 5), (1, 2, 6)]).unwrap();
        let c = &a + &b;

        assert_eq!(
            c.iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
            vec![(0, 0, 1), (0, 1, 2), (1, 1, 2), (1, 2, 6)]
        );
    }

    #[test]
    fn add_matches_dense_sum() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        for _ in 0..20 {
            let a = random_matrix(rng, 6, 5, 12);
            let b = random_matrix(rng, 6, 5, 12);
            let c = &a + &b;
            for i in 0..6 {
                for j in 0..5 {
                    let expected = a.get(i, j).copied().unwrap_or(0) + b.get(i, j).copied().unwrap_or(0);
                    assert_eq!(c.get(i, j).copied().unwrap_or(0), expected);
                }
            }
            assert!(c.iter().tuple_windows().all(|(x, y)| x.coords() < y.coords()));
        }
    }

    #[test]
    fn multiply() {
        // [1 2]   [0 1]   [4 1]
        // [0 3] x [2 0] = [6 0]
        let a = TripletMatrix::from_triples(2, 2, [(0, 0, 1), (0, 1, 2), (1, 1, 3)]).unwrap();
        let b = TripletMatrix::from_triples(2, 2, [(0, 1, 1), (1, 0, 2)]).unwrap();
        let c = &a * &b;
        assert_eq!(
            c.iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
            vec![(0, 0, 4), (0, 1, 1), (1, 0, 6)]
        );
    }

    #[test]
    fn multiply_drops_cancelled_products() {
        // [1 1] x [1 -1]^T = [0]
        let a = TripletMatrix::from_triples(1, 2, [(0, 0, 1), (0, 1, 1)]).unwrap();
        let b = TripletMatrix::from_triples(2, 1, [(0, 0, 1), (1, 0, -1)]).unwrap();
        let c = &a * &b;
        assert_eq!(c.shape(), (1, 1));
        assert!(c.is_empty());
        assert_eq!(c.get(0, 0), None);
    }

    #[test]
    fn multiply_matches_dense_product() {
        let rng = &mut Pcg64Mcg::seed_from_u64(13);
        for (rows, inner, cols) in [(1, 1, 1), (3, 4, 2), (5, 5, 5), (6, 3, 7)] {
            for _ in 0..10 {
                let a = random_matrix(rng, rows, inner, rows * inner / 2 + 1);
                let b = random_matrix(rng, inner, cols, inner * cols / 2 + 1);
                let c = a.checked_mul(&b).unwrap();
                assert_eq!(c.shape(), (rows, cols));

                for i in 0..rows {
                    for j in 0..cols {
                        let expected: i64 = (0..inner)
                            .map(|k| {
                                a.get(i, k).copied().unwrap_or(0) * b.get(k, j).copied().unwrap_or(0)
                            })
                            .sum();
                        assert_eq!(c.get(i, j).copied().unwrap_or(0), expected);
                    }
                }
                assert!(c.iter().all(|t| t.value != 0));
                assert!(c.iter().tuple_windows().all(|(x, y)| x.coords() < y.coords()));
            }
        }
    }

    #[test]
    fn mismatched_shapes_produce_empty_matrix() {
        let a = TripletMatrix::from_triples(2, 3, [(0, 0, 1)]).unwrap();
        let b = TripletMatrix::from_triples(2, 2, [(0, 0, 1)]).unwrap();

        assert!(a.checked_add(&b).is_err());
        assert_eq!(&a + &b, TripletMatrix::default());
        assert_eq!(&a * &b, TripletMatrix::default());
        assert_eq!((&b * &a).shape(), (2, 3));
    }
}
