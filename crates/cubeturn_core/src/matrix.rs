//! Quarter-turn rotation of square matrices.

/// Rotates a square matrix by 90 degrees and returns the result.
///
/// - Clockwise: `result[col][N-1-row] = m[row][col]`
/// - Counterclockwise: `result[N-1-col][row] = m[row][col]`
///
/// The input is not modified; elements are cloned into the new matrix.
pub fn rotate_matrix<T: Clone, const N: usize>(m: &[[T; N]; N], clockwise: bool) -> [[T; N]; N] {
    std::array::from_fn(|i| {
        std::array::from_fn(|j| match clockwise {
            true => m[N - 1 - j][i].clone(),
            false => m[j][N - 1 - i].clone(),
        })
    })
}

/// Transposes a square matrix.
pub fn transpose<T: Clone, const N: usize>(m: &[[T; N]; N]) -> [[T; N]; N] {
    std::array::from_fn(|i| std::array::from_fn(|j| m[j][i].clone()))
}

/// Packs the first `N * N` items of an iterator into a matrix, row-major.
/// Returns `None` if the iterator has too few or too many items.
pub fn matrix_from_row_major<T, const N: usize>(
    iter: impl IntoIterator<Item = T>,
) -> Option<[[T; N]; N]> {
    let mut iter = iter.into_iter();
    let mut rows = Vec::with_capacity(N);
    for _ in 0..N {
        let row: Vec<T> = iter.by_ref().take(N).collect();
        rows.push(<[T; N]>::try_from(row).ok()?);
    }
    if iter.next().is_some() {
        return None;
    }
    <[[T; N]; N]>::try_from(rows).ok()
}
