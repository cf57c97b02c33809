//! Row-wise evaluation shared by the transforms.
//!
//! With the `parallel` feature rows are distributed over the rayon pool;
//! otherwise they run in order. Both paths write identical output.

use imgcmp_core::Image;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds an output buffer shaped like `a`, calling `f(row, a_row, b_row, out_row)`
/// once per row. Callers must have checked that `a` and `b` share a shape.
pub(crate) fn map_rows<F>(a: &Image, b: &Image, f: F) -> Vec<f32>
where
    F: Fn(usize, &[f32], &[f32], &mut [f32]) + Sync + Send,
{
    let row_len = a.shape().row_len();
    let mut out = vec![0.0f32; a.len()];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(r, row)| f(r, a.row(r), b.row(r), row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(row_len)
        .enumerate()
        .for_each(|(r, row)| f(r, a.row(r), b.row(r), row));

    out
}
