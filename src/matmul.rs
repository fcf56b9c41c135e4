use std::{
    panic,
    thread::{self, ThreadId},
};

use ndarray::{ArrayView2, ArrayViewMut2, Axis};
use tracing::trace;

use crate::{
    error::{worker_error, Result},
    partition::{partition_columns, ColumnRange},
};

/// Computes `C = A * B` for square matrices with the textbook triple loop.
///
/// Every element is accumulated in ascending `k` starting from `0.0`, so the
/// result is deterministic for fixed inputs. Whatever `c` held before is
/// overwritten.
///
/// # Panics
///
/// Panics if the three matrices are not square and of the same size.
pub fn seq_matmul(a: ArrayView2<f64>, b: ArrayView2<f64>, c: ArrayViewMut2<f64>) {
    check_shapes(&a, &b, &c);
    multiply_columns(&a, &b, c, 0);
}

/// Computes `C = A * B` with `num_threads` workers, one per column range.
///
/// The columns of `c` are split with [`partition_columns`] and each worker
/// gets an exclusive view of its own columns, so the output needs no locking.
/// Every worker runs on its own thread spawned for this call; the call
/// returns once every worker has finished its range.
///
/// Each worker runs the same kernel as [`seq_matmul`], so the result is
/// bit-for-bit identical to the sequential one for any worker count.
///
/// Callers guarantee `1 <= num_threads <= n`.
///
/// # Errors
///
/// Returns a worker error if a thread cannot be created. A panicking
/// worker propagates its panic to the caller.
///
/// # Panics
///
/// Panics if the matrices are not square and of the same size, or if
/// `num_threads` is zero.
pub fn par_matmul<'a>(
    a: ArrayView2<'a, f64>,
    b: ArrayView2<'a, f64>,
    c: ArrayViewMut2<'a, f64>,
    num_threads: usize,
) -> Result<()> {
    check_shapes(&a, &b, &c);

    let ranges = partition_columns(c.ncols(), num_threads);
    let tasks = split_tasks(a, b, c, &ranges);
    fan_out(tasks)?;

    Ok(())
}

/// Runs every task on its own named thread and joins them all.
///
/// Returns the id of the thread each task ran on, in task order.
fn fan_out(tasks: Vec<WorkerTask<'_>>) -> Result<Vec<ThreadId>> {
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(tasks.len());
        for (i, task) in tasks.into_iter().enumerate() {
            let handle = thread::Builder::new()
                .name(format!("mmm-worker-{i}"))
                .spawn_scoped(s, move || {
                    task.run();
                    thread::current().id()
                })
                .map_err(|e| worker_error(format!("failed to start worker {i}: {e}")))?;
            handles.push(handle);
        }

        Ok(handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect())
    })
}

/// Everything one worker needs: its column range, shared read-only inputs
/// and an exclusive view of the output columns it owns.
#[derive(Debug)]
pub struct WorkerTask<'a> {
    pub range: ColumnRange,
    a: ArrayView2<'a, f64>,
    b: ArrayView2<'a, f64>,
    out: ArrayViewMut2<'a, f64>,
}

impl WorkerTask<'_> {
    pub fn run(self) {
        let ColumnRange { begin, end } = self.range;
        multiply_columns(&self.a, &self.b, self.out, begin);
        trace!(begin, end, "worker finished column range");
    }
}

/// Cuts `c` into one disjoint column view per range.
fn split_tasks<'a>(
    a: ArrayView2<'a, f64>,
    b: ArrayView2<'a, f64>,
    c: ArrayViewMut2<'a, f64>,
    ranges: &[ColumnRange],
) -> Vec<WorkerTask<'a>> {
    let mut rest = c;
    let mut tasks = Vec::with_capacity(ranges.len());
    for &range in ranges {
        let (owned, tail) = rest.split_at(Axis(1), range.width());
        tasks.push(WorkerTask {
            range,
            a,
            b,
            out: owned,
        });
        rest = tail;
    }
    debug_assert_eq!(rest.ncols(), 0);
    tasks
}

/// Fills `out`, whose column 0 is column `first_col` of the full product.
#[inline]
fn multiply_columns(
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    mut out: ArrayViewMut2<f64>,
    first_col: usize,
) {
    for (i, mut out_row) in out.axis_iter_mut(Axis(0)).enumerate() {
        let a_row = a.row(i);
        for (local_j, c_ij) in out_row.iter_mut().enumerate() {
            let b_col = b.column(first_col + local_j);
            *c_ij = a_row
                .iter()
                .zip(b_col.iter())
                .fold(0.0, |acc, (&x, &y)| acc + x * y);
        }
    }
}

fn check_shapes(a: &ArrayView2<f64>, b: &ArrayView2<f64>, c: &ArrayViewMut2<f64>) {
    let n = a.nrows();
    assert_eq!(a.dim(), (n, n), "A: expected a square matrix, got {:?}", a.dim());
    assert_eq!(b.dim(), (n, n), "B: expected {n}x{n}, got {:?}", b.dim());
    assert_eq!(c.dim(), (n, n), "C: expected {n}x{n}, got {:?}", c.dim());
}
