//! Matrix Store: the four N×N matrices a run works on.
//!
//! The store is the explicit context object for a benchmark run. It is
//! created once, reset before every trial and consumed by
//! [`MatrixStore::teardown`] at the end.

use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::{allocation_error, config_error, Result};

/// Bounds of the uniform distribution used for the inputs.
pub const RANDOM_RANGE: std::ops::Range<f64> = -1.0..1.0;

/// Selects one of the four matrices owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
    ResultSeq,
    ResultPar,
}

/// Owns the inputs `a`, `b` and the outputs `result_seq`, `result_par`.
///
/// All four matrices always share the same N×N shape.
#[derive(Debug)]
pub struct MatrixStore {
    size: usize,
    pub a: Array2<f64>,
    pub b: Array2<f64>,
    pub result_seq: Array2<f64>,
    pub result_par: Array2<f64>,
    rng: StdRng,
}

impl MatrixStore {
    /// Allocates four zeroed `size`×`size` matrices.
    ///
    /// With a `seed` the random inputs are reproducible across runs,
    /// otherwise the generator is seeded from the OS.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for `size == 0` and an allocation error
    /// if the element count overflows or memory cannot be reserved.
    pub fn init(size: usize, seed: Option<u64>) -> Result<Self> {
        if size == 0 {
            return Err(config_error("size must be a positive integer"));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let store = MatrixStore {
            size,
            a: alloc_matrix(size)?,
            b: alloc_matrix(size)?,
            result_seq: alloc_matrix(size)?,
            result_par: alloc_matrix(size)?,
            rng,
        };
        debug!(size, "allocated matrix store");
        Ok(store)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Fills the selected matrix with uniform draws from [`RANDOM_RANGE`].
    pub fn reset_random(&mut self, slot: Slot) {
        let MatrixStore {
            a,
            b,
            result_seq,
            result_par,
            rng,
            ..
        } = self;
        let matrix = match slot {
            Slot::A => a,
            Slot::B => b,
            Slot::ResultSeq => result_seq,
            Slot::ResultPar => result_par,
        };
        for x in matrix.iter_mut() {
            *x = rng.random_range(RANDOM_RANGE);
        }
    }

    /// Sets every element of the selected matrix to `0.0`.
    pub fn reset_zero(&mut self, slot: Slot) {
        self.matrix_mut(slot).fill(0.0);
    }

    /// Prepares a trial: fresh random inputs, zeroed outputs.
    pub fn reset_for_trial(&mut self) {
        self.reset_random(Slot::A);
        self.reset_random(Slot::B);
        self.reset_zero(Slot::ResultSeq);
        self.reset_zero(Slot::ResultPar);
    }

    pub fn matrix(&self, slot: Slot) -> &Array2<f64> {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
            Slot::ResultSeq => &self.result_seq,
            Slot::ResultPar => &self.result_par,
        }
    }

    fn matrix_mut(&mut self, slot: Slot) -> &mut Array2<f64> {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
            Slot::ResultSeq => &mut self.result_seq,
            Slot::ResultPar => &mut self.result_par,
        }
    }

    /// Releases all four matrices.
    pub fn teardown(self) {
        debug!(size = self.size, "releasing matrix store");
        drop(self);
    }
}

/// Allocates one zeroed N×N matrix without aborting on OOM.
fn alloc_matrix(size: usize) -> Result<Array2<f64>> {
    let elements = size
        .checked_mul(size)
        .ok_or_else(|| allocation_error(usize::MAX, format!("{size}x{size} elements overflow")))?;
    let bytes = elements.saturating_mul(std::mem::size_of::<f64>());

    let mut data: Vec<f64> = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|e| allocation_error(bytes, e.to_string()))?;
    data.resize(elements, 0.0);

    Array2::from_shape_vec((size, size), data)
        .map_err(|e| allocation_error(bytes, e.to_string()))
}
