use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Serialize, Deserialize};

/// Range of the uniform distribution used to seed fresh weights.
///
/// `Symmetric` draws from [-1, 1] and is the default; `Positive` draws from
/// [0, 1]. The choice affects how quickly training converges, not whether the
/// network is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightInit {
    #[default]
    Symmetric,
    Positive,
}

impl WeightInit {
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            WeightInit::Symmetric => (-1.0, 1.0),
            WeightInit::Positive => (0.0, 1.0),
        }
    }
}

/// Dense matrix stored as one flat row-major buffer.
///
/// Element `(row, col)` lives at `row * cols + col`. Weight matrices use one
/// row per *destination* unit, so row `h` of the input→hidden matrix holds all
/// the weights feeding hidden unit `h`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    /// Fills a `rows × cols` matrix with independent uniform draws.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, init: WeightInit, rng: &mut R) -> Matrix {
        let (low, high) = init.bounds();
        let dist = Uniform::new_inclusive(low, high);
        Matrix {
            rows,
            cols,
            data: (0..rows * cols).map(|_| dist.sample(rng)).collect(),
        }
    }

    /// Wraps an existing row-major buffer. Returns `None` if the length does
    /// not equal `rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Matrix-vector product `M · v`, one entry per row.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        (0..self.rows).map(|r| dot(self.row(r), v)).collect()
    }

    /// Transposed product `Mᵀ · v`, one entry per column.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut res = vec![0.0; self.cols];
        for (r, &scale) in v.iter().enumerate() {
            for (acc, w) in res.iter_mut().zip(self.row(r)) {
                *acc += scale * w;
            }
        }
        res
    }

    /// Rank-one update `M += lr * (row_signal ⊗ col_signal)`.
    ///
    /// This is the delta rule: every weight `(r, c)` moves by
    /// `lr * row_signal[r] * col_signal[c]`.
    pub fn add_outer(&mut self, lr: f64, row_signal: &[f64], col_signal: &[f64]) {
        debug_assert_eq!(row_signal.len(), self.rows);
        debug_assert_eq!(col_signal.len(), self.cols);
        for (r, &delta) in row_signal.iter().enumerate() {
            let step = lr * delta;
            for (w, x) in self.row_mut(r).iter_mut().zip(col_signal) {
                *w += step * x;
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|w| w.is_finite())
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
