use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumIter, EnumString};

pub const MIN_SAMPLES: usize = 2;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Linear,
    Spline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    NotATable,
    NotARow { row: usize },
    ColumnCount { row: usize, columns: usize },
    NonNumeric { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutError {
    Shape(ShapeError),
    UnknownMethod,
    TooFewSamples(usize),
    UnorderedSamples { index: usize },
}

impl From<ShapeError> for LutError {
    fn from(error: ShapeError) -> Self {
        LutError::Shape(error)
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::NotATable => write!(f, "lookup table is not an array of rows"),
            ShapeError::NotARow { row } => write!(f, "row {} is not an array", row),
            ShapeError::ColumnCount { row, columns } => {
                write!(f, "row {} has {} columns, expected 2", row, columns)
            }
            ShapeError::NonNumeric { row, column } => {
                write!(f, "cell ({}, {}) is not a number", row, column)
            }
        }
    }
}

impl fmt::Display for LutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LutError::Shape(error) => write!(f, "malformed lookup table: {}", error),
            LutError::UnknownMethod => write!(f, "unknown interpolation method"),
            LutError::TooFewSamples(count) => write!(
                f,
                "lookup table needs at least {} samples, got {}",
                MIN_SAMPLES, count
            ),
            LutError::UnorderedSamples { index } => {
                write!(f, "sample {} does not strictly increase in x", index)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Model {
    Linear,
    // Second derivative of the natural cubic spline at each sample
    Spline { curvatures: Vec<f64> },
}

/// One-dimensional lookup table over strictly increasing x samples.
///
/// Linear lookups clamp to the boundary samples outside the table range, spline
/// lookups extrapolate the boundary cubic.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    xs: Vec<f64>,
    ys: Vec<f64>,
    method: InterpolationMethod,
    model: Model,
}

impl Lut {
    pub fn new(table: &[[f64; 2]], method: InterpolationMethod) -> Result<Self, LutError> {
        let xs = table.iter().map(|sample| sample[0]).collect();
        let ys = table.iter().map(|sample| sample[1]).collect();

        Self::from_columns(xs, ys, method)
    }

    /// Builds a table from nested rows, e.g. straight out of a config file.
    pub fn from_rows<R>(rows: &[R], method: &str) -> Result<Self, LutError>
    where
        R: AsRef<[f64]>,
    {
        let method = parse_method(method)?;

        let mut table = Vec::with_capacity(rows.len());
        for (row, values) in rows.iter().enumerate() {
            match values.as_ref() {
                [x, y] => table.push([*x, *y]),
                other => {
                    return Err(reject(ShapeError::ColumnCount {
                        row,
                        columns: other.len(),
                    }))
                }
            }
        }

        Self::new(&table, method)
    }

    pub fn from_json(value: &Value, method: &str) -> Result<Self, LutError> {
        let method = parse_method(method)?;
        let rows = value.as_array().ok_or_else(|| reject(ShapeError::NotATable))?;

        let mut table = Vec::with_capacity(rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_array().ok_or_else(|| reject(ShapeError::NotARow { row }))?;
            if cells.len() != 2 {
                return Err(reject(ShapeError::ColumnCount {
                    row,
                    columns: cells.len(),
                }));
            }

            let mut sample = [0.0; 2];
            for (column, cell) in cells.iter().enumerate() {
                sample[column] = cell
                    .as_f64()
                    .ok_or_else(|| reject(ShapeError::NonNumeric { row, column }))?;
            }
            table.push(sample);
        }

        Self::new(&table, method)
    }

    fn from_columns(
        xs: Vec<f64>,
        ys: Vec<f64>,
        method: InterpolationMethod,
    ) -> Result<Self, LutError> {
        if xs.len() < MIN_SAMPLES {
            warn!("Rejected lookup table with {} samples", xs.len());
            return Err(LutError::TooFewSamples(xs.len()));
        }

        // Written as !(a < b) so NaN is rejected too
        if let Some(index) = (1..xs.len()).find(|&i| !(xs[i - 1] < xs[i])) {
            warn!("Rejected lookup table, x is not increasing at sample {}", index);
            return Err(LutError::UnorderedSamples { index });
        }

        let model = match method {
            InterpolationMethod::Linear => Model::Linear,
            InterpolationMethod::Spline => Model::Spline {
                curvatures: natural_spline_curvatures(&xs, &ys),
            },
        };

        debug!(
            "Built {} lookup table with {} samples over [{}, {}]",
            method,
            xs.len(),
            xs[0],
            xs[xs.len() - 1]
        );

        Ok(Self {
            xs,
            ys,
            method,
            model,
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return x;
        }

        match &self.model {
            Model::Linear => self.linear(x),
            Model::Spline { curvatures } => self.spline(x, curvatures),
        }
    }

    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    fn linear(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;

        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }

        let lo = self.interval(x);
        let hi = lo + 1;
        let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);

        self.ys[lo] + (self.ys[hi] - self.ys[lo]) * t
    }

    fn spline(&self, x: f64, curvatures: &[f64]) -> f64 {
        let lo = self.interval(x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * curvatures[lo] + (b * b * b - b) * curvatures[hi]) * h * h / 6.0
    }

    // Index of the segment used for x, out of range inputs map to the end segments
    fn interval(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&sample| sample <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }
}

fn parse_method(method: &str) -> Result<InterpolationMethod, LutError> {
    InterpolationMethod::from_str(method).map_err(|_| {
        warn!("Unknown interpolation method '{}'", method);
        LutError::UnknownMethod
    })
}

fn reject(error: ShapeError) -> LutError {
    warn!("Rejected lookup table: {}", error);
    error.into()
}

// Tridiagonal solve for the natural spline, both end curvatures are zero
fn natural_spline_curvatures(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut curvatures = alloc::vec![0.0; n];
    let mut u = alloc::vec![0.0; n];

    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * curvatures[i - 1] + 2.0;
        curvatures[i] = (sig - 1.0) / p;

        let slope_delta =
            (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * slope_delta / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    curvatures[n - 1] = 0.0;
    for k in (0..n - 1).rev() {
        curvatures[k] = curvatures[k] * curvatures[k + 1] + u[k];
    }

    curvatures
}
