//! Boundary to an external gradient-boosting trainer.
//!
//! Nothing here trains a model. The crate only marshals a [`Matrix`] into
//! the dense row-major `f32` layout such engines take, and drives the
//! create -> update x N -> release lifecycle of the engine's opaque handle.
//! The handle is released on every exit path: after a failed update, on an
//! explicit [`TrainedBooster::release`], or when the guard is dropped.
use log::{debug, warn};

use crate::error::LinalgError;
use crate::math::{Matrix, Scalar};

/// Dense training data in the layout external trainers expect.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBatch {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    missing: f32,
    labels: Option<Vec<f32>>,
}

impl DenseBatch {
    /// Flatten `x` row-major. Values that do not fit in `f32` become
    /// `missing`.
    pub fn from_matrix<T: Scalar>(x: &Matrix<T>, missing: f32) -> Result<Self, LinalgError> {
        if let Some(error) = x.err() {
            return Err(error.clone());
        }
        let data = x
            .as_slice()
            .iter()
            .map(|v| v.to_f32().unwrap_or(missing))
            .collect();
        Ok(DenseBatch {
            data,
            rows: x.nrows(),
            cols: x.ncols(),
            missing,
            labels: None,
        })
    }

    /// Attach one label per row, read from the first column of `y`.
    pub fn with_labels<T: Scalar>(mut self, y: &Matrix<T>) -> Result<Self, LinalgError> {
        if let Some(error) = y.err() {
            return Err(error.clone());
        }
        if y.nrows() != self.rows || y.ncols() == 0 {
            return Err(LinalgError::LengthMismatch {
                left: self.rows,
                right: y.nrows(),
            });
        }
        let labels = y
            .column(0)
            .iter()
            .map(|v| v.to_f32().unwrap_or(f32::NAN))
            .collect();
        self.labels = Some(labels);
        Ok(self)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn missing(&self) -> f32 {
        self.missing
    }

    pub fn labels(&self) -> Option<&[f32]> {
        self.labels.as_deref()
    }
}

/// An external trainer owning its own memory behind `Handle`.
pub trait BoosterEngine {
    type Handle;

    fn create(&mut self, batch: &DenseBatch) -> Result<Self::Handle, LinalgError>;

    /// Run one boosting iteration.
    fn update(&mut self, handle: &mut Self::Handle, iteration: usize) -> Result<(), LinalgError>;

    fn release(&mut self, handle: Self::Handle) -> Result<(), LinalgError>;
}

/// A live engine handle. Releases it on drop unless released explicitly.
pub struct TrainedBooster<'e, E: BoosterEngine> {
    engine: &'e mut E,
    handle: Option<E::Handle>,
    rounds: usize,
}

impl<'e, E: BoosterEngine> TrainedBooster<'e, E> {
    pub fn handle(&self) -> Option<&E::Handle> {
        self.handle.as_ref()
    }

    /// Completed boosting iterations.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn update(&mut self, iteration: usize) -> Result<(), LinalgError> {
        let handle = self
            .handle
            .as_mut()
            .ok_or_else(|| LinalgError::Engine("booster already released".to_string()))?;
        self.engine.update(handle, iteration)?;
        self.rounds += 1;
        Ok(())
    }

    pub fn release(mut self) -> Result<(), LinalgError> {
        match self.handle.take() {
            Some(handle) => self.engine.release(handle),
            None => Ok(()),
        }
    }
}

impl<'e, E: BoosterEngine> Drop for TrainedBooster<'e, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.engine.release(handle) {
                warn!("failed to release booster handle: {}", e);
            }
        }
    }
}

/// Create a handle for `batch` and run `rounds` updates on it. A failed
/// update releases the handle before the error is returned.
pub fn train<'e, E: BoosterEngine>(
    engine: &'e mut E,
    batch: &DenseBatch,
    rounds: usize,
) -> Result<TrainedBooster<'e, E>, LinalgError> {
    debug!(
        "creating booster from dense data: rows={}, cols={}, len={}",
        batch.nrows(),
        batch.ncols(),
        batch.as_slice().len()
    );
    let handle = engine.create(batch)?;
    let mut booster = TrainedBooster {
        engine,
        handle: Some(handle),
        rounds: 0,
    };
    for iteration in 0..rounds {
        booster.update(iteration)?;
    }
    debug!("booster trained for {} rounds", booster.rounds());
    Ok(booster)
}
