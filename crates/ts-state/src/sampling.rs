//! Point generation for process traces and the saturation dome.

use crate::error::{StateError, StateResult};
use std::fmt;

/// Spacing of generated points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// A closed range of SI values to sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub spacing: Spacing,
}

impl Sweep {
    pub fn new(start: f64, end: f64, num_points: usize, spacing: Spacing) -> StateResult<Self> {
        if num_points < 2 {
            return Err(StateError::Process {
                what: "a sweep must have at least 2 points".to_string(),
            });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(StateError::Process {
                what: format!("non-finite sweep bounds {start} to {end}"),
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            spacing,
        })
    }

    /// Generate all points, endpoints exact.
    pub fn points(&self) -> Vec<f64> {
        match self.spacing {
            Spacing::Linear => self.linear(),
            Spacing::Logarithmic => self.logarithmic(),
        }
    }

    fn linear(&self) -> Vec<f64> {
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }

    fn logarithmic(&self) -> Vec<f64> {
        // Log spacing needs both bounds positive
        if self.start <= 0.0 || self.end <= 0.0 {
            return self.linear();
        }

        let log_start = self.start.log10();
        let log_delta = (self.end.log10() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| 10f64.powf(log_start + i as f64 * log_delta))
            .collect();
        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}
