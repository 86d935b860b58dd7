use crate::{TsError, TsResult};

/// Floating point type of every canonical SI value
pub type Real = f64;

/// Absolute and relative tolerance; two values agree when either bound holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const STRICT: Self = Self {
        abs: 1e-12,
        rel: 1e-9,
    };

    /// Equation-of-state results come from iterative solves, so two States are
    /// compared with this looser pair (matches `numpy.isclose` defaults).
    pub const STATE: Self = Self {
        abs: 1e-8,
        rel: 1e-5,
    };

    pub fn close(self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::STRICT
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.close(a, b)
}

/// Reject NaN and infinities before they reach the backend.
pub fn ensure_finite(v: Real, what: &'static str) -> TsResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TsError::NonFinite { what, value: v })
    }
}
