//! Scripted backend for resolver tests.
//!
//! A toy fluid: ideal gas above a fixed saturation line `p_sat = 1000 T`, and
//! a lever-rule two-phase region for quality inputs. It records every update
//! and can be told to fail the next one.

use crate::backend::{BackendError, EosBackend, OutputKey};
use crate::pair::InputSelector;
use crate::property::Phase;
use crate::substance::Substance;

const R: f64 = 461.5;
const CP: f64 = 1900.0;
const CV: f64 = CP - R;
const V_LIQUID: f64 = 1.0e-3;
const LATENT: f64 = 2.0e6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    t: f64,
    p: f64,
    v: f64,
    x: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Scripted {
    pub calls: Vec<(InputSelector, f64, f64)>,
    pub fail_next: Option<String>,
    point: Option<Point>,
}

impl Scripted {
    fn solve(selector: InputSelector, a: f64, b: f64) -> Result<Point, BackendError> {
        let gas = |t: f64, p: f64| Point {
            t,
            p,
            v: R * t / p,
            x: None,
        };
        match selector {
            InputSelector::PT => Ok(gas(b, a)),
            InputSelector::DmassT => Ok(gas(b, a * R * b)),
            InputSelector::DmassP => Ok(gas(b / (a * R), b)),
            InputSelector::QT => {
                let (x, t) = (a, b);
                let p = 1000.0 * t;
                let v_gas = R * t / p;
                Ok(Point {
                    t,
                    p,
                    v: V_LIQUID + x * (v_gas - V_LIQUID),
                    x: Some(x),
                })
            }
            other => Err(BackendError::new(format!(
                "scripted backend cannot solve {}",
                other.name()
            ))),
        }
    }

    fn point(&self) -> Result<Point, BackendError> {
        self.point
            .ok_or_else(|| BackendError::new("no update has been made"))
    }
}

impl EosBackend for Scripted {
    fn open(_substance: Substance) -> Result<Self, BackendError> {
        Ok(Self::default())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn update(
        &mut self,
        selector: InputSelector,
        first: f64,
        second: f64,
    ) -> Result<(), BackendError> {
        self.calls.push((selector, first, second));
        if let Some(message) = self.fail_next.take() {
            self.point = None;
            return Err(BackendError::new(message));
        }
        self.point = Some(Self::solve(selector, first, second)?);
        Ok(())
    }

    fn output(&self, key: OutputKey) -> Result<f64, BackendError> {
        let pt = self.point()?;
        let latent = pt.x.unwrap_or(0.0) * LATENT;
        let u = CV * pt.t + latent;
        Ok(match key {
            OutputKey::T => pt.t,
            OutputKey::P => pt.p,
            OutputKey::DMass => 1.0 / pt.v,
            OutputKey::UMass => u,
            OutputKey::HMass => u + pt.p * pt.v,
            OutputKey::SMass => CP * (pt.t / 273.15).ln() - R * (pt.p / 101_325.0).ln() + latent / pt.t,
            OutputKey::Q => pt.x.unwrap_or(-1.0),
            OutputKey::CpMass => CP,
            OutputKey::CvMass => CV,
        })
    }

    fn phase(&self) -> Result<Phase, BackendError> {
        let pt = self.point()?;
        Ok(if pt.x.is_some() {
            Phase::TwoPhase
        } else {
            Phase::Gas
        })
    }

    fn t_min(&self) -> Result<f64, BackendError> {
        Ok(273.16)
    }

    fn t_critical(&self) -> Result<f64, BackendError> {
        Ok(647.096)
    }
}
