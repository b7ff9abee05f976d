//! Input signals fed into a [crate::Network]. Scalars pass through unchanged, composite signals are
//! reduced to their arithmetic mean before they reach a node.

use crate::error::{HarmonyError, Result};
use serde::{Deserialize, Serialize};

const PAIRWISE_BLOCK: usize = 128;

/// Anything which may be reduced to a single scalar stimulus
pub trait Signal {
    fn reduce(&self) -> Result<f64>;
}

impl Signal for f64 {
    fn reduce(&self) -> Result<f64> {
        Ok(*self)
    }
}

impl Signal for [f64] {
    fn reduce(&self) -> Result<f64> {
        mean(self)
    }
}

impl<const N: usize> Signal for [f64; N] {
    fn reduce(&self) -> Result<f64> {
        mean(self)
    }
}

impl Signal for Vec<f64> {
    fn reduce(&self) -> Result<f64> {
        mean(self)
    }
}

impl<T: Signal + ?Sized> Signal for &T {
    fn reduce(&self) -> Result<f64> {
        (**self).reduce()
    }
}

/// An owned scalar or composite sample, as read from JSON: `0.4` or `[0.4, 0.7]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Scalar(f64),
    Composite(Vec<f64>),
}

impl Signal for Sample {
    fn reduce(&self) -> Result<f64> {
        match self {
            Self::Scalar(v) => Ok(*v),
            Self::Composite(v) => mean(v),
        }
    }
}

impl From<f64> for Sample {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(v: Vec<f64>) -> Self {
        Self::Composite(v)
    }
}

/// Arithmetic mean, summed pairwise so the result matches numpy's `mean` bit for bit
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(HarmonyError::EmptySignal);
    }
    Ok(pairwise_sum(values) / values.len() as f64)
}

/// Sequential below 8 values, 8 interleaved accumulators up to a block of 128,
/// and recursive halving on multiples of 8 above that
pub fn pairwise_sum(a: &[f64]) -> f64 {
    let n = a.len();
    if n < 8 {
        a.iter().fold(-0., |acc, v| acc + v)
    } else if n <= PAIRWISE_BLOCK {
        let mut r = [0f64; 8];
        r.copy_from_slice(&a[..8]);
        let mut i = 8;
        while i < n - n % 8 {
            for (j, acc) in r.iter_mut().enumerate() {
                *acc += a[i + j];
            }
            i += 8;
        }
        let mut res = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        for v in &a[i..] {
            res += v;
        }
        res
    } else {
        let mut n2 = n / 2;
        n2 -= n2 % 8;
        pairwise_sum(&a[..n2]) + pairwise_sum(&a[n2..])
    }
}
