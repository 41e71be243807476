//! HyperLogLog sketch: the cardinality primitive the HyperBall engine
//! unions at every node, every iteration.
//!
//! # Algorithm Overview
//!
//! 1. Hash the inserted item to a uniform 64-bit value.
//! 2. Use the top `b` bits to pick one of `m = 2^b` registers.
//! 3. Store the position of the leading one bit (plus one) of the
//!    remaining bits, keeping the maximum seen per register.
//! 4. Estimate cardinality from the harmonic mean of `2^(-register)`,
//!    with small- and large-range corrections (Flajolet et al. 2007).
//!
//! # References
//!
//! Flajolet, Fusy, Gandouet, Meunier. "HyperLogLog: the analysis of a
//! near-optimal cardinality estimation algorithm" (2007).

use crate::error::{DistanceError, Result};
use crate::hash;
use crate::traits::{Mergeable, Sketch};
use crate::validation;

/// A fixed-precision HyperLogLog cardinality sketch.
///
/// # Examples
///
/// ```
/// use hyperball::HllSketch;
/// use hyperball::traits::Sketch;
///
/// let mut hll = HllSketch::new(12).unwrap();
/// hll.add(&1u64.to_be_bytes());
/// hll.add(&2u64.to_be_bytes());
/// assert!((hll.estimate() - 2.0).abs() < 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HllSketch {
    precision: u8,
    registers: Vec<u8>,
}

impl HllSketch {
    /// Creates a new, empty sketch with `2^precision` registers.
    ///
    /// # Errors
    /// Returns [`DistanceError::PrecisionOutOfRange`] unless
    /// `4 <= precision <= 16`.
    pub fn new(precision: u8) -> Result<Self> {
        validation::validate_precision(precision)?;
        Ok(Self {
            precision,
            registers: vec![0u8; 1usize << precision],
        })
    }

    /// Returns the sketch's precision parameter.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the number of registers, `m = 2^precision`.
    #[inline]
    pub fn num_registers(&self) -> usize {
        1usize << self.precision
    }

    /// Inserts an opaque byte sequence into the sketch.
    pub fn add(&mut self, v: &[u8]) {
        self.add_hash(hash::hash64(v));
    }

    /// Inserts a pre-computed 64-bit hash directly, bypassing [`hash::hash64`].
    ///
    /// The index is the top `precision` bits of `h`; the register stores the
    /// position of the leading one among the remaining `64 - precision`
    /// bits, one-based, counted from the most significant bit (so an
    /// all-zero remainder yields `64 - precision + 1`).
    pub fn add_hash(&mut self, h: u64) {
        let idx = (h >> (64 - self.precision)) as usize;
        // `w` packs the remaining bits with a sentinel `1` appended so that
        // `leading_zeros` behaves correctly even when those bits are all
        // zero, without a special case.
        let w = (h << self.precision) | (1u64 << (self.precision - 1));
        let rho = (w.leading_zeros() + 1) as u8;
        if rho > self.registers[idx] {
            self.registers[idx] = rho;
        }
    }

    /// Returns a deep copy of this sketch.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns a read-only view of the registers, for debugging.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    fn raw_estimate(&self) -> f64 {
        let m = self.num_registers() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 2.0_f64.powi(-(r as i32)))
            .sum();
        self.alpha() * m * m / sum
    }

    fn alpha(&self) -> f64 {
        let m = self.num_registers() as f64;
        match self.num_registers() {
            16 => 0.673,
            32 => 0.697,
            64 => 0.709,
            _ => 0.7213 / (1.0 + 1.079 / m),
        }
    }

    fn count_zero_registers(&self) -> usize {
        self.registers.iter().filter(|&&r| r == 0).count()
    }
}

impl Sketch for HllSketch {
    /// Estimates cardinality with small- and large-range corrections.
    ///
    /// The large-range branch uses the corrected sign from the Flajolet
    /// paper, `-2^32 · ln(1 - E/2^32)`, rather than the sign-inverted
    /// (and therefore always-negative) form that some HyperLogLog
    /// write-ups carry forward uncorrected.
    fn estimate(&self) -> f64 {
        let m = self.num_registers() as f64;
        let raw = self.raw_estimate();

        if raw <= 2.5 * m {
            let zeros = self.count_zero_registers();
            if zeros > 0 {
                return m * (m / zeros as f64).ln();
            }
        }

        let two_pow_32 = (1u64 << 32) as f64;
        if raw > two_pow_32 / 30.0 {
            return -two_pow_32 * (1.0 - raw / two_pow_32).ln();
        }

        raw
    }

    fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }
}

impl Mergeable for HllSketch {
    /// Unions `other`'s registers into `self`, register-wise maximum.
    ///
    /// # Errors
    /// Returns [`DistanceError::PrecisionMismatch`] if the precisions
    /// differ; neither sketch is modified in that case.
    fn union_in_place(&mut self, other: &Self) -> Result<bool> {
        if self.precision != other.precision {
            return Err(DistanceError::PrecisionMismatch {
                left: self.precision,
                right: other.precision,
            });
        }

        let mut changed = false;
        for (mine, &theirs) in self.registers.iter_mut().zip(other.registers.iter()) {
            if theirs > *mine {
                *mine = theirs;
                changed = true;
            }
        }
        Ok(changed)
    }
}
