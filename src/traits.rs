//! Core traits shared by the sketches in this crate

use crate::error::Result;

/// A cardinality sketch: something that can be asked for an estimate of
/// the number of distinct items it has seen.
pub trait Sketch {
    /// Returns the current cardinality estimate.
    fn estimate(&self) -> f64;

    /// Returns `true` if the sketch has never observed an item.
    fn is_empty(&self) -> bool;
}

/// A sketch that can absorb another sketch of the same kind in place.
///
/// Unlike a general-purpose `merge`, `union_in_place` reports whether the
/// union actually changed the receiver's state. The HyperBall engine uses
/// this flag to prune work for nodes whose ball has already saturated.
pub trait Mergeable: Sketch {
    /// Unions `other` into `self`, returning whether `self` changed.
    ///
    /// # Errors
    /// Returns an error if `other` is not compatible with `self` (e.g.
    /// different precision).
    fn union_in_place(&mut self, other: &Self) -> Result<bool>;
}
