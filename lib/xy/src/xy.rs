use std::ops::Mul;

use derive_more::{Add, Display, Neg, Sub};
use serde::{Deserialize, Serialize};

use crate::dir::{Dir, DIRECTIONS};

/// Integer cell coordinate. `x` grows east, `y` grows south (screen order).
#[derive(Add, Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Neg, PartialEq, Serialize, Sub)]
#[display("({x}, {y})")]
pub struct Xy {
    pub x: i32,
    pub y: i32,
}

impl Xy {
    pub const ZERO: Xy = Xy { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Xy { x, y }
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn distance(&self, other: &Xy) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Component-wise signum, i.e. the single step that closes the gap on both axes.
    pub fn normalize(&self) -> Xy {
        Xy { x: self.x.signum(), y: self.y.signum() }
    }

    /// The eight surrounding cells in `DIRECTIONS` order; no bounds applied.
    pub fn neighbors(&self) -> [Xy; 8] {
        DIRECTIONS.map(|d| *self + d)
    }

    pub fn is_adjacent(&self, other: &Xy) -> bool {
        self.distance(other) == 1
    }

    /// Compass octant this offset points into, or `None` for the zero offset.
    ///
    /// An offset is treated as horizontal when `|x| > 2|y|`, vertical when
    /// `|y| > 2|x|`, and diagonal otherwise.
    pub fn octant(&self) -> Option<Dir> {
        if *self == Xy::ZERO { return None }
        let (ax, ay) = (self.x.abs(), self.y.abs());
        let step = if ax > 2 * ay {
            Xy { x: self.x.signum(), y: 0 }
        } else if ay > 2 * ax {
            Xy { x: 0, y: self.y.signum() }
        } else {
            self.normalize()
        };
        Dir::from_offset(step)
    }
}

impl Mul<i32> for Xy {
    type Output = Xy;
    fn mul(self, rhs: i32) -> Self::Output {
        Xy { x: self.x * rhs, y: self.y * rhs }
    }
}

impl From<(i32, i32)> for Xy {
    fn from((x, y): (i32, i32)) -> Self {
        Xy { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_chebyshev() {
        let a = Xy::new(0, 0);
        assert_eq!(a.distance(&Xy::new(4, 4)), 4);
        assert_eq!(a.distance(&Xy::new(4, 1)), 4);
        assert_eq!(a.distance(&Xy::new(-2, 3)), 3);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Xy::new(2, -1);
        let b = Xy::new(1, 3);
        assert_eq!(a + b, Xy::new(3, 2));
        assert_eq!(a - b, Xy::new(1, -4));
        assert_eq!(-a, Xy::new(-2, 1));
        assert_eq!(a * 3, Xy::new(6, -3));
    }

    #[test]
    fn test_normalize_closes_both_axes() {
        assert_eq!(Xy::new(4, 4).normalize(), Xy::new(1, 1));
        assert_eq!(Xy::new(-7, 2).normalize(), Xy::new(-1, 1));
        assert_eq!(Xy::new(0, -3).normalize(), Xy::new(0, -1));
    }

    #[test]
    fn test_neighbors_are_all_adjacent_and_distinct() {
        let c = Xy::new(5, 5);
        let n = c.neighbors();
        for (i, a) in n.iter().enumerate() {
            assert!(c.is_adjacent(a), "{a} not adjacent to {c}");
            for b in n.iter().skip(i + 1) { assert_ne!(a, b); }
        }
    }

    #[test]
    fn test_octant_classification() {
        assert_eq!(Xy::new(0, 0).octant(), None);
        assert_eq!(Xy::new(5, 1).octant(), Some(Dir::E));
        assert_eq!(Xy::new(3, 2).octant(), Some(Dir::SE));
        assert_eq!(Xy::new(-1, -6).octant(), Some(Dir::N));
        assert_eq!(Xy::new(-4, -4).octant(), Some(Dir::NW));
        assert_eq!(Xy::new(-2, 1).octant(), Some(Dir::SW));
    }

    #[test]
    fn test_display() {
        assert_eq!(Xy::new(3, -2).to_string(), "(3, -2)");
    }
}
