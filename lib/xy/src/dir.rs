use serde::{Deserialize, Serialize};

use crate::xy::Xy;

/// Offsets indexed clockwise from north; index matches `Dir as usize`.
pub const DIRECTIONS: [Xy; 8] = [
    Xy { x: 0, y: -1 },  // north
    Xy { x: 1, y: -1 },  // north-east
    Xy { x: 1, y: 0 },   // east
    Xy { x: 1, y: 1 },   // south-east
    Xy { x: 0, y: 1 },   // south
    Xy { x: -1, y: 1 },  // south-west
    Xy { x: -1, y: 0 },  // west
    Xy { x: -1, y: -1 }, // north-west
];

/// Fixed scan priority per primary direction: the primary itself, then its
/// neighbours fanning out clockwise-first, and the opposite direction last.
pub const SCAN_ORDER: [[usize; 8]; 8] = [
    [0, 1, 7, 2, 6, 3, 5, 4],
    [1, 2, 0, 3, 7, 4, 6, 5],
    [2, 3, 1, 4, 0, 5, 7, 6],
    [3, 4, 2, 5, 1, 6, 0, 7],
    [4, 5, 3, 6, 2, 7, 1, 0],
    [5, 6, 4, 7, 3, 0, 2, 1],
    [6, 7, 5, 0, 4, 1, 3, 2],
    [7, 0, 6, 1, 5, 2, 4, 3],
];

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Dir {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Dir {
    pub const ALL: [Dir; 8] = [Dir::N, Dir::NE, Dir::E, Dir::SE, Dir::S, Dir::SW, Dir::W, Dir::NW];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn offset(self) -> Xy {
        DIRECTIONS[self.index()]
    }

    pub fn from_offset(offset: Xy) -> Option<Dir> {
        DIRECTIONS.iter().position(|&d| d == offset).map(|i| Dir::ALL[i])
    }

    pub fn opposite(self) -> Dir {
        Dir::ALL[(self.index() + 4) % 8]
    }

    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    /// All eight directions in this direction's scan priority.
    pub fn scan_order(self) -> [Dir; 8] {
        SCAN_ORDER[self.index()].map(|i| Dir::ALL[i])
    }
}
