pub mod actor;
pub mod capabilities;
pub mod input;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle to an actor owned by a `TileGrid`. Never reused.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ActorId(pub(crate) u64);

impl ActorId {
    pub fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}
