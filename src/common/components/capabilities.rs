use serde::{Deserialize, Serialize};

pub const CAP_ACTS: u16 = 1 << 0;
pub const CAP_PLAYER: u16 = 1 << 1;
pub const CAP_HOSTILE: u16 = 1 << 2;
pub const CAP_PICKUP: u16 = 1 << 3;
pub const CAP_OPENABLE: u16 = 1 << 4;
pub const CAP_TALKS: u16 = 1 << 5;
pub const CAP_MORTAL: u16 = 1 << 6;

/// What an actor can do and what can be done to it. Every traversal and
/// interaction decision reads these bits rather than asking what kind of
/// thing an actor is.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Capabilities {
    pub bits: u16,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities { bits: 0 };

    pub const fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn has(&self, cap: u16) -> bool {
        self.bits & cap != 0
    }

    pub fn has_all<T>(&self, caps: T) -> bool
    where T : IntoIterator<Item = u16>, {
        caps.into_iter().all(|c| self.bits & c != 0)
    }

    pub fn has_any<T>(&self, caps: T) -> bool
    where T : IntoIterator<Item = u16>, {
        caps.into_iter().any(|c| self.bits & c != 0)
    }

    pub fn set<T>(&mut self, caps: T, on: bool)
    where T : IntoIterator<Item = u16>, {
        for c in caps.into_iter() {
            if on { self.bits |= c; }
            else { self.bits &= !c; }
        }
    }
}
