use thiserror::Error;
use xy::Xy;

use crate::common::components::ActorId;

/// Failures surfaced by the grid, the router and the scheduler.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("{0} is not on the grid")]
    NotFound(ActorId),
    #[error("{seeker} has no route to {goal}")]
    NoRoute { seeker: ActorId, goal: Xy },
    #[error("{actor} failed to act: {reason}")]
    ActionFailure { actor: ActorId, reason: String },
    #[error("grid dimensions {width}x{height} must be positive")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("unknown glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Xy },
}

impl Error {
    pub fn out_of_bounds(xy: Xy) -> Self {
        Error::OutOfBounds { x: xy.x, y: xy.y }
    }

    /// Expected outcomes that callers treat as "stay put" rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoRoute { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_coordinates_and_actor() {
        let err = Error::out_of_bounds(Xy::new(7, -1));
        assert_eq!(err.to_string(), "(7, -1) is outside the grid");

        let err = Error::NoRoute { seeker: ActorId(3), goal: Xy::new(1, 2) };
        assert_eq!(err.to_string(), "actor#3 has no route to (1, 2)");
    }

    #[test]
    fn test_only_no_route_is_recoverable() {
        assert!(Error::NoRoute { seeker: ActorId(0), goal: Xy::ZERO }.is_recoverable());
        assert!(!Error::NotFound(ActorId(0)).is_recoverable());
        assert!(!Error::out_of_bounds(Xy::ZERO).is_recoverable());
    }
}
