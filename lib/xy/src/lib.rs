mod dir;
mod xy;

pub use dir::{Dir, DIRECTIONS, SCAN_ORDER};
pub use xy::Xy;
