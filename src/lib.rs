//! Simulation core for a turn-based ASCII dungeon: a grid of stacked actors,
//! a per-tick scheduler, pluggable behaviours and a wavefront router.
//!
//! ```
//! use unnamed_ascii_dungeon::prelude::*;
//!
//! let (mut world, spawned) = World::from_ascii(Config::default(), "@.g").unwrap();
//! let hero = spawned.first('@').unwrap();
//! world.add_input(hero, Key::Wait).unwrap();
//! let report = world.tick();
//! assert_eq!(report.tick, 1);
//! println!("{}", world.frame());
//! ```

pub mod common;
pub mod prelude;
pub mod sim;
