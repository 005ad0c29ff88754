use log::trace;
use pathfinding::prelude::*;
use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;
use xy::Xy;

use crate::{
    common::{components::ActorId, error::{Error, Result}, grid::TileGrid},
    sim::{behaviour::Behaviour, movement::{self, StepOutcome}, world::World},
};

/// Defines how PathTo approaches its destination
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PathLimit {
    /// Move N tiles towards dest, then finish (even if not at dest)
    By(u16),
    /// Move towards dest until N tiles away, then finish
    Until(u16),
    /// Move all the way to dest (or next to it, if something stands there)
    #[default] Complete,
}

/// Travel to a fixed cell along a planned path, one step per tick.
#[derive(Clone, Debug, Default)]
pub struct PathTo {
    pub dest: Xy,
    pub path: ArrayVec<[Xy; 20]>,
    pub limit: PathLimit,
    moved: u16,
    done: bool,
}

impl PathTo {
    pub const PRIORITY: i32 = 30;

    pub fn new(dest: Xy, limit: PathLimit) -> Self {
        Self { dest, limit, ..Self::default() }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn finished(&self, grid: &TileGrid, here: Xy) -> bool {
        match self.limit {
            PathLimit::By(n) => self.moved >= n,
            PathLimit::Until(n) => here.distance(&self.dest) <= n as i32,
            PathLimit::Complete => here == self.dest
                || (here.is_adjacent(&self.dest) && !grid.check_traversable(self.dest)),
        }
    }
}

/// Plan up to 20 steps from `start` toward `dest` through open cells.
/// Returned reversed, next step last, `start` excluded.
pub fn plan(grid: &TileGrid, start: Xy, dest: Xy) -> ArrayVec<[Xy; 20]> {
    if !grid.in_bounds(dest) { return ArrayVec::new() }
    let (full_path, _) = astar(
            &start,
            |&l| l.neighbors().into_iter()
                .filter(|&it| it == dest || grid.check_traversable(it))
                .map(|it| (it, 1_i32)),
            |&l| l.distance(&dest),
            |&l| l == dest
        ).unwrap_or_default();

    let mut path = ArrayVec::new();
    for &it in full_path.iter().skip(1).take(20).rev() { path.push(it); }
    path
}

impl Behaviour for PathTo {
    fn name(&self) -> &'static str { "path_to" }
    fn priority(&self) -> i32 { Self::PRIORITY }

    fn run(&mut self, owner: ActorId, world: &mut World) -> Result<()> {
        if self.done { return Ok(()) }
        let here = world.grid.position(owner)?;
        if self.finished(&world.grid, here) {
            trace!("{owner} reached {} ({:?})", self.dest, self.limit);
            self.done = true;
            return Ok(())
        }

        if self.path.last() == Some(&here) { self.path.pop(); }
        if self.path.is_empty() || !self.path.last().is_some_and(|it| it.is_adjacent(&here)) {
            self.path = plan(&world.grid, here, self.dest);
        }
        let Some(&next) = self.path.last() else {
            return Err(Error::NoRoute { seeker: owner, goal: self.dest })
        };

        match movement::advance(world, owner, next, self.dest)? {
            StepOutcome::Moved(at) => {
                self.moved += 1;
                if at == next { self.path.pop(); } else { self.path.clear(); }
            }
            StepOutcome::Blocked => self.path.clear(),
            StepOutcome::Interacted(..) | StepOutcome::Stayed => {}
        }
        Ok(())
    }
}
