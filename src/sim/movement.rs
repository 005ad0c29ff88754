//! Stepping actors between cells.
//!
//! Both built-in actions and behaviours move through here, and every
//! decision about whether a cell can be entered goes through
//! `TileGrid::check_traversable`, the same predicate the router labels with.

use log::trace;
use xy::{Dir, Xy};

use crate::{
    common::{components::ActorId, error::Result},
    sim::{
        interact::{self, interaction, Interaction},
        router,
        world::World,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Moved(Xy),
    Interacted(ActorId, Interaction),
    Blocked,
    /// `dest` was where the actor already stood
    Stayed,
}

/// Try to enter `dest`, normally an adjacent cell.
///
/// The top-most living occupant that invites an interaction is bumped instead
/// of entered; after a pick-up the actor also moves in if it can. With nobody
/// to bump, the actor moves only if the cell is traversable.
pub fn step(world: &mut World, id: ActorId, dest: Xy) -> Result<StepOutcome> {
    let from = world.grid.position(id)?;
    if dest == from { return Ok(StepOutcome::Stayed) }
    if !world.grid.in_bounds(dest) { return Ok(StepOutcome::Blocked) }

    let bump = {
        let actor = world.grid.actor(id)?;
        world.grid.get(dest)?.iter().rev().find_map(|&other| {
            let it = world.grid.actor(other).ok().filter(|it| it.alive)?;
            interaction(actor, it).map(|kind| (other, kind))
        })
    };

    if let Some((other, kind)) = bump {
        trace!("{id} bumps {other} at {dest}: {kind:?}");
        interact::interact(world, id, other, kind)?;
        if kind == Interaction::PickUp && world.grid.check_traversable(dest) {
            world.grid.move_to(id, dest)?;
        }
        return Ok(StepOutcome::Interacted(other, kind))
    }

    if !world.grid.check_traversable(dest) { return Ok(StepOutcome::Blocked) }
    world.grid.move_to(id, dest)?;
    Ok(StepOutcome::Moved(dest))
}

pub fn step_dir(world: &mut World, id: ActorId, dir: Dir) -> Result<StepOutcome> {
    let from = world.grid.position(id)?;
    step(world, id, from + dir.offset())
}

/// `step` toward `next` on the way to `goal`; if `next` turned out to be
/// blocked, try the router's sidestep once.
pub fn advance(world: &mut World, id: ActorId, next: Xy, goal: Xy) -> Result<StepOutcome> {
    let outcome = step(world, id, next)?;
    if outcome != StepOutcome::Blocked { return Ok(outcome) }

    let from = world.grid.position(id)?;
    let Some(alt) = router::sidestep(&world.grid, from, next, goal) else { return Ok(outcome) };
    trace!("{id} sidesteps {next} via {alt}");
    step(world, id, alt)
}
