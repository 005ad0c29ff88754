//! Pluggable per-actor behaviours.
//!
//! Behaviours attached to an actor run once per tick, lowest priority first,
//! before the actor's built-in action. They are stored on the actor itself
//! and refer back to it and to the world by handle only.

pub mod chase;
pub mod pathto;
pub mod wander;

use std::fmt;

use log::debug;

use crate::{
    common::{components::ActorId, error::Result},
    sim::world::World,
};

pub use chase::Chase;
pub use pathto::{PathLimit, PathTo};
pub use wander::Wander;

pub trait Behaviour {
    fn name(&self) -> &'static str;

    /// Lower runs first among behaviours on the same actor.
    fn priority(&self) -> i32;

    /// One tick's worth of work for `owner`. Returning `NoRoute` means
    /// "nothing to do this tick"; any other error fails the owner's turn.
    fn run(&mut self, owner: ActorId, world: &mut World) -> Result<()>;
}

/// A behaviour bound to the actor it runs for.
pub struct AutoRun {
    owner: ActorId,
    behaviour: Box<dyn Behaviour>,
}

impl AutoRun {
    pub fn owner(&self) -> ActorId { self.owner }
    pub fn name(&self) -> &'static str { self.behaviour.name() }
    pub fn priority(&self) -> i32 { self.behaviour.priority() }
}

impl fmt::Debug for AutoRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoRun")
            .field("owner", &self.owner)
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}

pub fn attach(world: &mut World, owner: ActorId, behaviour: impl Behaviour + 'static) -> Result<()> {
    let actor = world.grid.actor_mut(owner)?;
    actor.behaviours.push(AutoRun { owner, behaviour: Box::new(behaviour) });
    actor.behaviours.sort_by_key(AutoRun::priority);
    Ok(())
}

/// Run every behaviour on `owner` in priority order. Stops early if the owner
/// dies or leaves the grid partway through.
pub fn run_all(world: &mut World, owner: ActorId) -> Result<()> {
    let mut list = std::mem::take(&mut world.grid.actor_mut(owner)?.behaviours);

    let mut result = Ok(());
    for it in list.iter_mut() {
        if !world.grid.actor(owner).is_ok_and(|a| a.alive) { break }
        match it.behaviour.run(owner, world) {
            Ok(()) => {}
            Err(err) if err.is_recoverable() => debug!("{owner} {}: {err}", it.name()),
            Err(err) => { result = Err(err); break }
        }
    }

    // put the list back, keeping anything attached while it was out
    if let Ok(actor) = world.grid.actor_mut(owner) {
        list.append(&mut actor.behaviours);
        list.sort_by_key(AutoRun::priority);
        actor.behaviours = list;
    }
    result
}
