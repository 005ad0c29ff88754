use rand::{seq::IndexedRandom, Rng};
use xy::Xy;

use crate::{
    common::{components::ActorId, error::Result},
    sim::{behaviour::Behaviour, movement, world::World},
};

/// Idle milling about: with probability `chance` per tick, step to a random
/// open neighbour. Does nothing while the actor has a target.
#[derive(Clone, Copy, Debug)]
pub struct Wander {
    chance: f64,
}

impl Wander {
    pub const PRIORITY: i32 = 20;

    /// `chance` is clamped to `[0, 1]`; NaN never wanders.
    pub fn new(chance: f64) -> Self {
        Self { chance: if chance.is_nan() { 0. } else { chance.clamp(0., 1.) } }
    }

    pub fn chance(&self) -> f64 { self.chance }
}

impl Behaviour for Wander {
    fn name(&self) -> &'static str { "wander" }
    fn priority(&self) -> i32 { Self::PRIORITY }

    fn run(&mut self, owner: ActorId, world: &mut World) -> Result<()> {
        if world.grid.actor(owner)?.target.is_some() { return Ok(()) }
        if !world.rng().random_bool(self.chance) { return Ok(()) }

        let here = world.grid.position(owner)?;
        let open: Vec<Xy> = here.neighbors().into_iter()
            .filter(|&it| world.grid.check_traversable(it))
            .collect();
        let Some(&dest) = open.choose(world.rng()) else { return Ok(()) };
        movement::step(world, owner, dest)?;
        Ok(())
    }
}
