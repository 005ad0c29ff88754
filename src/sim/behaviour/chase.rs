use log::debug;

use crate::{
    common::{components::ActorId, error::Result},
    sim::{behaviour::Behaviour, world::World},
};

/// Chase behaviour - sticky hostile target acquisition
///
/// - Keeps the current target while it is alive, still a player and within `forget`
/// - Otherwise locks onto the nearest living player within `range`
/// - Otherwise clears the target so the actor's other behaviours take over
///
/// Movement toward the target is the actor's `Seek` action.
#[derive(Clone, Copy, Debug)]
pub struct Chase {
    pub range: u32,
    pub forget: u32,
}

impl Chase {
    pub const PRIORITY: i32 = 10;

    pub fn new(range: u32, forget: u32) -> Self {
        Self { range, forget: forget.max(range) }
    }
}

impl Behaviour for Chase {
    fn name(&self) -> &'static str { "chase" }
    fn priority(&self) -> i32 { Self::PRIORITY }

    fn run(&mut self, owner: ActorId, world: &mut World) -> Result<()> {
        let here = world.grid.position(owner)?;
        let current = world.grid.actor(owner)?.target;

        if let Some(target) = current {
            let keep = world.grid.actor(target).is_ok_and(|it| it.alive && it.is_player())
                && world.grid.position(target).is_ok_and(|at| at.distance(&here) as u32 <= self.forget);
            if keep { return Ok(()) }
        }

        let acquired = world.grid.iter()
            .filter(|&(at, id, it)| id != owner && it.alive && it.is_player() && at.distance(&here) as u32 <= self.range)
            .min_by_key(|&(at, _, _)| at.distance(&here))
            .map(|(_, id, _)| id);

        if acquired != current {
            match acquired {
                Some(target) => debug!("{owner} locks onto {target}"),
                None => debug!("{owner} loses interest"),
            }
        }
        world.grid.actor_mut(owner)?.target = acquired;
        Ok(())
    }
}
