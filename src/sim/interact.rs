use serde::{Deserialize, Serialize};

use crate::{
    common::{
        components::{actor::Actor, capabilities::*, ActorId},
        error::Result,
    },
    sim::world::World,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Interaction {
    Attack,
    PickUp,
    Open,
    Greet,
}

/// What `actor` does when it bumps into `other`, decided from capabilities alone.
pub fn interaction(actor: &Actor, other: &Actor) -> Option<Interaction> {
    if actor.is_hostile_to(other) && other.caps.has(CAP_MORTAL) { return Some(Interaction::Attack) }
    if !actor.is_player() { return None }
    if other.caps.has(CAP_PICKUP) { return Some(Interaction::PickUp) }
    if other.caps.has(CAP_OPENABLE) { return Some(Interaction::Open) }
    if other.caps.has(CAP_TALKS) { return Some(Interaction::Greet) }
    None
}

/// Carry out `kind` between two actors and narrate it.
pub fn interact(world: &mut World, actor: ActorId, other: ActorId, kind: Interaction) -> Result<()> {
    let (name, strength) = {
        let it = world.grid.actor(actor)?;
        (it.name.clone(), it.strength)
    };
    let target = world.grid.actor_mut(other)?;
    let other_name = target.name.clone();

    let line = match kind {
        Interaction::Attack => {
            target.health = target.health.saturating_sub(strength);
            if target.health <= 0 {
                target.alive = false;
                format!("{name} slays {other_name}.")
            } else {
                format!("{name} hits {other_name}.")
            }
        }
        Interaction::PickUp => {
            target.alive = false;
            world.grid.actor_mut(actor)?.inventory.push(other_name.clone());
            format!("{name} picks up {other_name}.")
        }
        Interaction::Open => {
            target.caps.set([CAP_OPENABLE], false);
            target.glyph = '=';
            format!("{name} opens {other_name}.")
        }
        Interaction::Greet => format!("{other_name} greets {name}."),
    };
    world.narrate(line);
    Ok(())
}
