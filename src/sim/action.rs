use log::{debug, trace};

use crate::{
    common::{
        components::{actor::Action, input::Key, ActorId},
        error::Result,
    },
    sim::{
        movement::{self, StepOutcome},
        router::{self, Route},
        world::World,
    },
};

/// Run `id`'s built-in action for this tick.
pub fn act(world: &mut World, id: ActorId) -> Result<()> {
    match world.grid.actor(id)?.action {
        Action::Idle => Ok(()),
        Action::Controlled => controlled(world, id),
        Action::Seek => seek(world, id),
    }
}

fn controlled(world: &mut World, id: ActorId) -> Result<()> {
    let Some(key) = world.grid.actor_mut(id)?.input.get_input() else { return Ok(()) };
    trace!("{id} key {key:?}");
    match key {
        Key::Move(dir) => { movement::step_dir(world, id, dir)?; }
        Key::Wait => {}
    }
    Ok(())
}

fn seek(world: &mut World, id: ActorId) -> Result<()> {
    let Some(target) = world.grid.actor(id)?.target else { return Ok(()) };
    if !world.grid.actor(target).is_ok_and(|it| it.alive) {
        debug!("{id} lost {target}");
        world.grid.actor_mut(id)?.target = None;
        return Ok(())
    }
    let goal = world.grid.position(target)?;

    let config = world.config().router;
    let outcome = match router::route(&world.grid, id, goal, &config) {
        Ok(Route::Arrived) => movement::step(world, id, goal)?,
        Ok(Route::Step(next)) => movement::advance(world, id, next, goal)?,
        Err(err) if err.is_recoverable() => {
            debug!("{err}");
            let name = world.grid.actor(id)?.name.clone();
            world.narrate(format!("{name} hesitates."));
            return Ok(())
        }
        Err(err) => return Err(err),
    };
    trace!("{id} seeking {target}: {outcome:?}");
    if outcome == StepOutcome::Blocked { debug!("{id} stays put, {goal} is out of reach this turn"); }
    Ok(())
}

#[cfg(test)]
mod tests {
    use xy::{Dir, Xy};

    use super::*;
    use crate::common::{components::actor::Actor, config::Config};

    fn world(width: i32, height: i32) -> World {
        World::new(Config::with_size(width, height)).unwrap()
    }

    #[test]
    fn test_idle_does_nothing() {
        let mut world = world(3, 3);
        let id = world.spawn(Actor::villager("ada"), Xy::new(1, 1)).unwrap();
        act(&mut world, id).unwrap();
        assert_eq!(world.grid.position(id).unwrap(), Xy::new(1, 1));
    }

    #[test]
    fn test_controlled_consumes_one_key_per_call() {
        let mut world = world(5, 5);
        let hero = world.spawn(Actor::player("hero"), Xy::new(2, 2)).unwrap();
        world.add_input(hero, Key::Move(Dir::E)).unwrap();
        world.add_input(hero, Key::Wait).unwrap();
        world.add_input(hero, Key::Move(Dir::S)).unwrap();

        act(&mut world, hero).unwrap();
        assert_eq!(world.grid.position(hero).unwrap(), Xy::new(3, 2));
        act(&mut world, hero).unwrap();
        assert_eq!(world.grid.position(hero).unwrap(), Xy::new(3, 2));
        act(&mut world, hero).unwrap();
        assert_eq!(world.grid.position(hero).unwrap(), Xy::new(3, 3));
        act(&mut world, hero).unwrap();
        assert_eq!(world.grid.position(hero).unwrap(), Xy::new(3, 3));
    }

    #[test]
    fn test_seek_closes_in_then_attacks() {
        let mut world = world(6, 1);
        let hero = world.spawn(Actor::player("hero"), Xy::new(5, 0)).unwrap();
        let goblin = world.spawn(Actor::monster("goblin", 'g'), Xy::new(2, 0)).unwrap();
        world.grid.actor_mut(goblin).unwrap().target = Some(hero);

        act(&mut world, goblin).unwrap();
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(3, 0));
        act(&mut world, goblin).unwrap();
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(4, 0));
        act(&mut world, goblin).unwrap();
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(4, 0));
        assert_eq!(world.grid.actor(hero).unwrap().health, 9);
        assert_eq!(world.log().last().unwrap().text, "goblin hits hero.");
    }

    #[test]
    fn test_seek_without_route_hesitates() {
        let mut world = world(5, 5);
        for it in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            world.spawn(Actor::wall(), it.into()).unwrap();
        }
        let goblin = world.spawn(Actor::monster("goblin", 'g'), Xy::new(2, 2)).unwrap();
        let hero = world.spawn(Actor::player("hero"), Xy::new(4, 4)).unwrap();
        world.grid.actor_mut(goblin).unwrap().target = Some(hero);

        act(&mut world, goblin).unwrap();
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(2, 2));
        assert_eq!(world.log().last().unwrap().text, "goblin hesitates.");
    }

    #[test]
    fn test_seek_drops_vanished_target() {
        let mut world = world(5, 5);
        let hero = world.spawn(Actor::player("hero"), Xy::new(4, 4)).unwrap();
        let goblin = world.spawn(Actor::monster("goblin", 'g'), Xy::new(0, 0)).unwrap();
        world.grid.actor_mut(goblin).unwrap().target = Some(hero);
        world.despawn(hero).unwrap();

        act(&mut world, goblin).unwrap();
        assert_eq!(world.grid.actor(goblin).unwrap().target, None);
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(0, 0));
    }
}
