//! One tick: every actor that can act gets exactly one turn, in ascending
//! `turn_priority`, ties in the grid's row-major order. Actors found dead when
//! their turn comes are removed instead, and a final sweep removes anyone who
//! died during the tick.

use log::{debug, trace, warn};

use crate::{
    common::{
        components::ActorId,
        error::{Error, Result},
    },
    sim::{action, behaviour, world::World},
};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Actors that took a turn, in turn order
    pub acted: Vec<ActorId>,
    pub reaped: Vec<ActorId>,
    pub failures: Vec<Error>,
}

pub fn tick(world: &mut World) -> TickReport {
    let mut report = TickReport { tick: world.advance_clock(), ..TickReport::default() };

    let mut turns: Vec<(i32, ActorId)> = world.grid.iter()
        .filter(|(_, _, actor)| actor.can_act())
        .map(|(_, id, actor)| (actor.turn_priority, id))
        .collect();
    turns.sort_by_key(|&(priority, _)| priority);
    trace!("tick {}: {} turns", report.tick, turns.len());

    for (_, id) in turns {
        let Ok(actor) = world.grid.actor(id) else { continue };
        if !actor.alive {
            reap(world, id, &mut report);
            continue
        }

        match take_turn(world, id) {
            Ok(()) => report.acted.push(id),
            Err(err) => {
                let err = Error::ActionFailure { actor: id, reason: err.to_string() };
                warn!("tick {}: {err}", report.tick);
                report.acted.push(id);
                report.failures.push(err);
            }
        }
    }

    for id in world.grid.find_all(|actor| !actor.alive) {
        reap(world, id, &mut report);
    }
    report
}

fn take_turn(world: &mut World, id: ActorId) -> Result<()> {
    behaviour::run_all(world, id)?;
    if !world.grid.actor(id).is_ok_and(|it| it.alive) { return Ok(()) }
    action::act(world, id)
}

fn reap(world: &mut World, id: ActorId, report: &mut TickReport) {
    match world.despawn(id) {
        Ok(actor) => {
            debug!("reaped {id} ({})", actor.name);
            report.reaped.push(id);
        }
        Err(err) => warn!("reaping {id}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use xy::{Dir, Xy};

    use super::*;
    use crate::{
        common::{
            components::{actor::Actor, input::Key},
            config::Config,
        },
        sim::behaviour::Behaviour,
    };

    type Trace = Rc<RefCell<Vec<ActorId>>>;

    /// Records each turn it is given.
    struct Turn(Trace);

    impl Behaviour for Turn {
        fn name(&self) -> &'static str { "turn" }
        fn priority(&self) -> i32 { 0 }
        fn run(&mut self, owner: ActorId, _: &mut World) -> Result<()> {
            self.0.borrow_mut().push(owner);
            Ok(())
        }
    }

    /// Fails every turn.
    struct Broken;

    impl Behaviour for Broken {
        fn name(&self) -> &'static str { "broken" }
        fn priority(&self) -> i32 { 0 }
        fn run(&mut self, owner: ActorId, _: &mut World) -> Result<()> {
            Err(Error::ActionFailure { actor: owner, reason: "snapped".into() })
        }
    }

    /// Kills another actor on its turn.
    struct Smite(ActorId);

    impl Behaviour for Smite {
        fn name(&self) -> &'static str { "smite" }
        fn priority(&self) -> i32 { 0 }
        fn run(&mut self, _: ActorId, world: &mut World) -> Result<()> {
            world.grid.actor_mut(self.0)?.alive = false;
            Ok(())
        }
    }

    fn world(width: i32, height: i32) -> World {
        World::new(Config::with_size(width, height)).unwrap()
    }

    fn actor(name: &str, turn_priority: i32) -> Actor {
        Actor::villager(name).turn_priority(turn_priority)
    }

    // ===== ORDER =====

    #[test]
    fn test_turn_priority_then_row_major() {
        let mut world = world(4, 4);
        let trace = Trace::default();
        let late = world.spawn(actor("late", 20), Xy::new(0, 0)).unwrap();
        let b = world.spawn(actor("b", 10), Xy::new(3, 2)).unwrap();
        let a = world.spawn(actor("a", 10), Xy::new(1, 1)).unwrap();
        let first = world.spawn(actor("first", 0), Xy::new(3, 3)).unwrap();
        for id in [late, b, a, first] { world.attach(id, Turn(trace.clone())).unwrap(); }

        let report = world.tick();
        assert_eq!(*trace.borrow(), [first, a, b, late]);
        assert_eq!(report.acted, [first, a, b, late]);
        assert_eq!(report.tick, 1);
    }

    #[test]
    fn test_items_never_get_a_turn() {
        let mut world = world(3, 3);
        world.spawn(Actor::floor_item("gold", '$'), Xy::new(0, 0)).unwrap();
        world.spawn(Actor::wall(), Xy::new(1, 0)).unwrap();
        let ada = world.spawn(Actor::villager("ada"), Xy::new(2, 2)).unwrap();
        assert_eq!(world.tick().acted, [ada]);
    }

    // ===== REAPING =====

    #[test]
    fn test_dead_actor_is_reaped_without_acting() {
        let mut world = world(3, 3);
        let trace = Trace::default();
        let dead = world.spawn(actor("dead", 0), Xy::new(0, 0)).unwrap();
        world.attach(dead, Turn(trace.clone())).unwrap();
        world.grid.actor_mut(dead).unwrap().alive = false;

        let report = world.tick();
        assert!(trace.borrow().is_empty());
        assert_eq!(report.reaped, [dead]);
        assert!(!world.grid.contains(dead));
    }

    #[test]
    fn test_actor_killed_earlier_in_tick_loses_its_turn() {
        let mut world = world(3, 3);
        let trace = Trace::default();
        let victim = world.spawn(actor("victim", 10), Xy::new(0, 0)).unwrap();
        let killer = world.spawn(actor("killer", 0), Xy::new(2, 2)).unwrap();
        world.attach(victim, Turn(trace.clone())).unwrap();
        world.attach(killer, Smite(victim)).unwrap();

        let report = world.tick();
        assert!(trace.borrow().is_empty());
        assert_eq!(report.acted, [killer]);
        assert_eq!(report.reaped, [victim]);
    }

    #[test]
    fn test_final_sweep_reaps_picked_up_items() {
        let mut world = world(3, 1);
        let hero = world.spawn(Actor::player("hero"), Xy::new(0, 0)).unwrap();
        let gold = world.spawn(Actor::floor_item("gold", '$'), Xy::new(1, 0)).unwrap();
        world.add_input(hero, Key::Move(Dir::E)).unwrap();

        let report = world.tick();
        assert_eq!(report.reaped, [gold]);
        assert_eq!(world.grid.get(Xy::new(1, 0)).unwrap(), &[hero]);
        assert_eq!(world.grid.actor(hero).unwrap().inventory, ["gold"]);
    }

    // ===== FAILURES =====

    #[test]
    fn test_one_failure_does_not_stop_the_tick() {
        let mut world = world(3, 3);
        let trace = Trace::default();
        let broken = world.spawn(actor("broken", 0), Xy::new(0, 0)).unwrap();
        let fine = world.spawn(actor("fine", 10), Xy::new(1, 1)).unwrap();
        world.attach(broken, Broken).unwrap();
        world.attach(fine, Turn(trace.clone())).unwrap();

        let report = world.tick();
        assert_eq!(*trace.borrow(), [fine]);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(&report.failures[0], Error::ActionFailure { actor, .. } if *actor == broken));
        assert!(world.grid.contains(broken));
    }

    #[test]
    fn test_enclosed_seeker_stays_put_without_failing() {
        let mut world = world(5, 5);
        for it in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            world.spawn(Actor::wall(), it.into()).unwrap();
        }
        let goblin = world.spawn(Actor::monster("goblin", 'g'), Xy::new(2, 2)).unwrap();
        let hero = world.spawn(Actor::player("hero"), Xy::new(4, 4)).unwrap();
        world.grid.actor_mut(goblin).unwrap().target = Some(hero);

        let report = world.tick();
        assert!(report.failures.is_empty());
        assert_eq!(world.grid.position(goblin).unwrap(), Xy::new(2, 2));
    }

    #[test]
    fn test_tick_counter_and_log_ticks() {
        let mut world = world(2, 2);
        let reports = world.step_n(3);
        assert_eq!(reports.iter().map(|it| it.tick).collect::<Vec<_>>(), [1, 2, 3]);
        world.narrate("later");
        assert_eq!(world.log().last().unwrap().tick, 3);
    }
}
