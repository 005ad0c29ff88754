use serde::{Deserialize, Serialize};

use crate::{
    common::components::{capabilities::*, input::InputQueue, ActorId},
    sim::behaviour::AutoRun,
};

// ===== Stack priorities (ascending from the bottom of a cell) =====

pub const STACK_FLOOR: i32 = 0;
pub const STACK_ITEM: i32 = 10;
pub const STACK_FIXTURE: i32 = 20;
pub const STACK_CREATURE: i32 = 30;
pub const STACK_WALL: i32 = 40;

// ===== Turn priorities (lower acts first) =====

pub const TURN_PLAYER: i32 = 0;
pub const TURN_MONSTER: i32 = 10;
pub const TURN_BYSTANDER: i32 = 20;

/// The built-in action an actor takes each tick, after its behaviours.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    #[default] Idle,
    /// Consume one queued key
    Controlled,
    /// Route toward `Actor::target` and bump it once adjacent
    Seek,
}

/// A game object. Where it stands is known only to the grid that owns it.
#[derive(Debug)]
pub struct Actor {
    pub name: String,
    pub glyph: char,
    pub traversable: bool,
    pub stack_priority: i32,
    pub turn_priority: i32,
    pub alive: bool,
    pub caps: Capabilities,
    pub health: i16,
    pub strength: i16,
    pub action: Action,
    pub target: Option<ActorId>,
    pub inventory: Vec<String>,
    pub input: InputQueue,
    pub(crate) behaviours: Vec<AutoRun>,
}

impl Actor {
    pub fn new(name: impl Into<String>, glyph: char) -> Self {
        Self {
            name: name.into(),
            glyph,
            traversable: true,
            stack_priority: STACK_FLOOR,
            turn_priority: TURN_BYSTANDER,
            alive: true,
            caps: Capabilities::NONE,
            health: 1,
            strength: 0,
            action: Action::Idle,
            target: None,
            inventory: Vec::new(),
            input: InputQueue::default(),
            behaviours: Vec::new(),
        }
    }

    pub fn traversable(mut self, traversable: bool) -> Self {
        self.traversable = traversable;
        self
    }

    pub fn stack_priority(mut self, priority: i32) -> Self {
        self.stack_priority = priority;
        self
    }

    pub fn turn_priority(mut self, priority: i32) -> Self {
        self.turn_priority = priority;
        self
    }

    pub fn capabilities(mut self, bits: u16) -> Self {
        self.caps = Capabilities::new(bits);
        self
    }

    pub fn health(mut self, health: i16) -> Self {
        self.health = health;
        self
    }

    pub fn strength(mut self, strength: i16) -> Self {
        self.strength = strength;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    // ===== Presets =====

    pub fn wall() -> Self {
        Actor::new("wall", '#').traversable(false).stack_priority(STACK_WALL)
    }

    pub fn floor_item(name: impl Into<String>, glyph: char) -> Self {
        Actor::new(name, glyph).stack_priority(STACK_ITEM).capabilities(CAP_PICKUP)
    }

    pub fn chest() -> Self {
        Actor::new("chest", 'C')
            .traversable(false)
            .stack_priority(STACK_FIXTURE)
            .capabilities(CAP_OPENABLE)
    }

    pub fn player(name: impl Into<String>) -> Self {
        Actor::new(name, '@')
            .traversable(false)
            .stack_priority(STACK_CREATURE)
            .turn_priority(TURN_PLAYER)
            .capabilities(CAP_ACTS | CAP_PLAYER | CAP_MORTAL)
            .health(10)
            .strength(2)
            .action(Action::Controlled)
    }

    pub fn monster(name: impl Into<String>, glyph: char) -> Self {
        Actor::new(name, glyph)
            .traversable(false)
            .stack_priority(STACK_CREATURE)
            .turn_priority(TURN_MONSTER)
            .capabilities(CAP_ACTS | CAP_HOSTILE | CAP_MORTAL)
            .health(3)
            .strength(1)
            .action(Action::Seek)
    }

    pub fn villager(name: impl Into<String>) -> Self {
        Actor::new(name, 'v')
            .traversable(false)
            .stack_priority(STACK_CREATURE)
            .turn_priority(TURN_BYSTANDER)
            .capabilities(CAP_ACTS | CAP_TALKS | CAP_MORTAL)
            .health(5)
    }

    // ===== Capability queries =====

    pub fn can_act(&self) -> bool {
        self.caps.has(CAP_ACTS)
    }

    pub fn is_player(&self) -> bool {
        self.caps.has(CAP_PLAYER)
    }

    /// Players and hostiles fight each other; nobody else starts a fight.
    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        (self.caps.has(CAP_HOSTILE) && other.caps.has(CAP_PLAYER))
            || (self.caps.has(CAP_PLAYER) && other.caps.has(CAP_HOSTILE))
    }

    /// Names of the attached behaviours in execution order.
    pub fn behaviour_names(&self) -> Vec<&'static str> {
        self.behaviours.iter().map(|it| it.name()).collect()
    }
}
