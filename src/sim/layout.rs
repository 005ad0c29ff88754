//! Worlds from ASCII maps.
//!
//! ```text
//! #  wall          @  player (hero)
//! g  goblin        $  gold
//! C  chest         v  villager
//! .  empty floor   (space) empty
//! ```
//!
//! Rows may differ in length; short rows are padded with empty cells. Any
//! other character is rejected.

use log::debug;
use xy::Xy;

use crate::{
    common::{
        components::{actor::Actor, ActorId},
        config::Config,
        error::{Error, Result},
    },
    sim::{
        behaviour::{Chase, Wander},
        world::World,
    },
};

pub const LEGEND: &[(char, &str)] = &[
    ('#', "wall"),
    ('@', "hero"),
    ('g', "goblin"),
    ('$', "gold"),
    ('C', "chest"),
    ('v', "villager"),
];

pub const GOBLIN_SIGHT: u32 = 8;
pub const GOBLIN_FORGET: u32 = 12;
pub const VILLAGER_WANDER: f64 = 0.5;

/// Everything a layout put on the grid, in row-major order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Spawned {
    pub entries: Vec<(char, Xy, ActorId)>,
}

impl Spawned {
    pub fn first(&self, glyph: char) -> Option<ActorId> {
        self.entries.iter().find(|it| it.0 == glyph).map(|it| it.2)
    }

    pub fn all(&self, glyph: char) -> Vec<ActorId> {
        self.entries.iter().filter(|it| it.0 == glyph).map(|it| it.2).collect()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

fn actor_for(glyph: char) -> Option<Actor> {
    Some(match glyph {
        '#' => Actor::wall(),
        '@' => Actor::player("hero"),
        'g' => Actor::monster("goblin", 'g'),
        '$' => Actor::floor_item("gold", '$'),
        'C' => Actor::chest(),
        'v' => Actor::villager("villager"),
        _ => return None,
    })
}

/// Build a world the size of `text`, overriding `config`'s dimensions.
pub fn build(config: Config, text: &str) -> Result<(World, Spawned)> {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let rows: Vec<&str> = text.lines().collect();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
    let height = rows.len() as i32;

    let mut world = World::new(Config { width, height, ..config })?;
    let mut spawned = Spawned::default();
    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let xy = Xy::new(x as i32, y as i32);
            if glyph == '.' || glyph == ' ' { continue }
            let actor = actor_for(glyph).ok_or(Error::UnknownGlyph { glyph, at: xy })?;
            let id = world.spawn(actor, xy)?;
            match glyph {
                'g' => world.attach(id, Chase::new(GOBLIN_SIGHT, GOBLIN_FORGET))?,
                'v' => world.attach(id, Wander::new(VILLAGER_WANDER))?,
                _ => {}
            }
            spawned.entries.push((glyph, xy, id));
        }
    }
    debug!("layout {width}x{height}: {} actors", spawned.len());
    Ok((world, spawned))
}
