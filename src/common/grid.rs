//! # TileGrid: fixed-size cell storage that owns every actor
//!
//! Each cell holds a stack of `ActorId`s kept in ascending `stack_priority`
//! order: index 0 is the bottom of the cell, the last entry is the top (the
//! glyph that gets drawn, and the first thing a visitor bumps into). Actors of
//! equal priority keep the order they arrived in.
//!
//! The grid is also the actors' arena. An actor's position lives only here,
//! in the slot next to the actor, so there is no second copy to drift.

use std::{collections::HashMap, fmt};

use log::trace;
use xy::Xy;

use crate::common::{
    components::{actor::Actor, ActorId},
    error::{Error, Result},
};

#[derive(Debug)]
struct Slot {
    at: Xy,
    actor: Actor,
}

#[derive(Debug)]
pub struct TileGrid {
    width: i32,
    height: i32,
    cells: Vec<Vec<ActorId>>,
    actors: HashMap<ActorId, Slot>,
    next_id: u64,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 { return Err(Error::InvalidDimensions { width, height }) }
        let cells = (0..width as usize * height as usize).map(|_| Vec::new()).collect();
        Ok(Self { width, height, cells, actors: HashMap::new(), next_id: 0 })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    /// Number of actors on the grid.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn in_bounds(&self, xy: Xy) -> bool {
        (0..self.width).contains(&xy.x) && (0..self.height).contains(&xy.y)
    }

    fn index(&self, xy: Xy) -> Result<usize> {
        if !self.in_bounds(xy) { return Err(Error::out_of_bounds(xy)) }
        Ok((xy.y * self.width + xy.x) as usize)
    }

    fn xy(&self, index: usize) -> Xy {
        let index = index as i32;
        Xy { x: index % self.width, y: index / self.width }
    }

    // ===== Reads =====

    /// The cell's stack, bottom first.
    pub fn get(&self, xy: Xy) -> Result<&[ActorId]> {
        let idx = self.index(xy)?;
        Ok(&self.cells[idx])
    }

    pub fn top(&self, xy: Xy) -> Result<Option<ActorId>> {
        Ok(self.get(xy)?.last().copied())
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn position(&self, id: ActorId) -> Result<Xy> {
        self.actors.get(&id).map(|slot| slot.at).ok_or(Error::NotFound(id))
    }

    pub fn actor(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(&id).map(|slot| &slot.actor).ok_or(Error::NotFound(id))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors.get_mut(&id).map(|slot| &mut slot.actor).ok_or(Error::NotFound(id))
    }

    /// False when `xy` is off the grid or anything standing there refuses company.
    pub fn check_traversable(&self, xy: Xy) -> bool {
        let Ok(stack) = self.get(xy) else { return false };
        stack.iter().all(|id| self.actors.get(id).map_or(true, |slot| slot.actor.traversable))
    }

    /// Cells within Chebyshev `radius` of `xy`, clipped to the grid, row-major.
    pub fn neighbors(&self, xy: Xy, radius: u32, include_origin: bool) -> Result<Vec<Xy>> {
        self.index(xy)?;
        let r = radius.min(self.width.max(self.height) as u32) as i32;
        let mut cells = Vec::new();
        for y in (xy.y - r).max(0)..=(xy.y + r).min(self.height - 1) {
            for x in (xy.x - r).max(0)..=(xy.x + r).min(self.width - 1) {
                let it = Xy { x, y };
                if it == xy && !include_origin { continue }
                cells.push(it);
            }
        }
        Ok(cells)
    }

    /// First actor, in `iter` order, that satisfies `pred`.
    pub fn find(&self, pred: impl Fn(&Actor) -> bool) -> Option<ActorId> {
        self.iter().find(|&(_, _, actor)| pred(actor)).map(|(_, id, _)| id)
    }

    pub fn find_all(&self, pred: impl Fn(&Actor) -> bool) -> Vec<ActorId> {
        self.iter().filter(|&(_, _, actor)| pred(actor)).map(|(_, id, _)| id).collect()
    }

    /// Every actor once: cells row-major, each stack bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (Xy, ActorId, &Actor)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(idx, stack)| {
            let xy = self.xy(idx);
            stack.iter().filter_map(move |&id| self.actors.get(&id).map(|slot| (xy, id, &slot.actor)))
        })
    }

    // ===== Writes =====

    /// Place `actor` on the grid and hand back its handle.
    pub fn add(&mut self, actor: Actor, xy: Xy) -> Result<ActorId> {
        let idx = self.index(xy)?;
        let id = ActorId(self.next_id);
        self.next_id += 1;
        let priority = actor.stack_priority;
        trace!("add {id} ({}) at {xy}", actor.name);
        self.actors.insert(id, Slot { at: xy, actor });
        insert_sorted(&mut self.cells[idx], &self.actors, id, priority);
        Ok(id)
    }

    /// Take `id` off the grid, returning the actor.
    pub fn remove(&mut self, id: ActorId) -> Result<Actor> {
        let slot = self.actors.remove(&id).ok_or(Error::NotFound(id))?;
        let idx = self.index(slot.at)?;
        self.cells[idx].retain(|&it| it != id);
        trace!("remove {id} ({}) from {}", slot.actor.name, slot.at);
        Ok(slot.actor)
    }

    /// Relocate `id`. Validates everything before touching either cell, so a
    /// failed move leaves the grid exactly as it was.
    pub fn move_to(&mut self, id: ActorId, xy: Xy) -> Result<()> {
        let to = self.index(xy)?;
        let (from, priority) = match self.actors.get(&id) {
            Some(slot) => (self.index(slot.at)?, slot.actor.stack_priority),
            None => return Err(Error::NotFound(id)),
        };
        if from == to { return Ok(()) }

        self.cells[from].retain(|&it| it != id);
        insert_sorted(&mut self.cells[to], &self.actors, id, priority);
        if let Some(slot) = self.actors.get_mut(&id) { slot.at = xy; }
        Ok(())
    }

    /// Change an actor's stack priority and re-sort its cell.
    pub fn set_stack_priority(&mut self, id: ActorId, priority: i32) -> Result<()> {
        let slot = self.actors.get_mut(&id).ok_or(Error::NotFound(id))?;
        slot.actor.stack_priority = priority;
        let at = slot.at;
        let idx = self.index(at)?;
        let actors = &self.actors;
        self.cells[idx].sort_by_key(|it| stack_priority(actors, it));
        Ok(())
    }

    /// Owned snapshot of the top glyph of every cell, safe to hand to another thread.
    pub fn frame(&self) -> Frame {
        let glyphs = self.cells.iter()
            .map(|stack| stack.last()
                .and_then(|id| self.actors.get(id))
                .map_or(' ', |slot| slot.actor.glyph))
            .collect();
        Frame { width: self.width, height: self.height, glyphs }
    }
}

fn stack_priority(actors: &HashMap<ActorId, Slot>, id: &ActorId) -> i32 {
    actors.get(id).map_or(i32::MIN, |slot| slot.actor.stack_priority)
}

/// Insert after every entry of lower or equal priority.
fn insert_sorted(stack: &mut Vec<ActorId>, actors: &HashMap<ActorId, Slot>, id: ActorId, priority: i32) {
    let at = stack.partition_point(|it| stack_priority(actors, it) <= priority);
    stack.insert(at, id);
}

/// What a renderer needs from one tick: a glyph per cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    width: i32,
    height: i32,
    glyphs: Vec<char>,
}

impl Frame {
    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    pub fn glyph(&self, xy: Xy) -> Option<char> {
        if !(0..self.width).contains(&xy.x) || !(0..self.height).contains(&xy.y) { return None }
        self.glyphs.get((xy.y * self.width + xy.x) as usize).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.glyphs.chunks(self.width as usize).map(|row| row.iter().collect())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 { writeln!(f)?; }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}
