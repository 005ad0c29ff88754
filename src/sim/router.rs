//! # Router: wavefront approach toward a goal cell
//!
//! Open mode seeds label 0 on the goal and hands out labels in discovery
//! order, walking a cursor through the cells already labeled. Each cell's
//! neighbours are examined in the scan order of the seeker's octant relative
//! to the goal, so of several equally distant cells the ones on the seeker's
//! side get the smaller labels. Labelling stops as soon as the seeker's own
//! cell is reached. The seeker then steps into its smallest-labelled
//! traversable neighbour.
//!
//! Blocked mode floods from the seeker instead, bounded by depth, and ranks
//! each possible first step by the closest approach to the goal it leads to.

use log::{debug, trace};
use tinyvec::ArrayVec;
use xy::{Dir, Xy};

use crate::common::{
    components::ActorId,
    config::RouterConfig,
    error::{Error, Result},
    grid::TileGrid,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    /// Move into this adjacent cell
    Step(Xy),
    /// Standing on the goal, or close enough to bump it
    Arrived,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Open,
    Blocked,
}

/// Labels handed out by one search. Label `n` belongs to `cells()[n]`.
#[derive(Clone, Debug)]
pub struct Wavefront {
    width: i32,
    height: i32,
    labels: Vec<Option<u32>>,
    order: Vec<Xy>,
    parent: Vec<u32>,
    depth: Vec<u32>,
    mode: Mode,
    reached: bool,
}

impl Wavefront {
    fn seed(grid: &TileGrid, origin: Xy, mode: Mode) -> Self {
        let mut wave = Self {
            width: grid.width(),
            height: grid.height(),
            labels: vec![None; (grid.width() * grid.height()) as usize],
            order: Vec::new(),
            parent: Vec::new(),
            depth: Vec::new(),
            mode,
            reached: false,
        };
        wave.assign(origin, 0);
        wave
    }

    fn index(&self, xy: Xy) -> Option<usize> {
        if !(0..self.width).contains(&xy.x) || !(0..self.height).contains(&xy.y) { return None }
        Some((xy.y * self.width + xy.x) as usize)
    }

    fn assign(&mut self, xy: Xy, parent: u32) {
        let label = self.order.len() as u32;
        let Some(idx) = self.index(xy) else { return };
        self.labels[idx] = Some(label);
        let depth = if label == 0 { 0 } else { self.depth[parent as usize] + 1 };
        self.order.push(xy);
        self.parent.push(parent);
        self.depth.push(depth);
    }

    pub fn label(&self, xy: Xy) -> Option<u32> {
        self.index(xy).and_then(|idx| self.labels[idx])
    }

    /// Steps from the seed to `xy` along the labelling tree.
    pub fn depth(&self, xy: Xy) -> Option<u32> {
        self.label(xy).map(|l| self.depth[l as usize])
    }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Labelled cells in label order.
    pub fn cells(&self) -> &[Xy] { &self.order }

    pub fn mode(&self) -> Mode { self.mode }

    /// Open mode: the seeker's cell got a label. Blocked mode: some labelled
    /// cell touches the goal.
    pub fn reached(&self) -> bool { self.reached }
}

fn scan_dirs(from: Xy, toward: Xy) -> [Dir; 8] {
    (toward - from).octant().unwrap_or(Dir::N).scan_order()
}

/// Open-mode labelling seeded at `goal`, stopping when `seeker_at` is
/// labelled, the frontier runs dry, or `limit` cells carry labels.
pub fn label_open(grid: &TileGrid, seeker_at: Xy, goal: Xy, limit: usize) -> Wavefront {
    let mut wave = Wavefront::seed(grid, goal, Mode::Open);
    let dirs = scan_dirs(goal, seeker_at);

    let mut cursor = 0;
    while cursor < wave.order.len() {
        let cell = wave.order[cursor];
        for dir in dirs {
            let it = cell + dir.offset();
            if !grid.in_bounds(it) || wave.label(it).is_some() { continue }
            if it == seeker_at {
                wave.assign(it, cursor as u32);
                wave.reached = true;
                return wave
            }
            if !grid.check_traversable(it) { continue }
            if wave.order.len() >= limit { return wave }
            wave.assign(it, cursor as u32);
        }
        cursor += 1;
    }
    wave
}

/// Blocked-mode flood from the seeker through traversable cells, at most
/// `limit` steps deep.
pub fn label_blocked(grid: &TileGrid, from: Xy, goal: Xy, limit: u32) -> Wavefront {
    let mut wave = Wavefront::seed(grid, from, Mode::Blocked);
    let dirs = scan_dirs(from, goal);
    wave.reached = from.distance(&goal) <= 1;

    let mut cursor = 0;
    while cursor < wave.order.len() {
        let cell = wave.order[cursor];
        if wave.depth[cursor] < limit {
            for dir in dirs {
                let it = cell + dir.offset();
                if wave.label(it).is_some() || !grid.check_traversable(it) { continue }
                wave.assign(it, cursor as u32);
                if it.distance(&goal) <= 1 { wave.reached = true; }
            }
        }
        cursor += 1;
    }
    wave
}

/// First steps out of a blocked-mode flood, best first. A first step ranks by
/// the closest Chebyshev distance to `goal` reachable through it, then by
/// label; steps that cannot beat the seeker's current distance are dropped.
pub fn blocked_candidates(grid: &TileGrid, from: Xy, goal: Xy, limit: u32) -> ArrayVec<[Xy; 8]> {
    let wave = label_blocked(grid, from, goal, limit);
    let current = from.distance(&goal);

    // label of the first step each labelled cell was reached through
    let mut first = vec![0_u32; wave.len()];
    let mut best: ArrayVec<[(i32, u32, Xy); 8]> = ArrayVec::new();
    for label in 1..wave.len() {
        let parent = wave.parent[label];
        first[label] = if parent == 0 { label as u32 } else { first[parent as usize] };

        let step = wave.order[first[label] as usize];
        let rank = (wave.order[label].distance(&goal), first[label]);
        match best.iter_mut().find(|it| it.2 == step) {
            Some(it) => if rank < (it.0, it.1) { (it.0, it.1) = rank },
            None => best.push((rank.0, rank.1, step)),
        }
    }

    best.retain(|it| it.0 < current);
    best.sort_by_key(|it| (it.0, it.1));
    best.iter().map(|it| it.2).collect()
}

/// Next move for `seeker` toward `goal`.
///
/// Open mode first, unless every neighbour of the seeker is unusable; blocked
/// mode when open mode fails to reach the seeker. `Error::NoRoute` when
/// neither produces a step.
pub fn route(grid: &TileGrid, seeker: ActorId, goal: Xy, config: &RouterConfig) -> Result<Route> {
    if !grid.in_bounds(goal) { return Err(Error::out_of_bounds(goal)) }
    let from = grid.position(seeker)?;
    if from == goal { return Ok(Route::Arrived) }
    if from.is_adjacent(&goal) && !grid.check_traversable(goal) { return Ok(Route::Arrived) }

    let boxed_in = !from.neighbors().into_iter().any(|it| grid.check_traversable(it));
    if !boxed_in {
        let wave = label_open(grid, from, goal, config.open_limit);
        if wave.reached() {
            let next = from.neighbors().into_iter()
                .filter(|&it| grid.check_traversable(it))
                .filter_map(|it| wave.label(it).map(|label| (label, it)))
                .min_by_key(|&(label, _)| label);
            if let Some((label, next)) = next {
                trace!("{seeker} open route {from} -> {next} (label {label}, {} labelled)", wave.len());
                return Ok(Route::Step(next))
            }
        }
        debug!("{seeker} open labelling missed {from} after {} cells, flooding", wave.len());
    }

    let candidates = blocked_candidates(grid, from, goal, config.blocked_limit);
    match candidates.first() {
        Some(&next) => {
            trace!("{seeker} blocked route {from} -> {next} of {candidates:?}");
            Ok(Route::Step(next))
        }
        None => Err(Error::NoRoute { seeker, goal }),
    }
}

/// When `blocked` turned out occupied, another cell next to both `from` and
/// `blocked` that still closes the gap to `goal`.
///
/// Prefers closing both axes over one, then the smaller remaining distance,
/// then scan order. Cells closing neither axis are never chosen.
pub fn sidestep(grid: &TileGrid, from: Xy, blocked: Xy, goal: Xy) -> Option<Xy> {
    let gap = goal - from;
    scan_dirs(from, goal).into_iter()
        .enumerate()
        .map(|(rank, dir)| (rank, from + dir.offset()))
        .filter(|&(_, it)| it != blocked && it.is_adjacent(&blocked) && grid.check_traversable(it))
        .filter_map(|(rank, it)| {
            let left = goal - it;
            let closed = (left.x.abs() < gap.x.abs()) as u32 + (left.y.abs() < gap.y.abs()) as u32;
            (closed > 0).then_some(((2 - closed, it.distance(&goal), rank), it))
        })
        .min_by_key(|&(key, _)| key)
        .map(|(_, it)| it)
}
