use std::sync::mpsc::Sender;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use xy::Xy;

use crate::{
    common::{
        components::{actor::Actor, input::Key, ActorId},
        config::Config,
        error::Result,
        grid::{Frame, TileGrid},
        message::{NarrationSink, TextLog},
    },
    sim::{
        behaviour::{self, Behaviour},
        layout::{self, Spawned},
        scheduler::{self, TickReport},
    },
};

/// The one value every simulation call threads through: the grid (and with
/// it every actor), the seeded RNG, the narration log and the tick counter.
pub struct World {
    pub grid: TileGrid,
    config: Config,
    rng: StdRng,
    log: TextLog,
    sink: Option<Box<dyn NarrationSink>>,
    tick: u64,
}

impl World {
    pub fn new(config: Config) -> Result<Self> {
        let grid = TileGrid::new(config.width, config.height)?;
        Ok(Self {
            grid,
            rng: StdRng::seed_from_u64(config.seed),
            log: TextLog::new(config.log_capacity),
            sink: None,
            tick: 0,
            config,
        })
    }

    /// Build a world sized to an ASCII layout; see `layout::LEGEND`.
    pub fn from_ascii(config: Config, text: &str) -> Result<(Self, Spawned)> {
        layout::build(config, text)
    }

    /// Also forward every narration line to `sink`.
    pub fn with_sink(mut self, sink: impl NarrationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &Config { &self.config }
    pub fn current_tick(&self) -> u64 { self.tick }
    pub fn log(&self) -> &TextLog { &self.log }
    pub fn rng(&mut self) -> &mut StdRng { &mut self.rng }

    pub(crate) fn advance_clock(&mut self) -> u64 {
        self.tick += 1;
        self.log.set_tick(self.tick);
        self.tick
    }

    pub fn spawn(&mut self, actor: Actor, xy: Xy) -> Result<ActorId> {
        let name = actor.name.clone();
        let id = self.grid.add(actor, xy)?;
        debug!("spawned {id} ({name}) at {xy}");
        Ok(id)
    }

    pub fn despawn(&mut self, id: ActorId) -> Result<Actor> {
        let actor = self.grid.remove(id)?;
        debug!("despawned {id} ({})", actor.name);
        Ok(actor)
    }

    pub fn attach(&mut self, id: ActorId, behaviour: impl Behaviour + 'static) -> Result<()> {
        behaviour::attach(self, id, behaviour)
    }

    pub fn add_input(&mut self, id: ActorId, key: Key) -> Result<()> {
        self.grid.actor_mut(id)?.input.add_input(key);
        Ok(())
    }

    /// Channel an input thread can feed `id`'s keys through.
    pub fn input_sender(&mut self, id: ActorId) -> Result<Sender<Key>> {
        Ok(self.grid.actor_mut(id)?.input.sender())
    }

    pub fn narrate(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("{text}");
        if let Some(sink) = self.sink.as_mut() { sink.append(text.clone()); }
        self.log.append(text);
    }

    pub fn frame(&self) -> Frame {
        self.grid.frame()
    }

    pub fn tick(&mut self) -> TickReport {
        scheduler::tick(self)
    }

    pub fn step_n(&mut self, n: u64) -> Vec<TickReport> {
        (0..n).map(|_| self.tick()).collect()
    }
}
