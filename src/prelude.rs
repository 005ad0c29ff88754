pub use xy::{Dir, Xy};

pub use crate::{
    common::{
        components::{
            actor::{Action, Actor},
            capabilities::*,
            input::{InputQueue, Key},
            ActorId,
        },
        config::{Config, RouterConfig},
        error::{Error, Result},
        grid::{Frame, TileGrid},
        message::{Entry, NarrationSink, TextLog},
    },
    sim::{
        behaviour::{Behaviour, Chase, PathLimit, PathTo, Wander},
        interact::Interaction,
        layout::Spawned,
        movement::StepOutcome,
        router::Route,
        scheduler::TickReport,
        world::World,
    },
};
