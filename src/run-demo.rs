use std::{sync::mpsc, thread};

use log::{error, info};

use unnamed_ascii_dungeon::prelude::*;

const DUNGEON: &str = "
##############
#@...$......v#
#.####.#####.#
#.#  C.#   #.#
#.#....#.g.#.#
#......#...#.#
######...$...#
##############
";

/// Keys the hero presses, one per tick.
const SCRIPT: &str = "jjjjlllnl.llluu";
const TICKS: u64 = 20;

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let (narration_tx, narration_rx) = mpsc::channel::<String>();
    let (frame_tx, frame_rx) = mpsc::channel::<(u64, Frame)>();

    let (world, spawned) = World::from_ascii(Config::default(), DUNGEON)?;
    let mut world = world.with_sink(narration_tx);
    let Some(hero) = spawned.first('@') else {
        error!("layout has no hero");
        return Ok(())
    };
    info!("{} actors, hero is {hero}", spawned.len());

    let renderer = thread::spawn(move || {
        for (tick, frame) in frame_rx {
            println!("--- tick {tick} ---\n{frame}");
            for line in narration_rx.try_iter() { println!("  {line}"); }
        }
    });

    let keys = world.input_sender(hero)?;
    let input = thread::spawn(move || {
        for key in SCRIPT.chars().filter_map(Key::from_char) {
            if keys.send(key).is_err() { break }
        }
    });

    let _ = frame_tx.send((world.current_tick(), world.frame()));
    for _ in 0..TICKS {
        let report = world.tick();
        for failure in &report.failures { error!("{failure}"); }
        if frame_tx.send((report.tick, world.frame())).is_err() { break }
        if !world.grid.contains(hero) {
            info!("the hero has fallen on tick {}", report.tick);
            break
        }
    }
    drop(frame_tx);

    if input.join().is_err() { error!("input thread panicked"); }
    if renderer.join().is_err() { error!("renderer thread panicked"); }

    if let Ok(actor) = world.grid.actor(hero) {
        info!("hero ends with {} health carrying {:?}", actor.health, actor.inventory);
    }
    Ok(())
}
