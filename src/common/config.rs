use serde::{Deserialize, Serialize};

// ===== Defaults =====

/// Grid size used when no layout dictates one
pub const DEFAULT_WIDTH: i32 = 80;
pub const DEFAULT_HEIGHT: i32 = 24;

/// Seed for the world's RNG (wander choices)
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Narration entries kept before the oldest is dropped
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Labels assigned in open mode before the router gives up and falls back
pub const DEFAULT_OPEN_LIMIT: usize = 4096;

/// Flood depth of the router's blocked mode
pub const DEFAULT_BLOCKED_LIMIT: u32 = 12;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    pub open_limit: usize,
    pub blocked_limit: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { open_limit: DEFAULT_OPEN_LIMIT, blocked_limit: DEFAULT_BLOCKED_LIMIT }
    }
}

/// Everything a host can tune about a world.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub log_capacity: usize,
    pub router: RouterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED,
            log_capacity: DEFAULT_LOG_CAPACITY,
            router: RouterConfig::default(),
        }
    }
}

impl Config {
    pub fn with_size(width: i32, height: i32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}
