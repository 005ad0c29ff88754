pub mod action;
pub mod behaviour;
pub mod interact;
pub mod layout;
pub mod movement;
pub mod router;
pub mod scheduler;
pub mod world;
