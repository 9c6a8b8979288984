// lib.rs
// Player side of the civilization play-by-forum board game:
// the action gateway and the collaborators it talks to.

pub mod defs;
pub mod logging;
pub mod config;
pub mod error;
pub mod item;
pub mod tech;
pub mod session;
pub mod transport;
pub mod notifier;
pub mod game_state;
pub mod gateway;

#[cfg(test)]
mod testing;
