//! Public, role-free view of the table for status endpoints.

use super::Game;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub name: PlayerName,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub game_id: String,
    pub phase: Phase,
    pub players: Vec<PlayerView>,
    pub server_now: String,
}

impl Game {
    /// Roles stay secret; only names and who is still alive are exposed
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id.clone(),
            phase: self.phase,
            players: self
                .roster
                .players()
                .iter()
                .map(|p| PlayerView {
                    name: p.name.clone(),
                    alive: p.alive,
                })
                .collect(),
            server_now: chrono::Utc::now().to_rfc3339(),
        }
    }
}
