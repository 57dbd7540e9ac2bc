use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ID types for type safety
pub type PlayerName = String;
pub type ContactId = String;

/// Table size and faction split are fixed
pub const NUM_PLAYERS: usize = 6;
pub const NUM_MAFIA: usize = 2;
pub const NUM_INNOCENT: usize = 4;

/// Roles the mafia-aligned players are drawn from (2 of 3)
pub const MAFIA_POOL: [Role; 3] = [Role::Mafioso, Role::Mafioso, Role::Barman];

/// Roles the innocent-aligned players are drawn from (4 of 6)
pub const INNOCENT_POOL: [Role; 6] = [
    Role::Citizen,
    Role::Citizen,
    Role::Citizen,
    Role::Citizen,
    Role::Doctor,
    Role::Detective,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Doctor,
    Detective,
    Mafioso,
    Barman,
}

impl Role {
    pub fn alignment(self) -> Alignment {
        match self {
            Role::Mafioso | Role::Barman => Alignment::Mafia,
            Role::Citizen | Role::Doctor | Role::Detective => Alignment::Innocent,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Citizen => write!(f, "citizen"),
            Role::Doctor => write!(f, "doctor"),
            Role::Detective => write!(f, "detective"),
            Role::Mafioso => write!(f, "mafioso"),
            Role::Barman => write!(f, "barman"),
        }
    }
}

/// Which side a role plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Mafia,
    Innocent,
}

impl Alignment {
    /// Lowercase faction name used when announcing the winner
    pub fn faction(self) -> &'static str {
        match self {
            Alignment::Mafia => "mafia",
            Alignment::Innocent => "innocent",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Mafia => write!(f, "Mafia"),
            Alignment::Innocent => write!(f, "Innocent"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: PlayerName,
    pub contact: ContactId,
    pub role: Option<Role>,
    pub alive: bool,
}

impl Player {
    pub fn new(name: PlayerName, contact: ContactId) -> Self {
        Self {
            name,
            contact,
            role: None,
            alive: true,
        }
    }
}

/// Top-level game phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", content = "step", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Prepare,
    Night(NightStep),
    Day,
}

/// Night sub-phases, walked in declaration order every night
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NightStep {
    Citizen,
    Mafioso,
    Barman,
    Doctor,
    Detective,
}

impl NightStep {
    /// The role this step is waiting on
    pub fn role(self) -> Role {
        match self {
            NightStep::Citizen => Role::Citizen,
            NightStep::Mafioso => Role::Mafioso,
            NightStep::Barman => Role::Barman,
            NightStep::Doctor => Role::Doctor,
            NightStep::Detective => Role::Detective,
        }
    }

    /// Successor table for the night sub-machine
    pub fn next(self) -> Phase {
        match self {
            NightStep::Citizen => Phase::Night(NightStep::Mafioso),
            NightStep::Mafioso => Phase::Night(NightStep::Barman),
            NightStep::Barman => Phase::Night(NightStep::Doctor),
            NightStep::Doctor => Phase::Night(NightStep::Detective),
            NightStep::Detective => Phase::Day,
        }
    }
}

/// Fixed pauses the host inserts between narration lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Stand-in for an absent or canceled role "acting"
    Dramatic,
    /// Breath after the winner is announced
    Victory,
}

/// Instructions produced by a game tick, executed in order by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Narrate a line to the whole table and wait until it is spoken
    Announce(String),
    /// Deliver a private message to one contact
    Whisper { to: ContactId, text: String },
    Pause(Pause),
    /// Phase changed: flush the inbox and let the transports catch up
    Settle,
}
