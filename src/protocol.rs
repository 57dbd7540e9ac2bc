//! Inbound command grammar and the lines the host speaks or sends.
//!
//! Players text commands of the shape `"Command, argument"`. Anything that
//! does not parse is dropped by the caller without a reply.

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join(PlayerName),
    Kill(PlayerName),
    /// Barman's pick. `Role::Citizen` stands for "cancel nothing".
    Cancel(Role),
    Protect(PlayerName),
    Detect(PlayerName),
    Vote(PlayerName),
}

impl Command {
    /// Parse a raw message. The keyword is case-sensitive; the argument is trimmed.
    pub fn parse(text: &str) -> Option<Self> {
        let (keyword, argument) = match text.split_once(',') {
            Some((keyword, argument)) => (keyword.trim(), argument.trim()),
            None => (text.trim(), ""),
        };

        let command = match keyword {
            "Join" => Command::Join(argument.to_string()),
            "Kill" => Command::Kill(argument.to_string()),
            "Cancel" => Command::Cancel(match argument.to_lowercase().as_str() {
                "doctor" => Role::Doctor,
                "detective" => Role::Detective,
                _ => Role::Citizen,
            }),
            "Protect" => Command::Protect(argument.to_string()),
            "Detect" => Command::Detect(argument.to_string()),
            "Vote" => Command::Vote(argument.to_string()),
            _ => return None,
        };
        Some(command)
    }
}

pub const ROLE_START: &str = "Start to assign roles";
pub const VOTE_PROMPT: &str = "Discuss, and vote to lynch one suspect.";
pub const CANCEL_NOTICE: &str = "Your ability is canceled by barman tonight";
pub const NOBODY: &str = "Nobody";

/// Line announced when a night step opens
pub fn night_prompt(step: NightStep) -> &'static str {
    match step {
        NightStep::Citizen => "Night is coming. Close your eyes",
        NightStep::Mafioso => "Mafia, open your eyes,,, who do you want to kill?",
        NightStep::Barman => "Barman, open your eyes,,, Cancel doctor, detective, or not?",
        NightStep::Doctor => "Doctor, open your eyes,,, who do you want to protect?",
        NightStep::Detective => "Detective, open your eyes,,, who do you want to check?",
    }
}

/// Line spoken when a night step is over. Citizens never open their eyes.
pub fn night_closing(step: NightStep) -> Option<&'static str> {
    match step {
        NightStep::Citizen => None,
        NightStep::Mafioso => Some("Mafia, close your eyes."),
        NightStep::Barman => Some("Barman, close your eyes."),
        NightStep::Doctor => Some("Doctor, close your eyes."),
        NightStep::Detective => Some("Detective, close your eyes."),
    }
}

pub fn dawn(victim: &str) -> String {
    format!("Night is over, open your eyes. {}, died last night.", victim)
}

pub fn victory(winner: Alignment) -> String {
    format!("{} win the game", winner.faction())
}

pub fn role_notice(name: &str, role: Role) -> String {
    format!("{}, your role is: {}", name, role)
}

pub fn verdict(alignment: Alignment) -> String {
    format!("The player you checked is {}", alignment)
}
