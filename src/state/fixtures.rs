//! Shared helpers for driving a game tick by tick in unit tests.

use super::Game;
use crate::inbox::InboundMessage;
use crate::state::Roster;
use crate::types::*;

pub const NAMES: [&str; NUM_PLAYERS] = ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"];

pub fn contact(name: &str) -> ContactId {
    format!("tel:{}", name)
}

pub fn message(sender: &str, text: &str) -> Option<InboundMessage> {
    Some(InboundMessage {
        text: text.to_string(),
        sender: sender.to_string(),
    })
}

/// Six players join; returns the game and the effects of the final join
pub fn started(seed: u64) -> (Game, Vec<Effect>) {
    let mut game = Game::seeded(seed);
    let mut effects = Vec::new();
    for name in NAMES {
        effects = game.tick(message(&contact(name), &format!("Join, {}", name)));
    }
    (game, effects)
}

/// First seeded game whose deal satisfies `wanted`
pub fn dealt(wanted: impl Fn(&Roster) -> bool) -> Game {
    (0..2000)
        .map(|seed| started(seed).0)
        .find(|game| wanted(game.roster()))
        .expect("no seed produced the wanted deal")
}

pub fn holder(game: &Game, role: Role) -> Option<PlayerName> {
    game.roster().occupants(role).first().cloned()
}

pub fn mafia_names(game: &Game) -> Vec<PlayerName> {
    game.roster()
        .players()
        .iter()
        .filter(|p| p.alive && p.role.map(Role::alignment) == Some(Alignment::Mafia))
        .map(|p| p.name.clone())
        .collect()
}

pub fn mafia_contact(game: &Game) -> ContactId {
    contact(&mafia_names(game)[0])
}

/// A living innocent-aligned player
pub fn innocent(game: &Game) -> PlayerName {
    game.roster()
        .players()
        .iter()
        .find(|p| p.alive && p.role.map(Role::alignment) == Some(Alignment::Innocent))
        .map(|p| p.name.clone())
        .expect("no innocent left")
}

/// Walk the night up to Day, answering every step that waits for its role
pub fn play_night(
    game: &mut Game,
    victim: &str,
    cancel: &str,
    protect: &str,
    detect: &str,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for _ in 0..20 {
        let from = |role: Role| holder(game, role).map(|name| contact(&name));
        let input = match game.phase() {
            Phase::Night(NightStep::Mafioso) => {
                message(&mafia_contact(game), &format!("Kill, {}", victim))
            }
            Phase::Night(NightStep::Barman) => from(Role::Barman)
                .and_then(|c| message(&c, &format!("Cancel, {}", cancel))),
            Phase::Night(NightStep::Doctor) => from(Role::Doctor)
                .and_then(|c| message(&c, &format!("Protect, {}", protect))),
            Phase::Night(NightStep::Detective) => from(Role::Detective)
                .and_then(|c| message(&c, &format!("Detect, {}", detect))),
            Phase::Night(NightStep::Citizen) => None,
            _ => break,
        };
        effects.extend(game.tick(input));
    }
    effects
}

pub fn announcements(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Announce(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub fn whispers(effects: &[Effect]) -> Vec<(ContactId, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Whisper { to, text } => Some((to.clone(), text.clone())),
            _ => None,
        })
        .collect()
}
