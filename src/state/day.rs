use super::Game;
use crate::protocol::{dawn, victory, Command, NOBODY, VOTE_PROMPT};
use crate::types::*;

impl Game {
    /// Any sender may vote; the latest valid vote replaces the pending one.
    pub(super) fn handle_day(&mut self, command: Command) -> bool {
        match command {
            Command::Vote(target) if self.roster.is_alive(&target) => {
                self.lynch = Some(target);
                true
            }
            _ => false,
        }
    }

    pub(super) fn progress_day(&mut self, effects: &mut Vec<Effect>) {
        if !self.announced {
            self.lynch = None;
            self.break_dawn(effects);
        }

        if let Some(name) = self.lynch.take() {
            tracing::info!(player = %name, "Player lynched");
            self.roster.kill(&name);
            if self.roster.tally().game_continues() {
                self.change_state(Phase::Night(NightStep::Citizen), effects);
            }
        }

        if let Some(winner) = self.roster.tally().winner() {
            tracing::info!(game_id = %self.id, ?winner, "Game over");
            self.announce(victory(winner), effects);
            effects.push(Effect::Pause(Pause::Victory));
            self.reset();
            effects.push(Effect::Settle);
        }
    }

    /// Resolve the night: the victim dies unless the doctor picked the same name.
    fn break_dawn(&mut self, effects: &mut Vec<Effect>) {
        let night = std::mem::take(&mut self.night);
        let died = match night.victim {
            Some(victim) if night.protected.as_ref() != Some(&victim) => {
                self.roster.kill(&victim);
                victim
            }
            _ => NOBODY.to_string(),
        };

        self.announce(dawn(&died), effects);
        if self.roster.tally().game_continues() {
            self.announce(VOTE_PROMPT, effects);
        }
    }
}
