use super::{Game, NightScratch};
use crate::protocol::{night_closing, night_prompt, verdict, Command};
use crate::types::*;

impl Game {
    /// Apply a command addressed to the current night step. Returns whether it took effect.
    pub(super) fn handle_night(&mut self, step: NightStep, sender: &str, command: Command) -> bool {
        match (step, command) {
            (NightStep::Mafioso, Command::Kill(target)) => {
                let from_mafia = self
                    .roster
                    .contact_holds(sender, |role| role.alignment() == Alignment::Mafia);
                if from_mafia && self.roster.is_alive(&target) {
                    self.night.victim = Some(target);
                    return true;
                }
                false
            }
            (NightStep::Barman, Command::Cancel(role)) => {
                if self.roster.contact_holds(sender, |r| r == Role::Barman) {
                    self.night.blocked = Some(role);
                    return true;
                }
                false
            }
            (NightStep::Doctor, Command::Protect(target)) => {
                if self.may_act(sender, Role::Doctor) && self.roster.is_alive(&target) {
                    self.night.protected = Some(target);
                    return true;
                }
                false
            }
            (NightStep::Detective, Command::Detect(target)) => {
                if self.may_act(sender, Role::Detective) && self.roster.is_alive(&target) {
                    self.night.detected = Some(target);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Sender holds `role` and the barman has not canceled it
    fn may_act(&self, sender: &str, role: Role) -> bool {
        self.night.blocked != Some(role) && self.roster.contact_holds(sender, |r| r == role)
    }

    /// Role is missing from the table or canceled for tonight
    fn sits_out(&self, role: Role) -> bool {
        self.night.blocked == Some(role) || !self.roster.has_occupant(role)
    }

    pub(super) fn progress_night(&mut self, step: NightStep, effects: &mut Vec<Effect>) {
        if !self.announced {
            self.announce(night_prompt(step), effects);
        }

        match step {
            NightStep::Citizen => {
                self.night = NightScratch::default();
                self.change_state(step.next(), effects);
            }
            NightStep::Mafioso => {
                if self.night.victim.is_some() {
                    self.close_step(step, effects);
                }
            }
            NightStep::Barman => {
                if !self.roster.has_occupant(Role::Barman) {
                    self.skip_step(step, effects);
                } else if self.night.blocked.is_some() {
                    self.close_step(step, effects);
                }
            }
            NightStep::Doctor => {
                if self.sits_out(Role::Doctor) {
                    self.skip_step(step, effects);
                } else if self.night.protected.is_some() {
                    self.close_step(step, effects);
                }
            }
            NightStep::Detective => {
                if self.sits_out(Role::Detective) {
                    self.skip_step(step, effects);
                } else if let Some(target) = self.night.detected.clone() {
                    self.report_detection(&target, effects);
                    self.close_step(step, effects);
                }
            }
        }
    }

    fn report_detection(&self, target: &str, effects: &mut Vec<Effect>) {
        let alignment = self
            .roster
            .role_of(target)
            .map_or(Alignment::Innocent, Role::alignment);
        tracing::debug!(player = target, %alignment, "Detective checked a player");
        for to in self.roster.occupant_contacts(Role::Detective) {
            effects.push(Effect::Whisper {
                to,
                text: verdict(alignment),
            });
        }
    }

    /// Keep the table guessing: pretend the absent or canceled role is deciding
    fn skip_step(&mut self, step: NightStep, effects: &mut Vec<Effect>) {
        effects.push(Effect::Pause(Pause::Dramatic));
        self.close_step(step, effects);
    }

    fn close_step(&mut self, step: NightStep, effects: &mut Vec<Effect>) {
        if let Some(line) = night_closing(step) {
            effects.push(Effect::Announce(line.to_string()));
        }
        self.change_state(step.next(), effects);
    }
}
