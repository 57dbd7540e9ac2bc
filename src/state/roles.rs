use super::Game;
use crate::protocol::{role_notice, ROLE_START};
use crate::types::*;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// Split the table into factions and hand out roles.
///
/// Two names are drawn without replacement for the mafia; the rest keep their
/// registration order. Each faction's roles are drawn without replacement from
/// its pool, so two Mafiosi are possible while a Doctor or Detective may be
/// missing altogether.
pub fn deal<R: Rng + ?Sized>(rng: &mut R, names: &[PlayerName]) -> Vec<(PlayerName, Role)> {
    let mafia: Vec<PlayerName> = names.choose_multiple(rng, NUM_MAFIA).cloned().collect();
    let innocent: Vec<PlayerName> = names
        .iter()
        .filter(|name| !mafia.contains(name))
        .cloned()
        .collect();

    let mut mafia_roles = MAFIA_POOL.to_vec();
    mafia_roles.shuffle(rng);
    let mut innocent_roles = INNOCENT_POOL.to_vec();
    innocent_roles.shuffle(rng);

    mafia
        .into_iter()
        .zip(mafia_roles)
        .chain(innocent.into_iter().zip(innocent_roles))
        .collect()
}

impl Game {
    pub(super) fn assign_roles(&mut self, effects: &mut Vec<Effect>) {
        self.announce(ROLE_START, effects);

        let names = self.roster.names();
        for (name, role) in deal(&mut self.rng, &names) {
            if let Some(to) = self.roster.assign_role(&name, role) {
                tracing::debug!(player = %name, %role, "Role assigned");
                effects.push(Effect::Whisper {
                    to,
                    text: role_notice(&name, role),
                });
            }
        }
    }
}
