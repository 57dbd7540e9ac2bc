mod day;
mod night;
mod roles;
mod roster;
mod snapshot;

#[cfg(test)]
mod fixtures;

pub use roles::deal;
pub use roster::{Roster, Tally};
pub use snapshot::{GameSnapshot, PlayerView};

use crate::inbox::InboundMessage;
use crate::protocol::{Command, CANCEL_NOTICE};
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Working values of a single night. Replaced when night falls, taken at dawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightScratch {
    pub victim: Option<PlayerName>,
    pub protected: Option<PlayerName>,
    /// `Some(Role::Citizen)` means the barman chose to cancel nothing
    pub blocked: Option<Role>,
    pub detected: Option<PlayerName>,
}

/// The whole table: roster, phase, and the scratch state of the current night.
///
/// A game is driven one tick at a time by [`Game::tick`], which never blocks and
/// never fails. Everything that has to happen in the outside world comes back as
/// a list of [`Effect`]s for the host to carry out in order.
#[derive(Debug)]
pub struct Game {
    id: String,
    phase: Phase,
    roster: Roster,
    night: NightScratch,
    lynch: Option<PlayerName>,
    /// Whether the current phase has spoken its opening line
    announced: bool,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A game whose role deals are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut game = Self {
            id: String::new(),
            phase: Phase::Prepare,
            roster: Roster::new(),
            night: NightScratch::default(),
            lynch: None,
            announced: false,
            rng,
        };
        game.reset();
        game
    }

    /// Throw the table away and wait for a fresh set of players
    pub fn reset(&mut self) {
        self.id = ulid::Ulid::new().to_string();
        self.phase = Phase::Prepare;
        self.roster = Roster::new();
        self.night = NightScratch::default();
        self.lynch = None;
        self.announced = false;
        tracing::info!(game_id = %self.id, "Game initialized, waiting for players to join");
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn night(&self) -> &NightScratch {
        &self.night
    }

    pub fn pending_lynch(&self) -> Option<&PlayerName> {
        self.lynch.as_ref()
    }

    /// Feed at most one inbound message to the current phase, then let the phase progress.
    pub fn tick(&mut self, message: Option<InboundMessage>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(message) = message {
            self.handle_message(message);
        }
        match self.phase {
            Phase::Prepare => self.progress_prepare(&mut effects),
            Phase::Night(step) => self.progress_night(step, &mut effects),
            Phase::Day => self.progress_day(&mut effects),
        }
        effects
    }

    fn handle_message(&mut self, message: InboundMessage) {
        let applied = match Command::parse(&message.text) {
            Some(command) => match self.phase {
                Phase::Prepare => self.handle_prepare(&message.sender, command),
                Phase::Night(step) => self.handle_night(step, &message.sender, command),
                Phase::Day => self.handle_day(command),
            },
            None => false,
        };
        if !applied {
            tracing::debug!(
                sender = %message.sender,
                text = %message.text,
                phase = ?self.phase,
                "Ignored message"
            );
        }
    }

    fn handle_prepare(&mut self, sender: &str, command: Command) -> bool {
        match command {
            Command::Join(name) => {
                let joined = self.roster.register(&name, sender);
                if joined {
                    tracing::info!(
                        player = %name,
                        joined = self.roster.len(),
                        "Player joined"
                    );
                }
                joined
            }
            _ => false,
        }
    }

    fn progress_prepare(&mut self, effects: &mut Vec<Effect>) {
        if self.roster.is_full() {
            self.assign_roles(effects);
            self.change_state(Phase::Night(NightStep::Citizen), effects);
        }
    }

    fn change_state(&mut self, next: Phase, effects: &mut Vec<Effect>) {
        tracing::info!(from = ?self.phase, to = ?next, "Change state");
        self.phase = next;
        self.announced = false;
        effects.push(Effect::Settle);
    }

    /// Speak a line to the table. If the barman canceled the role whose step is
    /// opening, its holder learns about it now.
    fn announce(&mut self, text: impl Into<String>, effects: &mut Vec<Effect>) {
        self.announced = true;
        effects.push(Effect::Announce(text.into()));

        if let Phase::Night(step) = self.phase {
            let role = step.role();
            if step != NightStep::Citizen && self.night.blocked == Some(role) {
                for to in self.roster.occupant_contacts(role) {
                    effects.push(Effect::Whisper {
                        to,
                        text: CANCEL_NOTICE.to_string(),
                    });
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::protocol::{self, CANCEL_NOTICE, ROLE_START};

    #[test]
    fn test_new_game_waits_in_prepare() {
        let game = Game::seeded(1);
        assert_eq!(game.phase(), Phase::Prepare);
        assert!(game.roster().is_empty());
        assert!(!game.id().is_empty());
    }

    #[test]
    fn test_join_ignores_duplicates_and_garbage() {
        let mut game = Game::seeded(1);
        assert!(game.tick(message("Ann", "Join, Ann")).is_empty());
        game.tick(message("Ann", "Join, Ann"));
        game.tick(message("Ben", "join, Ben"));
        game.tick(message("Ben", "Kill, Ann"));
        game.tick(message("Ben", "Join,   "));

        assert_eq!(game.roster().names(), vec!["Ann".to_string()]);
        assert_eq!(game.phase(), Phase::Prepare);
    }

    #[test]
    fn test_sixth_join_deals_roles() {
        for seed in 0..20 {
            let (game, effects) = started(seed);

            assert_eq!(game.phase(), Phase::Night(NightStep::Citizen));
            assert_eq!(effects.first(), Some(&Effect::Announce(ROLE_START.to_string())));
            assert_eq!(effects.last(), Some(&Effect::Settle));

            let players = game.roster().players();
            assert!(players.iter().all(|p| p.role.is_some() && p.alive));
            let mafia = players
                .iter()
                .filter(|p| p.role.map(Role::alignment) == Some(Alignment::Mafia))
                .count();
            assert_eq!(mafia, NUM_MAFIA);
            assert_eq!(players.len() - mafia, NUM_INNOCENT);

            let notices = whispers(&effects);
            assert_eq!(notices.len(), NUM_PLAYERS);
            let mut recipients: Vec<_> = notices.iter().map(|(to, _)| to.clone()).collect();
            recipients.sort();
            recipients.dedup();
            assert_eq!(recipients.len(), NUM_PLAYERS);
            for p in players {
                let expected = protocol::role_notice(&p.name, p.role.unwrap());
                assert!(notices.contains(&(p.contact.clone(), expected)));
            }
        }
    }

    #[test]
    fn test_seventh_join_is_ignored() {
        let (mut game, _) = started(3);
        game.tick(message("Gus", "Join, Gus"));
        assert_eq!(game.roster().len(), NUM_PLAYERS);
        assert!(game.roster().get("Gus").is_none());
    }

    #[test]
    fn test_night_order_with_absent_roles() {
        let mut game = dealt(|r| {
            !r.has_occupant(Role::Barman)
                && !r.has_occupant(Role::Doctor)
                && !r.has_occupant(Role::Detective)
        });

        let mut visited = vec![game.phase()];
        let victim = innocent(&game);
        for _ in 0..10 {
            let input = match game.phase() {
                Phase::Night(NightStep::Mafioso) => {
                    message(&mafia_contact(&game), &format!("Kill, {}", victim))
                }
                Phase::Night(_) => None,
                _ => break,
            };
            let effects = game.tick(input);
            if visited.last() != Some(&game.phase()) {
                visited.push(game.phase());
            }
            assert!(!whispers(&effects)
                .iter()
                .any(|(_, text)| text == CANCEL_NOTICE));
        }

        assert_eq!(
            visited,
            vec![
                Phase::Night(NightStep::Citizen),
                Phase::Night(NightStep::Mafioso),
                Phase::Night(NightStep::Barman),
                Phase::Night(NightStep::Doctor),
                Phase::Night(NightStep::Detective),
                Phase::Day,
            ]
        );
    }

    #[test]
    fn test_protected_victim_survives() {
        let mut game = dealt(|r| r.has_occupant(Role::Doctor));
        let victim = innocent(&game);

        play_night(&mut game, &victim, "nobody", &victim, &victim);
        assert_eq!(game.phase(), Phase::Day);
        let effects = game.tick(None);

        assert_eq!(announcements(&effects)[0], protocol::dawn(protocol::NOBODY));
        assert!(game.roster().players().iter().all(|p| p.alive));
        assert_eq!(game.roster().tally(), Tally::default());
    }

    #[test]
    fn test_unprotected_victim_dies() {
        let mut game = dealt(|_| true);
        let victim = innocent(&game);
        let other = game
            .roster()
            .names()
            .into_iter()
            .find(|n| *n != victim)
            .unwrap();

        play_night(&mut game, &victim, "nobody", &other, &other);
        let effects = game.tick(None);

        assert_eq!(announcements(&effects)[0], protocol::dawn(&victim));
        assert!(!game.roster().is_alive(&victim));
        assert_eq!(game.roster().tally().innocent, NUM_INNOCENT - 1);
    }

    #[test]
    fn test_innocents_win_and_table_resets() {
        let (mut game, _) = started(5);
        let old_id = game.id().to_string();
        for name in mafia_names(&game) {
            game.roster.kill(&name);
        }
        game.phase = Phase::Day;
        game.announced = true;

        let effects = game.tick(None);

        assert_eq!(
            effects,
            vec![
                Effect::Announce("innocent win the game".to_string()),
                Effect::Pause(Pause::Victory),
                Effect::Settle,
            ]
        );
        assert_eq!(game.phase(), Phase::Prepare);
        assert!(game.roster().is_empty());
        assert_eq!(game.roster().tally(), Tally::default());
        assert_eq!(game.night(), &NightScratch::default());
        assert_ne!(game.id(), old_id);
    }

    #[test]
    fn test_mafia_win_after_lynch() {
        let (mut game, _) = started(8);
        let mafia = mafia_names(&game);
        let innocents: Vec<_> = game
            .roster()
            .names()
            .into_iter()
            .filter(|n| !mafia.contains(n))
            .collect();
        game.roster.kill(&mafia[0]);
        game.roster.kill(&innocents[0]);
        game.roster.kill(&innocents[1]);
        assert_eq!(game.roster().tally(), Tally { mafia: 1, innocent: 2 });
        game.phase = Phase::Day;
        game.announced = true;

        let effects = game.tick(message("anyone", &format!("Vote, {}", innocents[2])));

        assert_eq!(
            announcements(&effects),
            vec!["mafia win the game".to_string()]
        );
        assert_eq!(game.phase(), Phase::Prepare);
        assert!(game.roster().is_empty());
    }

    #[test]
    fn test_commands_for_other_phases_are_ignored() {
        let (mut game, _) = started(2);
        let before = game.roster().players().to_vec();
        // Citizen step: nothing is listening yet
        game.tick(message(&mafia_contact(&game), "Kill, Ann"));
        game.tick(message("tel:Gus", "Vote, Ann"));
        game.tick(message("tel:Gus", "Join, Gus"));

        assert_eq!(game.roster().players(), before.as_slice());
        assert_eq!(game.night().victim, None);
        assert_eq!(game.phase(), Phase::Night(NightStep::Mafioso));
    }
}
