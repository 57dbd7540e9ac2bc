//! Player/role registry and the faction counters derived from deaths.

use crate::types::*;
use std::collections::BTreeMap;

/// Living members per faction. Only ever decremented by `Roster::kill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub mafia: usize,
    pub innocent: usize,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            mafia: NUM_MAFIA,
            innocent: NUM_INNOCENT,
        }
    }
}

impl Tally {
    /// Both factions still have something to play for
    pub fn game_continues(&self) -> bool {
        self.innocent > self.mafia && self.mafia > 0
    }

    pub fn winner(&self) -> Option<Alignment> {
        if self.mafia == 0 {
            Some(Alignment::Innocent)
        } else if self.innocent <= self.mafia {
            Some(Alignment::Mafia)
        } else {
            None
        }
    }

    fn bury(&mut self, alignment: Alignment) {
        match alignment {
            Alignment::Mafia => self.mafia = self.mafia.saturating_sub(1),
            Alignment::Innocent => self.innocent = self.innocent.saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// In registration order
    players: Vec<Player>,
    /// Living holders of each assigned role
    occupants: BTreeMap<Role, Vec<PlayerName>>,
    tally: Tally,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. Returns false when the name is empty or taken, or the table is full.
    pub fn register(&mut self, name: &str, contact: &str) -> bool {
        if name.is_empty() || self.is_full() || self.get(name).is_some() {
            return false;
        }
        self.players
            .push(Player::new(name.to_string(), contact.to_string()));
        true
    }

    /// Give a player their role and record them as an occupant.
    /// Returns the contact the role notice should go to.
    pub fn assign_role(&mut self, name: &str, role: Role) -> Option<ContactId> {
        let player = self.players.iter_mut().find(|p| p.name == name)?;
        if let Some(previous) = player.role.replace(role) {
            remove_occupant(&mut self.occupants, previous, name);
        }
        self.occupants
            .entry(role)
            .or_default()
            .push(name.to_string());
        Some(player.contact.clone())
    }

    /// Mark a living player dead. Returns their role, or None if nothing changed.
    pub fn kill(&mut self, name: &str) -> Option<Role> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.name == name && p.alive)?;
        player.alive = false;

        let role = player.role;
        // unassigned players only exist before the deal and count as innocent
        let alignment = role.map_or(Alignment::Innocent, Role::alignment);
        self.tally.bury(alignment);
        if let Some(role) = role {
            remove_occupant(&mut self.occupants, role, name);
        }
        tracing::info!(player = name, ?role, "Player is dead");
        role
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn is_alive(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.alive)
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.get(name).and_then(|p| p.role)
    }

    pub fn contact_of(&self, name: &str) -> Option<&ContactId> {
        self.get(name).map(|p| &p.contact)
    }

    /// Living players registered from this contact. One contact may hold several names.
    pub fn players_by_contact<'a>(&'a self, contact: &'a str) -> impl Iterator<Item = &'a Player> {
        self.players
            .iter()
            .filter(move |p| p.alive && p.contact == contact)
    }

    /// Whether a living player registered from this contact holds a role matching `pred`
    pub fn contact_holds(&self, contact: &str, pred: impl Fn(Role) -> bool) -> bool {
        self.players_by_contact(contact)
            .any(|p| p.role.is_some_and(&pred))
    }

    /// Living holders of a role
    pub fn occupants(&self, role: Role) -> &[PlayerName] {
        self.occupants
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_occupant(&self, role: Role) -> bool {
        !self.occupants(role).is_empty()
    }

    /// Contacts of every living holder of a role
    pub fn occupant_contacts(&self, role: Role) -> Vec<ContactId> {
        self.occupants(role)
            .iter()
            .filter_map(|name| self.contact_of(name).cloned())
            .collect()
    }

    pub fn names(&self) -> Vec<PlayerName> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= NUM_PLAYERS
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }
}

fn remove_occupant(occupants: &mut BTreeMap<Role, Vec<PlayerName>>, role: Role, name: &str) {
    if let Some(names) = occupants.get_mut(&role) {
        names.retain(|n| n != name);
        if names.is_empty() {
            occupants.remove(&role);
        }
    }
}
