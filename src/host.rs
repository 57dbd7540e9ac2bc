//! The game loop: pulls one message at a time from the inbox, steps the game
//! and carries out the resulting effects against the outside world.

use crate::config::GameTiming;
use crate::inbox::Inbox;
use crate::outlet::{Messenger, Narrator};
use crate::state::{Game, GameSnapshot};
use crate::types::{Effect, Pause};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Host {
    game: Game,
    inbox: Inbox,
    narrator: Arc<dyn Narrator>,
    messenger: Arc<dyn Messenger>,
    timing: GameTiming,
    status: watch::Sender<GameSnapshot>,
}

impl Host {
    pub fn new(
        game: Game,
        inbox: Inbox,
        narrator: Arc<dyn Narrator>,
        messenger: Arc<dyn Messenger>,
        timing: GameTiming,
    ) -> Self {
        let (status, _) = watch::channel(game.snapshot());
        Self {
            game,
            inbox,
            narrator,
            messenger,
            timing,
            status,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Receiver that always holds the latest public view of the table
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.status.subscribe()
    }

    /// Run a single tick. Returns whether a message was consumed.
    pub async fn step(&mut self) -> bool {
        let message = self.inbox.take();
        let consumed = message.is_some();
        let effects = self.game.tick(message);
        let changed = consumed || !effects.is_empty();

        for effect in effects {
            self.apply(effect).await;
        }

        if changed {
            self.status.send_replace(self.game.snapshot());
        }
        consumed
    }

    async fn apply(&self, effect: Effect) {
        match effect {
            Effect::Announce(text) => {
                if let Err(e) = self.narrator.announce(&text).await {
                    tracing::warn!(narrator = self.narrator.name(), "Announcement failed: {}", e);
                }
            }
            Effect::Whisper { to, text } => {
                if let Err(e) = self.messenger.send(&to, &text).await {
                    tracing::warn!(
                        messenger = self.messenger.name(),
                        %to,
                        "Private message failed: {}",
                        e
                    );
                }
            }
            Effect::Pause(Pause::Dramatic) => tokio::time::sleep(self.timing.dramatic_pause).await,
            Effect::Pause(Pause::Victory) => tokio::time::sleep(self.timing.victory_pause).await,
            Effect::Settle => {
                let dropped = self.inbox.flush();
                if dropped > 0 {
                    tracing::debug!(dropped, "Flushed stale messages");
                }
                tokio::time::sleep(self.timing.settle).await;
            }
        }
    }

    /// Step forever. Idles for one tick whenever the inbox is empty and
    /// yields to other tasks between queued messages.
    pub async fn run(mut self) {
        tracing::info!(game_id = %self.game.id(), "Game loop started");
        loop {
            if self.step().await {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(self.timing.tick).await;
            }
        }
    }
}

/// Spawn the game loop as a background task
pub fn spawn_game_loop(host: Host) -> JoinHandle<()> {
    tokio::spawn(host.run())
}
