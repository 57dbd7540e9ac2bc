use super::*;

/// Prints announcements and takes roughly as long as reading them aloud would
pub struct ConsoleNarrator {
    per_word: Duration,
}

impl ConsoleNarrator {
    pub fn new(per_word: Duration) -> Self {
        Self { per_word }
    }
}

#[async_trait]
impl Narrator for ConsoleNarrator {
    async fn announce(&self, text: &str) -> OutletResult<()> {
        println!("[ ** ] {}", text);
        let words = text.split_whitespace().count() as u32;
        tokio::time::sleep(self.per_word * words).await;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Prints private messages tagged with their recipient
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, to: &ContactId, text: &str) -> OutletResult<()> {
        println!("[ @{} ] {}", to, text);
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
