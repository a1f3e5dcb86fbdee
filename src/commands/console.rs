use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::models::ConfirmationPrompt;
use crate::services::Confirmer;

/// Line-oriented terminal: command input and yes/no dialogs share stdin
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and wait for the next line; `None` on end of input
    pub async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything but an explicit yes is a cancel, including end of input
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for Console {
    async fn confirm(&mut self, prompt: &ConfirmationPrompt) -> bool {
        println!();
        println!("== {} ==", prompt.title);
        println!("{}", prompt.message);
        let question = format!("{}? [y/N] ", prompt.confirm_label);
        match self.read_line(&question).await {
            Ok(Some(answer)) => is_affirmative(&answer),
            _ => false,
        }
    }
}
