//! Sources of local input lines.

use std::collections::VecDeque;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Where the session loop gets the player's answers from.
#[async_trait::async_trait]
pub trait InputSource: Send {
    /// Next line without its terminator. `Ok(None)` is end of input.
    ///
    /// Must be cancel safe: a pending read may be dropped when a server
    /// frame wins the race, and no line may be lost when that happens.
    async fn next_line(&mut self) -> anyhow::Result<Option<String>>;
}

/// Lines typed on the terminal.
pub struct StdinInput {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinInput {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InputSource for StdinInput {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        self.lines
            .next_line()
            .await
            .map_err(|e| anyhow::anyhow!("Input error: {}", e))
    }
}

/// Pre-recorded answers.
///
/// Once the script runs out it either reports end of input or, after
/// [`ScriptedInput::then_stall`], never answers again.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    stall_when_empty: bool,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            stall_when_empty: false,
        }
    }

    /// Keep the input pending forever once the script is exhausted.
    pub fn then_stall(mut self) -> Self {
        self.stall_when_empty = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait::async_trait]
impl InputSource for ScriptedInput {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.lines.pop_front() {
            Some(line) => Ok(Some(line)),
            None if self.stall_when_empty => std::future::pending().await,
            None => Ok(None),
        }
    }
}
