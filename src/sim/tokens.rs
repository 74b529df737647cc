//! Tokens are the player's lives. The run ends when they run out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    count: u32,
}

impl Tokens {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Gained for clearing a wall or breaking a token brick
    pub fn add(&mut self, n: u32) {
        self.count = self.count.saturating_add(n);
    }

    /// Lost when a ball drops off the bottom. Never goes below zero.
    pub fn lose(&mut self, n: u32) {
        self.count = self.count.saturating_sub(n);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
