//! Bounded conversation history.

use std::collections::VecDeque;

use arya_core::types::ChatTurn;

/// Chronological log of question-answer turns, truncated to the most
/// recent N once the maximum is exceeded.
pub struct HistoryManager {
    turns: VecDeque<ChatTurn>,
    max_turns: usize,
}

impl HistoryManager {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns,
        }
    }

    /// Append a turn, evicting the oldest while over the maximum.
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// The last `n` turns, most recent first. This is what the chat
    /// surface renders.
    pub fn recent(&self, n: usize) -> Vec<&ChatTurn> {
        self.turns.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
