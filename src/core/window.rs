//! Context windows and dialogue record construction.
//!
//! For the turn at index `i`, the context window is
//! `turns[max(0, i - K) .. i]` rendered as `sender: message\n` lines. The
//! window is always taken from the full conversation, even when only replies
//! from one sender are selected.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::config::DEFAULT_WINDOW_SIZE;
use crate::turn::{DialogueRecord, Turn};

/// Which turns become replies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every turn except the first.
    #[default]
    Unconditional,
    /// Only turns from this sender (still never the first turn).
    TargetSender(String),
}

impl SelectionMode {
    /// Builds the mode from an optional target user.
    pub fn from_target(target: Option<&str>) -> Self {
        match target {
            Some(user) => SelectionMode::TargetSender(user.to_string()),
            None => SelectionMode::Unconditional,
        }
    }

    /// Returns `true` if the turn at `index` should produce a record.
    pub fn selects(&self, index: usize, turn: &Turn) -> bool {
        if index == 0 {
            return false;
        }
        match self {
            SelectionMode::Unconditional => true,
            SelectionMode::TargetSender(user) => turn.sender == *user,
        }
    }
}

/// A borrowed view of the turns preceding a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    turns: &'a [Turn],
}

impl<'a> ContextWindow<'a> {
    /// Number of turns in the window.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &'a [Turn] {
        self.turns
    }

    /// Renders one `sender: message\n` line per turn.
    pub fn render(&self) -> String {
        render_turns(self.turns)
    }
}

impl fmt::Display for ContextWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for turn in self.turns {
            writeln!(f, "{turn}")?;
        }
        Ok(())
    }
}

fn render_turns<'t>(turns: impl IntoIterator<Item = &'t Turn>) -> String {
    let mut context = String::new();
    for turn in turns {
        context.push_str(&turn.sender);
        context.push_str(": ");
        context.push_str(&turn.message);
        context.push('\n');
    }
    context
}

/// Builds context windows of bounded size.
///
/// # Example
///
/// ```rust
/// use dialogpack::core::{ContextWindowBuilder, SelectionMode};
/// use dialogpack::{DialogueRecord, Turn};
///
/// let turns = vec![
///     Turn::new("Alice", "hi how are you"),
///     Turn::new("Bob", "good thanks"),
/// ];
///
/// let records = ContextWindowBuilder::new().build_records(&turns, &SelectionMode::Unconditional);
/// assert_eq!(records, vec![DialogueRecord::new("Alice: hi how are you\n", "good thanks")]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindowBuilder {
    size: usize,
}

impl ContextWindowBuilder {
    /// Creates a builder with the default window of 5 turns.
    pub fn new() -> Self {
        Self {
            size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Creates a builder with a custom window size.
    pub fn with_size(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the window for the reply at `index`.
    ///
    /// An `index` past the end is clamped to `turns.len()`.
    pub fn window<'a>(&self, turns: &'a [Turn], index: usize) -> ContextWindow<'a> {
        let end = index.min(turns.len());
        let start = end.saturating_sub(self.size);
        ContextWindow {
            turns: &turns[start..end],
        }
    }

    /// Builds one record per selected turn, in transcript order.
    pub fn build_records(&self, turns: &[Turn], mode: &SelectionMode) -> Vec<DialogueRecord> {
        turns
            .iter()
            .enumerate()
            .filter(|(index, turn)| mode.selects(*index, turn))
            .map(|(index, turn)| DialogueRecord {
                context: self.window(turns, index).render(),
                reply: turn.message.clone(),
            })
            .collect()
    }

    /// Builds records lazily from any turn iterator.
    ///
    /// Only the last `size` turns are kept; the output matches
    /// [`build_records`](Self::build_records) on the collected turns.
    pub fn stream_records<I>(&self, turns: I, mode: SelectionMode) -> WindowedRecords<I::IntoIter>
    where
        I: IntoIterator<Item = Turn>,
    {
        WindowedRecords {
            inner: turns.into_iter(),
            history: VecDeque::with_capacity(self.size),
            size: self.size,
            index: 0,
            mode,
        }
    }
}

impl Default for ContextWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming record iterator returned by [`ContextWindowBuilder::stream_records`].
#[derive(Debug)]
pub struct WindowedRecords<I> {
    inner: I,
    history: VecDeque<Turn>,
    size: usize,
    index: usize,
    mode: SelectionMode,
}

impl<I> WindowedRecords<I> {
    fn remember(&mut self, turn: Turn) {
        if self.size == 0 {
            return;
        }
        if self.history.len() == self.size {
            self.history.pop_front();
        }
        self.history.push_back(turn);
    }
}

impl<I: Iterator<Item = Turn>> Iterator for WindowedRecords<I> {
    type Item = DialogueRecord;

    fn next(&mut self) -> Option<DialogueRecord> {
        loop {
            let turn = self.inner.next()?;
            let index = self.index;
            self.index += 1;

            let record = self.mode.selects(index, &turn).then(|| DialogueRecord {
                context: render_turns(&self.history),
                reply: turn.message.clone(),
            });
            self.remember(turn);

            if record.is_some() {
                return record;
            }
        }
    }
}

impl<I: FusedIterator<Item = Turn>> FusedIterator for WindowedRecords<I> {}
