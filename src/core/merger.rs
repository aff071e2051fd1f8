//! Merging of consecutive same-sender messages into turns.
//!
//! The merger is a two-state machine: either no run is open, or a run for one
//! sender is accumulating its messages. A message from a different sender
//! closes the open run and starts a new one; end of input flushes the last
//! run. Merged messages are joined with a single space.

use std::iter::FusedIterator;
use std::mem;

use crate::turn::Turn;

#[derive(Debug, Default)]
enum MergeState {
    #[default]
    NoCurrentRun,
    InRun {
        sender: String,
        buffer: String,
    },
}

/// Incremental merger for a stream of single-message turns.
///
/// # Example
///
/// ```rust
/// use dialogpack::core::TurnMerger;
/// use dialogpack::Turn;
///
/// let mut merger = TurnMerger::new();
/// assert_eq!(merger.push(Turn::new("Alice", "hi")), None);
/// assert_eq!(merger.push(Turn::new("Alice", "how are you")), None);
/// assert_eq!(
///     merger.push(Turn::new("Bob", "good thanks")),
///     Some(Turn::new("Alice", "hi how are you"))
/// );
/// assert_eq!(merger.finish(), Some(Turn::new("Bob", "good thanks")));
/// ```
#[derive(Debug, Default)]
pub struct TurnMerger {
    state: MergeState,
}

impl TurnMerger {
    /// Creates a merger with no open run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one entry; returns the previous run if this entry closed it.
    pub fn push(&mut self, entry: Turn) -> Option<Turn> {
        match &mut self.state {
            MergeState::InRun { sender, buffer } if *sender == entry.sender => {
                buffer.push(' ');
                buffer.push_str(&entry.message);
                None
            }
            _ => {
                let next = MergeState::InRun {
                    sender: entry.sender,
                    buffer: entry.message,
                };
                Self::close(mem::replace(&mut self.state, next))
            }
        }
    }

    /// Flushes the open run, if any.
    pub fn finish(self) -> Option<Turn> {
        Self::close(self.state)
    }

    /// Takes the open run out, leaving the merger empty.
    fn take(&mut self) -> Option<Turn> {
        Self::close(mem::take(&mut self.state))
    }

    fn close(state: MergeState) -> Option<Turn> {
        match state {
            MergeState::NoCurrentRun => None,
            MergeState::InRun { sender, buffer } => Some(Turn {
                sender,
                message: buffer,
            }),
        }
    }
}

/// Lazy iterator adapter returned by [`merge_iter`].
#[derive(Debug)]
pub struct MergeTurns<I> {
    inner: I,
    merger: TurnMerger,
    done: bool,
}

impl<I: Iterator<Item = Turn>> Iterator for MergeTurns<I> {
    type Item = Turn;

    fn next(&mut self) -> Option<Turn> {
        if self.done {
            return None;
        }
        for entry in self.inner.by_ref() {
            if let Some(turn) = self.merger.push(entry) {
                return Some(turn);
            }
        }
        self.done = true;
        self.merger.take()
    }
}

impl<I: Iterator<Item = Turn>> FusedIterator for MergeTurns<I> {}

/// Merges lazily; only the currently open run is held in memory.
pub fn merge_iter<I>(entries: I) -> MergeTurns<I::IntoIter>
where
    I: IntoIterator<Item = Turn>,
{
    MergeTurns {
        inner: entries.into_iter(),
        merger: TurnMerger::new(),
        done: false,
    }
}

/// Merges consecutive entries from the same sender into single turns.
///
/// # Example
/// Input:  `[("Alice", "hi"), ("Alice", "how are you"), ("Bob", "good thanks")]`
/// Output: `[("Alice", "hi how are you"), ("Bob", "good thanks")]`
pub fn merge_turns<I>(entries: I) -> Vec<Turn>
where
    I: IntoIterator<Item = Turn>,
{
    merge_iter(entries).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(pairs: &[(&str, &str)]) -> Vec<Turn> {
        pairs.iter().map(|(s, m)| Turn::new(*s, *m)).collect()
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_turns(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_single() {
        let merged = merge_turns(turns(&[("Alice", "hi")]));
        assert_eq!(merged, turns(&[("Alice", "hi")]));
    }

    #[test]
    fn test_merge_consecutive_same_sender() {
        let merged = merge_turns(turns(&[
            ("Alice", "hi"),
            ("Alice", "how are you"),
            ("Bob", "good thanks"),
        ]));
        assert_eq!(merged, turns(&[("Alice", "hi how are you"), ("Bob", "good thanks")]));
    }

    #[test]
    fn test_merge_alternating_is_unchanged() {
        let input = turns(&[("A", "1"), ("B", "2"), ("A", "3"), ("B", "4")]);
        assert_eq!(merge_turns(input.clone()), input);
    }

    #[test]
    fn test_merge_non_adjacent_runs_stay_separate() {
        let merged = merge_turns(turns(&[("A", "1"), ("A", "2"), ("B", "3"), ("A", "4"), ("A", "5")]));
        assert_eq!(merged, turns(&[("A", "1 2"), ("B", "3"), ("A", "4 5")]));
    }

    #[test]
    fn test_merge_keeps_empty_messages() {
        let merged = merge_turns(turns(&[("A", "x"), ("A", ""), ("A", "y")]));
        assert_eq!(merged, turns(&[("A", "x  y")]));
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let merged = merge_turns(turns(&[("alice", "1"), ("Alice", "2")]));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_iter_is_fused() {
        let mut iter = merge_iter(turns(&[("A", "1")]));
        assert_eq!(iter.next(), Some(Turn::new("A", "1")));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_merger_finish_without_input() {
        assert_eq!(TurnMerger::new().finish(), None);
    }

    #[test]
    fn test_merge_idempotent() {
        let once = merge_turns(turns(&[("A", "1"), ("A", "2"), ("B", "3"), ("B", "4")]));
        let twice = merge_turns(once.clone());
        assert_eq!(once, twice);
    }
}
