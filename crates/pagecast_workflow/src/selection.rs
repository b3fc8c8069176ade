//! Pages selected for the current action.

use crate::{ConsoleEvent, EventBus};
use std::collections::BTreeSet;
use tokio::sync::watch;

/// Set of selected page ids.
///
/// Every mutation publishes the new count on a watch channel (and on the event
/// bus when one is attached), even when the count did not change.
///
/// # Examples
///
/// ```
/// use pagecast_workflow::TargetSelectionSet;
///
/// let mut selection = TargetSelectionSet::new();
/// let count = selection.watch();
///
/// assert!(selection.toggle("p1"));
/// assert!(selection.toggle("p2"));
/// assert!(!selection.toggle("p1"));
///
/// assert_eq!(selection.count(), 1);
/// assert_eq!(*count.borrow(), 1);
/// ```
#[derive(Debug)]
pub struct TargetSelectionSet {
    selected: BTreeSet<String>,
    count_tx: watch::Sender<usize>,
    events: Option<EventBus>,
}

impl Default for TargetSelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        let (count_tx, _) = watch::channel(0);
        Self {
            selected: BTreeSet::new(),
            count_tx,
            events: None,
        }
    }

    /// Also announce changes as [`ConsoleEvent::SelectionChanged`].
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        let selected = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        };
        self.changed();
        selected
    }

    /// Make the selection exactly `all_ids`.
    pub fn select_all<I, S>(&mut self, all_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = all_ids.into_iter().map(Into::into).collect();
        self.changed();
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.changed();
    }

    /// Number of selected pages.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Receiver of the selection count.
    pub fn watch(&self) -> watch::Receiver<usize> {
        self.count_tx.subscribe()
    }

    fn changed(&self) {
        let count = self.selected.len();
        self.count_tx.send_replace(count);
        if let Some(events) = &self.events {
            events.emit(ConsoleEvent::SelectionChanged(count));
        }
    }
}
