//! Transient, dismissible notifications.

use crate::{ConsoleEvent, NoticeLevel};
use derive_getters::Getters;
use pagecast_error::PagecastError;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// One notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notice {
    id: u64,
    level: NoticeLevel,
    text: String,
}

/// Notifications currently on screen, oldest first.
///
/// # Examples
///
/// ```
/// use pagecast_workflow::{NoticeBoard, NoticeLevel};
///
/// let mut board = NoticeBoard::default();
/// let id = board.push(NoticeLevel::Success, "Published");
/// assert_eq!(board.len(), 1);
/// assert!(board.dismiss(id));
/// assert!(board.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    /// Add a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            level,
            text: text.into(),
        });
        id
    }

    /// Add an error notice with the short text of `err`.
    pub fn push_error(&mut self, err: &PagecastError) -> u64 {
        self.push(NoticeLevel::Error, err.notice_text())
    }

    /// Remove a notice. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        before != self.notices.len()
    }

    /// Record a notice event; other events are ignored.
    pub fn apply(&mut self, event: &ConsoleEvent) -> Option<u64> {
        match event {
            ConsoleEvent::Notice { level, text } => Some(self.push(*level, text.clone())),
            _ => None,
        }
    }

    /// Drain pending events from `rx`, returning how many notices were added.
    pub fn pump(&mut self, rx: &mut broadcast::Receiver<ConsoleEvent>) -> usize {
        let mut added = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    if self.apply(&event).is_some() {
                        added += 1;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notice board fell behind the event bus");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        added
    }

    /// Notices currently shown.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Number of notices shown.
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Whether nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Dismiss everything.
    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
