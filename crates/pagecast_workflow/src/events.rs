//! Console-wide event bus.

use derive_more::Display;
use tokio::sync::broadcast;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    /// Neutral information
    Info,
    /// An action completed
    Success,
    /// An action failed
    Error,
}

/// Something views may want to react to.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConsoleEvent {
    /// The page selection changed; carries the new count.
    #[display("selection changed ({})", _0)]
    SelectionChanged(usize),
    /// The post list is out of date (e.g. after a boost).
    #[display("posts refresh requested")]
    PostsRefreshRequested,
    /// The campaign list is out of date.
    #[display("campaigns refresh requested")]
    CampaignsRefreshRequested,
    /// A transient message for the user.
    #[display("{}: {}", level, text)]
    Notice {
        /// Severity
        level: NoticeLevel,
        /// Message text
        text: String,
    },
}

/// Broadcast channel shared by every workflow of a console session.
///
/// Emitting never fails; events sent while nobody listens are dropped.
///
/// # Examples
///
/// ```
/// use pagecast_workflow::{ConsoleEvent, EventBus};
///
/// let bus = EventBus::new(16);
/// let mut rx = bus.subscribe();
/// bus.emit(ConsoleEvent::PostsRefreshRequested);
/// assert_eq!(rx.try_recv().unwrap(), ConsoleEvent::PostsRefreshRequested);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ConsoleEvent>,
}

impl EventBus {
    /// Bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Listen to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers.
    pub fn emit(&self, event: ConsoleEvent) {
        tracing::trace!(%event, "Emitting console event");
        if self.sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }

    /// Shorthand for a [`ConsoleEvent::Notice`].
    pub fn notify(&self, level: NoticeLevel, text: impl Into<String>) {
        self.emit(ConsoleEvent::Notice {
            level,
            text: text.into(),
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
