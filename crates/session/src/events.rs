//! Session change notifications.
//!
//! Guards, gates and screens re-evaluate whenever the session transitions;
//! this module is the fan-out that tells them to. Broadcast semantics: every
//! subscriber sees every event, in publish order.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// What changed in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// Start-up hydration finished; `authenticated` says whether a
    /// remembered session was restored.
    Hydrated { authenticated: bool },
    /// A sign-in or registration installed a user.
    SignedIn,
    /// The session ended (explicit logout or forced invalidation).
    SignedOut,
    /// Profile fields of the current user changed.
    UserUpdated,
    /// Role/permissions/photographer-status were re-fetched and applied.
    AbilitiesRefreshed,
}

/// A session change and when it happened.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub change: SessionChange,
    pub occurred_at: DateTime<Utc>,
}

/// A subscription to session changes.
///
/// Designed for single-threaded consumption; each subscriber owns its
/// receiver.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: mpsc::Receiver<SessionEvent>,
}

impl SessionSubscription {
    /// Block until the next event is available.
    pub fn recv(&self) -> Result<SessionEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Result<SessionEvent, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// In-process fan-out of session events.
///
/// Publishing is infallible: a session transition must not fail because
/// notification plumbing is in a bad state. A poisoned subscriber list
/// just means nobody is notified until restart.
#[derive(Debug, Default)]
pub(crate) struct SessionEvents {
    subscribers: Mutex<Vec<mpsc::Sender<SessionEvent>>>,
}

impl SessionEvents {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        SessionSubscription { receiver: rx }
    }

    pub(crate) fn publish(&self, change: SessionChange) {
        let event = SessionEvent {
            change,
            occurred_at: Utc::now(),
        };

        match self.subscribers.lock() {
            Ok(mut subs) => {
                // Drop any dead subscribers while publishing.
                subs.retain(|tx| tx.send(event.clone()).is_ok());
            }
            Err(_) => {
                tracing::warn!("session event dropped: subscriber list poisoned");
            }
        }
    }
}
