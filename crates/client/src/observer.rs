//! Global response observation for the HTTP layer.
//!
//! The API client reports every finished exchange here before handing the
//! result to its caller. Observers see status and path only; bodies and
//! headers stay with the caller. The one production observer is the
//! session-invalidation interceptor, but the seam is generic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle returned by [`ResponseObserverRegistry::install`]; uninstalling
/// requires it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// What observers get to see of a finished HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEvent {
    pub status: u16,
    pub path: String,
}

impl ResponseEvent {
    pub fn new(status: u16, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    /// The response class meaning the server no longer accepts the
    /// session's credentials, regardless of which endpoint answered.
    pub fn is_authentication_rejected(&self) -> bool {
        self.status == 401
    }
}

/// Synchronous observer of every response the API client sees.
///
/// Implementations must be quick and must not fail; anything slow or
/// fallible belongs behind a channel.
pub trait ResponseObserver: Send + Sync {
    fn on_response(&self, event: &ResponseEvent);
}

/// Fan-out point the API client notifies after every exchange.
#[derive(Default)]
pub struct ResponseObserverRegistry {
    next_id: AtomicU64,
    observers: Mutex<Vec<(ObserverId, Arc<dyn ResponseObserver>)>>,
}

impl ResponseObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, observer: Arc<dyn ResponseObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut observers) = self.observers.lock() {
            observers.push((id, observer));
        }
        id
    }

    /// Uninstalling an id twice, or one that was never installed, is a
    /// no-op.
    pub fn uninstall(&self, id: ObserverId) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.retain(|(installed, _)| *installed != id);
        }
    }

    /// Deliver `event` to every installed observer, in installation order.
    ///
    /// Observers run outside the registry lock, so an observer may install
    /// or uninstall from within its callback.
    pub fn notify(&self, event: &ResponseEvent) {
        let observers: Vec<Arc<dyn ResponseObserver>> = match self.observers.lock() {
            Ok(observers) => observers.iter().map(|(_, o)| o.clone()).collect(),
            Err(_) => return,
        };
        for observer in observers {
            observer.on_response(event);
        }
    }

    #[cfg(test)]
    fn installed_count(&self) -> usize {
        self.observers.lock().map(|o| o.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct Counting {
        seen: AtomicUsize,
    }

    impl ResponseObserver for Counting {
        fn on_response(&self, _event: &ResponseEvent) {
            self.seen.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn counting() -> Arc<Counting> {
        Arc::new(Counting {
            seen: AtomicUsize::new(0),
        })
    }

    #[test]
    fn classifies_authentication_rejection_by_status_alone() {
        assert!(ResponseEvent::new(401, "/api/photos").is_authentication_rejected());
        assert!(!ResponseEvent::new(403, "/api/photos").is_authentication_rejected());
        assert!(!ResponseEvent::new(500, "/api/auth/login").is_authentication_rejected());
    }

    #[test]
    fn notifies_every_installed_observer() {
        let registry = ResponseObserverRegistry::new();
        let first = counting();
        let second = counting();
        registry.install(first.clone());
        registry.install(second.clone());

        registry.notify(&ResponseEvent::new(200, "/api/photos"));

        assert_eq!(first.seen.load(Ordering::Relaxed), 1);
        assert_eq!(second.seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn uninstall_is_idempotent_and_precise() {
        let registry = ResponseObserverRegistry::new();
        let kept = counting();
        let removed = counting();
        registry.install(kept.clone());
        let id = registry.install(removed.clone());

        registry.uninstall(id);
        registry.uninstall(id);
        assert_eq!(registry.installed_count(), 1);

        registry.notify(&ResponseEvent::new(200, "/api/photos"));
        assert_eq!(kept.seen.load(Ordering::Relaxed), 1);
        assert_eq!(removed.seen.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn observer_may_uninstall_itself_during_notification() {
        struct SelfRemoving {
            registry: std::sync::Weak<ResponseObserverRegistry>,
            id: Mutex<Option<ObserverId>>,
        }

        impl ResponseObserver for SelfRemoving {
            fn on_response(&self, _event: &ResponseEvent) {
                if let (Some(registry), Some(id)) =
                    (self.registry.upgrade(), *self.id.lock().unwrap())
                {
                    registry.uninstall(id);
                }
            }
        }

        let registry = Arc::new(ResponseObserverRegistry::new());
        let observer = Arc::new(SelfRemoving {
            registry: Arc::downgrade(&registry),
            id: Mutex::new(None),
        });
        let id = registry.install(observer.clone());
        *observer.id.lock().unwrap() = Some(id);

        registry.notify(&ResponseEvent::new(200, "/api/photos"));
        assert_eq!(registry.installed_count(), 0);
    }
}
