//! Repeating tick registration for the spinning display.
//!
//! A tick source hands back a [`TickHandle`]; releasing the handle stops the
//! ticks. Every tick carries the [`SpinId`] it was registered for so that a
//! tick already queued when the spin ended can be told apart from a live one.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;

use crate::action::AppEvent;

/// Identifies one Spinning period of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpinId(u64);

impl SpinId {
    pub fn next(self) -> Self {
        SpinId(self.0.wrapping_add(1))
    }
}

/// Owned registration of a repeating tick. Cancelled at most once, either
/// explicitly or on drop.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Something that can fire `on_tick` for a spin every `period`.
pub trait Ticker {
    fn every(&self, period: Duration, spin: SpinId) -> TickHandle;
}

/// Ticks delivered as [`AppEvent::Tick`] on the app's event channel by a
/// spawned tokio task. Must be used from inside a runtime.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    events: UnboundedSender<AppEvent>,
}

impl IntervalTicker {
    pub fn new(events: UnboundedSender<AppEvent>) -> Self {
        Self { events }
    }
}

impl Ticker for IntervalTicker {
    fn every(&self, period: Duration, spin: SpinId) -> TickHandle {
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately; the first real one is a period out.
            interval.tick().await;
            loop {
                interval.tick().await;
                if events.send(AppEvent::Tick(spin)).is_err() {
                    break;
                }
            }
        });
        TickHandle::new(move || task.abort())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Records registrations and counts handles that are still live.
    #[derive(Debug, Clone, Default)]
    pub struct ManualTicker {
        active: Arc<AtomicUsize>,
        registered: Arc<Mutex<Vec<(Duration, SpinId)>>>,
    }

    impl ManualTicker {
        pub fn active(&self) -> usize {
            self.active.load(Ordering::SeqCst)
        }

        pub fn registered(&self) -> Vec<(Duration, SpinId)> {
            self.registered.lock().unwrap().clone()
        }
    }

    impl Ticker for ManualTicker {
        fn every(&self, period: Duration, spin: SpinId) -> TickHandle {
            self.registered.lock().unwrap().push((period, spin));
            self.active.fetch_add(1, Ordering::SeqCst);
            let active = Arc::clone(&self.active);
            TickHandle::new(move || {
                active.fetch_sub(1, Ordering::SeqCst);
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut handle = TickHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handle.is_active());
        handle.cancel();
        handle.cancel();
        drop(handle);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_cancels() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        drop(TickHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_spin_ids_advance() {
        let first = SpinId::default();
        assert_ne!(first, first.next());
        assert_eq!(first.next(), first.next());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_delivers_tagged_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = IntervalTicker::new(tx);
        let spin = SpinId::default().next();

        let mut handle = ticker.every(Duration::from_millis(80), spin);

        for _ in 0..3 {
            match rx.recv().await {
                Some(AppEvent::Tick(id)) => assert_eq!(id, spin),
                other => panic!("unexpected event: {:?}", other),
            }
        }

        handle.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;
        // Drain anything sent before the abort landed; nothing may follow.
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
