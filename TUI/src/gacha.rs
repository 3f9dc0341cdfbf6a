//! Gacha engine: the start/stop/tick state machine behind the picker.
//!
//! `Idle` and `Stopped` are both at-rest phases that `start()` leaves for
//! `Spinning`. While spinning, a repeating tick redraws the displayed topic
//! uniformly at random from the whole catalog, with replacement, so the same
//! topic may come up on consecutive ticks. `stop()` commits whatever is on
//! display at that moment.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::{TopicCatalog, TopicRecord};
use crate::ticker::{SpinId, TickHandle, Ticker};

/// Tick period used by the picker unless configured otherwise.
pub const DEFAULT_SPIN_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Spinning,
    Stopped,
}

pub struct GachaEngine<T: Ticker, R: Rng = StdRng> {
    catalog: TopicCatalog,
    ticker: T,
    rng: R,
    period: Duration,
    phase: Phase,
    displayed: Option<usize>,
    selected: Option<usize>,
    has_started: bool,
    spin: SpinId,
    tick: Option<TickHandle>,
}

impl<T: Ticker> GachaEngine<T> {
    pub fn new(catalog: TopicCatalog, ticker: T, period: Duration) -> Self {
        Self::with_rng(catalog, ticker, period, StdRng::from_entropy())
    }
}

impl<T: Ticker, R: Rng> GachaEngine<T, R> {
    pub fn with_rng(catalog: TopicCatalog, ticker: T, period: Duration, rng: R) -> Self {
        Self {
            catalog,
            ticker,
            rng,
            period,
            phase: Phase::Idle,
            displayed: None,
            selected: None,
            has_started: false,
            spin: SpinId::default(),
            tick: None,
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Spinning
    }

    pub fn displayed_topic(&self) -> Option<&TopicRecord> {
        self.displayed.and_then(|i| self.catalog.get(i))
    }

    pub fn selected_topic(&self) -> Option<&TopicRecord> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    /// True once any `start()` has taken effect. Never reset.
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Spin currently accepting ticks.
    pub fn current_spin(&self) -> SpinId {
        self.spin
    }

    /// Returns whether the engine transitioned to `Spinning`.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Spinning {
            return false;
        }
        if self.catalog.is_empty() {
            debug!("start ignored: catalog is empty");
            return false;
        }

        self.release_tick();
        self.spin = self.spin.next();
        self.phase = Phase::Spinning;
        self.has_started = true;
        self.selected = None;
        self.displayed = Some(self.sample());
        self.tick = Some(self.ticker.every(self.period, self.spin));

        debug!(spin = ?self.spin, "gacha spinning");
        true
    }

    /// Returns whether the engine transitioned to `Stopped`.
    pub fn stop(&mut self) -> bool {
        if self.phase != Phase::Spinning {
            return false;
        }

        self.release_tick();
        self.selected = self.displayed;
        self.phase = Phase::Stopped;

        debug!(topic = ?self.selected_topic().map(|t| t.topic.as_str()), "gacha stopped");
        true
    }

    /// The single user control: stop when spinning, start otherwise.
    pub fn toggle(&mut self) -> bool {
        if self.is_spinning() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Applies one tick. Ticks for an earlier spin, or arriving while at
    /// rest, change nothing. Returns whether the display was redrawn.
    pub fn on_tick(&mut self, spin: SpinId) -> bool {
        if self.phase != Phase::Spinning || spin != self.spin {
            return false;
        }
        self.displayed = Some(self.sample());
        true
    }

    /// Releases the tick registration. Safe to call any number of times.
    pub fn shutdown(&mut self) {
        self.release_tick();
    }

    fn release_tick(&mut self) {
        if let Some(mut tick) = self.tick.take() {
            tick.cancel();
        }
    }

    // Only reachable with a non-empty catalog.
    fn sample(&mut self) -> usize {
        self.rng.gen_range(0..self.catalog.len())
    }
}

impl<T: Ticker, R: Rng> Drop for GachaEngine<T, R> {
    fn drop(&mut self) {
        self.release_tick();
    }
}
