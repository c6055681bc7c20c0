//! Refresh orchestration: location, concurrent lookups, commit, render.
//!
//! One refresh is in flight at a time. Every attempt gets a request id
//! strictly greater than any before it, and every state transition
//! re-checks that id (and the expected phase) under the lock, so a slow
//! result from an abandoned attempt is discarded on arrival rather than
//! cancelled at the source. A watchdog bounds how long an attempt may hold
//! the in-flight slot.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use asciiwx_grid::{Grid, GridCompositor};
use asciiwx_text::{display_token, measure};
use asciiwx_weather::{
    CurrentConditions, FetchError, LocationError, LocationOptions, LocationSource, PlaceLookup,
    WeatherLookup,
};

use crate::screen;
use crate::sink::RenderSink;
use crate::state::{self, DisplayState};
use crate::store::StateStore;

/// How long a refresh may stay in flight before the watchdog abandons it.
pub const DEFAULT_WATCHDOG: Duration = Duration::from_secs(12);

/// Tunables for the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub watchdog: Duration,
    pub location: LocationOptions,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            watchdog: DEFAULT_WATCHDOG,
            location: LocationOptions::default(),
        }
    }
}

/// The collaborators the coordinator drives.
pub struct Services {
    pub locator: Arc<dyn LocationSource>,
    pub places: Arc<dyn PlaceLookup>,
    pub weather: Arc<dyn WeatherLookup>,
    pub store: Arc<dyn StateStore>,
    pub sink: Arc<dyn RenderSink>,
}

/// Where the current refresh attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Locating,
    Settling,
}

struct Inner {
    phase: Phase,
    current_id: u64,
    committed: DisplayState,
    last_frame: Grid,
}

/// Serializes refresh attempts and owns the committed display state.
///
/// Cloning yields another handle to the same coordinator; the spawned
/// pipeline and watchdog tasks each hold one.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Mutex<Inner>>,
    services: Arc<Services>,
    config: CoordinatorConfig,
    compositor: GridCompositor,
}

impl RefreshCoordinator {
    /// Builds the coordinator, loading the committed state from the store.
    /// Nothing is rendered until [`render_committed`] or [`refresh`] runs.
    ///
    /// [`render_committed`]: Self::render_committed
    /// [`refresh`]: Self::refresh
    pub fn new(services: Services, config: CoordinatorConfig) -> Self {
        let committed = DisplayState::load(services.store.as_ref());
        let compositor = GridCompositor::default();
        let last_frame = compositor.compose(screen::content_lines(&committed));

        Self {
            inner: Arc::new(Mutex::new(Inner {
                phase: Phase::default(),
                current_id: 0,
                committed,
                last_frame,
            })),
            services: Arc::new(services),
            config,
            compositor,
        }
    }

    /// Renders the committed state as-is (the startup paint).
    pub fn render_committed(&self) {
        let committed = self.inner.lock().committed.clone();
        self.render(&committed);
    }

    /// Presents the last composed frame again without recomposing.
    pub fn repaint(&self) {
        let frame = self.inner.lock().last_frame.clone();
        self.services.sink.present(&frame);
    }

    /// Snapshot of the last composed frame, for hit-testing.
    pub fn last_frame(&self) -> Grid {
        self.inner.lock().last_frame.clone()
    }

    /// Snapshot of the committed display state.
    pub fn committed(&self) -> DisplayState {
        self.inner.lock().committed.clone()
    }

    /// The single entry point for every refresh trigger.
    ///
    /// Returns immediately; the pipeline runs as a spawned task. A call
    /// while an attempt is already in flight coalesces into that attempt.
    /// Must be called from within a tokio runtime.
    pub fn refresh(&self) {
        let id = {
            let mut inner = self.inner.lock();
            if inner.phase != Phase::Idle {
                tracing::debug!("Refresh {} still in flight, coalescing", inner.current_id);
                return;
            }
            inner.current_id += 1;
            inner.phase = Phase::Locating;
            inner.current_id
        };
        tracing::info!("Refresh {} started", id);

        // Transient frame; committed state and store stay untouched.
        self.render(&DisplayState::locating());

        let watchdog = self.clone();
        tokio::spawn(async move {
            watchdog.run_watchdog(id).await;
        });

        let pipeline = self.clone();
        tokio::spawn(async move {
            pipeline.run_pipeline(id).await;
        });
    }

    async fn run_pipeline(&self, id: u64) {
        let located = self.services.locator.acquire(&self.config.location).await;
        let at = match located {
            Ok(at) => at,
            Err(err) => {
                self.location_failed(id, &err);
                return;
            }
        };

        {
            let mut inner = self.inner.lock();
            if inner.current_id != id || inner.phase != Phase::Locating {
                tracing::debug!("Refresh {}: location fix arrived too late, discarding", id);
                return;
            }
            inner.phase = Phase::Settling;
        }
        tracing::debug!(
            "Refresh {}: located at {}, {}",
            id,
            at.latitude,
            at.longitude
        );

        // Both lookups run to completion regardless of each other; partial
        // success commits partially at settlement.
        let (place, conditions) = tokio::join!(
            self.services.places.place_name(at),
            self.services.weather.current_conditions(at),
        );

        self.settle(id, place, conditions);
    }

    /// Location failed or was denied: show the denied marker once, keep
    /// everything committed as it was.
    fn location_failed(&self, id: u64, err: &LocationError) {
        let frame = {
            let mut inner = self.inner.lock();
            if inner.current_id != id || inner.phase != Phase::Locating {
                tracing::debug!("Refresh {}: stale location failure, discarding", id);
                return;
            }
            inner.phase = Phase::Idle;
            inner.committed.with_denied_city()
        };
        tracing::warn!("Refresh {}: location unavailable: {}", id, err);
        self.render(&frame);
    }

    /// Commits whatever settled successfully, field by field, then renders
    /// the committed state.
    fn settle(
        &self,
        id: u64,
        place: Result<String, FetchError>,
        conditions: Result<CurrentConditions, FetchError>,
    ) {
        let committed = {
            let mut inner = self.inner.lock();
            if inner.current_id != id || inner.phase != Phase::Settling {
                tracing::debug!("Refresh {}: stale settlement, discarding", id);
                return;
            }

            match place {
                Ok(name) => {
                    let token = display_token(&name);
                    if token.is_empty() {
                        tracing::debug!(
                            "Refresh {}: place normalized to nothing, keeping city",
                            id
                        );
                    } else {
                        inner.committed.city = token;
                        self.services.store.set(state::KEY_CITY, &inner.committed.city);
                    }
                }
                Err(err) => {
                    tracing::warn!("Refresh {}: place lookup failed, keeping city: {}", id, err);
                }
            }

            match conditions {
                Ok(current) => {
                    inner.committed.temperature = measure::temperature(current.temperature);
                    inner.committed.wind = measure::wind_speed(current.wind_speed);
                    inner.committed.humidity = measure::humidity(current.humidity);
                    inner.committed.updated_at = measure::updated_at(&current.observed_at);
                    let store = &self.services.store;
                    store.set(state::KEY_TEMPERATURE, &inner.committed.temperature);
                    store.set(state::KEY_WIND, &inner.committed.wind);
                    store.set(state::KEY_HUMIDITY, &inner.committed.humidity);
                    store.set(state::KEY_UPDATED_AT, &inner.committed.updated_at);
                }
                Err(err) => {
                    tracing::warn!(
                        "Refresh {}: weather lookup failed, keeping readings: {}",
                        id,
                        err
                    );
                }
            }

            inner.phase = Phase::Idle;
            inner.committed.clone()
        };
        tracing::info!("Refresh {} settled: {}", id, committed.city);
        self.render(&committed);
    }

    /// Abandons the attempt if it is still in flight when the timeout
    /// elapses. The pending operations are not stopped; the id and phase
    /// checks discard their results on arrival.
    async fn run_watchdog(&self, id: u64) {
        tokio::time::sleep(self.config.watchdog).await;
        let frame = {
            let mut inner = self.inner.lock();
            if inner.current_id != id || inner.phase == Phase::Idle {
                return;
            }
            inner.phase = Phase::Idle;
            inner.committed.clone()
        };
        tracing::warn!("Refresh {} hit the watchdog, abandoning the attempt", id);
        self.render(&frame);
    }

    /// Composes a frame for `state`, remembers it for hit-testing, then
    /// hands it to the sink. The sink call happens outside the lock.
    fn render(&self, state: &DisplayState) {
        let frame = self.compositor.compose(screen::content_lines(state));
        self.inner.lock().last_frame = frame.clone();
        self.services.sink.present(&frame);
    }
}
