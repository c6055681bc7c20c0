//! asciiwx entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use asciiwx_app::coordinator::{CoordinatorConfig, RefreshCoordinator, Services};
use asciiwx_app::store::SqliteStore;
use asciiwx_app::terminal::{self, EventLoop, TerminalSink};
use asciiwx_core::Config;
use asciiwx_weather::{Coordinates, FixedLocator, NominatimLookup, OpenMeteoLookup};

// All awaited work is I/O-bound; a single thread schedules it all.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (config, validation) = Config::load_validated()?;

    // The panel owns the screen while it runs, so logs go to a file under
    // the config directory. Fall back to stderr if the file cannot be set
    // up; both paths register a subscriber at most once.
    let _log_guard = match asciiwx_core::init_to_file(&config.config_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            asciiwx_core::init()?;
            tracing::warn!("File logging unavailable, logging to stderr: {}", err);
            None
        }
    };
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let store = SqliteStore::open(&config.config_dir.join("state.db"))
        .context("Failed to open the state store")?;
    let locator = FixedLocator::new(
        config
            .coordinates()
            .map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            }),
    );
    let places = NominatimLookup::new().context("Failed to build the geocoding client")?;
    let weather = OpenMeteoLookup::new().context("Failed to build the weather client")?;

    let services = Services {
        locator: Arc::new(locator),
        places: Arc::new(places),
        weather: Arc::new(weather),
        store: Arc::new(store),
        sink: Arc::new(TerminalSink::new()),
    };
    let coordinator_config = CoordinatorConfig {
        watchdog: Duration::from_secs(config.refresh.watchdog_secs),
        ..CoordinatorConfig::default()
    };

    let session = terminal::init()?;
    let coordinator = RefreshCoordinator::new(services, coordinator_config);
    coordinator.render_committed();
    coordinator.refresh();

    let auto_refresh = (config.refresh.auto_minutes > 0)
        .then(|| Duration::from_secs(u64::from(config.refresh.auto_minutes) * 60));
    let result = EventLoop::new(coordinator, auto_refresh).run().await;

    // Leave the alternate screen before reporting any run error.
    drop(session);
    result
}
