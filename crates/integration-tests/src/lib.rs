//! Integration tests for Foodipy.
//!
//! Every test brings up an isolated application over its own temporary
//! data directory, so tests run in parallel without sharing state. The
//! flows under `tests/` drive the public API end to end:
//!
//! - `storefront_flow` - register, browse, cart, checkout, order history
//! - `admin_flow` - bootstrap admin, catalog and account management,
//!   order status updates

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use foodipy_storefront::{App, AppConfig};

/// An application instance over a throwaway data directory.
pub struct TestApp {
    pub app: App,
    // Held so the directory outlives the app.
    data_dir: TempDir,
}

impl TestApp {
    /// Bring up a fresh application on a new temporary store.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or the application cannot be created -
    /// there is no meaningful recovery in a test.
    #[must_use]
    pub fn init() -> Self {
        init_tracing();
        let data_dir = TempDir::new().expect("create temp data dir");
        let app = App::init(AppConfig::with_data_dir(data_dir.path())).expect("init app");
        Self { app, data_dir }
    }

    /// Re-open the application over the same data directory, as a process
    /// restart would.
    ///
    /// # Panics
    ///
    /// Panics if the application cannot be re-initialised.
    #[must_use]
    pub fn restart(self) -> Self {
        let Self { app, data_dir } = self;
        drop(app);
        let app = App::init(AppConfig::with_data_dir(data_dir.path())).expect("re-init app");
        Self { app, data_dir }
    }
}

/// Install a test subscriber once; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
