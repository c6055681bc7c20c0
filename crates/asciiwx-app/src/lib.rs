//! The asciiwx terminal panel: fixed-grid screen assembly, the refresh
//! pipeline, persistence, and terminal I/O.

pub mod coordinator;
pub mod screen;
pub mod sink;
pub mod state;
pub mod store;
pub mod terminal;

pub use coordinator::{CoordinatorConfig, RefreshCoordinator, Services};
pub use sink::RenderSink;
pub use state::DisplayState;
pub use store::{SqliteStore, StateStore};
