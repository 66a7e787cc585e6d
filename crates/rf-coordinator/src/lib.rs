//! Refocus Background Coordinator
//!
//! Wires the pure decision engine in `rf-core` to the outside world: the
//! persistent settings store, the tab host, the popup message channel, and
//! the one-second periodic check. Every handler is non-fatal: storage
//! failures degrade to defaults, tab failures are logged, and no path
//! can leave a page blocked on coordinator state.
//!
//! # Modules
//!
//! - `store`: Settings/usage persistence behind a trait
//! - `tabs`: Tab enumeration and navigation behind a trait
//! - `messages`: Popup request/response types
//! - `coordinator`: Event handling (navigation, tick, messages)
//! - `runtime`: Cancellable tokio event loop

pub mod coordinator;
pub mod messages;
pub mod runtime;
pub mod store;
pub mod tabs;

pub use coordinator::Coordinator;
pub use messages::{Request, Response};
pub use store::{JsonFileStore, MemoryStore, SettingsStore, StoreError};
pub use tabs::{NoopTabHost, Tab, TabHost};
