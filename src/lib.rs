// Timer core, persistence and runtime shared by the TUI binary and the
// integration tests. Terminal drawing stays in the binary.
pub mod alert;
pub mod app_dirs;
pub mod background;
pub mod config;
pub mod controller;
pub mod cycle;
pub mod error;
pub mod forms;
pub mod logging;
pub mod mode;
pub mod playlist;
pub mod runtime;
pub mod store;
