#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ROUTEBOOK_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod bridge;
pub mod command;
pub mod input;
pub mod loader;
pub mod numbering;
pub mod render;
pub mod repl;
pub mod scope;
pub mod session;
pub mod settings;
pub mod style;
pub mod tracker;
pub mod trackables;
pub mod view;
pub mod viewport;

// Re-exports for convenience
pub use bridge::{FileBridge, FsBridge};
pub use loader::load_guide;
pub use numbering::ListNumbering;
pub use render::{RenderContext, Renderer};
pub use repl::run_repl;
pub use session::{Session, SessionCommand, SessionState};
pub use settings::Settings;
pub use tracker::Tracker;
