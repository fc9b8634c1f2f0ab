//! Application state and core logic

pub mod state;

pub use state::{App, Field, Tone};
