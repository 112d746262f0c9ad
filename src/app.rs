//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the item list, the
//! cursor and marked rows, and any drag or prompt in progress.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
