//! Terminal UI: prompt-driven play view with a staged search replay and an
//! end-of-round summary overlay.

mod app;
mod game_view;

pub use app::{App, UiConfig};
