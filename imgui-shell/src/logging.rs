//! Logging setup for shell applications.
//!
//! The shell logs through `tracing`; binaries install a subscriber with one
//! of these helpers before constructing an [`Application`](crate::Application).

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "imgui_shell=info,imgui_shell_sdl3=info,warn";

/// Initialize a tracing subscriber, honouring `RUST_LOG` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Initialize a tracing subscriber with an explicit filter.
pub fn init_tracing_with_filter(filter: &str) {
    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .init();
}
