mod app;
mod geometry;
mod keymap;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;

use spin_engine::device::GpuInit;
use spin_engine::logging::{init_logging, LoggingConfig};
use spin_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::app::SpinningTriangle;
use crate::keymap::KeyActionMap;

const WINDOW_TITLE: &str = "SDL3 window";
const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 450.0;
const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Process status for any failure, panics included.
const FAILURE_STATUS: u8 = 1;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    // A panic must still end the process with the failure status.
    std::panic::set_hook(Box::new(|info| {
        log::error!("fatal: {info}");
        std::process::exit(FAILURE_STATUS.into());
    }));

    let result = run();
    if let Err(err) = &result {
        log::error!("fatal: {err:#}");
    }

    ExitCode::from(exit_status(&result))
}

fn run() -> Result<()> {
    let config = RuntimeConfig {
        title:          WINDOW_TITLE.to_string(),
        initial_size:   LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        resizable:      true,
        frame_interval: FRAME_DELAY,
    };

    // The frame delay paces the loop, not the display.
    let gpu_init = GpuInit {
        vsync:       false,
        prefer_srgb: true,
    };

    let keymap = KeyActionMap::with_quit_keys();
    log::debug!("{} key bindings installed", keymap.len());

    let app = SpinningTriangle::new(keymap);

    Runtime::run(config, gpu_init, app)?;

    log::info!("clean exit");
    Ok(())
}

fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => FAILURE_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn clean_quit_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn setup_and_frame_errors_exit_one() {
        let setup: Result<()> = Err(anyhow!("no adapter")).context("failed to create renderer");
        assert_eq!(exit_status(&setup), 1);

        let frame: Result<()> = Err(anyhow!("fatal surface error: Out of memory"));
        assert_eq!(exit_status(&frame), 1);
    }
}
