use anyhow::Result;
use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use model_viewer::cli::Cli;
use model_viewer::viewer::Viewer;

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config);
    event_loop.run_app(&mut viewer)?;

    Ok(())
}
