use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{ModelSlot, ViewerConfig};

/// Interactive 3D model viewer: podium scene with async-loaded glTF models
#[derive(Parser, Debug)]
#[command(name = "model-viewer", version, about)]
pub struct Cli {
    /// Viewer configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model file to stage (repeatable). The first one is the hero the
    /// camera frames; later ones are staged beside it. Overrides any model
    /// slots from the config file.
    #[arg(long = "model", value_name = "PATH")]
    pub models: Vec<PathBuf>,
}

impl Cli {
    /// Resolve the final configuration: config file (or defaults) with any
    /// `--model` arguments replacing the configured slots.
    pub fn into_config(self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        if !self.models.is_empty() {
            config.models = self
                .models
                .into_iter()
                .enumerate()
                .map(|(rank, path)| ModelSlot {
                    name: format!("model-{}", rank + 1),
                    path,
                    offset: staged_offset(rank),
                    primary: rank == 0,
                })
                .collect();
        }

        Ok(config)
    }
}

/// Staging offset for the model at `rank`: the hero at the origin, the rest
/// fanned out left and right in 4-unit steps.
fn staged_offset(rank: usize) -> [f32; 3] {
    if rank == 0 {
        return [0.0, 0.0, 0.0];
    }
    let step = rank.div_ceil(2) as f32 * 4.0;
    let sign = if rank % 2 == 1 { -1.0 } else { 1.0 };
    [sign * step, 0.0, 0.0]
}
