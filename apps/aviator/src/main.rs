#[cfg(not(target_arch = "wasm32"))]
mod native {
    use aviator::headless;
    use aviator_common::ViewportSize;
    use aviator_game::GameConfig;
    use clap::Parser;
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "aviator", about = "Low-poly airplane over a rotating sea")]
    struct Cli {
        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Scene config file (.json, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run without a window, printing the final frame description
        #[arg(long)]
        headless: bool,

        /// Frames to run in headless mode
        #[arg(long, default_value = "60", requires = "headless")]
        frames: u64,
    }

    pub fn main() -> anyhow::Result<()> {
        let cli = Cli::parse();

        let filter = if cli.verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .init();

        let config = match &cli.config {
            Some(path) => GameConfig::from_path(path)?,
            None => GameConfig::default(),
        };

        if cli.headless {
            let game = headless::run(config, ViewportSize::new(1280, 720), cli.frames)?;
            print!("{}", game.renderer().last_frame());
            return Ok(());
        }

        tracing::info!("aviator starting");
        aviator::run(config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
