use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for aviator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, doc and the headless smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the web app for wasm32
    Wasm {
        /// Build with optimizations
        #[arg(long)]
        release: bool,
    },
    /// Run the app headless for a few frames
    Smoke {
        #[arg(long, default_value = "120")]
        frames: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            clippy()?;
            cargo("test", &["test", "--workspace"])?;
            cargo("doc", &["doc", "--workspace", "--no-deps"])?;
            smoke(10)?;
        }
        Commands::Fmt => cargo("fmt", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => clippy()?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Wasm { release } => wasm(release)?,
        Commands::Smoke { frames } => smoke(frames)?,
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed ({status})");
    }
    Ok(())
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn wasm(release: bool) -> Result<()> {
    let mut args = vec!["build", "-p", "aviator", "--lib", "--target", WASM_TARGET];
    if release {
        args.push("--release");
    }
    cargo("wasm build", &args)
}

fn smoke(frames: u64) -> Result<()> {
    let frames = frames.to_string();
    cargo(
        "headless smoke run",
        &["run", "-p", "aviator", "--", "--headless", "--frames", &frames],
    )
}
