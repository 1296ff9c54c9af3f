//! Replays a recorded (item_number, raw_response) history through a fresh
//! controller and prints the reproduced per-trait theta/SE.
//!
//! Input is a JSON array of `[item_number, response]` pairs, read from a
//! file argument or stdin. This is the operational counterpart of the
//! round-trip property: given the same item bank, grid, and config, a
//! fresh session must reproduce the original theta/SE to within 1e-10.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dose::bank::default_bank;
use dose::config::Config;
use dose::controller::Controller;
use std::io::Read;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "replay", about = "Replay a recorded DOSE session history")]
struct Args {
    /// path to a JSON file of [item_number, response] pairs; reads stdin if omitted
    path: Option<std::path::PathBuf>,

    #[arg(long)]
    deployment: bool,
}

fn read_history(args: &Args) -> anyhow::Result<Vec<(u8, u8)>> {
    let raw = match &args.path {
        Some(path) => std::fs::read_to_string(path).context("history file must be readable")?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("stdin must be readable")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("history must be a JSON array of [item_number, response] pairs")
}

fn main() -> anyhow::Result<()> {
    dose::init();
    let args = Args::parse();
    let config = if args.deployment {
        Config::deployment_default()
    } else {
        Config::algorithmic_default()
    };
    let history = read_history(&args)?;
    let bank = Arc::new(default_bank().clone());
    match Controller::replay(bank, config, &history) {
        Ok(controller) => {
            println!("{}", "replay reproduced the session".green().bold());
            for trait_tag in dose::bank::Trait::ALL {
                let estimator = controller.estimator(trait_tag);
                println!(
                    "  {trait_tag} theta={:>6.4} se={:>6.4} items={}",
                    estimator.theta(),
                    estimator.se(),
                    estimator.items_count()
                );
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err}", "replay failed:".red().bold());
            std::process::exit(1);
        }
    }
}
