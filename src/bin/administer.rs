//! Interactive adaptive session binary.
//!
//! Walks a single participant through the adaptive (DOSE) path item by
//! item in the terminal, printing live theta/SE estimates as each trait's
//! posterior updates, and reports the final per-trait EAP/SE/likert at
//! completion.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dose::bank::default_bank;
use dose::config::Config;
use dose::controller::{Controller, StepOutcome};
use dose::scoring;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "administer",
    about = "Administer an adaptive DOSE session interactively"
)]
struct Args {
    /// use the looser deployment SE threshold (0.65) instead of the
    /// algorithmic default (0.3)
    #[arg(long)]
    deployment: bool,
}

fn main() -> anyhow::Result<()> {
    dose::init();
    let args = Args::parse();
    let config = if args.deployment {
        Config::deployment_default()
    } else {
        Config::algorithmic_default()
    };
    let bank = Arc::new(default_bank().clone());
    let mut controller = Controller::new(bank, config).context("reference bank and config must be well-formed")?;

    let progress = dose::progress(24);
    let mut outcome = controller.start().context("start never fails on a fresh controller")?;
    loop {
        match outcome {
            StepOutcome::Complete => break,
            StepOutcome::PresentItem { item_number, trait_tag } => {
                progress.set_message(format!("trait {trait_tag}"));
                let response: u8 = loop {
                    let raw: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(format!("item {item_number} ({trait_tag}) — answer 1..7"))
                        .interact_text()
                        .context("terminal must support interactive input")?;
                    match raw.trim().parse::<u8>() {
                        Ok(v) if (1..=7).contains(&v) => break v,
                        _ => println!("{}", "enter a whole number from 1 to 7".red()),
                    }
                };
                outcome = controller.respond(response).context("session failed")?;
                progress.inc(1);
            }
        }
    }
    progress.finish_and_clear();

    println!("{}", "session complete".green().bold());
    for trait_tag in dose::bank::Trait::ALL {
        let estimator = controller.estimator(trait_tag);
        let likert = scoring::to_likert(estimator.theta());
        println!(
            "  {trait_tag} theta={:>6.2} se={:>5.3} items={} likert={:.2} ({})",
            estimator.theta(),
            estimator.se(),
            estimator.items_count(),
            likert,
            estimator
                .stopping_reason()
                .map(|r| r.as_str())
                .unwrap_or("-"),
        );
    }
    Ok(())
}
