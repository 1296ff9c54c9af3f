//! Runs the adaptive engine and the fixed-form path back to back over the
//! same simulated respondent (every raw response supplied on the command
//! line, reused for both modes) and prints the agreement statistics the
//! comparison layer exists to produce.
//!
//! This does not implement the out-of-scope registration/counterbalancing
//! collaborator; it exists so the comparison layer has an operable,
//! scriptable harness independent of any HTTP delivery mechanism.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dose::bank::{default_bank, Trait};
use dose::config::Config;
use dose::controller::{Controller, StepOutcome};
use dose::fixed_form::FixedFormResponses;
use dose::scoring;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "compare",
    about = "Compare adaptive vs. fixed-form scoring over a simulated respondent"
)]
struct Args {
    /// a single raw response (1..7) applied to every item in both modes;
    /// defaults to the midpoint respondent
    #[arg(long, default_value_t = 4)]
    response: u8,

    #[arg(long)]
    deployment: bool,
}

fn main() -> anyhow::Result<()> {
    dose::init();
    let args = Args::parse();
    anyhow::ensure!((1..=7).contains(&args.response), "response must be in 1..=7");
    let config = if args.deployment {
        Config::deployment_default()
    } else {
        Config::algorithmic_default()
    };
    let bank = Arc::new(default_bank().clone());

    let mut controller = Controller::new(bank.clone(), config).context("reference bank must be well-formed")?;
    let mut outcome = controller.start().context("start never fails on a fresh controller")?;
    while let StepOutcome::PresentItem { .. } = outcome {
        outcome = controller
            .respond(args.response)
            .context("constant-response replay must never fail numerically")?;
    }

    let mut fixed = FixedFormResponses::new();
    for number in 1..=bank.len() as u8 {
        fixed.record(number, args.response)?;
    }
    let fixed_means = fixed.means(&bank);

    let adaptive_theta: BTreeMap<Trait, f64> = Trait::ALL
        .iter()
        .map(|&t| (t, controller.estimator(t).theta()))
        .collect();
    let (differences, agreement) = scoring::compare(&adaptive_theta, &fixed_means);

    println!("{}", "adaptive vs. fixed-form".bold());
    for trait_tag in Trait::ALL {
        let theta = adaptive_theta[&trait_tag];
        let adaptive_likert = scoring::to_likert(theta);
        let fixed_likert = fixed_means[&trait_tag];
        println!(
            "  {trait_tag} adaptive={adaptive_likert:>4.2} fixed={fixed_likert:>4.2} diff={:+.2}",
            differences[&trait_tag]
        );
    }
    println!(
        "{} pearson_r={:.4} mean_abs_diff={:.4}",
        "agreement:".bold(),
        agreement.pearson_r,
        agreement.mean_absolute_difference,
    );
    Ok(())
}
