pub mod bank;
pub mod config;
pub mod controller;
pub mod error;
pub mod estimator;
pub mod fixed_form;
pub mod grid;
pub mod grm;
pub mod interface;
pub mod posterior;
pub mod scoring;
pub mod selector;

pub use bank::{Bank, Item, Trait};
pub use config::Config;
pub use controller::{Controller, StepOutcome};
pub use error::{DoseError, DoseResult};

/// progress bar for long-running batch operations (replay/compare over many sessions).
#[cfg(feature = "cli")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(60);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initializes logging to stderr and a timestamped file under `logs/`.
#[cfg(feature = "cli")]
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
