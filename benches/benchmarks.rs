use dose::bank::default_bank;
use dose::config::Config;
use dose::controller::{Controller, StepOutcome};
use dose::grid::Grid;
use dose::grm;
use dose::posterior::Posterior;
use std::sync::Arc;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_category_probabilities,
        computing_fisher_information,
        updating_a_posterior,
        selecting_next_item,
        running_a_full_adaptive_session,
}

fn computing_category_probabilities(c: &mut criterion::Criterion) {
    let bank = default_bank();
    let item = *bank.item(1).unwrap();
    c.bench_function("GRM category probabilities at a single theta", |b| {
        b.iter(|| grm::category_probs(&item, 0.3))
    });
}

fn computing_fisher_information(c: &mut criterion::Criterion) {
    let bank = default_bank();
    let item = *bank.item(1).unwrap();
    c.bench_function("Fisher information at a single theta", |b| {
        b.iter(|| grm::fisher_information(&item, 0.3))
    });
}

fn updating_a_posterior(c: &mut criterion::Criterion) {
    let bank = default_bank();
    let item = *bank.item(1).unwrap();
    let grid = Arc::new(Grid::new(&Config::algorithmic_default()));
    c.bench_function("posterior update over the 161-node grid", |b| {
        b.iter(|| {
            let mut posterior = Posterior::init(grid.clone());
            posterior.update(&item, 4).unwrap();
        })
    });
}

fn selecting_next_item(c: &mut criterion::Criterion) {
    let bank = default_bank();
    let grid = Arc::new(Grid::new(&Config::algorithmic_default()));
    let estimator = dose::estimator::TraitEstimator::new(
        dose::bank::Trait::Extraversion,
        grid,
        &Config::algorithmic_default(),
    );
    c.bench_function("item selection by max Fisher information", |b| {
        b.iter(|| dose::selector::select(&estimator, bank))
    });
}

fn running_a_full_adaptive_session(c: &mut criterion::Criterion) {
    let bank = Arc::new(default_bank().clone());
    c.bench_function("full 24-item adaptive session (all-midpoint respondent)", |b| {
        b.iter(|| {
            let mut controller = Controller::new(bank.clone(), Config::algorithmic_default()).unwrap();
            let mut outcome = controller.start().unwrap();
            while let StepOutcome::PresentItem { .. } = outcome {
                outcome = controller.respond(4).unwrap();
            }
        })
    });
}
