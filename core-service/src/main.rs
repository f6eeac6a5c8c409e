//! Factory Copilot - Console Simulation
//!
//! Runs a simulated machine through the pipeline: healthy for the first
//! half of the run, degrading for the rest.
//!
//! Usage: factory-copilot [ticks]

use factory_copilot_core::constants::{APP_NAME, APP_VERSION};
use factory_copilot_core::{Copilot, CopilotConfig, SensorGenerator, SensorStream};

const DEFAULT_TICKS: u64 = 60;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ticks = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICKS);

    log::info!("Starting {} v{} ({} ticks)", APP_NAME, APP_VERSION, ticks);

    let config = CopilotConfig::from_env();
    let copilot = Copilot::from_config(&config);

    if let Some(report) = copilot.warm_up() {
        log::info!(
            "{} ready: accuracy {:.1}% ({} trees, {} train / {} test)",
            report.model_type,
            report.accuracy * 100.0,
            report.n_estimators,
            report.train_samples,
            report.test_samples
        );
    }

    let mut stream = SensorStream::new(SensorGenerator::new());
    let failure_from = ticks / 2;
    let mut alerts = 0u32;

    for tick in 0..ticks {
        if tick >= failure_from && !stream.failure_mode() {
            log::warn!("Tick {}: entering failure mode", tick);
            stream.set_failure_mode(true);
        }

        let reading = stream.tick();
        let processed = copilot.process(&reading);
        let assessment = &processed.assessment;

        log::info!(
            "tick={:>3} progress={:.2} temp={:.1} vib={:.2} cycle={:.1} errors={:.0} risk={}% code={}",
            tick,
            stream.progress(),
            reading.temperature,
            reading.vibration,
            reading.cycle_time,
            reading.error_count,
            assessment.risk,
            assessment.error.code
        );

        if let Some(explanation) = &processed.explanation {
            log::info!("  cause: {}", explanation.root_cause);
            log::info!("  action: {}", explanation.recommended_action);
        }
        if let Some(delivery) = &processed.delivery {
            alerts += 1;
            log::info!("  alert: {}", delivery.message());
        }
    }

    let trends = copilot.analyze_trends(&stream.history());
    log::info!("Trend summary: {}", trends.summary);
    for anomaly in &trends.anomalies {
        log::info!("  - {}", anomaly);
    }
    log::info!("Done: {} alert(s) raised in {} ticks", alerts, ticks);
}
