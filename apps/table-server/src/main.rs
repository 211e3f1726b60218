use table_server::config::runner::RunnerConfig;
use table_server::game::TableGame;
use table_server::{build_table, ParticipantId};
use tracing::{error, info};

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment; see
    // `TableConfig::from_env` and `RunnerConfig::from_env` for the keys.
    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut builder = build_table(config.game.clone()).with_config(config.table.clone());
    if let Some(settings) = config.settings.clone() {
        builder = builder.with_settings(settings);
    }
    for (i, model) in config.ai_models.iter().enumerate() {
        builder = builder.with_ai(model.as_str(), format!("{model}-{}", i + 1), None);
    }
    // One viewer so the run leaves a full public log behind.
    builder = builder.with_viewer(0, "observer");

    let table = match builder.build().await {
        Ok(table) => table,
        Err(e) => {
            eprintln!("❌ Failed to build table: {e}");
            std::process::exit(1);
        }
    };
    let handle = table.handle();
    let reason = table.finish().await;
    info!(%reason, "game over");

    match handle.results().await {
        Some(results) => info!(scores = ?results.scores, max_score = results.max_score, "final scores"),
        None => error!("no results available"),
    }
    let terminal = handle.inspect(|s| s.game().is_terminal()).await;
    match handle.render_state_for(ParticipantId::Client(0)).await {
        Ok(view) => info!(terminal, updates = %view["updates_received"], "viewer log complete"),
        Err(e) => error!(error = %e, "viewer snapshot failed"),
    }
    println!("{reason}");
}
