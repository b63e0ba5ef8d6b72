//! Year Progress
//!
//! Prints the year progress summary for the configured activity export.
//! An optional first argument overrides the export path.

use anyhow::Context;
use chrono::Datelike;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use year_progress::controller::MomentWatcher;
use year_progress::services::{LocalHistory, UserSettings};
use year_progress::storage::{config, Database};
use year_progress::YearProgressController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Year Progress v{}", env!("CARGO_PKG_VERSION"));

    let app_config = config::load_config().context("Failed to load configuration")?;

    let activities_path = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| app_config.activities_path());

    let database_path = app_config.database_path();
    let preferences_db = Database::open(&database_path)
        .with_context(|| format!("Failed to open {}", database_path.display()))?;
    let presets_db = Database::open(&database_path)
        .with_context(|| format!("Failed to open {}", database_path.display()))?;

    let history = LocalHistory::new(
        activities_path,
        UserSettings {
            units: app_config.general.units,
        },
    );

    let today = chrono::Local::now().date_naive();
    let moment = MomentWatcher::new(today);
    let mut controller =
        YearProgressController::new(preferences_db, app_config.display.palette.clone(), moment.subscribe());

    controller
        .initialize(&history, &history, &history, &presets_db)
        .await
        .context("Year progress is unavailable")?;

    if controller.has_activities() != Some(true) {
        println!("No activities found in {}", history.activities_path().display());
        return Ok(());
    }

    let (Some(preferences), Some(overview)) = (controller.preferences(), controller.overview()) else {
        return Ok(());
    };

    let progress_type = &preferences.selected_progress_type;
    println!(
        "{} for {} (presets: {})",
        progress_type.display_label(),
        preferences.selected_activity_types.join(", "),
        controller.presets_count().unwrap_or(0)
    );

    for (year, value) in overview.values_at_moment() {
        let total = controller
            .year_progressions()
            .iter()
            .find(|p| p.year == year)
            .map(|p| p.total())
            .unwrap_or(0.0);
        let color = controller.style().color_of(year).unwrap_or("-");
        println!(
            "{year}  {color}  on {:02}-{:02}: {value:>10.1}  total: {total:>10.1}",
            today.month(),
            today.day()
        );
    }

    if let Some(target) = controller.target_progression() {
        let expected = target
            .progressions
            .get(today.ordinal0() as usize)
            .map(|p| p.value)
            .unwrap_or(target.target_value);
        println!(
            "Target {}: {:.1} by year end, {:.1} expected today",
            target.year, target.target_value, expected
        );
    }

    Ok(())
}
