use crate::cli::commands::ImportArgs;
use crate::config::{load_settings, Overrides};
use crate::db::Database;
use crate::errors::DashboardError;
use crate::import::{expand_patterns, import_rows, load_rows, ImportReport};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

pub async fn handle_import(args: ImportArgs, quiet: bool) -> Result<(), DashboardError> {
    let overrides = Overrides { db_path: args.db, ..Default::default() };
    let settings = load_settings(args.config.as_deref(), &overrides).await?;

    let paths = expand_patterns(&args.files)?;
    let db = Database::new(&settings.db_path)?;

    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(paths.len() as u64)
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:30.cyan/dark_gray} {pos}/{len} files | {msg}")
            .map_err(|e| DashboardError::Internal(format!("Progress template error: {}", e)))?
            .progress_chars("█▓░"),
    );

    let mut total = ImportReport::default();
    for path in &paths {
        bar.set_message(path.display().to_string());
        let rows = load_rows(path).await?;
        let report = import_rows(&db, &rows, settings.max_import_rows)
            .map_err(|e| DashboardError::Import(format!("{}: {}", path.display(), e)))?;

        if report.nonstandard_months > 0 {
            warn!(file = %path.display(), count = report.nonstandard_months, "Rows with month not in YYYY-MM form");
        }
        info!(file = %path.display(), inserted = report.inserted, updated = report.updated, "File imported");

        total.rows += report.rows;
        total.inserted += report.inserted;
        total.updated += report.updated;
        total.unchanged += report.unchanged;
        total.coerced_statuses += report.coerced_statuses;
        total.nonstandard_months += report.nonstandard_months;
        total.clamped_progress += report.clamped_progress;
        bar.inc(1);
    }
    bar.finish_and_clear();

    if !quiet {
        println!("{} from {} file(s)", total.message(), paths.len());
        if total.coerced_statuses > 0 {
            println!("{} row(s) had an unrecognized status and were stored without one", total.coerced_statuses);
        }
        if total.clamped_progress > 0 {
            println!("{} row(s) had progress outside 0-100 and were clamped", total.clamped_progress);
        }
    }

    Ok(())
}
