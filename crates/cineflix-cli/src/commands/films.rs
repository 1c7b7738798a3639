use super::progress::Spinner;
use super::{AppContext, GlobalOptions};
use crate::output::Output;
use crate::tables;
use crate::FilmsCommands;
use cineflix_core::{FilmListing, FilmTracker};
use cineflix_models::FilterCriteria;
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Tracker after startup, with the limited-features warning printed if raised
pub async fn started_tracker(ctx: &AppContext, output: &Output) -> FilmTracker {
    let mut tracker = ctx.tracker();

    let spinner = Spinner::start("Connecting to CineFlix services...", output);
    let report = tracker.startup().await;
    spinner.finish();

    if let Some(notice) = tracker.take_notice() {
        output.warn(notice.message);
    }
    for failure in &report.failures {
        tracing::debug!(failure = %failure, "Startup step failed");
    }
    tracker
}

pub(super) fn print_listing(listing: &FilmListing, output: &Output) -> Result<()> {
    if listing.local {
        output.warn("Sorting service unavailable, results computed locally");
    }
    if listing.films.is_empty() && output.is_human() {
        output.info("No films match");
        return Ok(());
    }
    output.table_or_json(tables::film_table(&listing.films), listing)?;
    Ok(())
}

pub async fn run_films(cmd: FilmsCommands, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let tracker = started_tracker(&ctx, output).await;

    match cmd {
        FilmsCommands::List => {
            let films = tracker.films();
            if films.is_empty() && output.is_human() {
                output.info("No watched films yet");
                return Ok(());
            }
            output.table_or_json(tables::film_table(films), films)?;
        }
        FilmsCommands::Sort { by, order } => {
            let listing = tracker.sort_films(by, order).await;
            print_listing(&listing, output)?;
        }
        FilmsCommands::Filter {
            genre,
            min_rating,
            max_rating,
            year,
        } => {
            for rating in [min_rating, max_rating].into_iter().flatten() {
                if rating > 5 {
                    return Err(eyre!("Ratings range from 0 to 5, got {}", rating));
                }
            }
            let criteria = FilterCriteria {
                genre,
                min_rating,
                max_rating,
                year,
            };
            let listing = tracker.filter_films(&criteria).await;
            print_listing(&listing, output)?;
        }
    }

    Ok(())
}
