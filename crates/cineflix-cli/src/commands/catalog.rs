//! Read-only lookups: TMDB search, wildcard picks, genres, trending and recommendations.

use super::progress::Spinner;
use super::{AppContext, GlobalOptions};
use crate::output::Output;
use crate::tables;
use cineflix_core::TrackerError;
use color_eyre::eyre::eyre;
use color_eyre::Result;

fn failure(err: TrackerError) -> color_eyre::Report {
    tracing::debug!(error = ?err, "Command failed");
    eyre!("{}", err.user_message())
}

pub async fn run_search(query: &str, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let mut tracker = ctx.tracker();

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query.trim()), output);
    let result = tracker.search(query).await.map(|results| results.len());
    spinner.finish();

    if let Err(err) = result {
        // The tracker's notice carries the user-facing wording for search failures
        let message = tracker
            .take_notice()
            .map(|n| n.message)
            .unwrap_or_else(|| err.user_message());
        return Err(eyre!("{}", message));
    }

    let results = tracker.search_results();
    if results.is_empty() && output.is_human() {
        output.info(format!("No films found for \"{}\"", query.trim()));
        return Ok(());
    }
    output.table_or_json(tables::search_table(results), results)?;
    Ok(())
}

pub async fn run_wildcard(genre: Option<&str>, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let mut tracker = ctx.tracker();

    let pick = tracker.wildcard(genre).await.map_err(failure)?;
    let picks = std::slice::from_ref(&pick);
    output.table_or_json(tables::suggestion_table(picks), &pick)?;
    Ok(())
}

pub async fn run_genres(options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let mut tracker = ctx.tracker();

    let genres = tracker.genres().await.map_err(failure)?;
    output.table_or_json(tables::genre_table(&genres), &genres)?;
    Ok(())
}

pub async fn run_trending(personalized: bool, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let mut tracker = ctx.tracker();

    let films = tracker.refresh_trending(personalized).await.map_err(failure)?;
    if films.is_empty() && output.is_human() {
        output.info("No trending films right now");
        return Ok(());
    }
    output.table_or_json(tables::suggestion_table(films), films)?;
    Ok(())
}

pub async fn run_recommend(count: Option<u32>, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let mut tracker = ctx.tracker();

    let films = tracker.refresh_recommendations(count).await.map_err(failure)?;
    if films.is_empty() && output.is_human() {
        output.info("No recommendations yet. Rate a few more films first.");
        return Ok(());
    }
    output.table_or_json(tables::suggestion_table(films), films)?;
    Ok(())
}
