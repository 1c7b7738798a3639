use super::{AppContext, GlobalOptions};
use crate::output::Output;
use crate::tables;
use crate::WatchlistCommands;
use cineflix_core::TrackerError;
use cineflix_models::{NewWatchlistEntry, NotificationPreferences, WatchlistStatus};
use cineflix_services::ServiceError;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

fn unavailable(err: ServiceError) -> color_eyre::Report {
    eyre!("{}", TrackerError::service("Watchlist", err).user_message())
}

pub async fn run_watchlist(cmd: WatchlistCommands, options: &GlobalOptions, output: &Output) -> Result<()> {
    let ctx = AppContext::load(options)?;
    let user = ctx.config.user_id.clone();
    let service = ctx.services.watchlist.clone();

    match cmd {
        WatchlistCommands::List { status } => {
            let status = status.map(WatchlistStatus::from);
            let entries = service.get_watchlist(&user, status).await.map_err(unavailable)?;
            if entries.is_empty() && output.is_human() {
                output.info("Your watchlist is empty");
                return Ok(());
            }
            output.table_or_json(tables::watchlist_table(&entries), &entries)?;
        }
        WatchlistCommands::Add {
            title,
            genre,
            year,
            description,
            poster,
        } => {
            let mut entry = NewWatchlistEntry::new(title);
            if let Some(genre) = genre {
                entry.genre = genre;
            }
            if let Some(year) = year {
                entry.release_year = year;
            }
            entry.description = description;
            entry.poster = poster;

            let mut tracker = ctx.tracker();
            let message = tracker
                .add_to_watchlist(&entry)
                .await
                .map_err(|e| eyre!("{}", e.user_message()))?;
            output.success(message);
        }
        WatchlistCommands::Remove { id } => {
            let mut tracker = ctx.tracker();
            let message = tracker
                .remove_from_watchlist(&id)
                .await
                .map_err(|e| eyre!("{}", e.user_message()))?;
            output.success(message);
        }
        WatchlistCommands::Status { id, status } => {
            let status = WatchlistStatus::from(status);
            let mut tracker = ctx.tracker();
            let message = tracker
                .update_watchlist_status(&id, &status)
                .await
                .map_err(|e| eyre!("{}", e.user_message()))?;
            output.success(message);
        }
        WatchlistCommands::Notifications => {
            let notifications = service.get_notifications(&user).await.map_err(unavailable)?;
            if notifications.is_empty() && output.is_human() {
                output.info("No notifications");
                return Ok(());
            }
            output.table_or_json(tables::notification_table(&notifications), &notifications)?;
        }
        WatchlistCommands::Notify { timing, disable } => {
            let preferences = NotificationPreferences {
                timing,
                enabled: !disable,
            };
            service
                .set_notification_preferences(&user, &preferences)
                .await
                .map_err(unavailable)?;
            if output.is_human() {
                let state = if preferences.enabled { "enabled" } else { "disabled" };
                output.success(format!("Release notifications {} ({})", state, preferences.timing));
            } else {
                output.json(&json!({"type": "success", "preferences": preferences}));
            }
        }
        WatchlistCommands::Upcoming => {
            let releases = service.get_upcoming_releases().await.map_err(unavailable)?;
            if releases.is_empty() && output.is_human() {
                output.info("No upcoming releases");
                return Ok(());
            }
            output.table_or_json(tables::suggestion_table(&releases), &releases)?;
        }
    }

    Ok(())
}
