//! Watchlist management command.

use anyhow::Result;
use terminal_config::AppConfig;
use terminal_data::Watchlist;

use crate::cli::WatchlistAction;

pub async fn run(action: WatchlistAction, config: &AppConfig) -> Result<()> {
    let mut list = Watchlist::load(&config.app.watchlist)?;

    match action {
        WatchlistAction::List => {
            if list.is_empty() {
                println!("Watchlist is empty.");
            }
            for entry in list.entries() {
                println!("{}  {}", entry.code, entry.name);
            }
        }
        WatchlistAction::Add { code, name } => {
            if list.add(&code, &name)? {
                list.save()?;
                println!("Added {code}.");
            } else {
                println!("{code} is already on the watchlist.");
            }
        }
        WatchlistAction::Remove { code } => {
            if list.remove(&code) {
                list.save()?;
                println!("Removed {code}.");
            } else {
                println!("{code} is not on the watchlist.");
            }
        }
    }

    Ok(())
}
