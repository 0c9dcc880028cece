use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use skycast_core::AppError;
use skycast_ui::{AppServices, PageState, SelectionStore};

fn main() -> Result<()> {
    // Initialize core
    skycast_core::init()?;

    // Create and initialize application
    let mut app = skycast_core::App::new()?;
    app.initialize()?;

    let services = AppServices::new(app.config())?;
    let mut page = services.forecast_page().map_err(AppError::from)?;

    tracing::info!("SkyCast started");
    eprintln!("Type a city name and press Enter to change the forecast (quit to exit).");

    let input_done = Arc::new(AtomicBool::new(false));
    spawn_search_input(services.selection().clone(), input_done.clone());

    let poll_interval = Duration::from_millis(app.config().ui.poll_interval_ms);
    println!("{}", page.render());

    loop {
        if page.poll() {
            println!("{}", page.render());
            if let PageState::Error(e) = page.state() {
                tracing::warn!("{}", AppError::from(e.clone()).user_message());
            }
        }

        if input_done.load(Ordering::Acquire) && !page.is_loading() {
            break;
        }
        std::thread::sleep(poll_interval);
    }

    // Graceful shutdown
    drop(page);
    services.shutdown();
    app.shutdown()?;

    Ok(())
}

/// Read place names from stdin and write them to the selection store.
fn spawn_search_input(store: SelectionStore, done: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let place = line.trim();
            if place.is_empty() {
                continue;
            }
            if matches!(place, "quit" | "exit") {
                break;
            }

            // No lookup step here, so the loading-city flag stays clear.
            match store.set_place(place) {
                Ok(true) => {}
                Ok(false) => tracing::info!("Already showing {}", place),
                Err(e) => tracing::warn!("Ignoring place {:?}: {}", place, e),
            }
        }
        done.store(true, Ordering::Release);
    });
}
