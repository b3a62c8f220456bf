use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use civicweather_bot::commands::{self, Command};
use civicweather_bot::pipeline::{sanitize_place, ForecastOutcome, ForecastPipeline};
use civicweather_bot::traits::{GdeltSignalSearch, NominatimResolver, PlaceResolver};
use civicweather_common::Config;
use gdelt_client::GdeltClient;
use nominatim_client::NominatimClient;
use telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("civicweather=info".parse()?))
        .init();

    info!("Civic weather bot starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    let telegram = TelegramClient::new(&config.bot_token);

    let search = Arc::new(GdeltSignalSearch::new(
        GdeltClient::new(&config.gdelt_doc_base, &config.user_agent),
        config.signal_query.clone(),
        config.max_articles,
    ));
    let resolver: Option<Arc<dyn PlaceResolver>> = config.geocode_places.then(|| {
        Arc::new(NominatimResolver::new(NominatimClient::new(
            &config.nominatim_base,
            &config.user_agent,
        ))) as Arc<dyn PlaceResolver>
    });
    let pipeline = ForecastPipeline::new(search, resolver);

    info!("Polling for updates");
    let mut offset: Option<i64> = None;
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let Some(message) = update.message else { continue };
            let Some(text) = message.text.as_deref() else { continue };
            let chat_id = message.chat.id;

            let reply = match commands::parse(text) {
                Some(Command::Start) => commands::USAGE.to_string(),
                Some(Command::Forecast(argument)) => {
                    let place = sanitize_place(&argument);
                    if place.is_empty() {
                        commands::FORECAST_USAGE.to_string()
                    } else {
                        match pipeline.forecast(&place).await {
                            ForecastOutcome::Report(report) => report,
                            ForecastOutcome::UnknownPlace => commands::UNKNOWN_PLACE.to_string(),
                        }
                    }
                }
                None => continue,
            };

            if let Err(e) = telegram.send_message(chat_id, &reply).await {
                error!(chat_id, error = %e, "Failed to deliver reply");
            }
        }
    }
}
