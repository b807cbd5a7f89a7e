//! `OneCore` search CLI
//!
//! Runs one maintenance form search against `OneCore` and prints the options it
//! produced.

use std::{io, process, sync::Arc};

use tracing::{error, info, warn};

use onecore_maintenance::{
    api::{AuthenticatingClient, OneCoreApi, ReqwestTransport},
    config::Config,
    maintenance::MaintenanceRequestDraft,
    observability::init_logging,
    report::write_session,
    search::{SearchInput, SearchOutcome, SearchService},
};

/// Run one search and print its options. Exits with status 1 on failure.
#[tokio::main]
pub async fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(e) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    if !run(&config).await {
        process::exit(1);
    }
}

async fn run(config: &Config) -> bool {
    let transport = match ReqwestTransport::new(Some(config.request_timeout())) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            error!("failed to build HTTP client: {e}");
            return false;
        }
    };

    let client = match AuthenticatingClient::connect(Arc::new(config.settings()), transport).await {
        Ok(client) => client,
        Err(e) => {
            error!("failed to authenticate against OneCore: {e}");
            return false;
        }
    };

    let service = SearchService::new(Arc::new(OneCoreApi::new(client)));
    let mut draft = MaintenanceRequestDraft::new("");

    draft.search = SearchInput::new(config.search.search_type)
        .value(config.search.search_value.clone())
        .caption(config.search.space_caption);

    info!(
        search_type = %config.search.search_type,
        caption = %config.search.space_caption,
        "searching OneCore"
    );

    match draft.search(&service).await {
        Ok(SearchOutcome::Completed) => {
            if let Err(e) = write_session(io::stdout().lock(), &draft.session) {
                error!("{e}");
                return false;
            }

            true
        }
        Ok(SearchOutcome::Pending) => {
            warn!("search value is not valid for {}", config.search.search_type);
            false
        }
        Ok(SearchOutcome::Warning(warning)) => {
            warn!(title = %warning.title, "{}", warning.message);
            false
        }
        Err(e) => {
            error!("{e}");
            false
        }
    }
}
