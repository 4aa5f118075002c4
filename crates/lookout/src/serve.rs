// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lookout serve`: wires adapters, the corpus scheduler, event intake and
//! the webhook gateway, then runs until SIGINT/SIGTERM.

use std::sync::Arc;

use lookout_agent::{ConversationThread, EventIntake, QueryRelay, shutdown};
use lookout_config::LookoutConfig;
use lookout_core::{ChatEvent, LookoutError, PluginAdapter};
use lookout_corpus::{CorpusRebuilder, FlushScheduler, IngestBuffer};
use lookout_gateway::{GatewayState, ServerConfig, SigningConfig};
use lookout_openai::OpenAiAdapter;
use lookout_slack::SlackAdapter;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Events accepted by the gateway but not yet picked up by the dispatcher.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Runs the service until a shutdown signal arrives.
///
/// Only startup failures are returned: missing credentials, thread creation
/// and port binding. Everything after that is logged and survived.
pub async fn run_serve(config: LookoutConfig) -> Result<(), LookoutError> {
    init_tracing(&config.agent.log_level);

    info!(name = %config.agent.name, "starting lookout serve");

    let signing_secret = config
        .slack
        .signing_secret
        .clone()
        .ok_or_else(|| LookoutError::Config("slack.signing_secret is required".into()))?;

    let slack = Arc::new(SlackAdapter::new(&config)?);
    let openai = Arc::new(OpenAiAdapter::new(&config)?);
    log_health(slack.as_ref()).await;
    log_health(openai.as_ref()).await;

    let thread = ConversationThread::open(openai.as_ref()).await?;

    let cancel = shutdown::install_signal_handler();

    // Corpus pipeline.
    let buffer = Arc::new(IngestBuffer::new());
    let rebuilder = CorpusRebuilder::new(openai.clone(), config.openai.vector_store_name.clone());
    let scheduler = FlushScheduler::new(&config.corpus, buffer.clone(), rebuilder);
    let scheduler_handle = tokio::spawn(scheduler.run(cancel.clone()));
    info!(
        interval_secs = config.corpus.flush_interval_secs,
        max_depth = config.corpus.max_depth,
        "flush scheduler started"
    );

    // Event intake.
    let relay = Arc::new(QueryRelay::new(openai.clone(), slack.clone(), thread));
    let intake = Arc::new(EventIntake::new(&config, slack, buffer, relay));
    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let dispatcher_handle = tokio::spawn(run_dispatcher(events_rx, intake, cancel.clone()));

    // Webhook gateway; returns once `cancel` fires.
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let state = GatewayState::new(events_tx, SigningConfig::new(signing_secret));
    let served = lookout_gateway::start_server(&server_config, state, cancel.clone()).await;
    if let Err(e) = &served {
        error!(error = %e, "gateway failed");
    }

    cancel.cancel();
    if let Err(e) = scheduler_handle.await {
        warn!(error = %e, "flush scheduler task ended abnormally");
    }
    if let Err(e) = dispatcher_handle.await {
        warn!(error = %e, "event dispatcher task ended abnormally");
    }

    info!("lookout stopped");
    served
}

/// Spawns one task per inbound event until cancelled or the gateway drops
/// its sender.
pub(crate) async fn run_dispatcher(
    mut events: mpsc::Receiver<ChatEvent>,
    intake: Arc<EventIntake>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("event dispatcher shutting down");
                break;
            }
            next = events.recv() => {
                let Some(event) = next else {
                    debug!("event channel closed");
                    break;
                };
                let intake = intake.clone();
                tokio::spawn(async move {
                    let event_type = event.event_type.clone();
                    let outcome = intake.dispatch(event).await;
                    debug!(%event_type, ?outcome, "event handled");
                });
            }
        }
    }
}

async fn log_health(adapter: &dyn PluginAdapter) {
    match adapter.health_check().await {
        Ok(status) => info!(adapter = adapter.name(), ?status, "adapter health check"),
        Err(e) => warn!(adapter = adapter.name(), error = %e, "adapter health check failed"),
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins; otherwise every `lookout*` target logs at `log_level`
/// and everything else at `warn`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lookout={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
