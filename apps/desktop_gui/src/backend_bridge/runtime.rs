//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{fetch_page, ClientSettings, HttpScrapeTransport, ReviewSource, ScrapeTransport};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

struct Backend {
    transport: Arc<dyn ScrapeTransport>,
    source: ReviewSource,
}

impl Backend {
    fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        let source = settings.review_source().with_context(|| {
            format!("invalid review source url '{}'", settings.review_source_url)
        })?;
        let transport =
            HttpScrapeTransport::new(&settings.scrape_endpoint, settings.request_timeout())
                .context("failed to build scrape http client")?;
        Ok(Self {
            transport: Arc::new(transport),
            source,
        })
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let backend = match Backend::from_settings(&settings) {
            Ok(backend) => Arc::new(backend),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("failed to initialize scrape backend: {err:#}");
                return;
            }
        };
        tracing::info!(endpoint = %settings.scrape_endpoint, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = handle_command(&backend, cmd).await;
                    deliver(&ui_tx, event);
                });
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

/// Hands a worker result to the UI without blocking a runtime thread.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event queue is full; dropping worker result");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event receiver dropped; discarding worker result");
            false
        }
    }
}

async fn handle_command(backend: &Backend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchPage(ticket) => {
            let outcome = fetch_page(backend.transport.as_ref(), &backend.source, &ticket).await;
            UiEvent::PageFetched { ticket, outcome }
        }
    }
}
