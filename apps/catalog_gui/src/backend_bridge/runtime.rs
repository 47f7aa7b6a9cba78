//! Runtime bridge between the UI command queue and the catalog service.

use std::{sync::Arc, thread};

use client_core::{execute, ClientSettings, HttpCatalogService, RemoteCatalogService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service: Arc<dyn RemoteCatalogService> =
            match HttpCatalogService::from_settings(&settings) {
                Ok(service) => {
                    tracing::info!(base_url = %service.base_url(), "catalog backend ready");
                    Arc::new(service)
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                        "invalid catalog service url '{}': {err}",
                        settings.api_base_url
                    )));
                    tracing::error!("failed to build catalog service: {err}");
                    return;
                }
            };
        let _ = ui_tx.try_send(UiEvent::BackendReady);

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Execute(request) => {
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let response = execute(service.as_ref(), request).await;
                            // The window may already be gone; nobody is left to update.
                            let _ = ui_tx.try_send(UiEvent::Service(response));
                        });
                    }
                    BackendCommand::Shutdown => {
                        tracing::debug!("backend worker shutting down");
                        break;
                    }
                }
            }
        });
    });
}
