//! Command orchestration helpers from screen requests to the backend command queue.

use client_core::{RemoteError, ServiceRequest, ServiceResponse};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `request` for the backend worker. When the queue cannot take it, the
/// request is answered locally with a failure so the screen never waits on a
/// completion that will not arrive.
pub fn dispatch_service_request(
    cmd_tx: &Sender<BackendCommand>,
    request: ServiceRequest,
    status: &mut String,
) -> Option<ServiceResponse> {
    let cmd = BackendCommand::Execute(request);
    let cmd_name = cmd.name();

    let (cmd, reason) = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return None;
        }
        Err(TrySendError::Full(cmd)) => (cmd, "UI command queue is full; please retry"),
        Err(TrySendError::Disconnected(cmd)) => (
            cmd,
            "Backend command processor disconnected (possible startup/runtime failure)",
        ),
    };

    *status = reason.to_string();
    tracing::warn!(command = cmd_name, reason, "could not queue backend command");
    match cmd {
        BackendCommand::Execute(request) => Some(ServiceResponse::failure(
            &request,
            RemoteError::Unavailable(reason.to_string()),
        )),
        BackendCommand::Shutdown => None,
    }
}
