//! Backend commands queued from UI to backend worker.

use client_core::ServiceRequest;

#[derive(Debug)]
pub enum BackendCommand {
    Execute(ServiceRequest),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute(request) => request.op.name(),
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
