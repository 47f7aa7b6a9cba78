//! Service calls described as data so the screen never awaits anything itself.

use shared::domain::{Departamento, DepartamentoId, DepartamentoPayload};
use tracing::info;

use crate::{error::RemoteError, service::RemoteCatalogService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOp {
    List,
    Create(DepartamentoPayload),
    Update(DepartamentoId, DepartamentoPayload),
    Delete(DepartamentoId),
}

impl ServiceOp {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceOp::List => "list",
            ServiceOp::Create(_) => "create",
            ServiceOp::Update(..) => "update",
            ServiceOp::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub op: ServiceOp,
}

#[derive(Debug)]
pub enum ServiceOutcome {
    Listed(Result<Vec<Departamento>, RemoteError>),
    Created(Result<Departamento, RemoteError>),
    Updated(Result<Departamento, RemoteError>),
    Deleted(Result<(), RemoteError>),
}

#[derive(Debug)]
pub struct ServiceResponse {
    pub request: RequestId,
    pub outcome: ServiceOutcome,
}

pub async fn execute(
    service: &dyn RemoteCatalogService,
    request: ServiceRequest,
) -> ServiceResponse {
    let op_name = request.op.name();
    let outcome = match request.op {
        ServiceOp::List => ServiceOutcome::Listed(service.list().await),
        ServiceOp::Create(payload) => ServiceOutcome::Created(service.create(&payload).await),
        ServiceOp::Update(id, payload) => {
            ServiceOutcome::Updated(service.update(id, &payload).await)
        }
        ServiceOp::Delete(id) => ServiceOutcome::Deleted(service.delete(id).await),
    };
    info!(
        request = request.id.0,
        op = op_name,
        ok = outcome.is_ok(),
        "catalog request completed"
    );
    ServiceResponse {
        request: request.id,
        outcome,
    }
}

impl ServiceResponse {
    /// A failed completion for a request that never reached the service.
    pub fn failure(request: &ServiceRequest, err: RemoteError) -> Self {
        let outcome = match request.op {
            ServiceOp::List => ServiceOutcome::Listed(Err(err)),
            ServiceOp::Create(_) => ServiceOutcome::Created(Err(err)),
            ServiceOp::Update(..) => ServiceOutcome::Updated(Err(err)),
            ServiceOp::Delete(_) => ServiceOutcome::Deleted(Err(err)),
        };
        Self {
            request: request.id,
            outcome,
        }
    }
}

impl ServiceOutcome {
    pub fn is_ok(&self) -> bool {
        match self {
            ServiceOutcome::Listed(result) => result.is_ok(),
            ServiceOutcome::Created(result) | ServiceOutcome::Updated(result) => result.is_ok(),
            ServiceOutcome::Deleted(result) => result.is_ok(),
        }
    }
}
