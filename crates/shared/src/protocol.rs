use serde::{Deserialize, Serialize};

use crate::domain::Departamento;

/// Envelope returned by `GET /departamentos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Departamento>,
}

pub const DEPARTAMENTOS_PATH: &str = "departamentos";

pub mod messages {
    pub const RECORD_UPDATED: &str = "Registro Actualizado!";
    pub const RECORD_CREATED: &str = "Registro Agregado!";
    pub const RECORD_DELETED: &str = "Registro eliminado con éxito!";
    pub const WRITE_FAILED: &str = "Ocurrió un problema!";
    pub const DELETE_FAILED: &str = "Error al eliminar el registro";
    pub const CONFIRM_DELETE: &str = "¿Seguro que deseas eliminar este registro?";
    pub const CONFIRM_YES: &str = "Sí";
    pub const CONFIRM_NO: &str = "No";
}
