use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(DepartamentoId);

/// A persisted catalog record. Only records returned by the service carry an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departamento {
    pub id: DepartamentoId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Departamento {
    pub fn descripcion_or_empty(&self) -> &str {
        self.descripcion.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("nombre is required")]
    NombreRequired,
}

/// Write body for create and update: `{ nombre, descripcion }`. An empty
/// `descripcion` is sent as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartamentoPayload {
    nombre: String,
    descripcion: String,
}

impl DepartamentoPayload {
    pub fn new(
        nombre: impl Into<String>,
        descripcion: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        let nombre = nombre.into().trim().to_string();
        if nombre.is_empty() {
            return Err(PayloadError::NombreRequired);
        }
        Ok(Self {
            nombre,
            descripcion: descripcion.into(),
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn descripcion(&self) -> &str {
        &self.descripcion
    }

    pub fn into_record(self, id: DepartamentoId) -> Departamento {
        Departamento {
            id,
            nombre: self.nombre,
            descripcion: Some(self.descripcion),
        }
    }
}
