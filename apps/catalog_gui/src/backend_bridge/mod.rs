//! Backend bridge: command queue types and the worker that runs service calls.

pub mod commands;
pub mod runtime;
