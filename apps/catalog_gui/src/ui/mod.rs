pub mod app;
pub mod table;
pub mod toasts;
