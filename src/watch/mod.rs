pub mod app;
pub mod events;
