pub mod app;
pub mod logging;
pub mod overlay;
pub mod settings;
pub mod surface;
