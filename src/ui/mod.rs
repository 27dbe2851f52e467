// UI - eframe/egui presentation surface

pub mod app;

pub use app::PianoApp;
