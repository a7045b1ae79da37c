pub mod dashboard;
pub mod draw;
pub mod events;
pub mod run;
pub mod state;

pub use run::run_tui;
