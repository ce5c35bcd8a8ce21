//! Terminal host: ratatui adapter for the heatmap and the interactive app

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::run;
