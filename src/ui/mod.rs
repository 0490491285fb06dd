mod analysis;
pub mod app;
mod components;
mod status_bar;
pub mod theme;
mod transcript;
mod widgets;

pub use app::{max_transcript_scroll, render};
