//! Application core - owns the conversation and coordinates input, analysis and rendering

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;

use render_thread::RenderThread;

use crate::analysis::{AnalysisActorHandle, AnalysisCommand};
use crate::config::Config;
use crate::input::KeyBindings;
use state::AppState;

pub struct App {
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Analysis actor handle; one command per submitted turn
    pub(crate) analysis: AnalysisActorHandle,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    pub fn new(config: &Config, analysis: AnalysisActorHandle) -> Self {
        Self {
            state: AppState::new(&config.ai.model, &config.ui.time_format),
            bindings: KeyBindings::new(),
            analysis,
            dirty: true, // Start dirty for initial render
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        // Run event loop
        let result = self.event_loop(&render_thread);

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        // An in-flight analysis is abandoned; its result has nowhere to go
        if self
            .analysis
            .cmd_tx
            .send(AnalysisCommand::Shutdown)
            .await
            .is_err()
        {
            tracing::debug!("Analysis actor already stopped");
        }

        result
    }
}
