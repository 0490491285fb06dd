//! Main event loop and analysis event processing

use anyhow::Result;
use crossterm::{event, terminal};
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;

use crate::analysis::AnalysisEvent;
use crate::constants::{IDLE_POLL_MS, SPINNER_FRAME_MS};
use crate::conversation::Phase;
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process analysis events first (non-blocking)
            if self.process_analysis_events() {
                self.dirty = true;
            }

            // Keep the spinner moving while a turn is in flight
            let analyzing = self.state.conversation.is_analyzing();
            if analyzing {
                self.dirty = true;
            }

            // Render only when dirty (non-blocking - sends to render thread)
            if self.dirty {
                if let Ok((width, height)) = terminal::size() {
                    self.clamp_scroll(width, height);
                }
                render_thread.render(self.state.clone());
                self.dirty = false;
            }

            // Handle input (faster while the spinner is visible)
            let poll_timeout = if analyzing {
                SPINNER_FRAME_MS
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action),
                    InputResult::Char(c) => self.handle_char(c),
                    InputResult::Paste(text) => self.handle_paste(&text),
                    InputResult::Backspace => self.handle_backspace(),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Apply events from the analysis actor. Returns true if anything changed.
    pub(crate) fn process_analysis_events(&mut self) -> bool {
        let mut had_events = false;
        loop {
            let event = match self.analysis.event_rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The actor died with a turn in flight; fail it rather than spin forever
                    if let Phase::Analyzing(turn) = self.state.conversation.phase().clone() {
                        tracing::error!(turn = turn.id, "Analysis actor stopped unexpectedly");
                        self.state.conversation.resolve_failure(turn.id);
                        self.finish_turn("Analysis failed");
                        had_events = true;
                    }
                    break;
                }
            };

            match event {
                AnalysisEvent::Completed { turn, result } => {
                    let level = result.risk_level;
                    if self.state.conversation.resolve_success(turn, result) {
                        self.finish_turn(format!("Analysis complete: {} risk", level));
                        had_events = true;
                    } else {
                        tracing::warn!(turn, "Ignoring result for a turn that is not pending");
                    }
                }
                AnalysisEvent::Failed { turn, error } => {
                    if self.state.conversation.resolve_failure(turn) {
                        tracing::debug!(turn, "Turn failed: {}", error);
                        self.finish_turn("Analysis failed");
                        had_events = true;
                    } else {
                        tracing::warn!(turn, "Ignoring failure for a turn that is not pending");
                    }
                }
            }
        }
        had_events
    }

    fn finish_turn(&mut self, message: impl ToString) {
        self.state.status.analyzing_since = None;
        self.state.status.set_message(message);
        self.state.transcript.snap_to_bottom();
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::{AnalysisEvent, AnalysisResult, RiskLevel};
    use crate::app::tests::harness;
    use crate::constants::ANALYSIS_FAILED_MESSAGE;
    use crate::conversation::Role;

    fn result(score: u32) -> AnalysisResult {
        AnalysisResult {
            risk_score: score,
            risk_level: RiskLevel::High,
            summary: "Looks like phishing.".to_string(),
            red_flags: Vec::new(),
            sender_analysis: "Spoofed.".to_string(),
            link_analysis: "None.".to_string(),
            tone_analysis: "Urgent.".to_string(),
            recommendations: vec!["Delete it".to_string()],
        }
    }

    #[test]
    fn test_no_events_is_not_dirty() {
        let mut h = harness();
        assert!(!h.app.process_analysis_events());
    }

    #[tokio::test]
    async fn test_completed_event_appends_result() {
        let mut h = harness();
        h.app.state.input.insert_str("Wire $5000 today");
        h.app.submit();
        let turn = h.app.state.conversation.messages().last().unwrap().id;
        h.app.state.transcript.scroll_up(4);

        h.event_tx
            .send(AnalysisEvent::Completed {
                turn,
                result: result(80),
            })
            .await
            .unwrap();

        assert!(h.app.process_analysis_events());
        assert!(!h.app.state.conversation.is_analyzing());
        assert!(h.app.state.status.analyzing_since.is_none());
        assert_eq!(h.app.state.status.message, "Analysis complete: HIGH risk");
        assert_eq!(h.app.state.transcript.scroll_from_bottom, 0);

        let reply = h.app.state.conversation.messages().last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Wire $5000 today");
        assert_eq!(reply.analysis.as_ref().unwrap().risk_score, 80);
    }

    #[tokio::test]
    async fn test_failed_event_sets_error() {
        let mut h = harness();
        h.app.state.input.insert_str("hello");
        h.app.submit();
        let turn = h.app.state.conversation.messages().last().unwrap().id;

        h.event_tx
            .send(AnalysisEvent::Failed {
                turn,
                error: "transport failure: 403".to_string(),
            })
            .await
            .unwrap();

        assert!(h.app.process_analysis_events());
        assert_eq!(h.app.state.conversation.error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert_eq!(h.app.state.conversation.messages().len(), 2);
        assert!(h.app.state.input.text.is_empty());
    }

    #[tokio::test]
    async fn test_stale_event_is_ignored() {
        let mut h = harness();
        h.event_tx
            .send(AnalysisEvent::Completed {
                turn: 99,
                result: result(10),
            })
            .await
            .unwrap();

        assert!(!h.app.process_analysis_events());
        assert_eq!(h.app.state.conversation.messages().len(), 1);
    }

    #[test]
    fn test_actor_disconnect_fails_pending_turn() {
        let mut h = harness();
        h.app.state.input.insert_str("hello");
        h.app.submit();
        drop(h.event_tx);

        assert!(h.app.process_analysis_events());
        assert!(!h.app.state.conversation.is_analyzing());
        assert_eq!(h.app.state.conversation.error(), Some(ANALYSIS_FAILED_MESSAGE));
    }
}
