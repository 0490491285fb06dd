//! Submitting an email for analysis

use std::time::Instant;

use tokio::sync::mpsc::error::TrySendError;

use crate::analysis::AnalysisCommand;

use super::super::App;

impl App {
    /// Start a turn with the input text. No-op while analyzing or for blank input.
    pub(crate) fn submit(&mut self) {
        let Some(turn) = self.state.conversation.submit(&self.state.input.text) else {
            return;
        };

        self.state.input.clear();
        self.state.transcript.snap_to_bottom();
        self.state.status.analyzing_since = Some(Instant::now());
        self.state.status.set_message("Analyzing...");
        tracing::info!(
            turn = turn.id,
            chars = turn.email_text.chars().count(),
            "Submitting email for analysis"
        );

        let command = AnalysisCommand::Analyze {
            turn: turn.id,
            email_text: turn.email_text,
        };
        if let Err(e) = self.analysis.cmd_tx.try_send(command) {
            let reason = match e {
                TrySendError::Full(_) => "queue full",
                TrySendError::Closed(_) => "actor stopped",
            };
            tracing::error!(turn = turn.id, "Failed to dispatch analysis: {}", reason);
            self.state.conversation.resolve_failure(turn.id);
            self.state.status.analyzing_since = None;
            self.state.status.set_message("Analysis failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::AnalysisCommand;
    use crate::app::tests::harness;
    use crate::constants::ANALYSIS_FAILED_MESSAGE;
    use crate::conversation::Role;

    #[test]
    fn test_submit_dispatches_turn_and_clears_input() {
        let mut h = harness();
        h.app.state.input.insert_str("Dear user, verify now");
        h.app.state.transcript.scroll_up(7);

        h.app.submit();

        assert!(h.app.state.input.text.is_empty());
        assert!(h.app.state.conversation.is_analyzing());
        assert!(h.app.state.status.analyzing_since.is_some());
        assert_eq!(h.app.state.transcript.scroll_from_bottom, 0);

        let user = h.app.state.conversation.messages().last().unwrap();
        assert_eq!(user.role, Role::User);

        match h.cmd_rx.try_recv().unwrap() {
            AnalysisCommand::Analyze { turn, email_text } => {
                assert_eq!(turn, user.id);
                assert_eq!(email_text, "Dear user, verify now");
            }
            other => panic!("expected analyze command, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_blank_input_is_noop() {
        let mut h = harness();
        h.app.state.input.insert_str("  \n ");
        h.app.submit();

        assert_eq!(h.app.state.input.text, "  \n ");
        assert!(!h.app.state.conversation.is_analyzing());
        assert!(h.cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_while_analyzing_keeps_input() {
        let mut h = harness();
        h.app.state.input.insert_str("first");
        h.app.submit();
        h.app.state.input.insert_str("second");
        h.app.submit();

        assert_eq!(h.app.state.input.text, "second");
        assert_eq!(h.app.state.conversation.messages().len(), 2);
        assert!(h.cmd_rx.try_recv().is_ok());
        assert!(h.cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_with_stopped_actor_fails_turn() {
        let mut h = harness();
        h.cmd_rx.close();
        h.app.state.input.insert_str("hello");

        h.app.submit();

        assert!(!h.app.state.conversation.is_analyzing());
        assert_eq!(h.app.state.conversation.error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(h.app.state.status.analyzing_since.is_none());
        assert_eq!(h.app.state.conversation.messages().len(), 2);
    }
}
