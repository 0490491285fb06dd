//! Analysis actor for running email analyses off the UI thread

use tokio::sync::mpsc;

use super::client::{Analyzer, GenerativeService};
use super::types::AnalysisResult;
use crate::constants::ANALYSIS_CHANNEL_CAPACITY;
use crate::conversation::MessageId;

/// Commands that can be sent to the analysis actor
#[derive(Debug)]
pub enum AnalysisCommand {
    /// Analyze one submitted email; `turn` is the id of the user's message
    Analyze { turn: MessageId, email_text: String },
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the analysis actor. Exactly one per `Analyze` command.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    Completed {
        turn: MessageId,
        result: AnalysisResult,
    },
    /// Detail is for the log only
    Failed { turn: MessageId, error: String },
}

/// Handle for communicating with the analysis actor
pub struct AnalysisActorHandle {
    pub cmd_tx: mpsc::Sender<AnalysisCommand>,
    pub event_rx: mpsc::Receiver<AnalysisEvent>,
}

/// Spawn the analysis actor task
pub fn spawn_analysis_actor<S>(analyzer: Analyzer<S>) -> AnalysisActorHandle
where
    S: GenerativeService + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(ANALYSIS_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(ANALYSIS_CHANNEL_CAPACITY);

    tokio::spawn(analysis_actor_loop(analyzer, cmd_rx, event_tx));

    AnalysisActorHandle { cmd_tx, event_rx }
}

async fn analysis_actor_loop<S: GenerativeService>(
    analyzer: Analyzer<S>,
    mut cmd_rx: mpsc::Receiver<AnalysisCommand>,
    event_tx: mpsc::Sender<AnalysisEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AnalysisCommand::Analyze { turn, email_text } => {
                tracing::debug!(turn, chars = email_text.chars().count(), "Analysis started");

                let event = match analyzer.analyze(&email_text).await {
                    Ok(result) => {
                        tracing::info!(
                            turn,
                            score = result.risk_score,
                            level = %result.risk_level,
                            red_flags = result.red_flags.len(),
                            "Analysis completed"
                        );
                        AnalysisEvent::Completed { turn, result }
                    }
                    Err(e) => {
                        tracing::error!(turn, "Analysis failed: {}", e);
                        AnalysisEvent::Failed {
                            turn,
                            error: e.to_string(),
                        }
                    }
                };
                if event_tx.send(event).await.is_err() {
                    tracing::warn!("Analysis actor: event receiver dropped");
                    break;
                }
            }

            AnalysisCommand::Shutdown => {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskLevel;
    use crate::analysis::client::tests::{FakeReply, FakeService, SCENARIO_PAYLOAD};

    #[tokio::test]
    async fn test_actor_emits_completed_for_turn() {
        let analyzer = Analyzer::new(
            FakeService::new(FakeReply::Text(SCENARIO_PAYLOAD.to_string())),
            0.1,
        );
        let mut handle = spawn_analysis_actor(analyzer);

        handle
            .cmd_tx
            .send(AnalysisCommand::Analyze {
                turn: 7,
                email_text: "verify now".to_string(),
            })
            .await
            .unwrap();

        match handle.event_rx.recv().await.unwrap() {
            AnalysisEvent::Completed { turn, result } => {
                assert_eq!(turn, 7);
                assert_eq!(result.risk_level, RiskLevel::Critical);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_actor_emits_single_failure() {
        let analyzer = Analyzer::new(FakeService::new(FakeReply::Fail("offline".into())), 0.1);
        let mut handle = spawn_analysis_actor(analyzer);

        handle
            .cmd_tx
            .send(AnalysisCommand::Analyze {
                turn: 3,
                email_text: "hello".to_string(),
            })
            .await
            .unwrap();
        handle.cmd_tx.send(AnalysisCommand::Shutdown).await.unwrap();

        match handle.event_rx.recv().await.unwrap() {
            AnalysisEvent::Failed { turn, error } => {
                assert_eq!(turn, 3);
                assert!(error.contains("offline"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        // Actor exits after shutdown and drops its sender
        assert!(handle.event_rx.recv().await.is_none());
    }
}
