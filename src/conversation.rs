//! Conversation store: the ordered transcript and the analysis phase
//!
//! This is the only state machine in the application. Messages are
//! append-only; the phase is `Idle` or `Analyzing` with the pending turn;
//! the error is independent of the phase.

use chrono::{DateTime, Local};

use crate::analysis::AnalysisResult;
use crate::constants::{ANALYSIS_FAILED_MESSAGE, WELCOME_MESSAGE};

/// Identifier of a message, unique within one conversation.
/// The id of a user message doubles as the id of its turn.
pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Submitted text for user messages and result messages, welcome text otherwise
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Only present on assistant messages that completed an analysis
    pub analysis: Option<AnalysisResult>,
}

/// A submitted turn waiting for the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub id: MessageId,
    pub email_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing(PendingTurn),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    phase: Phase,
    error: Option<String>,
    next_id: MessageId,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation seeded with the welcome message.
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            error: None,
            next_id: 0,
        };
        conversation.push(Role::Assistant, WELCOME_MESSAGE.to_string(), None);
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing(_))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `submit(text)` would start a turn.
    pub fn can_submit(&self, text: &str) -> bool {
        !self.is_analyzing() && !text.trim().is_empty()
    }

    /// Append the user's message and enter `Analyzing`.
    ///
    /// Returns the turn to dispatch, or `None` (with no state change) when a
    /// turn is already in flight or the text is blank.
    pub fn submit(&mut self, text: &str) -> Option<PendingTurn> {
        if !self.can_submit(text) {
            return None;
        }

        let id = self.push(Role::User, text.to_string(), None);
        let turn = PendingTurn {
            id,
            email_text: text.to_string(),
        };
        self.error = None;
        self.phase = Phase::Analyzing(turn.clone());
        Some(turn)
    }

    /// Complete the in-flight turn with a result.
    ///
    /// Returns false and changes nothing if `turn` is not the pending turn.
    pub fn resolve_success(&mut self, turn: MessageId, result: AnalysisResult) -> bool {
        let Some(pending) = self.take_pending(turn) else {
            return false;
        };
        self.push(Role::Assistant, pending.email_text, Some(result));
        true
    }

    /// Fail the in-flight turn. No message is appended; the user's message stays last.
    ///
    /// Returns false and changes nothing if `turn` is not the pending turn.
    pub fn resolve_failure(&mut self, turn: MessageId) -> bool {
        if self.take_pending(turn).is_none() {
            return false;
        }
        self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn take_pending(&mut self, turn: MessageId) -> Option<PendingTurn> {
        if !matches!(&self.phase, Phase::Analyzing(pending) if pending.id == turn) {
            return None;
        }
        match std::mem::take(&mut self.phase) {
            Phase::Analyzing(pending) => Some(pending),
            Phase::Idle => None,
        }
    }

    fn push(
        &mut self,
        role: Role,
        content: String,
        analysis: Option<AnalysisResult>,
    ) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: Local::now(),
            analysis,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{RedFlag, RiskLevel, Severity};

    const PHISH: &str = "Dear user, verify your account at http://bit.ly/xyz now!!!";

    fn critical_result() -> AnalysisResult {
        AnalysisResult {
            risk_score: 92,
            risk_level: RiskLevel::Critical,
            summary: "Classic credential phishing.".to_string(),
            red_flags: vec![RedFlag {
                category: "Urgency".to_string(),
                description: "Demands immediate action.".to_string(),
                severity: Severity::High,
            }],
            sender_analysis: "Generic greeting, no sender identity.".to_string(),
            link_analysis: "Shortened URL hides the destination.".to_string(),
            tone_analysis: "Pressure through exclamation marks.".to_string(),
            recommendations: vec![
                "Do not click the link".to_string(),
                "Report to IT".to_string(),
            ],
        }
    }

    #[test]
    fn test_seeded_conversation() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        let welcome = &conversation.messages()[0];
        assert_eq!(welcome.role, Role::Assistant);
        assert_eq!(welcome.content, WELCOME_MESSAGE);
        assert!(welcome.analysis.is_none());
        assert!(!conversation.is_analyzing());
        assert!(conversation.error().is_none());
    }

    #[test]
    fn test_submit_enters_analyzing() {
        let mut conversation = Conversation::new();
        let turn = conversation.submit(PHISH).unwrap();

        assert!(conversation.is_analyzing());
        assert_eq!(conversation.messages().len(), 2);
        let last = conversation.messages().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, PHISH);
        assert_eq!(last.id, turn.id);
        assert_eq!(turn.email_text, PHISH);
        assert_eq!(conversation.phase(), &Phase::Analyzing(turn));
    }

    #[test]
    fn test_submit_rejects_blank_text() {
        let mut conversation = Conversation::new();
        assert!(conversation.submit("").is_none());
        assert!(conversation.submit("   \n\t  ").is_none());
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_analyzing());
    }

    #[test]
    fn test_submit_is_noop_while_analyzing() {
        let mut conversation = Conversation::new();
        conversation.submit(PHISH).unwrap();
        assert!(conversation.submit("second email").is_none());
        assert_eq!(conversation.messages().len(), 2);
        assert!(!conversation.can_submit("second email"));
    }

    #[test]
    fn test_submit_keeps_text_verbatim() {
        let mut conversation = Conversation::new();
        let text = "  From: ceo@example.com\n\nWire the money today.  \n";
        let turn = conversation.submit(text).unwrap();
        assert_eq!(turn.email_text, text);
        assert_eq!(conversation.messages()[1].content, text);
    }

    #[test]
    fn test_resolve_success_appends_result() {
        let mut conversation = Conversation::new();
        let turn = conversation.submit(PHISH).unwrap();

        assert!(conversation.resolve_success(turn.id, critical_result()));

        assert!(!conversation.is_analyzing());
        assert_eq!(conversation.messages().len(), 3);
        let reply = conversation.messages().last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, PHISH);
        let analysis = reply.analysis.as_ref().unwrap();
        assert_eq!(analysis.risk_score, 92);
        assert_eq!(analysis.red_flags.len(), 1);
        assert_eq!(analysis, &critical_result());
    }

    #[test]
    fn test_resolve_failure_sets_error_without_message() {
        let mut conversation = Conversation::new();
        let turn = conversation.submit(PHISH).unwrap();

        assert!(conversation.resolve_failure(turn.id));

        assert!(!conversation.is_analyzing());
        assert_eq!(conversation.error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages().last().unwrap().role, Role::User);
    }

    #[test]
    fn test_dismiss_error_after_failure() {
        let mut conversation = Conversation::new();
        let turn = conversation.submit(PHISH).unwrap();
        conversation.resolve_failure(turn.id);
        let before = conversation.messages().to_vec();

        conversation.dismiss_error();

        assert!(conversation.error().is_none());
        assert_eq!(conversation.messages(), before.as_slice());
        assert!(!conversation.is_analyzing());
    }

    #[test]
    fn test_dismiss_error_is_idempotent() {
        let mut conversation = Conversation::new();
        conversation.dismiss_error();
        conversation.dismiss_error();
        assert!(conversation.error().is_none());
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_analyzing());
    }

    #[test]
    fn test_new_submit_clears_previous_error() {
        let mut conversation = Conversation::new();
        let turn = conversation.submit(PHISH).unwrap();
        conversation.resolve_failure(turn.id);
        assert!(conversation.error().is_some());

        conversation.submit(PHISH).unwrap();
        assert!(conversation.error().is_none());
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn test_resolution_for_unknown_turn_is_ignored() {
        let mut conversation = Conversation::new();
        assert!(!conversation.resolve_success(0, critical_result()));
        assert!(!conversation.resolve_failure(0));
        assert_eq!(conversation.messages().len(), 1);
        assert!(conversation.error().is_none());

        let turn = conversation.submit(PHISH).unwrap();
        assert!(!conversation.resolve_success(turn.id + 100, critical_result()));
        assert!(conversation.is_analyzing());

        // A turn resolves once
        assert!(conversation.resolve_success(turn.id, critical_result()));
        assert!(!conversation.resolve_failure(turn.id));
        assert!(conversation.error().is_none());
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut conversation = Conversation::new();
        for _ in 0..3 {
            let turn = conversation.submit(PHISH).unwrap();
            conversation.resolve_success(turn.id, critical_result());
        }
        let ids: std::collections::HashSet<_> =
            conversation.messages().iter().map(|m| m.id).collect();
        assert_eq!(conversation.messages().len(), 7);
        assert_eq!(ids.len(), 7);
    }
}
