//! ConversationCoordinator - Handles one inbound turn end to end.
//!
//! A turn reconciles the stored history, consults the classifier and the
//! extractor concurrently, merges evidence, evaluates the phase, persists
//! everything in a single version-checked update, and asks the generator for
//! a reply. Report delivery is spawned out of band once the session is
//! confirmed.
//!
//! Nothing here surfaces as an error to the caller. Each collaborator failure
//! has a degraded path, and a store failure yields the fallback reply.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::adapters::generator::FALLBACK_REPLY;
use crate::application::handlers::report::{CallbackDispatcher, DispatchOutcome};
use crate::domain::engagement::{Classification, Decision, EngagementPolicy, PhaseStateMachine};
use crate::domain::foundation::{SessionId, TurnId};
use crate::domain::intelligence::{ExtractedFacts, IntelligenceAggregator};
use crate::domain::session::{ConversationMetadata, Message, Session, SessionError};
use crate::ports::{
    CollaboratorError, DecisionLog, EngagementContext, IntelligenceExtractor, ReplyGenerator,
    ScamClassifier, SessionStore,
};

pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(5);

/// One inbound message with the context the client sent alongside it.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    pub session_id: SessionId,
    pub message: Message,
    /// Client-held transcript preceding `message`. May be empty.
    pub history: Vec<Message>,
    pub metadata: Option<ConversationMetadata>,
}

impl ProcessTurnCommand {
    pub fn new(session_id: SessionId, message: Message) -> Self {
        Self {
            session_id,
            message,
            history: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_metadata(mut self, metadata: ConversationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Outcome of a turn.
#[derive(Debug)]
pub struct ProcessTurnResult {
    /// Reply for the counterpart. Never empty.
    pub reply: String,
    /// Session as persisted by this turn; `None` when the store failed.
    pub session: Option<Session>,
    /// Delivery task spawned by this turn, if the session became reportable.
    pub dispatch: Option<JoinHandle<DispatchOutcome>>,
}

impl ProcessTurnResult {
    fn fallback() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            session: None,
            dispatch: None,
        }
    }
}

/// Coordinates the per-turn flow across the store, collaborators and dispatcher.
#[derive(Clone)]
pub struct ConversationCoordinator {
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn ScamClassifier>,
    extractor: Arc<dyn IntelligenceExtractor>,
    generator: Arc<dyn ReplyGenerator>,
    dispatcher: CallbackDispatcher,
    aggregator: IntelligenceAggregator,
    machine: PhaseStateMachine,
    collaborator_timeout: Duration,
    decisions: Option<Arc<dyn DecisionLog>>,
}

impl ConversationCoordinator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        classifier: Arc<dyn ScamClassifier>,
        extractor: Arc<dyn IntelligenceExtractor>,
        generator: Arc<dyn ReplyGenerator>,
        dispatcher: CallbackDispatcher,
    ) -> Self {
        Self {
            store,
            classifier,
            extractor,
            generator,
            dispatcher,
            aggregator: IntelligenceAggregator::default(),
            machine: PhaseStateMachine::default(),
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
            decisions: None,
        }
    }

    pub fn with_policy(mut self, policy: EngagementPolicy) -> Self {
        self.machine = PhaseStateMachine::new(policy);
        self
    }

    pub fn with_aggregator(mut self, aggregator: IntelligenceAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Keeps every persisted turn's decision in `log`.
    pub fn with_decision_log(mut self, log: Arc<dyn DecisionLog>) -> Self {
        self.decisions = Some(log);
        self
    }

    /// Deadline applied to each classifier, extractor and generator call.
    pub fn with_collaborator_timeout(mut self, deadline: Duration) -> Self {
        self.collaborator_timeout = deadline;
        self
    }

    pub fn dispatcher(&self) -> &CallbackDispatcher {
        &self.dispatcher
    }

    pub async fn handle(&self, cmd: ProcessTurnCommand) -> ProcessTurnResult {
        let session_id = cmd.session_id.clone();
        let turn_id = TurnId::new();
        tracing::debug!(session_id = %session_id, turn_id = %turn_id, "Turn received");

        // 1. Load or create
        let stored = match self.store.get_or_create(&session_id).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Session store unavailable");
                return ProcessTurnResult::fallback();
            }
        };

        // 2. Reconcile on a private copy to give the collaborators their context
        let mut preview = stored.clone();
        preview.reconcile_history(&cmd.history);
        preview.append_incoming(cmd.message.clone());
        let prior = prior_messages(&preview);

        // 3. Classify and extract concurrently
        let text = cmd.message.text.as_str();
        let (classification, facts) = tokio::join!(
            self.bounded(self.classifier.classify(text, prior)),
            self.bounded(self.extractor.extract(text)),
        );
        let classification = match classification {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Classifier failed; phase left unchanged");
                None
            }
        };
        let facts = facts.unwrap_or_else(|e| {
            tracing::warn!(session_id = %session_id, error = %e, "Extractor failed; no new facts this turn");
            ExtractedFacts::default()
        });

        // 4-5. Merge evidence and evaluate the phase, persisted in one update
        let apply_turn = |s: &mut Session| -> Result<(), SessionError> {
            self.apply_turn(s, &cmd, &facts, classification.as_ref());
            Ok(())
        };
        let persisted = match self.store.update(&session_id, &apply_turn).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Turn could not be persisted");
                return ProcessTurnResult::fallback();
            }
        };

        if persisted.phase() != stored.phase() {
            tracing::info!(
                session_id = %session_id,
                from = %stored.phase(),
                to = %persisted.phase(),
                score = ?classification.map(|c| c.score),
                "Session phase advanced"
            );
        }

        self.record_decision(Decision::from_turn(&stored, &persisted, classification))
            .await;

        // 6. Reply, with the phase as internal context only
        let reply = self.reply(&persisted, &cmd.message).await;

        // 7. Out-of-band report delivery
        let dispatch = persisted
            .is_pending_delivery()
            .then(|| self.dispatcher.spawn_trigger(session_id.clone()));

        tracing::debug!(
            session_id = %session_id,
            turn_id = %turn_id,
            phase = %persisted.phase(),
            total_messages = persisted.total_messages(),
            "Turn processed"
        );

        ProcessTurnResult {
            reply,
            session: Some(persisted),
            dispatch,
        }
    }

    /// Applies one turn to a session. Runs again on a fresh copy whenever the
    /// store retries the update.
    fn apply_turn(
        &self,
        session: &mut Session,
        cmd: &ProcessTurnCommand,
        facts: &ExtractedFacts,
        classification: Option<&Classification>,
    ) {
        session.reconcile_history(&cmd.history);
        session.append_incoming(cmd.message.clone());
        session.set_metadata_if_absent(cmd.metadata.clone());
        self.aggregator.merge(session, facts);
        if let Some(signal) = classification {
            session.observe_score(signal.score);
            self.machine.apply(session, signal);
        }
    }

    async fn record_decision(&self, decision: Decision) {
        tracing::info!(
            target: "honeypot::decisions",
            session_id = %decision.session_id,
            verdict = ?decision.classification.map(|c| c.verdict),
            score = ?decision.classification.map(|c| c.score),
            phase_before = %decision.phase_before,
            phase_after = %decision.phase_after,
            hard_evidence = decision.hard_evidence,
            scammer_turns = decision.scammer_turns,
            "Detection decision"
        );
        if let Some(log) = &self.decisions {
            log.record(decision).await;
        }
    }

    async fn reply(&self, session: &Session, incoming: &Message) -> String {
        let context = EngagementContext {
            phase: session.phase(),
            turn_count: session.total_messages(),
            metadata: session.metadata().cloned(),
        };
        let prior = prior_messages(session);

        match self
            .bounded(self.generator.generate(prior, &incoming.text, &context))
            .await
        {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                tracing::warn!(session_id = %session.session_id(), "Generator returned an empty reply");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(session_id = %session.session_id(), error = %e, "Generator failed; using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Result<T, CollaboratorError> {
        match timeout(self.collaborator_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout(
                self.collaborator_timeout.as_millis() as u64,
            )),
        }
    }
}

/// Messages before the turn's incoming one, which is always last.
fn prior_messages(session: &Session) -> &[Message] {
    let messages = session.messages();
    &messages[..messages.len().saturating_sub(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::callback::RecordingReportSink;
    use crate::adapters::classifier::MockScamClassifier;
    use crate::adapters::extractor::MockIntelligenceExtractor;
    use crate::adapters::generator::MockReplyGenerator;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::report::RetryPolicy;
    use crate::domain::engagement::Verdict;
    use crate::domain::foundation::Timestamp;
    use crate::domain::session::{MessageTimestamp, Phase};
    use crate::ports::SessionMutator;
    use async_trait::async_trait;

    /// Store whose writes always lose the version race; optionally refuses
    /// to load sessions at all.
    struct UnwritableStore {
        inner: InMemorySessionStore,
        unreachable: bool,
    }

    #[async_trait]
    impl SessionStore for UnwritableStore {
        async fn get_or_create(&self, id: &SessionId) -> Result<Session, SessionError> {
            if self.unreachable {
                return Err(SessionError::storage("connection refused"));
            }
            self.inner.get_or_create(id).await
        }

        async fn get(&self, id: &SessionId) -> Result<Session, SessionError> {
            self.inner.get(id).await
        }

        async fn update(
            &self,
            id: &SessionId,
            _mutator: SessionMutator<'_>,
        ) -> Result<Session, SessionError> {
            Err(SessionError::conflict(id, 8))
        }

        async fn delete(&self, id: &SessionId) -> Result<bool, SessionError> {
            self.inner.delete(id).await
        }

        async fn list_pending_delivery(&self) -> Result<Vec<Session>, SessionError> {
            self.inner.list_pending_delivery().await
        }

        async fn list_for_review(&self) -> Result<Vec<Session>, SessionError> {
            self.inner.list_for_review().await
        }

        async fn purge_idle_before(&self, cutoff: Timestamp) -> Result<u64, SessionError> {
            self.inner.purge_idle_before(cutoff).await
        }
    }

    fn coordinator_over(
        store: Arc<dyn SessionStore>,
        generator: MockReplyGenerator,
        sink: RecordingReportSink,
    ) -> ConversationCoordinator {
        ConversationCoordinator::new(
            Arc::clone(&store),
            Arc::new(MockScamClassifier::always_scam()),
            Arc::new(
                MockIntelligenceExtractor::new()
                    .with_default(ExtractedFacts::new().with_upi_id("scammer@upi")),
            ),
            Arc::new(generator),
            CallbackDispatcher::new(store, Arc::new(sink)),
        )
        .with_collaborator_timeout(Duration::from_millis(100))
    }

    struct Harness {
        store: InMemorySessionStore,
        sink: RecordingReportSink,
        generator: MockReplyGenerator,
        coordinator: ConversationCoordinator,
    }

    fn harness(classifier: MockScamClassifier, extractor: MockIntelligenceExtractor) -> Harness {
        harness_with(classifier, extractor, MockReplyGenerator::new())
    }

    fn harness_with(
        classifier: MockScamClassifier,
        extractor: MockIntelligenceExtractor,
        generator: MockReplyGenerator,
    ) -> Harness {
        let store = InMemorySessionStore::new();
        let sink = RecordingReportSink::new();
        let dispatcher = CallbackDispatcher::new(Arc::new(store.clone()), Arc::new(sink.clone()))
            .with_retry_policy(RetryPolicy {
                max_attempts: 2,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(2),
                attempt_timeout: Duration::from_millis(200),
            });
        let coordinator = ConversationCoordinator::new(
            Arc::new(store.clone()),
            Arc::new(classifier),
            Arc::new(extractor),
            Arc::new(generator.clone()),
            dispatcher,
        )
        .with_collaborator_timeout(Duration::from_millis(100));
        Harness {
            store,
            sink,
            generator,
            coordinator,
        }
    }

    fn sid(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    fn scammer(text: &str, at: i64) -> Message {
        Message::from_scammer(text, MessageTimestamp::EpochMillis(at))
    }

    #[tokio::test]
    async fn first_message_creates_session() {
        let h = harness(
            MockScamClassifier::new().with_classification(0.4, Verdict::Suspicious),
            MockIntelligenceExtractor::new(),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(
                sid("first"),
                scammer("Your bank account will be blocked today. Verify immediately.", 1),
            ))
            .await;

        let session = result.session.unwrap();
        assert_eq!(session.total_messages(), 1);
        assert_eq!(session.phase(), Phase::Engaging);
        assert!(!result.reply.is_empty());
        assert!(result.dispatch.is_none());
    }

    #[tokio::test]
    async fn missing_history_suffix_is_appended() {
        let h = harness(MockScamClassifier::new(), MockIntelligenceExtractor::new());
        let history = vec![
            scammer("hello", 1),
            Message::from_user("who is this?", MessageTimestamp::EpochMillis(2)),
            scammer("bank here", 3),
        ];
        h.coordinator
            .handle(ProcessTurnCommand::new(sid("h"), history[0].clone()))
            .await;
        h.coordinator
            .handle(
                ProcessTurnCommand::new(sid("h"), history[1].clone())
                    .with_history(history[..1].to_vec()),
            )
            .await;

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("h"), scammer("send otp", 4)).with_history(history))
            .await;

        assert_eq!(result.session.unwrap().total_messages(), 4);
    }

    #[tokio::test]
    async fn replayed_message_is_not_appended() {
        let h = harness(MockScamClassifier::new(), MockIntelligenceExtractor::new());
        let msg = scammer("hello", 1);

        h.coordinator
            .handle(ProcessTurnCommand::new(sid("replay"), msg.clone()))
            .await;
        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("replay"), msg))
            .await;

        assert_eq!(result.session.unwrap().total_messages(), 1);
    }

    #[tokio::test]
    async fn classifier_failure_keeps_phase_and_message() {
        let h = harness(
            MockScamClassifier::new().with_error(CollaboratorError::unavailable("down")),
            MockIntelligenceExtractor::new(),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("cf"), scammer("urgent", 1)))
            .await;

        let session = result.session.unwrap();
        assert_eq!(session.phase(), Phase::Suspected);
        assert_eq!(session.total_messages(), 1);
        assert!(session.peak_score().is_none());
    }

    #[tokio::test]
    async fn slow_classifier_times_out() {
        let h = harness(
            MockScamClassifier::always_scam().with_delay(Duration::from_millis(500)),
            MockIntelligenceExtractor::new(),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("slow"), scammer("pay now", 1)))
            .await;

        assert_eq!(result.session.unwrap().phase(), Phase::Suspected);
    }

    #[tokio::test]
    async fn extractor_failure_adds_no_facts() {
        let h = harness(
            MockScamClassifier::new().with_classification(0.4, Verdict::Suspicious),
            MockIntelligenceExtractor::new().with_error(CollaboratorError::unavailable("down")),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("ef"), scammer("pay to a@upi", 1)))
            .await;

        let session = result.session.unwrap();
        assert!(session.intelligence().is_empty());
        assert_eq!(session.phase(), Phase::Engaging);
    }

    #[tokio::test]
    async fn generator_failure_falls_back() {
        let h = harness_with(
            MockScamClassifier::new(),
            MockIntelligenceExtractor::new(),
            MockReplyGenerator::new().with_error(CollaboratorError::Timeout(10)),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("gf"), scammer("hi", 1)))
            .await;

        assert_eq!(result.reply, FALLBACK_REPLY);
        assert_eq!(result.session.unwrap().total_messages(), 1);
    }

    #[tokio::test]
    async fn empty_reply_falls_back() {
        let h = harness_with(
            MockScamClassifier::new(),
            MockIntelligenceExtractor::new(),
            MockReplyGenerator::new().with_reply("   "),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("empty"), scammer("hi", 1)))
            .await;

        assert_eq!(result.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn generator_sees_phase_and_metadata() {
        let h = harness(
            MockScamClassifier::new().with_classification(0.45, Verdict::Suspicious),
            MockIntelligenceExtractor::new(),
        );
        let metadata = ConversationMetadata {
            channel: Some("SMS".into()),
            language: Some("English".into()),
            locale: Some("IN".into()),
        };

        h.coordinator
            .handle(
                ProcessTurnCommand::new(sid("ctx"), scammer("verify kyc", 1))
                    .with_metadata(metadata.clone()),
            )
            .await;

        let calls = h.generator.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].phase, Phase::Engaging);
        assert_eq!(calls[0].turn_count, 1);
        assert_eq!(calls[0].metadata, Some(metadata));
    }

    #[tokio::test]
    async fn confirmed_session_is_reported_once() {
        let h = harness(
            MockScamClassifier::always_scam(),
            MockIntelligenceExtractor::new()
                .with_default(ExtractedFacts::new().with_upi_id("scammer@upi")),
        );

        let result = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("conf"), scammer("pay scammer@upi", 1)))
            .await;

        assert_eq!(result.session.as_ref().unwrap().phase(), Phase::Confirmed);
        let outcome = result.dispatch.expect("dispatch spawned").await.unwrap();
        assert!(outcome.is_delivered());

        let later = h
            .coordinator
            .handle(ProcessTurnCommand::new(sid("conf"), scammer("did you pay?", 2)))
            .await;
        assert!(later.dispatch.is_none());

        let session = h.store.get(&sid("conf")).await.unwrap();
        assert!(session.callback_sent());
        assert_eq!(session.phase(), Phase::Reported);
        assert_eq!(h.sink.delivered_count(), 1);
        assert_eq!(
            h.sink.delivered()[0].extracted_intelligence.upi_ids,
            vec!["scammer@upi"]
        );
    }

    #[tokio::test]
    async fn update_conflict_yields_fallback_reply() {
        let generator = MockReplyGenerator::new().with_reply("Which bank?");
        let sink = RecordingReportSink::new();
        let inner = InMemorySessionStore::new();
        let coordinator = coordinator_over(
            Arc::new(UnwritableStore {
                inner: inner.clone(),
                unreachable: false,
            }),
            generator.clone(),
            sink.clone(),
        );

        let result = coordinator
            .handle(ProcessTurnCommand::new(sid("cas"), scammer("pay scammer@upi now", 1)))
            .await;

        assert_eq!(result.reply, FALLBACK_REPLY);
        assert!(result.session.is_none());
        assert!(result.dispatch.is_none());
        assert_eq!(generator.call_count(), 0);
        assert_eq!(sink.attempt_count(), 0);
        let stored = inner.get(&sid("cas")).await.unwrap();
        assert_eq!(stored.total_messages(), 0);
        assert_eq!(stored.phase(), Phase::Suspected);
    }

    #[tokio::test]
    async fn unreachable_store_yields_fallback_reply() {
        let generator = MockReplyGenerator::new().with_reply("Which bank?");
        let coordinator = coordinator_over(
            Arc::new(UnwritableStore {
                inner: InMemorySessionStore::new(),
                unreachable: true,
            }),
            generator.clone(),
            RecordingReportSink::new(),
        );

        let result = coordinator
            .handle(ProcessTurnCommand::new(sid("down"), scammer("hello", 1)))
            .await;

        assert_eq!(result.reply, FALLBACK_REPLY);
        assert!(result.session.is_none());
        assert!(result.dispatch.is_none());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn every_persisted_turn_is_logged_as_a_decision() {
        use crate::adapters::decisions::InMemoryDecisionLog;
        use crate::ports::DecisionLog;

        let log = InMemoryDecisionLog::new();
        let classifier = MockScamClassifier::new()
            .with_classification(0.45, Verdict::Suspicious)
            .with_error(CollaboratorError::unavailable("down"));
        let h = harness(classifier, MockIntelligenceExtractor::new());
        let coordinator = h
            .coordinator
            .clone()
            .with_decision_log(Arc::new(log.clone()));

        coordinator
            .handle(ProcessTurnCommand::new(sid("dl"), scammer("verify your account", 1)))
            .await;
        coordinator
            .handle(ProcessTurnCommand::new(sid("dl"), scammer("hello?", 2)))
            .await;

        let recent = log.recent(10).await;
        assert_eq!(recent.len(), 2);
        assert!(recent[0].classification.is_none());
        assert_eq!(recent[0].phase_after, Phase::Engaging);
        assert_eq!(recent[1].phase_before, Phase::Suspected);
        assert_eq!(recent[1].phase_after, Phase::Engaging);

        let stats = log.stats().await;
        assert_eq!(stats.classifier_failures, 1);
        assert_eq!(stats.by_verdict.get("suspicious"), Some(&1));
        assert_eq!(stats.phase_changes, 1);
    }
}
