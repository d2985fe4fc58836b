//! Run Synthesis use case
//!
//! Final stage of the council flow: the chairman model writes one answer
//! from all candidate answers and peer reviews, the peer rankings are
//! aggregated into a leaderboard, and the completed session is auto-saved.

use crate::config::CouncilConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::conversation_store::ConversationStore;
use crate::ports::progress::{NoProgress, ProgressNotifier, SynthesisStep};
use crate::ports::synthesis_gateway::{GatewayError, SynthesisGateway};
use crate::use_cases::save_conversation::SaveConversationUseCase;
use council_domain::council::MAX_LABELS;
use council_domain::{
    CandidateAnswer, DomainError, PromptTemplate, Review, SessionRecord, SynthesisResult,
    aggregate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a synthesis request
#[derive(Error, Debug)]
pub enum RunSynthesisError {
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the RunSynthesis use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSynthesisInput {
    /// Conversation to save under; a fresh id is generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    /// Stage 1 answers, in label order
    #[serde(default)]
    pub stage1_responses: Vec<CandidateAnswer>,
    /// Stage 2 peer reviews
    #[serde(default)]
    pub stage2_reviews: Vec<Review>,
}

impl RunSynthesisInput {
    pub fn new(question: impl Into<String>, answers: Vec<CandidateAnswer>) -> Self {
        Self {
            id: None,
            question: question.into(),
            stage1_responses: answers,
            stage2_reviews: Vec::new(),
        }
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.stage2_reviews = reviews;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check the request can be labelled and answered.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        match self.stage1_responses.len() {
            0 => Err(DomainError::NoCandidates),
            count if count > MAX_LABELS => Err(DomainError::TooManyCandidates { count }),
            _ => Ok(()),
        }
    }

    /// Session state once `synthesis` is known.
    fn into_session(self, synthesis: SynthesisResult) -> SessionRecord {
        let mut session = SessionRecord::new(self.question)
            .with_answers(self.stage1_responses)
            .with_reviews(self.stage2_reviews)
            .with_synthesis(synthesis);
        session.id = self.id;
        session
    }
}

/// Result of a synthesis request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisOutcome {
    /// Id the completed conversation was saved under, if it was saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(flatten)]
    pub result: SynthesisResult,
}

/// Use case for running the final synthesis
pub struct RunSynthesisUseCase<G: SynthesisGateway + ?Sized, S: ConversationStore + ?Sized> {
    gateway: Arc<G>,
    store: Arc<S>,
    config: CouncilConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: SynthesisGateway + ?Sized, S: ConversationStore + ?Sized> RunSynthesisUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self {
            gateway,
            store,
            config: CouncilConfig::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_config(mut self, config: CouncilConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunSynthesisInput,
    ) -> Result<SynthesisOutcome, RunSynthesisError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSynthesisInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisOutcome, RunSynthesisError> {
        input.validate()?;

        info!(
            "Starting synthesis with {} answers and {} reviews",
            input.stage1_responses.len(),
            input.stage2_reviews.len()
        );
        self.logger.log(ConversationEvent::new(
            "synthesis_started",
            serde_json::json!({
                "question": input.question,
                "models": input.stage1_responses.iter().map(|a| a.model.as_str()).collect::<Vec<_>>(),
                "reviews": input.stage2_reviews.len(),
                "synthesizer": self.gateway.model(),
            }),
        ));

        // Step 1: Chairman synthesis
        progress.on_step_start(SynthesisStep::Synthesize);
        let final_answer = match self.synthesize(&input).await {
            Ok(text) => {
                progress.on_step_complete(SynthesisStep::Synthesize, true);
                text
            }
            Err(e) => {
                progress.on_step_complete(SynthesisStep::Synthesize, false);
                warn!("Synthesis failed: {}", e);
                return Err(e.into());
            }
        };

        // Step 2: Leaderboard
        progress.on_step_start(SynthesisStep::Aggregate);
        let rankings = aggregate(&input.stage1_responses, &input.stage2_reviews);
        progress.on_step_complete(SynthesisStep::Aggregate, true);
        debug!("Aggregated {} ranked models", rankings.len());

        let result = SynthesisResult::new(final_answer, rankings);
        self.logger.log(ConversationEvent::new(
            "synthesis_completed",
            serde_json::json!({
                "answer_bytes": result.final_answer.len(),
                "aggregate_rankings": result.aggregate_rankings,
            }),
        ));

        // Step 3: Auto-save
        let conversation_id = if self.config.auto_save {
            progress.on_step_start(SynthesisStep::Save);
            let saved = self.auto_save(input.into_session(result.clone())).await;
            progress.on_step_complete(SynthesisStep::Save, saved.is_some());
            saved
        } else {
            None
        };

        Ok(SynthesisOutcome {
            conversation_id,
            result,
        })
    }

    async fn synthesize(&self, input: &RunSynthesisInput) -> Result<String, GatewayError> {
        let prompt = PromptTemplate::synthesis_prompt(
            &input.question,
            &input.stage1_responses,
            &input.stage2_reviews,
        );

        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.complete(&prompt))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => self.gateway.complete(&prompt).await,
        }
    }

    /// Save the completed session. A failed save never fails the request.
    async fn auto_save(&self, session: SessionRecord) -> Option<String> {
        let saver = SaveConversationUseCase::new(Arc::clone(&self.store), self.gateway.model())
            .with_logger(Arc::clone(&self.logger));

        match saver.execute(session).await {
            Ok(view) => Some(view.id),
            Err(e) => {
                warn!("Failed to auto-save conversation: {}", e);
                None
            }
        }
    }
}
