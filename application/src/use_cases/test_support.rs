//! In-memory port implementations shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::synthesis_gateway::{GatewayError, SynthesisGateway};
use async_trait::async_trait;
use council_domain::{ConversationSummary, PersistedRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MemoryStore {
    pub records: Mutex<HashMap<String, PersistedRecord>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn insert(&self, record: PersistedRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn stored(&self, id: &str) -> Option<PersistedRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<PersistedRecord>, StoreError> {
        Ok(self.stored(id))
    }

    async fn put(&self, record: &PersistedRecord) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.insert(record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().unwrap().remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .map(PersistedRecord::summary)
            .collect())
    }
}

pub enum Reply {
    Text(String),
    Fail(String),
    Hang,
}

pub struct ScriptedGateway {
    pub model: String,
    pub reply: Reply,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(model: &str, reply: Reply) -> Self {
        Self {
            model: model.to_string(),
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new("chairman", Reply::Text(text.to_string()))
    }
}

#[async_trait]
impl SynthesisGateway for ScriptedGateway {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(GatewayError::RequestFailed(message.clone())),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
