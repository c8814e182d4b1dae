use serde::{Deserialize, Serialize};

use crate::{analysis::confidence::Confidence, consts::*};

/// Task descriptor posted to `:analyze-conversations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTask {
    pub kind: &'static str,
    pub analysis_input: ConversationInput,
    pub parameters: ConversationParameters,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInput {
    pub conversation_item: ConversationItem,
    pub is_logging_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationItem {
    pub participant_id: String,
    pub id: String,
    pub modality: String,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationParameters {
    pub project_name: String,
    pub deployment_name: String,
    pub verbose: bool,
    pub string_index_type: &'static str,
}

impl ConversationTask {
    /// Builds the task for a single text utterance with the fixed item
    /// defaults (participant "1", item "1", text modality, English,
    /// logging disabled).
    pub fn new(query: &str, project: &str, deployment: &str) -> Self {
        Self {
            kind: CONVERSATION_PROJECT_KIND,
            analysis_input: ConversationInput {
                conversation_item: ConversationItem {
                    participant_id: PARTICIPANT_ID.to_string(),
                    id: CONVERSATION_ITEM_ID.to_string(),
                    modality: TEXT_MODALITY.to_string(),
                    language: DEFAULT_LANGUAGE.to_string(),
                    text: query.to_string(),
                },
                is_logging_enabled: false,
            },
            parameters: ConversationParameters {
                project_name: project.to_string(),
                deployment_name: deployment.to_string(),
                verbose: true,
                string_index_type: STRING_INDEX_TYPE,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationResponse {
    pub kind: String,
    pub result: ConversationResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationResult {
    pub query: String,
    pub prediction: ConversationPredictionWire,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPredictionWire {
    pub project_kind: String,
    #[serde(default)]
    pub top_intent: Option<String>,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub entities: Vec<ConversationEntity>,
}

/// A classified purpose of the utterance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub category: String,
    pub confidence_score: Confidence,
}

/// A span of the utterance tagged with an entity category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntity {
    pub category: String,
    pub text: String,
    pub offset: usize,
    pub length: usize,
    pub confidence_score: Confidence,
}

/// Result of analyzing one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationPrediction {
    /// The utterance as echoed by the service.
    pub query: String,
    /// Intents ranked by the service, highest confidence first.
    pub intents: Vec<Intent>,
    /// Entities in the order the service returned them.
    pub entities: Vec<ConversationEntity>,
}

impl ConversationPrediction {
    pub fn top_intent(&self) -> Option<&Intent> {
        self.intents.first()
    }
}
