use serde::{Deserialize, Serialize};

use crate::{analysis::confidence::Confidence, consts::*, error::CogdemoError};

/// Which entity recognition task to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EntityTask {
    /// Named entities (people, organizations, phone numbers, ...).
    #[default]
    EntityRecognition,
    /// Personally identifiable information, with a redacted copy of the text.
    PiiEntityRecognition,
}

/// Task descriptor posted to `:analyze-text`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisTask {
    pub kind: EntityTask,
    pub parameters: TextParameters,
    pub analysis_input: TextInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextParameters {
    pub model_version: &'static str,
    pub string_index_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextInput {
    pub documents: Vec<TextDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDocument {
    pub id: String,
    pub language: String,
    pub text: String,
}

impl TextAnalysisTask {
    /// Builds the task, numbering documents "1".."n" in input order.
    pub fn new<S: AsRef<str>>(kind: EntityTask, documents: &[S]) -> Self {
        let documents = documents
            .iter()
            .enumerate()
            .map(|(idx, text)| TextDocument {
                id: (idx + 1).to_string(),
                language: DEFAULT_LANGUAGE.to_string(),
                text: text.as_ref().to_string(),
            })
            .collect();

        Self {
            kind,
            parameters: TextParameters {
                model_version: TEXT_MODEL_VERSION,
                string_index_type: STRING_INDEX_TYPE,
            },
            analysis_input: TextInput { documents },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextAnalysisResponse {
    pub kind: String,
    pub results: EntityResults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityResults {
    #[serde(default)]
    pub documents: Vec<EntityDocument>,
    #[serde(default)]
    pub errors: Vec<DocumentError>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDocument {
    pub id: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub redacted_text: Option<String>,
    #[serde(default)]
    pub warnings: Vec<ErrorDetail>,
}

/// A recognized entity inside one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Offset in code points from the start of the document.
    pub offset: usize,
    /// Length in code points.
    pub length: usize,
    pub confidence_score: Confidence,
}

/// A document the service could not analyze.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentError {
    pub id: String,
    pub error: ErrorDetail,
}

impl DocumentError {
    /// Converts the failure into a [`CogdemoError::PartialFailure`], for
    /// callers that log or escalate dropped documents.
    pub fn to_error(&self) -> CogdemoError {
        CogdemoError::PartialFailure {
            id: self.id.clone(),
            code: self.error.code.clone(),
            message: self.error.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// A successfully analyzed document.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedDocument {
    pub id: String,
    /// The submitted text.
    pub text: String,
    pub entities: Vec<Entity>,
    /// Present for PII recognition only.
    pub redacted_text: Option<String>,
}

/// Outcome for one submitted document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentResult {
    Success(RecognizedDocument),
    Error(DocumentError),
}

impl DocumentResult {
    pub fn is_error(&self) -> bool {
        matches!(self, DocumentResult::Error(_))
    }
}

/// Results for every submitted document, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecognition {
    pub kind: EntityTask,
    pub documents: Vec<DocumentResult>,
    pub model_version: Option<String>,
}

impl EntityRecognition {
    /// Documents that were analyzed, with failed ones dropped.
    pub fn successful(&self) -> impl Iterator<Item = &RecognizedDocument> {
        self.documents.iter().filter_map(|doc| match doc {
            DocumentResult::Success(doc) => Some(doc),
            DocumentResult::Error(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &DocumentError> {
        self.documents.iter().filter_map(|doc| match doc {
            DocumentResult::Error(err) => Some(err),
            DocumentResult::Success(_) => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.is_error()).count()
    }

    /// One [`CogdemoError::PartialFailure`] per failed document.
    pub fn failures(&self) -> impl Iterator<Item = CogdemoError> + '_ {
        self.errors().map(DocumentError::to_error)
    }
}
