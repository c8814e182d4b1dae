use std::collections::HashMap;

use snafu::prelude::*;
use tracing::*;

use crate::{
    analysis::span::validate_span,
    client::{Service, ServiceSession},
    config::ServiceConfig,
    consts::*,
    error::*,
};

use super::model::{
    DocumentResult, EntityRecognition, EntityTask, RecognizedDocument, TextAnalysisResponse,
    TextAnalysisTask,
};

/// Text analytics client running entity (or PII entity) recognition.
#[derive(Debug)]
pub struct EntitySession {
    session: ServiceSession,
    task: EntityTask,
}

impl EntitySession {
    pub fn new(config: ServiceConfig, task: EntityTask) -> Result<Self, CogdemoError> {
        Ok(Self {
            session: ServiceSession::new(config)?,
            task,
        })
    }
}

impl Service for EntitySession {
    type Input = [String];
    type Request = TextAnalysisTask;
    type Response = TextAnalysisResponse;
    type Output = EntityRecognition;

    const NAME: &'static str = "recognize-entities";

    fn session(&self) -> &ServiceSession {
        &self.session
    }

    fn build_request(&self, documents: &[String]) -> Result<TextAnalysisTask, CogdemoError> {
        ensure!(
            !documents.is_empty(),
            EmptyInputSnafu {
                what: "no documents given",
            }
        );

        Ok(TextAnalysisTask::new(self.task, documents))
    }

    fn send(&self, task: TextAnalysisTask) -> Result<TextAnalysisResponse, CogdemoError> {
        debug!(
            documents = task.analysis_input.documents.len(),
            "submitting {:?}", task.kind
        );

        self.session.post_json(
            Self::NAME,
            TEXT_ANALYSIS_PATH,
            &[("api-version", LANGUAGE_API_VERSION)],
            &task,
        )
    }

    /// Merges the `documents` and `errors` arrays back into submission
    /// order. Failed documents are kept as [`DocumentResult::Error`] and
    /// never fail the call, even when none succeeded.
    fn postprocess(
        &self,
        documents: &[String],
        response: TextAnalysisResponse,
    ) -> Result<EntityRecognition, CogdemoError> {
        let results = response.results;

        let mut recognized: HashMap<_, _> = results
            .documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();
        let mut errors: HashMap<_, _> = results
            .errors
            .into_iter()
            .map(|err| (err.id.clone(), err))
            .collect();

        let mut merged = Vec::with_capacity(documents.len());
        for (idx, text) in documents.iter().enumerate() {
            let id = (idx + 1).to_string();

            if let Some(doc) = recognized.remove(&id) {
                for entity in &doc.entities {
                    validate_span(Self::NAME, text, entity.offset, entity.length)?;
                }
                for warning in &doc.warnings {
                    warn!(document = %id, code = %warning.code, "{}", warning.message);
                }
                merged.push(DocumentResult::Success(RecognizedDocument {
                    id,
                    text: text.clone(),
                    entities: doc.entities,
                    redacted_text: doc.redacted_text,
                }));
            } else if let Some(err) = errors.remove(&id) {
                debug!(document = %id, code = %err.error.code, "document failed");
                merged.push(DocumentResult::Error(err));
            } else {
                return InvalidResponseSnafu {
                    stage: Self::NAME,
                    message: format!("no result for document {id}"),
                }
                .fail();
            }
        }

        let recognition = EntityRecognition {
            kind: self.task,
            documents: merged,
            model_version: results.model_version,
        };

        let total = recognition.documents.len();
        info!(
            "{} of {} documents recognized",
            total - recognition.error_count(),
            total
        );
        Ok(recognition)
    }
}
