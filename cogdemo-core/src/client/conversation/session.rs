use snafu::prelude::*;
use tracing::*;

use crate::{
    analysis::span::validate_span,
    client::{Service, ServiceSession},
    config::{ConfigKey, ServiceConfig},
    consts::*,
    error::*,
};

use super::model::{ConversationPrediction, ConversationResponse, ConversationTask};

/// Conversational language understanding client for one deployed project.
#[derive(Debug)]
pub struct ConversationSession {
    session: ServiceSession,
    project: String,
    deployment: String,
}

impl ConversationSession {
    /// Creates the session. The configuration must name a project and a
    /// deployment.
    pub fn new(config: ServiceConfig) -> Result<Self, CogdemoError> {
        let project = config
            .project()
            .context(MissingConfigSnafu {
                key: ConfigKey::Project,
            })?
            .to_string();
        let deployment = config
            .deployment()
            .context(MissingConfigSnafu {
                key: ConfigKey::Deployment,
            })?
            .to_string();

        info!("conversation project `{project}`, deployment `{deployment}`");

        Ok(Self {
            session: ServiceSession::new(config)?,
            project,
            deployment,
        })
    }
}

impl Service for ConversationSession {
    type Input = str;
    type Request = ConversationTask;
    type Response = ConversationResponse;
    type Output = ConversationPrediction;

    const NAME: &'static str = "analyze-conversation";

    fn session(&self) -> &ServiceSession {
        &self.session
    }

    fn build_request(&self, query: &str) -> Result<ConversationTask, CogdemoError> {
        ensure!(
            !query.trim().is_empty(),
            EmptyInputSnafu {
                what: "conversation query is empty",
            }
        );

        Ok(ConversationTask::new(query, &self.project, &self.deployment))
    }

    fn send(&self, task: ConversationTask) -> Result<ConversationResponse, CogdemoError> {
        self.session.post_json(
            Self::NAME,
            CONVERSATION_PATH,
            &[("api-version", LANGUAGE_API_VERSION)],
            &task,
        )
    }

    fn postprocess(
        &self,
        _query: &str,
        response: ConversationResponse,
    ) -> Result<ConversationPrediction, CogdemoError> {
        let result = response.result;
        let prediction = result.prediction;

        ensure!(
            prediction.project_kind == CONVERSATION_PROJECT_KIND,
            InvalidResponseSnafu {
                stage: Self::NAME,
                message: format!(
                    "unsupported project kind `{}`",
                    prediction.project_kind
                ),
            }
        );

        for entity in &prediction.entities {
            validate_span(Self::NAME, &result.query, entity.offset, entity.length)?;
        }

        debug!(
            top_intent = prediction.top_intent.as_deref().unwrap_or_default(),
            intents = prediction.intents.len(),
            entities = prediction.entities.len(),
            "conversation analyzed"
        );

        Ok(ConversationPrediction {
            query: result.query,
            intents: prediction.intents,
            entities: prediction.entities,
        })
    }
}
