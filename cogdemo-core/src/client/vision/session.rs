use std::path::{Path, PathBuf};

use bytes::Bytes;
use snafu::prelude::*;
use tracing::*;

use crate::{
    client::{Service, ServiceSession},
    config::ServiceConfig,
    consts::*,
    error::*,
};

use super::model::{ImageAnalysisResponse, TextAnalysis};

/// Image analysis client reading printed and handwritten text.
#[derive(Debug)]
pub struct VisionSession {
    session: ServiceSession,
}

/// Image bytes ready for upload.
pub struct ImageRequest {
    pub path: PathBuf,
    pub bytes: Bytes,
}

impl VisionSession {
    pub fn new(config: ServiceConfig) -> Result<Self, CogdemoError> {
        Ok(Self {
            session: ServiceSession::new(config)?,
        })
    }
}

impl Service for VisionSession {
    type Input = Path;
    type Request = ImageRequest;
    type Response = ImageAnalysisResponse;
    type Output = TextAnalysis;

    const NAME: &'static str = "read-text";

    fn session(&self) -> &ServiceSession {
        &self.session
    }

    fn build_request(&self, path: &Path) -> Result<ImageRequest, CogdemoError> {
        let bytes = std::fs::read(path).context(IoReadSnafu {
            path: path.to_string_lossy(),
        })?;

        ensure!(
            !bytes.is_empty(),
            EmptyInputSnafu {
                what: format!("image `{}` is empty", path.display()),
            }
        );

        Ok(ImageRequest {
            path: path.to_path_buf(),
            bytes: Bytes::from(bytes),
        })
    }

    fn send(&self, request: ImageRequest) -> Result<ImageAnalysisResponse, CogdemoError> {
        debug!(
            bytes = request.bytes.len(),
            "uploading {}",
            request.path.display()
        );

        self.session.post_binary(
            Self::NAME,
            IMAGE_ANALYSIS_PATH,
            &[
                ("api-version", VISION_API_VERSION),
                ("features", READ_FEATURE),
            ],
            request.bytes,
        )
    }

    fn postprocess(
        &self,
        path: &Path,
        response: ImageAnalysisResponse,
    ) -> Result<TextAnalysis, CogdemoError> {
        let analysis = TextAnalysis::from(response);

        info!(
            lines = analysis.lines.len(),
            words = analysis.word_count(),
            "read text in {}",
            path.display()
        );

        Ok(analysis)
    }
}
