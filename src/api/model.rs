use serde::{Deserialize, Serialize};

use crate::core::GroundingChunk;
use crate::error::{LensResult, RequestKind};

/// One outbound generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub kind: RequestKind,
    pub prompt: String,
    pub search_grounding: bool,
}

impl ModelRequest {
    #[must_use]
    pub fn new(kind: RequestKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            search_grounding: true,
        }
    }

    #[must_use]
    pub fn with_search_grounding(mut self, search_grounding: bool) -> Self {
        self.search_grounding = search_grounding;
        self
    }
}

/// Text of a model reply plus the web sources it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelResponse {
    pub text: String,
    #[serde(default)]
    pub grounding: Vec<GroundingChunk>,
}

impl ModelResponse {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_grounding(mut self, grounding: Vec<GroundingChunk>) -> Self {
        self.grounding = grounding;
        self
    }
}

/// Transport seam to a hosted generative model.
///
/// Implementations map every failure to [`crate::LensError::Transport`]; the
/// session never retries.
pub trait GenerativeModel {
    fn generate(&self, request: &ModelRequest) -> LensResult<ModelResponse>;
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    fn generate(&self, request: &ModelRequest) -> LensResult<ModelResponse> {
        (**self).generate(request)
    }
}
