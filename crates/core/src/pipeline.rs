//! Prompt -> model -> extraction, with the two degradation paths.
//!
//! A failed model call is answered with the static fallback recommendations; a model answer
//! without a usable object is answered with empty lists. Neither is an error to the caller.

use crate::domain::fallback::fallback_recommendations;
use crate::domain::recommendation::{
    RecommendationOutcome, RecommendationPayload, RecommendationRequest, RecommendationResult,
    RecommendationSource,
};
use crate::llm::error::ModelInvocationError;
use crate::llm::json::extract_recommendations;
use crate::llm::prompt::build_prompt;
use crate::llm::ModelInvoker;

pub async fn recommend(
    invoker: &dyn ModelInvoker,
    request: &RecommendationRequest,
) -> RecommendationOutcome {
    let prompt = build_prompt(request);

    let text = match invoker.generate_text(&prompt).await {
        Ok(text) => text,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            if let Some(diag) = err.downcast_ref::<ModelInvocationError>() {
                tracing::debug!(
                    stage = diag.stage,
                    raw_response = diag.raw_response.as_deref().unwrap_or_default(),
                    raw_response_json = ?diag.raw_response_json,
                    "model invocation diagnostics"
                );
            }
            tracing::error!(
                provider = ?invoker.provider(),
                latitude = %request.latitude,
                longitude = %request.longitude,
                date = %request.date,
                error = %format!("{err:#}"),
                "model invocation failed; serving fallback recommendations"
            );
            return fallback_outcome(request);
        }
    };

    match extract_recommendations(&text) {
        Ok(map) => RecommendationOutcome {
            source: RecommendationSource::Model,
            payload: RecommendationPayload::Model(map),
        },
        Err(failure) => {
            tracing::warn!(
                date = %request.date,
                error = %failure,
                response_len = text.len(),
                "failed to extract recommendations from model output; returning empty lists"
            );
            RecommendationOutcome {
                source: RecommendationSource::Empty,
                payload: RecommendationPayload::Static(RecommendationResult::empty()),
            }
        }
    }
}

pub fn fallback_outcome(request: &RecommendationRequest) -> RecommendationOutcome {
    RecommendationOutcome {
        source: RecommendationSource::Fallback,
        payload: RecommendationPayload::Static(fallback_recommendations(request)),
    }
}
