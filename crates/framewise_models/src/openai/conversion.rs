//! Conversions between framewise requests and chat completions payloads.

use super::dto::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl};
use base64::Engine;
use framewise_core::{ImageData, InferenceRequest};
use framewise_error::{BuilderError, ProviderErrorKind};

/// Build the chat completions body for one frame.
///
/// The system prompt, when present, becomes a system message. The rendered
/// context text and the frame follow as a single user message.
pub fn to_chat_request(request: &InferenceRequest, model: &str) -> Result<ChatRequest, BuilderError> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_prompt() {
        messages.push(ChatMessage::system(system.clone()));
    }
    messages.push(ChatMessage::user(vec![
        ContentPart::Text {
            text: request.context_text().clone(),
        },
        ContentPart::ImageUrl {
            image_url: ImageUrl::new(image_data_url(request.image())),
        },
    ]));

    ChatRequest::builder()
        .model(model)
        .messages(messages)
        .build()
        .map_err(|e| BuilderError::from(format!("Failed to build ChatRequest: {}", e)))
}

/// Inline an image as a `data:` URL.
///
/// ```
/// use framewise_core::ImageData;
/// use framewise_models::image_data_url;
///
/// let url = image_data_url(&ImageData::new("image/png", b"abc".to_vec()));
/// assert_eq!(url, "data:image/png;base64,YWJj");
/// ```
pub fn image_data_url(image: &ImageData) -> String {
    format!(
        "data:{};base64,{}",
        image.mime(),
        base64::engine::general_purpose::STANDARD.encode(image.bytes())
    )
}

/// Map a non-success HTTP status to a provider error kind.
pub fn classify_status(status: u16, message: String) -> ProviderErrorKind {
    match status {
        429 => ProviderErrorKind::RateLimited(message),
        401 | 403 => ProviderErrorKind::AuthenticationFailure(message),
        400 | 404 | 413 | 422 => ProviderErrorKind::MalformedRequest(message),
        _ => ProviderErrorKind::Unknown {
            status: Some(status),
            message,
        },
    }
}

/// Pull a readable message out of an error response body.
///
/// Uses `error.message` when the body is the usual JSON envelope, otherwise
/// the raw body.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// First choice's text, trimmed.
///
/// # Errors
///
/// `EmptyResponse` when there is no choice, no content, or only whitespace.
pub fn extract_text(response: &ChatResponse) -> Result<String, ProviderErrorKind> {
    response
        .choices()
        .first()
        .and_then(|c| c.message().content().as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(ProviderErrorKind::EmptyResponse)
}
