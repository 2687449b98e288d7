//! Vision inference clients for framewise.
//!
//! Each client implements [`framewise_interface::VisionDriver`]: one call is
//! one attempt, and every failure is mapped onto
//! [`framewise_error::ProviderErrorKind`] so the retry loop can tell
//! throttling apart from fatal errors.
//!
//! # Example
//!
//! ```no_run
//! use framewise_core::{ImageData, InferenceRequest};
//! use framewise_interface::VisionDriver;
//! use framewise_models::OpenAIVisionClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIVisionClient::new("gpt-4o-mini")?;
//! let request = InferenceRequest::builder()
//!     .context_text("This is the first frame. Analyze it and describe what you observe:")
//!     .image(ImageData::new("image/jpeg", std::fs::read("frames/frame_00m_00s.jpg")?))
//!     .build()?;
//! let narration = client.describe(&request).await?;
//! println!("{}", narration);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metrics;
mod openai;

pub use metrics::LlmMetrics;
pub use openai::{
    ChatContent, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatRole, Choice,
    ContentPart, DEFAULT_ENDPOINT, ImageUrl, OpenAIVisionClient, ResponseMessage, Usage,
    classify_status, error_message, extract_text, image_data_url, to_chat_request,
};
