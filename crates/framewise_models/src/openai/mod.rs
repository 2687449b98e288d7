//! OpenAI-compatible chat completions client with image input.

mod client;
mod conversion;
mod dto;

pub use client::{DEFAULT_ENDPOINT, OpenAIVisionClient};
pub use conversion::{classify_status, error_message, extract_text, image_data_url, to_chat_request};
pub use dto::{
    ChatContent, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatRole, Choice,
    ContentPart, ImageUrl, ResponseMessage, Usage,
};
