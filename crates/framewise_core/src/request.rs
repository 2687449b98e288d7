//! Inference request types.

use std::path::Path;

/// Encoded image bytes with their MIME type.
#[derive(Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ImageData {
    /// MIME type, e.g. "image/jpeg"
    mime: String,
    /// Raw encoded bytes
    bytes: Vec<u8>,
}

impl ImageData {
    /// Wrap encoded image bytes.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Guess the MIME type of an image artifact from its extension.
    ///
    /// Unknown extensions are treated as JPEG, the sampler's output format.
    ///
    /// ```
    /// use framewise_core::ImageData;
    /// use std::path::Path;
    ///
    /// assert_eq!(ImageData::mime_for_path(Path::new("a.PNG")), "image/png");
    /// assert_eq!(ImageData::mime_for_path(Path::new("a.jpg")), "image/jpeg");
    /// ```
    pub fn mime_for_path(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        }
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything the provider needs to narrate one frame.
///
/// Built fresh per frame and dropped once the call completes.
///
/// # Examples
///
/// ```
/// use framewise_core::{ImageData, InferenceRequest};
///
/// let request = InferenceRequest::builder()
///     .system_prompt(Some("Describe changes.".to_string()))
///     .context_text("This is the first frame.")
///     .image(ImageData::new("image/jpeg", vec![0xFF, 0xD8]))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.context_text(), "This is the first frame.");
/// assert_eq!(request.image().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct InferenceRequest {
    /// Base instructions sent as the system message
    #[builder(default)]
    system_prompt: Option<String>,
    /// Rendered context window and per-frame instruction
    context_text: String,
    /// The frame to narrate
    image: ImageData,
}

impl InferenceRequest {
    /// Creates a new request builder.
    pub fn builder() -> InferenceRequestBuilder {
        InferenceRequestBuilder::default()
    }
}
