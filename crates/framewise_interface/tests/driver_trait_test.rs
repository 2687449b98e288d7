//! Tests for the driver trait plumbing.

use async_trait::async_trait;
use framewise_core::{ImageData, InferenceRequest};
use framewise_error::ProviderResult;
use framewise_interface::VisionDriver;
use std::sync::Arc;

struct EchoDriver;

#[async_trait]
impl VisionDriver for EchoDriver {
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String> {
        Ok(format!("{} ({} bytes)", request.context_text(), request.image().len()))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

fn request() -> InferenceRequest {
    InferenceRequest::builder()
        .context_text("first")
        .image(ImageData::new("image/jpeg", vec![1, 2, 3]))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_shared_driver_delegates() {
    let shared: Arc<EchoDriver> = Arc::new(EchoDriver);
    assert_eq!(shared.describe(&request()).await.unwrap(), "first (3 bytes)");
    assert_eq!(shared.provider_name(), "echo");
    assert_eq!(shared.model_name(), "echo-1");
}

#[tokio::test]
async fn test_trait_object_driver() {
    let driver: Arc<dyn VisionDriver> = Arc::new(EchoDriver);
    let text = driver.describe(&request()).await.unwrap();
    assert_eq!(text, "first (3 bytes)");
}
