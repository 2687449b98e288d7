//! Shared helpers for framewise integration tests.

use async_trait::async_trait;
use framewise::{
    FramewiseConfig, InferenceRequest, ProviderError, ProviderErrorKind, ProviderResult,
    VisionDriver,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Answers "Narration <n>" for the n-th call, or fails on a chosen call.
#[derive(Default)]
pub struct StubDriver {
    fail_on: Option<(usize, ProviderErrorKind)>,
    system_prompts: Mutex<Vec<Option<String>>>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th request (counted from 0) with `kind`.
    pub fn fail_on(mut self, call: usize, kind: ProviderErrorKind) -> Self {
        self.fail_on = Some((call, kind));
        self
    }

    pub fn call_count(&self) -> usize {
        self.system_prompts.lock().unwrap().len()
    }

    pub fn system_prompts(&self) -> Vec<Option<String>> {
        self.system_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionDriver for StubDriver {
    async fn describe(&self, request: &InferenceRequest) -> ProviderResult<String> {
        let call = {
            let mut prompts = self.system_prompts.lock().unwrap();
            prompts.push(request.system_prompt().clone());
            prompts.len() - 1
        };
        match &self.fail_on {
            Some((n, kind)) if *n == call => Err(ProviderError::new(kind.clone())),
            _ => Ok(format!("Narration {}", call)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-vision"
    }
}

/// Working directories for one run, all under a temporary root.
pub struct Workspace {
    pub frames_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tasks_dir: PathBuf,
}

impl Workspace {
    /// Lay out `count` frames two seconds apart and an empty tasks directory.
    pub fn new(root: &Path, count: usize) -> Self {
        let frames_dir = root.join("frames");
        let tasks_dir = root.join("tasks");
        std::fs::create_dir_all(&frames_dir).unwrap();
        std::fs::create_dir_all(&tasks_dir).unwrap();
        for i in 0..count {
            let seconds = i * 2;
            let name = format!("frame_{:02}m_{:02}s.jpg", seconds / 60, seconds % 60);
            std::fs::write(frames_dir.join(name), [0xFF, 0xD8, 0xFF]).unwrap();
        }
        Self {
            frames_dir,
            output_dir: root.join("analysis"),
            tasks_dir,
        }
    }

    /// Bundled defaults pointed at this workspace.
    pub fn config(&self, api_key_env: &str) -> FramewiseConfig {
        let toml = format!(
            "[analysis]\n\
             frames_dir = {:?}\n\
             output_dir = {:?}\n\
             tasks_dir = {:?}\n\
             context_window = 2\n\n\
             [provider]\n\
             api_key_env = {:?}\n",
            self.frames_dir.to_string_lossy(),
            self.output_dir.to_string_lossy(),
            self.tasks_dir.to_string_lossy(),
            api_key_env,
        );
        FramewiseConfig::from_toml_str(&toml).unwrap()
    }

    /// Files written to the report directory.
    pub fn reports(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.output_dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}
