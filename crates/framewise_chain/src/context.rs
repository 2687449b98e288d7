//! Rendering a context window into request text.

use framewise_core::ContextWindow;

/// Instruction sent with the first frame, when there is nothing to compare against.
pub const FIRST_FRAME_INSTRUCTION: &str =
    "This is the first frame. Analyze it and describe what you observe:";

/// Text that introduces the prior narrations.
pub const CONTEXT_PREAMBLE: &str = "Here are the analyses from the previous frames:\n\n";

/// Instruction that follows the prior narrations.
pub const NEXT_FRAME_INSTRUCTION: &str = "Now analyze this NEW frame and describe what has changed or what is new compared to the previous frames:";

/// Text parts of one inference request.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RenderedPrompt {
    /// System message, passed through unchanged
    system_prompt: Option<String>,
    /// Prior narrations plus the per-frame instruction
    context_text: String,
}

impl RenderedPrompt {
    /// Split into system prompt and context text.
    pub fn into_parts(self) -> (Option<String>, String) {
        (self.system_prompt, self.context_text)
    }
}

/// Renders a bounded window of prior narrations into request text.
///
/// Pure: the same window and system prompt always render the same text.
///
/// # Examples
///
/// ```
/// use framewise_chain::ContextWindowBuilder;
/// use framewise_core::{AnalysisResult, ResultSequence, Timestamp};
///
/// let mut sequence = ResultSequence::new();
/// sequence
///     .append(AnalysisResult::new(0, "f0.jpg", Timestamp::default(), "An empty hallway."))
///     .unwrap();
///
/// let prompt = ContextWindowBuilder::new().build(&sequence.window(5), None);
/// assert!(prompt.context_text().contains("Frame 0: An empty hallway."));
/// assert!(prompt.system_prompt().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindowBuilder {
    first_frame_instruction: String,
    preamble: String,
    next_frame_instruction: String,
}

impl Default for ContextWindowBuilder {
    fn default() -> Self {
        Self {
            first_frame_instruction: FIRST_FRAME_INSTRUCTION.to_string(),
            preamble: CONTEXT_PREAMBLE.to_string(),
            next_frame_instruction: NEXT_FRAME_INSTRUCTION.to_string(),
        }
    }
}

impl ContextWindowBuilder {
    /// Builder with the stock instructions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the instruction used when the window is empty.
    pub fn with_first_frame_instruction(mut self, text: impl Into<String>) -> Self {
        self.first_frame_instruction = text.into();
        self
    }

    /// Replace the text that introduces prior narrations.
    pub fn with_preamble(mut self, text: impl Into<String>) -> Self {
        self.preamble = text.into();
        self
    }

    /// Replace the instruction that follows prior narrations.
    pub fn with_next_frame_instruction(mut self, text: impl Into<String>) -> Self {
        self.next_frame_instruction = text.into();
        self
    }

    /// Render `window` and `system_prompt` into request text.
    ///
    /// An empty window yields only the first-frame instruction. Otherwise
    /// every entry becomes a `Frame <index>: <text>` line, oldest first,
    /// followed by the instruction to describe what changed.
    pub fn build(&self, window: &ContextWindow<'_>, system_prompt: Option<&str>) -> RenderedPrompt {
        let context_text = if window.is_empty() {
            self.first_frame_instruction.clone()
        } else {
            let mut text = self.preamble.clone();
            for entry in window.iter() {
                text.push_str(&format!("Frame {}: {}\n\n", entry.index(), entry.text()));
            }
            text.push_str(&self.next_frame_instruction);
            text
        };

        RenderedPrompt {
            system_prompt: system_prompt.map(str::to_string),
            context_text,
        }
    }
}
