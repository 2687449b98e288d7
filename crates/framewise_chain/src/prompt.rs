//! System prompt composition and run summaries.

use framewise_core::AnalysisResult;

/// Append a task description to the base system prompt as `"\nTask: <task>"`.
///
/// Without a task the base prompt is returned unchanged. A blank task counts
/// as no task.
///
/// ```
/// use framewise_chain::compose_system_prompt;
///
/// let prompt = compose_system_prompt(Some("Be precise."), Some("Count the cars."));
/// assert_eq!(prompt.as_deref(), Some("Be precise.\nTask: Count the cars."));
///
/// assert_eq!(compose_system_prompt(None, None), None);
/// ```
pub fn compose_system_prompt(base: Option<&str>, task: Option<&str>) -> Option<String> {
    match task.map(str::trim).filter(|t| !t.is_empty()) {
        Some(task) => Some(format!("{}\nTask: {}", base.unwrap_or_default(), task)),
        None => base.map(str::to_string),
    }
}

/// One `Frame <index>: <text>` line per result.
pub fn summarize_changes<'a>(results: impl IntoIterator<Item = &'a AnalysisResult>) -> String {
    results
        .into_iter()
        .map(|r| format!("Frame {}: {}", r.index(), r.text()))
        .collect::<Vec<_>>()
        .join("\n")
}
