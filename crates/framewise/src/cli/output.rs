//! Rendering results for the terminal.

use framewise::{AnalysisReport, FramewiseResult};
use std::fmt::Write;

/// Frame records as pretty JSON.
pub fn render_json(report: &AnalysisReport) -> FramewiseResult<String> {
    Ok(report.frames_json()?)
}

/// Per-frame narration followed by the overall narrative.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::from("Sequential Frame Analysis:\n\n");
    for frame in report.frames() {
        let _ = writeln!(
            out,
            "Frame {} [{}] ({}):\n{}\n",
            frame.index(),
            frame.timestamp(),
            frame.path().display(),
            frame.text()
        );
    }

    out.push_str("Overall Narrative:\n\n");
    let narrative: Vec<&str> = report.frames().iter().map(|f| f.text().as_str()).collect();
    out.push_str(&narrative.join("\n\n"));
    out
}
