use crate::pipeline::state::PipelineState;

/// Overlay text for one render: the label line followed by one line per
/// score, in the map's insertion order. Pure function of the state, so
/// re-rendering the same state always yields the same text.
pub fn overlay_lines(state: &PipelineState) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + state.scores.len());
    lines.push(format!("Emotion: {}", state.label));
    for (emotion, score) in &state.scores {
        lines.push(format!("{}: {:.1}%", emotion, score));
    }
    lines
}
