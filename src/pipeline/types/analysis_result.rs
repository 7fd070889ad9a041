use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One successful inference: the highest-scoring emotion plus the full score
/// breakdown in percent. Insertion order of the map is display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionReading {
    pub dominant: String,
    pub scores: IndexMap<String, f32>,
}

impl EmotionReading {
    pub fn new(dominant: impl Into<String>, scores: IndexMap<String, f32>) -> Self {
        Self {
            dominant: dominant.into(),
            scores,
        }
    }
}

/// Published by the worker exactly once per consumed frame. `Failed` carries
/// no payload; the viewer only ever sees it as "Detecting...".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnalysisResult {
    Reading(EmotionReading),
    Failed,
}
