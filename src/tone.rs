//! The closed tone vocabulary: two axes, four combinations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Formality axis of a tone selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Formality {
    Casual,
    Formal,
}

/// Detail axis of a tone selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Detail {
    Concise,
    Detailed,
}

/// One of the four tone combinations. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToneSelection {
    pub formality: Formality,
    pub detail: Detail,
}

impl ToneSelection {
    pub fn new(formality: Formality, detail: Detail) -> Self {
        Self { formality, detail }
    }

    /// Stable serialized form, used in cache keys: `formality-detail`.
    pub fn key_fragment(&self) -> String {
        format!("{}-{}", self.formality, self.detail)
    }
}
