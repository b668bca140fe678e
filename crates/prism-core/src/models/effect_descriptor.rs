use serde::{Deserialize, Serialize};

/// One named visual effect and its natural-language description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectDescriptor {
    pub id: String,
    pub description: String,
}

impl EffectDescriptor {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
