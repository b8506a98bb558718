//! Model vendor detection from a Bedrock model identifier.

/// Model families with a known request/response body schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVendor {
    Titan,
    Claude,
    Llama3,
    Command,
    Jamba,
    Mistral,
}

const MARKERS: [(&str, ModelVendor); 6] = [
    ("amazon.titan", ModelVendor::Titan),
    ("anthropic.claude", ModelVendor::Claude),
    ("meta.llama3", ModelVendor::Llama3),
    ("cohere.command", ModelVendor::Command),
    ("ai21.jamba", ModelVendor::Jamba),
    ("mistral.mistral", ModelVendor::Mistral),
];

impl ModelVendor {
    /// Resolve the vendor of `model_id` by case-insensitive substring match.
    ///
    /// Matches inside cross-region inference profile ids such as
    /// `us.anthropic.claude-3-5-haiku-20241022-v1:0` and full model ARNs.
    pub fn from_model_id(model_id: &str) -> Option<Self> {
        let lowered = model_id.to_ascii_lowercase();
        MARKERS
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map(|(_, vendor)| *vendor)
    }

    /// Whether token counts for this vendor are estimated from text length.
    pub fn estimates_tokens(self) -> bool {
        matches!(self, ModelVendor::Command | ModelVendor::Mistral)
    }
}
