/// Free text input.
pub struct TextPrompt {
    pub question: String,
    pub default: Option<String>,
}

impl TextPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default: None,
        }
    }

    /// Empty input resolves to `default`. An empty default counts as none.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        self.default = if default.is_empty() { None } else { Some(default) };
        self
    }
}
