use serde::{Deserialize, Serialize};

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Response body of the generateContent endpoint
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

/// One generated suggestion in the response
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl Candidate {
    /// Text of the first part, if any
    pub fn text(&self) -> Option<&str> {
        self.content.parts.first().map(|part| part.text.as_str())
    }
}

/// Suggestion picked from the Gemini candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
}
