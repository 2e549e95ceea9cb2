//! Boundary API type definitions.
//!
//! These are the types crossing the `/generate` endpoint: the request tuple
//! (mode, content, language, context), the chat transcript, and the typed
//! results the decoder produces for the UI. Field names are camelCase on the
//! wire to match the web client.

use crate::error::{Result, ServiceError};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// The six generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Summary,
    Flashcards,
    Quiz,
    Explanation,
    StudyPlan,
    Chat,
}

impl Mode {
    /// JSON modes are constrained to a response schema; the rest are
    /// markdown-flavored free text.
    pub fn expects_json(&self) -> bool {
        matches!(self, Mode::Flashcards | Mode::Quiz)
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Summary => "SUMMARY",
            Mode::Flashcards => "FLASHCARDS",
            Mode::Quiz => "QUIZ",
            Mode::Explanation => "EXPLANATION",
            Mode::StudyPlan => "STUDY_PLAN",
            Mode::Chat => "CHAT",
        }
    }
}

/// Output language requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "fr")]
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

/// Account tier of the chatting user. Client-side only; selects the welcome
/// message at session initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTier {
    Guest,
    Registered,
}

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single entry in the client-held chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,

    /// Set on model-side entries that render a failed turn inline.
    #[serde(rename = "isError", default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(val: &bool) -> bool {
    !*val
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            is_error: true,
        }
    }
}

/// An uploaded document: raw bytes (base64) plus declared MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub data: String,
}

impl FileData {
    /// Reject attachments the model upload would bounce anyway: unknown MIME
    /// type or data that is not valid base64.
    pub fn validate(&self) -> Result<()> {
        if self.mime_type.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "fileData.mimeType must not be empty".to_string(),
            ));
        }
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| {
                ServiceError::InvalidRequest(format!("fileData.data is not valid base64: {}", e))
            })?;
        Ok(())
    }
}

/// Request body for `POST /generate`.
///
/// `history` and `message` are only meaningful in CHAT mode; the other modes
/// ignore them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub mode: Mode,
    pub language: Language,

    #[serde(default)]
    pub text_input: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,

    #[serde(default)]
    pub additional_context: String,

    /// CHAT only: the prior transcript, excluding the newest user message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ChatMessage>>,

    /// CHAT only: the newest user message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerateRequest {
    /// Enforce the request invariant: some study material must be present,
    /// attachments must be well-formed, and CHAT turns must carry a message.
    pub fn validate(&self) -> Result<()> {
        if self.text_input.trim().is_empty() && self.file_data.is_none() {
            return Err(ServiceError::InvalidRequest(
                "at least one of textInput or fileData must be provided".to_string(),
            ));
        }
        if let Some(file) = &self.file_data {
            file.validate()?;
        }
        if self.mode == Mode::Chat
            && self.message.as_deref().map_or(true, |m| m.trim().is_empty())
        {
            return Err(ServiceError::InvalidRequest(
                "CHAT requests must include a non-empty message".to_string(),
            ));
        }
        Ok(())
    }
}

/// Success body for `POST /generate`. The string is JSON-encoded for
/// FLASHCARDS/QUIZ and markdown-flavored text otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// One flashcard. Keys stay English on the wire regardless of output language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// One multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
}

/// Decoded generation output, variant by mode.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Summary / Explanation / Study plan: an opaque formatted-text blob.
    Text(String),
    Flashcards(Vec<Flashcard>),
    Quiz(Vec<QuizQuestion>),
}

impl GenerationResult {
    /// Serialize back to the wire representation (`{ text }` body contents).
    /// Free-text results are the identity; JSON modes re-encode their arrays.
    pub fn encode(&self) -> Result<String> {
        match self {
            GenerationResult::Text(text) => Ok(text.clone()),
            GenerationResult::Flashcards(cards) => Ok(serde_json::to_string(cards)?),
            GenerationResult::Quiz(questions) => Ok(serde_json::to_string(questions)?),
        }
    }
}

/// The study material a chat session is anchored to. Re-sent with every turn
/// because the server holds no session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentContext {
    pub text_input: String,
    pub file_data: Option<FileData>,
    pub additional_context: String,
}

impl DocumentContext {
    /// A session can only initialize over actual material.
    pub fn has_material(&self) -> bool {
        !self.text_input.trim().is_empty() || self.file_data.is_some()
    }
}

/// Everything needed to produce the next model turn. Constructed fresh per
/// turn and discarded once the reply lands in the transcript.
#[derive(Debug, Clone)]
pub struct ChatTurnRequest {
    /// Transcript so far, excluding the newest user message.
    pub prior_transcript: Vec<ChatMessage>,
    pub new_message: String,
    pub context: DocumentContext,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&Mode::StudyPlan).unwrap(),
            "\"STUDY_PLAN\""
        );
        let mode: Mode = serde_json::from_str("\"FLASHCARDS\"").unwrap();
        assert_eq!(mode, Mode::Flashcards);
    }

    #[test]
    fn test_chat_message_is_error_defaults_false() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"model","text":"hello"}"#).unwrap();
        assert!(!msg.is_error);

        // And the flag is omitted when false.
        let json = serde_json::to_string(&ChatMessage::model("hi")).unwrap();
        assert!(!json.contains("isError"));
        let json = serde_json::to_string(&ChatMessage::error("boom")).unwrap();
        assert!(json.contains("\"isError\":true"));
    }

    #[test]
    fn test_validate_requires_material() {
        let req = GenerateRequest {
            mode: Mode::Summary,
            language: Language::En,
            text_input: "   ".to_string(),
            file_data: None,
            additional_context: String::new(),
            history: None,
            message: None,
        };
        assert!(matches!(
            req.validate(),
            Err(ServiceError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_base64() {
        let req = GenerateRequest {
            mode: Mode::Summary,
            language: Language::En,
            text_input: String::new(),
            file_data: Some(FileData {
                mime_type: "application/pdf".to_string(),
                data: "not base64 !!".to_string(),
            }),
            additional_context: String::new(),
            history: None,
            message: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_chat_requires_message() {
        let req = GenerateRequest {
            mode: Mode::Chat,
            language: Language::Fr,
            text_input: "notes".to_string(),
            file_data: None,
            additional_context: String::new(),
            history: Some(vec![]),
            message: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_generation_result_encode_round_trip() {
        let cards = vec![Flashcard {
            question: "Q".to_string(),
            answer: "A".to_string(),
        }];
        let encoded = GenerationResult::Flashcards(cards.clone()).encode().unwrap();
        let decoded: Vec<Flashcard> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, cards);
    }
}
