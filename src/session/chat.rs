// Chat session state machine: client-held transcript, stateless replay

use crate::error::{Result, ServiceError};
use crate::locale;
use crate::models::api::{
    AccountTier, ChatMessage, ChatTurnRequest, DocumentContext, Language,
};
use async_trait::async_trait;

/// Transport used to produce the next model turn from a replayed transcript.
/// Implemented by the boundary API client in production and by stubs in tests.
#[async_trait]
pub trait TurnTransport {
    async fn send_chat_turn(&self, turn: ChatTurnRequest) -> Result<String>;
}

/// One tutoring conversation.
///
/// Uninitialized until study material is supplied; initialization emits
/// exactly one synthetic model welcome message picked by account tier and
/// language. Every turn replays the full transcript — the transcript never
/// truncates, so payloads grow monotonically over a conversation.
pub struct ChatSession {
    tier: AccountTier,
    language: Language,
    context: Option<DocumentContext>,
    transcript: Vec<ChatMessage>,
    turn_in_flight: bool,
}

impl ChatSession {
    pub fn new(tier: AccountTier, language: Language) -> Self {
        Self {
            tier,
            language,
            context: None,
            transcript: Vec::new(),
            turn_in_flight: false,
        }
    }

    /// Whether the session has been initialized with study material.
    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Move Uninitialized → Active over the given study material, emitting
    /// the welcome message. A no-op on an already-active session.
    pub fn initialize(&mut self, context: DocumentContext) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        if !context.has_material() {
            return Err(ServiceError::InvalidRequest(
                "chat needs pasted text or an uploaded document".to_string(),
            ));
        }
        self.transcript.push(ChatMessage::model(locale::welcome_message(
            self.tier,
            self.language,
        )));
        self.context = Some(context);
        Ok(())
    }

    /// Start a turn: append the user message optimistically and construct the
    /// turn request from the transcript as it stood before the append.
    ///
    /// Only one turn may be outstanding; submission stays blocked until
    /// [`complete_turn`](Self::complete_turn) lands the reply.
    pub fn begin_turn(&mut self, text: &str) -> Result<ChatTurnRequest> {
        let context = self.context.clone().ok_or_else(|| {
            ServiceError::InvalidRequest("chat session is not initialized".to_string())
        })?;
        if self.turn_in_flight {
            return Err(ServiceError::InvalidRequest(
                "a chat turn is already in flight".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let prior_transcript = self.transcript.clone();
        self.transcript.push(ChatMessage::user(text));
        self.turn_in_flight = true;

        Ok(ChatTurnRequest {
            prior_transcript,
            new_message: text.to_string(),
            context,
            language: self.language,
        })
    }

    /// Land the outcome of the in-flight turn. A failure becomes a flagged
    /// inline message carrying the localized generic error line — the
    /// conversation continues, nothing is rolled back.
    pub fn complete_turn(&mut self, outcome: Result<String>) {
        if !self.turn_in_flight {
            return;
        }
        self.turn_in_flight = false;
        match outcome {
            Ok(reply) => self.transcript.push(ChatMessage::model(reply)),
            Err(err) => {
                tracing::warn!("Chat turn failed: {}", err);
                self.transcript
                    .push(ChatMessage::error(locale::generic_error(self.language)));
            }
        }
    }

    /// Drive one full turn over a transport. Validation failures (not
    /// initialized, turn outstanding, empty message) propagate; transport
    /// failures are rendered inline and the call still succeeds.
    pub async fn send_message<T: TurnTransport + Sync>(
        &mut self,
        transport: &T,
        text: &str,
    ) -> Result<()> {
        let turn = self.begin_turn(text)?;
        let outcome = transport.send_chat_turn(turn).await;
        self.complete_turn(outcome);
        Ok(())
    }

    /// Back to Uninitialized: transcript, context, and any in-flight interest
    /// are discarded. Triggered when the document, pasted text, or language
    /// changes; there is no partial-reset path.
    pub fn reset(&mut self) {
        self.context = None;
        self.transcript.clear();
        self.turn_in_flight = false;
    }

    /// Switching language resets the conversation; the next initialization
    /// greets in the new language.
    pub fn change_language(&mut self, language: Language) {
        if language != self.language {
            self.language = language;
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::Role;

    fn material() -> DocumentContext {
        DocumentContext {
            text_input: "Photosynthesis converts light into chemical energy.".to_string(),
            file_data: None,
            additional_context: String::new(),
        }
    }

    struct EchoTransport;

    #[async_trait]
    impl TurnTransport for EchoTransport {
        async fn send_chat_turn(&self, turn: ChatTurnRequest) -> Result<String> {
            Ok(format!("echo: {}", turn.new_message))
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl TurnTransport for FailingTransport {
        async fn send_chat_turn(&self, _turn: ChatTurnRequest) -> Result<String> {
            Err(ServiceError::UpstreamTimeout("slow model".to_string()))
        }
    }

    #[test]
    fn test_initialize_emits_exactly_one_welcome() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        assert!(!session.is_active());

        session.initialize(material()).unwrap();
        assert!(session.is_active());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Model);

        // Idempotent: no second welcome.
        session.initialize(material()).unwrap();
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_initialize_requires_material() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        assert!(session.initialize(DocumentContext::default()).is_err());
        assert!(!session.is_active());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_begin_turn_excludes_new_message_from_prior() {
        let mut session = ChatSession::new(AccountTier::Registered, Language::En);
        session.initialize(material()).unwrap();

        let turn = session.begin_turn("what is ATP?").unwrap();
        // Prior transcript holds only the welcome message.
        assert_eq!(turn.prior_transcript.len(), 1);
        assert_eq!(turn.prior_transcript[0].role, Role::Model);
        assert_eq!(turn.new_message, "what is ATP?");
        // The user message is visible immediately.
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].role, Role::User);
    }

    #[test]
    fn test_single_turn_in_flight() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        session.initialize(material()).unwrap();

        session.begin_turn("first").unwrap();
        assert!(session.begin_turn("second").is_err());

        session.complete_turn(Ok("answer".to_string()));
        assert!(session.begin_turn("third").is_ok());
    }

    #[test]
    fn test_failed_turn_appends_flagged_message() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::Fr);
        session.initialize(material()).unwrap();

        session.begin_turn("bonjour").unwrap();
        session.complete_turn(Err(ServiceError::Upstream("boom".to_string())));

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, Role::Model);
        assert!(last.is_error);
        assert_eq!(last.text, locale::generic_error(Language::Fr));
    }

    #[test]
    fn test_reset_then_reinitialize_greets_again() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        session.initialize(material()).unwrap();
        session.begin_turn("hi").unwrap();
        session.complete_turn(Ok("hello".to_string()));
        assert_eq!(session.transcript().len(), 3);

        session.reset();
        assert!(!session.is_active());
        assert!(session.transcript().is_empty());

        session.initialize(material()).unwrap();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Model);
    }

    #[test]
    fn test_change_language_resets() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        session.initialize(material()).unwrap();

        session.change_language(Language::Fr);
        assert!(!session.is_active());

        session.initialize(material()).unwrap();
        assert_eq!(
            session.transcript()[0].text,
            locale::welcome_message(AccountTier::Guest, Language::Fr)
        );
    }

    #[tokio::test]
    async fn test_send_message_appends_reply() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        session.initialize(material()).unwrap();

        session.send_message(&EchoTransport, "hello").await.unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].text, "echo: hello");
        assert!(!transcript[2].is_error);
    }

    #[tokio::test]
    async fn test_send_message_renders_failure_inline() {
        let mut session = ChatSession::new(AccountTier::Guest, Language::En);
        session.initialize(material()).unwrap();

        session
            .send_message(&FailingTransport, "hello")
            .await
            .unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert!(transcript[2].is_error);
        // A new turn can start after the failure.
        assert!(session.begin_turn("retry").is_ok());
    }
}
