// Request translation (generate request → Gemini prompt)

use crate::error::{Result, ServiceError};
use crate::locale;
use crate::models::api::{
    ChatMessage, DocumentContext, GenerateRequest, Language, Mode, Role,
};
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerationConfig, InlineData, Part, SystemInstruction,
};
use serde_json::Value;

/// Fixed counts and defaults for the generation modes.
pub const FLASHCARD_COUNT: usize = 10;
pub const QUIZ_QUESTION_COUNT: usize = 5;
pub const DEFAULT_QUIZ_DIFFICULTY: &str = "Medium";

/// Low temperature biases the model toward determinism for structured
/// extraction and factual tasks.
pub const GENERATION_TEMPERATURE: f32 = 0.3;

/// One table entry per generation mode: how to phrase the instruction block
/// and which response schema (if any) constrains the output. Adding a mode is
/// one new entry here plus a decoder arm.
#[derive(Clone, Copy)]
pub struct ModeSpec {
    /// Builds the instruction text appended after the study material.
    /// Receives the output language and the user's additional context.
    pub instruction: fn(Language, &str) -> String,

    /// Response schema for strict-JSON modes.
    pub schema: Option<fn() -> Value>,
}

/// Look up the table entry for a generation mode. CHAT has no entry; it is
/// shaped by [`build_chat_request`] instead.
pub fn mode_spec(mode: Mode) -> Option<ModeSpec> {
    match mode {
        Mode::Summary => Some(ModeSpec {
            instruction: summary_instruction,
            schema: None,
        }),
        Mode::Explanation => Some(ModeSpec {
            instruction: explanation_instruction,
            schema: None,
        }),
        Mode::StudyPlan => Some(ModeSpec {
            instruction: study_plan_instruction,
            schema: None,
        }),
        Mode::Flashcards => Some(ModeSpec {
            instruction: flashcards_instruction,
            schema: Some(super::schema::flashcards),
        }),
        Mode::Quiz => Some(ModeSpec {
            instruction: quiz_instruction,
            schema: Some(super::schema::quiz),
        }),
        Mode::Chat => None,
    }
}

/// Persona preamble shared by every generation prompt. The language directive
/// is imperative text because the model has no native locale switch.
fn base_persona(language: Language) -> String {
    format!(
        "You are StudyGeniusAI, an intelligent study assistant.\n\
         Tone: Friendly, motivating, and adapted to the student's level.\n\
         Rules:\n\
         - Explain step-by-step.\n\
         - Use clear structures (bullet points, tables).\n\
         - No fake data.\n\
         - {}",
        locale::generation_directive(language)
    )
}

fn summary_instruction(language: Language, _context: &str) -> String {
    format!(
        "{}\n\
         Analyze the provided content and generate a clear, structured summary.\n\
         Focus on key concepts, main arguments, and crucial details.\n\
         Use bullet points and bold text for readability.",
        base_persona(language)
    )
}

fn explanation_instruction(language: Language, context: &str) -> String {
    let mut prompt = format!(
        "{}\n\
         Provide a deep-dive, step-by-step explanation of the core topics found in this content.\n\
         Use analogies where helpful. Break down complex ideas into simple terms.\n\
         If there is code, explain it line-by-line.",
        base_persona(language)
    );
    if !context.trim().is_empty() {
        prompt.push_str(&format!("\nFocus specifically on: {}", context));
    }
    prompt
}

fn study_plan_instruction(language: Language, context: &str) -> String {
    let goal = if context.trim().is_empty() {
        "Create a 1-week plan.".to_string()
    } else {
        format!("Duration/Goal: {}.", context)
    };
    format!(
        "{}\n\
         Create a structured study plan based on this content.\n\
         {}\n\
         Break it down by days or sessions with precise topics to cover and suggested review methods.",
        base_persona(language),
        goal
    )
}

fn flashcards_instruction(language: Language, _context: &str) -> String {
    format!(
        "{}\n\
         Create {} high-quality flashcards based on the most important concepts.\n\
         Return strictly JSON.\n\
         The JSON keys (question, answer) must remain in English, but the VALUES must be in {}.",
        base_persona(language),
        FLASHCARD_COUNT,
        locale::value_language(language)
    )
}

fn quiz_instruction(language: Language, context: &str) -> String {
    let difficulty = if context.trim().is_empty() {
        DEFAULT_QUIZ_DIFFICULTY
    } else {
        context
    };
    format!(
        "{}\n\
         Generate a multiple-choice quiz with {} questions.\n\
         Difficulty: {}.\n\
         Include a clear explanation for the correct answer.\n\
         Return strictly JSON.\n\
         The JSON keys (id, question, options, correctAnswerIndex, explanation) must remain in \
         English, but the VALUES must be in {}.",
        base_persona(language),
        QUIZ_QUESTION_COUNT,
        difficulty,
        locale::value_language(language)
    )
}

/// Shape a non-chat generate request into a single-turn Gemini request.
///
/// Part order carries meaning: the inline attachment (if any) goes first and
/// the instruction text last, so the model reads the document before the
/// instructions that apply to it.
pub fn build_generation_request(req: &GenerateRequest) -> Result<GenerateContentRequest> {
    let spec = mode_spec(req.mode).ok_or_else(|| {
        ServiceError::InvalidRequest("CHAT requests are shaped as conversation turns".to_string())
    })?;

    let mut parts = Vec::new();
    if let Some(file) = &req.file_data {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
        });
    }
    if !req.text_input.trim().is_empty() {
        parts.push(Part::Text {
            text: req.text_input.clone(),
        });
    }
    parts.push(Part::Text {
        text: (spec.instruction)(req.language, &req.additional_context),
    });

    let generation_config = GenerationConfig {
        temperature: Some(GENERATION_TEMPERATURE),
        max_output_tokens: None,
        response_mime_type: spec.schema.map(|_| "application/json".to_string()),
        response_schema: spec.schema.map(|build| build()),
    };

    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
        system_instruction: None,
        generation_config: Some(generation_config),
    })
}

/// System instruction for the tutoring chat.
fn chat_preamble(language: Language, additional_context: &str) -> String {
    let mut text = format!(
        "You are StudyGeniusAI, an intelligent study assistant.\n\
         Mission:\n\
         - Summarize PDFs, images, and texts\n\
         - Generate quizzes, flashcards, and explanations\n\
         - Create study plans (1 to 30 days)\n\
         - Tutor the user in any subject with step-by-step clarity\n\
         Behavior Rules:\n\
         - Always use a friendly, motivating tone.\n\
         - Adapt your explanations to the user's level.\n\
         - Always answer step by step if the user asks for explanations.\n\
         - Never invent fake data; ask for more details if needed.\n\
         - Use tables, bullet points, and clean structure.\n\
         - {}",
        locale::chat_directive(language)
    );
    if !additional_context.trim().is_empty() {
        text.push_str(&format!("\nAdditional context: {}", additional_context));
    }
    text
}

fn content_from_message(msg: &ChatMessage) -> Content {
    let role = match msg.role {
        Role::User => "user",
        Role::Model => "model",
    };
    Content {
        role: role.to_string(),
        parts: vec![Part::Text {
            text: msg.text.clone(),
        }],
    }
}

/// Rebuild a transient conversation from a replayed transcript.
///
/// The server is stateless, so every turn re-sends everything: the document
/// context leads (attachment before pasted text), the prior transcript
/// follows in order, and the new user message closes the conversation. The
/// persona and language directive travel as the system instruction.
pub fn build_chat_request(
    history: &[ChatMessage],
    message: &str,
    context: &DocumentContext,
    language: Language,
) -> GenerateContentRequest {
    let mut contents = Vec::with_capacity(history.len() + 2);

    let mut context_parts = Vec::new();
    if let Some(file) = &context.file_data {
        context_parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
        });
    }
    if !context.text_input.trim().is_empty() {
        context_parts.push(Part::Text {
            text: context.text_input.clone(),
        });
    }
    if !context_parts.is_empty() {
        contents.push(Content {
            role: "user".to_string(),
            parts: context_parts,
        });
    }

    contents.extend(history.iter().map(content_from_message));

    contents.push(Content {
        role: "user".to_string(),
        parts: vec![Part::Text {
            text: message.to_string(),
        }],
    });

    GenerateContentRequest {
        contents,
        system_instruction: Some(SystemInstruction::from_text(chat_preamble(
            language,
            &context.additional_context,
        ))),
        generation_config: None,
    }
}
