// Response schemas for structured-output modes
//
// Gemini's responseSchema dialect: uppercase type names, OpenAPI-ish layout.
// Field names are fixed in English regardless of output language; only the
// values follow the language directive. The decoder relies on this split.

use serde_json::{json, Value};

/// Schema for FLASHCARDS: an array of {question, answer} objects.
pub fn flashcards() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "answer": { "type": "STRING" },
            },
            "required": ["question", "answer"],
        },
    })
}

/// Schema for QUIZ: an array of multiple-choice questions.
pub fn quiz() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                },
                "correctAnswerIndex": { "type": "INTEGER" },
                "explanation": { "type": "STRING" },
            },
            "required": ["id", "question", "options", "correctAnswerIndex", "explanation"],
        },
    })
}
