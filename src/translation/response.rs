// Response translation (raw model text → typed generation results)

use crate::error::{Result, ServiceError};
use crate::models::api::{Flashcard, GenerationResult, Mode, QuizQuestion};

/// Decode raw model output for a mode into a typed result.
///
/// Free-text modes pass through after a non-emptiness check. JSON modes parse
/// and validate structurally; a structurally invalid reply is a hard failure,
/// never a partial result.
pub fn decode(mode: Mode, raw: &str) -> Result<GenerationResult> {
    match mode {
        Mode::Summary | Mode::Explanation | Mode::StudyPlan | Mode::Chat => {
            if raw.trim().is_empty() {
                return Err(ServiceError::Parse("empty response text".to_string()));
            }
            Ok(GenerationResult::Text(raw.to_string()))
        }
        Mode::Flashcards => decode_flashcards(raw).map(GenerationResult::Flashcards),
        Mode::Quiz => decode_quiz(raw).map(GenerationResult::Quiz),
    }
}

fn decode_flashcards(raw: &str) -> Result<Vec<Flashcard>> {
    let cards: Vec<Flashcard> = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Parse(format!("flashcards are not valid JSON: {}", e)))?;

    if cards.is_empty() {
        return Err(ServiceError::Parse("flashcard array is empty".to_string()));
    }
    for (i, card) in cards.iter().enumerate() {
        if card.question.trim().is_empty() || card.answer.trim().is_empty() {
            return Err(ServiceError::Parse(format!(
                "flashcard {} has an empty question or answer",
                i
            )));
        }
    }
    Ok(cards)
}

fn decode_quiz(raw: &str) -> Result<Vec<QuizQuestion>> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Parse(format!("quiz is not valid JSON: {}", e)))?;

    if questions.is_empty() {
        return Err(ServiceError::Parse("quiz array is empty".to_string()));
    }
    for question in &questions {
        if question.question.trim().is_empty() || question.explanation.trim().is_empty() {
            return Err(ServiceError::Parse(format!(
                "quiz question {} has empty text",
                question.id
            )));
        }
        if question.options.len() < 2 {
            return Err(ServiceError::Parse(format!(
                "quiz question {} needs at least 2 options",
                question.id
            )));
        }
        if question.options.iter().any(|o| o.trim().is_empty()) {
            return Err(ServiceError::Parse(format!(
                "quiz question {} has an empty option",
                question.id
            )));
        }
        if question.correct_answer_index >= question.options.len() {
            return Err(ServiceError::Parse(format!(
                "quiz question {}: correctAnswerIndex {} out of range for {} options",
                question.id,
                question.correct_answer_index,
                question.options.len()
            )));
        }
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_passes_through() {
        let result = decode(Mode::Summary, "## Key points\n- light\n- energy").unwrap();
        assert_eq!(
            result,
            GenerationResult::Text("## Key points\n- light\n- energy".to_string())
        );
    }

    #[test]
    fn test_free_text_rejects_empty() {
        assert!(matches!(
            decode(Mode::Explanation, "   "),
            Err(ServiceError::Parse(_))
        ));
    }

    #[test]
    fn test_flashcards_decode() {
        let raw = r#"[{"question":"What is ATP?","answer":"The cell's energy currency."}]"#;
        match decode(Mode::Flashcards, raw).unwrap() {
            GenerationResult::Flashcards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].question, "What is ATP?");
            }
            other => panic!("expected flashcards, got {:?}", other),
        }
    }

    #[test]
    fn test_flashcards_reject_empty_answer() {
        let raw = r#"[{"question":"Q","answer":"  "}]"#;
        assert!(decode(Mode::Flashcards, raw).is_err());
    }

    #[test]
    fn test_quiz_decode_valid() {
        let raw = r#"[{
            "id": 1,
            "question": "2 + 2 = ?",
            "options": ["3", "4", "5", "22"],
            "correctAnswerIndex": 1,
            "explanation": "Basic addition."
        }]"#;
        match decode(Mode::Quiz, raw).unwrap() {
            GenerationResult::Quiz(questions) => {
                assert_eq!(questions.len(), 1);
                assert_eq!(questions[0].correct_answer_index, 1);
            }
            other => panic!("expected quiz, got {:?}", other),
        }
    }

    #[test]
    fn test_quiz_rejects_out_of_range_index() {
        let raw = r#"[{
            "id": 1,
            "question": "2 + 2 = ?",
            "options": ["3", "4"],
            "correctAnswerIndex": 2,
            "explanation": "oops"
        }]"#;
        assert!(matches!(
            decode(Mode::Quiz, raw),
            Err(ServiceError::Parse(_))
        ));
    }

    #[test]
    fn test_quiz_rejects_single_option() {
        let raw = r#"[{
            "id": 1,
            "question": "Only one choice?",
            "options": ["yes"],
            "correctAnswerIndex": 0,
            "explanation": "not a quiz"
        }]"#;
        assert!(decode(Mode::Quiz, raw).is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = decode(Mode::Quiz, "Sure! Here is your quiz: ...").unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let raw = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]"#;
        let decoded = decode(Mode::Flashcards, raw).unwrap();
        let encoded = decoded.encode().unwrap();
        assert_eq!(decode(Mode::Flashcards, &encoded).unwrap(), decoded);
    }
}
