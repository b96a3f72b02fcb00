//! Input validation for session operations.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Session ID is empty or whitespace.
    #[error("session ID is empty")]
    EmptySessionId,

    /// Question text is empty or whitespace.
    #[error("question is empty")]
    EmptyQuestion,

    /// Answer text is empty or whitespace.
    #[error("answer text is empty")]
    EmptyAnswer,
}

/// Validate a session ID.
pub fn validate_session_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptySessionId);
    }
    Ok(())
}

/// Validate a question.
pub fn validate_question(question: &str) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    Ok(())
}

/// Validate answer text.
pub fn validate_answer(answer: &str) -> Result<(), ValidationError> {
    if answer.trim().is_empty() {
        return Err(ValidationError::EmptyAnswer);
    }
    Ok(())
}
