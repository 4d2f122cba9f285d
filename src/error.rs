#[derive(Debug, thiserror::Error)]
pub enum TriviaError {
    #[error("Please enter a valid number of questions.")]
    InvalidQuestionCount,
    #[error("Could not reach the trivia server.")]
    NetworkFailure(#[from] reqwest::Error),
    #[error("Failed to decode trivia data.")]
    DecodeFailure(#[from] serde_json::Error),
    #[error("No results found for the selected options.")]
    NoResults,
    #[error("{}", unexpected_code_message(.0))]
    UnexpectedCode(i64),
}

fn unexpected_code_message(code: &i64) -> String {
    match *code {
        5 => "Too many requests, wait a few seconds and try again.".to_string(),
        code => format!("Unexpected API response (code {}).", code),
    }
}
