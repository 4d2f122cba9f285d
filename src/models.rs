use uuid::Uuid;

#[derive(serde::Deserialize, Debug)]
pub struct TriviaResponse {
    pub response_code: i64,
    pub results: Vec<Question>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Question {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    pub fn is_consistent(&self) -> bool {
        !self.incorrect_answers.contains(&self.correct_answer)
    }
}
