use crate::models::Question;

// While not finished, `current < questions.len()` and `score <= current + 1`.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    revealed: bool,
    last_answer_correct: Option<bool>,
    finished: bool,
}

impl QuizSession {
    pub fn start(questions: Vec<Question>) -> Self {
        let mut session = Self {
            questions,
            current: 0,
            score: 0,
            revealed: false,
            last_answer_correct: None,
            finished: false,
        };
        session.reset();
        session
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.finished { None } else { self.questions.get(self.current) }
    }

    /// Returns `None` if the answer is already revealed or the quiz is over.
    pub fn submit_answer(&mut self, choice: &str) -> Option<bool> {
        if self.revealed {
            return None;
        }
        let question = self.current_question()?;
        let correct = question.correct_answer == choice;
        tracing::debug!(
            "question {} ({}, {}) answered {:?}, correct: {}",
            self.current + 1,
            question.id,
            question.kind,
            choice,
            correct
        );

        self.revealed = true;
        self.last_answer_correct = Some(correct);
        if correct {
            self.score += 1;
        }
        Some(correct)
    }

    pub fn advance(&mut self) -> bool {
        if !self.revealed || self.finished {
            return false;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.revealed = false;
            self.last_answer_correct = None;
        } else {
            self.finished = true;
            tracing::debug!("quiz finished with {}/{}", self.score, self.questions.len());
        }
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.revealed = false;
        self.last_answer_correct = None;
        self.finished = self.questions.is_empty();
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn last_answer_correct(&self) -> Option<bool> {
        if self.revealed { self.last_answer_correct } else { None }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn final_score(&self) -> Option<(usize, usize)> {
        self.finished.then_some((self.score, self.questions.len()))
    }
}
