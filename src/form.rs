use crate::api::{ build_request_url, Category, Difficulty, Filter, QuestionType };
use crate::error::TriviaError;
use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Count,
    Difficulty,
    Category,
    Type,
    Start,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::Count,
        Field::Difficulty,
        Field::Category,
        Field::Type,
        Field::Start,
    ];

    fn offset(self, by: usize) -> Field {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + by) % Self::ORDER.len()]
    }
}

pub struct Form {
    pub count: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub kind: QuestionType,
    pub focus: Field,
}

impl Form {
    pub fn new() -> Self {
        Self {
            count: String::new(),
            difficulty: Difficulty::default(),
            category: Category::default(),
            kind: QuestionType::default(),
            focus: Field::Count,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.offset(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.offset(Field::ORDER.len() - 1);
    }

    pub fn cycle_next(&mut self) {
        match self.focus {
            Field::Difficulty => self.difficulty = self.difficulty.next(),
            Field::Category => self.category = self.category.next(),
            Field::Type => self.kind = self.kind.next(),
            Field::Count | Field::Start => {}
        }
    }

    pub fn cycle_prev(&mut self) {
        match self.focus {
            Field::Difficulty => self.difficulty = self.difficulty.prev(),
            Field::Category => self.category = self.category.prev(),
            Field::Type => self.kind = self.kind.prev(),
            Field::Count | Field::Start => {}
        }
    }

    /// Only digits reach the count, like a number pad.
    pub fn on_char(&mut self, c: char) {
        if self.focus == Field::Count && c.is_ascii_digit() {
            self.count.push(c);
        }
    }

    pub fn on_backspace(&mut self) {
        if self.focus == Field::Count {
            self.count.pop();
        }
    }

    pub fn request_url(&self, base: &Url) -> Result<Url, TriviaError> {
        build_request_url(base, &self.count, self.category, self.difficulty, self.kind)
    }
}
