use crate::api::QuestionSource;
use crate::error::TriviaError;
use crate::form::Form;
use crate::models::Question;
use crate::session::QuizSession;
use reqwest::Url;
use std::sync::{ mpsc, Arc };
use std::thread;

pub enum Mode {
    Form,
    Fetching,
    Quiz(QuizSession),
}

pub struct FetchCompletion {
    generation: u64,
    result: Result<Vec<Question>, TriviaError>,
}

pub struct App {
    pub form: Form,
    pub mode: Mode,
    pub notice: Option<String>,
    pub should_quit: bool,
    api_url: Url,
    source: Arc<dyn QuestionSource>,
    generation: u64,
    completions_tx: mpsc::Sender<FetchCompletion>,
    completions: mpsc::Receiver<FetchCompletion>,
}

impl App {
    pub fn new(api_url: Url, source: Arc<dyn QuestionSource>) -> Self {
        let (completions_tx, completions) = mpsc::channel();
        Self {
            form: Form::new(),
            mode: Mode::Form,
            notice: None,
            should_quit: false,
            api_url,
            source,
            generation: 0,
            completions_tx,
            completions,
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn on_up(&mut self) {
        if let Mode::Form = self.mode {
            self.form.focus_prev();
        }
    }

    pub fn on_down(&mut self) {
        if let Mode::Form = self.mode {
            self.form.focus_next();
        }
    }

    pub fn on_left(&mut self) {
        if let Mode::Form = self.mode {
            self.form.cycle_prev();
        }
    }

    pub fn on_right(&mut self) {
        if let Mode::Form = self.mode {
            self.form.cycle_next();
        }
    }

    pub fn on_backspace(&mut self) {
        if let Mode::Form = self.mode {
            self.form.on_backspace();
        }
    }

    pub fn on_char(&mut self, c: char) {
        match &mut self.mode {
            Mode::Form => self.form.on_char(c),
            Mode::Fetching => {}
            Mode::Quiz(session) => match c {
                't' | 'T' => {
                    session.submit_answer("True");
                }
                'f' | 'F' => {
                    session.submit_answer("False");
                }
                'n' => {
                    session.advance();
                }
                'r' if session.is_finished() => session.reset(),
                _ => {}
            },
        }
    }

    pub fn on_enter(&mut self) {
        match &mut self.mode {
            Mode::Form => {}
            Mode::Fetching => return,
            Mode::Quiz(session) => {
                session.advance();
                return;
            }
        }
        self.submit();
    }

    pub fn on_back(&mut self) {
        match self.mode {
            Mode::Form => {
                self.should_quit = true;
            }
            Mode::Fetching => {
                // Whatever is in flight now belongs to an older generation.
                self.generation += 1;
                self.mode = Mode::Form;
                tracing::debug!("fetch cancelled");
            }
            Mode::Quiz(_) => {
                self.mode = Mode::Form;
            }
        }
    }

    fn submit(&mut self) {
        let url = match self.form.request_url(&self.api_url) {
            Ok(url) => url,
            Err(err) => {
                self.notice = Some(err.to_string());
                return;
            }
        };
        tracing::info!("final API URL: {}", url);

        self.generation += 1;
        self.mode = Mode::Fetching;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        thread::spawn(move || {
            let result = source.fetch_questions(&url);
            // The receiver only goes away when the app has exited.
            let _ = tx.send(FetchCompletion { generation, result });
        });
    }

    pub fn poll_fetch(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.on_fetch_complete(completion);
        }
    }

    fn on_fetch_complete(&mut self, completion: FetchCompletion) {
        if completion.generation != self.generation || !matches!(self.mode, Mode::Fetching) {
            tracing::debug!(
                "discarding stale fetch (generation {}, current {})",
                completion.generation,
                self.generation
            );
            return;
        }

        match completion.result {
            Ok(questions) => {
                tracing::info!("starting quiz with {} questions", questions.len());
                self.mode = Mode::Quiz(QuizSession::start(questions));
            }
            Err(err) => {
                tracing::warn!("fetch failed: {:?}", err);
                self.mode = Mode::Form;
                self.notice = Some(err.to_string());
            }
        }
    }
}
