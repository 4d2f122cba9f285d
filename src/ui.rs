use crate::{
    api::Filter,
    app::{ App, Mode },
    form::{ Field, Form },
    session::QuizSession,
    utils::{ decode_label, prompt_lines, score_line },
};
use tui::{
    backend::Backend,
    Terminal,
    Frame,
    widgets::{ Block, Borders, Clear, Paragraph, Wrap },
    layout::{ Alignment, Layout, Constraint, Direction, Rect },
    text::{ Span, Spans, Text },
    style::{ Style, Color, Modifier },
};
use crossterm::event::KeyCode;
use std::time::{ Duration, Instant };

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration
) -> std::io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();
        if crossterm::event::poll(timeout)? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if handle_key(&mut app, key.code) {
                    return Ok(());
                }
            }
        }

        app.poll_fetch();

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

// Returns true when the app should exit.
pub fn handle_key(app: &mut App, code: KeyCode) -> bool {
    use KeyCode::*;
    if app.notice.is_some() {
        if code == Char('q') {
            return true;
        }
        app.dismiss_notice();
        return false;
    }
    match code {
        Char('q') => {
            return true;
        }
        Esc => app.on_back(),
        Up | BackTab => app.on_up(),
        Down | Tab => app.on_down(),
        Left => app.on_left(),
        Right => app.on_right(),
        Backspace => app.on_backspace(),
        Enter => app.on_enter(),
        Char(c) => app.on_char(c),
        _ => {}
    }
    app.should_quit
}

pub fn draw_ui<B: Backend>(f: &mut Frame<B>, app: &App) {
    let full_area = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(full_area);

    let title = Paragraph::new(
        Span::styled("Trivia Game", Style::default().add_modifier(Modifier::BOLD))
    )
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Blue));
    f.render_widget(title, chunks[0]);

    let hint = match &app.mode {
        Mode::Form => "↑/↓ field · ←/→ change · digits count · Enter start · q quit",
        Mode::Fetching => "Esc cancel · q quit",
        Mode::Quiz(session) if session.is_finished() => "r play again · Esc new quiz · q quit",
        Mode::Quiz(session) if session.is_revealed() => "Enter next · Esc new quiz · q quit",
        Mode::Quiz(_) => "t True · f False · Esc new quiz · q quit",
    };
    f.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        chunks[2]
    );

    match &app.mode {
        Mode::Form => draw_form(f, &app.form, chunks[1]),
        Mode::Fetching => {
            let paragraph = Paragraph::new("Fetching questions...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::LightYellow));
            f.render_widget(paragraph, chunks[1]);
        }
        Mode::Quiz(session) => draw_quiz(f, session, chunks[1]),
    }

    if let Some(notice) = &app.notice {
        draw_notice(f, notice, full_area);
    }
}

fn draw_form<B: Backend>(f: &mut Frame<B>, form: &Form, area: Rect) {
    let count = if form.count.is_empty() { "Enter a number" } else { form.count.as_str() };
    let rows = [
        (Field::Count, "Number of Questions", count),
        (Field::Difficulty, "Select Difficulty", form.difficulty.label()),
        (Field::Category, "Select Category", form.category.label()),
        (Field::Type, "Select Type", form.kind.label()),
    ];

    let mut lines: Vec<Spans> = Vec::new();
    for (field, name, value) in rows {
        let value_style = if field == form.focus {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::LightYellow)
        };
        lines.push(
            Spans::from(
                vec![
                    Span::styled(format!("{:<24}", name), Style::default().fg(Color::White)),
                    Span::styled(value.to_string(), value_style)
                ]
            )
        );
        lines.push(Spans::from(""));
    }

    let start_style = if form.focus == Field::Start {
        Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    };
    lines.push(Spans::from(Span::styled("[ Start Quiz ]", start_style)));

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default().borders(Borders::ALL)
    );
    f.render_widget(paragraph, area);
}

fn draw_quiz<B: Backend>(f: &mut Frame<B>, session: &QuizSession, area: Rect) {
    let question = match (session.final_score(), session.current_question()) {
        (Some((score, total)), _) => {
            let lines = vec![
                Spans::from(""),
                Spans::from(
                    Span::styled("Quiz Finished!", Style::default().add_modifier(Modifier::BOLD))
                ),
                Spans::from(""),
                Spans::from(score_line(score, total))
            ];
            let paragraph = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
            f.render_widget(paragraph, area);
            return;
        }
        (None, Some(question)) => question,
        (None, None) => {
            return;
        }
    };

    let wrap_width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Spans> = vec![
        Spans::from(
            Span::styled(
                format!("{} · {}", decode_label(&question.category), question.difficulty),
                Style::default().fg(Color::DarkGray)
            )
        ),
        Spans::from("")
    ];
    lines.extend(
        prompt_lines(&question.question, wrap_width)
            .into_iter()
            .map(|line| Spans::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD))))
    );
    lines.push(Spans::from(""));
    lines.push(
        Spans::from(
            vec![
                Span::styled("[ True ]", Style::default().fg(Color::White).bg(Color::Blue)),
                Span::raw("    "),
                Span::styled("[ False ]", Style::default().fg(Color::White).bg(Color::Blue))
            ]
        )
    );

    if let Some(correct) = session.last_answer_correct() {
        let (text, color) = if correct {
            ("Correct!", Color::LightGreen)
        } else {
            ("Wrong!", Color::LightRed)
        };
        lines.push(Spans::from(""));
        lines.push(
            Spans::from(
                Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
            )
        );
        lines.push(Spans::from("Next Question (Enter)"));
    }

    lines.push(Spans::from(""));
    lines.push(
        Spans::from(
            Span::styled(
                format!("Question {} of {}", session.current_index() + 1, session.len()),
                Style::default().fg(Color::DarkGray)
            )
        )
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Quiz"));
    f.render_widget(paragraph, area);
}

fn draw_notice<B: Backend>(f: &mut Frame<B>, notice: &str, area: Rect) {
    let width = (notice.chars().count() as u16 + 4).max(20).min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let paragraph = Paragraph::new(
        Text::from(vec![Spans::from(notice.to_string()), Spans::from(""), Spans::from("OK")])
    )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Trivia Error")
                .style(Style::default().fg(Color::LightRed))
        );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
