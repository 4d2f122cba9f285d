use html2text::from_read;

const UNWRAPPED: usize = 10_000;

pub fn decode_html(text: &str, width: usize) -> String {
    from_read(text.as_bytes(), width.max(1)).trim_end().to_string()
}

pub fn decode_label(text: &str) -> String {
    decode_html(text, UNWRAPPED)
}

pub fn prompt_lines(text: &str, width: usize) -> Vec<String> {
    let decoded = decode_label(text);
    textwrap::wrap(&decoded, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

pub fn score_line(score: usize, total: usize) -> String {
    format!("Your Score: {} / {}", score, total)
}
