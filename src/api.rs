use crate::error::TriviaError;
use crate::models::{ Question, TriviaResponse };
use reqwest::{ header, Url };
use std::num::NonZeroU64;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

pub trait Filter: Copy + PartialEq + Sized + 'static {
    // Picker order, "any" first.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Any,
    GeneralKnowledge,
    Mythology,
    Sports,
    History,
    Art,
}

impl Category {
    pub fn id(self) -> Option<u32> {
        match self {
            Category::Any => None,
            Category::GeneralKnowledge => Some(9),
            Category::Mythology => Some(20),
            Category::Sports => Some(21),
            Category::History => Some(23),
            Category::Art => Some(25),
        }
    }
}

impl Filter for Category {
    const ALL: &'static [Self] = &[
        Category::Any,
        Category::GeneralKnowledge,
        Category::Mythology,
        Category::Sports,
        Category::History,
        Category::Art,
    ];

    fn label(self) -> &'static str {
        match self {
            Category::Any => "Any Category",
            Category::GeneralKnowledge => "General Knowledge",
            Category::Mythology => "Mythology",
            Category::Sports => "Sports",
            Category::History => "History",
            Category::Art => "Art",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Unselected,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn param(self) -> Option<String> {
        match self {
            Difficulty::Unselected => None,
            other => Some(other.label().to_lowercase()),
        }
    }
}

impl Filter for Difficulty {
    const ALL: &'static [Self] = &[
        Difficulty::Unselected,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    fn label(self) -> &'static str {
        match self {
            Difficulty::Unselected => "Select Difficulty",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Any,
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub fn param(self) -> Option<&'static str> {
        match self {
            QuestionType::Any => None,
            QuestionType::MultipleChoice => Some("multiple"),
            QuestionType::TrueFalse => Some("boolean"),
        }
    }
}

impl Filter for QuestionType {
    const ALL: &'static [Self] = &[
        QuestionType::Any,
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
    ];

    fn label(self) -> &'static str {
        match self {
            QuestionType::Any => "Any Type",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True / False",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub amount: NonZeroU64,
    pub category: Category,
    pub difficulty: Difficulty,
    pub kind: QuestionType,
}

impl QuizRequest {
    pub fn new(
        count: &str,
        category: Category,
        difficulty: Difficulty,
        kind: QuestionType
    ) -> Result<Self, TriviaError> {
        let amount = count
            .trim()
            .parse::<NonZeroU64>()
            .map_err(|_| TriviaError::InvalidQuestionCount)?;
        Ok(Self { amount, category, difficulty, kind })
    }

    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &self.amount.to_string());
            if let Some(id) = self.category.id() {
                query.append_pair("category", &id.to_string());
            }
            if let Some(difficulty) = self.difficulty.param() {
                query.append_pair("difficulty", &difficulty);
            }
            if let Some(kind) = self.kind.param() {
                query.append_pair("type", kind);
            }
        }
        url
    }
}

pub fn build_request_url(
    base: &Url,
    count: &str,
    category: Category,
    difficulty: Difficulty,
    kind: QuestionType
) -> Result<Url, TriviaError> {
    Ok(QuizRequest::new(count, category, difficulty, kind)?.url(base))
}

pub fn decode_response(body: &[u8]) -> Result<Vec<Question>, TriviaError> {
    let response: TriviaResponse = serde_json::from_slice(body)?;

    for question in response.results.iter().filter(|q| !q.is_consistent()) {
        tracing::warn!("correct answer also listed as incorrect: {:?}", question.question);
    }

    match response.response_code {
        0 if response.results.is_empty() => Err(TriviaError::NoResults),
        0 => Ok(response.results),
        1 => Err(TriviaError::NoResults),
        code => Err(TriviaError::UnexpectedCode(code)),
    }
}

pub trait QuestionSource: Send + Sync {
    fn fetch_questions(&self, url: &Url) -> Result<Vec<Question>, TriviaError>;
}

pub struct TriviaClient {
    client: reqwest::blocking::Client,
}

impl TriviaClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static("trivia-tui/0.1"));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl QuestionSource for TriviaClient {
    fn fetch_questions(&self, url: &Url) -> Result<Vec<Question>, TriviaError> {
        let resp = self.client.get(url.clone()).send()?;
        tracing::info!("{}: {}", resp.url(), resp.status());

        let body = resp.bytes()?;
        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{ Read, Write };
    use std::net::TcpListener;
    use std::thread;

    fn base() -> Url {
        Url::parse(DEFAULT_API_URL).unwrap()
    }

    fn url_for(
        count: &str,
        category: Category,
        difficulty: Difficulty,
        kind: QuestionType
    ) -> String {
        build_request_url(&base(), count, category, difficulty, kind).unwrap().to_string()
    }

    #[test]
    fn history_easy_true_false() {
        assert_eq!(
            url_for("5", Category::History, Difficulty::Easy, QuestionType::TrueFalse),
            "https://opentdb.com/api.php?amount=5&category=23&difficulty=easy&type=boolean"
        );
    }

    #[test]
    fn any_filters_are_omitted() {
        assert_eq!(
            url_for("10", Category::Any, Difficulty::Unselected, QuestionType::Any),
            "https://opentdb.com/api.php?amount=10"
        );
    }

    #[test]
    fn amount_appears_exactly_once() {
        for n in [1u64, 7, 50, 1000, u64::from(u32::MAX) + 1, u64::MAX] {
            let url = url_for(&n.to_string(), Category::Art, Difficulty::Hard, QuestionType::Any);
            let expected = format!("amount={}", n);
            assert_eq!(url.matches("amount=").count(), 1);
            assert!(url.contains(&expected), "{}", url);
        }
    }

    #[test]
    fn every_category_maps_to_its_code() {
        let expected = [
            (Category::GeneralKnowledge, "category=9"),
            (Category::Mythology, "category=20"),
            (Category::Sports, "category=21"),
            (Category::History, "category=23"),
            (Category::Art, "category=25"),
        ];
        for (category, param) in expected {
            let url = url_for("3", category, Difficulty::Unselected, QuestionType::Any);
            assert!(url.ends_with(param), "{}", url);
        }
    }

    #[test]
    fn difficulty_and_type_values() {
        let url = url_for("3", Category::Any, Difficulty::Medium, QuestionType::MultipleChoice);
        assert_eq!(url, "https://opentdb.com/api.php?amount=3&difficulty=medium&type=multiple");

        let url = url_for("3", Category::Any, Difficulty::Hard, QuestionType::Any);
        assert_eq!(url, "https://opentdb.com/api.php?amount=3&difficulty=hard");
    }

    #[test]
    fn invalid_counts_are_rejected() {
        for count in ["", "0", "-2", "abc", "3.5"] {
            let result = build_request_url(
                &base(),
                count,
                Category::Any,
                Difficulty::Unselected,
                QuestionType::Any
            );
            assert!(matches!(result, Err(TriviaError::InvalidQuestionCount)), "{:?}", count);
        }
    }

    #[test]
    fn counts_beyond_u32_are_accepted() {
        assert_eq!(
            url_for("99999999999", Category::Any, Difficulty::Unselected, QuestionType::Any),
            "https://opentdb.com/api.php?amount=99999999999"
        );
    }

    #[test]
    fn count_is_trimmed() {
        assert_eq!(
            url_for(" 4 ", Category::Any, Difficulty::Unselected, QuestionType::Any),
            "https://opentdb.com/api.php?amount=4"
        );
    }

    #[test]
    fn filters_cycle_with_wraparound() {
        assert_eq!(Category::Art.next(), Category::Any);
        assert_eq!(Category::Any.prev(), Category::Art);
        assert_eq!(Difficulty::Unselected.next(), Difficulty::Easy);
        assert_eq!(QuestionType::TrueFalse.next(), QuestionType::Any);
    }

    // Loopback requests must not be routed through an ambient proxy.
    fn local_client(timeout: Duration) -> TriviaClient {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap();
        TriviaClient { client }
    }

    #[test]
    fn builds_client() {
        assert!(TriviaClient::new(Some(Duration::from_secs(3))).is_ok());
        assert!(TriviaClient::new(None).is_ok());
    }

    #[test]
    fn refused_connection_is_network_failure() {
        let client = local_client(Duration::from_secs(3));
        let url = Url::parse("http://127.0.0.1:1/api.php?amount=1").unwrap();
        assert!(matches!(client.fetch_questions(&url), Err(TriviaError::NetworkFailure(_))));
    }

    #[test]
    fn body_is_decoded_whatever_the_status() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let body = r#"{"response_code":5,"results":[]}"#;
            let response = format!(
                "HTTP/1.1 429 Too Many Requests\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        let client = local_client(Duration::from_secs(5));
        let url = Url::parse(&format!("http://{}/api.php?amount=1", addr)).unwrap();
        let result = client.fetch_questions(&url);
        server.join().unwrap();

        assert!(matches!(result, Err(TriviaError::UnexpectedCode(5))));
    }

    #[test]
    fn decodes_success() {
        let body = br#"{"response_code":0,"results":[{"category":"Sports","type":"boolean",
            "difficulty":"easy","question":"Q?","correct_answer":"False","incorrect_answers":["True"]}]}"#;
        let questions = decode_response(body).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "False");
    }

    #[test]
    fn code_one_is_no_results() {
        let body = br#"{"response_code":1,"results":[]}"#;
        assert!(matches!(decode_response(body), Err(TriviaError::NoResults)));
    }

    #[test]
    fn empty_success_is_no_results() {
        let body = br#"{"response_code":0,"results":[]}"#;
        assert!(matches!(decode_response(body), Err(TriviaError::NoResults)));
    }

    #[test]
    fn other_codes_are_unexpected() {
        let body = br#"{"response_code":5,"results":[]}"#;
        assert!(matches!(decode_response(body), Err(TriviaError::UnexpectedCode(5))));
    }

    #[test]
    fn malformed_bodies_fail_to_decode() {
        let bodies: [&[u8]; 3] = [
            b"not json",
            br#"{"results":[]}"#,
            br#"{"response_code":"0","results":[]}"#,
        ];
        for body in bodies {
            assert!(matches!(decode_response(body), Err(TriviaError::DecodeFailure(_))));
        }
    }
}
