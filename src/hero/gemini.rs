//! Gemini image backend.

use super::ImageBackend;
use crate::error::{RestyleError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the hero image generator, fixed at startup.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    /// Pause between consecutive generation attempts.
    pub delay: Duration,
    pub output_dir: PathBuf,
}

impl GeneratorConfig {
    /// Creates a config with the given key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            width: 1200,
            height: 630,
            delay: Duration::from_secs(3),
            output_dir: PathBuf::from("assets/images"),
        }
    }

    /// Reads the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the API key through `lookup`; a missing or blank key is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RestyleError::MissingCredentials(API_KEY_VAR.to_string()))?;
        Ok(Self::new(key))
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
struct InlineData {
    #[serde(default)]
    data: String,
}

impl GenerateResponse {
    /// Decodes the first non-empty inline image of the first candidate.
    pub(crate) fn into_image(self) -> Result<Vec<u8>> {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        let data = parts
            .into_iter()
            .filter_map(|p| p.inline_data)
            .find(|d| !d.data.is_empty())
            .ok_or_else(|| RestyleError::Generation {
                message: "response contained no inline image data".into(),
            })?;

        Ok(STANDARD.decode(data.data.as_bytes())?)
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiBackend {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiBackend {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client: Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            RestyleError::InvalidConfig(format!("{API_KEY_VAR} contains invalid characters"))
        })?;
        headers.insert("x-goog-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("article-restyle"));
        Ok(headers)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl ImageBackend for GeminiBackend {
    fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.headers()?)
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(RestyleError::Generation {
                message: format!("API request failed ({}): {}", status, body),
            });
        }

        let parsed: GenerateResponse = response.json().map_err(|e| RestyleError::Generation {
            message: format!("Failed to parse response: {}", e),
        })?;
        parsed.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves one HTTP response on a local port and returns the raw request it received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                request.push_str(&lower);
            }
            let mut payload = vec![0; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8(payload).unwrap());

            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            request
        });

        (base_url, handle)
    }

    #[test]
    fn test_from_lookup_requires_key() {
        for value in [None, Some(String::new()), Some("   ".to_string())] {
            let result = GeneratorConfig::from_lookup(|_| value.clone());
            assert!(matches!(
                result,
                Err(RestyleError::MissingCredentials(ref var)) if var == "GEMINI_API_KEY"
            ));
        }
    }

    #[test]
    fn test_from_lookup_with_key() {
        let config = GeneratorConfig::from_lookup(|name| {
            (name == "GEMINI_API_KEY").then(|| "secret".to_string())
        })
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_dir, PathBuf::from("assets/images"));
    }

    #[test]
    fn test_generate_against_local_server() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "aGVsbG8="}}]}}]}"#,
        );
        let config = GeneratorConfig::new("secret-key").base_url(base_url);

        let bytes = GeminiBackend::new(&config).generate("a hero").unwrap();
        let request = server.join().unwrap();

        assert_eq!(bytes, b"hello");
        assert!(request.starts_with("post /v1beta/models/gemini-2.5-flash-image:generatecontent "));
        assert!(request.contains("x-goog-api-key: secret-key"));
        assert!(request.contains(r#""text":"a hero""#));
    }

    #[test]
    fn test_generate_reports_http_failure() {
        let (base_url, server) = serve_once("429 Too Many Requests", r#"{"error": "quota"}"#);
        let config = GeneratorConfig::new("secret-key").base_url(base_url);

        let result = GeminiBackend::new(&config).generate("a hero");
        server.join().unwrap();

        match result {
            Err(RestyleError::Generation { message }) => {
                assert!(message.contains("429"));
                assert!(message.contains("quota"));
            }
            other => panic!("expected a generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::new("key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!((config.width, config.height), (1200, 630));
        assert_eq!(config.delay, Duration::from_secs(3));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = GeneratorConfig::new("key").base_url("http://localhost:8080/v1/");
        let backend = GeminiBackend::new(&config);
        assert_eq!(
            backend.endpoint(),
            "http://localhost:8080/v1/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: "a hero" }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "a hero");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn test_response_with_inline_image() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                    ]
                }
            }]
        }"#;

        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_image().unwrap(), b"hello");
    }

    #[test]
    fn test_response_without_image() {
        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            empty.into_image(),
            Err(RestyleError::Generation { .. })
        ));

        let text_only: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "no"}]}}]}"#,
        )
        .unwrap();
        assert!(text_only.into_image().is_err());
    }

    #[test]
    fn test_response_with_bad_base64() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "!!"}}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(response.into_image(), Err(RestyleError::Base64(_))));
    }
}
