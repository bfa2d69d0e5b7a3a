use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{NarrativeError, NarrativeGateway};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Streaming client for the Gemini `streamGenerateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NarrativeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NarrativeError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn stream_url(&self) -> Result<Url, NarrativeError> {
        let endpoint = format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        Url::parse_with_params(&endpoint, [("alt", "sse")])
            .map_err(|err| NarrativeError::InvalidUrl(err.to_string()))
    }
}

impl NarrativeGateway for GeminiClient {
    async fn stream(
        &self,
        prompt: &str,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<(), NarrativeError> {
        let url = self.stream_url()?;
        debug!(model = %self.model, "opening narrative stream");

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        let mut response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| NarrativeError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeError::Status(status.as_u16()));
        }

        let mut decoder = SseDecoder::default();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| NarrativeError::Transport(err.without_url().to_string()))?
        {
            for payload in decoder.push(&chunk) {
                emit_text(&payload, on_delta)?;
            }
        }
        for payload in decoder.finish() {
            emit_text(&payload, on_delta)?;
        }

        Ok(())
    }
}

fn emit_text(payload: &str, on_delta: &mut (dyn FnMut(&str) + Send)) -> Result<(), NarrativeError> {
    let text = extract_text(payload)?;
    if !text.is_empty() {
        on_delta(&text);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text of every part in one streamed chunk.
fn extract_text(payload: &str) -> Result<String, NarrativeError> {
    let chunk: StreamChunk =
        serde_json::from_str(payload).map_err(|err| NarrativeError::Decode(err.to_string()))?;

    Ok(chunk
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect())
}

/// Incremental splitter for `text/event-stream` bodies. Yields the payload of
/// each `data:` line once its terminating newline has arrived.
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    fn finish(&mut self) -> Vec<String> {
        let line = std::mem::take(&mut self.buffer);
        data_payload(&line).into_iter().collect()
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let payload = line.trim_end_matches(['\r', '\n']).strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        None
    } else {
        Some(payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    /// Answers a single request, writing `chunks` one at a time, and hands
    /// back the raw request it received.
    async fn stream_stub(
        status_line: &'static str,
        chunks: Vec<&'static str>,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("stub binds");
        let addr = listener.local_addr().expect("stub address");
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("client connects");
            let request = read_request(&mut socket).await;
            let _ = sender.send(request);

            let head = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n"
            );
            socket.write_all(head.as_bytes()).await.expect("head written");
            for chunk in chunks {
                socket.write_all(chunk.as_bytes()).await.expect("chunk written");
                socket.flush().await.expect("chunk flushed");
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/v1beta"), receiver)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.expect("request readable");
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn client(base_url: String) -> GeminiClient {
        GeminiClient::new(
            base_url,
            "llm-key",
            DEFAULT_GEMINI_MODEL,
            Duration::from_secs(5),
        )
        .expect("client builds")
    }

    #[tokio::test]
    async fn stream_delivers_deltas_split_across_writes() {
        let (base_url, request) = stream_stub(
            "200 OK",
            vec![
                r#"data: {"candidates":[{"content":{"parts":[{"text":"Exec"#,
                concat!(
                    r#"utive summary. "}]}}]}"#,
                    "\r\n\r\n",
                    r#"data: {"candidates":[{"content":{"parts":[{"text":"Cut HVAC load."}]}}]}"#,
                    "\n"
                ),
                ": keep-alive\n\ndata: [DONE]\n",
            ],
        )
        .await;

        let mut deltas = Vec::new();
        client(base_url)
            .stream("Summarize Aster Retail", &mut |delta: &str| {
                deltas.push(delta.to_string())
            })
            .await
            .expect("stream completes");

        assert_eq!(deltas, vec!["Executive summary. ", "Cut HVAC load."]);

        let request = request.await.expect("request captured").to_ascii_lowercase();
        assert!(request.starts_with(
            "post /v1beta/models/gemini-3-flash-preview:streamgeneratecontent?alt=sse "
        ));
        assert!(request.contains("x-goog-api-key: llm-key"));
        assert!(request.contains("summarize aster retail"));
    }

    #[tokio::test]
    async fn rejected_request_reports_status() {
        let (base_url, _request) = stream_stub("429 Too Many Requests", Vec::new()).await;

        let mut deltas = Vec::new();
        let err = client(base_url)
            .stream("Summarize", &mut |delta: &str| deltas.push(delta.to_string()))
            .await
            .expect_err("rate limited");

        assert_eq!(err, NarrativeError::Status(429));
        assert!(deltas.is_empty());
    }

    #[test]
    fn stream_url_targets_model_with_sse() {
        let client = GeminiClient::new(
            "https://llm.example/v1beta/",
            "key",
            DEFAULT_GEMINI_MODEL,
            Duration::from_secs(30),
        )
        .expect("client builds");

        let url = client.stream_url().expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://llm.example/v1beta/models/gemini-3-flash-preview:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn decoder_reassembles_lines_split_across_chunks() {
        let mut decoder = SseDecoder::default();

        let first = decoder.push(b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"te");
        assert!(first.is_empty());

        let second = decoder.push(b"xt\":\"Hello\"}]}}]}\r\n\r\ndata: {\"candidates\":[]}\n");
        assert_eq!(second.len(), 2);
        assert_eq!(extract_text(&second[0]).expect("decodes"), "Hello");
        assert_eq!(extract_text(&second[1]).expect("decodes"), "");

        assert!(decoder.push(b": keep-alive\n").is_empty());
        let tail = decoder.push(b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"!\"}]}}]}");
        assert!(tail.is_empty());
        assert_eq!(decoder.finish().len(), 1);
    }

    #[test]
    fn extract_text_joins_parts_and_skips_missing_text() {
        let payload = r###"{"candidates":[{"content":{"parts":[{"text":"## Summary\n"},{"inlineData":{}},{"text":"Energy use is high."}]}}]}"###;
        assert_eq!(
            extract_text(payload).expect("decodes"),
            "## Summary\nEnergy use is high."
        );
    }

    #[test]
    fn extract_text_rejects_garbage() {
        assert!(matches!(
            extract_text("not json"),
            Err(NarrativeError::Decode(_))
        ));
    }
}
