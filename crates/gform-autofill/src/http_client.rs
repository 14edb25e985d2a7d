//! Async HTTP client wrapping reqwest.
//!
//! Plain GET for form pages and url-encoded POST for submissions. No retries:
//! a failed fetch surfaces to the caller and a failed submission is recorded
//! as a failed attempt.

use crate::config::FillerConfig;
use crate::types::{FormError, FormResult};

/// Response from an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// HTTP client shared by the schema fetcher and the submitter.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the configured user agent and timeout.
    pub fn new(config: &FillerConfig) -> FormResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> FormResult<HttpResponse> {
        let r = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FormError::SchemaFetch(format!("GET {url}: {e}")))?;

        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let body = r
            .text()
            .await
            .map_err(|e| FormError::SchemaFetch(format!("reading body of {url}: {e}")))?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }

    /// POST form data (url-encoded) with extra headers.
    ///
    /// Repeated keys in `form_fields` are sent as repeated pairs. Any status
    /// is returned as a response; only transport failures are errors.
    pub async fn post_form(
        &self,
        url: &str,
        form_fields: &[(String, String)],
        extra_headers: &[(&str, &str)],
    ) -> FormResult<HttpResponse> {
        let mut builder = self.client.post(url);

        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        builder = builder.form(form_fields);

        let r = builder
            .send()
            .await
            .map_err(|e| FormError::SubmissionNetwork(e.to_string()))?;
        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let body = r
            .text()
            .await
            .map_err(|e| FormError::SubmissionNetwork(format!("reading response of {url}: {e}")))?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(&FillerConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_configured_timeout_applies_to_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1_000)))
            .mount(&server)
            .await;

        let client = HttpClient::new(&FillerConfig::default().with_timeout_ms(100)).unwrap();
        let err = client
            .get(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FormError::SchemaFetch(_)));
    }

    #[tokio::test]
    async fn test_configured_timeout_applies_to_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1_000)))
            .mount(&server)
            .await;

        let client = HttpClient::new(&FillerConfig::default().with_timeout_ms(100)).unwrap();
        let err = client
            .post_form(&format!("{}/slow", server.uri()), &[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FormError::SubmissionNetwork(_)));
    }

    #[tokio::test]
    async fn test_post_form_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/formResponse"))
            .respond_with(ResponseTemplate::new(201).set_body_string("recorded"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&FillerConfig::default()).unwrap();
        let url = format!("{}/formResponse", server.uri());
        let fields = [("entry.1".to_string(), "a".to_string())];
        let resp = client.post_form(&url, &fields, &[]).await.unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body, "recorded");
        assert_eq!(resp.url, url);
    }
}
