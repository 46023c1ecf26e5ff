//! GitHub REST client for release lookup and asset upload

use super::{Release, ReleaseService, UploadedAsset};
use crate::error::{CliError, ReleaseError, Result};
use crate::source::RepositoryIdentity;
use crate::version::VersionTag;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode, Url};

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GitHubReleaseConfig {
    /// API base URL (GitHub Enterprise uses `https://host/api/v3`)
    pub api_url: String,
    /// GitHub token (from arguments or environment)
    pub token: Option<String>,
}

impl Default for GitHubReleaseConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

/// GitHub release manager
pub struct GitHubReleaseManager {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubReleaseManager {
    /// Create new GitHub release manager
    ///
    /// Falls back to `GITHUB_TOKEN`, then `GH_TOKEN`, when the config has no token.
    pub fn new(config: GitHubReleaseConfig) -> Result<Self> {
        let token = config
            .token
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
            .or_else(|| std::env::var("GH_TOKEN").ok().filter(|t| !t.is_empty()))
            .ok_or_else(|| {
                ReleaseError::Cli(CliError::MissingArgument {
                    argument: "--token (or GITHUB_TOKEN / GH_TOKEN)".to_string(),
                })
            })?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReleaseError::GitHub(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Endpoint of the release for `tag`
    fn release_by_tag_url(&self, repo: &RepositoryIdentity, tag: &VersionTag) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ReleaseError::GitHub(format!("Invalid API URL '{}': {}", self.api_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ReleaseError::GitHub(format!("Invalid API URL '{}'", self.api_url)))?
            .pop_if_empty()
            .extend([
                "repos",
                repo.owner.as_str(),
                repo.name.as_str(),
                "releases",
                "tags",
                tag.as_str(),
            ]);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

impl ReleaseService for GitHubReleaseManager {
    async fn find_release_by_tag(
        &self,
        repo: &RepositoryIdentity,
        tag: &VersionTag,
    ) -> Result<Option<Release>> {
        let url = self.release_by_tag_url(repo, tag)?;
        log::debug!("GET {}", url);

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| ReleaseError::GitHub(format!("Release lookup failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = read_success_body(response).await?;
        let release = serde_json::from_str(&body)?;
        Ok(Some(release))
    }

    async fn upload_asset(
        &self,
        repo: &RepositoryIdentity,
        release: &Release,
        name: &str,
        content: Bytes,
    ) -> Result<UploadedAsset> {
        let mut url = upload_endpoint(&release.upload_url)?;
        url.query_pairs_mut().append_pair("name", name);
        log::debug!("POST {} ({} bytes) for {}", url, content.len(), repo);

        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await
            .map_err(|e| ReleaseError::GitHub(format!("Upload request failed: {}", e)))?;

        let body = read_success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Strip the URI template from a release `upload_url`
fn upload_endpoint(upload_url: &str) -> Result<Url> {
    let base = upload_url.split('{').next().unwrap_or(upload_url);
    Url::parse(base)
        .map_err(|e| ReleaseError::GitHub(format!("Invalid upload URL '{}': {}", upload_url, e)))
}

/// Return the body of a successful response, or map the status to an error
async fn read_success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if status.is_success() {
        return response
            .text()
            .await
            .map_err(|e| ReleaseError::GitHub(format!("Failed to read response body: {}", e)));
    }

    let body = response.text().await.unwrap_or_default();

    let detail = extract_error_message(&body);
    let reason = match status {
        StatusCode::UNAUTHORIZED => format!("Not authenticated (HTTP 401): {}", detail),
        StatusCode::FORBIDDEN => format!("Forbidden (HTTP 403): {}", detail),
        StatusCode::UNPROCESSABLE_ENTITY => format!("Rejected (HTTP 422): {}", detail),
        s if s.is_server_error() => format!("Server error (HTTP {}): {}", s.as_u16(), detail),
        s => format!("Unexpected response (HTTP {}): {}", s.as_u16(), detail),
    };

    Err(ReleaseError::GitHub(reason))
}

/// Pull `message` and any `errors[].code` out of a GitHub error body.
/// Falls back to the raw body (truncated) if parsing fails.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value.get("message").and_then(|m| m.as_str())
    {
        let codes: Vec<&str> = value
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("code").and_then(|c| c.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if codes.is_empty() {
            return message.to_string();
        }
        return format!("{} ({})", message, codes.join(", "));
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_string();
    }

    if trimmed.len() > 200 {
        let cut = trimmed
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= 200)
            .last()
            .unwrap_or(0);
        format!("{}...", &trimmed[..cut])
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// What the client sent, reduced to the parts these tests check
    #[derive(Debug, Default)]
    struct ReceivedRequest {
        method: String,
        path: String,
        authorization: Option<String>,
        accept: Option<String>,
        api_version: Option<String>,
        user_agent: Option<String>,
        content_type: Option<String>,
        body: Vec<u8>,
    }

    fn json_response(status: u16, body: &str) -> String {
        format!(
            "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Accept one connection on a random port and answer with `response` verbatim
    fn serve_once(response: String) -> (String, JoinHandle<ReceivedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut received = ReceivedRequest::default();

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut parts = request_line.split_whitespace();
            received.method = parts.next().unwrap_or_default().to_string();
            received.path = parts.next().unwrap_or_default().to_string();

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let Some((key, value)) = line.trim().split_once(':') else {
                    break;
                };
                let value = Some(value.trim().to_string());
                match key.to_ascii_lowercase().as_str() {
                    "authorization" => received.authorization = value,
                    "accept" => received.accept = value,
                    "x-github-api-version" => received.api_version = value,
                    "user-agent" => received.user_agent = value,
                    "content-type" => received.content_type = value,
                    "content-length" => {
                        content_length = value.and_then(|v| v.parse().ok()).unwrap_or(0)
                    }
                    _ => {}
                }
            }

            received.body = vec![0u8; content_length];
            reader.read_exact(&mut received.body).unwrap();

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            received
        });

        (base, handle)
    }

    fn manager(api_url: &str) -> GitHubReleaseManager {
        GitHubReleaseManager::new(GitHubReleaseConfig {
            api_url: api_url.to_string(),
            token: Some("tok_abc".to_string()),
        })
        .unwrap()
    }

    fn repo() -> RepositoryIdentity {
        RepositoryIdentity::new("acme", "path0")
    }

    fn tag(version: &str) -> VersionTag {
        VersionTag::from_ref(&format!("refs/tags/{}", version)).unwrap()
    }

    fn release_at(upload_url: &str) -> Release {
        Release {
            id: 42,
            tag_name: "v2.0.0".to_string(),
            html_url: String::new(),
            upload_url: upload_url.to_string(),
        }
    }

    #[test]
    fn test_api_url_trailing_slashes_trimmed() {
        let manager = manager("https://ghe.example.com/api/v3///");
        assert_eq!(manager.api_url, "https://ghe.example.com/api/v3");

        let url = manager.release_by_tag_url(&repo(), &tag("v1.0.0")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/path0/releases/tags/v1.0.0"
        );
    }

    #[test]
    fn test_release_url_on_bare_host() {
        let manager = manager(DEFAULT_API_URL);
        let url = manager.release_by_tag_url(&repo(), &tag("v2.0.0")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/path0/releases/tags/v2.0.0"
        );
    }

    #[test]
    fn test_upload_endpoint_strips_template() {
        let url = upload_endpoint(
            "https://uploads.github.com/repos/acme/path0/releases/42/assets{?name,label}",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/acme/path0/releases/42/assets"
        );
    }

    #[test]
    fn test_extract_error_message_with_codes() {
        let body = r#"{"message":"Validation Failed","errors":[{"resource":"ReleaseAsset","code":"already_exists","field":"name"}]}"#;
        assert_eq!(
            extract_error_message(body),
            "Validation Failed (already_exists)"
        );
    }

    #[test]
    fn test_extract_error_message_fallbacks() {
        assert_eq!(extract_error_message(""), "no details provided");
        assert_eq!(extract_error_message("bad gateway"), "bad gateway");
        let long = "x".repeat(500);
        assert!(extract_error_message(&long).ends_with("..."));
    }

    #[tokio::test]
    async fn test_find_release_by_tag_success() {
        let body = r#"{"id":42,"tag_name":"v2.0.0","html_url":"https://github.com/acme/path0/releases/tag/v2.0.0","upload_url":"https://uploads.github.com/repos/acme/path0/releases/42/assets{?name,label}","assets":[]}"#;
        let (base, handle) = serve_once(json_response(200, body));
        let manager = manager(&base);

        let release = manager
            .find_release_by_tag(&repo(), &tag("v2.0.0"))
            .await
            .unwrap()
            .unwrap();
        let req = handle.join().unwrap();

        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/repos/acme/path0/releases/tags/v2.0.0");
        assert_eq!(req.authorization.as_deref(), Some("Bearer tok_abc"));
        assert_eq!(req.accept.as_deref(), Some("application/vnd.github+json"));
        assert_eq!(req.api_version.as_deref(), Some(API_VERSION));
        assert!(req.user_agent.unwrap().starts_with("path0_release/"));

        assert_eq!(release.id, 42);
        assert_eq!(release.tag_name, "v2.0.0");
    }

    #[tokio::test]
    async fn test_find_release_by_tag_not_found() {
        let (base, handle) = serve_once(json_response(404, r#"{"message":"Not Found"}"#));
        let manager = manager(&base);

        let release = manager
            .find_release_by_tag(&repo(), &tag("v9.9.9"))
            .await
            .unwrap();
        handle.join().unwrap();

        assert!(release.is_none());
    }

    #[tokio::test]
    async fn test_find_release_by_tag_unauthorized() {
        let (base, handle) = serve_once(json_response(401, r#"{"message":"Bad credentials"}"#));
        let manager = manager(&base);

        let err = manager
            .find_release_by_tag(&repo(), &tag("v1.0.0"))
            .await
            .unwrap_err();
        handle.join().unwrap();

        let msg = err.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("Bad credentials"), "got: {msg}");
    }

    #[tokio::test]
    async fn test_upload_asset_posts_raw_bytes() {
        let body = r#"{"id":7,"name":"linux-x86_64-path0.so","size":4,"browser_download_url":"https://github.com/acme/path0/releases/download/v2.0.0/linux-x86_64-path0.so"}"#;
        let (base, handle) = serve_once(json_response(201, body));
        let manager = manager(DEFAULT_API_URL);
        let release = release_at(&format!(
            "{}/repos/acme/path0/releases/42/assets{{?name,label}}",
            base
        ));

        let asset = manager
            .upload_asset(
                &repo(),
                &release,
                "linux-x86_64-path0.so",
                Bytes::from_static(b"\x7fELF"),
            )
            .await
            .unwrap();
        let req = handle.join().unwrap();

        assert_eq!(req.method, "POST");
        assert_eq!(
            req.path,
            "/repos/acme/path0/releases/42/assets?name=linux-x86_64-path0.so"
        );
        assert_eq!(req.content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(req.body, b"\x7fELF");

        assert_eq!(asset.id, 7);
        assert_eq!(asset.name, "linux-x86_64-path0.so");
        assert_eq!(asset.size, 4);
    }

    #[tokio::test]
    async fn test_upload_asset_duplicate_name_rejected() {
        let body = r#"{"message":"Validation Failed","errors":[{"resource":"ReleaseAsset","code":"already_exists","field":"name"}]}"#;
        let (base, handle) = serve_once(json_response(422, body));
        let manager = manager(DEFAULT_API_URL);
        let release = release_at(&format!("{}/repos/acme/path0/releases/42/assets", base));

        let err = manager
            .upload_asset(&repo(), &release, "sqljs-path0.js", Bytes::from_static(b"js"))
            .await
            .unwrap_err();
        handle.join().unwrap();

        let msg = err.to_string();
        assert!(msg.contains("422"), "got: {msg}");
        assert!(msg.contains("already_exists"), "got: {msg}");
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_a_read_error() {
        let response = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\nConnection: close\r\n\r\n{\"id\":42,".to_string();
        let (base, handle) = serve_once(response);
        let manager = manager(&base);

        let err = manager
            .find_release_by_tag(&repo(), &tag("v2.0.0"))
            .await
            .unwrap_err();
        handle.join().unwrap();

        let msg = err.to_string();
        assert!(msg.contains("Failed to read response body"), "got: {msg}");
    }
}
