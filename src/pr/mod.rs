pub mod fetch;
pub mod types;

pub use types::{DiffLocation, PullRequest};

use std::collections::HashMap;
use std::time::Instant;

use reqwest::header;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// GitHub refuses requests without a User-Agent.
pub(crate) const USER_AGENT: &str = "pr-inspector";

/// The GitHub API caps per_page at 100.
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("request to {url} returned HTTP {status}; check that the user and project names are correct")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Raw pull request record as returned by the list endpoint. Only the fields
/// the pipeline consumes; diff_url is optional so one malformed record does
/// not sink the page.
#[derive(Debug, Deserialize)]
struct PullRecord {
    number: u64,
    title: String,
    user: User,
    diff_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

impl PullRecord {
    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            author: self.user.login,
            diff_url: self.diff_url.map(DiffLocation::new),
        }
    }
}

/// Thin client over the GitHub REST API. The base URL is injectable so tests
/// can point it at a mock server.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new() -> Self {
        Self::with_base("https://api.github.com")
    }

    pub fn with_base(api_base: impl Into<String>) -> Self {
        GitHubClient {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// List every open pull request of `owner/project`, following pagination
    /// until the final page.
    ///
    /// Pagination protocol: each response may carry a `Link` header with named
    /// relations. A `rel="last"` link means more pages remain, so the listing
    /// continues at the `rel="next"` URL; no `last` link (or no header at all)
    /// marks the current page as the final one. Pages run strictly
    /// sequentially since each depends on the previous response's links.
    ///
    /// Any transport failure or non-success status aborts the whole listing;
    /// no retries, no partial results.
    pub async fn list_open_pull_requests(
        &self,
        owner: &str,
        project: &str,
    ) -> Result<Vec<PullRequest>, PrError> {
        let mut url = format!(
            "{}/repos/{}/{}/pulls?per_page={}",
            self.api_base, owner, project, PAGE_SIZE
        );
        let mut collected = Vec::new();
        let started = Instant::now();

        loop {
            debug!(%url, "fetching pull request page");
            let response = self
                .http
                .get(&url)
                .header(header::USER_AGENT, USER_AGENT)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(PrError::BadStatus {
                    status: response.status(),
                    url,
                });
            }

            let link_header = response
                .headers()
                .get(header::LINK)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let records: Vec<PullRecord> = response.json().await?;
            collected.extend(records.into_iter().map(PullRecord::into_pull_request));

            let links = match link_header {
                Some(header) => parse_link_header(&header),
                None => break,
            };
            match (links.contains_key("last"), links.get("next")) {
                (true, Some(next)) => url = next.clone(),
                _ => break,
            }
        }

        info!(
            count = collected.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "listed open pull requests"
        );
        Ok(collected)
    }
}

/// Derive the diff locations to fetch, in listing order. Records missing a
/// diff_url are skipped with a diagnostic rather than failing the run.
pub fn diff_locations(pull_requests: &[PullRequest]) -> Vec<DiffLocation> {
    let mut locations = Vec::new();
    for pr in pull_requests {
        match &pr.diff_url {
            Some(location) => locations.push(location.clone()),
            None => warn!(number = pr.number, "pull request record is missing diff_url; skipping"),
        }
    }
    locations
}

/// Parse an RFC 5988 style `Link` header into a relation -> URL map, e.g.
/// `<https://...?page=2>; rel="next", <https://...?page=5>; rel="last"`.
fn parse_link_header(header: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();
    for part in header.split(',') {
        let Some((target, params)) = part.trim().split_once(';') else {
            continue;
        };
        let Some(url) = target
            .trim()
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
        else {
            continue;
        };
        for param in params.split(';') {
            if let Some(rel) = param.trim().strip_prefix("rel=") {
                links.insert(rel.trim_matches('"').to_string(), url.to_string());
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(number: u64, server_uri: &str) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "title": format!("PR {number}"),
            "user": { "login": "octocat" },
            "diff_url": format!("{server_uri}/org/repo/pull/{number}.diff"),
        })
    }

    #[test]
    fn test_parse_link_header_relations() {
        let header = "<https://api.example/pulls?page=2>; rel=\"next\", \
                      <https://api.example/pulls?page=5>; rel=\"last\"";
        let links = parse_link_header(header);
        assert_eq!(
            links.get("next").map(String::as_str),
            Some("https://api.example/pulls?page=2")
        );
        assert_eq!(
            links.get("last").map(String::as_str),
            Some("https://api.example/pulls?page=5")
        );
        assert!(!links.contains_key("prev"));
    }

    #[test]
    fn test_parse_link_header_garbage_is_ignored() {
        assert!(parse_link_header("not a link header").is_empty());
    }

    #[test]
    fn test_diff_locations_skips_missing_urls() {
        let prs = vec![
            PullRequest {
                number: 1,
                title: "a".to_string(),
                author: "x".to_string(),
                diff_url: Some(DiffLocation::new("https://github.com/o/r/pull/1.diff")),
            },
            PullRequest {
                number: 2,
                title: "b".to_string(),
                author: "y".to_string(),
                diff_url: None,
            },
        ];
        let locations = diff_locations(&prs);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].pull_id(), Some("1"));
    }

    #[tokio::test]
    async fn test_single_page_without_link_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls"))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([record(1, &server.uri())])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::with_base(server.uri());
        let prs = client.list_open_pull_requests("org", "repo").await.unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 1);
        assert_eq!(prs[0].author, "octocat");
    }

    #[tokio::test]
    async fn test_pagination_stops_when_last_relation_disappears() {
        let server = MockServer::start().await;
        let uri = server.uri();
        let page_url = |page: u32| format!("{uri}/repos/org/repo/pulls?per_page=100&page={page}");

        // Page 1: advertises next and last, so listing continues.
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls"))
            .and(query_param_is_missing("page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([record(1, &uri)]))
                    .insert_header(
                        "Link",
                        format!(
                            "<{}>; rel=\"next\", <{}>; rel=\"last\"",
                            page_url(2),
                            page_url(3)
                        )
                        .as_str(),
                    ),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Page 2: still advertises a last relation.
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([record(2, &uri)]))
                    .insert_header(
                        "Link",
                        format!(
                            "<{}>; rel=\"next\", <{}>; rel=\"last\"",
                            page_url(3),
                            page_url(3)
                        )
                        .as_str(),
                    ),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Page 3: only a prev relation, which marks it as the final page.
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls"))
            .and(query_param("page", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([record(3, &uri)]))
                    .insert_header("Link", format!("<{}>; rel=\"prev\"", page_url(2)).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::with_base(server.uri());
        let prs = client.list_open_pull_requests("org", "repo").await.unwrap();
        let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_listing_fails_on_client_error_with_url_hint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/missing/pulls"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base(server.uri());
        let error = client
            .list_open_pull_requests("org", "missing")
            .await
            .unwrap_err();
        let message = error.to_string();
        assert!(message.contains("404"), "unexpected message: {message}");
        assert!(
            message.contains("/repos/org/missing/pulls"),
            "unexpected message: {message}"
        );
        assert!(
            message.contains("user and project"),
            "unexpected message: {message}"
        );
    }

    #[tokio::test]
    async fn test_missing_diff_url_does_not_fail_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "number": 9, "title": "No diff", "user": { "login": "octocat" } }
            ])))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base(server.uri());
        let prs = client.list_open_pull_requests("org", "repo").await.unwrap();
        assert_eq!(prs.len(), 1);
        assert!(prs[0].diff_url.is_none());
        assert!(diff_locations(&prs).is_empty());
    }
}
