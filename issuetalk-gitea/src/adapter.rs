//! The Gitea adapter.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

use issuetalk_core::{
    ApiError, ApiResult, Comment, CommentPage, CommentQuery, Issue, IssueSelector, Platform,
    PlatformApi, PlatformMeta, Reaction, ReactionSummary, SortOrder, User,
};
use issuetalk_oauth::OAuthConfig;

use crate::normalize::{count_reactions, normalize_comment, normalize_issue, normalize_user};
use crate::types::{
    CommentBody, CreateIssueOption, CreateLabelOption, GiteaComment, GiteaErrorBody, GiteaIssue,
    GiteaLabel, GiteaReaction, GiteaUser, MarkdownOption, ReactionOption,
};

/// Default Gitea instance.
pub const DEFAULT_BASE_URL: &str = "https://gitea.com";

/// Color used when the adapter has to create a configured label.
const DEFAULT_LABEL_COLOR: &str = "#00aabb";

/// Comment storage backed by one repository's issue tracker on a Gitea
/// instance.
///
/// All operations are scoped to the configured `owner/repo`. Reads work
/// anonymously on public repositories; writes need an OAuth access token
/// obtained through [`PlatformApi::exchange_code`] or the `issuetalk`
/// facade's login helper.
#[derive(Debug, Clone)]
pub struct GiteaApi {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    labels: Vec<String>,
    client_id: String,
    default_timeout: Duration,
}

impl GiteaApi {
    /// Create an adapter for `owner/repo` on gitea.com.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            labels: Vec::new(),
            client_id: client_id.into(),
            default_timeout: Duration::from_secs(30),
        }
    }

    /// Create from environment variables: `GITEA_OWNER`, `GITEA_REPO`,
    /// `GITEA_CLIENT_ID`, and optionally `GITEA_BASE_URL` and
    /// `GITEA_LABELS` (comma-separated).
    pub fn from_env() -> Result<Self, ApiError> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| ApiError::configuration(format!("{} not set", name)))
        };
        let mut api = Self::new(var("GITEA_OWNER")?, var("GITEA_REPO")?, var("GITEA_CLIENT_ID")?);
        if let Ok(base_url) = std::env::var("GITEA_BASE_URL") {
            api = api.with_base_url(base_url);
        }
        if let Ok(labels) = std::env::var("GITEA_LABELS") {
            api = api.with_labels(labels.split(',').map(str::trim).filter(|l| !l.is_empty()));
        }
        Ok(api)
    }

    /// Point the adapter at a self-hosted instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Labels attached to issues the adapter creates, and used to narrow
    /// title searches.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The instance base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("repos/{}/{}/{}", self.owner, self.repo, rest)
    }

    fn authed(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.header("Authorization", format!("bearer {}", token)),
            None => request,
        }
    }

    /// GET with the cache-busting `timestamp` parameter Gitea's own web UI
    /// uses to dodge stale proxy caches.
    fn get(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self
            .client
            .get(self.api_url(path))
            .query(&[("timestamp", timestamp_millis().to_string())]);
        self.authed(request, token)
    }

    fn post(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        self.authed(self.client.post(self.api_url(path)), token)
    }

    fn patch(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        self.authed(self.client.patch(self.api_url(path)), token)
    }

    fn delete(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        self.authed(self.client.delete(self.api_url(path)), token)
    }

    /// Send a request, mapping non-2xx responses to [`ApiError`].
    async fn execute(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.timeout(self.default_timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_response(status.as_u16(), &body, &headers));
        }
        Ok(response)
    }

    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::invalid_response(e.to_string()))
    }

    async fn fetch_comment_reactions(
        &self,
        token: Option<&str>,
        comment: u64,
    ) -> ApiResult<ReactionSummary> {
        let path = self.repo_path(&format!("issues/comments/{}/reactions", comment));
        let reactions: Vec<GiteaReaction> = self.execute_json(self.get(&path, token)).await?;
        Ok(count_reactions(&reactions))
    }

    /// Render markdown the way Gitea renders issue comments.
    async fn render(&self, token: Option<&str>, text: &str) -> ApiResult<String> {
        let option = MarkdownOption {
            text: text.to_string(),
            mode: "gfm".to_string(),
            context: format!("{}/{}", self.owner, self.repo),
            wiki: false,
        };
        let response = self
            .execute(self.post("markdown", token).json(&option))
            .await?;
        Ok(response.text().await.unwrap_or_default())
    }

    /// Resolve the configured label names to ids, creating missing labels.
    async fn ensure_labels(&self, token: &str) -> ApiResult<Vec<u64>> {
        if self.labels.is_empty() {
            return Ok(Vec::new());
        }

        let existing: Vec<GiteaLabel> = self
            .execute_json(self.get(&self.repo_path("labels"), Some(token)))
            .await?;

        let mut ids = Vec::with_capacity(self.labels.len());
        for name in &self.labels {
            if let Some(label) = existing.iter().find(|l| &l.name == name) {
                ids.push(label.id);
                continue;
            }
            tracing::debug!(label = %name, "creating missing label");
            let created: GiteaLabel = self
                .execute_json(
                    self.post(&self.repo_path("labels"), Some(token))
                        .json(&CreateLabelOption {
                            name: name.clone(),
                            color: DEFAULT_LABEL_COLOR.to_string(),
                        }),
                )
                .await?;
            ids.push(created.id);
        }
        Ok(ids)
    }
}

#[async_trait]
impl PlatformApi for GiteaApi {
    fn platform(&self) -> Platform {
        Platform {
            name: "Gitea".to_string(),
            link: self.base_url.clone(),
            version: "v1".to_string(),
            meta: PlatformMeta {
                reactable: true,
                // Gitea cannot sort comment listings server-side; the
                // adapter orders client-side instead.
                sortable: false,
            },
        }
    }

    fn oauth_config(&self) -> OAuthConfig {
        let base = self.base_url.trim_end_matches('/');
        OAuthConfig::new(
            self.client_id.clone(),
            format!("{}/login/oauth/authorize", base),
            format!("{}/login/oauth/access_token", base),
        )
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        let user: GiteaUser = self.execute_json(self.get("user", Some(token))).await?;
        Ok(normalize_user(user, &self.base_url))
    }

    async fn issue(
        &self,
        token: Option<&str>,
        selector: &IssueSelector,
    ) -> ApiResult<Option<Issue>> {
        match selector {
            IssueSelector::Number(number) => {
                let path = self.repo_path(&format!("issues/{}", number));
                match self.execute_json::<GiteaIssue>(self.get(&path, token)).await {
                    Ok(issue) => Ok(Some(normalize_issue(issue))),
                    Err(ApiError::NotFound(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            IssueSelector::Title(title) => {
                let mut request = self
                    .get(&self.repo_path("issues"), token)
                    .query(&[("q", title.as_str()), ("type", "issues")]);
                if !self.labels.is_empty() {
                    request = request.query(&[("labels", self.labels.join(","))]);
                }

                let found: Vec<GiteaIssue> = self.execute_json(request).await?;
                let mut matches = found.into_iter().filter(|issue| &issue.title == title);
                let first = matches.next();
                if first.is_some() && matches.next().is_some() {
                    tracing::warn!(title = %title, "multiple issues share this title, using the first");
                }
                Ok(first.map(normalize_issue))
            }
        }
    }

    async fn create_issue(&self, token: &str, title: &str, content: &str) -> ApiResult<Issue> {
        let labels = self.ensure_labels(token).await?;
        tracing::debug!(owner = %self.owner, repo = %self.repo, title = %title, "creating issue");
        let issue: GiteaIssue = self
            .execute_json(
                self.post(&self.repo_path("issues"), Some(token))
                    .json(&CreateIssueOption {
                        title: title.to_string(),
                        body: content.to_string(),
                        labels,
                    }),
            )
            .await?;
        Ok(normalize_issue(issue))
    }

    async fn comments(
        &self,
        token: Option<&str>,
        issue: u64,
        query: &CommentQuery,
    ) -> ApiResult<CommentPage> {
        let path = self.repo_path(&format!("issues/{}/comments", issue));
        let mut all: Vec<GiteaComment> = self.execute_json(self.get(&path, token)).await?;

        // Gitea returns the full listing, unsorted and unpaged; order and
        // slice here before paying for enrichment.
        match query.sort {
            SortOrder::Asc => all.sort_by_key(|c| c.created_at),
            SortOrder::Desc => all.sort_by_key(|c| std::cmp::Reverse(c.created_at)),
        }
        let count = all.len();
        let (start, end) = query.slice_bounds(count);
        let window: Vec<GiteaComment> = all[start..end].to_vec();
        tracing::debug!(issue, count, window = window.len(), "enriching comment page");

        let data = futures::future::try_join_all(window.into_iter().map(|comment| async move {
            let (reactions, content) = tokio::try_join!(
                self.fetch_comment_reactions(token, comment.id),
                self.render(token, &comment.body),
            )?;
            Ok::<Comment, ApiError>(normalize_comment(
                comment,
                content,
                Some(reactions),
                &self.base_url,
            ))
        }))
        .await?;

        Ok(CommentPage {
            count,
            page: query.page,
            per_page: query.per_page,
            data,
        })
    }

    async fn create_comment(&self, token: &str, issue: u64, content: &str) -> ApiResult<Comment> {
        let path = self.repo_path(&format!("issues/{}/comments", issue));
        let comment: GiteaComment = self
            .execute_json(self.post(&path, Some(token)).json(&CommentBody {
                body: content.to_string(),
            }))
            .await?;
        let rendered = self.render(Some(token), &comment.body).await?;
        Ok(normalize_comment(comment, rendered, None, &self.base_url))
    }

    async fn edit_comment(
        &self,
        token: &str,
        _issue: u64,
        comment: u64,
        content: &str,
    ) -> ApiResult<Comment> {
        let path = self.repo_path(&format!("issues/comments/{}", comment));
        let comment: GiteaComment = self
            .execute_json(self.patch(&path, Some(token)).json(&CommentBody {
                body: content.to_string(),
            }))
            .await?;
        let rendered = self.render(Some(token), &comment.body).await?;
        Ok(normalize_comment(comment, rendered, None, &self.base_url))
    }

    async fn delete_comment(&self, token: &str, _issue: u64, comment: u64) -> ApiResult<bool> {
        let path = self.repo_path(&format!("issues/comments/{}", comment));
        self.execute(self.delete(&path, Some(token))).await?;
        Ok(true)
    }

    async fn comment_reactions(
        &self,
        token: Option<&str>,
        _issue: u64,
        comment: u64,
    ) -> ApiResult<ReactionSummary> {
        self.fetch_comment_reactions(token, comment).await
    }

    async fn toggle_reaction(
        &self,
        token: &str,
        _issue: u64,
        comment: u64,
        reaction: Reaction,
    ) -> ApiResult<bool> {
        let path = self.repo_path(&format!("issues/comments/{}/reactions", comment));
        let option = ReactionOption {
            content: reaction.wire_name().to_string(),
        };

        let response = self
            .execute(self.post(&path, Some(token)).json(&option))
            .await?;

        // 200 instead of 201 means the user already left this reaction;
        // remove it so the operation toggles.
        if response.status() == StatusCode::OK {
            tracing::debug!(comment, reaction = reaction.wire_name(), "removing existing reaction");
            self.execute(self.delete(&path, Some(token)).json(&option))
                .await?;
        }
        Ok(true)
    }

    async fn render_markdown(&self, token: Option<&str>, text: &str) -> ApiResult<String> {
        self.render(token, text).await
    }
}

fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Map a non-2xx Gitea response to [`ApiError`].
fn error_for_response(status: u16, body: &str, headers: &HeaderMap) -> ApiError {
    if let Ok(err) = serde_json::from_str::<GiteaErrorBody>(body) {
        match status {
            401 | 403 => return ApiError::auth(err.message),
            404 => return ApiError::not_found(err.message),
            429 => return ApiError::rate_limited(parse_retry_after(headers)),
            _ => {
                return ApiError::Api {
                    message: err.message,
                    code: None,
                }
            }
        }
    }

    match status {
        404 => ApiError::not_found(body.to_string()),
        429 => ApiError::rate_limited(parse_retry_after(headers)),
        _ => ApiError::http(status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuetalk_core::CommentQuery;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
    use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

    /// Matches any request carrying the cache-busting `timestamp` parameter.
    struct HasTimestamp;

    impl Match for HasTimestamp {
        fn matches(&self, request: &Request) -> bool {
            request.url.query_pairs().any(|(k, _)| k == "timestamp")
        }
    }

    fn api(server: &MockServer) -> GiteaApi {
        GiteaApi::new("owner", "repo", "client-id").with_base_url(server.uri())
    }

    fn user_json(login: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "login": login,
            "avatar_url": format!("https://git.example/avatars/{login}")
        })
    }

    fn issue_json(number: u64, title: &str) -> serde_json::Value {
        json!({
            "id": number * 100,
            "number": number,
            "title": title,
            "body": "comment thread",
            "html_url": format!("https://git.example/owner/repo/issues/{number}"),
            "user": user_json("alice"),
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        })
    }

    fn comment_json(id: u64, body: &str, created_at: &str) -> serde_json::Value {
        json!({
            "id": id,
            "body": body,
            "user": user_json("alice"),
            "created_at": created_at,
            "updated_at": created_at
        })
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer_and_timestamp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/user"))
            .and(header("Authorization", "bearer tok"))
            .and(HasTimestamp)
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("alice")))
            .expect(1)
            .mount(&server)
            .await;

        let user = api(&server).current_user("tok").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.homepage, Some(format!("{}/alice", server.uri())));
    }

    #[tokio::test]
    async fn test_issue_by_number_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "issue does not exist"})),
            )
            .mount(&server)
            .await;

        let issue = api(&server)
            .issue(None, &IssueSelector::number(42))
            .await
            .unwrap();
        assert!(issue.is_none());
    }

    #[tokio::test]
    async fn test_issue_by_title_requires_exact_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(query_param("q", "/posts/a"))
            .and(query_param("type", "issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                issue_json(1, "/posts/a"),
                issue_json(2, "/posts/a-plus"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(query_param("q", "/posts/zzz"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([issue_json(2, "/posts/zzz-ish")])),
            )
            .mount(&server)
            .await;

        let gitea = api(&server);
        let found = gitea
            .issue(None, &IssueSelector::title("/posts/a"))
            .await
            .unwrap();
        assert_eq!(found.map(|i| i.id), Some(1));

        let missing = gitea
            .issue(None, &IssueSelector::title("/posts/zzz"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_issue_resolves_and_creates_labels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 5, "name": "comments", "color": "#ffffff"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/labels"))
            .and(body_partial_json(json!({"name": "site"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 9, "name": "site", "color": "#00aabb"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues"))
            .and(body_partial_json(
                json!({"title": "/posts/a", "labels": [5, 9]}),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(issue_json(3, "/posts/a")))
            .expect(1)
            .mount(&server)
            .await;

        let gitea = api(&server).with_labels(["comments", "site"]);
        let issue = gitea
            .create_issue("tok", "/posts/a", "thread for /posts/a")
            .await
            .unwrap();
        assert_eq!(issue.id, 3);
    }

    #[tokio::test]
    async fn test_comments_sorts_pages_and_enriches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                comment_json(2, "second", "2024-03-02T00:00:00Z"),
                comment_json(1, "first", "2024-03-01T00:00:00Z"),
                comment_json(3, "third", "2024-03-03T00:00:00Z"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/1/reactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"user": user_json("bob"), "content": "+1"},
                {"user": user_json("carol"), "content": "heart"},
                {"user": user_json("dave"), "content": "laugh"},
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/2/reactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/markdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>rendered</p>"))
            .mount(&server)
            .await;

        let query = CommentQuery::page(1)
            .with_per_page(2)
            .with_sort(SortOrder::Asc);
        let page = api(&server).comments(None, 7, &query).await.unwrap();

        assert_eq!(page.count, 3);
        assert_eq!(page.per_page, 2);
        let ids: Vec<u64> = page.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.data[0].content, "<p>rendered</p>");
        assert_eq!(page.data[0].content_raw, "first");
        let reactions = page.data[0].reactions.unwrap();
        assert_eq!((reactions.like, reactions.heart), (1, 1));
        // "laugh" is not part of the contract and is ignored.
        assert_eq!(reactions.total(), 2);
        assert_eq!(page.data[1].reactions.unwrap().total(), 0);
    }

    #[tokio::test]
    async fn test_comments_default_sort_is_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/7/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                comment_json(1, "first", "2024-03-01T00:00:00Z"),
                comment_json(2, "second", "2024-03-02T00:00:00Z"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/v1/repos/owner/repo/issues/comments/\d+/reactions$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/markdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>x</p>"))
            .mount(&server)
            .await;

        let page = api(&server)
            .comments(None, 7, &CommentQuery::default())
            .await
            .unwrap();
        let ids: Vec<u64> = page.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_create_comment_renders_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues/7/comments"))
            .and(body_partial_json(json!({"body": "hello *world*"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(
                11,
                "hello *world*",
                "2024-03-01T00:00:00Z",
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/markdown"))
            .and(body_partial_json(json!({"mode": "gfm", "context": "owner/repo"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello <em>world</em></p>"))
            .mount(&server)
            .await;

        let comment = api(&server)
            .create_comment("tok", 7, "hello *world*")
            .await
            .unwrap();
        assert_eq!(comment.id, 11);
        assert_eq!(comment.content, "<p>hello <em>world</em></p>");
        assert_eq!(comment.content_raw, "hello *world*");
        assert!(comment.reactions.is_none());
    }

    #[tokio::test]
    async fn test_edit_comment_patches_by_comment_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/11"))
            .and(body_partial_json(json!({"body": "edited"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(
                11,
                "edited",
                "2024-03-01T00:00:00Z",
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/markdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>edited</p>"))
            .mount(&server)
            .await;

        let comment = api(&server)
            .edit_comment("tok", 7, 11, "edited")
            .await
            .unwrap();
        assert_eq!(comment.content_raw, "edited");
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/11"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(api(&server).delete_comment("tok", 7, 11).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_reaction_adds_on_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/11/reactions"))
            .and(body_partial_json(json!({"content": "+1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"user": user_json("alice"), "content": "+1"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        assert!(api(&server)
            .toggle_reaction("tok", 7, 11, Reaction::Like)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_toggle_reaction_removes_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/11/reactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"user": user_json("alice"), "content": "heart"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/repos/owner/repo/issues/comments/11/reactions"))
            .and(body_partial_json(json!({"content": "heart"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert!(api(&server)
            .toggle_reaction("tok", 7, 11, Reaction::Heart)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/user"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "token is required"})),
            )
            .mount(&server)
            .await;

        let err = api(&server).current_user("bad").await.unwrap_err();
        match err {
            ApiError::Authentication(message) => assert!(message.contains("token is required")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_maps_with_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repos/owner/repo/issues/7/comments"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", "30")
                    .set_body_json(json!({"message": "slow down"})),
            )
            .mount(&server)
            .await;

        let err = api(&server)
            .comments(None, 7, &CommentQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_platform_description() {
        let gitea = GiteaApi::new("owner", "repo", "client-id");
        let platform = gitea.platform();
        assert_eq!(platform.name, "Gitea");
        assert_eq!(platform.version, "v1");
        assert!(platform.meta.reactable);
        assert!(!platform.meta.sortable);
    }

    #[test]
    fn test_oauth_config_endpoints() {
        let gitea =
            GiteaApi::new("owner", "repo", "client-id").with_base_url("https://git.example/");
        let config = gitea.oauth_config();
        assert_eq!(config.client_id, "client-id");
        assert_eq!(config.auth_url, "https://git.example/login/oauth/authorize");
        assert_eq!(
            config.token_url,
            "https://git.example/login/oauth/access_token"
        );
    }

    #[test]
    fn test_from_env_missing_is_configuration_error() {
        std::env::remove_var("GITEA_OWNER");
        let err = GiteaApi::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
