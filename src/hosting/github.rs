use crate::context::RepoSlug;
use crate::domain::{ChangelogEntry, RemoteTag};
use crate::error::{ApiError, ApiResult};
use crate::hosting::{
    CreatedReference, CreatedRelease, CreatedTagObject, HostingApi, NewRelease, NewTagObject,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const TAGS_PER_PAGE: u32 = 100;
const API_VERSION: &str = "2022-11-28";

/// GitHub REST API client for one repository
pub struct GitHubApi {
    client: Client,
    base_url: String,
    repository: RepoSlug,
}

#[derive(Deserialize)]
struct TagResponse {
    name: String,
    commit: CommitRef,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<CompareCommit>,
}

#[derive(Deserialize)]
struct CompareCommit {
    commit: CommitDetails,
    author: Option<AccountRef>,
}

#[derive(Deserialize)]
struct CommitDetails {
    message: String,
}

#[derive(Deserialize)]
struct AccountRef {
    login: Option<String>,
}

#[derive(Serialize)]
struct TagObjectRequest<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct TagObjectResponse {
    sha: String,
}

#[derive(Serialize)]
struct ReferenceRequest<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

#[derive(Deserialize)]
struct ReferenceResponse {
    #[serde(rename = "ref")]
    reference: String,
    url: String,
}

#[derive(Serialize)]
struct ReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
    prerelease: bool,
}

#[derive(Deserialize)]
struct ReleaseResponse {
    html_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

impl GitHubApi {
    /// Create a client authenticated with `token`
    ///
    /// # Arguments
    /// * `api_url` - API root (e.g., "https://api.github.com")
    /// * `repository` - Repository all calls are scoped to
    /// * `token` - Token sent as a bearer credential
    pub fn new(api_url: &str, repository: RepoSlug, token: &str) -> ApiResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .user_agent(concat!("version-tagger/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(GitHubApi {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
            repository,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url, self.repository.owner, self.repository.name, path
        )
    }

    /// `compare/{base}...{head}`, with the range percent-encoded as one path segment
    fn compare_url(&self, base: &str, head: &str) -> ApiResult<Url> {
        let mut url =
            Url::parse(&self.repo_url("compare")).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{} cannot take a path", self.base_url)))?
            .push(&format!("{}...{}", base, head));
        Ok(url)
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        Self::decode(response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> ApiResult<T> {
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send()?;
        Self::decode(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
            let message = response
                .json::<ErrorResponse>()
                .map(|body| body.message)
                .unwrap_or(fallback);
            return Err(ApiError::status(status.as_u16(), message));
        }

        response
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl HostingApi for GitHubApi {
    fn list_tags(&self) -> ApiResult<Vec<RemoteTag>> {
        let url = self.repo_url(&format!("tags?per_page={}", TAGS_PER_PAGE));
        let tags: Vec<TagResponse> = self.get(&url)?;

        Ok(tags
            .into_iter()
            .map(|tag| RemoteTag::new(tag.name, tag.commit.sha))
            .collect())
    }

    fn compare_commits(&self, base: &str, head: &str) -> ApiResult<Vec<ChangelogEntry>> {
        let url = self.compare_url(base, head)?;
        let comparison: CompareResponse = self.get(url.as_str())?;

        Ok(comparison
            .commits
            .into_iter()
            .map(|commit| ChangelogEntry {
                message: commit.commit.message,
                author_login: commit.author.and_then(|author| author.login),
            })
            .collect())
    }

    fn create_tag_object(&self, tag: &NewTagObject) -> ApiResult<CreatedTagObject> {
        let request = TagObjectRequest {
            tag: &tag.tag,
            message: &tag.message,
            object: &tag.object_sha,
            kind: "commit",
        };
        let created: TagObjectResponse = self.post(&self.repo_url("git/tags"), &request)?;

        Ok(CreatedTagObject { sha: created.sha })
    }

    fn create_reference(&self, reference: &str, sha: &str) -> ApiResult<CreatedReference> {
        let request = ReferenceRequest { reference, sha };
        let created: ReferenceResponse = self.post(&self.repo_url("git/refs"), &request)?;

        Ok(CreatedReference {
            reference: created.reference,
            url: created.url,
        })
    }

    fn create_release(&self, release: &NewRelease) -> ApiResult<CreatedRelease> {
        let request = ReleaseRequest {
            tag_name: &release.tag_name,
            name: &release.name,
            body: &release.body,
            draft: false,
            prerelease: release.prerelease,
        };
        let created: ReleaseResponse = self.post(&self.repo_url("releases"), &request)?;

        Ok(CreatedRelease {
            url: created.html_url,
        })
    }
}
