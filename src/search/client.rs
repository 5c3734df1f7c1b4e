use std::time::Duration;

use serde::Deserialize;

use crate::config::SearchSettings;
use crate::error::WorkflowError;

/// One normalized video hit from the search API.
///
/// Items missing an id, a title or a thumbnail are dropped during
/// normalization, so these fields are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel: Option<String>,
}

impl SearchResult {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

// Wire shape of the v3 `search` endpoint. Everything is optional so a partial
// item degrades to "dropped" instead of failing the whole response.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
}

#[derive(Deserialize)]
struct ApiItem {
    id: Option<ApiId>,
    snippet: Option<ApiSnippet>,
}

#[derive(Deserialize)]
struct ApiId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct ApiSnippet {
    title: Option<String>,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    thumbnails: Option<ApiThumbnails>,
}

#[derive(Deserialize)]
struct ApiThumbnails {
    medium: Option<ApiThumbnail>,
    high: Option<ApiThumbnail>,
    default: Option<ApiThumbnail>,
}

#[derive(Deserialize)]
struct ApiThumbnail {
    url: Option<String>,
}

pub struct SearchClient {
    http: reqwest::blocking::Client,
    settings: SearchSettings,
}

impl SearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, WorkflowError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(|e| WorkflowError::Search(format!("http client: {e}")))?;

        Ok(Self { http, settings })
    }

    /// Run one search round-trip.
    ///
    /// A whitespace-only query short-circuits to an empty list without
    /// touching the network. Relevance order from the API is preserved and
    /// the result is capped at `max_results`.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, WorkflowError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let cap = self.settings.max_results.clamp(1, 50);
        let cap_param = cap.to_string();

        let response = self
            .http
            .get(&self.settings.endpoint)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", cap_param.as_str()),
                ("key", self.settings.api_key.as_str()),
            ])
            .send()
            .map_err(|e| WorkflowError::Search(format!("request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::Search(format!("API returned {status}")));
        }

        let body = response
            .text()
            .map_err(|e| WorkflowError::Search(format!("response body: {e}")))?;

        parse_search_response(&body, cap as usize)
    }
}

/// Normalize a raw API payload into `SearchResult`s, dropping items that are
/// missing a video id, a title or a usable thumbnail.
pub fn parse_search_response(
    body: &str,
    cap: usize,
) -> Result<Vec<SearchResult>, WorkflowError> {
    let parsed: ApiResponse = serde_json::from_str(body)
        .map_err(|e| WorkflowError::Search(format!("malformed response: {e}")))?;

    let mut out = Vec::new();
    for item in parsed.items {
        let Some(id) = item
            .id
            .and_then(|i| i.video_id)
            .filter(|s| !s.trim().is_empty())
        else {
            continue;
        };
        let Some(snippet) = item.snippet else { continue };
        let Some(title) = snippet.title.filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        let Some(thumbnail_url) = snippet.thumbnails.and_then(best_thumbnail) else {
            continue;
        };

        out.push(SearchResult {
            id,
            title,
            thumbnail_url,
            channel: snippet.channel_title.filter(|s| !s.trim().is_empty()),
        });

        if out.len() == cap {
            break;
        }
    }

    Ok(out)
}

fn best_thumbnail(thumbs: ApiThumbnails) -> Option<String> {
    [thumbs.medium, thumbs.high, thumbs.default]
        .into_iter()
        .flatten()
        .filter_map(|t| t.url)
        .find(|u| !u.trim().is_empty())
}

/// Extract a video id from a pasted watch URL, if the input looks like one.
///
/// Accepted shapes: `youtube.com/watch?v=<id>` and `youtu.be/<id>`, with or
/// without scheme and `www.`/`m.` prefixes. Plain keyword queries fall
/// through to `None` and take the search path instead.
pub fn parse_video_ref(input: &str) -> Option<String> {
    let input = input.trim();

    let rest = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);
    let rest = rest
        .strip_prefix("www.")
        .or_else(|| rest.strip_prefix("m."))
        .unwrap_or(rest);

    if let Some(path) = rest.strip_prefix("youtu.be/") {
        let id = path.split(['?', '&', '/']).next().unwrap_or("");
        return is_video_id(id).then(|| id.to_string());
    }

    if let Some(params) = rest.strip_prefix("youtube.com/watch?") {
        for pair in params.split('&') {
            if let Some(id) = pair.strip_prefix("v=") {
                if is_video_id(id) {
                    return Some(id.to_string());
                }
            }
        }
    }

    None
}

fn is_video_id(s: &str) -> bool {
    s.len() == 11
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
