//! Reply-chained thread publishing against the X API v2
//!
//! Each segment becomes one `POST /2/tweets` call replying to the previous
//! segment's id, so publication order is load-bearing. Failures mid-thread
//! carry enough state (`next_index`, `last_tweet_id`, `posted_ids`) for the
//! caller to resume instead of re-posting from scratch.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{Segment, ThreadDraft};

/// Default X API host
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Default pause between consecutive tweets
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Errors raised while publishing a thread
#[derive(Error, Debug)]
pub enum PublishError {
    /// HTTP 429: the platform rate limited the thread mid-publish
    #[error("rate limited before tweet {}; suggested wait: {wait_seconds:?} seconds", .next_index + 1)]
    RateLimited {
        /// 0-based index of the first unposted segment
        next_index: usize,
        /// Id of the last successfully posted tweet, for resuming
        last_tweet_id: Option<String>,
        /// Per-segment ids for the tweets posted in this run
        posted_ids: Vec<Option<String>>,
        /// Wait suggested by the platform's rate-limit headers
        wait_seconds: Option<u64>,
    },

    /// Publishing stopped part-way through for any other reason
    #[error("publishing stopped before tweet {}: {reason}", .next_index + 1)]
    Partial {
        /// 0-based index of the first unposted segment
        next_index: usize,
        /// Id of the last successfully posted tweet, for resuming
        last_tweet_id: Option<String>,
        /// Per-segment ids for the tweets posted in this run
        posted_ids: Vec<Option<String>>,
        /// Platform/transport failure description
        reason: String,
    },

    /// The platform rejected a tweet as duplicate content
    #[error("duplicate content rejected by the platform: \"{snippet}\"")]
    Duplicate {
        /// Opening of the offending tweet text
        snippet: String,
    },
}

/// Configuration for the publishing client
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// OAuth 2.0 user-context bearer token
    pub bearer_token: String,

    /// API host, overridable for test servers
    pub base_url: String,

    /// Pause between consecutive tweets to stay under rate limits
    pub delay: Duration,
}

impl PublisherConfig {
    /// Create a configuration with the default host and delay
    #[must_use]
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            delay: DEFAULT_DELAY,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Automatically loads a `.env` file if present. Supported variables:
    /// - `TWITTER_BEARER_TOKEN`: user-context bearer token (required)
    /// - `TWITTER_API_BASE`: alternative API host (default: `https://api.twitter.com`)
    /// - `THREAD_PUBLISH_DELAY_SECS`: pause between tweets (default: 2)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `TWITTER_BEARER_TOKEN` is missing.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bearer_token = std::env::var("TWITTER_BEARER_TOKEN").map_err(|_| {
            Error::Config("TWITTER_BEARER_TOKEN environment variable is required".to_string())
        })?;

        let base_url =
            std::env::var("TWITTER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let delay = std::env::var("THREAD_PUBLISH_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(DEFAULT_DELAY, Duration::from_secs);

        Ok(Self {
            bearer_token,
            base_url,
            delay,
        })
    }

    /// Override the API host (e.g., for a local test server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the pause between tweets
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySetting<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<MediaSetting<'a>>,
}

#[derive(Serialize)]
struct ReplySetting<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Serialize)]
struct MediaSetting<'a> {
    media_ids: Vec<&'a str>,
}

#[derive(Deserialize)]
struct TweetResponse {
    data: CreatedTweet,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

/// Publishing client for reply-chained threads
pub struct ThreadPublisher {
    http: reqwest::Client,
    config: PublisherConfig,
}

impl ThreadPublisher {
    /// Create a publisher from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: PublisherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Publish every segment of `draft` as a reply chain.
    ///
    /// Returns the posted tweet ids aligned with the segments. Segment
    /// `image_ref`s are forwarded as already-uploaded media ids.
    ///
    /// # Errors
    ///
    /// See [`ThreadPublisher::resume`].
    pub async fn publish(
        &self,
        draft: &ThreadDraft,
    ) -> std::result::Result<Vec<Option<String>>, PublishError> {
        self.resume(&draft.segments, 0, None).await
    }

    /// Publish `segments[start_index..]`, chaining the first tweet onto
    /// `initial_reply_id` when resuming a partially posted thread.
    ///
    /// # Errors
    ///
    /// [`PublishError::RateLimited`] on HTTP 429, [`PublishError::Duplicate`]
    /// when the platform rejects repeated content, and
    /// [`PublishError::Partial`] for any other mid-thread failure. All but
    /// `Duplicate` carry resume state.
    pub async fn resume(
        &self,
        segments: &[Segment],
        start_index: usize,
        initial_reply_id: Option<String>,
    ) -> std::result::Result<Vec<Option<String>>, PublishError> {
        let total = segments.len();
        let mut posted_ids: Vec<Option<String>> = vec![None; total];
        if total == 0 {
            return Ok(posted_ids);
        }

        let url = format!("{}/2/tweets", self.config.base_url);
        let mut previous_id = initial_reply_id;

        for (idx, segment) in segments.iter().enumerate().skip(start_index) {
            let request = TweetRequest {
                text: &segment.text,
                reply: previous_id
                    .as_deref()
                    .map(|id| ReplySetting {
                        in_reply_to_tweet_id: id,
                    }),
                media: segment.image_ref.as_deref().map(|id| MediaSetting {
                    media_ids: vec![id],
                }),
            };

            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.config.bearer_token)
                .json(&request)
                .send()
                .await
                .map_err(|e| PublishError::Partial {
                    next_index: idx,
                    last_tweet_id: previous_id.clone(),
                    posted_ids: posted_ids.clone(),
                    reason: e.to_string(),
                })?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait_seconds = wait_seconds_from_headers(response.headers());
                warn!(
                    posted = idx,
                    total,
                    ?wait_seconds,
                    "rate limited while publishing thread"
                );
                return Err(PublishError::RateLimited {
                    next_index: idx,
                    last_tweet_id: previous_id,
                    posted_ids,
                    wait_seconds,
                });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                if status == StatusCode::FORBIDDEN
                    && body.to_lowercase().contains("duplicate content")
                {
                    return Err(PublishError::Duplicate {
                        snippet: snippet_of(&segment.text),
                    });
                }
                return Err(PublishError::Partial {
                    next_index: idx,
                    last_tweet_id: previous_id,
                    posted_ids,
                    reason: format!("HTTP {status}: {body}"),
                });
            }

            let parsed: TweetResponse =
                response.json().await.map_err(|e| PublishError::Partial {
                    next_index: idx,
                    last_tweet_id: previous_id.clone(),
                    posted_ids: posted_ids.clone(),
                    reason: format!("unreadable create-tweet response: {e}"),
                })?;

            info!(index = segment.index, id = %parsed.data.id, "posted tweet");
            posted_ids[idx] = Some(parsed.data.id.clone());
            previous_id = Some(parsed.data.id);

            if idx + 1 < total && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        info!(total, "thread published");
        Ok(posted_ids)
    }
}

/// Suggested wait from rate-limit headers: `retry-after` when present,
/// otherwise seconds until `x-rate-limit-reset`. Clamped to at least 1.
fn wait_seconds_from_headers(headers: &HeaderMap) -> Option<u64> {
    if let Some(retry_after) = headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some((retry_after.max(1.0)) as u64);
    }

    let reset = headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()?
        .as_secs();
    Some(reset.saturating_sub(now).max(1))
}

fn snippet_of(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > 75 {
        format!("{}...", chars[..75].iter().collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn retry_after_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("12"));
        headers.insert("x-rate-limit-reset", HeaderValue::from_static("9999999999"));
        assert_eq!(wait_seconds_from_headers(&headers), Some(12));
    }

    #[test]
    fn reset_header_is_relative_to_now() {
        let mut headers = HeaderMap::new();
        let reset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 60;
        headers.insert(
            "x-rate-limit-reset",
            HeaderValue::from_str(&reset.to_string()).unwrap(),
        );
        let wait = wait_seconds_from_headers(&headers).unwrap();
        assert!((55..=65).contains(&wait));
    }

    #[test]
    fn stale_reset_clamps_to_one_second() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-reset", HeaderValue::from_static("1"));
        assert_eq!(wait_seconds_from_headers(&headers), Some(1));
    }

    #[test]
    fn no_headers_means_no_suggestion() {
        assert_eq!(wait_seconds_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn request_payload_shape() {
        let request = TweetRequest {
            text: "hello",
            reply: Some(ReplySetting {
                in_reply_to_tweet_id: "123",
            }),
            media: Some(MediaSetting {
                media_ids: vec!["m1"],
            }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["text"], "hello");
        assert_eq!(value["reply"]["in_reply_to_tweet_id"], "123");
        assert_eq!(value["media"]["media_ids"][0], "m1");
    }

    #[test]
    fn payload_omits_absent_reply_and_media() {
        let request = TweetRequest {
            text: "hello",
            reply: None,
            media: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("reply").is_none());
        assert!(value.get("media").is_none());
    }

    #[test]
    fn snippets_are_truncated() {
        let long = "a".repeat(100);
        let snippet = snippet_of(&long);
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 78);
        assert_eq!(snippet_of("short"), "short");
    }

    #[tokio::test]
    async fn empty_thread_publishes_nothing() {
        let publisher = ThreadPublisher::new(PublisherConfig::new("token")).unwrap();
        let ids = publisher.resume(&[], 0, None).await.unwrap();
        assert!(ids.is_empty());
    }
}
