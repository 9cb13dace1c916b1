//! Avatar URL derivation and inline fetching.
//!
//! Embedded documents carry every avatar as a `data:` URI. Each sponsor is
//! fetched in order, one request at a time; a failed primary fetch falls back
//! once to the generated placeholder for the sponsor's name.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::Agent;
use url::Url;

use crate::error::{Error, Result};
use crate::sponsors::Sponsor;

/// The placeholder generator rejects requests without a browser-like signature.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

const GITHUB_AVATAR_BASE: &str = "https://github.com";
const PLACEHOLDER_BASE: &str = "https://ui-avatars.com/api/";
const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Characters `encodeURIComponent` leaves alone: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Endpoints avatar URLs are built from.
#[derive(Debug, Clone)]
pub struct AvatarSource {
    pub github_base: String,
    pub placeholder_base: String,
}

impl Default for AvatarSource {
    fn default() -> Self {
        Self {
            github_base: GITHUB_AVATAR_BASE.to_string(),
            placeholder_base: PLACEHOLDER_BASE.to_string(),
        }
    }
}

impl AvatarSource {
    pub fn github_url(&self, handle: &str) -> String {
        format!("{}/{}.png", self.github_base.trim_end_matches('/'), handle)
    }

    pub fn placeholder_url(&self, name: &str) -> String {
        format!(
            "{}?name={}&background=random&size=128",
            self.placeholder_base,
            utf8_percent_encode(name, COMPONENT)
        )
    }

    /// Primary avatar URL: the GitHub avatar when a handle exists, else the placeholder.
    pub fn avatar_url(&self, sponsor: &Sponsor) -> String {
        match sponsor.handle() {
            Some(handle) => self.github_url(handle),
            None => self.placeholder_url(&sponsor.name),
        }
    }
}

/// Raw image bytes with the content type reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

pub trait ImageFetch {
    fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

/// Blocking HTTP fetcher that follows 301/302 itself, up to a hop limit.
pub struct HttpFetcher {
    agent: Agent,
    max_redirects: u32,
}

impl HttpFetcher {
    pub fn new(max_redirects: u32) -> Self {
        // Redirects and error statuses are handled here, not by ureq.
        let config = Agent::config_builder()
            .max_redirects(0)
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
            max_redirects,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REDIRECTS)
    }
}

impl ImageFetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let mut current = url.to_string();

        for _ in 0..=self.max_redirects {
            let mut response = self
                .agent
                .get(&current)
                .header("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| Error::Network {
                    url: current.clone(),
                    reason: e.to_string(),
                })?;

            match response.status().as_u16() {
                200 => {
                    let content_type = response
                        .headers()
                        .get("content-type")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or(DEFAULT_CONTENT_TYPE)
                        .to_string();

                    let bytes = response
                        .body_mut()
                        .read_to_vec()
                        .map_err(|e| Error::Network {
                            url: current.clone(),
                            reason: e.to_string(),
                        })?;

                    return Ok(FetchedImage {
                        content_type,
                        bytes,
                    });
                }
                301 | 302 => {
                    let location = response
                        .headers()
                        .get("location")
                        .and_then(|value| value.to_str().ok())
                        .ok_or_else(|| Error::MissingLocation {
                            url: current.clone(),
                        })?;

                    let next = resolve_location(&current, location)?;
                    debug!("Redirect {} -> {}", current, next);
                    current = next;
                }
                status => {
                    return Err(Error::HttpStatus {
                        url: current,
                        status,
                    });
                }
            }
        }

        Err(Error::TooManyRedirects {
            url: url.to_string(),
            limit: self.max_redirects,
        })
    }
}

fn resolve_location(current: &str, location: &str) -> Result<String> {
    let base = Url::parse(current).map_err(|_| Error::MissingLocation {
        url: current.to_string(),
    })?;
    base.join(location)
        .map(String::from)
        .map_err(|_| Error::MissingLocation {
            url: current.to_string(),
        })
}

/// Fetches every sponsor's avatar as a data URI, in list order.
///
/// A failed primary fetch is retried once against the placeholder URL; if
/// that fails too the whole run fails.
pub fn resolve_avatars<F: ImageFetch>(
    sponsors: &[Sponsor],
    source: &AvatarSource,
    fetcher: &F,
) -> Result<Vec<String>> {
    let mut avatars = Vec::with_capacity(sponsors.len());

    for sponsor in sponsors {
        let primary = source.avatar_url(sponsor);
        let image = match fetcher.fetch(&primary) {
            Ok(image) => image,
            Err(err) => {
                warn!(
                    "Failed to fetch avatar for {}: {}; using placeholder",
                    sponsor.name, err
                );
                let fallback = source.placeholder_url(&sponsor.name);
                fetcher.fetch(&fallback).map_err(|err| Error::Avatar {
                    name: sponsor.name.clone(),
                    source: Box::new(err),
                })?
            }
        };

        info!("Fetched avatar for {}", sponsor.name);
        avatars.push(image.to_data_uri());
    }

    Ok(avatars)
}

/// Remote avatar URLs, for linked documents.
pub fn linked_avatars(sponsors: &[Sponsor], source: &AvatarSource) -> Vec<String> {
    sponsors
        .iter()
        .map(|sponsor| source.avatar_url(sponsor))
        .collect()
}
