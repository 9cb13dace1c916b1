//! Error types for the sponsor wall pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The sponsor list (or a style file) could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sponsor list is not valid JSON or lacks the `sponsors` key
    #[error("Failed to parse sponsor list: {0}")]
    Parse(#[from] serde_json::Error),

    /// A style file could not be parsed, or holds an out-of-range value
    #[error("Invalid style: {0}")]
    Style(String),

    /// Transport-level failure (DNS, connect, TLS, truncated body)
    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The server answered with a status other than 200, 301 or 302
    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A 301/302 whose `Location` is absent or cannot be resolved
    #[error("Redirect from {url} has no usable Location header")]
    MissingLocation { url: String },

    /// The redirect chain exceeded the configured hop limit
    #[error("Too many redirects (limit {limit}) starting from {url}")]
    TooManyRedirects { url: String, limit: u32 },

    /// Both the primary and the placeholder avatar fetch failed
    #[error("No avatar available for sponsor '{name}': {source}")]
    Avatar {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// The output file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG rasterization or PDF conversion failed
    #[error("Failed to export {format}: {reason}")]
    Export { format: &'static str, reason: String },

    /// The output path has no extension to pick a format from
    #[error("Output file {} has no extension", .0.display())]
    MissingExtension(PathBuf),

    /// The output extension is not svg, png or pdf
    #[error("Unsupported output format: .{0} (use .svg, .png or .pdf)")]
    UnsupportedFormat(String),

    /// `--png-scale` is not finite and positive
    #[error("Invalid --png-scale value: {0}")]
    InvalidScale(f32),
}
