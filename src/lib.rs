//! Render a list of sponsors as an SVG wall of circular, linked avatars.
//!
//! The pipeline is load → layout → (fetch avatars) → assemble → write. Linked
//! documents reference avatars by URL; embedded documents fetch each avatar and
//! inline it as a `data:` URI so the file is self-contained.

pub mod avatar;
pub mod error;
pub mod export;
pub mod layout;
pub mod render;
pub mod sponsors;
pub mod style;
pub mod xml;

pub use avatar::{AvatarSource, FetchedImage, HttpFetcher, ImageFetch};
pub use error::{Error, Result};
pub use render::RenderOptions;
pub use sponsors::{Sponsor, load_sponsors, parse_sponsors};
pub use style::Style;

/// Builds a document whose avatars point at their remote URLs. Needs no network.
pub fn render_linked(
    sponsors: &[Sponsor],
    source: &AvatarSource,
    style: &Style,
    escape_names: bool,
) -> String {
    let avatars = avatar::linked_avatars(sponsors, source);
    let options = RenderOptions {
        import_web_font: true,
        escape_names,
    };
    render::render_document(sponsors, &avatars, style, options)
}

/// Builds a self-contained document, fetching every avatar through `fetcher`.
pub fn render_embedded<F: ImageFetch>(
    sponsors: &[Sponsor],
    source: &AvatarSource,
    fetcher: &F,
    style: &Style,
    escape_names: bool,
) -> Result<String> {
    let avatars = avatar::resolve_avatars(sponsors, source, fetcher)?;
    let options = RenderOptions {
        import_web_font: false,
        escape_names,
    };
    Ok(render::render_document(sponsors, &avatars, style, options))
}
