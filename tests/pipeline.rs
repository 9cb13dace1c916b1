use sponsorwall::{
    AvatarSource, Error, FetchedImage, ImageFetch, Result, Style, parse_sponsors, render_embedded,
    render_linked,
};

const EXAMPLE: &str = r#"{"sponsors":[{"name":"Ada","github":"ada"},{"name":"Bo"}]}"#;

/// Every URL yields the same one-byte PNG.
struct StaticFetch;

impl ImageFetch for StaticFetch {
    fn fetch(&self, _url: &str) -> Result<FetchedImage> {
        Ok(FetchedImage {
            content_type: "image/png".into(),
            bytes: vec![0],
        })
    }
}

struct Offline;

impl ImageFetch for Offline {
    fn fetch(&self, url: &str) -> Result<FetchedImage> {
        Err(Error::Network {
            url: url.to_string(),
            reason: "offline".into(),
        })
    }
}

#[test]
fn linked_example_document() {
    let sponsors = parse_sponsors(EXAMPLE).unwrap();
    let svg = render_linked(&sponsors, &AvatarSource::default(), &Style::default(), false);

    assert!(svg.contains(r#"<svg width="450" height="150" xmlns="http://www.w3.org/2000/svg">"#));
    assert!(svg.contains(r#"<a href="https://github.com/ada" target="_blank" rel="noopener">"#));
    assert!(svg.contains(r##"<a href="#" target="_blank" rel="noopener">"##));
    assert!(svg.contains(r#"href="https://github.com/ada.png""#));
    assert!(svg.contains(
        r#"href="https://ui-avatars.com/api/?name=Bo&amp;background=random&amp;size=128""#
    ));
    assert!(svg.contains("@import url("));

    // Sponsor 0's fragments come before sponsor 1's.
    let ada = svg.find(">Ada</text>").unwrap();
    let bo = svg.find(">Bo</text>").unwrap();
    assert!(ada < bo);
}

#[test]
fn linked_output_is_deterministic() {
    let sponsors = parse_sponsors(EXAMPLE).unwrap();
    let source = AvatarSource::default();
    let style = Style::default();

    let first = render_linked(&sponsors, &source, &style, false);
    let second = render_linked(&sponsors, &source, &style, false);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn embedded_document_inlines_every_avatar_without_web_font() {
    let sponsors = parse_sponsors(EXAMPLE).unwrap();
    let svg = render_embedded(
        &sponsors,
        &AvatarSource::default(),
        &StaticFetch,
        &Style::default(),
        false,
    )
    .unwrap();

    assert_eq!(svg.matches(r#"href="data:image/png;base64,AA==""#).count(), 2);
    assert!(!svg.contains("ui-avatars.com"));
    assert!(!svg.contains("@import"));
    assert!(svg.contains(r##"<a href="#" target="_blank" rel="noopener">"##));
}

#[test]
fn embedded_render_fails_when_nothing_is_reachable() {
    let sponsors = parse_sponsors(EXAMPLE).unwrap();
    let err = render_embedded(
        &sponsors,
        &AvatarSource::default(),
        &Offline,
        &Style::default(),
        false,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Avatar { ref name, .. } if name == "Ada"));
}

#[test]
fn embedded_render_of_empty_list_needs_no_fetch() {
    let sponsors = parse_sponsors(r#"{"sponsors":[]}"#).unwrap();
    let svg = render_embedded(
        &sponsors,
        &AvatarSource::default(),
        &Offline,
        &Style::default(),
        false,
    )
    .unwrap();

    assert!(svg.contains(r#"<svg width="450" height="60""#));
}

#[test]
fn names_with_markup_stay_literal_by_default() {
    let sponsors = parse_sponsors(r#"{"sponsors":[{"name":"A&B"}]}"#).unwrap();
    let source = AvatarSource::default();

    let raw = render_linked(&sponsors, &source, &Style::default(), false);
    assert!(raw.contains(">A&B</text>"));
    // The placeholder URL is still percent-encoded and attribute-escaped.
    assert!(raw.contains("?name=A%26B&amp;background=random"));

    let escaped = render_linked(&sponsors, &source, &Style::default(), true);
    assert!(escaped.contains(">A&amp;B</text>"));
}

#[test]
fn style_overrides_reach_the_shell() {
    let sponsors = parse_sponsors(EXAMPLE).unwrap();
    let style = Style::from_toml("title = \"Backers\"\nbackground_color = \"#000000\"\n").unwrap();
    let svg = render_linked(&sponsors, &AvatarSource::default(), &style, false);

    assert!(svg.contains(r#"class="title" text-anchor="middle">Backers</text>"#));
    assert!(svg.contains(r##"fill="#000000" rx="10""##));
}
