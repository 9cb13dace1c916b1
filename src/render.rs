use crate::layout::{self, AVATAR_SIZE, LABEL_OFFSET, Slot};
use crate::sponsors::Sponsor;
use crate::style::Style;
use crate::xml::{escape_attr, escape_text};

const TITLE_BASELINE: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit the web-font `@import` (linked documents only; embedded ones stay offline).
    pub import_web_font: bool,
    /// XML-escape sponsor names. Off by default: names are written verbatim,
    /// so a name containing `<` or `&` produces a malformed document.
    pub escape_names: bool,
}

/// Accumulates the per-sponsor fragments of one document.
pub struct Renderer<'a> {
    style: &'a Style,
    options: RenderOptions,
    count: usize,
    avatar_styles: String,
    clip_paths: String,
    content: String,
}

impl<'a> Renderer<'a> {
    pub fn new(style: &'a Style, options: RenderOptions) -> Self {
        Self {
            style,
            options,
            count: 0,
            avatar_styles: String::new(),
            clip_paths: String::new(),
            content: String::new(),
        }
    }

    /// Adds the next sponsor, drawing its avatar from `avatar_href`
    /// (a remote URL or a `data:` URI).
    pub fn push_sponsor(&mut self, sponsor: &Sponsor, avatar_href: &str) {
        let index = self.count;
        self.count += 1;
        let slot = layout::slot(index);
        self.push_clip_path(index, &slot);
        self.push_avatar_style(index, &slot);
        self.push_avatar(index, &slot, sponsor, avatar_href);
    }

    fn push_clip_path(&mut self, index: usize, slot: &Slot) {
        self.clip_paths.push_str(&format!(
            r#"
    <clipPath id="circle-{index}">
      <circle cx="{}" cy="{}" r="{}"/>
    </clipPath>"#,
            slot.center_x,
            slot.center_y,
            AVATAR_SIZE / 2,
        ));
    }

    fn push_avatar_style(&mut self, index: usize, slot: &Slot) {
        self.avatar_styles.push_str(&format!(
            r#"
      .avatar-{index} {{
        transform-origin: {}px {}px;
        transition: transform {}s;
      }}
      .avatar-{index}:hover {{
        transform: scale({});
      }}"#,
            slot.center_x, slot.center_y, self.style.transition_secs, self.style.hover_scale,
        ));
    }

    fn push_avatar(&mut self, index: usize, slot: &Slot, sponsor: &Sponsor, avatar_href: &str) {
        let name = if self.options.escape_names {
            escape_text(&sponsor.name)
        } else {
            sponsor.name.clone()
        };

        self.content.push_str(&format!(
            r#"
  <a href="{link}" target="_blank" rel="noopener">
    <g class="avatar-{index}">
      <image x="{x}" y="{y}" width="{size}" height="{size}" href="{href}" clip-path="url(#circle-{index})"/>
    </g>
    <text x="{cx}" y="{label_y}" class="name">{name}</text>
  </a>"#,
            link = escape_attr(&sponsor.link()),
            x = slot.x,
            y = slot.y,
            size = AVATAR_SIZE,
            href = escape_attr(avatar_href),
            cx = slot.center_x,
            label_y = slot.y + LABEL_OFFSET,
        ));
    }

    /// Wraps the accumulated fragments in the document shell, sized for the
    /// sponsors pushed so far.
    pub fn finish(self) -> String {
        let canvas = layout::canvas(self.count);
        let style = self.style;
        let font_import = if self.options.import_web_font {
            format!(
                "\n      @import url('{}');",
                escape_text(&style.font_import_url)
            )
        } else {
            String::new()
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <style>{font_import}
      .title {{
        font-family: {title_family};
        font-size: {title_size}px;
        font-weight: {title_weight};
        fill: {title_color};
      }}
      .name {{
        font-family: {name_family};
        font-size: {name_size}px;
        fill: {name_color};
        text-anchor: middle;
      }}{avatar_styles}
    </style>{clip_paths}
  </defs>
  <rect width="{width}" height="{height}" fill="{background}" rx="{radius}"/>
  <text x="{title_x}" y="{title_y}" class="title" text-anchor="middle">{title}</text>{content}
</svg>
"#,
            width = canvas.width,
            height = canvas.height,
            title_family = escape_text(&style.title_font_family),
            title_size = style.title_font_size,
            title_weight = style.title_font_weight,
            title_color = escape_text(&style.title_color),
            name_family = escape_text(&style.name_font_family),
            name_size = style.name_font_size,
            name_color = escape_text(&style.name_color),
            avatar_styles = self.avatar_styles,
            clip_paths = self.clip_paths,
            background = escape_attr(&style.background_color),
            radius = style.corner_radius,
            title_x = canvas.width as f32 / 2.0,
            title_y = TITLE_BASELINE,
            title = escape_text(&style.title),
            content = self.content,
        )
    }
}

/// Renders the complete document. `avatars[i]` is the image href for `sponsors[i]`;
/// callers build `avatars` from `sponsors`, one entry each.
pub(crate) fn render_document(
    sponsors: &[Sponsor],
    avatars: &[String],
    style: &Style,
    options: RenderOptions,
) -> String {
    assert_eq!(sponsors.len(), avatars.len(), "one avatar per sponsor");

    let mut renderer = Renderer::new(style, options);
    for (sponsor, href) in sponsors.iter().zip(avatars) {
        renderer.push_sponsor(sponsor, href);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sponsor(name: &str, github: Option<&str>) -> Sponsor {
        Sponsor {
            name: name.into(),
            github: github.map(String::from),
        }
    }

    fn render(sponsors: &[Sponsor], options: RenderOptions) -> String {
        let avatars: Vec<String> = (0..sponsors.len())
            .map(|i| format!("https://img.test/{i}.png"))
            .collect();
        render_document(sponsors, &avatars, &Style::default(), options)
    }

    #[test]
    fn empty_list_renders_only_the_shell() {
        let svg = render(&[], RenderOptions::default());

        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"<svg width="450" height="60" xmlns="http://www.w3.org/2000/svg">"#));
        assert!(svg.contains(r##"<rect width="450" height="60" fill="#ffffff" rx="10"/>"##));
        assert!(svg.contains(
            r#"<text x="225" y="30" class="title" text-anchor="middle">💖 Supporters</text>"#
        ));
        assert!(!svg.contains("<clipPath"));
        assert!(!svg.contains("<a "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn sponsor_fragments_use_slot_geometry() {
        let svg = render(
            &[sponsor("Ada", Some("ada")), sponsor("Bo", None)],
            RenderOptions::default(),
        );

        assert!(svg.contains(r#"<svg width="450" height="150""#));
        assert!(svg.contains(r#"<clipPath id="circle-1">"#));
        assert!(svg.contains(r#"<circle cx="120" cy="90" r="30"/>"#));
        assert!(svg.contains(
            r#"<image x="90" y="60" width="60" height="60" href="https://img.test/1.png" clip-path="url(#circle-1)"/>"#
        ));
        assert!(svg.contains(r#"<text x="120" y="135" class="name">Bo</text>"#));
        assert!(svg.contains("transform-origin: 50px 90px;"));
        assert!(svg.contains(".avatar-1:hover {"));
        assert!(svg.contains("transform: scale(1.1);"));
        assert!(svg.contains("transition: transform 0.2s;"));
    }

    #[test]
    fn links_point_at_profile_or_hash() {
        let svg = render(
            &[sponsor("Ada", Some("ada")), sponsor("Bo", None)],
            RenderOptions::default(),
        );

        assert!(svg.contains(r#"<a href="https://github.com/ada" target="_blank" rel="noopener">"#));
        assert!(svg.contains(r##"<a href="#" target="_blank" rel="noopener">"##));
    }

    #[test]
    fn names_are_verbatim_unless_escaping_is_requested() {
        let sponsors = [sponsor("A&B", None)];

        let raw = render(&sponsors, RenderOptions::default());
        assert!(raw.contains(r#"class="name">A&B</text>"#));

        let escaped = render(
            &sponsors,
            RenderOptions {
                escape_names: true,
                ..RenderOptions::default()
            },
        );
        assert!(escaped.contains(r#"class="name">A&amp;B</text>"#));
    }

    #[test]
    fn placeholder_href_separators_are_escaped() {
        let avatars = vec!["https://ui-avatars.com/api/?name=Bo&background=random&size=128".to_string()];
        let svg = render_document(
            &[sponsor("Bo", None)],
            &avatars,
            &Style::default(),
            RenderOptions::default(),
        );

        assert!(svg.contains(
            r#"href="https://ui-avatars.com/api/?name=Bo&amp;background=random&amp;size=128""#
        ));
    }

    #[test]
    fn web_font_import_is_optional() {
        let linked = render(
            &[],
            RenderOptions {
                import_web_font: true,
                ..RenderOptions::default()
            },
        );
        assert!(linked.contains(
            "@import url('https://fonts.googleapis.com/css2?family=Inter:wght@600&amp;display=swap');"
        ));

        let embedded = render(&[], RenderOptions::default());
        assert!(!embedded.contains("@import"));
    }

    #[test]
    fn second_row_starts_at_first_column() {
        let sponsors: Vec<Sponsor> = (0..7).map(|i| sponsor(&format!("S{i}"), None)).collect();
        let svg = render(&sponsors, RenderOptions::default());

        assert!(svg.contains(r#"<svg width="450" height="240""#));
        assert!(svg.contains(
            r#"<image x="20" y="150" width="60" height="60" href="https://img.test/6.png" clip-path="url(#circle-6)"/>"#
        ));
    }

    #[test]
    fn canvas_follows_pushed_sponsors() {
        let style = Style::default();
        let mut renderer = Renderer::new(&style, RenderOptions::default());
        for i in 0..7 {
            renderer.push_sponsor(&sponsor(&format!("S{i}"), None), "a.png");
        }
        let svg = renderer.finish();

        assert!(svg.contains(r#"<svg width="450" height="240""#));
        assert!(svg.contains(r#"<clipPath id="circle-6">"#));
        assert!(!svg.contains("circle-7"));
    }

    #[test]
    #[should_panic(expected = "one avatar per sponsor")]
    fn mismatched_avatar_list_is_refused() {
        render_document(
            &[sponsor("Ada", None), sponsor("Bo", None)],
            &["a.png".to_string()],
            &Style::default(),
            RenderOptions::default(),
        );
    }
}
