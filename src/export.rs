//! Writing the finished document: SVG as-is, or rasterized to PNG / converted to PDF.

use std::path::Path;

use log::{info, warn};
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::{Error, Result};

/// Local font directory loaded in addition to system fonts.
const LOCAL_FONTS: &str = "fonts";

/// Writes `svg` to `output`, converting by extension. Existing files are overwritten.
pub fn write_output(output: &Path, svg: &str, png_scale: f32) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::MissingExtension(output.to_path_buf()))?
        .to_ascii_lowercase();

    if ext == "png" || ext == "pdf" {
        let remote = remote_image_count(svg);
        if remote > 0 {
            warn!(
                "{} avatar(s) are remote URLs and will be missing from the {}; use --embed",
                remote,
                ext.to_ascii_uppercase()
            );
        }
    }

    let data = match ext.as_str() {
        "svg" => svg.as_bytes().to_vec(),
        "png" => svg_to_png(svg, png_scale)?,
        "pdf" => svg_to_pdf(svg)?,
        _ => return Err(Error::UnsupportedFormat(ext)),
    };

    std::fs::write(output, data).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("{} saved to: {}", ext.to_ascii_uppercase(), output.display());
    Ok(())
}

pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidScale(scale));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();

        let local_fonts = Path::new(LOCAL_FONTS);
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }

        let families = fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()));
        if let Some(family) = pick_sans_family(families) {
            fontdb.set_sans_serif_family(family);
        }
    }

    let tree = usvg::Tree::from_str(svg, &opts).map_err(|e| png_error(e.to_string()))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| png_error("Failed to create pixmap".into()))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| png_error(e.to_string()))
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    use svg2pdf::usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let local_fonts = Path::new(LOCAL_FONTS);
    if local_fonts.is_dir() {
        db.load_fonts_dir(local_fonts);
    }

    let families = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()));
    if let Some(family) = pick_sans_family(families) {
        db.set_sans_serif_family(family);
    }

    let mut opts = svg2pdf::usvg::Options::default();
    opts.fontdb = std::sync::Arc::new(db);

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts).map_err(|e| pdf_error(e.to_string()))?;

    // Labels become paths so viewers without the fonts still show names.
    let mut options = svg2pdf::ConversionOptions::default();
    options.embed_text = false;

    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| pdf_error(e.to_string()))
}

/// Counts `<image>` elements whose `href` is an http(s) URL. The rasterizer
/// does not fetch those.
fn remote_image_count(svg: &str) -> usize {
    svg.split("<image")
        .skip(1)
        .filter(|rest| {
            let element = rest.split("/>").next().unwrap_or_default();
            element.contains(r#"href="http://"#) || element.contains(r#"href="https://"#)
        })
        .count()
}

/// First family whose name mentions "sans", else the first family seen.
fn pick_sans_family<'a>(families: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut first: Option<&str> = None;
    for family in families {
        if family.to_ascii_lowercase().contains("sans") {
            return Some(family.to_string());
        }
        first.get_or_insert(family);
    }
    first.map(str::to_string)
}

fn png_error(reason: String) -> Error {
    Error::Export {
        format: "PNG",
        reason,
    }
}

fn pdf_error(reason: String) -> Error {
    Error::Export {
        format: "PDF",
        reason,
    }
}
