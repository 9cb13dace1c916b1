use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sponsorwall::avatar::DEFAULT_MAX_REDIRECTS;
use sponsorwall::{AvatarSource, HttpFetcher, Style, export, load_sponsors};

/// Render a sponsor list to an SVG wall of circular avatars
#[derive(Parser, Debug)]
#[command(name = "sponsorwall")]
#[command(version)]
#[command(about = "Render sponsors.json to an SVG (or PNG/PDF) avatar wall", long_about = None)]
struct Args {
    /// Sponsor list: JSON with a top-level "sponsors" array (use "-" for stdin)
    #[arg(value_name = "INPUT", default_value = "sponsors.json")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT", default_value = "sponsors.svg")]
    output: PathBuf,

    /// Fetch avatars and embed them as data URIs instead of linking to them
    #[arg(long)]
    embed: bool,

    /// Style override file (TOML or YAML)
    #[arg(short, long, value_name = "STYLE")]
    style: Option<PathBuf>,

    /// Maximum redirect hops per avatar fetch
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    max_redirects: u32,

    /// XML-escape sponsor names (by default they are written verbatim)
    #[arg(long)]
    escape_names: bool,

    /// Raster scale multiplier for PNG output
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> sponsorwall::Result<()> {
    let style = match args.style {
        Some(ref path) => Style::from_file(path)?,
        None => Style::default(),
    };

    let sponsors = load_sponsors(&args.input)?;
    let source = AvatarSource::default();

    let svg = if args.embed {
        let fetcher = HttpFetcher::new(args.max_redirects);
        sponsorwall::render_embedded(&sponsors, &source, &fetcher, &style, args.escape_names)?
    } else {
        sponsorwall::render_linked(&sponsors, &source, &style, args.escape_names)
    };

    export::write_output(&args.output, &svg, args.png_scale)
}
