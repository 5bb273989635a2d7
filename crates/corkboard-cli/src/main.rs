#![forbid(unsafe_code)]

use corkboard::layout::layout_dataset;
use corkboard::load::{load_path, load_str};
use corkboard::render::raster::{self, RasterError, RasterOptions};
use corkboard::render::{BoardRenderer, HeadlessError, ViewportRect, build_scene, scene_to_json};
use corkboard::{BoardConfig, Connection, EntityLookup, LoadOutcome};
use futures::executor::block_on;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Board(corkboard::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
    /// The fallback container was printed; the message says why.
    Fallback(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Board(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Fallback(msg) => write!(f, "rendered fallback board: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<corkboard::Error> for CliError {
    fn from(value: corkboard::Error) -> Self {
        Self::Board(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<corkboard::render::Error> for CliError {
    fn from(value: corkboard::render::Error) -> Self {
        Self::Render(HeadlessError::Render(value))
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Graph,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Html,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    scene: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    viewport_width: f64,
    viewport_height: f64,
    diagram_id: Option<String>,
    config: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct GraphOut<'a> {
    edges: &'a [Connection],
    connections: &'a IndexMap<String, Vec<String>>,
}

fn usage() -> &'static str {
    "corkboard-cli\n\
\n\
USAGE:\n\
  corkboard-cli [graph] [--pretty] [--config <path>] [<path>|-]\n\
  corkboard-cli layout [--pretty] [--scene] [--config <path>] [<path>|-]\n\
  corkboard-cli render [--format svg|html|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--viewport-width <w>] [--viewport-height <h>] [--id <board-id>] [--config <path>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the dataset JSON is read from stdin.\n\
  - graph prints the edge list and the per-entity connection names as JSON.\n\
  - layout prints ring positions as JSON; --scene prints the built cards and threads instead.\n\
  - render prints SVG/HTML to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - --config accepts a JSON, JSON5 or YAML board config.\n\
  - Set CORKBOARD_LOG=debug|info|warn|error to control stderr logging.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Graph,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        viewport_width: 1280.0,
        viewport_height: 800.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" => args.command = Command::Graph,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--scene" => args.scene = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--viewport-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_width = parse_extent(w)?;
            }
            "--viewport-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.viewport_height = parse_extent(h)?;
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn parse_extent(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CliError::Usage(usage()))
    }
}

fn load_input(input: Option<&str>) -> Result<LoadOutcome, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(block_on(load_str(&buf)))
        }
        Some(path) => Ok(block_on(load_path(path))),
    }
}

fn load_config(path: Option<&str>) -> Result<BoardConfig, CliError> {
    match path {
        None => Ok(BoardConfig::default()),
        Some(path) => Ok(BoardConfig::from_path(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn init_tracing() {
    let level = std::env::var("CORKBOARD_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::WARN);
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let outcome = load_input(args.input.as_deref())?;

    match args.command {
        Command::Graph => {
            let dataset = outcome.into_result()?;
            let edges =
                corkboard::build_connections(&dataset.persons, &dataset.extra_connections);
            let lookup = EntityLookup::new(&dataset.persons, &dataset.evidence);
            let connections = corkboard::build_connection_map(&edges, &lookup);
            write_json(
                &GraphOut {
                    edges: &edges,
                    connections: &connections,
                },
                args.pretty,
            )
        }
        Command::Layout => {
            let dataset = outcome.into_result()?;
            let layout = layout_dataset(&dataset, &config.layout);
            if args.scene {
                let edges =
                    corkboard::build_connections(&dataset.persons, &dataset.extra_connections);
                let scene = build_scene(&dataset, &layout, &edges, &config.scene);
                let json = scene_to_json(&scene, args.pretty)?;
                println!("{json}");
                Ok(())
            } else {
                write_json(&layout, args.pretty)
            }
        }
        Command::Render => {
            let mut renderer = BoardRenderer::new()
                .with_config(config)
                .with_viewport(ViewportRect::sized(
                    args.viewport_width,
                    args.viewport_height,
                ));
            if let Some(id) = args.diagram_id.as_deref() {
                renderer = renderer.with_diagram_id(id);
            }

            if args.render_format == RenderFormat::Html {
                let failure = outcome.failure().map(|f| f.to_string());
                let html = renderer.mount(outcome).render_html();
                write_text(&html, args.out.as_deref())?;
                return match failure {
                    Some(msg) => Err(CliError::Fallback(msg)),
                    None => Ok(()),
                };
            }

            let dataset = outcome.into_result()?;
            let svg = renderer.render_dataset_svg(dataset)?;
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };

            let bytes = match args.render_format {
                RenderFormat::Svg | RenderFormat::Html => {
                    return write_text(&svg, args.out.as_deref());
                }
                RenderFormat::Png => raster::svg_to_png(&svg, &raster_options)?,
                RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &raster_options)?,
                RenderFormat::Pdf => raster::svg_to_pdf(&svg)?,
            };
            let out = args.out.clone().unwrap_or_else(|| {
                default_raster_out_path(args.input.as_deref(), args.render_format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            tracing::info!(out = %out, bytes = bytes.len(), "wrote raster board");
            write_bytes(&bytes, &out)
        }
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("corkboard-cli")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_graph_on_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Graph);
        assert!(args.input.is_none());
        assert_eq!(args.viewport_width, 1280.0);
    }

    #[test]
    fn parses_render_flags() {
        let args = parse_args(&argv(&[
            "render", "--format", "JPEG", "--scale", "2", "--id", "wall", "board.json",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.render_format, RenderFormat::Jpeg);
        assert_eq!(args.render_scale, 2.0);
        assert_eq!(args.diagram_id.as_deref(), Some("wall"));
        assert_eq!(args.input.as_deref(), Some("board.json"));
    }

    #[test]
    fn rejects_bad_usage() {
        for bad in [
            argv(&["render", "--format", "gif"]),
            argv(&["render", "--scale", "0"]),
            argv(&["render", "--viewport-width", "-5"]),
            argv(&["a.json", "b.json"]),
            argv(&["--bogus"]),
            argv(&["--out"]),
        ] {
            assert!(matches!(parse_args(&bad), Err(CliError::Usage(_))), "{bad:?}");
        }
    }

    #[test]
    fn raster_out_path_follows_input() {
        assert_eq!(
            default_raster_out_path(Some("boards/case.json"), "png"),
            std::path::PathBuf::from("boards/case.png")
        );
        assert_eq!(
            default_raster_out_path(Some("-"), "pdf"),
            std::path::PathBuf::from("out.pdf")
        );
    }
}
