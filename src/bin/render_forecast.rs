use std::fs;
use std::path::{Path, PathBuf};

use topic_lens::LensConfig;
use topic_lens::core::{compute_geometry_with_locale, parse_forecast};
use topic_lens::render::{SvgRenderer, render_geometry};
use topic_lens::telemetry::init_default_tracing;

const USAGE: &str =
    "usage: render_forecast --input <raw-reply.txt> --output <chart.svg> [--config <config.json>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => LensConfig::from_path(path).map_err(|err| err.to_string())?,
        None => LensConfig::default(),
    };

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let forecast = parse_forecast(&raw).map_err(|err| err.to_string())?;
    let geometry = compute_geometry_with_locale(&forecast.forecast, config.chart, config.locale)
        .map_err(|err| err.to_string())?;

    let mut renderer = SvgRenderer::new();
    render_geometry(&mut renderer, &geometry).map_err(|err| err.to_string())?;
    write_svg(&args.output, &renderer)?;

    println!(
        "rendered {} forecast points to {}",
        forecast.forecast.len(),
        args.output.display()
    );
    Ok(())
}

fn write_svg(path: &Path, renderer: &SvgRenderer) -> Result<(), String> {
    fs::write(path, renderer.document())
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut config = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output: output.ok_or_else(|| USAGE.to_owned())?,
        config,
    })
}
