use std::fs;
use std::path::PathBuf;

use topic_lens::api::{EmailDraft, ForecastSession, GeminiClient, LensConfig};
use topic_lens::core::{ForecastRequest, Granularity};
use topic_lens::render::{SvgRenderer, render_geometry};
use topic_lens::telemetry::init_default_tracing;

const USAGE: &str = "usage: topic_lens <summarize|forecast> --topic <text> [--years <3|5|10>] [--granularity <weeks|months|years>] [--svg <path>] [--email <address>] [--config <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Summarize,
    Forecast,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    topic: String,
    years: Option<u32>,
    granularity: Option<Granularity>,
    svg: Option<PathBuf>,
    email: Option<String>,
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
    let client = GeminiClient::from_env(&config).map_err(|err| err.to_string())?;
    let mut session = ForecastSession::new().with_search_grounding(config.search_grounding);

    session
        .run_summary(&client, args.topic.as_str())
        .map_err(|err| err.to_string())?;
    print_summary(&session);

    if args.command == CommandKind::Forecast {
        let defaults = config.default_forecast;
        let request = ForecastRequest::new(
            args.years.unwrap_or(defaults.duration_years),
            args.granularity.unwrap_or(defaults.granularity),
        )
        .map_err(|err| err.to_string())?;
        session
            .run_forecast(&client, request)
            .map_err(|err| err.to_string())?;
        print_forecast(&session);

        if let Some(path) = &args.svg {
            if let Some(geometry) = session.chart_geometry(&config).map_err(|err| err.to_string())? {
                let mut renderer = SvgRenderer::new();
                render_geometry(&mut renderer, &geometry).map_err(|err| err.to_string())?;
                fs::write(path, renderer.document())
                    .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
                println!("chart written to {}", path.display());
            }
        }
    }

    if let Some(recipient) = &args.email {
        let draft = EmailDraft::from_session(recipient, &session, config.locale)
            .map_err(|err| err.to_string())?;
        println!("\n{}", draft.mailto_url());
    }

    Ok(())
}

fn print_summary(session: &ForecastSession) {
    println!("{}\n", session.summary());
    if !session.references().is_empty() {
        println!("References:");
        for reference in session.references() {
            println!("  - {}\n    {}", reference.title, reference.uri);
        }
    }
}

fn print_forecast(session: &ForecastSession) {
    let Some(forecast) = session.forecast() else {
        return;
    };
    println!("\nForecast analysis: {}", forecast.analysis);
    println!("Forecasting approach: {}", forecast.methodology);
    println!("Model / formula: {}", forecast.formula);
    println!("Error measure: {}", forecast.error_measure);
    for point in &forecast.forecast {
        println!("  {:>12}  {}", point.time, point.value);
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("summarize") => CommandKind::Summarize,
        Some("forecast") => CommandKind::Forecast,
        _ => return Err(USAGE.to_owned()),
    };

    let mut topic = None::<String>;
    let mut years = None::<u32>;
    let mut granularity = None::<Granularity>;
    let mut svg = None::<PathBuf>;
    let mut email = None::<String>;
    let mut config = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--topic" => topic = Some(value()?),
            "--years" => {
                let raw = value()?;
                years = Some(
                    raw.parse::<u32>()
                        .map_err(|err| format!("invalid --years `{raw}`: {err}"))?,
                );
            }
            "--granularity" => {
                granularity = Some(Granularity::parse(&value()?).map_err(|err| err.to_string())?);
            }
            "--svg" => svg = Some(PathBuf::from(value()?)),
            "--email" => email = Some(value()?),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        command,
        topic: topic.ok_or_else(|| format!("missing --topic\n{USAGE}"))?,
        years,
        granularity,
        svg,
        email,
        config,
    })
}
