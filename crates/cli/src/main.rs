use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use tonescan_core::classify::classifier::ToneClassifier;
use tonescan_core::geometry::infrastructure::centered_provider::CenteredFaceProvider;
use tonescan_core::geometry::landmarks::Point3D;
use tonescan_core::pipeline::budgets::StageBudgets;
use tonescan_core::pipeline::feedback::Locale;
use tonescan_core::quality::gate::GateOptions;
use tonescan_core::{AnalyzePhotoUseCase, Classification, Frame, PhotoAnalysis};

/// Personal color analysis from a photo.
#[derive(Parser)]
#[command(name = "tonescan")]
struct Cli {
    /// Input photo (PNG, JPEG, ...).
    input: PathBuf,

    /// JSON file with a pre-computed 468-point landmark set. Skips the
    /// detector call but not the geometry checks.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Emit the full analysis record as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    /// Use BT.709 luma weights for the quality gate.
    #[arg(long)]
    wide_gamut: bool,

    /// Feedback language: en or ko.
    #[arg(long, default_value = "en")]
    locale: String,

    /// Retries for the landmark provider before falling back.
    #[arg(long, default_value = "2")]
    retries: u32,

    /// Total pipeline deadline in milliseconds.
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// How many neighboring tones to list in the text report.
    #[arg(long, default_value = "3")]
    adjacent: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let locale = parse_locale(&cli.locale)?;

    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let frame = load_frame(&cli.input)?;
    let landmarks = cli.landmarks.as_deref().map(load_landmarks).transpose()?;

    let mut budgets = StageBudgets::default();
    if let Some(ms) = cli.deadline_ms {
        budgets.total = Duration::from_millis(ms);
    }

    let use_case = AnalyzePhotoUseCase::new(Arc::new(CenteredFaceProvider))
        .with_retries(cli.retries)
        .with_budgets(budgets)
        .with_gate_options(GateOptions {
            wide_gamut: cli.wide_gamut,
        });

    match use_case.analyze_with_landmarks(&frame, landmarks) {
        Ok(analysis) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_report(&analysis, locale, cli.adjacent);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(key) =
                tonescan_core::pipeline::feedback::FeedbackKey::for_error(&err)
            {
                eprintln!("{}", key.message(locale));
            }
            Err(err.into())
        }
    }
}

fn load_frame(path: &std::path::Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let image = image::open(path)?.into_rgb8();
    let (width, height) = image.dimensions();
    Ok(Frame::new(image.into_raw(), width, height, 3)?)
}

fn load_landmarks(path: &std::path::Path) -> Result<Vec<Point3D>, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let points: Vec<Point3D> = serde_json::from_str(&raw)?;
    Ok(points)
}

fn parse_locale(locale: &str) -> Result<Locale, Box<dyn std::error::Error>> {
    match locale {
        "en" => Ok(Locale::En),
        "ko" => Ok(Locale::Ko),
        other => Err(format!("Locale must be 'en' or 'ko', got '{other}'").into()),
    }
}

fn print_report(analysis: &PhotoAnalysis, locale: Locale, adjacent: usize) {
    let tone = &analysis.tone;
    println!("Tone:        {:?}", tone.tone);
    println!("Season:      {:?} ({:?})", tone.season, tone.subtype);
    println!("Undertone:   {:?}", tone.undertone);
    println!("Skin:        {:?}", tone.skin_brightness);
    println!("Confidence:  {:.0}/100", tone.confidence);
    println!(
        "Measured:    L*{:.1} a*{:.1} b*{:.1}",
        tone.measured.l, tone.measured.a, tone.measured.b
    );

    if analysis.classification == Classification::Fallback {
        println!("Note:        approximate result (fallback path)");
    }

    let neighbors = ToneClassifier::adjacent_tones(tone.tone, adjacent);
    if !neighbors.is_empty() {
        let names: Vec<String> = neighbors.iter().map(|t| format!("{t:?}")).collect();
        println!("Also close:  {}", names.join(", "));
    }

    println!();
    for message in analysis.feedback_messages(locale) {
        println!("- {message}");
    }

    log::info!("analysis completed in {}ms", analysis.elapsed_ms);
}
