// Command-line front-end: reconcile declared fields against an Aadhaar scan.

use clap::Parser;
use env_logger::Env;
use idrecon::{
    models::{DeclaredFields, ReconcileConfig, ReconciliationVerdict, Severity},
    processing::OcrEngine,
    ReconcileError, Reconciler,
};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "idrecon", version, about = "Check declared identity details against OCR text from an Aadhaar card")]
struct Args {
    /// Full name as typed by the user
    #[arg(long)]
    name: String,

    /// 12-digit Aadhaar number (spaces and dashes allowed)
    #[arg(long)]
    id_number: String,

    /// Date of birth, preferably YYYY-MM-DD
    #[arg(long, default_value = "")]
    dob: String,

    /// Mobile number
    #[arg(long, default_value = "")]
    phone: String,

    /// File holding text already recognized from the card
    #[arg(long, conflicts_with = "image", required_unless_present = "image")]
    ocr_text: Option<PathBuf>,

    /// Card image to run through Tesseract (needs the `tesseract` feature)
    #[arg(long)]
    image: Option<PathBuf>,

    /// JSON file overriding matching thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,

    /// Log matcher decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(verdict) => {
            if args.json {
                match serde_json::to_string_pretty(&verdict) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("Error serializing verdict: {}", err);
                        process::exit(2);
                    }
                }
            } else {
                print_report(&verdict);
            }
            process::exit(if verdict.may_proceed() { 0 } else { 1 });
        }
        Err(err) => {
            eprintln!("Error reconciling document: {}", err);
            if err.is_retryable() {
                eprintln!("The same image can be retried.");
            }
            process::exit(2);
        }
    }
}

fn run(args: &Args) -> Result<ReconciliationVerdict, ReconcileError> {
    let config = match &args.config {
        Some(path) => ReconcileConfig::from_json_file(path)?,
        None => ReconcileConfig::default(),
    };
    let reconciler = Reconciler::with_config(config);

    let declared = DeclaredFields {
        name: args.name.clone(),
        id_number: args.id_number.clone(),
        date_of_birth: args.dob.clone(),
        phone: args.phone.clone(),
    };

    if let Some(path) = &args.ocr_text {
        let text = fs::read_to_string(path)?;
        return Ok(reconciler.reconcile(&declared, &text));
    }

    let image = args
        .image
        .as_ref()
        .ok_or_else(|| ReconcileError::Config("either --ocr-text or --image is required".to_string()))?;
    let engine = ocr_engine()?;
    reconciler.reconcile_image(&declared, engine.as_ref(), image, &mut |p| {
        log::info!("OCR progress: {}%", p.percent());
    })
}

#[cfg(feature = "tesseract")]
fn ocr_engine() -> Result<Box<dyn OcrEngine>, ReconcileError> {
    Ok(Box::new(idrecon::processing::TesseractOcr::new()))
}

#[cfg(not(feature = "tesseract"))]
fn ocr_engine() -> Result<Box<dyn OcrEngine>, ReconcileError> {
    Err(ReconcileError::Config(
        "--image requires the tesseract feature".to_string(),
    ))
}

fn print_report(verdict: &ReconciliationVerdict) {
    println!("\n===============================================");
    println!("      AADHAAR RECONCILIATION REPORT");
    println!("===============================================\n");

    println!(
        "Document classification: {} ({:.0}% confidence)",
        if verdict.classification.is_expected_type {
            "AADHAAR"
        } else {
            "UNRECOGNIZED"
        },
        verdict.classification.confidence * 100.0
    );

    println!("\nFIELDS:");
    for (field, validation) in &verdict.per_field {
        let badge = match validation.severity {
            Severity::Success => "OK",
            Severity::Warning => "WARN",
            Severity::Error => "FAIL",
        };
        println!("  [{:<4}] {}: {}", badge, field, validation.message);
        if let Some(value) = verdict.extracted_fields.get(field) {
            println!("         extracted: {}", value);
        }
    }

    println!("\nOverall status: {}", verdict.overall_status);
    println!(
        "{}",
        if verdict.may_proceed() {
            "You may proceed to the next step."
        } else {
            "Please correct the highlighted fields or upload a clearer scan."
        }
    );
}
