//! Headless color correction of a single image.
//!
//! Usage:
//!   fix_colors <input> <output> --auto
//!   fix_colors <input> <output> <r> <g> <b>
//!
//! The output format follows the output extension (PNG for `.png`,
//! JPEG at quality 90 otherwise).

use std::path::PathBuf;
use std::process::ExitCode;

use scuba_pic_fix::config::{ExportConfig, IngestConfig};
use scuba_pic_fix::{EditError, NullSink, RenderPipeline, ScaleFactors, image_io};

enum Mode {
    Auto,
    Manual(ScaleFactors),
}

struct Args {
    input: PathBuf,
    output: PathBuf,
    mode: Mode,
}

const USAGE: &str = "usage: fix_colors <input> <output> (--auto | <r> <g> <b>)";

fn parse_args(args: &[String]) -> Result<Args, String> {
    let [input, output, rest @ ..] = args else {
        return Err(USAGE.to_string());
    };

    let mode = match rest {
        [flag] if flag == "--auto" => Mode::Auto,
        [r, g, b] => {
            let parse = |s: &String| {
                s.parse::<f64>()
                    .map_err(|e| format!("invalid factor '{s}': {e}"))
            };
            Mode::Manual(ScaleFactors::new(parse(r)?, parse(g)?, parse(b)?))
        }
        _ => return Err(USAGE.to_string()),
    };

    Ok(Args {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        mode,
    })
}

fn run(args: Args) -> Result<ScaleFactors, EditError> {
    let buffer = image_io::load_image(&args.input, &IngestConfig::default())?;
    println!(
        "Loaded {} ({}x{})",
        args.input.display(),
        buffer.width(),
        buffer.height()
    );

    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(buffer);

    let factors = match args.mode {
        Mode::Auto => pipeline.auto_fix()?,
        Mode::Manual(factors) => {
            pipeline.set_factors(factors)?;
            factors
        }
    };

    image_io::save_frame(pipeline.export_frame()?, &args.output, &ExportConfig::default())?;
    Ok(factors)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    let output = args.output.clone();

    match run(args) {
        Ok(f) => {
            println!("Factors: r={:.4} g={:.4} b={:.4}", f.r, f.g, f.b);
            println!("Wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
