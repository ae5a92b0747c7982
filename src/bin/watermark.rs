use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "watermark", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend a watermark onto an image and write the result.
    Compose(ComposeArgs),
    /// Print the size and color model of an image.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Base image.
    #[arg(long)]
    image: PathBuf,

    /// Watermark image.
    #[arg(long)]
    watermark: PathBuf,

    /// Watermark weight, integer 0-100.
    #[arg(long, allow_hyphen_values = true)]
    percentage: String,

    /// Placement method: single or grid.
    #[arg(long)]
    position_method: String,

    /// Top-left corner for single placement, "X Y".
    #[arg(long, allow_hyphen_values = true)]
    position: Option<String>,

    /// Use the watermark's alpha channel (translucent watermarks only).
    #[arg(long)]
    alpha: bool,

    /// Key color treated as transparent, "R G B" (opaque watermarks only).
    #[arg(long, allow_hyphen_values = true)]
    transparency_color: Option<String>,

    /// Output file, must end in .jpg or .png.
    #[arg(long)]
    out: PathBuf,

    /// Blend rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (default: one per core).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Image to inspect.
    path: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let res = match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Info(args) => cmd_info(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let request = watermark::WatermarkRequest {
        image: args.image,
        watermark: args.watermark,
        use_alpha: args.alpha,
        transparency_color: args.transparency_color,
        percentage: args.percentage,
        position_method: args.position_method,
        position: args.position,
        output: args.out,
        threading: watermark::BlendThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };

    let outcome = watermark::run(&request)?;
    println!("{outcome}");
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let info = watermark::image_info(&args.path)?;
    if args.json {
        let json = serde_json::to_string_pretty(&info).context("serialize image info")?;
        println!("{json}");
    } else {
        println!("{info}");
    }
    Ok(())
}
