use std::process;

use clap::Parser;
use colored::Colorize;
use kmer_total::{
    cli::Args,
    config::ScanConfig,
    input::Input,
    kmer::KmerLength,
    run::run_with_options,
};

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    init_tracing();

    let config = match KmerLength::new(args.k)
        .map_err(kmer_total::KmerCountError::from)
        .and_then(|k| ScanConfig::new(k).with_chunk_size(args.chunk_size))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Problem parsing arguments:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    };

    let inputs: Vec<Input> = if args.paths.is_empty() {
        vec![Input::Stdin]
    } else {
        args.paths.iter().map(|path| Input::from_path(path)).collect()
    };

    if !args.quiet {
        let names: Vec<String> = inputs.iter().map(ToString::to_string).collect();
        eprintln!("{}: {}", "k-length".bold(), args.k.to_string().blue().bold());
        eprintln!("{}: {}", "data".bold(), names.join(", ").underline().bold().blue());
        eprintln!();
    }

    match run_with_options(&inputs, &config, args.format, args.min_count) {
        Ok(stats) => {
            if !args.quiet {
                eprintln!(
                    "{}: {} records, {} k-mers counted, {} skipped",
                    "done".bold(),
                    stats.records,
                    stats.windows_counted,
                    stats.windows_skipped
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
