use crate::config::{RleConfig, RleMode};
use crate::error::RleError;
use crate::pipeline;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Byte-oriented run-length archiver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses a file
    Compress {
        /// Input file to compress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output archive name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Framing mode [strict, legacy]
        #[arg(short, long, default_value = "strict")]
        mode: RleMode,
    },
    /// Decompresses an archive
    Decompress {
        /// Archive to decompress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Framing mode [strict, legacy]
        #[arg(short, long, default_value = "strict")]
        mode: RleMode,
    },
    /// Prints the header and body size of an archive
    Info {
        /// Archive to inspect
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Checks that an archive decodes cleanly
    Validate {
        /// Archive to check
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Framing mode [strict, legacy]
        #[arg(short, long, default_value = "strict")]
        mode: RleMode,
    },
}

fn progress_bar(len: u64) -> Result<ProgressBar, RleError> {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .map_err(|e| RleError::ConfigError(format!("Invalid progress template: {}", e)))?
        .progress_chars("#>-");
    pb.set_style(style);
    Ok(pb)
}

fn file_len(path: &Path) -> Result<u64, RleError> {
    Ok(std::fs::metadata(path)?.len())
}

pub fn run() -> Result<(), RleError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress { input, output, mode } => {
            println!("Compressing {} to {}...", input.display(), output.display());
            let config = RleConfig::default().with_mode(*mode);

            let original_size = file_len(input)?;
            let pb = progress_bar(original_size)?;
            let mut in_file = pb.wrap_read(BufReader::with_capacity(config.buffer_size, File::open(input)?));
            let mut out_file = BufWriter::with_capacity(config.buffer_size, File::create(output)?);

            let start = Instant::now();
            let stats = pipeline::compress(&mut in_file, &mut out_file, original_size, &config)?;
            let duration = start.elapsed();
            pb.finish_with_message("Compression finished");

            println!("Compression successful!");
            println!("  Original Size:    {} bytes", stats.original_size);
            println!("  Compressed Size:  {} bytes", stats.compressed_size);
            println!("  Ratio:            {:.2}x", stats.ratio);
            println!("  Elapsed Time:     {:.2?}", duration);
        }
        Commands::Decompress { input, output, mode } => {
            println!("Decompressing {} to {}...", input.display(), output.display());
            let config = RleConfig::default().with_mode(*mode);

            let pb = progress_bar(file_len(input)?)?;
            let mut in_file = pb.wrap_read(BufReader::with_capacity(config.buffer_size, File::open(input)?));
            let mut out_file = BufWriter::with_capacity(config.buffer_size, File::create(output)?);

            let start = Instant::now();
            let stats = pipeline::decompress_with_stats(&mut in_file, &mut out_file, &config)?;
            let duration = start.elapsed();
            pb.finish_with_message("Decompression finished");

            println!("Decompression successful!");
            println!("  Restored Size:    {} bytes", stats.original_size);
            println!("  Body Consumed:    {} bytes", stats.bytes_consumed);
            println!("  Elapsed Time:     {:.2?}", duration);
        }
        Commands::Info { input } => {
            let mut in_file = BufReader::new(File::open(input)?);
            let info = pipeline::info(&mut in_file)?;

            println!("{}", input.display());
            println!("  Original Size:    {} bytes", info.original_size);
            println!("  Body Size:        {} bytes", info.body_size);
            println!("  Archive Size:     {} bytes", info.archive_size);
            println!("  Ratio:            {:.2}x", info.compression_ratio);
        }
        Commands::Validate { input, mode } => {
            let config = RleConfig::default().with_mode(*mode);
            let mut in_file = BufReader::with_capacity(config.buffer_size, File::open(input)?);
            pipeline::validate(&mut in_file, &config)?;
            println!("{}: OK ({} mode)", input.display(), config.mode);
        }
    }

    Ok(())
}
