//! cartpack-cli - Command-line interface for CartPack
//!
//! A command-line tool for unpacking, packing, and verifying compressed
//! blocks inside cartridge asset images.

use cartpack::{block_stats, pack_block, unpack_block};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cartpack-cli")]
#[command(about = "A CLI tool for cartridge asset block compression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Unpack one block from an image
    Unpack {
        /// Image file containing the block
        image: PathBuf,

        /// Output file for the raw bytes
        output: PathBuf,

        /// Byte offset of the block inside the image (0x prefix for hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Pack a raw file into a single block
    Pack {
        /// Input file to pack
        input: PathBuf,

        /// Output block file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Unpack a block, repack it, and compare against the image bytes
    Verify {
        /// Image file containing the block
        image: PathBuf,

        /// Byte offset of the block inside the image (0x prefix for hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: usize,
    },

    /// Show statistics for a block without writing anything
    Info {
        /// Image file containing the block
        image: PathBuf,

        /// Byte offset of the block inside the image (0x prefix for hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: usize,
    },
}

fn parse_offset(raw: &str) -> Result<usize, String> {
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };
    parsed.map_err(|_| format!("invalid offset '{raw}'"))
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Unpack {
            image,
            output,
            offset,
            force,
        } => unpack_command(&image, &output, offset, force, cli.verbose, cli.quiet),
        Commands::Pack {
            input,
            output,
            force,
        } => pack_command(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Verify { image, offset } => verify_command(&image, offset, cli.quiet),
        Commands::Info { image, offset } => info_command(&image, offset, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_output(output: &PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn progress_bar(quiet: bool, input_size: usize, message: &'static str) -> Option<ProgressBar> {
    if quiet || input_size <= 1024 * 1024 {
        return None;
    }
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    Some(pb)
}

fn unpack_command(
    image_path: &PathBuf,
    output: &PathBuf,
    offset: usize,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !image_path.exists() {
        return Err(format!("Image file '{}' does not exist", image_path.display()).into());
    }
    check_output(output, force)?;

    if verbose {
        println!(
            "Unpacking block at {:#x} from '{}' to '{}'",
            offset,
            image_path.display(),
            output.display()
        );
    }

    let start_time = Instant::now();
    let image = fs::read(image_path)?;

    let progress = progress_bar(quiet, image.len(), "Unpacking...");
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let block = unpack_block(&image, offset).map_err(|e| format!("Unpacking failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Unpacking complete");
    }

    fs::write(output, &block.data)?;

    if !quiet {
        println!("✓ Unpacking successful!");
        println!("  Compressed: {} bytes", block.compressed_len);
        println!("  Unpacked:   {} bytes", block.data.len());
        println!("  Time:       {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn pack_command(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    check_output(output, force)?;

    if verbose {
        println!("Packing '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let data = fs::read(input)?;
    let input_size = data.len();

    let progress = progress_bar(quiet, input_size, "Packing...");
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let packed = pack_block(&data).map_err(|e| format!("Packing failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Packing complete");
    }

    fs::write(output, &packed)?;

    let ratio = if input_size > 0 {
        (packed.len() as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if !quiet {
        println!("✓ Packing successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", packed.len());
        println!("  Ratio:  {:.1}%", ratio);
        println!("  Time:   {:.2?}", start_time.elapsed());

        if ratio > 100.0 {
            println!("  Note: File expanded during packing (common for small/random data)");
        }
    }

    Ok(())
}

fn verify_command(
    image_path: &PathBuf,
    offset: usize,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !image_path.exists() {
        return Err(format!("Image file '{}' does not exist", image_path.display()).into());
    }

    let image = fs::read(image_path)?;
    let block = unpack_block(&image, offset).map_err(|e| format!("Unpacking failed: {}", e))?;
    let repacked = pack_block(&block.data).map_err(|e| format!("Repacking failed: {}", e))?;

    let original = &image[offset..offset + block.compressed_len];
    let fresh = &repacked[..block.compressed_len.min(repacked.len())];

    if original == fresh && repacked.len() >= block.compressed_len {
        if !quiet {
            println!("✓ Block at {:#x} verifies bit-exact", offset);
            println!("  Compressed: {} bytes", block.compressed_len);
            println!("  Unpacked:   {} bytes", block.data.len());
        }
        Ok(())
    } else {
        let diffs: Vec<String> = original
            .iter()
            .zip(fresh.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .take(8)
            .map(|(i, (a, b))| format!("{:#x}: {:02x} != {:02x}", offset + i, a, b))
            .collect();
        Err(format!(
            "Block at {:#x} does not repack bit-exact ({} vs {} bytes); first diffs: {}",
            offset,
            block.compressed_len,
            repacked.len(),
            if diffs.is_empty() {
                "length mismatch only".to_string()
            } else {
                diffs.join(", ")
            }
        )
        .into())
    }
}

fn info_command(
    image_path: &PathBuf,
    offset: usize,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !image_path.exists() {
        return Err(format!("Image file '{}' does not exist", image_path.display()).into());
    }

    let image = fs::read(image_path)?;

    println!("CartPack Block Information:");
    println!("  Image:  {}", image_path.display());
    println!("  Offset: {:#x}", offset);

    match block_stats(&image, offset) {
        Ok(stats) => {
            let ratio = if stats.raw_len > 0 {
                (stats.compressed_len as f64 / stats.raw_len as f64) * 100.0
            } else {
                0.0
            };
            println!("  Codewords:         {}", stats.codeword_count);
            println!("  Compressed Size:   {} bytes", stats.compressed_len);
            println!("  Run-Length Stage:  {} bytes", stats.rle_len);
            println!("  Unpacked Size:     {} bytes", stats.raw_len);
            println!("  Compression Ratio: {:.1}%", ratio);
            println!("  Status: ✓ Valid block");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted block");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
