//! # Steganography Command-Line Driver
//!
//! ## Usage
//!
//! ```bash
//! stego encode --input cover.png --output stego.png --message "hello" --codec binary
//! stego decode --input stego.png --codec binary
//! stego capacity --input cover.png
//! ```
//!
//! Huffman needs the code table from the encode. Either run both steps in one
//! process:
//! ```bash
//! stego roundtrip --input cover.png --output stego.png --message "hello" --codec huffman
//! ```
//! or save the table next to the image and hand it to the decoder:
//! ```bash
//! stego encode --input cover.png --output stego.png --message "hello" --codec huffman --table table.json
//! stego decode --input stego.png --codec huffman --table table.json
//! ```

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use lsb_stego::common::config::load_config;
use lsb_stego::common::logging::{init_logger, parse_level};
use lsb_stego::{CodeTable, CodecKind, Message, Steganography, StegoConfig};

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image
    Encode(EncodeArgs),
    /// Recover a message from an image
    Decode {
        /// Image holding the message
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = CodecKind::Binary)]
        codec: CodecKind,

        /// Huffman code table written by `encode --table`
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Show how many bits and bytes an image can hold
    Capacity {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Encode, then decode the written image in the same session
    Roundtrip(EncodeArgs),
}

#[derive(ClapArgs, Debug)]
struct EncodeArgs {
    /// Carrier image
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the image with the hidden message (use a lossless format)
    #[arg(short, long)]
    output: PathBuf,

    /// Text to hide
    #[arg(short, long)]
    message: String,

    #[arg(long, value_enum, default_value_t = CodecKind::Binary)]
    codec: CodecKind,

    /// Save the Huffman code table as JSON
    #[arg(long)]
    table: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config: StegoConfig = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {path}"))?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.logging.level)
    };
    init_logger(level);

    let mut session = Steganography::new(config.codec);

    match args.command {
        Command::Encode(encode) => {
            run_encode(&mut session, &encode)?;
            print_message(&session, args.json)?;
        }
        Command::Decode {
            input,
            codec,
            table,
        } => {
            if let Some(path) = table {
                session.set_code_table(read_table(&path)?);
            }
            session.decode(&input, codec)?;
            print_message(&session, args.json)?;
        }
        Command::Capacity { input } => {
            let capacity = session.capacity(&input)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&capacity)?);
            } else {
                println!("Capacity: {} bits ({} bytes)", capacity.bits, capacity.bytes);
            }
        }
        Command::Roundtrip(encode) => {
            let encoded = run_encode(&mut session, &encode)?;
            let decoded = session.decode(&encode.output, encode.codec)?;
            print_message(&session, args.json)?;
            if decoded.text != encoded.text {
                anyhow::bail!(
                    "round trip mismatch: wrote {:?}, read back {:?}",
                    encoded.text,
                    decoded.text
                );
            }
            info!("Round trip verified");
        }
    }

    Ok(())
}

fn run_encode(session: &mut Steganography, args: &EncodeArgs) -> Result<Message> {
    let message = session.encode(&args.input, &args.output, &args.message, args.codec)?;

    if let Some(path) = &args.table {
        match session.code_table() {
            Some(table) => {
                table
                    .save(path)
                    .with_context(|| format!("writing code table {}", path.display()))?;
                info!("Code table saved to {}", path.display());
            }
            None => log::warn!("--table ignored: the {} codec has no code table", args.codec),
        }
    }

    Ok(message)
}

fn read_table(path: &Path) -> Result<CodeTable> {
    CodeTable::load(path).with_context(|| format!("reading code table {}", path.display()))
}

fn print_message(session: &Steganography, json: bool) -> Result<()> {
    match session.message() {
        Some(message) if json => println!("{}", serde_json::to_string_pretty(message)?),
        _ => println!("{}", session.report()),
    }
    Ok(())
}
