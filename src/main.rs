use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use hf2::config::{MenuPaths, Settings};
use hf2::pipeline::{CompressReport, FilePipeline};
use hf2::store::PathMetadata;
use hf2::{AutoSafe, logging};

/// Huffman file compressor (HF2 format) with a toy XOR cipher.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "HF2_LOG", default_value = "warn")]
    log_level: String,

    /// Write the container even when it is not smaller than the input
    #[arg(long, global = true, env = "HF2_ALWAYS_EMIT")]
    always_emit: bool,

    /// File extensions accepted for compression
    #[arg(long = "accept", global = true, value_delimiter = ',', default_value = "txt")]
    accepted_extensions: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into an HF2 container at OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Restore an HF2 container
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// Compare the result against this file
        #[arg(long)]
        verify: Option<PathBuf>,
    },
    /// XOR-encrypt a file with a password-derived keystream
    Encrypt {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        password: String,
    },
    /// Reverse `encrypt`
    Decrypt {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        password: String,
        /// Compare the result against this file
        #[arg(long)]
        verify: Option<PathBuf>,
    },
    /// Interactive menu over a fixed set of files in DIR
    Menu {
        #[arg(long, default_value = "base.txt")]
        base: PathBuf,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Refuse to start when the base file is smaller than this
        #[arg(long, default_value_t = hf2::config::DEFAULT_MIN_INPUT_SIZE)]
        min_size: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let mut settings = Settings {
        autosafe: if cli.always_emit { AutoSafe::Emit } else { AutoSafe::Reject },
        accepted_extensions: cli.accepted_extensions,
        ..Settings::default()
    };
    if let Command::Menu { min_size, .. } = &cli.command {
        settings.min_input_size = *min_size;
    }
    let pipeline = FilePipeline::from_settings(&settings);

    match cli.command {
        Command::Compress { input, output } => {
            let report = pipeline
                .compress_file(&input, &output)
                .with_context(|| format!("failed to compress {}", input.display()))?;
            print_report(&output, &report);
        }
        Command::Decompress { input, output, verify } => {
            pipeline
                .decompress_file(&input, &output)
                .with_context(|| format!("failed to decompress {}", input.display()))?;
            println!("wrote {}", output.display());
            if let Some(original) = verify {
                verify_or_fail(&pipeline, &original, &output)?;
            }
        }
        Command::Encrypt { input, output, password } => {
            pipeline
                .encrypt_file(&input, &output, &password)
                .with_context(|| format!("failed to encrypt {}", input.display()))?;
            println!("wrote {}", output.display());
        }
        Command::Decrypt { input, output, password, verify } => {
            pipeline
                .decrypt_file(&input, &output, &password)
                .with_context(|| format!("failed to decrypt {}", input.display()))?;
            println!("wrote {}", output.display());
            if let Some(original) = verify {
                verify_or_fail(&pipeline, &original, &output)?;
            }
        }
        Command::Menu { base, dir, .. } => {
            let paths = MenuPaths::in_dir(&dir, &base);
            let stdin = io::stdin();
            run_menu(&pipeline, &settings, &paths, &mut stdin.lock())?;
        }
    }

    Ok(())
}

fn print_report(output: &Path, report: &CompressReport) {
    println!("wrote {}", output.display());
    println!(
        "ratio {:.4} | reduction {:.2}%",
        report.ratio(),
        report.reduction_percent()
    );
}

fn verify_or_fail(pipeline: &FilePipeline, original: &Path, restored: &Path) -> Result<()> {
    if pipeline.files_identical(original, restored)? {
        println!("verified: {} matches {}", restored.display(), original.display());
        Ok(())
    } else {
        bail!("{} does not match {}", restored.display(), original.display())
    }
}

fn report_match(pipeline: &FilePipeline, original: &Path, restored: &Path) -> Result<()> {
    let verdict = if pipeline.files_identical(original, restored)? {
        "identical to"
    } else {
        "DIFFERENT from"
    };
    println!("check: {} is {} {}", restored.display(), verdict, original.display());
    Ok(())
}

fn run_menu(pipeline: &FilePipeline, settings: &Settings, paths: &MenuPaths, input: &mut impl BufRead) -> Result<()> {
    let size = pipeline
        .store()
        .file_size(&paths.base)
        .with_context(|| format!("cannot stat {}", paths.base.display()))?;
    if size < settings.min_input_size {
        println!(
            "{} is {} bytes; files under {} bytes are too small to compress.",
            paths.base.display(),
            size,
            settings.min_input_size
        );
        return Ok(());
    }

    loop {
        println!();
        println!("=== hf2 === base: {} ({} bytes)", paths.base.display(), size);
        println!("  c  compress    {} -> {}", paths.base.display(), paths.compressed.display());
        println!("  d  decompress  {} -> {} (and compare)", paths.compressed.display(), paths.decompressed.display());
        println!("  e  encrypt     {} -> {}", paths.base.display(), paths.encrypted.display());
        println!("  u  decrypt     {} -> {} (and compare)", paths.encrypted.display(), paths.decrypted.display());
        println!("  s  exit");
        let Some(choice) = prompt(input, "operation: ")? else {
            return Ok(());
        };

        let outcome = match choice.trim_start_matches('-') {
            "s" => return Ok(()),
            "c" => pipeline
                .compress_file(&paths.base, &paths.compressed)
                .map(|report| print_report(&paths.compressed, &report))
                .map_err(anyhow::Error::from),
            "d" => pipeline
                .decompress_file(&paths.compressed, &paths.decompressed)
                .map_err(anyhow::Error::from)
                .and_then(|_| report_match(pipeline, &paths.base, &paths.decompressed)),
            "e" => match prompt(input, "password: ")? {
                Some(password) => pipeline
                    .encrypt_file(&paths.base, &paths.encrypted, &password)
                    .map(|()| println!("wrote {}", paths.encrypted.display()))
                    .map_err(anyhow::Error::from),
                None => return Ok(()),
            },
            "u" => match prompt(input, "password: ")? {
                Some(password) => pipeline
                    .decrypt_file(&paths.encrypted, &paths.decrypted, &password)
                    .map_err(anyhow::Error::from)
                    .and_then(|()| report_match(pipeline, &paths.base, &paths.decrypted)),
                None => return Ok(()),
            },
            _ => {
                println!("unknown operation, try again");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("error: {e:#}");
        }
    }
}

/// Read one trimmed line; `None` at end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
