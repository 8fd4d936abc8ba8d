use clap::{Args, Parser, Subcommand};
use rust_qr_gen::encoder::mask::{apply_mask, evaluate_masks};
use rust_qr_gen::tools::{module_stats, render_options_from_env, save_png, to_text_art};
use rust_qr_gen::{ECLevel, EncodeOptions, MaskPattern, Mode, QRCode, QrEncoder, Version, render};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and write it as a PNG
    Encode {
        #[command(flatten)]
        payload: PayloadArgs,
        #[arg(long, short)]
        output: PathBuf,
        /// Pixels per module (default: QR_MODULE_SIZE or 10)
        #[arg(long)]
        module_size: Option<usize>,
        /// Quiet zone in modules (default: QR_QUIET_ZONE or 4)
        #[arg(long)]
        quiet_zone: Option<usize>,
    },
    /// Encode a payload and print it to the terminal
    Print {
        #[command(flatten)]
        payload: PayloadArgs,
        /// Quiet zone in modules (default: QR_QUIET_ZONE or 4)
        #[arg(long)]
        quiet_zone: Option<usize>,
    },
    /// Show version, level, mask and per-mask penalties for a payload
    Info {
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

#[derive(Args)]
struct PayloadArgs {
    /// Text to encode
    text: String,
    /// Error correction level (L, M, Q, H)
    #[arg(long, short, default_value = "M")]
    ec_level: ECLevel,
    /// Force a version (1-40)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
    version: Option<u8>,
    /// Force a single segment mode (numeric, alphanumeric, byte)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,
    /// Force a mask pattern (0-7)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    mask: Option<u8>,
    /// Raise the EC level while the symbol size stays the same
    #[arg(long)]
    boost: bool,
}

impl PayloadArgs {
    fn options(&self) -> EncodeOptions {
        let mut options = EncodeOptions::new()
            .with_ec_level(self.ec_level)
            .with_boost_error_correction(self.boost);
        if let Some(version) = self.version.and_then(Version::new) {
            options = options.with_version(version);
        }
        if let Some(mode) = self.mode {
            options = options.with_mode(mode);
        }
        if let Some(mask) = self.mask.and_then(MaskPattern::from_bits) {
            options = options.with_mask(mask);
        }
        options
    }

    fn encode(&self) -> Result<QRCode, String> {
        let start = Instant::now();
        let result = QrEncoder::encode(self.text.as_bytes(), &self.options());
        tracing::debug!(elapsed_us = start.elapsed().as_micros() as u64, "encode finished");
        result.map_err(|err| {
            let kind = if err.is_client_error() { "invalid input" } else { "internal error" };
            format!("{kind}: {err}")
        })
    }
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    match s.to_ascii_lowercase().as_str() {
        "numeric" | "n" => Ok(Mode::Numeric),
        "alphanumeric" | "alnum" | "a" => Ok(Mode::Alphanumeric),
        "byte" | "b" => Ok(Mode::Byte),
        other => Err(format!("unknown mode '{other}'")),
    }
}

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Encode {
            payload,
            output,
            module_size,
            quiet_zone,
        } => encode_cmd(&payload, output, module_size, quiet_zone),
        Command::Print {
            payload,
            quiet_zone,
        } => print_cmd(&payload, quiet_zone),
        Command::Info { payload } => info_cmd(&payload),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(
    payload: &PayloadArgs,
    output: PathBuf,
    module_size: Option<usize>,
    quiet_zone: Option<usize>,
) -> Result<(), String> {
    let qr = payload.encode()?;
    let mut options = render_options_from_env();
    if let Some(size) = module_size.filter(|&s| s > 0) {
        options.module_size = size;
    }
    if let Some(zone) = quiet_zone {
        options.quiet_zone = zone;
    }

    let pixels = render(&qr, &options);
    save_png(&pixels, &output)
        .map_err(|err| format!("Failed to write {}: {}", output.display(), err))?;
    println!(
        "Wrote {} ({}x{} px, version {}, level {}, mask {})",
        output.display(),
        pixels.width(),
        pixels.height(),
        qr.version,
        qr.error_correction,
        qr.mask_pattern.bits()
    );
    Ok(())
}

fn print_cmd(payload: &PayloadArgs, quiet_zone: Option<usize>) -> Result<(), String> {
    let qr = payload.encode()?;
    let zone = quiet_zone.unwrap_or_else(|| render_options_from_env().quiet_zone);
    print!("{}", to_text_art(&qr, zone));
    Ok(())
}

fn info_cmd(payload: &PayloadArgs) -> Result<(), String> {
    let options = payload.options();
    let segments =
        QrEncoder::segment(payload.text.as_bytes(), &options).map_err(|e| e.to_string())?;
    let qr = payload.encode()?;
    let stats = module_stats(&qr.modules);

    println!("Payload: {} bytes", payload.text.len());
    println!("Segments:");
    for (i, seg) in segments.iter().enumerate() {
        println!("  {}: {:?} x{}", i, seg.mode(), seg.char_count());
    }
    println!("Version: {} ({}x{} modules)", qr.version, qr.size(), qr.size());
    println!(
        "Error correction: {} (~{}% recovery)",
        qr.error_correction,
        qr.error_correction.recovery_percent()
    );
    println!("Mask: {}", qr.mask_pattern.bits());
    println!(
        "Dark modules: {}/{} ({:.1}%)",
        stats.dark_modules,
        stats.total_modules,
        stats.dark_ratio * 100.0
    );

    // Re-score every mask on the final symbol's unmasked layout
    let mut base = qr.modules.clone();
    apply_mask(&mut base, qr.mask_pattern, &qr.kinds);
    println!("Mask penalties:");
    for candidate in evaluate_masks(&base, &qr.kinds, qr.error_correction) {
        let s = candidate.score;
        let marker = if candidate.mask == qr.mask_pattern { " *" } else { "" };
        println!(
            "  {}: total={} runs={} blocks={} finder={} balance={}{}",
            candidate.mask.bits(),
            s.total(),
            s.runs,
            s.blocks,
            s.finder_like,
            s.balance,
            marker
        );
    }
    Ok(())
}
