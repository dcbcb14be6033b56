use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;

use enless_codec_core::{
    DownlinkInput, HexFileSource, UplinkInput, decode_source, decode_uplink_at, encode_downlink,
    now_timestamp_ms, parse_frame, parse_hex_frame, schema,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("ENLESS_BUILD_COMMIT"),
    ", ",
    env!("ENLESS_BUILD_DATE"),
    ")"
);

const SCHEMA_HINT: &str = "compare the frame length with `enless-codec schema --sensor-type <N>`";

const EXAMPLES: &str = "Examples:\n  enless-codec decode --hex 0a0b0c0d00002710\n  enless-codec decode --input uplink.json -o decoded.json\n  enless-codec decode --frames uplinks.txt --pretty --strict\n  enless-codec schema --sensor-type 12";

#[derive(Parser, Debug)]
#[command(name = "enless-codec")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for Enless multi-sensor transmitter frames.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode uplink frames into the platform JSON document.
    #[command(group(
        ArgGroup::new("frames_in")
            .required(true)
            .args(["hex", "input", "frames"])
    ))]
    #[command(after_help = EXAMPLES)]
    Decode {
        /// Single frame as hex digits
        #[arg(long)]
        hex: Option<String>,

        /// Uplink request document (JSON with bytes, fPort, variables)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Text file with one hex frame per line (batch mode)
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Uplink fPort to record with the request
        #[arg(long)]
        f_port: Option<u8>,

        /// Timestamp key in unix milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,

        /// Exit with a non-zero code if any reading is tagged or any frame rejected
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show header fields and per-field raw values of one frame.
    Inspect {
        /// Frame as hex digits
        #[arg(long)]
        hex: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Encode a downlink command (placeholder: always a single zero byte).
    Encode {
        /// Downlink request document (JSON with data, variables)
        #[arg(long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the schema table (streams, offsets, encodings, validity ranges).
    Schema {
        /// Only show this sensor-type code
        #[arg(long)]
        sensor_type: Option<u8>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path (JSON); stdout when omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            hex,
            input,
            frames,
            f_port,
            timestamp,
            strict,
            output,
        } => cmd_decode(hex, input, frames, f_port, timestamp, strict, &output),
        Commands::Inspect { hex, output } => cmd_inspect(&hex, &output),
        Commands::Encode { input, output } => cmd_encode(input, &output),
        Commands::Schema {
            sensor_type,
            output,
        } => cmd_schema(sensor_type, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(
    hex: Option<String>,
    input: Option<PathBuf>,
    frames: Option<PathBuf>,
    f_port: Option<u8>,
    timestamp: Option<i64>,
    strict: bool,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let timestamp_ms = timestamp.unwrap_or_else(now_timestamp_ms);

    if let Some(path) = frames {
        validate_input_file(&path)?;
        let source = HexFileSource::open(&path)
            .with_context(|| format!("Failed to open frames file: {}", path.display()))?;
        let report = decode_source(source, timestamp_ms).map_err(|err| {
            CliError::new(
                format!("batch decoding failed: {}", err),
                Some("expect one hex frame per line; '#' starts a comment".to_string()),
            )
        })?;
        info!("decoded {} frames from {}", report.entries.len(), path.display());
        write_json(&report, output)?;
        return check_strict(strict, report.has_errors());
    }

    let mut request = match (hex, input) {
        (Some(hex), _) => UplinkInput {
            bytes: Some(decode_hex_arg(&hex)?),
            ..UplinkInput::default()
        },
        (None, Some(path)) => read_json_input(&path, "uplink")?,
        (None, None) => {
            return Err(CliError::new(
                "missing frame input",
                Some("use --hex, --input or --frames".to_string()),
            ));
        }
    };
    if f_port.is_some() {
        request.f_port = f_port;
    }

    let decoded = decode_uplink_at(&request, timestamp_ms).map_err(|err| {
        CliError::new(
            format!("decoding failed: {}", err),
            Some(SCHEMA_HINT.to_string()),
        )
    })?;
    write_json(&decoded, output)?;
    check_strict(strict, decoded.has_errors())
}

fn cmd_inspect(hex: &str, output: &OutputArgs) -> Result<(), CliError> {
    let bytes = decode_hex_arg(hex)?;
    let frame = parse_frame(&bytes)
        .map_err(|err| {
            CliError::new(
                format!("decoding failed: {}", err),
                Some(SCHEMA_HINT.to_string()),
            )
        })?
        .ok_or_else(|| {
            CliError::new(
                "empty frame",
                Some("pass at least the 6-byte header".to_string()),
            )
        })?;
    write_json(&frame, output)
}

fn cmd_encode(input: Option<PathBuf>, output: &OutputArgs) -> Result<(), CliError> {
    let request = match input {
        Some(path) => read_json_input(&path, "downlink")?,
        None => DownlinkInput::default(),
    };
    let encoded = encode_downlink(&request);
    if !output.quiet {
        eprintln!("note: downlink encoding is a placeholder; payload is always [0]");
    }
    write_json(&encoded, output)
}

fn cmd_schema(sensor_type: Option<u8>, output: &OutputArgs) -> Result<(), CliError> {
    match sensor_type {
        Some(code) => write_json(&schema::describe(code), output),
        None => write_json(&schema::describe_all(), output),
    }
}

fn decode_hex_arg(hex: &str) -> Result<Vec<u8>, CliError> {
    parse_hex_frame(hex).map_err(|err| {
        CliError::new(
            format!("invalid hex frame '{}': {}", hex, err),
            Some("expected an even number of hex digits, e.g. 0a0b0c0d00002710".to_string()),
        )
    })
}

fn read_json_input<T: serde::de::DeserializeOwned>(
    path: &Path,
    kind: &str,
) -> Result<T, CliError> {
    validate_input_file(path)?;
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid {} request '{}': {}", kind, path.display(), err),
            Some(format!("expected a JSON {} document", kind)),
        )
    })
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("check the path".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a regular file".to_string()),
        ));
    }
    Ok(())
}

fn check_strict(strict: bool, has_errors: bool) -> Result<(), CliError> {
    if strict && has_errors {
        return Err(CliError::new(
            "sensor errors detected",
            Some("inspect the \"e\" members or rejected entries of the output".to_string()),
        ));
    }
    Ok(())
}

fn serialize_json<T: Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn write_json<T: Serialize>(value: &T, output: &OutputArgs) -> Result<(), CliError> {
    let json = serialize_json(value, output.pretty, output.compact)?;

    let Some(path) = output.output.as_ref() else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    debug!("wrote {}", path.display());

    if !output.quiet {
        eprintln!("OK: output written -> {}", path.display());
    }
    Ok(())
}
