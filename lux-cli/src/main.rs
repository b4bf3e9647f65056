//! Lux - luminosity telemetry agent
//! Command-line interface for sampling, streaming and monitoring LDR readings

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use lux_core::prelude::*;
use lux_network::{
    Collector, CsvLog, Endpoint, History, NetworkError, UdpTransmitter, DEFAULT_HISTORY, DEFAULT_SENSOR_ID,
    DEFAULT_WRITE_TIMEOUT,
};
use lux_orchestration::{
    shutdown_channel, EventBus, LoopStats, ShutdownHandle, ShutdownSignal, TelemetryConfig, TelemetryLoop,
};
use lux_photonic::{CalibrationConstants, LuminosityModel, SimulatedAdc, SysfsAdc, DEFAULT_ADC_PATH};

use config::{AgentConfig, Overrides, PolicyKind};

const SIMULATED_STEP: u32 = 64;
const MONITOR_POLL: Duration = Duration::from_millis(500);

/// Used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "lux=info,lux_photonic=info,lux_network=warn,lux_orchestration=info";

#[derive(Parser)]
#[command(name = "lux")]
#[command(author = "Silvano Neto")]
#[command(version)]
#[command(about = "Lux - LDR luminosity telemetry over UDP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the sensor and stream percentages to the collector
    Run(RunArgs),

    /// Receive readings and print them
    Monitor(MonitorArgs),

    /// Convert one raw ADC code to a luminosity percentage
    Convert {
        /// Raw ADC code
        #[arg(value_name = "RAW")]
        raw: u32,

        /// Config file (defaults to ./lux.toml when present)
        #[arg(short, long, value_name = "FILE", env = "LUX_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show calibration defaults and version
    Info,
}

#[derive(Args)]
struct RunArgs {
    /// Config file (defaults to ./lux.toml when present)
    #[arg(short, long, value_name = "FILE", env = "LUX_CONFIG")]
    config: Option<PathBuf>,

    /// sysfs register with the raw ADC code
    #[arg(short, long, value_name = "PATH", env = "LUX_SOURCE")]
    source: Option<PathBuf>,

    /// Collector host
    #[arg(short = 'H', long, env = "LUX_HOST")]
    host: Option<String>,

    /// Collector port
    #[arg(short, long, env = "LUX_PORT")]
    port: Option<u16>,

    /// Sampling period in milliseconds
    #[arg(long, value_name = "MS", env = "LUX_PERIOD_MS")]
    period_ms: Option<u64>,

    /// What to send when a sample cannot be read
    #[arg(long, value_enum, env = "LUX_POLICY")]
    policy: Option<PolicyKind>,

    /// Value sent under --policy sentinel
    #[arg(long, value_name = "PERCENT", env = "LUX_SENTINEL")]
    sentinel: Option<u8>,

    /// Use a synthetic sweep instead of the sysfs register
    #[arg(long, default_value_t = false, env = "LUX_SIMULATE")]
    simulate: bool,

    /// Stop after N cycles
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,
}

#[derive(Args)]
struct MonitorArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "LUX_BIND")]
    bind: SocketAddr,

    /// Append readings to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Readings kept for the running average
    #[arg(long, default_value_t = DEFAULT_HISTORY)]
    history: usize,

    /// Sensor id attached to readings
    #[arg(long, default_value = DEFAULT_SENSOR_ID)]
    id: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Monitor(args) => monitor_command(args),
        Commands::Convert { raw, config } => convert_command(raw, config),
        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// SIGINT/SIGTERM trigger the returned handle's shutdown
fn install_signal_handler(handle: ShutdownHandle) -> Result<()> {
    ctrlc::set_handler(move || {
        tracing::info!("signal received, shutting down");
        handle.trigger();
    })
    .context("cannot install signal handler")
}

// ============================================================================
// run
// ============================================================================

fn run_command(args: RunArgs) -> Result<()> {
    let mut config = AgentConfig::load(args.config.as_deref())?;
    config.apply(&Overrides {
        source: args.source,
        simulate: args.simulate,
        host: args.host,
        port: args.port,
        period_ms: args.period_ms,
        policy: args.policy,
        sentinel: args.sentinel,
    });
    config.validate()?;

    let telemetry = config.telemetry_config(args.cycles)?;
    let model = LuminosityModel::new(config.calibration).context("invalid calibration")?;
    let destination = config
        .endpoint
        .resolve()
        .with_context(|| format!("cannot resolve collector {}", config.endpoint))?;
    let transmitter = UdpTransmitter::new(destination, DEFAULT_WRITE_TIMEOUT)
        .with_context(|| format!("cannot open UDP socket towards {destination}"))?;

    let (handle, signal) = shutdown_channel();
    install_signal_handler(handle)?;

    println!(
        "{} {} every {:?} -> {}",
        "Streaming".green().bold(),
        if config.sensor.simulate {
            "simulated ADC".to_string()
        } else {
            config.sensor.source.display().to_string()
        },
        telemetry.period,
        destination.to_string().cyan()
    );

    let stats = if config.sensor.simulate {
        let sensor = SimulatedAdc::new(config.calibration.adc_max, SIMULATED_STEP);
        drive(sensor, model, transmitter, telemetry, &signal)?
    } else {
        let sensor = SysfsAdc::new(&config.sensor.source, config.calibration.adc_max);
        if !sensor.is_ready() {
            tracing::warn!(path = %config.sensor.source.display(), "ADC register not found, cycles will fail until it appears");
        }
        drive(sensor, model, transmitter, telemetry, &signal)?
    };

    print_stats(&stats);
    Ok(())
}

fn drive<S>(
    sensor: S,
    model: LuminosityModel,
    transmitter: UdpTransmitter,
    telemetry: TelemetryConfig,
    signal: &ShutdownSignal,
) -> Result<LoopStats>
where
    S: Sensor<RawData = RawSample>,
{
    let mut agent = TelemetryLoop::new(sensor, model, transmitter, telemetry, EventBus::new())?;
    Ok(agent.run(signal))
}

fn print_stats(stats: &LoopStats) {
    println!();
    println!("{}", "Summary".bold());
    println!("  cycles:                {}", stats.cycles);
    println!("  transmitted:           {}", stats.transmitted.to_string().green());
    println!("  acquisition failures:  {}", colour_count(stats.acquisition_failures));
    println!("  transmission failures: {}", colour_count(stats.transmission_failures));
    println!("  degenerate samples:    {}", colour_count(stats.degenerate));
    println!("  skipped:               {}", stats.skipped);
}

fn colour_count(n: u64) -> ColoredString {
    if n == 0 {
        n.to_string().normal()
    } else {
        n.to_string().yellow()
    }
}

// ============================================================================
// monitor
// ============================================================================

fn monitor_command(args: MonitorArgs) -> Result<()> {
    let mut collector = Collector::bind(args.bind, MONITOR_POLL)
        .with_context(|| format!("cannot bind collector on {}", args.bind))?
        .with_sensor_id(args.id);
    let mut history = History::new(args.history.max(1));
    let csv = args.csv.map(CsvLog::new);

    let (handle, signal) = shutdown_channel();
    install_signal_handler(handle)?;

    println!(
        "{} on {}",
        "Listening".green().bold(),
        collector.local_addr()?.to_string().cyan()
    );

    while !signal.is_triggered() {
        let reading = match collector.recv_reading() {
            Ok(Some(reading)) => reading,
            Ok(None) => continue,
            Err(NetworkError::Malformed(detail)) => {
                println!("{}", rejection_line(&detail));
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "receive failed");
                continue;
            }
        };

        if let Some(csv) = &csv {
            if let Err(e) = csv.append(&reading) {
                tracing::warn!(path = %csv.path().display(), error = %e, "cannot append to CSV");
            }
        }

        history.push(reading.clone());
        let average = history.average().unwrap_or_default();

        println!(
            "{} {:>3}%  {} {:.1}%  {}",
            reading.peer.to_string().dimmed(),
            colour_percentage(reading.value),
            "avg".dimmed(),
            average,
            reading.to_json()?
        );
    }

    println!(
        "{} {} readings, {} rejected",
        "Stopped".bold(),
        collector.received(),
        collector.rejected()
    );
    Ok(())
}

/// Printed for datagrams that are not a valid percentage
fn rejection_line(detail: &str) -> String {
    format!("{} datagram is not a valid number ({detail})", "rejected:".yellow().bold())
}

fn colour_percentage(value: LuminosityPercentage) -> ColoredString {
    let text = value.to_string();
    match value.value() {
        70..=100 => text.yellow().bold(),
        30..=69 => text.normal(),
        _ => text.blue(),
    }
}

// ============================================================================
// convert / info
// ============================================================================

fn convert_command(raw: u32, config: Option<PathBuf>) -> Result<()> {
    let config = AgentConfig::load(config.as_deref())?;
    let model = LuminosityModel::new(config.calibration).context("invalid calibration")?;
    let conversion = model.convert(RawSample(raw));

    println!("{:<12} {}", "raw:".bold(), raw);
    match conversion.resistance_ohms {
        Some(ohms) => println!("{:<12} {:.0} Ω", "resistance:".bold(), ohms),
        None => println!("{:<12} {}", "resistance:".bold(), "undefined".yellow()),
    }
    match conversion.edge {
        Some(edge) => println!("{:<12} {:?} ({:?})", "kind:".bold(), conversion.kind, edge),
        None => println!("{:<12} {:?}", "kind:".bold(), conversion.kind),
    }
    println!("{:<12} {}%", "luminosity:".bold(), colour_percentage(conversion.percentage));

    Ok(())
}

fn print_info() {
    let ky018 = CalibrationConstants::KY018;

    println!("{}", "Lux - LDR luminosity telemetry".bold());
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", "Calibration (KY-018):".bold());
    println!("  R light:  {:.0} Ω", ky018.r_light_ohms);
    println!("  R dark:   {:.0} Ω", ky018.r_dark_ohms);
    println!("  ADC max:  {}", ky018.adc_max);
    println!("  R fixed:  {:.0} Ω", ky018.r_fixed_ohms);
    println!();
    println!("{}", "Defaults:".bold());
    println!("  source:    {}", DEFAULT_ADC_PATH);
    println!("  collector: {}", Endpoint::default());
    println!("  period:    1000 ms");
    println!("  config:    {}", config::DEFAULT_CONFIG_FILE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());

        let directives: Vec<&str> = DEFAULT_LOG_FILTER.split(',').collect();
        assert!(directives.contains(&"lux_network=warn"));
        assert!(directives.contains(&"lux_orchestration=info"));
    }

    #[test]
    fn test_rejection_line_names_content() {
        colored::control::set_override(false);
        let line = rejection_line("not a percentage: \"ola\"");
        assert_eq!(line, "rejected: datagram is not a valid number (not a percentage: \"ola\")");
    }
}
