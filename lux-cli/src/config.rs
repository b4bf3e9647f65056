//! Agent configuration (lux.toml)
//!
//! Layering, lowest to highest precedence: built-in defaults, the TOML file,
//! `LUX_*` environment variables and command-line flags (the last two are
//! resolved by clap and applied through [`Overrides`]).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use lux_core::types::LuminosityPercentage;
use lux_network::Endpoint;
use lux_orchestration::{AcquisitionPolicy, SchedulerMode, TelemetryConfig};
use lux_photonic::{CalibrationConstants, DEFAULT_ADC_PATH};

/// File looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "lux.toml";

/// Whole agent configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub sensor: SensorSection,
    pub calibration: CalibrationConstants,
    pub endpoint: Endpoint,
    pub telemetry: TelemetrySection,
}

/// `[sensor]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSection {
    /// sysfs register holding the raw ADC code
    pub source: PathBuf,
    /// Use the synthetic sweep instead of the register
    pub simulate: bool,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_ADC_PATH),
            simulate: false,
        }
    }
}

/// `[telemetry]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    pub period_ms: u64,
    pub mode: SchedulerMode,
    pub policy: PolicyKind,
    /// Value sent under `policy = "sentinel"`
    pub sentinel: Option<u8>,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            mode: SchedulerMode::FixedDelay,
            policy: PolicyKind::Skip,
            sentinel: None,
        }
    }
}

/// Acquisition failure policy as written in TOML or on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    Skip,
    LastKnown,
    Sentinel,
}

/// Values coming from flags or `LUX_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub simulate: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub period_ms: Option<u64>,
    pub policy: Option<PolicyKind>,
    pub sentinel: Option<u8>,
}

impl AgentConfig {
    /// Parses a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse lux.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Explicit path must exist; otherwise `lux.toml` is used when present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    tracing::debug!(path = %fallback.display(), "using config from working directory");
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(source) = &overrides.source {
            self.sensor.source = source.clone();
        }
        if overrides.simulate {
            self.sensor.simulate = true;
        }
        if let Some(host) = &overrides.host {
            self.endpoint.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.endpoint.port = port;
        }
        if let Some(period_ms) = overrides.period_ms {
            self.telemetry.period_ms = period_ms;
        }
        if let Some(policy) = overrides.policy {
            self.telemetry.policy = policy;
        }
        if let Some(sentinel) = overrides.sentinel {
            self.telemetry.sentinel = Some(sentinel);
        }
    }

    pub fn acquisition_policy(&self) -> Result<AcquisitionPolicy> {
        Ok(match self.telemetry.policy {
            PolicyKind::Skip => AcquisitionPolicy::Skip,
            PolicyKind::LastKnown => AcquisitionPolicy::LastKnown,
            PolicyKind::Sentinel => {
                let Some(value) = self.telemetry.sentinel else {
                    bail!("policy 'sentinel' requires a sentinel value (0-100)");
                };
                let Some(value) = LuminosityPercentage::new(value) else {
                    bail!("sentinel value {value} is outside 0-100");
                };
                AcquisitionPolicy::Sentinel(value)
            }
        })
    }

    /// Loop configuration, validated
    pub fn telemetry_config(&self, max_cycles: Option<u64>) -> Result<TelemetryConfig> {
        let config = TelemetryConfig {
            period: Duration::from_millis(self.telemetry.period_ms),
            mode: self.telemetry.mode,
            policy: self.acquisition_policy()?,
            max_cycles,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that can be checked without touching the network
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate().context("invalid [calibration]")?;
        self.telemetry_config(None).context("invalid [telemetry]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AgentConfig::from_toml("").unwrap();
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.sensor.source, PathBuf::from(DEFAULT_ADC_PATH));
        assert_eq!(config.endpoint, Endpoint::new("192.168.42.10", 8080));
        assert_eq!(config.calibration, CalibrationConstants::KY018);
        assert_eq!(config.telemetry.period_ms, 1000);
        config.validate().unwrap();
    }

    #[test]
    fn test_full_file() {
        let toml = r#"
            [sensor]
            source = "/tmp/in_voltage0_raw"

            [calibration]
            adc_max = 1023

            [endpoint]
            host = "127.0.0.1"
            port = 9000

            [telemetry]
            period_ms = 250
            mode = "fixed_rate"
            policy = "sentinel"
            sentinel = 0
        "#;

        let config = AgentConfig::from_toml(toml).unwrap();
        assert_eq!(config.sensor.source, PathBuf::from("/tmp/in_voltage0_raw"));
        assert_eq!(config.calibration.adc_max, 1023);
        assert_eq!(config.calibration.r_dark_ohms, CalibrationConstants::KY018.r_dark_ohms);
        assert_eq!(config.endpoint.to_string(), "127.0.0.1:9000");

        let telemetry = config.telemetry_config(Some(3)).unwrap();
        assert_eq!(telemetry.period, Duration::from_millis(250));
        assert_eq!(telemetry.mode, SchedulerMode::FixedRate);
        assert_eq!(telemetry.policy, AcquisitionPolicy::Sentinel(LuminosityPercentage::DARK));
        assert_eq!(telemetry.max_cycles, Some(3));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = AgentConfig::from_toml("[endpoint]\nhost = \"10.0.0.2\"\nport = 7000\n").unwrap();
        config.apply(&Overrides {
            port: Some(8081),
            period_ms: Some(50),
            policy: Some(PolicyKind::LastKnown),
            simulate: true,
            ..Overrides::default()
        });

        assert_eq!(config.endpoint, Endpoint::new("10.0.0.2", 8081));
        assert_eq!(config.telemetry.period_ms, 50);
        assert!(config.sensor.simulate);
        assert_eq!(config.acquisition_policy().unwrap(), AcquisitionPolicy::LastKnown);
    }

    #[test]
    fn test_sentinel_requires_value() {
        let mut config = AgentConfig::default();
        config.telemetry.policy = PolicyKind::Sentinel;
        assert!(config.acquisition_policy().is_err());

        config.telemetry.sentinel = Some(101);
        assert!(config.acquisition_policy().is_err());

        config.telemetry.sentinel = Some(100);
        assert_eq!(
            config.acquisition_policy().unwrap(),
            AcquisitionPolicy::Sentinel(LuminosityPercentage::BRIGHT)
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = AgentConfig::from_toml("[telemetry]\nperiod_ms = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AgentConfig::from_toml(
            "[calibration]\nr_light_ohms = 5000000.0\nr_dark_ohms = 146000.0\n",
        )
        .unwrap();
        assert!(config.validate().is_err());

        assert!(AgentConfig::from_toml("[telemetry]\npolicy = \"retry\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lux.toml");
        fs::write(&path, "[telemetry]\npolicy = \"last-known\"\n").unwrap();

        let config = AgentConfig::load(Some(&path)).unwrap();
        assert_eq!(config.telemetry.policy, PolicyKind::LastKnown);

        assert!(AgentConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
