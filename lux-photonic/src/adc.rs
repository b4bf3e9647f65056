//! Fontes de amostras do ADC
//!
//! - [`SysfsAdc`]: registrador virtual exportado pelo driver IIO do Linux
//! - [`SimulatedAdc`]: varredura determinística para hosts sem o driver

use std::fs;
use std::path::{Path, PathBuf};
use lux_core::traits::{LuxComponent, Sensor, SensorError};
use lux_core::types::RawSample;
use crate::error::{PhotonicError, PhotonicResult};

/// Canal 13 do primeiro dispositivo IIO da placa de referência
pub const DEFAULT_ADC_PATH: &str = "/sys/bus/iio/devices/iio:device0/in_voltage13_raw";

/// ADC lido de um arquivo sysfs (um inteiro em texto por leitura)
#[derive(Debug, Clone)]
pub struct SysfsAdc {
    path: PathBuf,
    source: String,
    adc_max: u32,
    last_raw: Option<RawSample>,
}

impl SysfsAdc {
    /// Cria fonte para o caminho dado
    ///
    /// O arquivo não precisa existir agora: o driver pode aparecer depois, e
    /// cada leitura abre o arquivo de novo.
    pub fn new(path: impl Into<PathBuf>, adc_max: u32) -> Self {
        let path = path.into();
        Self {
            source: path.display().to_string(),
            path,
            adc_max,
            last_raw: None,
        }
    }

    /// Caminho do registrador
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Última leitura válida (diagnóstico)
    pub fn last_raw(&self) -> Option<RawSample> {
        self.last_raw
    }

    /// Lê e valida uma amostra
    pub fn read_raw(&mut self) -> PhotonicResult<RawSample> {
        let content = fs::read_to_string(&self.path).map_err(|e| PhotonicError::SourceUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let raw = parse_register(&self.path, &content, self.adc_max)?;
        self.last_raw = Some(raw);
        Ok(raw)
    }
}

/// Interpreta o conteúdo textual de um registrador
fn parse_register(path: &Path, content: &str, adc_max: u32) -> PhotonicResult<RawSample> {
    let trimmed = content.trim();
    let value: i64 = trimmed.parse().map_err(|_| PhotonicError::Malformed {
        path: path.to_path_buf(),
        content: trimmed.to_string(),
    })?;

    if value < 0 || value > i64::from(adc_max) {
        return Err(PhotonicError::OutOfRange { value, max: adc_max });
    }

    Ok(RawSample(value as u32))
}

impl LuxComponent for SysfsAdc {
    fn name(&self) -> &str {
        "SysfsAdc"
    }

    fn is_ready(&self) -> bool {
        self.path.exists()
    }
}

impl Sensor for SysfsAdc {
    type RawData = RawSample;

    fn read(&mut self) -> Result<RawSample, SensorError> {
        Ok(self.read_raw()?)
    }

    fn source(&self) -> &str {
        &self.source
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADC SIMULADO
// ═══════════════════════════════════════════════════════════════════════════════

/// Varredura triangular sobre toda a escala do ADC
#[derive(Debug, Clone)]
pub struct SimulatedAdc {
    adc_max: u32,
    step: u32,
    position: u32,
    rising: bool,
}

impl SimulatedAdc {
    /// Começa no meio da escala, subindo `step` códigos por leitura
    pub fn new(adc_max: u32, step: u32) -> Self {
        Self {
            adc_max,
            step: step.max(1),
            position: adc_max / 2,
            rising: true,
        }
    }

    fn advance(&mut self) -> RawSample {
        let current = self.position;

        if self.rising {
            match self.position.checked_add(self.step) {
                Some(next) if next < self.adc_max => self.position = next,
                _ => {
                    self.position = self.adc_max;
                    self.rising = false;
                }
            }
        } else if self.position > self.step {
            self.position -= self.step;
        } else {
            self.position = 0;
            self.rising = true;
        }

        RawSample(current)
    }
}

impl Default for SimulatedAdc {
    fn default() -> Self {
        Self::new(4095, 64)
    }
}

impl LuxComponent for SimulatedAdc {
    fn name(&self) -> &str {
        "SimulatedAdc"
    }
}

impl Sensor for SimulatedAdc {
    type RawData = RawSample;

    fn read(&mut self) -> Result<RawSample, SensorError> {
        Ok(self.advance())
    }

    fn source(&self) -> &str {
        "simulated"
    }
}
