//! Modelo de luminosidade (LDR em divisor de tensão, mapeamento logarítmico)
//!
//! Função pura: nenhum estado além das constantes de calibração, nenhum I/O.
//! A conversão sempre produz um valor em `0..=100`; os extremos da escala do
//! ADC, onde a fórmula não é definida, retornam um resultado marcado como
//! [`ConversionKind::Degenerate`] em vez de propagar `NaN`/`inf`.

use lux_core::events::{ConversionKind, DegenerateEdge};
use lux_core::types::{LuminosityPercentage, RawSample};
use crate::calibration::CalibrationConstants;
use crate::error::PhotonicResult;

/// Resultado marcado de uma conversão
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Porcentagem final, sempre em `0..=100`
    pub percentage: LuminosityPercentage,
    /// Como a porcentagem foi obtida
    pub kind: ConversionKind,
    /// Extremo da escala, quando `kind == Degenerate`
    pub edge: Option<DegenerateEdge>,
    /// Resistência calculada do LDR (ohms), quando definida
    pub resistance_ohms: Option<f64>,
}

impl Conversion {
    /// Conversão caiu num extremo indefinido?
    pub fn is_degenerate(&self) -> bool {
        self.kind == ConversionKind::Degenerate
    }
}

/// Modelo de conversão raw → porcentagem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminosityModel {
    calibration: CalibrationConstants,
    ln_light: f64,
    ln_dark: f64,
}

impl LuminosityModel {
    /// Cria modelo validando as constantes
    pub fn new(calibration: CalibrationConstants) -> PhotonicResult<Self> {
        calibration.validate()?;
        Ok(Self {
            calibration,
            ln_light: calibration.r_light_ohms.ln(),
            ln_dark: calibration.r_dark_ohms.ln(),
        })
    }

    /// Constantes em uso
    pub fn calibration(&self) -> &CalibrationConstants {
        &self.calibration
    }

    /// Resistência do LDR pelo divisor de tensão
    ///
    /// `None` para `raw == 0` (divisão por zero) e `raw >= ADC_max`
    /// (resistência nula ou negativa).
    pub fn sensor_resistance(&self, raw: RawSample) -> Option<f64> {
        let raw = raw.value();
        let max = self.calibration.adc_max;
        if raw == 0 || raw >= max {
            return None;
        }
        Some(self.calibration.r_fixed_ohms * f64::from(max - raw) / f64::from(raw))
    }

    /// Converte uma amostra bruta
    pub fn convert(&self, raw: RawSample) -> Conversion {
        let Some(resistance) = self.sensor_resistance(raw) else {
            // raw == 0: nenhuma corrente no divisor, lido como sensor no escuro.
            // raw >= max: resistência nula, lido como saturação.
            let (edge, percentage) = if raw.value() == 0 {
                (DegenerateEdge::ZeroReading, LuminosityPercentage::DARK)
            } else {
                (DegenerateEdge::FullScale, LuminosityPercentage::BRIGHT)
            };
            return Conversion {
                percentage,
                kind: ConversionKind::Degenerate,
                edge: Some(edge),
                resistance_ohms: None,
            };
        };

        let ln_r = resistance.ln();

        let (percentage, kind) = if ln_r >= self.ln_dark {
            (LuminosityPercentage::DARK, ConversionKind::ClampedDark)
        } else if ln_r <= self.ln_light {
            (LuminosityPercentage::BRIGHT, ConversionKind::ClampedBright)
        } else {
            let pct = 100.0 * (self.ln_dark - ln_r) / (self.ln_dark - self.ln_light);
            // `as i64` trunca em direção a zero
            (LuminosityPercentage::saturating(pct as i64), ConversionKind::Interpolated)
        };

        tracing::trace!(raw = raw.value(), resistance, pct = percentage.value(), ?kind, "converted");

        Conversion {
            percentage,
            kind,
            edge: None,
            resistance_ohms: Some(resistance),
        }
    }

    /// Atalho: apenas a porcentagem
    #[inline]
    pub fn percentage(&self, raw: RawSample) -> LuminosityPercentage {
        self.convert(raw).percentage
    }
}

impl Default for LuminosityModel {
    fn default() -> Self {
        let calibration = CalibrationConstants::KY018;
        Self {
            calibration,
            ln_light: calibration.r_light_ohms.ln(),
            ln_dark: calibration.r_dark_ohms.ln(),
        }
    }
}

/// Forma livre do modelo: valida as constantes e converte uma amostra
pub fn luminosity_percentage(
    raw: RawSample,
    calibration: &CalibrationConstants,
) -> PhotonicResult<LuminosityPercentage> {
    Ok(LuminosityModel::new(*calibration)?.percentage(raw))
}
