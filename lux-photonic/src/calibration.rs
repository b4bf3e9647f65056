//! Constantes de calibração do LDR
//!
//! Fixas durante toda a vida do processo; não há recalibração em tempo de execução.

use serde::{Deserialize, Serialize};
use crate::error::{PhotonicError, PhotonicResult};

/// Constantes do divisor de tensão e referências de claro/escuro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConstants {
    /// Resistência do LDR sob iluminação de referência (ohms)
    pub r_light_ohms: f64,
    /// Resistência do LDR no escuro (ohms)
    pub r_dark_ohms: f64,
    /// Código máximo do ADC (4095 para 12 bits)
    pub adc_max: u32,
    /// Resistor fixo do divisor (ohms)
    pub r_fixed_ohms: f64,
}

impl CalibrationConstants {
    /// Módulo KY-018 com ADC de 12 bits e resistor fixo de 10 kΩ
    pub const KY018: Self = Self {
        r_light_ohms: 146e3,
        r_dark_ohms: 5e6,
        adc_max: 4095,
        r_fixed_ohms: 10_000.0,
    };

    /// Valida as constantes
    ///
    /// `r_light < r_dark` é necessário para o mapeamento ser monotônico.
    pub fn validate(&self) -> PhotonicResult<()> {
        for (name, value) in [
            ("r_light_ohms", self.r_light_ohms),
            ("r_dark_ohms", self.r_dark_ohms),
            ("r_fixed_ohms", self.r_fixed_ohms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhotonicError::InvalidConfig(format!(
                    "{name} must be a positive finite resistance, got {value}"
                )));
            }
        }

        if self.r_light_ohms >= self.r_dark_ohms {
            return Err(PhotonicError::InvalidConfig(format!(
                "r_light_ohms ({}) must be lower than r_dark_ohms ({})",
                self.r_light_ohms, self.r_dark_ohms
            )));
        }

        if self.adc_max < 2 {
            return Err(PhotonicError::InvalidConfig(format!(
                "adc_max must be at least 2, got {}",
                self.adc_max
            )));
        }

        Ok(())
    }

    /// Cria constantes para um ADC de `bits` de resolução, mantendo o resto do KY-018
    pub fn with_resolution_bits(bits: u8) -> PhotonicResult<Self> {
        if !(2..=31).contains(&bits) {
            return Err(PhotonicError::InvalidConfig(format!(
                "ADC resolution must be 2..=31 bits, got {bits}"
            )));
        }
        Ok(Self {
            adc_max: (1u32 << bits) - 1,
            ..Self::KY018
        })
    }
}

impl Default for CalibrationConstants {
    fn default() -> Self {
        Self::KY018
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ky018_is_valid() {
        assert!(CalibrationConstants::KY018.validate().is_ok());
        assert_eq!(CalibrationConstants::default(), CalibrationConstants::KY018);
    }

    #[test]
    fn test_light_must_be_below_dark() {
        let cal = CalibrationConstants {
            r_light_ohms: 5e6,
            r_dark_ohms: 146e3,
            ..CalibrationConstants::KY018
        };
        assert!(matches!(cal.validate(), Err(PhotonicError::InvalidConfig(_))));

        let equal = CalibrationConstants {
            r_light_ohms: 1e5,
            r_dark_ohms: 1e5,
            ..CalibrationConstants::KY018
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_resistance() {
        let cal = CalibrationConstants {
            r_fixed_ohms: 0.0,
            ..CalibrationConstants::KY018
        };
        assert!(cal.validate().is_err());

        let cal = CalibrationConstants {
            r_light_ohms: f64::NAN,
            ..CalibrationConstants::KY018
        };
        assert!(cal.validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_adc() {
        let cal = CalibrationConstants {
            adc_max: 1,
            ..CalibrationConstants::KY018
        };
        assert!(cal.validate().is_err());
    }

    #[test]
    fn test_resolution_bits() {
        let cal = CalibrationConstants::with_resolution_bits(10).unwrap();
        assert_eq!(cal.adc_max, 1023);
        assert_eq!(cal.r_dark_ohms, 5e6);

        assert!(CalibrationConstants::with_resolution_bits(1).is_err());
    }
}
