//! Tipos de dados do ciclo de amostragem

use serde::{Deserialize, Serialize};
use std::fmt;

/// Código bruto do conversor analógico-digital
///
/// Produzido uma vez por ciclo pela fonte de aquisição; não sobrevive ao ciclo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSample(pub u32);

impl RawSample {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for RawSample {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Luminosidade estimada em porcentagem (0 = escuro, 100 = claro)
///
/// Invariante: o valor interno está sempre em `0..=100`. O `Display` é a
/// representação decimal pura, que é exatamente o payload enviado na rede.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LuminosityPercentage(u8);

impl LuminosityPercentage {
    /// Escuridão total (ou além da referência de escuro)
    pub const DARK: Self = Self(0);
    /// Claridade total (ou além da referência de claro)
    pub const BRIGHT: Self = Self(100);

    /// Cria porcentagem, `None` se maior que 100
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 100 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Cria porcentagem limitando a `0..=100`
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LuminosityPercentage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("luminosity percentage out of range: {value}"))
    }
}

impl From<LuminosityPercentage> for u8 {
    fn from(pct: LuminosityPercentage) -> Self {
        pct.0
    }
}

impl fmt::Display for LuminosityPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
