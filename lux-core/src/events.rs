//! Eventos tipados do ciclo de telemetria
//!
//! Falhas de aquisição e transmissão são reportadas como eventos e não como
//! texto livre, para que testes e coletores de observabilidade possam consumi-las.

use serde::{Deserialize, Serialize};
use crate::types::{LuminosityPercentage, RawSample};

/// Como a porcentagem de um ciclo foi obtida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// Interpolação linear no espaço logarítmico
    Interpolated,
    /// Resistência na referência de escuro ou acima dela
    ClampedDark,
    /// Resistência na referência de claro ou abaixo dela
    ClampedBright,
    /// Valor intermediário não finito, substituído por padrão defensivo
    Degenerate,
}

/// Extremo da escala que tornou a conversão indefinida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateEdge {
    /// `raw == 0`: divisão por zero no divisor de tensão
    ZeroReading,
    /// `raw >= ADC_max`: resistência nula, `ln(0)` indefinido
    FullScale,
}

/// Categoria do evento (usada por filtros)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Ready,
    Sampled,
    AcquisitionFailed,
    ComputationDegenerate,
    Transmitted,
    TransmissionFailed,
    CycleSkipped,
    Shutdown,
}

/// Evento emitido pelo loop de telemetria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LuxEvent {
    /// Componente pronto
    Ready {
        component: String,
        version: String,
    },
    /// Amostra lida e convertida
    Sampled {
        cycle: u64,
        raw: RawSample,
        percentage: LuminosityPercentage,
        conversion: ConversionKind,
    },
    /// Fonte de aquisição falhou neste ciclo
    AcquisitionFailed {
        cycle: u64,
        source: String,
        message: String,
    },
    /// Amostra nos extremos da escala; valor defensivo substituído
    ComputationDegenerate {
        cycle: u64,
        raw: RawSample,
        edge: DegenerateEdge,
        substituted: LuminosityPercentage,
    },
    /// Datagrama entregue ao canal local
    Transmitted {
        cycle: u64,
        percentage: LuminosityPercentage,
        bytes: usize,
    },
    /// Falha local de envio
    TransmissionFailed {
        cycle: u64,
        message: String,
    },
    /// Ciclo encerrado sem envio
    CycleSkipped {
        cycle: u64,
        reason: String,
    },
    /// Loop encerrado
    Shutdown {
        component: String,
        cycles: u64,
    },
}

impl LuxEvent {
    /// Categoria do evento
    pub fn kind(&self) -> EventKind {
        match self {
            LuxEvent::Ready { .. } => EventKind::Ready,
            LuxEvent::Sampled { .. } => EventKind::Sampled,
            LuxEvent::AcquisitionFailed { .. } => EventKind::AcquisitionFailed,
            LuxEvent::ComputationDegenerate { .. } => EventKind::ComputationDegenerate,
            LuxEvent::Transmitted { .. } => EventKind::Transmitted,
            LuxEvent::TransmissionFailed { .. } => EventKind::TransmissionFailed,
            LuxEvent::CycleSkipped { .. } => EventKind::CycleSkipped,
            LuxEvent::Shutdown { .. } => EventKind::Shutdown,
        }
    }

    /// Ciclo ao qual o evento pertence, se houver
    pub fn cycle(&self) -> Option<u64> {
        match self {
            LuxEvent::Sampled { cycle, .. }
            | LuxEvent::AcquisitionFailed { cycle, .. }
            | LuxEvent::ComputationDegenerate { cycle, .. }
            | LuxEvent::Transmitted { cycle, .. }
            | LuxEvent::TransmissionFailed { cycle, .. }
            | LuxEvent::CycleSkipped { cycle, .. } => Some(*cycle),
            LuxEvent::Ready { .. } | LuxEvent::Shutdown { .. } => None,
        }
    }

    /// Evento representa uma falha contida no ciclo?
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LuxEvent::AcquisitionFailed { .. }
                | LuxEvent::ComputationDegenerate { .. }
                | LuxEvent::TransmissionFailed { .. }
        )
    }
}
