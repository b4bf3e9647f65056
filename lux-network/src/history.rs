//! Histórico limitado e log CSV de leituras recebidas

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};
use crate::collector::Reading;
use crate::NetworkResult;

/// Pontos mantidos por padrão (um minuto a 1 Hz)
pub const DEFAULT_HISTORY: usize = 60;

/// Janela deslizante das últimas leituras
#[derive(Debug, Clone)]
pub struct History {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adiciona leitura, descartando a mais antiga se cheio
    pub fn push(&mut self, reading: Reading) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    /// Valores em ordem de chegada
    pub fn values(&self) -> Vec<u8> {
        self.readings.iter().map(|r| r.value.value()).collect()
    }

    /// Média dos valores na janela
    pub fn average(&self) -> Option<f64> {
        if self.readings.is_empty() {
            return None;
        }
        let sum: u64 = self.readings.iter().map(|r| u64::from(r.value.value())).sum();
        Some(sum as f64 / self.readings.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

/// Log CSV append-only (`timestamp,luminosidade_percent`)
///
/// O instante é gravado no fuso local, no formato [`CsvLog::TIMESTAMP_FORMAT`].
#[derive(Debug, Clone)]
pub struct CsvLog {
    path: PathBuf,
}

impl CsvLog {
    pub const HEADER: &'static str = "timestamp,luminosidade_percent";
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acrescenta uma linha; cabeçalho só se o arquivo estiver vazio
    pub fn append(&self, reading: &Reading) -> NetworkResult<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", Self::HEADER)?;
        }
        writeln!(file, "{},{}", local_timestamp(reading.received_at), reading.value)?;
        Ok(())
    }
}

/// Segundos Unix → texto no fuso local
fn local_timestamp(unix_secs: u64) -> String {
    i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_default()
        .with_timezone(&Local)
        .format(CsvLog::TIMESTAMP_FORMAT)
        .to_string()
}
