//! Scheduler - cadência do ciclo de telemetria
//!
//! A espera pelo próximo tick é um `select!` entre o timer e o sinal de
//! encerramento, de modo que o cancelamento é observado durante a espera.

use std::time::{Duration, Instant};
use crossbeam_channel::{after, select, tick, Receiver};
use serde::{Deserialize, Serialize};
use crate::shutdown::ShutdownSignal;

/// Configuração do scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Intervalo entre ciclos
    pub period: Duration,
    /// Modo de execução
    pub mode: SchedulerMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            mode: SchedulerMode::FixedDelay,
        }
    }
}

/// Modo de execução do scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerMode {
    /// Delay fixo - espera o período inteiro após cada ciclo
    #[default]
    FixedDelay,
    /// Taxa fixa - mantém o intervalo entre inícios de ciclo
    FixedRate,
}

/// Resultado da espera
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Tick(TickInfo),
    Cancelled,
}

/// Informações sobre um tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Número do tick (começa em 1)
    pub tick_number: u64,
    /// Tempo desde o tick anterior
    pub since_last: Duration,
}

/// Scheduler de ciclos
#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    ticker: Option<Receiver<Instant>>,
    last_tick: Option<Instant>,
    tick_count: u64,
    missed_ticks: u64,
    total_execution_time: Duration,
    max_execution_time: Duration,
}

impl Scheduler {
    /// Cria novo scheduler
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            ticker: None,
            last_tick: None,
            tick_count: 0,
            missed_ticks: 0,
            total_execution_time: Duration::ZERO,
            max_execution_time: Duration::ZERO,
        }
    }

    /// Cria scheduler de delay fixo com o período dado
    pub fn with_period(period: Duration) -> Self {
        Self::new(SchedulerConfig {
            period,
            ..SchedulerConfig::default()
        })
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    /// Aguarda o próximo tick ou o encerramento
    ///
    /// O primeiro tick é imediato.
    pub fn wait_for_next_tick(&mut self, shutdown: &ShutdownSignal) -> TickOutcome {
        if shutdown.is_triggered() {
            return TickOutcome::Cancelled;
        }

        let now = Instant::now();

        if self.last_tick.is_some() {
            let timer = match self.config.mode {
                SchedulerMode::FixedDelay => after(self.config.period),
                SchedulerMode::FixedRate => {
                    let period = self.config.period;
                    self.ticker.get_or_insert_with(|| tick(period)).clone()
                }
            };

            select! {
                recv(timer) -> _ => {}
                recv(shutdown.receiver()) -> _ => return TickOutcome::Cancelled,
            }
        } else if self.config.mode == SchedulerMode::FixedRate {
            self.ticker = Some(tick(self.config.period));
        }

        let fired = Instant::now();
        let since_last = self
            .last_tick
            .map(|last| fired.duration_since(last))
            .unwrap_or(Duration::ZERO);

        // Em FixedRate, um ciclo mais longo que o período engole ticks
        if self.config.mode == SchedulerMode::FixedRate
            && self.last_tick.is_some()
            && since_last > self.config.period * 2
        {
            let periods = since_last.as_secs_f64() / self.config.period.as_secs_f64();
            self.missed_ticks += periods as u64 - 1;
        }

        tracing::trace!(tick = self.tick_count + 1, waited = ?fired.duration_since(now), "tick");

        self.last_tick = Some(fired);
        self.tick_count += 1;

        TickOutcome::Tick(TickInfo {
            tick_number: self.tick_count,
            since_last,
        })
    }

    /// Registra tempo de execução de um ciclo
    pub fn record_execution_time(&mut self, duration: Duration) {
        self.total_execution_time += duration;
        self.max_execution_time = self.max_execution_time.max(duration);
    }

    /// Retorna estatísticas do scheduler
    pub fn stats(&self) -> SchedulerStats {
        let avg_execution_time = if self.tick_count > 0 {
            self.total_execution_time / self.tick_count as u32
        } else {
            Duration::ZERO
        };

        SchedulerStats {
            tick_count: self.tick_count,
            missed_ticks: self.missed_ticks,
            period: self.config.period,
            avg_execution_time,
            max_execution_time: self.max_execution_time,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn missed_ticks(&self) -> u64 {
        self.missed_ticks
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

/// Estatísticas do scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStats {
    pub tick_count: u64,
    pub missed_ticks: u64,
    pub period: Duration,
    pub avg_execution_time: Duration,
    pub max_execution_time: Duration,
}
