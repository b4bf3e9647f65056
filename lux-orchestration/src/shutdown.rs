//! Sinal de encerramento cooperativo
//!
//! O `ShutdownHandle` pode ser disparado de qualquer thread (handler de
//! SIGINT/SIGTERM, teste); o `ShutdownSignal` é observado pelo scheduler
//! enquanto ele espera o próximo tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crossbeam_channel::{bounded, Receiver, Sender};

/// Cria um par handle/sinal ligado
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (sender, receiver) = bounded(1);
    let triggered = Arc::new(AtomicBool::new(false));

    let handle = ShutdownHandle {
        sender: sender.clone(),
        triggered: Arc::clone(&triggered),
    };
    let signal = ShutdownSignal {
        receiver,
        // mantém o canal conectado mesmo sem handles vivos
        _keepalive: sender,
        triggered,
    };

    (handle, signal)
}

/// Lado que dispara o encerramento
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Solicita encerramento (idempotente)
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.sender.try_send(());
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

/// Lado observado pelo loop
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: Receiver<()>,
    _keepalive: Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Canal que fica pronto quando o encerramento é solicitado
    pub(crate) fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}
