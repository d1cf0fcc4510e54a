//! Serialized admission gate: a single-consumer queue in front of the engine.
//!
//! An alternative to sharing the engine directly between threads: a dedicated
//! OS thread takes sole ownership of the engine and drains a bounded command
//! channel, so every entry point funnels through one consumer and requests
//! are processed strictly one at a time. Callers receive replies over
//! per-call channels.
//!
//! Dropping the gate (or calling [`AdmissionGate::shutdown`]) stops the
//! worker; the bounded queue sheds load with [`GateError::QueueFull`] instead
//! of blocking callers.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use thiserror::Error;

use crate::core::engine::{AdmissionEngine, Decision};
use crate::core::AdmissionError;
use crate::util::serde::{CapacitySnapshot, Demand, TenantId};

/// Errors produced by the gate's queueing layer.
#[derive(Debug, Error)]
pub enum GateError {
    /// The command queue is at capacity; retry later.
    #[error("gate queue full")]
    QueueFull,
    /// The worker thread is gone; the gate is unusable.
    #[error("gate worker disconnected")]
    Disconnected,
    /// The worker thread could not be started.
    #[error("gate worker could not start: {0}")]
    Spawn(String),
    /// A structural engine error, forwarded from the worker.
    #[error(transparent)]
    Admission(#[from] AdmissionError),
}

enum GateCommand {
    Register {
        id: TenantId,
        name: String,
        contact: String,
        reply: Sender<Result<(), AdmissionError>>,
    },
    Request {
        tenant_id: TenantId,
        demand: Demand,
        reply: Sender<Decision>,
    },
    Snapshot {
        reply: Sender<CapacitySnapshot>,
    },
    Shutdown,
}

/// Handle to the gate worker. Cloneable senders are deliberately not exposed;
/// the handle is the single entry point.
pub struct AdmissionGate {
    commands: Sender<GateCommand>,
    worker: Option<JoinHandle<()>>,
}

impl AdmissionGate {
    /// Start a gate worker that takes sole ownership of `engine`.
    ///
    /// `queue_depth` bounds how many commands may be waiting; further
    /// submissions fail fast with [`GateError::QueueFull`].
    ///
    /// # Errors
    ///
    /// [`GateError::Spawn`] if the OS refuses the worker thread.
    pub fn spawn(engine: AdmissionEngine, queue_depth: usize) -> Result<Self, GateError> {
        let (commands, inbox) = bounded(queue_depth);
        let worker = thread::Builder::new()
            .name("admission-gate".into())
            .spawn(move || run_worker(&engine, &inbox))
            .map_err(|e| GateError::Spawn(e.to_string()))?;
        Ok(Self {
            commands,
            worker: Some(worker),
        })
    }

    /// Register a tenant through the gate.
    ///
    /// # Errors
    ///
    /// Queueing errors, or the engine's `DuplicateTenant`.
    pub fn register_tenant(&self, id: &str, name: &str, contact: &str) -> Result<(), GateError> {
        let (reply, outcome) = bounded(1);
        self.submit(GateCommand::Register {
            id: id.to_string(),
            name: name.to_string(),
            contact: contact.to_string(),
            reply,
        })?;
        outcome
            .recv()
            .map_err(|_| GateError::Disconnected)?
            .map_err(GateError::from)
    }

    /// Submit an admission request and wait for the decision.
    ///
    /// # Errors
    ///
    /// Queueing errors only; denials come back inside [`Decision`].
    pub fn request_allocation(
        &self,
        tenant_id: &str,
        demand: Demand,
    ) -> Result<Decision, GateError> {
        let (reply, outcome) = bounded(1);
        self.submit(GateCommand::Request {
            tenant_id: tenant_id.to_string(),
            demand,
            reply,
        })?;
        outcome.recv().map_err(|_| GateError::Disconnected)
    }

    /// Fetch an availability snapshot through the gate.
    ///
    /// # Errors
    ///
    /// Queueing errors only.
    pub fn available_rooms(&self) -> Result<CapacitySnapshot, GateError> {
        let (reply, outcome) = bounded(1);
        self.submit(GateCommand::Snapshot { reply })?;
        outcome.recv().map_err(|_| GateError::Disconnected)
    }

    /// Stop the worker and wait for it to exit. Idempotent.
    pub fn shutdown(&mut self) {
        if self.worker.is_some() {
            let _ = self.commands.send(GateCommand::Shutdown);
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("gate worker panicked during shutdown");
            }
        }
    }

    fn submit(&self, command: GateCommand) -> Result<(), GateError> {
        match self.commands.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(GateError::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(GateError::Disconnected),
        }
    }
}

impl Drop for AdmissionGate {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(engine: &AdmissionEngine, inbox: &Receiver<GateCommand>) {
    tracing::debug!("gate worker started");
    while let Ok(command) = inbox.recv() {
        match command {
            GateCommand::Register {
                id,
                name,
                contact,
                reply,
            } => {
                let _ = reply.send(engine.register_tenant(&id, &name, &contact));
            }
            GateCommand::Request {
                tenant_id,
                demand,
                reply,
            } => {
                let _ = reply.send(engine.request_allocation(&tenant_id, &demand));
            }
            GateCommand::Snapshot { reply } => {
                let _ = reply.send(engine.available_rooms());
            }
            GateCommand::Shutdown => break,
        }
    }
    tracing::debug!("gate worker exiting");
}
