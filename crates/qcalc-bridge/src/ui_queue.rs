// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI-thread task queue.
//
// JavaScript interface calls arrive on a binder/background thread, but the
// orientation constraint may only be changed on the UI thread. Callers post a
// command and return at once; the host drains the queue from its UI loop.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, warn};

use qcalc_core::types::OrientationLock;

use crate::traits::NativeOrientation;

/// Work that has to run on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    SetOrientation(OrientationLock),
}

/// Create a connected dispatcher/pump pair.
pub fn ui_queue() -> (UiDispatcher, UiTaskPump) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiDispatcher { tx }, UiTaskPump { rx })
}

/// Sending half. Cheap to clone, never blocks.
#[derive(Debug, Clone)]
pub struct UiDispatcher {
    tx: UnboundedSender<UiCommand>,
}

impl UiDispatcher {
    /// Fire-and-forget. If the UI side is gone the command is dropped.
    pub fn post(&self, command: UiCommand) {
        if self.tx.send(command).is_err() {
            warn!(?command, "UI task pump closed; command dropped");
        }
    }
}

/// Receiving half, owned by whoever runs the UI loop.
#[derive(Debug)]
pub struct UiTaskPump {
    rx: UnboundedReceiver<UiCommand>,
}

impl UiTaskPump {
    /// Apply every queued command in posting order and return how many ran.
    ///
    /// Call only from the UI thread. A failing command is logged and the
    /// rest still run.
    pub fn drain<T: NativeOrientation + ?Sized>(&mut self, target: &T) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(command) => {
                    apply(command, target);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Async variant for hosts whose UI loop is a tokio task. Returns once
    /// every dispatcher has been dropped.
    pub async fn run<T: NativeOrientation + ?Sized>(mut self, target: &T) {
        while let Some(command) = self.rx.recv().await {
            apply(command, target);
        }
        debug!("UI task pump finished");
    }
}

fn apply<T: NativeOrientation + ?Sized>(command: UiCommand, target: &T) {
    match command {
        UiCommand::SetOrientation(lock) => match target.set_requested_orientation(lock) {
            Ok(()) => debug!(?lock, "orientation constraint applied"),
            Err(e) => warn!(?lock, error = %e, "failed to apply orientation constraint"),
        },
    }
}
