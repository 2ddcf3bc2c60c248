//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{PredictionService, PredictionSession};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread.
///
/// Each submission runs on its own task so the queue keeps draining; the
/// UI keeps the button disabled while a submission is loading.
pub fn launch<S>(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    session: PredictionSession<S>,
) -> thread::JoinHandle<()>
where
    S: PredictionService + 'static,
{
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { form } => {
                        let session = session.clone();
                        tokio::spawn(async move {
                            session.submit(&form).await;
                        });
                    }
                }
            }

            tracing::info!("ui command queue closed; backend worker stopping");
        });
    })
}
