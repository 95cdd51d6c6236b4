//! The sequential switch event loop.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vswitch_core::{ForwardingEngine, LinkLayer};

/// Owns the forwarding engine and the link layer and runs the
/// receive → decide → transmit loop.
///
/// One frame is fully processed, including all of its transmits,
/// before the next is pulled; the loop ends on shutdown cancellation
/// or when the link layer reports that no frame can ever arrive again.
pub struct SwitchDaemon<L: LinkLayer> {
    switch_id: String,
    engine: ForwardingEngine,
    link: L,
    shutdown: CancellationToken,
}

impl<L: LinkLayer> SwitchDaemon<L> {
    /// Creates a daemon over a built engine and link layer.
    pub fn new(
        switch_id: impl Into<String>,
        engine: ForwardingEngine,
        link: L,
        shutdown: CancellationToken,
    ) -> Self {
        SwitchDaemon {
            switch_id: switch_id.into(),
            engine,
            link,
            shutdown,
        }
    }

    /// The engine, for post-run inspection.
    pub fn engine(&self) -> &ForwardingEngine {
        &self.engine
    }

    /// Runs the event loop until shutdown or link exhaustion.
    pub async fn run(&mut self) {
        info!(switch_id = %self.switch_id, ports = self.engine.ports().len(), "switch starting");
        for port in self.engine.ports().iter() {
            info!(id = %port.id, name = %port.name, role = %port.role, admin = %port.admin, "port");
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(switch_id = %self.switch_id, "shutdown requested");
                    break;
                }
                received = self.link.recv_any() => {
                    let Some((ingress, raw)) = received else {
                        info!(switch_id = %self.switch_id, "link layer closed");
                        break;
                    };
                    self.handle_frame(ingress, &raw).await;
                }
            }
        }

        let stats = self.engine.fdb().stats();
        info!(
            switch_id = %self.switch_id,
            fdb_entries = self.engine.fdb().len(),
            learned = stats.entries_learned,
            moved = stats.entries_moved,
            "switch stopped"
        );
    }

    /// Processes a single inbound frame; any error is logged and the
    /// frame is skipped.
    async fn handle_frame(&mut self, ingress: vswitch_types::PortId, raw: &[u8]) {
        debug!(%ingress, len = raw.len(), "received frame");

        let transmits = match self.engine.process(ingress, raw) {
            Ok(transmits) => transmits,
            Err(e) => {
                warn!(%ingress, error = %e, "skipping malformed frame");
                return;
            }
        };

        for t in transmits {
            debug!(egress = %t.port, len = t.bytes.len(), "transmitting");
            self.link.transmit(t.port, &t.bytes).await;
        }
    }
}
