//! The link layer capability consumed by the switch.
//!
//! The surrounding runtime moves bytes between simulated hosts; the
//! core only needs "receive the next frame from any port" and
//! "transmit a frame on a given port". [`ChannelLink`] is an
//! in-process implementation over tokio channels, used by the demo
//! daemon and the integration tests.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;
use vswitch_types::PortId;

/// Narrow interface to the layer that moves frames on and off ports.
///
/// `recv_any` must be cancel-safe: the event loop selects it against
/// a shutdown signal and a cancelled call must not lose a frame.
/// `transmit` is fire-and-forget; delivery failures are the link
/// layer's concern, not the switch's.
#[async_trait]
pub trait LinkLayer: Send {
    /// Waits for the next frame to arrive on any port.
    ///
    /// Returns `None` once no frame can ever arrive again (every
    /// injector hung up), which ends the event loop.
    async fn recv_any(&mut self) -> Option<(PortId, Vec<u8>)>;

    /// Sends a frame out of the given port.
    async fn transmit(&mut self, port: PortId, frame: &[u8]);

    /// Number of ports the link layer serves.
    fn port_count(&self) -> usize;

    /// Interface name of a port, used only to build the port table.
    fn port_name(&self, port: PortId) -> Option<&str>;
}

/// Host-side handle to one port of a [`ChannelLink`].
///
/// Tests and demo topologies use it to play the attached host: inject
/// frames into the switch and observe what the switch transmits.
#[derive(Debug)]
pub struct PortHandle {
    port: PortId,
    inject: mpsc::Sender<(PortId, Vec<u8>)>,
    tap: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl PortHandle {
    /// The port this handle is attached to.
    pub fn port(&self) -> PortId {
        self.port
    }

    /// Injects a frame as if the attached host had sent it.
    ///
    /// Returns false if the switch side is gone.
    pub async fn inject(&self, frame: Vec<u8>) -> bool {
        self.inject.send((self.port, frame)).await.is_ok()
    }

    /// Waits for the next frame the switch transmitted on this port.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.tap.recv().await
    }

    /// Returns an already-transmitted frame without waiting, if any.
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.tap.try_recv().ok()
    }
}

/// In-process link layer over tokio channels.
///
/// All ports share one ingress queue (frames arrive in injection
/// order, which gives the sequential loop its "receive from any port"
/// semantics); each port has its own unbounded egress tap. A transmit
/// to a port whose tap was dropped, or to an id the link does not
/// serve, is silently discarded.
#[derive(Debug)]
pub struct ChannelLink {
    names: Vec<String>,
    ingress: mpsc::Receiver<(PortId, Vec<u8>)>,
    taps: Vec<mpsc::UnboundedSender<Vec<u8>>>,
}

impl ChannelLink {
    /// Default capacity of the shared ingress queue.
    pub const DEFAULT_INGRESS_CAPACITY: usize = 256;

    /// Creates a link serving `names.len()` ports and one host-side
    /// handle per port.
    pub fn new(names: &[&str]) -> (Self, Vec<PortHandle>) {
        Self::with_capacity(names, Self::DEFAULT_INGRESS_CAPACITY)
    }

    /// Like [`ChannelLink::new`] with an explicit ingress capacity.
    pub fn with_capacity(names: &[&str], capacity: usize) -> (Self, Vec<PortHandle>) {
        let (inject_tx, ingress) = mpsc::channel(capacity);
        let mut taps = Vec::with_capacity(names.len());
        let mut handles = Vec::with_capacity(names.len());

        for (i, _) in names.iter().enumerate() {
            let (tap_tx, tap_rx) = mpsc::unbounded_channel();
            taps.push(tap_tx);
            handles.push(PortHandle {
                port: PortId::new(i as u16),
                inject: inject_tx.clone(),
                tap: tap_rx,
            });
        }

        let link = ChannelLink {
            names: names.iter().map(|s| s.to_string()).collect(),
            ingress,
            taps,
        };
        (link, handles)
    }
}

#[async_trait]
impl LinkLayer for ChannelLink {
    async fn recv_any(&mut self) -> Option<(PortId, Vec<u8>)> {
        // mpsc::Receiver::recv is cancel-safe.
        self.ingress.recv().await
    }

    async fn transmit(&mut self, port: PortId, frame: &[u8]) {
        match self.taps.get(port.index()) {
            Some(tap) => {
                if tap.send(frame.to_vec()).is_err() {
                    trace!(%port, "tap closed, frame dropped");
                }
            }
            None => trace!(%port, "transmit to unknown port, frame dropped"),
        }
    }

    fn port_count(&self) -> usize {
        self.names.len()
    }

    fn port_name(&self, port: PortId) -> Option<&str> {
        self.names.get(port.index()).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inject_and_recv_any() {
        let (mut link, handles) = ChannelLink::new(&["r-0", "r-1"]);

        assert!(handles[1].inject(vec![1, 2, 3]).await);
        let (port, frame) = link.recv_any().await.unwrap();
        assert_eq!(port, PortId::new(1));
        assert_eq!(frame, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_transmit_reaches_tap() {
        let (mut link, mut handles) = ChannelLink::new(&["r-0", "r-1"]);

        link.transmit(PortId::new(0), &[9, 9]).await;
        assert_eq!(handles[0].recv().await.unwrap(), vec![9, 9]);
        assert!(handles[1].try_recv().is_none());
    }

    #[tokio::test]
    async fn test_transmit_to_unknown_port_is_dropped() {
        let (mut link, _handles) = ChannelLink::new(&["r-0"]);
        // Must not panic.
        link.transmit(PortId::new(7), &[1]).await;
    }

    #[tokio::test]
    async fn test_recv_any_ends_when_injectors_gone() {
        let (mut link, handles) = ChannelLink::new(&["r-0"]);
        drop(handles);
        assert!(link.recv_any().await.is_none());
    }

    #[test]
    fn test_port_names() {
        let (link, _handles) = ChannelLink::new(&["r-0", "rr-0-1"]);
        assert_eq!(link.port_count(), 2);
        assert_eq!(link.port_name(PortId::new(1)), Some("rr-0-1"));
        assert_eq!(link.port_name(PortId::new(5)), None);
    }
}
