use std::net::{ToSocketAddrs, UdpSocket};

use crate::notification::domain::notification_transport::{NotificationTransport, TransportError};
use crate::notification::domain::wake_up_event::WakeUpEvent;

/// Sends each wake-up event as one JSON datagram to the assistant's control port.
pub struct UdpNotificationTransport {
    socket: UdpSocket,
    target: String,
}

impl UdpNotificationTransport {
    /// Binds an ephemeral local port and resolves `target` once up front.
    pub fn connect(target: &str) -> Result<Self, TransportError> {
        let send_err = |source| TransportError::Send {
            target: target.to_string(),
            source,
        };
        let addr = target
            .to_socket_addrs()
            .map_err(send_err)?
            .next()
            .ok_or_else(|| {
                send_err(std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "address resolved to nothing",
                ))
            })?;
        let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr).map_err(send_err)?;
        socket.connect(addr).map_err(send_err)?;
        Ok(Self {
            socket,
            target: target.to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl NotificationTransport for UdpNotificationTransport {
    fn emit(&mut self, event: &WakeUpEvent) -> Result<(), TransportError> {
        let payload = event.to_json()?;
        let sent = self
            .socket
            .send(payload.as_bytes())
            .map_err(|source| TransportError::Send {
                target: self.target.clone(),
                source,
            })?;
        if sent != payload.len() {
            return Err(TransportError::Truncated {
                sent,
                len: payload.len(),
            });
        }
        log::debug!("Sent wake-up event to {}: {payload}", self.target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_emits_json_datagram() {
        let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
        listener
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let target = listener.local_addr().unwrap().to_string();

        let mut transport = UdpNotificationTransport::connect(&target).unwrap();
        transport.emit(&WakeUpEvent::video("我当前情绪是恐惧")).unwrap();

        let mut buf = [0u8; 512];
        let n = listener.recv(&mut buf).unwrap();
        let received: WakeUpEvent = serde_json::from_slice(&buf[..n]).unwrap();
        assert_eq!(received, WakeUpEvent::video("我当前情绪是恐惧"));
    }

    #[test]
    fn test_unresolvable_target_errors() {
        let result = UdpNotificationTransport::connect("not an address");
        assert!(matches!(result, Err(TransportError::Send { .. })));
    }
}
