//! UDP transport
//!
//! Listens for OSC datagrams, decodes them into [`Message`]s, and pushes
//! them into the dispatch queue. This is boundary glue only: malformed
//! packets and unsupported argument types are logged and skipped, and a full
//! queue drops the message rather than blocking the socket loop.

use crate::dispatch::{Message, MessageProducer, Value};
use crate::{Error, Result};
use rosc::{OscMessage, OscPacket, OscType};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Poll interval for the stop flag while no packets arrive.
const RECV_TIMEOUT: Duration = Duration::from_millis(100);

/// Bound UDP listener feeding the message queue.
pub struct UdpListener {
    socket: UdpSocket,
}

impl UdpListener {
    pub fn bind(bind: &str, port: u16) -> Result<Self> {
        let socket = UdpSocket::bind((bind, port))
            .map_err(|err| Error::Transport(format!("failed to bind {bind}:{port}: {err}")))?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive loop. Runs until the stop flag is set; never returns early on
    /// a bad packet.
    pub fn run(self, mut producer: MessageProducer, stop: Arc<AtomicBool>) {
        let mut buf = [0u8; rosc::decoder::MTU];
        info!("Listening for control messages");

        while !stop.load(Ordering::Relaxed) {
            let (size, peer) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(err)
                    if err.kind() == std::io::ErrorKind::WouldBlock
                        || err.kind() == std::io::ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(err) => {
                    warn!(error = %err, "Socket receive failed");
                    continue;
                }
            };

            match rosc::decoder::decode_udp(&buf[..size]) {
                Ok((_, packet)) => push_packet(packet, &mut producer),
                Err(err) => {
                    debug!(%peer, size, error = %err, "Skipping malformed packet");
                }
            }
        }
        info!("Listener stopped");
    }
}

/// Flatten a packet (message or nested bundle) into the queue.
fn push_packet(packet: OscPacket, producer: &mut MessageProducer) {
    match packet {
        OscPacket::Message(osc) => {
            let message = convert(osc);
            if !producer.push(message) {
                debug!("Queue full, message dropped");
            }
        }
        OscPacket::Bundle(bundle) => {
            for inner in bundle.content {
                push_packet(inner, producer);
            }
        }
    }
}

/// Map OSC argument types onto [`Value`], skipping anything unsupported.
fn convert(osc: OscMessage) -> Message {
    let args = osc
        .args
        .into_iter()
        .filter_map(|arg| match arg {
            OscType::Int(v) => Some(Value::Int(v)),
            OscType::Float(v) => Some(Value::Float(v as f64)),
            OscType::Double(v) => Some(Value::Float(v)),
            OscType::String(v) => Some(Value::Str(v)),
            OscType::Bool(v) => Some(Value::Bool(v)),
            OscType::Long(v) => Some(Value::Int(v as i32)),
            other => {
                debug!(?other, "Skipping unsupported argument type");
                None
            }
        })
        .collect();
    Message::new(osc.addr, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MessageQueue;
    use rosc::{OscBundle, OscTime};

    fn osc_message(addr: &str, args: Vec<OscType>) -> OscMessage {
        OscMessage {
            addr: addr.to_string(),
            args,
        }
    }

    #[test]
    fn test_convert_argument_types() {
        let message = convert(osc_message(
            "/multixy",
            vec![
                OscType::Float(0.25),
                OscType::Double(0.5),
                OscType::Int(1),
                OscType::String("smooth".into()),
                OscType::Bool(true),
            ],
        ));

        assert_eq!(message.address, "/multixy");
        assert_eq!(
            message.args,
            vec![
                Value::Float(0.25),
                Value::Float(0.5),
                Value::Int(1),
                Value::Str("smooth".into()),
                Value::Bool(true),
            ]
        );
    }

    #[test]
    fn test_convert_skips_unsupported_types() {
        let message = convert(osc_message(
            "/tap",
            vec![OscType::Nil, OscType::Int(1), OscType::Inf],
        ));
        assert_eq!(message.args, vec![Value::Int(1)]);
    }

    #[test]
    fn test_bundle_flattened_in_order() {
        let (mut producer, mut consumer) = MessageQueue::with_capacity(64).split();

        let bundle = OscPacket::Bundle(OscBundle {
            timetag: OscTime {
                seconds: 0,
                fractional: 1,
            },
            content: vec![
                OscPacket::Message(osc_message("/tap", vec![OscType::Int(1)])),
                OscPacket::Message(osc_message("/tap", vec![OscType::Int(0)])),
            ],
        });

        push_packet(bundle, &mut producer);

        assert_eq!(consumer.pop().unwrap().args, vec![Value::Int(1)]);
        assert_eq!(consumer.pop().unwrap().args, vec![Value::Int(0)]);
        assert!(consumer.pop().is_none());
    }

    #[test]
    fn test_decode_round_trip() {
        let packet = OscPacket::Message(osc_message(
            "/joy-left",
            vec![OscType::Float(0.5), OscType::Float(-0.25)],
        ));
        let bytes = rosc::encoder::encode(&packet).unwrap();

        let (_, decoded) = rosc::decoder::decode_udp(&bytes).unwrap();
        let (mut producer, mut consumer) = MessageQueue::with_capacity(8).split();
        push_packet(decoded, &mut producer);

        let message = consumer.pop().unwrap();
        assert_eq!(message.address, "/joy-left");
        assert_eq!(message.arg_f64(0), Some(0.5));
        assert_eq!(message.arg_f64(1), Some(-0.25));
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let listener = UdpListener::bind("127.0.0.1", 0).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }
}
