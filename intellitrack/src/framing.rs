use crate::visca::PtzCommand;
use bytes::{BufMut, Bytes, BytesMut};
use clap::ValueEnum;

const VISCA_COMMAND_PAYLOAD: u16 = 0x0100;
const VISCA_OVER_IP_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Framing {
    /// Bare VISCA command bytes.
    Raw,
    /// VISCA-over-IP: payload type, payload length and sequence number header.
    ViscaOverIp,
}

/// Wraps encoded commands for the wire, numbering datagrams when the framing needs it.
#[derive(Debug)]
pub struct Framer {
    framing: Framing,
    sequence: u32,
}

impl Framer {
    pub fn new(framing: Framing) -> Self {
        Self {
            framing,
            sequence: 0,
        }
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn wrap(&mut self, command: &PtzCommand) -> Bytes {
        match self.framing {
            Framing::Raw => command.encode(),
            Framing::ViscaOverIp => {
                let payload = command.encode();
                let mut buf = BytesMut::with_capacity(VISCA_OVER_IP_HEADER_LEN + payload.len());
                buf.put_u16(VISCA_COMMAND_PAYLOAD);
                buf.put_u16(payload.len() as u16);
                buf.put_u32(self.sequence);
                buf.extend_from_slice(&payload);
                self.sequence = self.sequence.wrapping_add(1);
                buf.freeze()
            }
        }
    }
}
