use anyhow::{bail, Context, Result};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

pub const DEFAULT_VISCA_PORT: u16 = 52381;

/// Control endpoint of the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Destination for encoded command datagrams.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink {
    fn send(&self, payload: &[u8]) -> Result<()>;
    fn close(&mut self);
}

/// Connectionless sink: one datagram per command, no acknowledgement or retry.
#[derive(Debug)]
pub struct UdpSink {
    socket: Option<UdpSocket>,
    target: SocketAddr,
}

impl UdpSink {
    pub async fn connect(endpoint: &Endpoint) -> Result<Self> {
        let target = tokio::net::lookup_host((endpoint.host(), endpoint.port()))
            .await
            .with_context(|| format!("resolve {endpoint} failed"))?
            .next()
            .with_context(|| format!("no address for {endpoint}"))?;
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)
            .await
            .context("bind udp socket failed")?;
        tracing::info!("VISCA target {} ({})", endpoint, target);
        Ok(Self {
            socket: Some(socket),
            target,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl CommandSink for UdpSink {
    fn send(&self, payload: &[u8]) -> Result<()> {
        let Some(socket) = &self.socket else {
            bail!("socket closed");
        };
        // A datagram that cannot go out right now is superseded by the next tick's.
        let sent = socket
            .try_send_to(payload, self.target)
            .with_context(|| format!("send to {} failed", self.target))?;
        if sent != payload.len() {
            bail!("short send: {sent} of {} bytes", payload.len());
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            tracing::debug!("VISCA socket closed");
        }
    }
}
