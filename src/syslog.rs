//! Syslog delivery over the local datagram socket or UDP.
//!
//! Local messages use the traditional BSD layout that syslogd expects on its socket:
//!
//! ```text
//! <PRI>Mar  5 08:00:00 tag[pid]: message
//! ```
//!
//! Remote messages carry an RFC 3339 timestamp and the sending host:
//!
//! ```text
//! <PRI>2024-03-05T08:00:00Z host tag[pid]: message
//! ```

use std::io;
use std::net::{ToSocketAddrs, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

use time::OffsetDateTime;

use crate::config::SyslogSinkConfig;
use crate::{Facility, Result, Severity, strftime};

/// Sockets the local syslog daemon listens on, in probe order.
#[cfg(unix)]
const LOCAL_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

#[derive(Debug)]
enum Transport {
    Udp(UdpSocket),
    #[cfg(unix)]
    Local(UnixDatagram),
}

/// An open connection to a syslog collector.
#[derive(Debug)]
pub struct SyslogConnection {
    transport: Transport,
    facility: Facility,
    tag: String,
    hostname: String,
    pid: u32,
}

impl SyslogConnection {
    /// Connect according to `config`: UDP when a remote address is set, otherwise the
    /// local daemon.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] when the address does not resolve or no socket accepts the
    /// connection.
    pub fn connect(config: &SyslogSinkConfig) -> Result<Self> {
        let transport = if config.remote.is_empty() {
            connect_local()?
        } else {
            connect_udp(&config.remote)?
        };

        Ok(Self {
            transport,
            facility: config.facility,
            tag: config.name.clone(),
            hostname: hostname(),
            pid: std::process::id(),
        })
    }

    /// Deliver `message` at the priority matching `severity`.
    pub fn send(&self, severity: Severity, message: &str, now: &OffsetDateTime) -> io::Result<()> {
        let packet = self.frame(severity, message, now);
        match &self.transport {
            Transport::Udp(socket) => socket.send(packet.as_bytes())?,
            #[cfg(unix)]
            Transport::Local(socket) => socket.send(packet.as_bytes())?,
        };
        Ok(())
    }

    fn frame(&self, severity: Severity, message: &str, now: &OffsetDateTime) -> String {
        let priority = self.facility.priority(severity);
        let newline = if message.ends_with('\n') { "" } else { "\n" };

        match self.transport {
            Transport::Udp(_) => format!(
                "<{}>{} {} {}[{}]: {}{}",
                priority,
                rfc3339(now),
                self.hostname,
                self.tag,
                self.pid,
                message,
                newline
            ),
            #[cfg(unix)]
            Transport::Local(_) => format!(
                "<{}>{} {}[{}]: {}{}",
                priority,
                strftime::format("%b %e %H:%M:%S", now),
                self.tag,
                self.pid,
                message,
                newline
            ),
        }
    }
}

fn connect_udp(remote: &str) -> io::Result<Transport> {
    let addr = remote.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no address for {}", remote),
        )
    })?;
    let bind = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = UdpSocket::bind(bind)?;
    socket.connect(addr)?;
    Ok(Transport::Udp(socket))
}

#[cfg(unix)]
fn connect_local() -> io::Result<Transport> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no syslog socket found");
    for path in LOCAL_SOCKETS {
        let socket = UnixDatagram::unbound()?;
        match socket.connect(path) {
            Ok(()) => return Ok(Transport::Local(socket)),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

#[cfg(not(unix))]
fn connect_local() -> io::Result<Transport> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "local syslog is only available on unix",
    ))
}

fn rfc3339(now: &OffsetDateTime) -> String {
    let mut out = strftime::format("%Y-%m-%dT%H:%M:%S", now);
    if now.offset().is_utc() {
        out.push('Z');
    } else {
        let offset = strftime::format("%z", now);
        out.push_str(&offset[..3]);
        out.push(':');
        out.push_str(&offset[3..]);
    }
    out
}

fn hostname() -> String {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .filter_map(|p| std::fs::read_to_string(p).ok())
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "localhost".to_string())
}
