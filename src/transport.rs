//! Blocking transport layer
//!
//! One request/response exchange at a time over an owned byte stream. The
//! [`Transport`] trait keeps the connection engine testable and leaves room
//! for tunneled transports; [`TcpTransport`] is the production
//! implementation speaking ISO-on-TCP to port 102.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::error::{S7Error, S7Result};

/// Socket tuning applied when a TCP transport is opened.
///
/// All timeouts default to `None`: sends and receives block until the peer
/// answers or the connection drops, so bounded latency requires setting
/// explicit deadlines here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocketOptions {
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

/// A blocking, connection-oriented byte stream
///
/// `send` performs a single write and reports the byte count actually
/// accepted; `recv` performs a single read and reports the byte count
/// received. Short counts are surfaced, not retried, so the caller decides
/// how to treat them.
pub trait Transport: Send {
    fn send(&mut self, frame: &[u8]) -> S7Result<usize>;
    fn recv(&mut self, buf: &mut [u8]) -> S7Result<usize>;
    fn close(&mut self) -> S7Result<()>;
}

/// TCP transport for ISO-on-TCP communication
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Open a TCP connection to `ip:port` with the given socket options.
    /// Nagle's algorithm is disabled; request frames must leave immediately.
    pub fn connect(ip: &str, port: u16, options: SocketOptions) -> S7Result<Self> {
        let addr = resolve(ip, port)?;
        let stream = match options.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_read_timeout(options.read_timeout)?;
        stream.set_write_timeout(options.write_timeout)?;
        stream.set_nodelay(true)?;
        debug!("tcp transport connected to {addr}");
        Ok(TcpTransport { stream })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, frame: &[u8]) -> S7Result<usize> {
        let sent = self.stream.write(frame)?;
        debug!("tx {sent}/{} bytes: {}", frame.len(), hex::encode(frame));
        Ok(sent)
    }

    fn recv(&mut self, buf: &mut [u8]) -> S7Result<usize> {
        let received = self.stream.read(buf)?;
        debug!("rx {received} bytes: {}", hex::encode(&buf[..received]));
        Ok(received)
    }

    fn close(&mut self) -> S7Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Repeated or post-drop shutdowns are not failures.
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn resolve(ip: &str, port: u16) -> S7Result<SocketAddr> {
    (ip, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| S7Error::invalid_parameter(format!("no socket address for {ip}:{port}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_tcp_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let mut buf = [0u8; 16];
            let n = socket.read(&mut buf).unwrap();
            socket.write_all(&buf[..n]).unwrap();
        });

        let mut transport = TcpTransport::connect(
            "127.0.0.1",
            port,
            SocketOptions {
                connect_timeout: Some(Duration::from_secs(1)),
                read_timeout: Some(Duration::from_secs(1)),
                write_timeout: Some(Duration::from_secs(1)),
            },
        )
        .unwrap();

        let frame = [0x03, 0x00, 0x00, 0x04];
        assert_eq!(transport.send(&frame).unwrap(), frame.len());

        let mut buf = [0u8; 16];
        let n = transport.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], &frame);

        transport.close().unwrap();
        server.join().unwrap();
    }

    #[test]
    fn test_close_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let _ = listener.accept().unwrap();
        });

        let mut transport =
            TcpTransport::connect("127.0.0.1", port, SocketOptions::default()).unwrap();
        server.join().unwrap();
        transport.close().unwrap();
        transport.close().unwrap();
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to find a port with no listener.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let result = TcpTransport::connect(
            "127.0.0.1",
            port,
            SocketOptions {
                connect_timeout: Some(Duration::from_millis(200)),
                ..SocketOptions::default()
            },
        );
        assert!(matches!(result, Err(S7Error::Io(_))));
    }
}
