//! A single-use blocking connection.

use crate::Error;
use std::io;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Size of each read from the connection.
pub const READ_CHUNK_SIZE: usize = 1024;

/// One connection, used for exactly one request/response exchange.
///
/// The connection is released when the `Transport` is dropped, so every exit
/// path of an exchange closes it. [`close`] additionally shuts the socket down
/// on the success path.
///
/// [`close`]: struct.Transport.html#method.close
#[derive(Debug)]
pub struct Transport<S> {
    io: S,
}

impl Transport<TcpStream> {
    /// Open a blocking TCP connection to `(host, port)`.
    ///
    /// With a `timeout`, each resolved address gets that long to connect and
    /// reads/writes on the stream time out after the same duration. Without,
    /// everything blocks indefinitely.
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self, Error> {
        debug!("connect: {}:{}", host, port);

        let addrs = (host, port).to_socket_addrs().map_err(Error::Connection)?;

        let mut last_err = None;

        for addr in addrs {
            let res = match timeout {
                Some(t) => TcpStream::connect_timeout(&addr, t),
                None => TcpStream::connect(addr),
            };

            match res {
                Ok(tcp) => {
                    debug!("connected: {}", addr);

                    tcp.set_read_timeout(timeout).map_err(Error::Connection)?;
                    tcp.set_write_timeout(timeout).map_err(Error::Connection)?;

                    return Ok(Transport::new(tcp));
                }
                Err(e) => {
                    debug!("connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let err = last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address found for {}", host),
            )
        });

        Err(Error::Connection(err))
    }

    /// Shut down both directions and release the socket.
    ///
    /// A peer that already closed makes `shutdown` fail, which is not an error
    /// here since the socket is dropped either way.
    pub fn close(self) {
        trace!("close connection");

        if let Err(e) = self.io.shutdown(Shutdown::Both) {
            debug!("shutdown: {}", e);
        }
    }
}

impl<S> Transport<S>
where
    S: Read + Write,
{
    /// Wrap an already connected stream.
    pub fn new(io: S) -> Self {
        Transport { io }
    }

    /// Write the entire buffer, looping over partial writes.
    pub fn send(&mut self, buf: &[u8]) -> Result<(), Error> {
        let mut to_write = buf;

        while !to_write.is_empty() {
            trace!("send left: {}", to_write.len());

            match self.io.write(to_write) {
                Ok(0) => {
                    return Err(Error::Transmission(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "Connection closed while sending request",
                    )));
                }
                Ok(amount) => {
                    trace!("send did write: {}", amount);
                    to_write = &to_write[amount..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    trace!("send error: {:?}", e);
                    return Err(Error::Transmission(e));
                }
            }
        }

        self.io.flush().map_err(Error::Transmission)
    }

    /// Read fixed size chunks until the peer closes the connection.
    ///
    /// Response framing (`content-length`, chunked) is not consulted, a peer
    /// that never closes blocks this call until a read timeout (if any).
    pub fn receive_until_close(&mut self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::with_capacity(READ_CHUNK_SIZE);
        let mut chunk = [0_u8; READ_CHUNK_SIZE];

        loop {
            match self.io.read(&mut chunk) {
                Ok(0) => break,
                Ok(amount) => {
                    trace!("receive chunk: {}", amount);
                    buf.extend_from_slice(&chunk[..amount]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    trace!("receive error: {:?}", e);
                    return Err(Error::Transmission(e));
                }
            }
        }

        debug!("receive_until_close: {} bytes", buf.len());

        Ok(buf)
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> S {
        self.io
    }
}
