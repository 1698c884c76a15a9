#![allow(dead_code)]

use std::io;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Once;
use std::thread;

/// Serve exactly one connection on a random local port.
///
/// `f` gets the request header (up to and including `\r\n\r\n`) and the
/// connection. The connection closes when `f` returns. Returns the base
/// url of the server and the handle to the server thread.
pub fn serve_once<F>(f: F) -> Result<(String, thread::JoinHandle<()>), io::Error>
where
    F: FnOnce(String, TcpStream) + Send + 'static,
{
    setup_logger();

    let l = TcpListener::bind("127.0.0.1:0")?;
    let port = l.local_addr()?.port();

    let handle = thread::spawn(move || {
        let (mut tcp, _) = l.accept().expect("Accept failed");
        let head = read_header(&mut tcp).expect("Read request header");
        f(head, tcp);
    });

    Ok((format!("http://127.0.0.1:{}", port), handle))
}

/// Serve one connection answering with `res` verbatim, then close.
pub fn respond_with(res: &'static [u8]) -> Result<(String, thread::JoinHandle<()>), io::Error> {
    serve_once(move |_, mut tcp| {
        tcp.write_all(res).unwrap();
    })
}

/// A port on localhost nobody listens to.
pub fn closed_port() -> u16 {
    let l = TcpListener::bind("127.0.0.1:0").unwrap();
    l.local_addr().unwrap().port()
}

/// Read byte by byte until `\r\n\r\n`.
pub fn read_header<S: Read>(io: &mut S) -> Result<String, io::Error> {
    const END_OF_HEADER: &[u8] = b"\r\n\r\n";
    let mut buf = vec![];
    let mut one = [0_u8; 1];

    while !buf.ends_with(END_OF_HEADER) {
        let amount = io.read(&mut one)?;
        if amount == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "EOF before complete http11 header",
            ));
        }
        buf.push(one[0]);
    }

    Ok(String::from_utf8(buf).unwrap())
}

/// Value of a header in a raw request head.
pub fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.split("\r\n").find_map(|line| {
        let mut parts = line.splitn(2, ':');
        let n = parts.next()?;
        let v = parts.next()?;
        if n.eq_ignore_ascii_case(name) {
            Some(v.trim())
        } else {
            None
        }
    })
}

pub fn setup_logger() {
    static START: Once = Once::new();
    START.call_once(|| {
        let test_log = std::env::var("TEST_LOG")
            .map(|x| x != "0" && x.to_lowercase() != "false")
            .unwrap_or(false);
        let level = if test_log {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        };
        pretty_env_logger::formatted_builder()
            .filter_level(log::LevelFilter::Warn)
            .filter_module("rawhttp", level)
            .target(env_logger::Target::Stdout)
            .init();
    });
}
