use rawhttp::{Client, Error, Method, Response};
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use std::thread;

mod common;

/// Serve one connection and answer with the request line.
fn request_line_echo() -> (String, thread::JoinHandle<()>) {
    common::serve_once(|head, mut tcp| {
        if let Some(len) = common::header_value(&head, "content-length") {
            let mut body = vec![0; len.parse().unwrap()];
            tcp.read_exact(&mut body).unwrap();
        }
        let line = head.split("\r\n").next().unwrap();
        let res = format!("HTTP/1.1 200 OK\r\n\r\n{}", line);
        tcp.write_all(res.as_bytes()).unwrap();
    })
    .unwrap()
}

fn dispatch(method: &str) -> Result<Response, Error> {
    let (url, server) = request_line_echo();
    let res = Client::new().dispatch(&format!("{}/x", url), method, None)?;
    server.join().unwrap();
    Ok(res)
}

#[test]
fn dispatch_post() -> Result<(), Error> {
    assert_eq!(dispatch("POST")?.body, "POST /x HTTP/1.1");
    Ok(())
}

#[test]
fn dispatch_get() -> Result<(), Error> {
    assert_eq!(dispatch("GET")?.body, "GET /x HTTP/1.1");
    Ok(())
}

#[test]
fn dispatch_unknown_is_get() -> Result<(), Error> {
    assert_eq!(dispatch("PATCH")?, dispatch("GET")?);
    // case sensitive
    assert_eq!(dispatch("post")?.body, "GET /x HTTP/1.1");
    Ok(())
}

#[test]
fn observer_sees_response() -> Result<(), Error> {
    let seen = Arc::new(Mutex::new(vec![]));
    let seen2 = seen.clone();

    let client = Client::new().with_observer(move |method, res| {
        seen2.lock().unwrap().push((method, res.code));
    });

    let (url, server) = request_line_echo();
    client.post(&url, None)?;
    server.join().unwrap();

    let (url, server) = request_line_echo();
    client.get(&url, None)?;
    server.join().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(Method::Post, 200), (Method::Get, 200)]
    );

    Ok(())
}

#[test]
fn concurrent_calls() -> Result<(), Error> {
    let client = Client::new();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let (url, server) = request_line_echo();
            thread::spawn(move || {
                let res = client.get(&url, None);
                server.join().unwrap();
                res
            })
        })
        .collect();

    for h in handles {
        let res = h.join().unwrap()?;
        assert_eq!(res.body, "GET / HTTP/1.1");
    }

    Ok(())
}
