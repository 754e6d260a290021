use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use reqwest::blocking::Client;
use tempfile::TempDir;

use stegosuite_core::*;

struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serves exactly one request with a canned response and hands back what it received.
fn serve_once(
    status_line: &'static str,
    extra_headers: &'static str,
    body: &'static [u8],
) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback listener");
    let server = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .expect("multipart body with known length expected");
        let mut request_body = vec![0; length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\n{extra_headers}Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: request_body,
        }
    });

    (server, handle)
}

fn transport(server: &str) -> HttpTransport {
    let config = ServiceConfig {
        server: server.to_string(),
        ..ServiceConfig::default()
    };
    let client = Client::builder().no_proxy().build().unwrap();
    HttpTransport::with_client(client, &config).unwrap()
}

fn cover(dir: &TempDir) -> PathBuf {
    let p = dir.path().join("cover.png");
    fs::write(&p, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    p
}

fn encode_request(dir: &TempDir, message: &str) -> WireRequest {
    api::encode::prepare()
        .with_image(SelectedFile::from_path(cover(dir)).unwrap())
        .with_message(message)
        .with_scheme(Scheme::Lsbm)
        .build()
        .unwrap()
}

#[test]
fn encode_posts_multipart_fields_in_order_and_reads_metrics() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once(
        "200 OK",
        "Content-Type: image/png\r\nX-Metrics: {\"psnr\":34.12,\"ssim\":0.981,\"ber\":0.0007}\r\n",
        b"\x89PNGstego",
    );

    let reply = transport(&server)
        .send(&encode_request(&dir, "Hello World"))
        .unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.request_line, "POST /api/encode HTTP/1.1");
    assert!(captured
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));

    let body = captured.body_text();
    let image = body.find("name=\"image\"").unwrap();
    let message = body.find("name=\"message\"").unwrap();
    let scheme = body.find("name=\"scheme\"").unwrap();
    assert!(image < message && message < scheme);
    assert!(body.contains("filename=\"cover.png\""));
    assert!(body.to_lowercase().contains("content-type: image/png"));
    assert!(body.contains("Hello World"));
    assert!(body.contains("lsbm"));

    assert_eq!(
        reply,
        ServiceReply::Success {
            body: b"\x89PNGstego".to_vec(),
            metrics: Some(r#"{"psnr":34.12,"ssim":0.981,"ber":0.0007}"#.to_string()),
        }
    );
}

#[test]
fn decode_goes_to_the_decode_endpoint() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once(
        "200 OK",
        "Content-Type: application/json\r\n",
        br#"{"message":"Hello World"}"#,
    );

    let request = api::decode::prepare()
        .from_secret_image(SelectedFile::from_path(cover(&dir)).unwrap())
        .with_scheme(Scheme::Pvd)
        .build()
        .unwrap();
    let reply = transport(&server).send(&request).unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.request_line, "POST /api/decode HTTP/1.1");
    assert!(!captured.body_text().contains("name=\"message\""));

    let outcome = TransformationOutcome::from_reply(Direction::Decode, Ok(reply));
    assert_eq!(
        outcome.decoded().map(DecodedMessage::text),
        Some("Hello World")
    );
}

#[test]
fn error_body_of_a_rejection_is_kept() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once(
        "400 Bad Request",
        "Content-Type: application/json\r\n",
        br#"{"error":"unsupported scheme"}"#,
    );

    let reply = transport(&server)
        .send(&encode_request(&dir, "Hello"))
        .unwrap();
    handle.join().unwrap();

    assert_eq!(
        reply,
        ServiceReply::Rejected {
            status: 400,
            status_text: "Bad Request".to_string(),
            body: br#"{"error":"unsupported scheme"}"#.to_vec(),
        }
    );
    let outcome = TransformationOutcome::from_reply(Direction::Encode, Ok(reply));
    assert_eq!(
        outcome.failure().map(Failure::message),
        Some("unsupported scheme")
    );
}

#[test]
fn unparseable_rejection_synthesizes_the_status_line() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once(
        "500 Internal Server Error",
        "Content-Type: text/html\r\n",
        b"<h1>Internal Server Error</h1>",
    );

    let reply = transport(&server)
        .send(&encode_request(&dir, "Hello"))
        .unwrap();
    handle.join().unwrap();

    let outcome = TransformationOutcome::from_reply(Direction::Encode, Ok(reply));
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.kind(), ErrorKind::Service);
    assert_eq!(failure.message(), "Server error: 500 Internal Server Error");
}

#[test]
fn empty_success_body_is_reported() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("200 OK", "", b"");

    let reply = transport(&server)
        .send(&encode_request(&dir, "Hello"))
        .unwrap();
    handle.join().unwrap();

    let outcome = TransformationOutcome::from_reply(Direction::Encode, Ok(reply));
    assert_eq!(
        outcome.failure().map(Failure::message),
        Some("Empty response from server")
    );
}

#[test]
fn unreachable_service_is_a_transport_failure() {
    let dir = TempDir::new().unwrap();
    // bind and drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.select_file(
        Direction::Encode,
        SelectedFile::from_path(cover(&dir)).unwrap(),
    );
    let outcome = orchestrator
        .submit_encode(
            &transport(&format!("http://127.0.0.1:{port}")),
            "Hello",
            Scheme::Dct,
        )
        .unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.kind(), ErrorKind::Transport);
    assert_eq!(failure.message(), "Encoding failed");
}

#[test]
fn custom_reason_phrase_is_replaced_by_the_standard_one() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("503 Come Back Later", "", b"");

    let reply = transport(&server)
        .send(&encode_request(&dir, "Hello"))
        .unwrap();
    handle.join().unwrap();

    assert!(matches!(
        &reply,
        ServiceReply::Rejected { status: 503, status_text, .. } if status_text == "Service Unavailable"
    ));
    let outcome = TransformationOutcome::from_reply(Direction::Encode, Ok(reply));
    assert_eq!(
        outcome.failure().map(Failure::message),
        Some("Server error: 503 Service Unavailable")
    );
}
