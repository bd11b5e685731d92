//! Exit status and output of the `foafname` binary against a local search
//! service.

use std::net::SocketAddr;
use std::process::Output;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::process::Command;

use foafname_core::MailboxId;

/// Answer searches with the first body and every other path with the second.
///
/// Bodies are built after binding since links must carry the address.
async fn serve(bodies: impl FnOnce(SocketAddr) -> (String, String)) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (search_body, profile_body) = bodies(addr);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let search_body = search_body.clone();
            let profile_body = profile_body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let (content_type, body) = if request.starts_with(b"GET /search?") {
                    ("application/json", search_body)
                } else {
                    ("application/rdf+xml", profile_body)
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    content_type,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn search_body(addr: SocketAddr) -> String {
    format!(r#"{{"entries": [{{"link": "http://{addr}/ada.rdf"}}]}}"#)
}

fn profile_body(email: &str, name: &str) -> String {
    format!(
        r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <foaf:Person>
    <foaf:name>{name}</foaf:name>
    <foaf:mbox_sha1sum>{}</foaf:mbox_sha1sum>
  </foaf:Person>
</rdf:RDF>"#,
        MailboxId::from_email(email)
    )
}

async fn run_foafname(addr: SocketAddr, email: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_foafname"))
        .arg("--endpoint")
        .arg(format!("http://{addr}/search"))
        .arg(email)
        .env_remove("FOAFNAME_PROXY")
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_resolved_name_exits_zero() {
    let email = "ada@example.org";
    let addr = serve(|addr| (search_body(addr), profile_body(email, "Ada Lovelace"))).await;

    let output = run_foafname(addr, email).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Ada Lovelace\n");
}

#[tokio::test]
async fn test_no_match_exits_one_and_logs_error() {
    let email = "ada@example.org";
    let addr = serve(|addr| {
        (
            search_body(addr),
            profile_body("charles@example.org", "Charles"),
        )
    })
    .await;

    let output = run_foafname(addr, email).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No person found for ada@example.org"), "{stderr}");
}
