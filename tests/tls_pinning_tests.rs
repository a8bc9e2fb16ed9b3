use ipn_verify::{IpnError, Notification, NotificationVerifier, VerifierConfig};
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyPair, KeyUsagePurpose,
};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::{self, ServerConfig};

const PATH: &str = "/cgi-bin/webscr";
const PAYLOAD: &str = "payment_status=Completed&txn_id=61E67681CH3238416";

struct TestCa {
    cert: Certificate,
    key: KeyPair,
}

impl TestCa {
    fn generate(name: &str) -> Self {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params.distinguished_name.push(DnType::CommonName, name);
        params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
        let cert = params.self_signed(&key).unwrap();
        Self { cert, key }
    }

    fn pem(&self) -> String {
        self.cert.pem()
    }

    /// Server config presenting a `localhost` / `127.0.0.1` leaf issued by this CA.
    fn server_config(&self) -> ServerConfig {
        let leaf_key = KeyPair::generate().unwrap();
        let mut params =
            CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
                .unwrap();
        params.distinguished_name.push(DnType::CommonName, "localhost");
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
        let leaf = params.signed_by(&leaf_key, &self.cert, &self.key).unwrap();

        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(leaf_key.serialize_der()));
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![leaf.der().clone()], key)
            .unwrap()
    }
}

/// Serves `VERIFIED` over TLS and forwards every received body.
async fn start_tls_endpoint(ca: &TestCa) -> (SocketAddr, mpsc::UnboundedReceiver<Vec<u8>>) {
    let acceptor = TlsAcceptor::from(Arc::new(ca.server_config()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (bodies, received) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let bodies = bodies.clone();
            tokio::spawn(async move {
                // A client that rejects the certificate ends the handshake here.
                let Ok(mut stream) = acceptor.accept(socket).await else {
                    return;
                };
                let body = read_request_body(&mut stream).await;
                let _ = bodies.send(body);
                let response = "HTTP/1.1 200 OK\r\n\
                                Content-Type: text/plain\r\n\
                                Content-Length: 8\r\n\
                                Connection: close\r\n\
                                \r\n\
                                VERIFIED";
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (addr, received)
}

async fn read_request_body<S: AsyncRead + Unpin>(stream: &mut S) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + length {
                return buf[start..start + length].to_vec();
            }
        }
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return Vec::new(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn endpoint(addr: SocketAddr) -> String {
    format!("https://127.0.0.1:{}{PATH}", addr.port())
}

#[tokio::test]
async fn test_pinned_ca_accepts_its_server() {
    let ca = TestCa::generate("ipn-verify test CA");
    let (addr, mut received) = start_tls_endpoint(&ca).await;

    let config = VerifierConfig::new(endpoint(addr)).with_ca_bundle_pem(ca.pem());
    let verifier = NotificationVerifier::new(config).unwrap();

    assert!(verifier.verify(&Notification::parse(PAYLOAD)).await.unwrap());
    assert_eq!(received.recv().await.unwrap(), PAYLOAD.as_bytes());
}

#[tokio::test]
async fn test_pinned_ca_file_accepts_its_server() {
    let ca = TestCa::generate("ipn-verify test CA");
    let (addr, _received) = start_tls_endpoint(&ca).await;

    let mut bundle = tempfile::NamedTempFile::new().unwrap();
    bundle.write_all(ca.pem().as_bytes()).unwrap();

    let config = VerifierConfig::new(endpoint(addr)).with_ca_bundle_file(bundle.path());
    let verifier = NotificationVerifier::new(config).unwrap();

    assert!(verifier.verify(&Notification::parse(PAYLOAD)).await.unwrap());
}

#[tokio::test]
async fn test_unrelated_ca_is_refused() {
    let server_ca = TestCa::generate("server CA");
    let other_ca = TestCa::generate("unrelated CA");
    let (addr, _received) = start_tls_endpoint(&server_ca).await;

    let config = VerifierConfig::new(endpoint(addr)).with_ca_bundle_pem(other_ca.pem());
    let verifier = NotificationVerifier::new(config).unwrap();

    let result = verifier.verify(&Notification::parse(PAYLOAD)).await;
    assert!(matches!(result, Err(IpnError::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_bundled_roots_refuse_private_ca() {
    let ca = TestCa::generate("ipn-verify test CA");
    let (addr, _received) = start_tls_endpoint(&ca).await;

    let verifier = NotificationVerifier::new(VerifierConfig::new(endpoint(addr))).unwrap();

    let result = verifier.verify(&Notification::parse(PAYLOAD)).await;
    assert!(matches!(result, Err(IpnError::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_skipped_verification_connects_to_any_server() {
    let ca = TestCa::generate("ipn-verify test CA");
    let (addr, _received) = start_tls_endpoint(&ca).await;

    let config = VerifierConfig::new(endpoint(addr)).danger_skip_tls_verification();
    let verifier = NotificationVerifier::new(config).unwrap();

    assert!(verifier.verify(&Notification::parse(PAYLOAD)).await.unwrap());
}
