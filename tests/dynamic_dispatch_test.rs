use ipn_verify::domain::ports::{VerificationTransport, VerificationTransportBox};
use ipn_verify::infrastructure::in_memory::RecordingTransport;
use ipn_verify::{Notification, NotificationVerifier, VerifierConfig};
use std::sync::Arc;

#[tokio::test]
async fn test_transport_as_trait_object() {
    let transport: VerificationTransportBox = Box::new(RecordingTransport::replying("INVALID"));

    // Verify Send + Sync by spawning a task
    let handle = tokio::spawn(async move { transport.post("http://x/", b"a=1").await.unwrap() });

    let response = handle.await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "INVALID");
}

#[tokio::test]
async fn test_shared_verifier_across_tasks() {
    let transport = RecordingTransport::replying("VERIFIED");
    let verifier = Arc::new(NotificationVerifier::with_transport(
        VerifierConfig::default(),
        Box::new(transport.clone()),
    )
    .unwrap());

    let mut handles = Vec::new();
    for i in 0..8 {
        let verifier = Arc::clone(&verifier);
        handles.push(tokio::spawn(async move {
            let notification = Notification::parse(format!("txn_id={i}"));
            verifier.verify(&notification).await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let mut bodies: Vec<Vec<u8>> = transport
        .requests()
        .await
        .into_iter()
        .map(|r| r.body)
        .collect();
    bodies.sort();
    let expected: Vec<Vec<u8>> = (0..8).map(|i| format!("txn_id={i}").into_bytes()).collect();
    assert_eq!(bodies, expected);
}

#[test]
fn test_verifier_keeps_frozen_config() {
    let config = VerifierConfig::new("https://ipn.example.test/webscr");
    let verifier = NotificationVerifier::with_transport(
        config.clone(),
        Box::new(RecordingTransport::replying("VERIFIED")),
    )
    .unwrap();
    assert_eq!(verifier.config(), &config);
}
