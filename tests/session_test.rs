//! Session loop integration tests
//!
//! Runs the timer-driven session against scripted frame sources with a
//! short tick interval and verifies capture delivery, manual capture,
//! not-ready handling, and shutdown.

use docsnap::config::EngineConfig;
use docsnap::session::{report_outcome, Session};
use docsnap::testing::{document_frame, uniform_frame, ScriptedSource, SteadySource};
use docsnap::types::{CaptureTrigger, ProcessingOutcome};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn fast_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.session.frame_interval_ms = 10;
    config.session.buffer_size = 3;
    config.session.cooldown_ms = 10_000;
    config
}

#[tokio::test]
async fn test_auto_capture_delivered_on_channel() {
    let (capture_tx, mut capture_rx) = mpsc::channel(4);
    let source = SteadySource::new(document_frame(64, 64));

    let handle = Session::spawn(fast_config(), source, capture_tx).unwrap();
    handle.set_auto_capture(true);

    let capture = timeout(Duration::from_secs(5), capture_rx.recv())
        .await
        .expect("capture should arrive within the timeout")
        .expect("channel should stay open");

    assert_eq!(capture.event.sequence, 1);
    assert!(matches!(capture.event.trigger, CaptureTrigger::Auto { .. }));
    assert_eq!(capture.frame.width, 64);

    // Cooldown of 10s: exactly one capture in this window.
    let second = timeout(Duration::from_millis(200), capture_rx.recv()).await;
    assert!(second.is_err());

    handle.stop().await;
}

#[tokio::test]
async fn test_manual_capture_bypasses_gate() {
    let (capture_tx, mut capture_rx) = mpsc::channel(4);
    // A featureless scene that auto-capture would never accept.
    let source = SteadySource::new(uniform_frame(128, 128, 128));

    let handle = Session::spawn(fast_config(), source, capture_tx).unwrap();
    handle.capture_now();

    let capture = timeout(Duration::from_secs(5), capture_rx.recv())
        .await
        .expect("manual capture should arrive")
        .expect("channel should stay open");

    assert_eq!(capture.event.trigger, CaptureTrigger::Manual);
    handle.stop().await;
}

#[tokio::test]
async fn test_not_ready_source_produces_no_status() {
    let (capture_tx, mut capture_rx) = mpsc::channel(4);
    let source = ScriptedSource::new(vec![None, None, None]);

    let handle = Session::spawn(fast_config(), source, capture_tx).unwrap();
    handle.set_auto_capture(true);
    let status = handle.status();

    tokio::time::sleep(Duration::from_millis(100)).await;
    // Every tick was skipped: no status was ever published.
    assert!(status.borrow().is_none());
    assert!(capture_rx.try_recv().is_err());

    handle.stop().await;
}

#[tokio::test]
async fn test_status_published_while_analyzing() {
    let (capture_tx, _capture_rx) = mpsc::channel(4);
    let source = SteadySource::new(uniform_frame(32, 32, 200));

    let handle = Session::spawn(fast_config(), source, capture_tx).unwrap();
    let mut status = handle.status();

    timeout(Duration::from_secs(5), status.changed())
        .await
        .expect("status should be published")
        .unwrap();

    let current = status.borrow().clone().unwrap();
    assert!(current.window > 0);

    handle.stop().await;
}

#[tokio::test]
async fn test_invalid_config_rejected_at_spawn() {
    let mut config = fast_config();
    config.session.buffer_size = 0;

    let (capture_tx, _capture_rx) = mpsc::channel(4);
    let source = SteadySource::new(uniform_frame(8, 8, 0));
    assert!(Session::spawn(config, source, capture_tx).is_err());
}

#[tokio::test]
async fn test_session_survives_downstream_outcomes() {
    let (capture_tx, mut capture_rx) = mpsc::channel(1);
    let source = SteadySource::new(document_frame(64, 64));

    let mut config = fast_config();
    config.session.cooldown_ms = 0;
    let handle = Session::spawn(config, source, capture_tx).unwrap();
    handle.set_auto_capture(true);

    let first = timeout(Duration::from_secs(5), capture_rx.recv())
        .await
        .unwrap()
        .unwrap();
    // Downstream failure is reported and ignored; the loop keeps going.
    report_outcome(
        first.event.sequence,
        &ProcessingOutcome::TransportFailure {
            message: "connection refused".to_string(),
        },
    );

    let second = timeout(Duration::from_secs(5), capture_rx.recv())
        .await
        .expect("engine should keep capturing after a failed upload")
        .unwrap();
    assert!(second.event.sequence > first.event.sequence);

    handle.stop().await;
}
