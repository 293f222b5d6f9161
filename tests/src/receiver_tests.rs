//! Receiver poll-task tests: loopback decode, fault handling, relay

use std::sync::Arc;
use std::time::Duration;

use trainer_core::hal::mock::{ClosingLine, FlakyLine, LoopbackLine};
use trainer_core::hal::SignalLine;
use trainer_core::test_utils::keying::{pause, play, steps_for_pattern};
use trainer_core::{transmit, Receiver, SendSession, TimingProfile, TrainerConfig};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[tokio::test(start_paused = true)]
async fn test_loopback_round_trip() {
    crate::init_tracing();
    let config = TrainerConfig::new(20, 20);
    let line = LoopbackLine::new();
    let rx = Receiver::new(&config);
    let handle = rx.start(line.clone()).unwrap();

    let tx_line = line.clone();
    let session = Arc::new(SendSession::new());
    let tx_task = tokio::spawn({
        let session = Arc::clone(&session);
        async move {
            let mut tx_line = tx_line;
            transmit("SOS SOS", &config, &mut tx_line, &session).await
        }
    });
    tx_task.await.unwrap().unwrap();

    // idle long enough for the final character to commit
    tokio::time::sleep(ms(600)).await;
    rx.stop();
    handle.await.unwrap();

    assert_eq!(rx.decoded().trim_end(), "SOS SOS");
    assert!(!rx.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_second_start_is_rejected_while_running() {
    let rx = Receiver::default();
    let line = LoopbackLine::new();

    let handle = rx.start(line.clone()).unwrap();
    assert!(rx.start(line.clone()).is_none());

    rx.stop();
    handle.await.unwrap();

    // once stopped the receiver can be started again
    let handle = rx.start(line).unwrap();
    rx.stop();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_transient_read_failures_are_retried() {
    let config = TrainerConfig::new(20, 20);
    let inner = LoopbackLine::new();
    let rx = Receiver::new(&config);
    let handle = rx.start(FlakyLine::new(inner.clone(), 5)).unwrap();

    // let the flaky reads drain before keying
    tokio::time::sleep(ms(100)).await;

    let t = config.timing();
    let mut key = inner.clone();
    play(&mut key, &steps_for_pattern(".", &t)).await.unwrap();
    pause(&mut key, ms(200)).await.unwrap();

    rx.stop();
    handle.await.unwrap();
    assert_eq!(rx.decoded(), "E");
}

#[tokio::test(start_paused = true)]
async fn test_closed_line_stops_the_poll_task() {
    let rx = Receiver::default();
    let line = ClosingLine::new(LoopbackLine::new(), 3);

    let handle = rx.start(line).unwrap();
    handle.await.unwrap();
    assert!(!rx.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_level_changes_are_relayed_to_the_sounder() {
    crate::init_tracing();
    let rx = Receiver::default();
    let mut key = LoopbackLine::new();
    let sounder = LoopbackLine::new();

    let handle = rx.start_relayed(key.clone(), sounder.clone()).unwrap();

    key.assert_line().unwrap();
    tokio::time::sleep(ms(50)).await;
    assert!(sounder.is_asserted());

    key.deassert_line().unwrap();
    tokio::time::sleep(ms(50)).await;
    assert!(!sounder.is_asserted());

    rx.stop();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_hand_keying_off_speed_still_decodes() {
    // keyed at 22 WPM against a 20 WPM classifier
    let rx = Receiver::new(&TrainerConfig::new(20, 20));
    let mut key = LoopbackLine::new();
    let handle = rx.start(key.clone()).unwrap();

    let hand = TimingProfile::new(22, 22);
    play(&mut key, &steps_for_pattern(".-", &hand)).await.unwrap();
    pause(&mut key, ms(250)).await.unwrap();

    rx.stop();
    handle.await.unwrap();
    assert_eq!(rx.decoded(), "A");
}

#[tokio::test(start_paused = true)]
async fn test_clear_drops_decoded_text() {
    let config = TrainerConfig::new(20, 20);
    let rx = Receiver::new(&config);
    let mut key = LoopbackLine::new();
    let handle = rx.start(key.clone()).unwrap();

    let t = config.timing();
    play(&mut key, &steps_for_pattern("...", &t)).await.unwrap();
    pause(&mut key, ms(200)).await.unwrap();
    assert_eq!(rx.decoded(), "S");

    rx.clear();
    assert_eq!(rx.decoded(), "");
    assert_eq!(rx.pending_pattern(), "");

    rx.stop();
    handle.await.unwrap();
}
