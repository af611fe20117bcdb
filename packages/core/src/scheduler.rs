//! Sighting polling scheduler.
//!
//! Drives the main polling loop: each tick fetches the station position
//! and the observer's daylight window, evaluates whether the station is
//! overhead, and dispatches the matching email notification.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time;

use crate::alerts::email::{EmailNotifier, MailTransport};
use crate::sighting::evaluator;
use crate::sighting::provider::{DaylightProvider, IssPositionProvider};
use crate::sighting::types::{Coordinate, NotificationMessage, SightingOutcome, TimeOfDay};

/// Run the sighting polling loop.
///
/// On each tick:
/// 1. Fetch the station position and the daylight window
/// 2. Evaluate containment against the tolerance box
/// 3. Night + overhead sends "Look Up!", day + overhead sends the
///    daytime variant, anything else just logs
///
/// Errors from either provider are logged and the loop continues; a
/// single failed poll never takes down the scheduler. Repeated
/// notifications across cycles are not deduplicated.
///
/// Runs until `Ctrl+C` (SIGINT) is received.
pub async fn run_sighting_loop<T: MailTransport>(
    position_provider: Arc<dyn IssPositionProvider + Send + Sync>,
    daylight_provider: Arc<dyn DaylightProvider + Send + Sync>,
    notifier: EmailNotifier<T>,
    observer: Coordinate,
    tolerance_degrees: f64,
    poll_interval_seconds: u64,
) {
    let mut interval = time::interval(Duration::from_secs(poll_interval_seconds));

    tracing::info!(
        "Sighting polling started (interval: {}s, observer: {}, tolerance: {} deg)",
        poll_interval_seconds,
        observer,
        tolerance_degrees
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                poll_once(
                    &position_provider,
                    &daylight_provider,
                    &notifier,
                    observer,
                    tolerance_degrees,
                    TimeOfDay::now_utc(),
                ).await;
            }

            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received. Stopping polling.");
                break;
            }
        }
    }

    tracing::info!("Sighting polling stopped cleanly");
}

/// Execute a single poll cycle. Extracted for testability; the current
/// time-of-day is injected so tests can pin the day/night branch.
async fn poll_once<T: MailTransport>(
    position_provider: &Arc<dyn IssPositionProvider + Send + Sync>,
    daylight_provider: &Arc<dyn DaylightProvider + Send + Sync>,
    notifier: &EmailNotifier<T>,
    observer: Coordinate,
    tolerance_degrees: f64,
    now: TimeOfDay,
) {
    // 1. Fetch the station position
    let iss = match position_provider.fetch_position().await {
        Ok(position) => position,
        Err(err) => {
            tracing::error!(
                "{} fetch failed, skipping this cycle: {}",
                position_provider.provider_name(),
                err
            );
            return;
        }
    };

    // 2. Fetch the daylight window for the observer
    let window = match daylight_provider.fetch_daylight(observer).await {
        Ok(window) => window,
        Err(err) => {
            tracing::error!(
                "{} fetch failed, skipping this cycle: {}",
                daylight_provider.provider_name(),
                err
            );
            return;
        }
    };

    // 3. Evaluate and notify
    match evaluator::evaluate(observer, iss, window, now, tolerance_degrees) {
        SightingOutcome::OverheadNight => {
            tracing::info!("ISS is close to your current location, look up");
            notifier.notify(&NotificationMessage::look_up()).await;
        }
        SightingOutcome::OverheadDaylight => {
            tracing::info!("It's daytime, the ISS might not be visible");
            notifier.notify(&NotificationMessage::daytime()).await;
        }
        SightingOutcome::NotOverhead => {
            tracing::info!("ISS is not close to your current location");
        }
    }

    tracing::info!("Your position: {}", observer);
    tracing::info!("ISS position: {}", iss);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::alerts::email::NotifyError;
    use crate::sighting::provider::{ProviderError, ProviderResult};
    use crate::sighting::types::DaylightWindow;

    struct MockPositions(Option<Coordinate>);

    #[async_trait]
    impl IssPositionProvider for MockPositions {
        async fn fetch_position(&self) -> ProviderResult<Coordinate> {
            self.0.ok_or(ProviderError::ServiceUnavailable)
        }

        fn provider_name(&self) -> &str {
            "mock-positions"
        }
    }

    struct MockDaylight(Option<DaylightWindow>);

    #[async_trait]
    impl DaylightProvider for MockDaylight {
        async fn fetch_daylight(&self, _observer: Coordinate) -> ProviderResult<DaylightWindow> {
            self.0.ok_or(ProviderError::ServiceUnavailable)
        }

        fn provider_name(&self) -> &str {
            "mock-daylight"
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn submit(&self, subject: &str, _body: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(subject.to_string());
            Ok(())
        }
    }

    fn day_window() -> DaylightWindow {
        DaylightWindow {
            sunrise: TimeOfDay::new(6, 0),
            sunset: TimeOfDay::new(18, 0),
        }
    }

    fn providers(
        position: Option<Coordinate>,
        window: Option<DaylightWindow>,
    ) -> (
        Arc<dyn IssPositionProvider + Send + Sync>,
        Arc<dyn DaylightProvider + Send + Sync>,
    ) {
        (
            Arc::new(MockPositions(position)),
            Arc::new(MockDaylight(window)),
        )
    }

    fn recording_notifier() -> (
        Arc<RecordingTransport>,
        EmailNotifier<Arc<RecordingTransport>>,
    ) {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = EmailNotifier::new(transport.clone());
        (transport, notifier)
    }

    const OBSERVER: Coordinate = Coordinate {
        latitude: -8.6399,
        longitude: 61.3399,
    };

    #[tokio::test]
    async fn overhead_at_night_sends_look_up() {
        let iss = Coordinate::new(OBSERVER.latitude + 1.0, OBSERVER.longitude - 1.0);
        let (positions, daylight) = providers(Some(iss), Some(day_window()));
        let (transport, notifier) = recording_notifier();

        poll_once(
            &positions,
            &daylight,
            &notifier,
            OBSERVER,
            5.0,
            TimeOfDay::new(23, 0),
        )
        .await;

        assert_eq!(transport.sent.lock().unwrap().as_slice(), ["Look Up!"]);
    }

    #[tokio::test]
    async fn overhead_at_midday_sends_daytime_alert() {
        let iss = Coordinate::new(OBSERVER.latitude + 1.0, OBSERVER.longitude - 1.0);
        let (positions, daylight) = providers(Some(iss), Some(day_window()));
        let (transport, notifier) = recording_notifier();

        poll_once(
            &positions,
            &daylight,
            &notifier,
            OBSERVER,
            5.0,
            TimeOfDay::new(12, 0),
        )
        .await;

        assert_eq!(transport.sent.lock().unwrap().as_slice(), ["Daytime Alert"]);
    }

    #[tokio::test]
    async fn distant_station_sends_nothing() {
        let iss = Coordinate::new(40.0, -120.0);
        let (positions, daylight) = providers(Some(iss), Some(day_window()));
        let (transport, notifier) = recording_notifier();

        poll_once(
            &positions,
            &daylight,
            &notifier,
            OBSERVER,
            5.0,
            TimeOfDay::new(23, 0),
        )
        .await;

        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn position_fetch_failure_skips_the_cycle() {
        let (positions, daylight) = providers(None, Some(day_window()));
        let (transport, notifier) = recording_notifier();

        poll_once(
            &positions,
            &daylight,
            &notifier,
            OBSERVER,
            5.0,
            TimeOfDay::new(23, 0),
        )
        .await;

        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn daylight_fetch_failure_skips_the_cycle() {
        let iss = Coordinate::new(OBSERVER.latitude, OBSERVER.longitude);
        let (positions, daylight) = providers(Some(iss), None);
        let (transport, notifier) = recording_notifier();

        poll_once(
            &positions,
            &daylight,
            &notifier,
            OBSERVER,
            5.0,
            TimeOfDay::new(23, 0),
        )
        .await;

        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn two_overhead_cycles_notify_twice() {
        // No deduplication across cycles: conditions holding for two
        // consecutive polls produce two emails.
        let iss = Coordinate::new(OBSERVER.latitude, OBSERVER.longitude);
        let (positions, daylight) = providers(Some(iss), Some(day_window()));
        let (transport, notifier) = recording_notifier();

        for _ in 0..2 {
            poll_once(
                &positions,
                &daylight,
                &notifier,
                OBSERVER,
                5.0,
                TimeOfDay::new(23, 0),
            )
            .await;
        }

        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }
}
