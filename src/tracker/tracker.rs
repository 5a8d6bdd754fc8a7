use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::TrackerError;
use super::positions::recompute;
use super::session::{Session, SessionError, SessionStore};
use super::types::{ObservingTime, TrackedObject};
use crate::astro::Location;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TrackerStatus {
    pub location: Option<Location>,
    pub observing_time: ObservingTime,
    /// Timestamp the current `ha`/`alt` values were computed for.
    pub computed_for: Option<DateTime<Utc>>,
    pub objects: Vec<TrackedObject>,
}

#[derive(Debug)]
struct Shared {
    session: Session,
    location: Option<Location>,
    computed_for: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Owns the tracking list and the periodic position updates.
pub struct Tracker {
    shared: Arc<StdMutex<Shared>>,
    store: Option<SessionStore>,
    worker: Option<WorkerHandle>,
}

impl Tracker {
    pub fn new(session: Session, location: Option<Location>, store: Option<SessionStore>) -> Self {
        Self {
            shared: Arc::new(StdMutex::new(Shared {
                session,
                location,
                computed_for: None,
            })),
            store,
            worker: None,
        }
    }

    pub fn status(&self) -> TrackerStatus {
        let locked = lock(&self.shared);
        TrackerStatus {
            location: locked.location,
            observing_time: locked.session.observing_time.clone(),
            computed_for: locked.computed_for,
            objects: locked.session.tracking.clone(),
        }
    }

    pub fn location(&self) -> Option<Location> {
        lock(&self.shared).location
    }

    /// Sets the observer location. The location is only ever set once.
    pub fn set_location(&self, location: Location) -> Result<(), TrackerError> {
        let mut locked = lock(&self.shared);
        if locked.location.is_some() {
            return Err(TrackerError::LocationAlreadySet);
        }
        log::info!("Observer location set to {:.4}, {:.4}", location.lat, location.lon);
        locked.location = Some(location);
        Ok(())
    }

    pub fn observing_time(&self) -> ObservingTime {
        lock(&self.shared).session.observing_time.clone()
    }

    /// Freezes the observing time at the parsed `custom_time`.
    /// Blank input leaves the current mode unchanged.
    pub fn fix_time(&self, custom_time: &str) -> Result<ObservingTime, TrackerError> {
        let Some(fixed) = ObservingTime::parse_fixed(custom_time)? else {
            return Ok(self.observing_time());
        };
        log::info!("Observing time fixed at {}", custom_time.trim());
        self.update_session(|session| session.observing_time = fixed.clone());
        Ok(fixed)
    }

    pub fn use_live_clock(&self) -> ObservingTime {
        log::info!("Observing time follows the live clock");
        self.update_session(|session| session.observing_time = ObservingTime::Live);
        ObservingTime::Live
    }

    pub fn add(&self, object: TrackedObject) {
        log::info!("Tracking {} ({})", object.name, object.id);
        self.update_session(|session| session.tracking.push(object));
    }

    /// Removes the object at `index`, keeping the order of the others.
    pub fn remove(&self, index: usize) -> Result<TrackedObject, TrackerError> {
        let removed = {
            let mut locked = lock(&self.shared);
            if index >= locked.session.tracking.len() {
                return Err(TrackerError::NotFound(index));
            }
            locked.session.tracking.remove(index)
        };
        log::info!("Stopped tracking {} ({})", removed.name, removed.id);
        self.persist();
        Ok(removed)
    }

    /// Hour angle and altitude of every tracked object at `at`, without
    /// touching the live list.
    pub fn positions_at(&self, at: DateTime<Utc>) -> Result<Vec<TrackedObject>, TrackerError> {
        let locked = lock(&self.shared);
        let location = locked.location.ok_or(TrackerError::LocationUnavailable)?;
        let mut objects = locked.session.tracking.clone();
        recompute(&mut objects, location, at);
        Ok(objects)
    }

    pub fn save(&self) -> Result<(), SessionError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let session = lock(&self.shared).session.clone();
        store.save(&session)
    }

    pub fn start(&mut self, period: Duration) -> Result<(), TrackerError> {
        if self.worker.is_some() {
            return Err(TrackerError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_update_loop(shared, period, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        log::info!("Position updates every {}", humantime::format_duration(period));
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
    }

    fn update_session(&self, f: impl FnOnce(&mut Session)) {
        f(&mut lock(&self.shared).session);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save session: {}", e);
        }
    }
}

fn lock(shared: &StdMutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_update_loop(
    shared: Arc<StdMutex<Shared>>,
    period: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }

        update_positions(&mut lock(&shared), Utc::now());
    }
}

/// One tick. Does nothing until a location is known and something is tracked.
fn update_positions(shared: &mut Shared, now: DateTime<Utc>) -> bool {
    let Some(location) = shared.location else {
        return false;
    };
    if shared.session.tracking.is_empty() {
        return false;
    }

    let at = shared.session.observing_time.resolve(now);
    recompute(&mut shared.session.tracking, location, at);
    shared.computed_for = Some(at);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn object(id: &str, ra: f64, dec: f64) -> TrackedObject {
        TrackedObject {
            id: id.into(),
            name: id.into(),
            ra_deg: Some(ra),
            dec_deg: Some(dec),
            ra: None,
            dec: format!("{dec}"),
            ha: "--".into(),
            alt: "--".into(),
            max_altitude_deg: "45.0°".into(),
            transit_time_local: "2025-05-01T23:00:00+00:00".into(),
            timezone: None,
        }
    }

    fn session(ids: &[&str]) -> Session {
        Session {
            tracking: ids
                .iter()
                .enumerate()
                .map(|(i, id)| object(id, i as f64 * 40.0, 10.0))
                .collect(),
            observing_time: ObservingTime::Live,
        }
    }

    fn berlin() -> Location {
        Location { lat: 52.52, lon: 13.405 }
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let tracker = Tracker::new(session(&["a", "b", "c", "d"]), None, None);

        let removed = tracker.remove(1).unwrap();

        assert_eq!(removed.id, "b");
        let ids: Vec<_> = tracker.status().objects.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn remove_out_of_range_is_not_found() {
        let tracker = Tracker::new(session(&["a"]), None, None);
        assert!(matches!(tracker.remove(1), Err(TrackerError::NotFound(1))));
        assert_eq!(tracker.status().objects.len(), 1);
    }

    #[test]
    fn location_is_set_once() {
        let tracker = Tracker::new(Session::default(), None, None);
        tracker.set_location(berlin()).unwrap();
        assert!(matches!(
            tracker.set_location(Location { lat: 0.0, lon: 0.0 }),
            Err(TrackerError::LocationAlreadySet)
        ));
        assert_eq!(tracker.location(), Some(berlin()));
    }

    #[test]
    fn no_updates_without_location_or_objects() {
        let now = Utc::now();

        let mut without_location = Shared {
            session: session(&["a"]),
            location: None,
            computed_for: None,
        };
        assert!(!update_positions(&mut without_location, now));
        assert_eq!(without_location.session.tracking[0].ha, "--");

        let mut without_objects = Shared {
            session: Session::default(),
            location: Some(berlin()),
            computed_for: None,
        };
        assert!(!update_positions(&mut without_objects, now));
        assert_eq!(without_objects.computed_for, None);
    }

    #[test]
    fn fixed_time_drives_the_update() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 22, 0, 0).unwrap();
        let mut shared = Shared {
            session: Session {
                observing_time: ObservingTime::Fixed {
                    custom_time: at.to_rfc3339(),
                    at,
                },
                ..session(&["a", "b"])
            },
            location: Some(berlin()),
            computed_for: None,
        };

        assert!(update_positions(&mut shared, Utc::now()));
        assert_eq!(shared.computed_for, Some(at));

        let mut expected = session(&["a", "b"]).tracking;
        recompute(&mut expected, berlin(), at);
        assert_eq!(shared.session.tracking, expected);
    }

    #[test]
    fn toggling_time_mode_keeps_added_objects() {
        let tracker = Tracker::new(session(&["a", "b"]), Some(berlin()), None);
        let before = tracker.status().objects;

        tracker.fix_time("2025-05-01T22:00:00Z").unwrap();
        tracker.use_live_clock();

        assert_eq!(tracker.status().objects, before);
        assert_eq!(tracker.observing_time(), ObservingTime::Live);
    }

    #[test]
    fn blank_custom_time_keeps_mode() {
        let tracker = Tracker::new(Session::default(), None, None);
        tracker.fix_time("2025-05-01T22:00:00Z").unwrap();
        let kept = tracker.fix_time("").unwrap();
        assert!(matches!(kept, ObservingTime::Fixed { .. }));
    }

    #[test]
    fn positions_at_leaves_live_list_alone() {
        let tracker = Tracker::new(session(&["a"]), Some(berlin()), None);
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 22, 0, 0).unwrap();

        let snapshot = tracker.positions_at(at).unwrap();

        assert_ne!(snapshot[0].alt, "--");
        assert_eq!(tracker.status().objects[0].alt, "--");
    }

    #[test]
    fn positions_at_needs_location() {
        let tracker = Tracker::new(session(&["a"]), None, None);
        assert!(matches!(
            tracker.positions_at(Utc::now()),
            Err(TrackerError::LocationUnavailable)
        ));
    }

    #[tokio::test]
    async fn worker_updates_until_stopped() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 22, 0, 0).unwrap();
        let mut tracker = Tracker::new(
            Session {
                observing_time: ObservingTime::Fixed {
                    custom_time: at.to_rfc3339(),
                    at,
                },
                ..session(&["a"])
            },
            Some(berlin()),
            None,
        );

        tracker.start(Duration::from_millis(20)).unwrap();
        assert!(matches!(
            tracker.start(Duration::from_millis(20)),
            Err(TrackerError::AlreadyRunning)
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tracker.stop().await;

        let status = tracker.status();
        assert_eq!(status.computed_for, Some(at));
        assert_ne!(status.objects[0].ha, "--");
        assert_ne!(status.objects[0].alt, "--");
    }
}
