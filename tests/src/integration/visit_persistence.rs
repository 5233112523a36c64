//! # Visit Persistence Across Runs
//!
//! Each `whoami` run is a fresh runtime; only the cookie jar file carries the
//! count from one run to the next.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use shared_types::{FieldId, RecordingDisplay, LOCALE_DATETIME_FORMAT};
    use wai_02_visit_counter::domain::{
        COOKIES_DISABLED, FIRST_VISIT, UNREADABLE_COUNT, UNREADABLE_HINT,
    };
    use wai_02_visit_counter::{CookieJar, DisabledCookieJar, FileCookieJar, FixedClock};

    use crate::integration::fixtures::RuntimeFixture;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    async fn run_once(jar_path: &Path, clock: &Arc<FixedClock>) -> RecordingDisplay {
        let mut fixture = RuntimeFixture::bare_host();
        fixture.jar = Arc::new(FileCookieJar::with_clock(jar_path, clock.clone()));
        fixture.clock = clock.clone();
        let display = RecordingDisplay::new();
        fixture.build().run(&display).await;
        display
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_survives_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let jar_path = dir.path().join("cookies");
        let clock = Arc::new(FixedClock::new(t0()));

        let first = run_once(&jar_path, &clock).await;
        assert_eq!(first.latest(FieldId::VisitCount).as_deref(), Some("1 time"));
        assert_eq!(first.latest(FieldId::LastVisit).as_deref(), Some(FIRST_VISIT));

        clock.advance(Duration::hours(3));
        let second = run_once(&jar_path, &clock).await;
        assert_eq!(second.latest(FieldId::VisitCount).as_deref(), Some("2 times"));
        let expected = t0()
            .with_timezone(&Local)
            .format(LOCALE_DATETIME_FORMAT)
            .to_string();
        assert_eq!(second.latest(FieldId::LastVisit), Some(expected));

        clock.advance(Duration::minutes(1));
        let third = run_once(&jar_path, &clock).await;
        assert_eq!(third.latest(FieldId::VisitCount).as_deref(), Some("3 times"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cookie_expires_after_a_year() {
        let dir = tempfile::tempdir().unwrap();
        let jar_path = dir.path().join("cookies");
        let clock = Arc::new(FixedClock::new(t0()));

        run_once(&jar_path, &clock).await;
        run_once(&jar_path, &clock).await;

        clock.advance(Duration::days(366));
        let display = run_once(&jar_path, &clock).await;
        assert_eq!(display.latest(FieldId::VisitCount).as_deref(), Some("1 time"));
        assert_eq!(display.latest(FieldId::LastVisit).as_deref(), Some(FIRST_VISIT));
    }

    #[tokio::test(start_paused = true)]
    async fn test_corrupt_record_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let jar_path = dir.path().join("cookies");
        let clock = Arc::new(FixedClock::new(t0()));

        let jar = FileCookieJar::with_clock(&jar_path, clock.clone());
        jar.set_cookie("whoami_visit=%7Bnot-json; path=/; max-age=3600; samesite=Lax")
            .unwrap();

        let display = run_once(&jar_path, &clock).await;
        assert_eq!(
            display.latest(FieldId::VisitCount).as_deref(),
            Some(UNREADABLE_COUNT)
        );
        assert_eq!(display.latest(FieldId::LastVisit).as_deref(), Some(UNREADABLE_HINT));
        assert_eq!(display.latest(FieldId::Ip).as_deref(), Some("Unavailable"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_cookies_fill_both_rows() {
        let mut fixture = RuntimeFixture::bare_host();
        fixture.jar = Arc::new(DisabledCookieJar);
        let display = RecordingDisplay::new();

        let summary = fixture.build().run(&display).await;

        assert_eq!(summary.visit.count(), None);
        assert_eq!(
            display.latest(FieldId::VisitCount).as_deref(),
            Some(COOKIES_DISABLED)
        );
        assert_eq!(
            display.latest(FieldId::LastVisit).as_deref(),
            Some(COOKIES_DISABLED)
        );
    }
}
