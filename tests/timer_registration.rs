// tests/timer_registration.rs

use std::time::Duration;

use tokio::time::Instant;

use linksync::engine::RecurringTimer;

#[test]
fn register_and_unregister_are_idempotent() {
    let now = Instant::now();
    let mut timer = RecurringTimer::new();
    assert!(!timer.is_registered());
    assert!(!timer.unregister());

    assert!(timer.register_recurring(Duration::from_secs(1), now));
    assert!(timer.is_registered());
    // A second registration keeps the original schedule.
    assert!(!timer.register_recurring(Duration::from_secs(30), now));
    assert_eq!(timer.next_due(), Some(now + Duration::from_secs(1)));

    assert!(timer.unregister());
    assert!(!timer.unregister());
    assert!(!timer.is_registered());
}

#[test]
fn fire_uses_the_returned_delay_for_the_next_call() {
    let start = Instant::now();
    let mut timer = RecurringTimer::new();
    timer.register_recurring(Duration::from_millis(500), start);

    let mut calls = 0;
    assert_eq!(
        timer.fire(start + Duration::from_millis(100), || {
            calls += 1;
            Duration::from_millis(200)
        }),
        None
    );
    assert_eq!(calls, 0);

    let t1 = start + Duration::from_millis(500);
    let delay = timer.fire(t1, || {
        calls += 1;
        Duration::from_millis(200)
    });
    assert_eq!(delay, Some(Duration::from_millis(200)));
    assert_eq!(calls, 1);
    assert_eq!(timer.next_due(), Some(t1 + Duration::from_millis(200)));
}

#[test]
fn unregistered_timer_never_fires() {
    let now = Instant::now();
    let mut timer = RecurringTimer::new();
    timer.register_recurring(Duration::ZERO, now);
    timer.unregister();

    let fired = timer.fire(now + Duration::from_secs(10), || Duration::from_secs(1));
    assert_eq!(fired, None);
}
