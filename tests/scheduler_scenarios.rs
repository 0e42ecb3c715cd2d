// tests/scheduler_scenarios.rs

mod common;
use crate::common::fakes::RecordingHost;
use crate::common::init_tracing;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use linksync::engine::{CheckKind, PollConfig, PollScheduler, SchedulerState};
use linksync::fs::mock::MockFileSystem;
use linksync::host::NoticeLevel;
use linksync::types::PollMode;

const NOW: f64 = 1_000.0;

fn scheduler(fs: &MockFileSystem, interval: f64, mode: PollMode) -> PollScheduler {
    PollScheduler::new(PollConfig::new(interval, mode), Arc::new(fs.clone()))
}

/// Mock filesystem with `/proj/a.lib` and `/proj/b.lib`, both linked.
fn two_linked_files() -> (MockFileSystem, RecordingHost) {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/proj/a.lib", b"aaaa".to_vec(), 10.0);
    fs.add_file("/proj/b.lib", b"bbbb".to_vec(), 10.0);

    let host = RecordingHost::new();
    host.link("a", "/proj/a.lib");
    host.link("b", "/proj/b.lib");
    (fs, host)
}

#[test]
fn stopped_tick_is_an_idle_heartbeat() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 3.0, PollMode::Aggressive);

    let outcome = sched.tick(&host, NOW);

    assert_eq!(outcome.check, CheckKind::Idle);
    assert_eq!(outcome.next_delay, Duration::from_secs_f64(3.0));
    assert!(outcome.report.is_empty());
    assert!(sched.watched().is_empty());
    assert_eq!(fs.prefix_reads(), 0);
    assert_eq!(host.redraws(), 0);
}

#[test]
fn aggressive_mode_polls_lightly_before_the_interval() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 5.0, PollMode::Aggressive);
    sched.start(&host, NOW - 1.0);

    let outcome = sched.tick(&host, NOW);

    assert_eq!(outcome.check, CheckKind::Lightweight);
    assert_eq!(outcome.next_delay, Duration::from_secs_f64(0.2));
    // Lightweight polls never move the full-check cadence.
    assert_eq!(sched.config().last_check_time, NOW - 1.0);
}

#[test]
fn direct_mode_runs_a_full_check_once_the_interval_elapsed() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 5.0, PollMode::Direct);
    sched.start(&host, NOW - 6.0);

    let outcome = sched.tick(&host, NOW);

    assert_eq!(outcome.check, CheckKind::Full);
    assert_eq!(sched.config().last_check_time, NOW);
    assert_eq!(outcome.next_delay, Duration::from_secs(5));
}

#[test]
fn direct_mode_skips_before_the_interval_even_if_files_changed() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 5.0, PollMode::Direct);
    sched.start(&host, NOW);
    fs.set_mtime("/proj/a.lib", 11.0);

    let early = sched.tick(&host, NOW + 1.0);
    assert_eq!(early.check, CheckKind::Skipped);
    assert!(early.report.is_empty());

    let due = sched.tick(&host, NOW + 5.0);
    assert_eq!(due.check, CheckKind::Full);
    assert_eq!(due.report.succeeded, vec!["a".to_string()]);
    assert_eq!(host.redraws(), 1);
}

#[test]
fn full_check_reloads_only_changed_files_and_refreshes_the_cache() {
    let (fs, host) = two_linked_files();
    let c = host.link("c", "/proj/c.lib");
    fs.add_file("/proj/c.lib", b"c".to_vec(), 10.0);
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);
    sched.start(&host, NOW);

    fs.set_content("/proj/c.lib", b"cc".to_vec());
    let first = sched.tick(&host, NOW + 1.0);
    assert_eq!(first.report.succeeded, vec!["c".to_string()]);
    assert_eq!(c.reloads(), 1);
    assert_eq!(sched.watched().get(Path::new("/proj/c.lib")).unwrap().size, 2);

    // Nothing moved since the cache swap.
    let second = sched.tick(&host, NOW + 2.0);
    assert_eq!(second.check, CheckKind::Full);
    assert!(second.report.is_empty());
    assert_eq!(c.reloads(), 1);
}

#[test]
fn lightweight_poll_busts_every_cached_path_and_detects_changes() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 5.0, PollMode::Aggressive);
    sched.start(&host, NOW);
    let after_start = fs.prefix_reads();
    assert_eq!(after_start, 2);

    fs.set_mtime("/proj/b.lib", 12.0);
    let outcome = sched.tick(&host, NOW + 0.2);

    assert_eq!(outcome.check, CheckKind::Lightweight);
    assert_eq!(fs.prefix_reads() - after_start, 2);
    assert_eq!(outcome.report.succeeded, vec!["b".to_string()]);
    assert_eq!(sched.config().last_check_time, NOW);
}

#[test]
fn cache_bust_failures_do_not_block_detection() {
    let (fs, host) = two_linked_files();
    fs.fail_cache_bust("/proj/a.lib");
    let mut sched = scheduler(&fs, 5.0, PollMode::Aggressive);
    sched.start(&host, NOW);

    fs.set_mtime("/proj/a.lib", 20.0);
    let outcome = sched.tick(&host, NOW + 0.2);

    assert_eq!(outcome.report.succeeded, vec!["a".to_string()]);
    assert!(host.errors().is_empty());
}

#[test]
fn direct_mode_never_busts_the_cache() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);
    sched.start(&host, NOW);
    sched.tick(&host, NOW + 1.0);
    sched.force_check(&host, NOW + 1.5);

    assert_eq!(fs.prefix_reads(), 0);
}

#[test]
fn newly_linked_files_get_a_baseline_before_being_reloaded() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);
    sched.start(&host, NOW);

    fs.add_file("/proj/new.lib", b"n".to_vec(), 50.0);
    let fresh = host.link("new", "/proj/new.lib");

    let first = sched.tick(&host, NOW + 1.0);
    assert!(first.report.is_empty());
    assert!(sched.watched().contains(Path::new("/proj/new.lib")));

    fs.set_mtime("/proj/new.lib", 51.0);
    let second = sched.tick(&host, NOW + 2.0);
    assert_eq!(second.report.succeeded, vec!["new".to_string()]);
    assert_eq!(fresh.reloads(), 1);
}

#[test]
fn removed_files_drop_out_silently() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);
    sched.start(&host, NOW);

    fs.remove("/proj/a.lib");
    let outcome = sched.tick(&host, NOW + 1.0);

    assert!(outcome.report.is_empty());
    assert!(!sched.watched().contains(Path::new("/proj/a.lib")));
    assert_eq!(sched.watched().len(), 1);
    assert!(host.errors().is_empty());
}

#[test]
fn stop_and_restart_takes_a_new_baseline() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);

    sched.start(&host, NOW);
    assert_eq!(sched.state(), SchedulerState::Running);
    assert!(host.has_notice("monitoring started"));

    sched.stop(&host);
    assert_eq!(sched.state(), SchedulerState::Stopped);
    assert_eq!(sched.config().last_check_time, 0.0);
    assert!(host.has_notice("monitoring stopped"));

    // Edited while stopped: the next start treats it as the new baseline.
    fs.set_mtime("/proj/a.lib", 99.0);
    assert_eq!(sched.tick(&host, NOW + 10.0).check, CheckKind::Idle);

    sched.toggle(&host, NOW + 20.0);
    assert_eq!(sched.state(), SchedulerState::Running);
    let outcome = sched.tick(&host, NOW + 21.0);
    assert_eq!(outcome.check, CheckKind::Full);
    assert!(outcome.report.is_empty());
}

#[test]
fn settings_survive_stop_start_cycles() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);
    sched.set_interval(7.5);
    sched.set_mode(PollMode::Aggressive);

    sched.start(&host, NOW);
    sched.stop(&host);
    sched.start(&host, NOW + 1.0);

    assert_eq!(sched.config().interval, 7.5);
    assert_eq!(sched.config().mode, PollMode::Aggressive);
    assert!(sched.config().is_monitoring);
    assert_eq!(sched.config().last_check_time, NOW + 1.0);
}

#[test]
fn interval_is_clamped_to_the_allowed_range() {
    let (fs, _host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);

    assert_eq!(sched.set_interval(0.01), 0.1);
    assert_eq!(sched.set_interval(600.0), 60.0);
    assert_eq!(sched.set_interval(2.5), 2.5);
    assert_eq!(PollConfig::new(f64::NAN, PollMode::Direct).interval, 1.0);
}

#[test]
fn force_check_runs_immediately_and_stamps_the_check_time() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 60.0, PollMode::Direct);
    sched.start(&host, NOW);

    fs.set_mtime("/proj/a.lib", 11.0);
    let report = sched.force_check(&host, NOW + 1.0);

    assert_eq!(report.succeeded, vec!["a".to_string()]);
    assert_eq!(sched.config().last_check_time, NOW + 1.0);
    assert_eq!(sched.tick(&host, NOW + 2.0).check, CheckKind::Skipped);
}

#[test]
fn reload_all_reloads_everything_and_keeps_the_monitoring_flag() {
    let (fs, host) = two_linked_files();
    let failing = host.link("broken", "/proj/broken.lib");
    failing.fail_with(Some("in use"));
    fs.add_file("/proj/broken.lib", b"x".to_vec(), 1.0);
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);

    let report = sched.reload_all(&host);

    let mut succeeded = report.succeeded.clone();
    succeeded.sort();
    assert_eq!(succeeded, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(report.failed, vec![("broken".to_string(), "in use".to_string())]);
    assert_eq!(sched.state(), SchedulerState::Stopped);
    assert_eq!(sched.watched().len(), 3);
    assert_eq!(host.redraws(), 1);
}

#[test]
fn reload_all_announces_each_reloaded_file() {
    let (fs, host) = two_linked_files();
    let mut sched = scheduler(&fs, 1.0, PollMode::Direct);

    sched.reload_all(&host);

    let updated: Vec<String> = host
        .notices()
        .into_iter()
        .filter(|(level, msg)| *level == NoticeLevel::Info && msg.ends_with(" updated."))
        .map(|(_, msg)| msg)
        .collect();
    assert_eq!(updated, vec!["a.lib updated.".to_string(), "b.lib updated.".to_string()]);
    assert!(!host.has_notice("Updated files"));
    assert_eq!(host.redraws(), 1);
}

#[test]
fn stopped_tick_leaves_the_previous_snapshot_untouched() {
    let (fs, host) = two_linked_files();
    let c = host.link("c", "/proj/c.lib");
    fs.add_file("/proj/c.lib", b"c".to_vec(), 10.0);
    let mut sched = scheduler(&fs, 1.0, PollMode::Aggressive);
    sched.start(&host, NOW);
    sched.stop(&host);

    let watched_before = sched.watched().len();
    let reads_before = fs.prefix_reads();
    fs.set_mtime("/proj/c.lib", 20.0);

    let outcome = sched.tick(&host, NOW + 10.0);

    assert_eq!(outcome.check, CheckKind::Idle);
    assert!(outcome.report.is_empty());
    assert_eq!(watched_before, 3);
    assert_eq!(sched.watched().len(), watched_before);
    assert_eq!(sched.watched().get(Path::new("/proj/c.lib")).map(|e| e.mtime), Some(10.0));
    assert_eq!(fs.prefix_reads(), reads_before);
    assert_eq!(c.reloads(), 0);
    assert_eq!(host.redraws(), 0);
}
