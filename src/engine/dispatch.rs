// src/engine/dispatch.rs

//! Reloading changed resources with per-resource failure isolation.

use std::path::Path;

use tracing::{error, info};

use crate::host::{NoticeLevel, Notifier, RedrawRequester};
use crate::watch::WatchedEntry;

/// Outcome of one dispatch round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReloadReport {
    /// Names of resources that reloaded cleanly.
    pub succeeded: Vec<String>,
    /// `(name, error message)` for every resource whose reload failed.
    pub failed: Vec<(String, String)>,
}

impl ReloadReport {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// How successful reloads are announced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessNotice {
    /// One `Updated files: a, b` notice after the round.
    Summary,
    /// One `<file> updated.` notice per reloaded file, as it happens.
    PerFile,
}

/// Reload every entry in `changed`, summarising successes in one notice.
///
/// A failing reload is logged, reported through the host's [`Notifier`] and
/// recorded in the report; the remaining entries are still processed. If at
/// least one reload succeeded, a single redraw is requested at the end.
pub fn dispatch<'a, H, I>(changed: I, host: &H) -> ReloadReport
where
    H: RedrawRequester + Notifier + ?Sized,
    I: IntoIterator<Item = &'a WatchedEntry>,
{
    dispatch_with(changed, host, SuccessNotice::Summary)
}

/// Like [`dispatch`], with the success notice style chosen by the caller.
pub fn dispatch_with<'a, H, I>(changed: I, host: &H, notice: SuccessNotice) -> ReloadReport
where
    H: RedrawRequester + Notifier + ?Sized,
    I: IntoIterator<Item = &'a WatchedEntry>,
{
    let mut report = ReloadReport::default();

    for entry in changed {
        match entry.resource.reload() {
            Ok(()) => {
                info!(resource = %entry.resource_name, path = ?entry.path, "reloaded");
                if notice == SuccessNotice::PerFile {
                    let label = file_label(&entry.path);
                    host.notify(NoticeLevel::Info, &format!("{label} updated."));
                }
                report.succeeded.push(entry.resource_name.clone());
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(
                    resource = %entry.resource_name,
                    path = ?entry.path,
                    error = %message,
                    "reload failed"
                );
                host.notify(
                    NoticeLevel::Error,
                    &format!("Error updating {}: {}", entry.resource_name, message),
                );
                report.failed.push((entry.resource_name.clone(), message));
            }
        }
    }

    if !report.succeeded.is_empty() {
        if notice == SuccessNotice::Summary {
            host.notify(
                NoticeLevel::Info,
                &format!("Updated files: {}", report.succeeded.join(", ")),
            );
        }
        host.request_redraw();
    }

    report
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
