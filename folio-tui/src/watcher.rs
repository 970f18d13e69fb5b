//! Watches the article file for external edits

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Quiet period after the last change before a reload is signalled.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Debounced change notifications for a single article file.
pub struct ArticleWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<()>,
    path: PathBuf,
    last_change: Option<Instant>,
}

impl ArticleWatcher {
    /// Watch `path`. The parent directory is watched too, since many
    /// editors save by writing a temp file and renaming it over the original.
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let target = path.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            forward_change(res, &target, &tx);
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch file: {}", path.display()))?;
        if let Some(parent) = path.parent() {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .context("Failed to watch parent directory")?;
        }

        Ok(Self {
            _watcher: watcher,
            changes: rx,
            path: path.to_path_buf(),
            last_change: None,
        })
    }

    /// Drain pending notifications; true once `debounce` has passed since
    /// the most recent one.
    pub fn settled_change(&mut self, debounce: Duration) -> bool {
        while self.changes.try_recv().is_ok() {
            self.last_change = Some(Instant::now());
        }

        match self.last_change {
            Some(at) if at.elapsed() >= debounce => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// A change was seen but has not settled yet.
    pub fn has_pending(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn forward_change(res: notify::Result<Event>, target: &Path, tx: &Sender<()>) {
    let Ok(event) = res else {
        return;
    };
    let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|p| p == target);
    if relevant {
        let _ = tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;
    use tempfile::NamedTempFile;

    #[test]
    fn test_watcher_path() -> Result<()> {
        let file = NamedTempFile::new()?;
        let watcher = ArticleWatcher::new(file.path())?;
        assert_eq!(watcher.path(), file.path());
        assert!(!watcher.has_pending());
        Ok(())
    }

    #[test]
    fn test_no_change_means_nothing_settles() -> Result<()> {
        let file = NamedTempFile::new()?;
        let mut watcher = ArticleWatcher::new(file.path())?;
        assert!(!watcher.settled_change(Duration::ZERO));
        Ok(())
    }

    #[test]
    #[ignore] // File system events can be unreliable in test environments
    fn test_change_settles_after_debounce() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let mut watcher = ArticleWatcher::new(file.path())?;

        writeln!(file, "# Changed")?;
        file.flush()?;

        for _ in 0..20 {
            thread::sleep(Duration::from_millis(100));
            if watcher.settled_change(DEBOUNCE) {
                return Ok(());
            }
        }
        panic!("watcher never reported the change");
    }
}
