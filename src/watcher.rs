use anyhow::{Context, Result};
use log::{error, info};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;
use walkdir::WalkDir;

use crate::app_config::WatchConfig;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;

// @module: Directory watch mode

/// Polling watcher that launches the pipeline for new media files.
///
/// The watch directory is scanned on a fixed interval; a file is handed to
/// the pipeline once its size is stable across two consecutive scans, so
/// media still being copied in is not picked up half-written. Scanning is
/// non-recursive.
pub struct DirectoryWatcher {
    config: WatchConfig,

    // Sizes seen on the previous scan, for the stability check
    pending: HashMap<PathBuf, u64>,

    // Files already handed to the pipeline
    processed: HashSet<PathBuf>,
}

impl DirectoryWatcher {
    /// Creates a watcher over the configured directory
    pub fn new(config: WatchConfig) -> Self {
        DirectoryWatcher {
            config,
            pending: HashMap::new(),
            processed: HashSet::new(),
        }
    }

    /// Scan the watch directory once and return media files that became
    /// ready since the previous scan.
    pub fn scan(&mut self) -> Result<Vec<PathBuf>> {
        let mut ready = Vec::new();
        let mut seen_this_scan = HashSet::new();

        for entry in WalkDir::new(&self.config.directory)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() || !FileManager::has_media_extension(path, &self.config.extensions) {
                continue;
            }

            let path = path.to_path_buf();
            if self.processed.contains(&path) {
                continue;
            }

            let size = std::fs::metadata(&path)
                .with_context(|| format!("Failed to stat {:?}", path))?
                .len();
            seen_this_scan.insert(path.clone());

            match self.pending.get(&path) {
                Some(&previous_size) if previous_size == size => {
                    self.pending.remove(&path);
                    self.processed.insert(path.clone());
                    ready.push(path);
                }
                _ => {
                    self.pending.insert(path, size);
                }
            }
        }

        // Forget pending files that disappeared between scans
        self.pending.retain(|path, _| seen_this_scan.contains(path));

        Ok(ready)
    }

    /// Watch the directory and run the pipeline for every new media file.
    ///
    /// Pipeline failures are logged and the watch loop keeps going.
    pub async fn run(mut self, controller: &Controller, force_overwrite: bool) -> Result<()> {
        FileManager::ensure_dir(&self.config.directory)?;

        info!(
            "Watching {:?} for new media files (poll every {}s)",
            self.config.directory, self.config.poll_interval_secs
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.config.poll_interval_secs));

        loop {
            interval.tick().await;

            let ready = match self.scan() {
                Ok(ready) => ready,
                Err(e) => {
                    error!("Watch scan failed: {}", e);
                    continue;
                }
            };

            for path in ready {
                info!("New file detected: {:?}", path);
                if let Err(e) = controller.run(&path, force_overwrite).await {
                    error!("Error processing {:?}: {}", path, e);
                }
            }
        }
    }
}
