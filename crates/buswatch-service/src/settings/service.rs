//! The runtime settings singleton, served as an atomically swapped snapshot.
//!
//! Readers clone an `Arc` to the current immutable value, so a concurrent
//! update can never expose a torn view. Updates validate, persist, then swap
//! the pointer; a failed update leaves the old snapshot live.

use std::sync::{Arc, RwLock};

use tracing::info;

use buswatch_core::config::settings::SettingsDefaults;
use buswatch_core::result::AppResult;
use buswatch_database::repositories::settings::SettingsRepository;
use buswatch_entity::settings::{RuntimeSettings, SettingsPatch};

/// Serves and mutates the runtime settings singleton.
pub struct SettingsService {
    repo: Arc<SettingsRepository>,
    current: RwLock<Arc<RuntimeSettings>>,
}

impl SettingsService {
    /// Load the persisted settings, seeding the row from defaults when it
    /// does not exist yet.
    pub async fn load(repo: Arc<SettingsRepository>, defaults: &SettingsDefaults) -> AppResult<Self> {
        let settings = match repo.load().await? {
            Some(settings) => settings,
            None => {
                let seeded = RuntimeSettings::from_defaults(defaults);
                repo.replace(&seeded).await?;
                info!("Seeded runtime settings from defaults");
                seeded
            }
        };

        Ok(Self {
            repo,
            current: RwLock::new(Arc::new(settings)),
        })
    }

    /// The current settings snapshot.
    ///
    /// Cheap enough to call on every evaluation; consumers must re-read
    /// rather than cache so updates take effect on the next cycle.
    pub fn snapshot(&self) -> Arc<RuntimeSettings> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Validate and apply a patch, replacing the singleton atomically.
    ///
    /// The database row is replaced before the in-memory swap; on any
    /// failure the previous value stays in effect for all readers.
    pub async fn update(&self, patch: &SettingsPatch) -> AppResult<Arc<RuntimeSettings>> {
        let next = self.snapshot().with_patch(patch)?;
        self.repo.replace(&next).await?;

        let next = Arc::new(next);
        match self.current.write() {
            Ok(mut guard) => *guard = Arc::clone(&next),
            Err(poisoned) => *poisoned.into_inner() = Arc::clone(&next),
        }

        info!(
            overspeed_threshold = next.overspeed_threshold,
            poll_interval_seconds = next.poll_interval_seconds,
            relay_enabled = next.relay_enabled,
            auto_notify_enabled = next.auto_notify_enabled,
            "Runtime settings updated"
        );
        Ok(next)
    }
}
