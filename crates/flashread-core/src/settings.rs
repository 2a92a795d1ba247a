//! Persisted reader settings abstraction.

use crate::timing::{WPM_MAX, WPM_MIN};

/// User-tunable settings that should survive a reload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub training_enabled: bool,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, training_enabled: bool) -> Self {
        Self {
            wpm,
            training_enabled,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            wpm: self.wpm.clamp(WPM_MIN, WPM_MAX),
            ..self
        }
    }
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::new(300, false)
    }
}

/// Abstract settings persistence backend; implementations live in the host.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
