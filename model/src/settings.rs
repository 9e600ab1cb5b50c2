use crate::error::SettingsError;
use crate::spawn::SpawnPolicy;

pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_TARGET: u32 = 2048;

/// Parameters of one game: board size, winning tile and spawn distribution.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    size: usize,
    target: u32,
    spawn: SpawnPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            target: DEFAULT_TARGET,
            spawn: SpawnPolicy::default(),
        }
    }
}

impl Settings {
    pub fn new(size: usize, target: u32, spawn: SpawnPolicy) -> Result<Self, SettingsError> {
        if size < 2 {
            return Err(SettingsError::SizeTooSmall(size));
        }
        if target < 4 || !target.is_power_of_two() {
            return Err(SettingsError::InvalidTarget(target));
        }
        Ok(Self {
            size,
            target,
            spawn,
        })
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn target(&self) -> u32 {
        self.target
    }
    pub fn spawn(&self) -> SpawnPolicy {
        self.spawn
    }
}

#[test]
fn settings_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.size(), 4);
    assert_eq!(settings.target(), 2048);
    assert_eq!(settings.spawn(), SpawnPolicy::Uniform);
}

#[test]
fn settings_validation() {
    assert_eq!(
        Settings::new(1, 2048, SpawnPolicy::Uniform),
        Err(SettingsError::SizeTooSmall(1))
    );
    assert_eq!(
        Settings::new(4, 1000, SpawnPolicy::Uniform),
        Err(SettingsError::InvalidTarget(1000))
    );
    assert_eq!(
        Settings::new(4, 2, SpawnPolicy::Uniform),
        Err(SettingsError::InvalidTarget(2))
    );
    let settings = Settings::new(5, 4096, SpawnPolicy::Classic).unwrap();
    assert_eq!(settings.size(), 5);
    assert_eq!(settings.target(), 4096);
    assert_eq!(settings.spawn(), SpawnPolicy::Classic);
}
