//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugLevels, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level.
    ///
    /// Level 0 is quiet, level 1 (`--verbose`) enables change and skip
    /// notices, and level 2 or above (`--debug`) additionally enables every
    /// debug flag.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        if level >= 1 {
            config.info.set_all(1);
        }
        if level >= 2 {
            config.debug.set_all(2);
        }
        config
    }

    /// Level for `--verbose` / `--debug` as given on the command line.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        let level = if debug {
            2
        } else {
            u8::from(verbose)
        };
        Self::from_verbose_level(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{DebugFlag, InfoFlag};

    #[test]
    fn quiet_level_enables_nothing() {
        assert_eq!(VerbosityConfig::from_verbose_level(0), VerbosityConfig::default());
    }

    #[test]
    fn verbose_level_enables_notices_only() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.info.get(InfoFlag::Change), 1);
        assert_eq!(config.info.get(InfoFlag::Skip), 1);
        assert_eq!(config.debug.get(DebugFlag::Acl), 0);
    }

    #[test]
    fn debug_level_enables_every_debug_flag() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.info.get(InfoFlag::Change), 1);
        for flag in [DebugFlag::Acl, DebugFlag::Ident, DebugFlag::Store, DebugFlag::Walk] {
            assert_eq!(config.debug.get(flag), 2);
        }
        assert_eq!(VerbosityConfig::from_verbose_level(9), config);
    }

    #[test]
    fn debug_flag_implies_verbose() {
        assert_eq!(
            VerbosityConfig::from_flags(false, true),
            VerbosityConfig::from_verbose_level(2)
        );
        assert_eq!(
            VerbosityConfig::from_flags(true, false),
            VerbosityConfig::from_verbose_level(1)
        );
    }
}
