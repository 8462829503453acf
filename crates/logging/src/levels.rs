//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing notices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InfoFlag {
    /// A list was (or in a dry run, would have been) written.
    Change,
    /// An object was skipped because its kind carries no PanFS ACL.
    Skip,
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugFlag {
    /// Entry decoding and reconciliation.
    Acl,
    /// Name and identifier lookups.
    Ident,
    /// Attribute reads and writes.
    Store,
    /// Recursive traversal.
    Walk,
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct InfoLevels {
    /// Change notice level.
    pub change: u8,
    /// Skip notice level.
    pub skip: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Change => self.change,
            InfoFlag::Skip => self.skip,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Change => self.change = level,
            InfoFlag::Skip => self.skip = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.change = level;
        self.skip = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DebugLevels {
    /// ACL processing level.
    pub acl: u8,
    /// Identity lookup level.
    pub ident: u8,
    /// Attribute store level.
    pub store: u8,
    /// Traversal level.
    pub walk: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Acl => self.acl,
            DebugFlag::Ident => self.ident,
            DebugFlag::Store => self.store,
            DebugFlag::Walk => self.walk,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Acl => self.acl = level,
            DebugFlag::Ident => self.ident = level,
            DebugFlag::Store => self.store = level,
            DebugFlag::Walk => self.walk = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.acl = level;
        self.ident = level;
        self.store = level;
        self.walk = level;
    }
}
