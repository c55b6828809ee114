use std::fmt;
use std::str::FromStr;

use crate::error::ModuleLoadError;

/// Named functions the host may start the module with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    LineTest,
    TextureTest,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 2] = [EntryPoint::LineTest, EntryPoint::TextureTest];

    pub fn name(self) -> &'static str {
        match self {
            EntryPoint::LineTest => "line_test",
            EntryPoint::TextureTest => "texture_test",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntryPoint {
    type Err = ModuleLoadError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entry| entry.name() == name)
            .ok_or_else(|| ModuleLoadError::UnknownEntryPoint(name.to_string()))
    }
}
