use clap::ValueEnum;
use std::fmt;

/// Platform branch the viewer runs as. Each branch supports exactly one
/// retrieval source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Android,
    Ios,
}

/// What a retrieval source reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Sms,
    Mail,
}

impl Platform {
    /// Platform of the build target. Anything that is not Android runs the
    /// mail branch.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Ios
        }
    }

    pub fn supports(self, kind: SourceKind) -> bool {
        matches!(
            (self, kind),
            (Platform::Android, SourceKind::Sms) | (Platform::Ios, SourceKind::Mail)
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sms => write!(f, "SMS"),
            SourceKind::Mail => write!(f, "mail"),
        }
    }
}
