/// Errors raised while building a simulation from names or configuration.
///
/// Stepping itself never fails: degenerate inputs (zero velocity, `dt <= 0`,
/// a stone below the floor) are absorbed as no-ops or clamped values.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipError {
    /// A fluid name that is not in the property table.
    UnknownMedium(String),
    /// A stone or physics parameter outside its valid range.
    InvalidParameter { name: &'static str, value: f64 },
    /// A configuration document that could not be parsed.
    Config(String),
}

impl std::fmt::Display for SkipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMedium(name) => write!(f, "unknown medium: {name}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            },
            Self::Config(m) => write!(f, "config error: {m}"),
        }
    }
}

impl std::error::Error for SkipError {}

impl From<toml::de::Error> for SkipError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
