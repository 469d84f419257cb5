use serde::{Deserialize, Serialize};

/// Initial CrowdBT reliability prior for a freshly added judge.
pub const DEFAULT_ALPHA: f64 = 10.0;
pub const DEFAULT_BETA: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judge {
    pub name: String,
    pub email: String,
    pub notes: String,
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub read_welcome: bool,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Milliseconds since the unix epoch, 0 when the judge never did anything.
    #[serde(default)]
    pub last_activity: i64,
}

fn default_active() -> bool {
    true
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

impl Judge {
    pub fn new(name: impl Into<String>, email: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            notes: notes.into(),
            code: String::new(),
            active: default_active(),
            read_welcome: false,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            last_activity: 0,
        }
    }
}
