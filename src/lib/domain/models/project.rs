use serde::{Deserialize, Serialize};

pub const DEFAULT_MU: f64 = 0.0;
pub const DEFAULT_SIGMA_SQ: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Table number the project is placed at.
    pub location: i64,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub try_link: String,
    #[serde(default)]
    pub video_link: String,
    #[serde(default)]
    pub locality: i64,
    #[serde(default)]
    pub challenge_list: Vec<String>,
    #[serde(default = "default_mu")]
    pub mu: f64,
    #[serde(default = "default_sigma_sq")]
    pub sigma_sq: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_activity: i64,
}

fn default_mu() -> f64 {
    DEFAULT_MU
}

fn default_sigma_sq() -> f64 {
    DEFAULT_SIGMA_SQ
}

fn default_active() -> bool {
    true
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        location: i64,
        description: impl Into<String>,
        url: impl Into<String>,
        try_link: impl Into<String>,
        video_link: impl Into<String>,
        locality: i64,
        challenge_list: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            description: description.into(),
            url: url.into(),
            try_link: try_link.into(),
            video_link: video_link.into(),
            locality,
            challenge_list,
            mu: DEFAULT_MU,
            sigma_sq: DEFAULT_SIGMA_SQ,
            active: default_active(),
            last_activity: 0,
        }
    }
}
