pub mod compose;
pub mod config;
pub mod feedback;
pub mod normalize;
pub mod selection;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Linkedin,
    Twitter,
}

impl Platform {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "instagram" | "ig" => Some(Platform::Instagram),
            "facebook" | "fb" => Some(Platform::Facebook),
            "linkedin" => Some(Platform::Linkedin),
            "twitter" | "x" => Some(Platform::Twitter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub approved: bool,
    pub confidence_percent: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptionEntry {
    pub text: String,
    pub default_hashtags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformBlock {
    pub platform: Platform,
    pub captions: Vec<CaptionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub decision: Decision,
    pub platforms: Vec<PlatformBlock>,
    pub insights: Vec<(String, String)>,
    pub schedule: Option<Vec<(String, String)>>,
    pub original_text: String,
    pub original_image: String,
}

impl AnalysisView {
    pub fn platform_block(&self, platform: Platform) -> Option<&PlatformBlock> {
        self.platforms.iter().find(|block| block.platform == platform)
    }
}
