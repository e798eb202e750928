use crate::application::renderer::{ChartLayout, Margin, DEFAULT_PALETTE};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_page_title")]
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub margin: MarginSettings,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarginSettings {
    #[serde(default = "default_margin_top")]
    pub top: f64,
    #[serde(default = "default_margin_right")]
    pub right: f64,
    #[serde(default = "default_margin_bottom")]
    pub bottom: f64,
    #[serde(default = "default_margin_left")]
    pub left: f64,
}

fn default_url() -> String {
    "http://localhost:8080/data.json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_output_path() -> PathBuf {
    PathBuf::from("charts.html")
}

fn default_page_title() -> String {
    "Charts".to_string()
}

fn default_width() -> u32 {
    ChartLayout::default().width
}

fn default_height() -> u32 {
    ChartLayout::default().height
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

fn default_margin_top() -> f64 {
    ChartLayout::default().margin.top
}

fn default_margin_right() -> f64 {
    ChartLayout::default().margin.right
}

fn default_margin_bottom() -> f64 {
    ChartLayout::default().margin.bottom
}

fn default_margin_left() -> f64 {
    ChartLayout::default().margin.left
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            title: default_page_title(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: MarginSettings::default(),
            palette: default_palette(),
        }
    }
}

impl Default for MarginSettings {
    fn default() -> Self {
        Self {
            top: default_margin_top(),
            right: default_margin_right(),
            bottom: default_margin_bottom(),
            left: default_margin_left(),
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RenderSettings {
    pub fn layout(&self) -> ChartLayout {
        ChartLayout {
            width: self.width,
            height: self.height,
            margin: Margin {
                top: self.margin.top,
                right: self.margin.right,
                bottom: self.margin.bottom,
                left: self.margin.left,
            },
        }
    }
}

/// Load `config/charts.*` (optional) with `CHARTS__SECTION__KEY` overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts").required(false))
        .add_source(config::Environment::with_prefix("CHARTS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
