use crate::ir::Direction;
use crate::theme::{GenderColors, Palette};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MIN_FONT_SIZE: f32 = 10.0;
const MAX_FONT_SIZE: f32 = 20.0;

/// Edge curve kind understood by the node-link renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Straight,
    Step,
    #[default]
    SmoothStep,
    Bezier,
    SimpleBezier,
}

impl EdgeStyle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "straight" => Some(Self::Straight),
            "step" => Some(Self::Step),
            "smoothstep" => Some(Self::SmoothStep),
            "bezier" | "default" => Some(Self::Bezier),
            "simplebezier" => Some(Self::SimpleBezier),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Step => "step",
            Self::SmoothStep => "smoothstep",
            Self::Bezier => "bezier",
            Self::SimpleBezier => "simplebezier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "butt" => Some(Self::Butt),
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Display settings. Consumed read-only by the graph builder; the card flags
/// are passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub palette: Palette,
    pub colors: GenderColors,
    pub edge_style: EdgeStyle,
    pub curve_intensity: f32,
    pub edge_width: f32,
    pub edge_cap: LineCap,
    pub show_death_icons: bool,
    pub show_birth_icons: bool,
    pub show_deceased_banner: bool,
    pub font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: Palette::Default,
            colors: Palette::Default.colors(),
            edge_style: EdgeStyle::SmoothStep,
            curve_intensity: 0.25,
            edge_width: 2.0,
            edge_cap: LineCap::Round,
            show_death_icons: true,
            show_birth_icons: true,
            show_deceased_banner: true,
            font_size: 14.0,
        }
    }
}

impl Settings {
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.colors = palette.colors();
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }
}

/// Geometry of the layout pipeline. All distances are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub node_width: f64,
    pub node_height: f64,
    pub node_spacing: f64,
    pub rank_spacing: f64,
    pub order_passes: usize,
    pub pixels_per_year: f64,
    pub default_reference_year: i32,
    pub band_height: f64,
    pub min_horizontal_spacing: f64,
    pub min_vertical_spacing: f64,
    pub max_collision_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopDown,
            node_width: 180.0,
            node_height: 60.0,
            node_spacing: 50.0,
            rank_spacing: 50.0,
            order_passes: 4,
            pixels_per_year: 50.0,
            default_reference_year: 1900,
            band_height: 50.0,
            min_horizontal_spacing: 20.0,
            min_vertical_spacing: 20.0,
            max_collision_iterations: 50,
        }
    }
}

impl LayoutConfig {
    /// Distance between the left edges of neighbouring nodes in one rank.
    pub fn horizontal_spacing(&self) -> f64 {
        self.node_width + self.node_spacing
    }

    /// Distance between the top edges of consecutive ranks.
    pub fn vertical_spacing(&self) -> f64 {
        self.node_height + self.rank_spacing
    }

    /// Minimum centre-to-centre horizontal distance for two nodes not to collide.
    pub fn min_horizontal_gap(&self) -> f64 {
        self.node_width + self.min_horizontal_spacing
    }

    pub fn min_vertical_gap(&self) -> f64 {
        self.node_height + self.min_vertical_spacing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
struct ColorsFile {
    male: Option<String>,
    female: Option<String>,
    neutral: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    direction: Option<String>,
    node_width: Option<f64>,
    node_height: Option<f64>,
    node_spacing: Option<f64>,
    rank_spacing: Option<f64>,
    order_passes: Option<usize>,
    pixels_per_year: Option<f64>,
    default_reference_year: Option<i32>,
    band_height: Option<f64>,
    min_horizontal_spacing: Option<f64>,
    min_vertical_spacing: Option<f64>,
    max_collision_iterations: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    palette: Option<String>,
    colors: Option<ColorsFile>,
    edge_style: Option<String>,
    curve_intensity: Option<f32>,
    edge_width: Option<f32>,
    edge_cap: Option<String>,
    show_death_icons: Option<bool>,
    show_birth_icons: Option<bool>,
    show_deceased_banner: Option<bool>,
    font_size: Option<f32>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document (JSON, or JSON5 as a fallback) on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    let settings = &mut config.settings;
    if let Some(name) = parsed.palette.as_deref() {
        let palette =
            Palette::from_name(name).ok_or_else(|| anyhow::anyhow!("unknown palette: {name}"))?;
        *settings = settings.clone().with_palette(palette);
    }
    if let Some(colors) = parsed.colors {
        if let Some(v) = colors.male {
            settings.colors.male = v;
        }
        if let Some(v) = colors.female {
            settings.colors.female = v;
        }
        if let Some(v) = colors.neutral {
            settings.colors.neutral = v;
        }
    }
    if let Some(token) = parsed.edge_style.as_deref() {
        settings.edge_style = EdgeStyle::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown edge style: {token}"))?;
    }
    if let Some(v) = parsed.curve_intensity {
        settings.curve_intensity = v;
    }
    if let Some(v) = parsed.edge_width {
        settings.edge_width = v;
    }
    if let Some(token) = parsed.edge_cap.as_deref() {
        settings.edge_cap = LineCap::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown edge cap: {token}"))?;
    }
    if let Some(v) = parsed.show_death_icons {
        settings.show_death_icons = v;
    }
    if let Some(v) = parsed.show_birth_icons {
        settings.show_birth_icons = v;
    }
    if let Some(v) = parsed.show_deceased_banner {
        settings.show_deceased_banner = v;
    }
    if let Some(v) = parsed.font_size {
        settings.font_size = v.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    if let Some(file) = parsed.layout {
        let layout = &mut config.layout;
        if let Some(token) = file.direction.as_deref() {
            layout.direction = Direction::from_token(token)
                .ok_or_else(|| anyhow::anyhow!("unknown direction: {token}"))?;
        }
        if let Some(v) = file.node_width {
            layout.node_width = positive("nodeWidth", v)?;
        }
        if let Some(v) = file.node_height {
            layout.node_height = positive("nodeHeight", v)?;
        }
        if let Some(v) = file.node_spacing {
            layout.node_spacing = non_negative("nodeSpacing", v)?;
        }
        if let Some(v) = file.rank_spacing {
            layout.rank_spacing = non_negative("rankSpacing", v)?;
        }
        if let Some(v) = file.order_passes {
            layout.order_passes = v;
        }
        if let Some(v) = file.pixels_per_year {
            layout.pixels_per_year = positive("pixelsPerYear", v)?;
        }
        if let Some(v) = file.default_reference_year {
            layout.default_reference_year = v;
        }
        if let Some(v) = file.band_height {
            layout.band_height = positive("bandHeight", v)?;
        }
        if let Some(v) = file.min_horizontal_spacing {
            layout.min_horizontal_spacing = non_negative("minHorizontalSpacing", v)?;
        }
        if let Some(v) = file.min_vertical_spacing {
            layout.min_vertical_spacing = non_negative("minVerticalSpacing", v)?;
        }
        if let Some(v) = file.max_collision_iterations {
            layout.max_collision_iterations = v;
        }
    }

    Ok(config)
}

fn positive(key: &str, value: f64) -> anyhow::Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(anyhow::anyhow!("{key} must be a positive number, got {value}"))
    }
}

fn non_negative(key: &str, value: f64) -> anyhow::Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(anyhow::anyhow!("{key} must be zero or a positive number, got {value}"))
    }
}
