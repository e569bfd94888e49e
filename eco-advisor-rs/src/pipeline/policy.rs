//! Presentation policy for the chart
//!
//! One pipeline serves every presentation variant; the differences (palette,
//! carbon display unit, what drives bubble size, fixed or adaptive axes) are
//! carried by `ChartPolicy`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{ConfigProvider, GenericConfigProvider};
use crate::error::{Result, ServiceError};

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Palette for the three quality tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Red, olive, green
    #[default]
    TrafficLight,
    /// Three shades of green
    Eco,
}

impl ColorScheme {
    /// Colors for the low, mid and high tiers, in that order
    pub fn palette(&self) -> [Rgb; 3] {
        match self {
            ColorScheme::TrafficLight => [
                Rgb::new(255, 0, 0),
                Rgb::new(128, 128, 0),
                Rgb::new(0, 255, 0),
            ],
            ColorScheme::Eco => [
                Rgb::new(200, 230, 201),
                Rgb::new(102, 187, 106),
                Rgb::new(27, 94, 32),
            ],
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "traffic_light" | "traffic" => Ok(ColorScheme::TrafficLight),
            "eco" | "green" => Ok(ColorScheme::Eco),
            other => Err(format!("unknown color scheme '{}'", other)),
        }
    }
}

/// Unit used to display carbon footprint. Records always carry grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonUnit {
    #[default]
    Grams,
    Kilograms,
}

impl CarbonUnit {
    /// Convert a gram amount to this unit
    pub fn from_grams(&self, grams: f64) -> f64 {
        match self {
            CarbonUnit::Grams => grams,
            CarbonUnit::Kilograms => grams / 1000.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CarbonUnit::Grams => "g",
            CarbonUnit::Kilograms => "kg",
        }
    }

    /// Decimal places used when printing a value in this unit
    pub fn decimals(&self) -> usize {
        match self {
            CarbonUnit::Grams => 2,
            CarbonUnit::Kilograms => 5,
        }
    }
}

impl FromStr for CarbonUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(CarbonUnit::Grams),
            "kg" | "kilogram" | "kilograms" => Ok(CarbonUnit::Kilograms),
            other => Err(format!("unknown carbon unit '{}'", other)),
        }
    }
}

/// What drives bubble radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBasis {
    /// Radius grows with the arena score relative to the best in the set
    #[default]
    ArenaScore,
    /// Radius is the record's performance score as-is
    PerformanceScore,
}

impl FromStr for SizeBasis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arena" | "arena_score" => Ok(SizeBasis::ArenaScore),
            "performance" | "performance_score" => Ok(SizeBasis::PerformanceScore),
            other => Err(format!("unknown size basis '{}'", other)),
        }
    }
}

/// How axis bounds are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// Constant bounds, independent of the data
    Fixed,
    /// Bounds follow the largest value in the current result set
    #[default]
    Adaptive,
}

impl FromStr for AxisMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(AxisMode::Fixed),
            "adaptive" | "auto" => Ok(AxisMode::Adaptive),
            other => Err(format!("unknown axis mode '{}'", other)),
        }
    }
}

/// Complete presentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChartPolicy {
    pub color_scheme: ColorScheme,
    pub carbon_unit: CarbonUnit,
    pub size_basis: SizeBasis,
    pub axis_mode: AxisMode,
}

impl ChartPolicy {
    /// Load the policy from a config provider (`chart_*` keys); absent keys keep defaults
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            color_scheme: provider
                .get_opt::<ColorScheme>("chart_color_scheme")?
                .unwrap_or(defaults.color_scheme),
            carbon_unit: provider
                .get_opt::<CarbonUnit>("chart_carbon_unit")?
                .unwrap_or(defaults.carbon_unit),
            size_basis: provider
                .get_opt::<SizeBasis>("chart_size_basis")?
                .unwrap_or(defaults.size_basis),
            axis_mode: provider
                .get_opt::<AxisMode>("chart_axis_mode")?
                .unwrap_or(defaults.axis_mode),
        })
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_carbon_unit(mut self, unit: CarbonUnit) -> Self {
        self.carbon_unit = unit;
        self
    }

    pub fn with_size_basis(mut self, basis: SizeBasis) -> Self {
        self.size_basis = basis;
        self
    }

    pub fn with_axis_mode(mut self, mode: AxisMode) -> Self {
        self.axis_mode = mode;
        self
    }
}

/// Parse a policy value given on the command line
pub fn parse_policy_value<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map_err(ServiceError::configuration)
}
