//! Chart rendering
//!
//! Renderers consume a `ViewModel` read-only. The set of chart capabilities
//! (scales, point elements, tooltips, legend, title) is registered once by
//! `initialize` at process start and passed explicitly to every renderer.

use std::collections::BTreeSet;
use std::io::Write;

use serde::Serialize;

use crate::controller::{ChartArea, ViewModel};
use crate::error::{Result, ServiceError};
use crate::pipeline::ChartView;

/// Shown in the results section after a successful response with no entries
pub const NO_RESULTS_MESSAGE: &str = "No recommendations were returned for this prompt.";

/// Chart capabilities a renderer may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Plugin {
    LinearScale,
    PointElement,
    Tooltip,
    Legend,
    Title,
}

impl Plugin {
    pub const ALL: [Plugin; 5] = [
        Plugin::LinearScale,
        Plugin::PointElement,
        Plugin::Tooltip,
        Plugin::Legend,
        Plugin::Title,
    ];
}

/// Registered capabilities, created once and shared by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    plugins: BTreeSet<Plugin>,
}

impl RenderContext {
    /// Context with exactly the given capabilities
    pub fn with_plugins(plugins: &[Plugin]) -> Self {
        Self {
            plugins: plugins.iter().copied().collect(),
        }
    }

    pub fn has(&self, plugin: Plugin) -> bool {
        self.plugins.contains(&plugin)
    }

    pub fn plugins(&self) -> impl Iterator<Item = Plugin> + '_ {
        self.plugins.iter().copied()
    }
}

/// Register every chart capability. Call once at startup.
pub fn initialize() -> RenderContext {
    let context = RenderContext::with_plugins(&Plugin::ALL);
    log::debug!("Registered {} chart plugins", context.plugins.len());
    context
}

/// Draws a view onto some output
pub trait ChartRenderer {
    fn render(&self, context: &RenderContext, view: &ViewModel, out: &mut dyn Write) -> Result<()>;
}

fn io_error(err: std::io::Error) -> ServiceError {
    ServiceError::internal(format!("Failed to write output: {}", err))
}

/// Plain-text rendering for terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn render_chart(&self, context: &RenderContext, chart: &ChartView, out: &mut dyn Write) -> std::io::Result<()> {
        if context.has(Plugin::Title) {
            writeln!(out, "{}", chart.label)?;
        }

        if context.has(Plugin::LinearScale) {
            writeln!(out, "  x: {} [{} .. {}]", chart.x_axis.title, chart.x_axis.min, chart.x_axis.max)?;
            writeln!(out, "  y: {} [{} .. {}]", chart.y_axis.title, chart.y_axis.min, chart.y_axis.max)?;
        }

        if context.has(Plugin::PointElement) {
            for point in &chart.points {
                writeln!(
                    out,
                    "  ● {} at ({:.6}, {:.5}) r={:.1} {}",
                    point.meta.name, point.x, point.y, point.r, point.color
                )?;
                if context.has(Plugin::Tooltip) {
                    for line in chart.tooltip(point) {
                        writeln!(out, "      {}", line)?;
                    }
                }
            }
        }

        if context.has(Plugin::Legend) {
            writeln!(out, "{}", chart.legend.title)?;
            for entry in &chart.legend.entries {
                writeln!(out, "  {} {}", entry.color, entry.label)?;
            }
        }

        Ok(())
    }

    fn write_view(&self, context: &RenderContext, view: &ViewModel, out: &mut dyn Write) -> std::io::Result<()> {
        if let Some(message) = &view.validation_message {
            writeln!(out, "{}", message)?;
        }

        if view.loading {
            writeln!(out, "{}", view.submit_label)?;
        }

        if let Some(error) = &view.error {
            writeln!(out, "{}", error)?;
        }

        if let Some(cards) = &view.results {
            writeln!(out, "Recommendations")?;
            if cards.is_empty() {
                writeln!(out, "{}", NO_RESULTS_MESSAGE)?;
            }
            for card in cards {
                writeln!(out, "{}", card.title)?;
                for line in card.lines() {
                    writeln!(out, "  {}", line)?;
                }
            }
            writeln!(out)?;
        }

        match &view.chart {
            ChartArea::Empty { message } => writeln!(out, "{}", message),
            ChartArea::Plot { chart } => self.render_chart(context, chart, out),
        }
    }
}

impl ChartRenderer for TextRenderer {
    fn render(&self, context: &RenderContext, view: &ViewModel, out: &mut dyn Write) -> Result<()> {
        self.write_view(context, view, out).map_err(io_error)
    }
}

/// Machine-readable rendering of the full view
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    plugins: Vec<Plugin>,
    #[serde(flatten)]
    view: &'a ViewModel,
}

impl ChartRenderer for JsonRenderer {
    fn render(&self, context: &RenderContext, view: &ViewModel, out: &mut dyn Write) -> Result<()> {
        let document = JsonDocument {
            plugins: context.plugins().collect(),
            view,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &document)?;
        } else {
            serde_json::to_writer(&mut *out, &document)?;
        }
        writeln!(out).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_registers_all_plugins() {
        let context = initialize();
        for plugin in Plugin::ALL {
            assert!(context.has(plugin));
        }
        assert_eq!(context, initialize());
    }

    #[test]
    fn test_partial_context() {
        let context = RenderContext::with_plugins(&[Plugin::PointElement]);
        assert!(context.has(Plugin::PointElement));
        assert!(!context.has(Plugin::Legend));
        assert_eq!(context.plugins().count(), 1);
    }
}
