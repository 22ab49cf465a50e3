//! Configuration types for graph derivation, layout and styling.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every field has a default, so an
//! empty document yields [`AppConfig::default()`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`GraphConfig`] - Controls how a plot is turned into a display graph.
//! - [`LayoutConfig`] - Selects the [`LayoutEngine`] and its parameters.
//! - [`StyleConfig`] - Controls the flow color palette.
//!
//! # Example
//!
//! ```
//! # use dialograph::config::{AppConfig, LayoutEngine};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().engine(), LayoutEngine::Relaxed);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use dialograph_core::{color::Color, geometry::Size};

use crate::style::Palette;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph derivation section.
    #[serde(default)]
    graph: GraphConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(graph: GraphConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            graph,
            layout,
            style,
        }
    }

    /// Returns the graph derivation configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// How transitions declared on GLOBAL nodes enter the display graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalTransitions {
    /// GLOBAL and LOCAL nodes are ignored; only REGULAR nodes participate.
    #[default]
    Omit,
    /// Every GLOBAL transition is drawn from each REGULAR source node other
    /// than its own target.
    FanOut,
}

/// Graph derivation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    global_transitions: GlobalTransitions,
}

impl GraphConfig {
    pub fn new(global_transitions: GlobalTransitions) -> Self {
        Self { global_transitions }
    }

    /// Returns the GLOBAL transition handling mode.
    pub fn global_transitions(&self) -> GlobalTransitions {
        self.global_transitions
    }
}

/// Available layout engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Tree packing in edge declaration order.
    Basic,
    /// Spring relaxation of the vertical order followed by tree packing.
    #[default]
    Relaxed,
}

/// Layout engine selection and tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    engine: LayoutEngine,
    node_width: f32,
    node_height: f32,
    column_gap: f32,
    row_gap: f32,
    edge_stiffness: f32,
    flow_stiffness: f32,
    iterations: usize,
    convergence_threshold: Option<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            node_width: 160.0,
            node_height: 69.0,
            column_gap: 100.0,
            row_gap: 40.0,
            edge_stiffness: 0.1,
            flow_stiffness: 0.01,
            iterations: 100,
            convergence_threshold: None,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy using the given engine.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Size reserved for every node.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    /// Horizontal gap between columns.
    pub fn column_gap(&self) -> f32 {
        self.column_gap
    }

    /// Vertical gap between sibling subtrees.
    pub fn row_gap(&self) -> f32 {
        self.row_gap
    }

    /// Weight of edge-length tension during relaxation.
    pub fn edge_stiffness(&self) -> f32 {
        self.edge_stiffness
    }

    /// Weight of same-flow tension during relaxation.
    pub fn flow_stiffness(&self) -> f32 {
        self.flow_stiffness
    }

    /// Maximum number of relaxation iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Early-stop threshold on the largest per-iteration index change.
    pub fn convergence_threshold(&self) -> Option<f32> {
        self.convergence_threshold
    }
}

/// Visual styling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Flow colors as CSS color strings; the built-in palette when unset.
    #[serde(default)]
    palette: Option<Vec<String>>,
}

impl StyleConfig {
    /// Uses `colors` instead of the built-in palette.
    pub fn with_palette(mut self, colors: Vec<String>) -> Self {
        self.palette = Some(colors);
        self
    }

    /// Returns the parsed flow [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configured color string cannot be parsed.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            None => Ok(Palette::default()),
            Some(colors) => colors
                .iter()
                .map(|color| Color::new(color))
                .collect::<Result<Vec<_>, _>>()
                .map(Palette::new)
                .map_err(|err| format!("Invalid palette color in config: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.engine(), LayoutEngine::Relaxed);
        assert_approx_eq!(f32, layout.node_size().width(), 160.0);
        assert_approx_eq!(f32, layout.node_size().height(), 69.0);
        assert_approx_eq!(f32, layout.column_gap(), 100.0);
        assert_approx_eq!(f32, layout.row_gap(), 40.0);
        assert_approx_eq!(f32, layout.edge_stiffness(), 0.1);
        assert_approx_eq!(f32, layout.flow_stiffness(), 0.01);
        assert_eq!(layout.iterations(), 100);
        assert!(layout.convergence_threshold().is_none());
    }

    #[test]
    fn test_graph_defaults_to_omit() {
        assert_eq!(
            AppConfig::default().graph().global_transitions(),
            GlobalTransitions::Omit
        );
    }

    #[test]
    fn test_palette_rejects_invalid_color() {
        let style = StyleConfig {
            palette: Some(vec!["red".to_string(), "not-a-color".to_string()]),
        };
        let err = style.palette().unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_palette_parses_configured_colors() {
        let style = StyleConfig {
            palette: Some(vec!["red".to_string(), "#00ff00".to_string()]),
        };
        assert_eq!(style.palette().unwrap().len(), 2);
    }
}
