//! Dialograph - Graph derivation and layout for declarative dialog-flow plots
//!
//! This library turns a dialog plot (nodes, transitions, condition links and
//! flows) into a display graph of bot and user nodes, lays it out in columns
//! and exports the positioned result for rendering.

pub mod config;

mod error;
mod export;
mod layout;
mod resolve;
mod structure;
mod style;

pub use dialograph_core::{color, geometry, graph, identifier, plot};

pub use error::DialographError;
pub use export::{Diagram, DiagramNode, to_json};
pub use layout::{EngineBuilder, GraphEngine, Layout, get_layout};
pub use resolve::resolve_condition_label;
pub use structure::{GraphBuilder, plot_to_graph};
pub use style::{FlowColors, Palette, color_for_flow};

use log::{debug, info, trace};

use config::AppConfig;
use graph::Graph;
use plot::Plot;

/// Builder for parsing, laying out and exporting dialog plots.
///
/// # Examples
///
/// ```
/// use dialograph::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "nodes": {
///         "id#nd_start": { "type": "regular", "name": "start", "transitions": ["id#tr_1"] },
///         "id#nd_end": { "type": "regular", "name": "end" }
///     },
///     "transitions": { "id#tr_1": { "label": "id#nd_end" } }
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let plot = builder.parse(source).expect("Failed to parse");
/// let diagram = builder.render(&plot).expect("Failed to render");
///
/// assert_eq!(diagram.nodes().len(), 3);
/// assert_eq!(diagram.edges().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a plot from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DialographError::Parse`] if `source` is not a valid plot
    /// document. The error keeps `source` for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Plot, DialographError> {
        info!("Parsing plot");
        let plot: Plot = serde_json::from_str(source)
            .map_err(|err| DialographError::new_parse_error(err, source))?;
        debug!(nodes_count = plot.nodes().count(); "Plot parsed successfully");
        trace!(plot:?; "Parsed plot");
        Ok(plot)
    }

    /// Derive the display graph of `plot` using the configured GLOBAL
    /// transition handling.
    pub fn build_graph(&self, plot: &Plot) -> Graph {
        info!(global_transitions:? = self.config.graph().global_transitions(); "Building display graph");
        structure::GraphBuilder::new(plot)
            .with_global_transitions(self.config.graph().global_transitions())
            .build()
    }

    /// Lay out `graph` with the configured engine.
    pub fn layout(&self, graph: &Graph) -> Layout {
        let layout_config = self.config.layout();
        info!(engine:? = layout_config.engine(); "Calculating layout");
        let layout = EngineBuilder::from_config(layout_config)
            .build(layout_config.engine())
            .calculate(graph);
        info!(positioned_count = layout.len(), nodes_count = graph.nodes().len(); "Layout calculated");
        layout
    }

    /// Build, lay out and color `plot`.
    ///
    /// # Errors
    ///
    /// Returns [`DialographError::Config`] if the configured palette
    /// contains an invalid color.
    pub fn render(&self, plot: &Plot) -> Result<Diagram, DialographError> {
        let palette = self
            .config
            .style()
            .palette()
            .map_err(DialographError::Config)?;
        let graph = self.build_graph(plot);
        let layout = self.layout(&graph);
        Ok(Diagram::new(&graph, &layout, &palette))
    }

    /// Render `plot` to a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DialographError::Config`] for an invalid palette and
    /// [`DialographError::Export`] if serialization fails.
    pub fn render_json(&self, plot: &Plot) -> Result<String, DialographError> {
        let diagram = self.render(plot)?;
        let json = to_json(&diagram)?;
        info!("Diagram exported successfully");
        Ok(json)
    }
}
