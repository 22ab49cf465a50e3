//! Flow colors.
//!
//! Every flow gets one color from a [`Palette`], assigned in first-seen order
//! and remembered in a caller-owned [`FlowColors`] table. Two tables never
//! share state, so rendering the same graph twice with fresh tables gives the
//! same colors.

use std::collections::HashMap;

use dialograph_core::color::Color;

const DEFAULT_PALETTE: [&str; 10] = [
    "#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    "#6366f1", "#84cc16",
];

/// An ordered list of flow colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, wrapping around the palette.
    pub fn get(&self, index: usize) -> Option<Color> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_PALETTE
                .iter()
                .map(|color| Color::new(color).expect("default palette colors are valid"))
                .collect(),
        )
    }
}

/// Memo table of colors already handed out, keyed by flow name.
#[derive(Debug, Clone, Default)]
pub struct FlowColors {
    assigned: HashMap<String, Color>,
}

impl FlowColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of flows that have a color.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Returns the color of `flow`, assigning the next palette entry on first use.
///
/// An empty palette yields [`Color::default`] for every flow.
///
/// # Examples
///
/// ```
/// use dialograph::{FlowColors, Palette, color_for_flow};
///
/// let palette = Palette::default();
/// let mut colors = FlowColors::new();
///
/// let greeting = color_for_flow("greeting", &palette, &mut colors);
/// let farewell = color_for_flow("farewell", &palette, &mut colors);
/// assert_ne!(greeting, farewell);
/// assert_eq!(color_for_flow("greeting", &palette, &mut colors), greeting);
/// ```
pub fn color_for_flow(flow: &str, palette: &Palette, memo: &mut FlowColors) -> Color {
    if let Some(color) = memo.assigned.get(flow) {
        return *color;
    }
    let Some(color) = palette.get(memo.assigned.len()) else {
        return Color::default();
    };
    memo.assigned.insert(flow.to_string(), color);
    color
}
