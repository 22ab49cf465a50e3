//! Condition label resolution.

use log::trace;

use dialograph_core::{graph::UNKNOWN, identifier::Ref, plot::Plot};

/// Resolves the display label of a transition condition.
///
/// The condition must be a link whose `object` is a definition; the
/// definition's name is returned. Anything else (a missing condition, a
/// non-link reference, a dangling link, a link to another link, a dangling
/// definition) yields [`UNKNOWN`]. Only one level of indirection is followed,
/// so resolution always terminates.
///
/// # Examples
///
/// ```
/// use dialograph::resolve_condition_label;
/// use dialograph_core::{
///     identifier::Ref,
///     plot::{Definition, Link, Plot},
/// };
///
/// let plot = Plot::default()
///     .with_link("id#ln_1", Link::new("id#df_1"))
///     .with_definition("id#df_1", Definition::new("cnd.exact_match"));
///
/// let condition = Ref::parse("id#ln_1");
/// assert_eq!(resolve_condition_label(Some(&condition), &plot), "cnd.exact_match");
/// assert_eq!(resolve_condition_label(None, &plot), "unknown");
/// ```
pub fn resolve_condition_label<'p>(condition: Option<&Ref>, plot: &'p Plot) -> &'p str {
    let Some(Ref::Link(link_id)) = condition else {
        trace!(condition:? = condition; "Condition is not a link");
        return UNKNOWN;
    };
    let Some(link) = plot.link(link_id.as_str()) else {
        trace!(link_id = link_id.as_str(); "Condition link not found");
        return UNKNOWN;
    };
    match link.object() {
        Ref::Definition(def_id) => match plot.definition(def_id.as_str()) {
            Some(definition) => definition.name(),
            None => {
                trace!(definition_id = def_id.as_str(); "Condition definition not found");
                UNKNOWN
            }
        },
        object => {
            trace!(link_id = link_id.as_str(), object = object.as_str(); "Condition link does not name a definition");
            UNKNOWN
        }
    }
}
