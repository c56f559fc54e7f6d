//! Entries that route to other entries by category.
//!
//! Both resolve their targets through the registry passed in, never through
//! a captured function, so overrides of the targets are always honored.

use crate::model::{EventCategory, EventModel};
use crate::output::TemplateOutput;

use super::Templates;

/// Renders an event with the entry of its category.
///
/// Unknown categories fall back to the title as given, without sanitizing.
pub(super) fn event(templates: &Templates, model: &EventModel) -> TemplateOutput {
    match &model.category {
        EventCategory::Milestone => templates.milestone(model),
        EventCategory::Task => templates.task(model),
        EventCategory::Allday => templates.allday(model),
        EventCategory::Time => templates.time(model),
        EventCategory::Other(_) => TemplateOutput::Text(model.title.clone()),
    }
}

/// Day-grid row title: the category's title entry, or the tag itself.
pub(super) fn day_grid_title(templates: &Templates, category: &EventCategory) -> TemplateOutput {
    match category {
        EventCategory::Milestone => templates.milestone_title(&()),
        EventCategory::Task => templates.task_title(&()),
        EventCategory::Allday => templates.allday_title(&()),
        EventCategory::Time | EventCategory::Other(_) => {
            TemplateOutput::Text(category.as_str().to_string())
        }
    }
}
