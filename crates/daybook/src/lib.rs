//! # Daybook - overridable templates for calendar widgets
//!
//! Daybook renders the text and markup fragments a calendar widget shows:
//! event pills, day headers, "3 more" badges, popup labels, timezone badges.
//! Each of these is a named entry in a [`Templates`] registry. Entries are
//! pure functions from one input to a [`TemplateOutput`], which is either
//! plain text or a [`Fragment`](daybook_markup::Fragment).
//!
//! ## Overriding
//!
//! Any entry can be replaced. The generic `event` and `dayGridTitle` entries
//! dispatch on the event category through the registry, so replacing a leaf
//! changes what they produce:
//!
//! ```rust
//! use daybook::{EventModel, Templates};
//!
//! let mut templates = Templates::default();
//! templates.set_allday(|_, event| format!("All day: {}", event.title).into());
//!
//! let trip = EventModel::new("Lisbon", "allday");
//! assert_eq!(templates.event(&trip).to_string(), "All day: Lisbon");
//! ```
//!
//! ## Template sheets
//!
//! A [`TemplateSheet`] loads label overrides, MiniJinja templates, a class
//! prefix and a terminal theme from YAML:
//!
//! ```rust
//! use daybook::{OutputMode, TemplateSheet};
//!
//! let sheet = TemplateSheet::from_yaml(r#"
//! labels:
//!   popupDelete: Löschen
//! templates:
//!   weekGridFooterExceed: "[more]+{{ model }}[/more]"
//! "#).unwrap();
//!
//! let templates = sheet.templates();
//! assert_eq!(templates.popup_delete(&()).to_string(), "Löschen");
//! assert_eq!(
//!     templates.week_grid_footer_exceed(&2).render(OutputMode::Html, sheet.theme()),
//!     r#"<span class="calendar-more">+2</span>"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`templates`]: the registry, entry names and dynamic access
//! - [`model`]: the input types
//! - [`time`]: date formatting with calendar tokens (`YYYY.MM.DD hh:mm tt`)
//! - [`sheet`], [`engine`]: YAML sheets and their MiniJinja engine
//! - [`theme`]: terminal styles keyed by class name

pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod sheet;
pub mod templates;
pub mod theme;
pub mod time;

pub use engine::OverrideEngine;
pub use error::RenderError;
pub use model::{
    CurrentTimeModel, EventCategory, EventModel, EventState, MonthDayNameModel, MonthGridModel,
    MoreTitleDate, PopupDateRange, TimezoneLabelModel, WeekDayNameModel,
};
pub use output::{OutputMode, TemplateOutput};
pub use sheet::TemplateSheet;
pub use templates::{TemplateFn, TemplateInput, TemplateName, Templates};
pub use theme::Theme;

pub use daybook_markup as markup;
