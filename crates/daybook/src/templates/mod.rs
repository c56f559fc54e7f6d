//! The template registry.
//!
//! [`Templates`] holds one slot per [`TemplateName`]. Each slot is a pure
//! function that receives the live registry and its input and returns a
//! [`TemplateOutput`]. Entries that forward to other entries (`event`,
//! `dayGridTitle`) do so through the registry they are handed, so an
//! override installed on a leaf entry is seen by every dispatching call
//! made after it.
//!
//! # Typed access
//!
//! ```rust
//! use daybook::{EventModel, Templates};
//!
//! let mut templates = Templates::default();
//! let event = EventModel::new("Ship <b>it</b>", "task");
//! assert_eq!(templates.event(&event).to_string(), "#Ship <b>it</b>");
//!
//! templates.set_task(|_, event| format!("[ ] {}", event.title).into());
//! assert_eq!(templates.event(&event).to_string(), "[ ] Ship <b>it</b>");
//! ```
//!
//! # Access by name
//!
//! ```rust
//! use daybook::{TemplateInput, TemplateName, Templates};
//!
//! let templates = Templates::default();
//! let name: TemplateName = "weekGridFooterExceed".parse().unwrap();
//! let out = templates.render(name, TemplateInput::Count(4)).unwrap();
//! assert_eq!(out.to_string(), "+4");
//!
//! let out = templates
//!     .render_value(TemplateName::PopupDetailUser, serde_json::json!({ "attendees": ["A", "B"] }))
//!     .unwrap();
//! assert_eq!(out.to_string(), "A, B");
//! ```

mod defaults;
mod dispatch;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use daybook_markup::ClassNames;

use crate::engine::OverrideEngine;
use crate::error::RenderError;
use crate::model::{
    CurrentTimeModel, EventCategory, EventModel, MonthDayNameModel, MonthGridModel, MoreTitleDate,
    PopupDateRange, TimezoneLabelModel, WeekDayNameModel,
};
use crate::output::TemplateOutput;

/// A template slot: the live registry and one input in, output out.
pub type TemplateFn<I> = Arc<dyn Fn(&Templates, &I) -> TemplateOutput + Send + Sync>;

/// A borrowed input for [`Templates::render`].
#[derive(Debug, Clone, Copy)]
pub enum TemplateInput<'a> {
    /// For entries that take no input.
    None,
    Event(&'a EventModel),
    Category(&'a EventCategory),
    /// A number of hidden events.
    Count(usize),
    MoreTitle(&'a MoreTitleDate),
    MonthGrid(&'a MonthGridModel),
    MonthDayName(&'a MonthDayNameModel),
    WeekDayName(&'a WeekDayNameModel),
    Timezone(&'a TimezoneLabelModel),
    CurrentTime(&'a CurrentTimeModel),
    DateRange(&'a PopupDateRange),
}

impl TemplateInput<'_> {
    /// Name of the input shape, as reported in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            TemplateInput::None => "None",
            TemplateInput::Event(_) => "Event",
            TemplateInput::Category(_) => "Category",
            TemplateInput::Count(_) => "Count",
            TemplateInput::MoreTitle(_) => "MoreTitle",
            TemplateInput::MonthGrid(_) => "MonthGrid",
            TemplateInput::MonthDayName(_) => "MonthDayName",
            TemplateInput::WeekDayName(_) => "WeekDayName",
            TemplateInput::Timezone(_) => "Timezone",
            TemplateInput::CurrentTime(_) => "CurrentTime",
            TemplateInput::DateRange(_) => "DateRange",
        }
    }
}

macro_rules! define_templates {
    ($(
        $(#[$meta:meta])*
        $field:ident, $setter:ident, $variant:ident = $name:literal:
            $input:ty, $kind:ident $(($bind:ident))? => $arg:expr, $default:path;
    )*) => {
        /// Every registry entry, by its stable camelCase name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TemplateName {
            $($(#[$meta])* $variant,)*
        }

        impl TemplateName {
            /// All entries in registry order.
            pub const ALL: &'static [TemplateName] = &[$(TemplateName::$variant,)*];

            /// The camelCase name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TemplateName::$variant => $name,)*
                }
            }

            /// The [`TemplateInput`] variant this entry accepts.
            pub fn input_kind(&self) -> &'static str {
                match self {
                    $(TemplateName::$variant => stringify!($kind),)*
                }
            }
        }

        impl FromStr for TemplateName {
            type Err = RenderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(TemplateName::$variant),)*
                    other => Err(RenderError::UnknownTemplate(other.to_string())),
                }
            }
        }

        /// The registry: one overridable slot per [`TemplateName`].
        #[derive(Clone)]
        pub struct Templates {
            class_names: ClassNames,
            $($field: TemplateFn<$input>,)*
        }

        impl Templates {
            $(
                $(#[$meta])*
                pub fn $field(&self, input: &$input) -> TemplateOutput {
                    (self.$field)(self, input)
                }

                #[doc = concat!("Replaces the `", $name, "` entry.")]
                pub fn $setter<F>(&mut self, f: F) -> &mut Self
                where
                    F: Fn(&Templates, &$input) -> TemplateOutput + Send + Sync + 'static,
                {
                    tracing::debug!(template = $name, "entry overridden");
                    self.$field = Arc::new(f);
                    self
                }
            )*

            /// Renders an entry by name.
            ///
            /// Fails with [`RenderError::InputMismatch`] when `input` does not
            /// have the entry's shape.
            pub fn render(
                &self,
                name: TemplateName,
                input: TemplateInput<'_>,
            ) -> Result<TemplateOutput, RenderError> {
                match (name, input) {
                    $((TemplateName::$variant, TemplateInput::$kind $(($bind))?) => {
                        Ok((self.$field)(self, $arg))
                    })*
                    (name, input) => Err(RenderError::InputMismatch {
                        template: name.as_str(),
                        expected: name.input_kind(),
                        actual: input.kind(),
                    }),
                }
            }

            /// Renders an entry by name from a dynamically-typed input.
            ///
            /// The value is deserialized into the entry's input type; entries
            /// without input take `null`.
            pub fn render_value(
                &self,
                name: TemplateName,
                value: serde_json::Value,
            ) -> Result<TemplateOutput, RenderError> {
                match name {
                    $(TemplateName::$variant => {
                        let input: $input = serde_json::from_value(value)
                            .map_err(|source| RenderError::InvalidInput { template: $name, source })?;
                        Ok((self.$field)(self, &input))
                    })*
                }
            }

            /// Replaces an entry with constant output.
            ///
            /// `label` is read as bracket markup against the current class
            /// prefix, so `"[left-content]Aufgaben[/left-content]"` keeps the
            /// styled span while `"Speichern"` is plain text.
            pub fn set_label(&mut self, name: TemplateName, label: &str) -> &mut Self {
                let output = TemplateOutput::from_markup(label, &self.class_names);
                tracing::debug!(template = name.as_str(), "label overridden");
                match name {
                    $(TemplateName::$variant => {
                        self.$field = Arc::new(move |_: &Templates, _: &$input| output.clone());
                    })*
                }
                self
            }

            /// Replaces an entry with a compiled sheet template.
            ///
            /// The replaced entry is kept as a fallback for inputs the
            /// template fails on.
            pub(crate) fn set_compiled(
                &mut self,
                name: TemplateName,
                engine: &Arc<OverrideEngine>,
            ) -> &mut Self {
                tracing::debug!(template = name.as_str(), "compiled override installed");
                match name {
                    $(TemplateName::$variant => {
                        let previous = Arc::clone(&self.$field);
                        let engine = Arc::clone(engine);
                        self.$field = Arc::new(move |templates: &Templates, input: &$input| {
                            match engine.render(name, input) {
                                Ok(markup) => {
                                    TemplateOutput::from_markup(&markup, templates.class_names())
                                }
                                Err(err) => {
                                    tracing::warn!(
                                        template = $name,
                                        error = %err,
                                        "override failed, falling back"
                                    );
                                    previous(templates, input)
                                }
                            }
                        });
                    })*
                }
                self
            }
        }

        impl Default for Templates {
            fn default() -> Self {
                Self {
                    class_names: ClassNames::default(),
                    $($field: Arc::new($default),)*
                }
            }
        }
    };
}

define_templates! {
    /// Milestone pill: icon plus the sanitized title on the event color.
    milestone, set_milestone, Milestone = "milestone":
        EventModel, Event(model) => model, defaults::milestone;
    milestone_title, set_milestone_title, MilestoneTitle = "milestoneTitle":
        (), None => &(), defaults::milestone_title;
    /// `#` followed by the raw title.
    task, set_task, Task = "task":
        EventModel, Event(model) => model, defaults::task;
    task_title, set_task_title, TaskTitle = "taskTitle":
        (), None => &(), defaults::task_title;
    allday, set_allday, Allday = "allday":
        EventModel, Event(model) => model, defaults::allday;
    allday_title, set_allday_title, AlldayTitle = "alldayTitle":
        (), None => &(), defaults::allday_title;
    /// Start time and sanitized title.
    time, set_time, Time = "time":
        EventModel, Event(model) => model, defaults::time;
    going_duration, set_going_duration, GoingDuration = "goingDuration":
        EventModel, Event(model) => model, defaults::going_duration;
    coming_duration, set_coming_duration, ComingDuration = "comingDuration":
        EventModel, Event(model) => model, defaults::coming_duration;
    month_more_title_date, set_month_more_title_date, MonthMoreTitleDate = "monthMoreTitleDate":
        MoreTitleDate, MoreTitle(more) => more, defaults::month_more_title_date;
    month_more_close, set_month_more_close, MonthMoreClose = "monthMoreClose":
        (), None => &(), defaults::month_more_close;
    /// Day-of-month badge of a month grid cell.
    month_grid_header, set_month_grid_header, MonthGridHeader = "monthGridHeader":
        MonthGridModel, MonthGrid(grid) => grid, defaults::month_grid_header;
    month_grid_header_exceed, set_month_grid_header_exceed, MonthGridHeaderExceed = "monthGridHeaderExceed":
        usize, Count(count) => &count, defaults::month_grid_header_exceed;
    month_grid_footer, set_month_grid_footer, MonthGridFooter = "monthGridFooter":
        MonthGridModel, MonthGrid(grid) => grid, defaults::month_grid_footer;
    month_grid_footer_exceed, set_month_grid_footer_exceed, MonthGridFooterExceed = "monthGridFooterExceed":
        usize, Count(count) => &count, defaults::month_grid_footer_exceed;
    month_dayname, set_month_dayname, MonthDayname = "monthDayname":
        MonthDayNameModel, MonthDayName(day) => day, defaults::month_dayname;
    week_dayname, set_week_dayname, WeekDayname = "weekDayname":
        WeekDayNameModel, WeekDayName(day) => day, defaults::week_dayname;
    week_grid_footer_exceed, set_week_grid_footer_exceed, WeekGridFooterExceed = "weekGridFooterExceed":
        usize, Count(count) => &count, defaults::week_grid_footer_exceed;
    /// Row title of the day grid, by category.
    day_grid_title, set_day_grid_title, DayGridTitle = "dayGridTitle":
        EventCategory, Category(category) => category, dispatch::day_grid_title;
    /// An event, rendered by the entry of its category.
    event, set_event, Event = "event":
        EventModel, Event(model) => model, dispatch::event;
    collapse_btn_title, set_collapse_btn_title, CollapseBtnTitle = "collapseBtnTitle":
        (), None => &(), defaults::collapse_btn_title;
    timezone_display_label, set_timezone_display_label, TimezoneDisplayLabel = "timezoneDisplayLabel":
        TimezoneLabelModel, Timezone(zone) => zone, defaults::timezone_display_label;
    timegrid_display_primary_time, set_timegrid_display_primary_time, TimegridDisplayPrimaryTime = "timegridDisplayPrimaryTime":
        CurrentTimeModel, CurrentTime(clock) => clock, defaults::timegrid_display_primary_time;
    timegrid_display_time, set_timegrid_display_time, TimegridDisplayTime = "timegridDisplayTime":
        CurrentTimeModel, CurrentTime(clock) => clock, defaults::timegrid_display_time;
    timegrid_current_time, set_timegrid_current_time, TimegridCurrentTime = "timegridCurrentTime":
        CurrentTimeModel, CurrentTime(clock) => clock, defaults::timegrid_current_time;
    popup_is_allday, set_popup_is_allday, PopupIsAllday = "popupIsAllday":
        (), None => &(), defaults::popup_is_allday;
    popup_state_free, set_popup_state_free, PopupStateFree = "popupStateFree":
        (), None => &(), defaults::popup_state_free;
    popup_state_busy, set_popup_state_busy, PopupStateBusy = "popupStateBusy":
        (), None => &(), defaults::popup_state_busy;
    title_placeholder, set_title_placeholder, TitlePlaceholder = "titlePlaceholder":
        (), None => &(), defaults::title_placeholder;
    location_placeholder, set_location_placeholder, LocationPlaceholder = "locationPlaceholder":
        (), None => &(), defaults::location_placeholder;
    start_date_placeholder, set_start_date_placeholder, StartDatePlaceholder = "startDatePlaceholder":
        (), None => &(), defaults::start_date_placeholder;
    end_date_placeholder, set_end_date_placeholder, EndDatePlaceholder = "endDatePlaceholder":
        (), None => &(), defaults::end_date_placeholder;
    popup_save, set_popup_save, PopupSave = "popupSave":
        (), None => &(), defaults::popup_save;
    popup_update, set_popup_update, PopupUpdate = "popupUpdate":
        (), None => &(), defaults::popup_update;
    popup_edit, set_popup_edit, PopupEdit = "popupEdit":
        (), None => &(), defaults::popup_edit;
    popup_delete, set_popup_delete, PopupDelete = "popupDelete":
        (), None => &(), defaults::popup_delete;
    /// Date line of the detail popup, collapsed when start and end share a date.
    popup_detail_date, set_popup_detail_date, PopupDetailDate = "popupDetailDate":
        PopupDateRange, DateRange(range) => range, defaults::popup_detail_date;
    popup_detail_location, set_popup_detail_location, PopupDetailLocation = "popupDetailLocation":
        EventModel, Event(model) => model, defaults::popup_detail_location;
    popup_detail_user, set_popup_detail_user, PopupDetailUser = "popupDetailUser":
        EventModel, Event(model) => model, defaults::popup_detail_user;
    popup_detail_state, set_popup_detail_state, PopupDetailState = "popupDetailState":
        EventModel, Event(model) => model, defaults::popup_detail_state;
    popup_detail_repeat, set_popup_detail_repeat, PopupDetailRepeat = "popupDetailRepeat":
        EventModel, Event(model) => model, defaults::popup_detail_repeat;
    popup_detail_body, set_popup_detail_body, PopupDetailBody = "popupDetailBody":
        EventModel, Event(model) => model, defaults::popup_detail_body;
}

impl Templates {
    /// Class names used by fragment-producing entries.
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Changes the class prefix. Labels set earlier keep their classes.
    pub fn set_class_names(&mut self, class_names: ClassNames) -> &mut Self {
        self.class_names = class_names;
        self
    }
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Templates")
            .field("class_names", &self.class_names)
            .field("entries", &TemplateName::ALL.len())
            .finish()
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
