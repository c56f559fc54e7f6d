//! Built-in entries.

use daybook_markup::{strip_tags, Element, Fragment};

use crate::model::{
    CurrentTimeModel, EventModel, MonthDayNameModel, MonthGridModel, MoreTitleDate,
    PopupDateRange, TimezoneLabelModel, WeekDayNameModel,
};
use crate::output::TemplateOutput;
use crate::time::{capitalize, day_name, format_gmt_offset, hours_minutes, is_same_date, to_format};

use super::Templates;

const CLOCK: &str = "HH:mm";
const PRIMARY_CLOCK: &str = "hh tt";
const DATE: &str = "YYYY.MM.DD";
const DATE_TIME: &str = "YYYY.MM.DD hh:mm tt";
const NBSP: &str = "\u{a0}";

fn left_content(templates: &Templates, label: &str) -> TemplateOutput {
    Element::span()
        .classes(templates.class_names().of(["left-content"]))
        .child(label)
        .into()
}

pub(super) fn milestone(templates: &Templates, model: &EventModel) -> TemplateOutput {
    let mut title = Element::span();
    if !model.bg_color.is_empty() {
        title = title.style("background-color", model.bg_color.as_str());
    }

    Fragment::new()
        .with(Element::span().classes(templates.class_names().of(["icon", "ic-milestone"])))
        .with(title.child(strip_tags(&model.title)))
        .into()
}

pub(super) fn milestone_title(templates: &Templates, _: &()) -> TemplateOutput {
    left_content(templates, "Milestone")
}

pub(super) fn task(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(format!("#{}", model.title))
}

pub(super) fn task_title(templates: &Templates, _: &()) -> TemplateOutput {
    left_content(templates, "Task")
}

pub(super) fn allday(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(strip_tags(&model.title))
}

pub(super) fn allday_title(templates: &Templates, _: &()) -> TemplateOutput {
    left_content(templates, "All Day")
}

pub(super) fn time(_: &Templates, model: &EventModel) -> TemplateOutput {
    let title = strip_tags(&model.title);
    match &model.start {
        Some(start) => Element::span()
            .child(Element::strong().child(to_format(start, CLOCK)))
            .child(NBSP)
            .child(Element::span().child(title))
            .into(),
        None => TemplateOutput::Text(title),
    }
}

pub(super) fn going_duration(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(format!("GoingTime {}", hours_minutes(model.going_duration)))
}

pub(super) fn coming_duration(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(format!("ComingTime {}", hours_minutes(model.coming_duration)))
}

pub(super) fn month_more_title_date(templates: &Templates, more: &MoreTitleDate) -> TemplateOutput {
    let classes = templates.class_names();
    Fragment::new()
        .with(
            Element::span()
                .classes(classes.of(["more-title-date"]))
                .child(more.date.to_string()),
        )
        .with(
            Element::span()
                .classes(classes.of(["more-title-day"]))
                .child(capitalize(day_name(more.day))),
        )
        .into()
}

pub(super) fn month_grid_header(templates: &Templates, grid: &MonthGridModel) -> TemplateOutput {
    let classes = templates
        .class_names()
        .list()
        .add("weekday-grid-date")
        .add_if("weekday-grid-date-decorator", grid.is_today);

    Element::span()
        .classes(classes)
        .child(day_of_month(&grid.date))
        .into()
}

// Leading digits of the last `-` segment with zeros dropped ("2024-03-07" -> "7").
// A segment without leading digits is shown as is.
fn day_of_month(date: &str) -> String {
    let segment = date.rsplit('-').next().unwrap_or_default().trim();
    let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return segment.to_string();
    }
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub(super) fn month_more_close(_: &Templates, _: &()) -> TemplateOutput {
    TemplateOutput::Text(String::new())
}

pub(super) fn month_grid_footer(_: &Templates, _: &MonthGridModel) -> TemplateOutput {
    TemplateOutput::Text(String::new())
}

pub(super) fn month_grid_footer_exceed(_: &Templates, _: &usize) -> TemplateOutput {
    TemplateOutput::Text(String::new())
}

pub(super) fn month_grid_header_exceed(templates: &Templates, hidden: &usize) -> TemplateOutput {
    Element::span()
        .classes(templates.class_names().of(["weekday-grid-more-events"]))
        .child(format!("{} more", hidden))
        .into()
}

pub(super) fn month_dayname(_: &Templates, day: &MonthDayNameModel) -> TemplateOutput {
    TemplateOutput::Text(day.label.clone())
}

pub(super) fn week_dayname(templates: &Templates, day: &WeekDayNameModel) -> TemplateOutput {
    let classes = templates.class_names();
    Fragment::new()
        .with(
            Element::span()
                .classes(classes.of(["dayname-date"]))
                .child(day.date.to_string()),
        )
        .with(NBSP.repeat(2))
        .with(
            Element::span()
                .classes(classes.of(["dayname-name"]))
                .child(day.day_name.as_str()),
        )
        .into()
}

pub(super) fn week_grid_footer_exceed(_: &Templates, hidden: &usize) -> TemplateOutput {
    TemplateOutput::Text(format!("+{}", hidden))
}

pub(super) fn collapse_btn_title(templates: &Templates, _: &()) -> TemplateOutput {
    Element::span()
        .classes(templates.class_names().of(["collapse-btn-icon"]))
        .into()
}

pub(super) fn timezone_display_label(_: &Templates, zone: &TimezoneLabelModel) -> TemplateOutput {
    let label = match (&zone.display_label, zone.timezone_offset) {
        (Some(label), _) => label.clone(),
        (None, Some(offset)) => format_gmt_offset(offset),
        (None, None) => String::new(),
    };
    TemplateOutput::Text(label)
}

pub(super) fn timegrid_display_primary_time(_: &Templates, clock: &CurrentTimeModel) -> TemplateOutput {
    TemplateOutput::Text(to_format(&clock.time, PRIMARY_CLOCK))
}

pub(super) fn timegrid_display_time(_: &Templates, clock: &CurrentTimeModel) -> TemplateOutput {
    TemplateOutput::Text(to_format(&clock.time, CLOCK))
}

pub(super) fn timegrid_current_time(_: &Templates, clock: &CurrentTimeModel) -> TemplateOutput {
    let pattern = clock.format.as_deref().unwrap_or(CLOCK);
    TemplateOutput::Text(to_format(&clock.time, pattern))
}

macro_rules! labels {
    ($($entry:ident => $text:literal,)*) => {
        $(
            pub(super) fn $entry(_: &Templates, _: &()) -> TemplateOutput {
                TemplateOutput::Text($text.to_string())
            }
        )*
    };
}

labels! {
    popup_is_allday => "All day",
    popup_state_free => "Free",
    popup_state_busy => "Busy",
    title_placeholder => "Subject",
    location_placeholder => "Location",
    start_date_placeholder => "Start date",
    end_date_placeholder => "End date",
    popup_save => "Save",
    popup_update => "Update",
    popup_edit => "Edit",
    popup_delete => "Delete",
}

pub(super) fn popup_detail_date(_: &Templates, range: &PopupDateRange) -> TemplateOutput {
    let same_day = is_same_date(&range.start, &range.end);

    let text = if range.is_allday {
        let start = to_format(&range.start, DATE);
        if same_day {
            start
        } else {
            format!("{} - {}", start, to_format(&range.end, DATE))
        }
    } else {
        let end_pattern = if same_day { "hh:mm tt" } else { DATE_TIME };
        format!(
            "{} - {}",
            to_format(&range.start, DATE_TIME),
            to_format(&range.end, end_pattern)
        )
    };

    TemplateOutput::Text(text)
}

pub(super) fn popup_detail_location(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(model.location.clone())
}

pub(super) fn popup_detail_user(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(model.attendees.join(", "))
}

pub(super) fn popup_detail_state(_: &Templates, model: &EventModel) -> TemplateOutput {
    let state = model.state.map_or("Busy", |state| state.as_str());
    TemplateOutput::Text(state.to_string())
}

pub(super) fn popup_detail_repeat(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(model.recurrence_rule.clone())
}

pub(super) fn popup_detail_body(_: &Templates, model: &EventModel) -> TemplateOutput {
    TemplateOutput::Text(model.body.clone())
}
