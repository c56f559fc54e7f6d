//! Property-based tests for the formatters and dispatch rules.

use chrono::{FixedOffset, TimeZone};
use daybook::time::{format_gmt_offset, leading_zero, to_format};
use daybook::{
    EventCategory, EventModel, PopupDateRange, TemplateOutput, Templates, TimezoneLabelModel,
};
use proptest::prelude::*;

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("milestone".to_string()),
        Just("task".to_string()),
        Just("allday".to_string()),
        Just("time".to_string()),
        "[a-zA-Z]{0,10}",
    ]
}

proptest! {
    /// Durations render as zero-padded hours and minutes, hours unbounded.
    #[test]
    fn durations_split_hours_and_minutes(minutes in 0u32..100_000) {
        let templates = Templates::default();
        let mut event = EventModel::default();
        event.going_duration = minutes;
        event.coming_duration = minutes;

        let clock = format!(
            "{}:{}",
            leading_zero(i64::from(minutes / 60), 2),
            leading_zero(i64::from(minutes % 60), 2)
        );
        prop_assert_eq!(templates.going_duration(&event).to_string(), format!("GoingTime {}", clock));
        prop_assert_eq!(templates.coming_duration(&event).to_string(), format!("ComingTime {}", clock));
    }

    /// Offsets read back to the same number of minutes.
    #[test]
    fn gmt_offset_reads_back(offset in -1440i32..=1440) {
        let label = format_gmt_offset(offset);
        let sign = if offset < 0 { -1 } else { 1 };
        let prefix = if offset < 0 { "GMT-" } else { "GMT+" };
        prop_assert!(label.starts_with(prefix));

        let (hours, minutes) = label[4..].split_once(':').unwrap();
        let total = hours.parse::<i32>().unwrap() * 60 + minutes.parse::<i32>().unwrap();
        prop_assert_eq!(sign * total, offset);
        prop_assert_eq!(minutes.len(), 2);
        prop_assert!(hours.len() >= 2);
    }

    /// An explicit label always wins over the offset.
    #[test]
    fn display_label_wins(label in "[A-Z]{1,5}", offset in proptest::option::of(-720i32..=840)) {
        let templates = Templates::default();
        let zone = TimezoneLabelModel { display_label: Some(label.clone()), timezone_offset: offset };
        prop_assert_eq!(templates.timezone_display_label(&zone).to_string(), label);
    }

    /// `dayGridTitle` returns the tag itself outside milestone/task/allday.
    #[test]
    fn day_grid_title_echoes_other_tags(tag in category_strategy()) {
        let templates = Templates::default();
        let category = EventCategory::from(tag.as_str());
        let out = templates.day_grid_title(&category);
        match category {
            EventCategory::Milestone | EventCategory::Task | EventCategory::Allday => {
                prop_assert!(out.is_fragment());
            }
            _ => prop_assert_eq!(out, TemplateOutput::Text(tag)),
        }
    }

    /// `event` never renders differently from the entry of its category.
    #[test]
    fn event_agrees_with_category_entry(tag in category_strategy(), title in ".{0,24}") {
        let templates = Templates::default();
        let event = EventModel::new(title.clone(), tag.as_str());
        let expected = match event.category {
            EventCategory::Milestone => templates.milestone(&event),
            EventCategory::Task => templates.task(&event),
            EventCategory::Allday => templates.allday(&event),
            EventCategory::Time => templates.time(&event),
            EventCategory::Other(_) => TemplateOutput::Text(title),
        };
        prop_assert_eq!(templates.event(&event), expected);
    }

    /// Same-day ranges collapse the end to a clock time.
    #[test]
    fn popup_date_same_day_collapses(
        day in 1u32..=28,
        start_hour in 0u32..12,
        length in 0u32..12,
        allday in any::<bool>(),
    ) {
        let zone = FixedOffset::east_opt(0).unwrap();
        let start = zone.with_ymd_and_hms(2024, 2, day, start_hour, 0, 0).unwrap();
        let end = zone.with_ymd_and_hms(2024, 2, day, start_hour + length, 0, 0).unwrap();
        let out = Templates::default()
            .popup_detail_date(&PopupDateRange { is_allday: allday, start, end })
            .to_string();

        if allday {
            prop_assert_eq!(out, to_format(&start, "YYYY.MM.DD"));
        } else {
            prop_assert_eq!(
                out,
                format!("{} - {}", to_format(&start, "YYYY.MM.DD hh:mm tt"), to_format(&end, "hh:mm tt"))
            );
        }
    }
}
