use chrono::{DateTime, FixedOffset, TimeZone};
use daybook::{
    CurrentTimeModel, EventCategory, EventModel, EventState, MonthGridModel, MoreTitleDate,
    OutputMode, PopupDateRange, RenderError, TemplateInput, TemplateName, TemplateOutput,
    Templates, Theme, TimezoneLabelModel, WeekDayNameModel,
};
use daybook::markup::Element;
use insta::assert_snapshot;
use serde_json::json;

fn at(offset_hours: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

fn html(out: TemplateOutput) -> String {
    out.render(OutputMode::Html, &Theme::new())
}

// =============================================================================
// Category dispatch
// =============================================================================

#[test]
fn event_matches_category_entry() {
    let templates = Templates::default();
    let mut model = EventModel::new("<b>Review</b>", "time");
    model.start = Some(at(9, 2024, 5, 2, 14, 0));
    model.bg_color = "#00a9ff".into();

    for (tag, entry) in [
        ("milestone", TemplateName::Milestone),
        ("task", TemplateName::Task),
        ("allday", TemplateName::Allday),
        ("time", TemplateName::Time),
    ] {
        model.category = tag.into();
        let direct = templates.render(entry, TemplateInput::Event(&model)).unwrap();
        assert_eq!(templates.event(&model), direct, "category {}", tag);
    }
}

#[test]
fn event_unknown_category_returns_raw_title() {
    let templates = Templates::default();
    let model = EventModel::new("<b>Raw</b>", "background");
    assert_eq!(templates.event(&model), TemplateOutput::Text("<b>Raw</b>".into()));
}

#[test]
fn event_sees_overrides_installed_later() {
    let mut templates = Templates::default();
    let model = EventModel::new("Launch", "milestone");
    let before = templates.event(&model);

    templates.set_milestone(|t, event| {
        Element::span()
            .classes(t.class_names().of(["custom"]))
            .child(event.title.as_str())
            .into()
    });

    assert_ne!(templates.event(&model), before);
    assert_snapshot!(html(templates.event(&model)), @r#"<span class="calendar-custom">Launch</span>"#);
}

#[test]
fn day_grid_title_routes_through_registry() {
    let mut templates = Templates::default();
    assert_snapshot!(
        html(templates.day_grid_title(&EventCategory::Milestone)),
        @r#"<span class="calendar-left-content">Milestone</span>"#
    );

    templates.set_milestone_title(|_, _| "Meilensteine".into());
    assert_eq!(
        templates.day_grid_title(&EventCategory::Milestone).to_string(),
        "Meilensteine"
    );
}

#[test]
fn day_grid_title_sees_allday_override() {
    let mut templates = Templates::default();
    assert_snapshot!(
        html(templates.day_grid_title(&EventCategory::Allday)),
        @r#"<span class="calendar-left-content">All Day</span>"#
    );

    templates.set_allday_title(|_, _| "Ganztägig".into());
    assert_eq!(
        templates.day_grid_title(&EventCategory::Allday),
        TemplateOutput::Text("Ganztägig".into())
    );
    assert_eq!(
        templates.day_grid_title(&EventCategory::Task).to_html(),
        r#"<span class="calendar-left-content">Task</span>"#
    );
}

#[test]
fn day_grid_title_passes_other_tags_through() {
    let templates = Templates::default();
    for tag in ["time", "holiday", "", "Task"] {
        let category = EventCategory::from(tag);
        assert_eq!(
            templates.day_grid_title(&category),
            TemplateOutput::Text(tag.to_string())
        );
    }
}

// =============================================================================
// Formatters
// =============================================================================

#[test]
fn timezone_labels() {
    let templates = Templates::default();
    let offset = |minutes| TimezoneLabelModel {
        display_label: None,
        timezone_offset: Some(minutes),
    };
    assert_eq!(templates.timezone_display_label(&offset(-330)).to_string(), "GMT-05:30");
    assert_eq!(templates.timezone_display_label(&offset(90)).to_string(), "GMT+01:30");
    assert_eq!(
        templates
            .timezone_display_label(&TimezoneLabelModel {
                display_label: Some("KST".into()),
                timezone_offset: Some(540),
            })
            .to_string(),
        "KST"
    );
}

#[test]
fn timezone_label_from_zone() {
    let templates = Templates::default();
    let instant = chrono::Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let model = TimezoneLabelModel::for_zone(chrono_tz::Europe::Berlin, instant);
    assert_eq!(templates.timezone_display_label(&model).to_string(), "GMT+02:00");
}

#[test]
fn popup_detail_date_same_and_different_day() {
    let templates = Templates::default();
    let start = at(9, 2024, 3, 14, 9, 30);

    let same = PopupDateRange {
        is_allday: false,
        start,
        end: at(9, 2024, 3, 14, 18, 0),
    };
    assert_snapshot!(templates.popup_detail_date(&same).to_string(), @"2024.03.14 09:30 am - 06:00 pm");

    let other = PopupDateRange {
        is_allday: false,
        start,
        end: at(9, 2024, 3, 15, 8, 0),
    };
    assert_snapshot!(templates.popup_detail_date(&other).to_string(), @"2024.03.14 09:30 am - 2024.03.15 08:00 am");

    let allday = PopupDateRange {
        is_allday: true,
        start,
        end: at(9, 2024, 3, 16, 0, 0),
    };
    assert_snapshot!(templates.popup_detail_date(&allday).to_string(), @"2024.03.14 - 2024.03.16");
}

#[test]
fn popup_detail_passthroughs() {
    let templates = Templates::default();
    let mut model = EventModel::default();
    assert_eq!(templates.popup_detail_user(&model).to_string(), "");
    assert_eq!(templates.popup_detail_state(&model).to_string(), "Busy");

    model.attendees = vec!["A".into(), "B".into()];
    model.state = Some(EventState::Free);
    assert_eq!(templates.popup_detail_user(&model).to_string(), "A, B");
    assert_eq!(templates.popup_detail_state(&model).to_string(), "Free");
}

#[test]
fn time_without_start_is_sanitized_text() {
    let templates = Templates::default();
    let model = EventModel::new("<b>X</b>", "time");
    assert_eq!(templates.time(&model), TemplateOutput::Text("X".into()));
}

#[test]
fn month_view_fragments() {
    let templates = Templates::default();
    assert_snapshot!(
        html(templates.month_more_title_date(&MoreTitleDate { date: 2, day: 0 })),
        @r#"<span class="calendar-more-title-date">2</span><span class="calendar-more-title-day">Sun</span>"#
    );
    assert_snapshot!(
        html(templates.month_grid_header(&MonthGridModel { date: "2024-02-09".into(), is_today: false })),
        @r#"<span class="calendar-weekday-grid-date">9</span>"#
    );
    assert_snapshot!(
        html(templates.month_grid_header_exceed(&5)),
        @r#"<span class="calendar-weekday-grid-more-events">5 more</span>"#
    );
}

#[test]
fn week_dayname_markup() {
    let templates = Templates::default();
    let out = templates.week_dayname(&WeekDayNameModel {
        date: 21,
        day: 3,
        day_name: "Wed".into(),
        is_today: true,
    });
    assert_eq!(
        out.render(OutputMode::Markup, &Theme::new()),
        "[calendar-dayname-date]21[/calendar-dayname-date]\u{a0}\u{a0}[calendar-dayname-name]Wed[/calendar-dayname-name]"
    );
}

#[test]
fn current_time_patterns() {
    let templates = Templates::default();
    let clock = CurrentTimeModel {
        time: at(-5, 2024, 11, 3, 0, 45),
        format: Some("YYYY-MM-DD h:mm tt".into()),
    };
    assert_eq!(templates.timegrid_current_time(&clock).to_string(), "2024-11-03 12:45 am");
    assert_eq!(templates.timegrid_display_primary_time(&clock).to_string(), "12 am");
    assert_eq!(templates.timegrid_display_time(&clock).to_string(), "00:45");
}

// =============================================================================
// Access by name
// =============================================================================

#[test]
fn render_value_for_every_entry_with_defaults() {
    let templates = Templates::default();
    let event = json!({ "title": "Sync", "category": "time", "start": "2024-01-01T10:00:00+00:00" });
    let clock = json!({ "time": "2024-01-01T10:00:00+00:00" });
    let range = json!({ "start": "2024-01-01T10:00:00+00:00", "end": "2024-01-01T11:00:00+00:00" });

    for name in TemplateName::ALL {
        let value = match name.input_kind() {
            "None" => serde_json::Value::Null,
            "Event" => event.clone(),
            "Category" => json!("task"),
            "Count" => json!(3),
            "MoreTitle" => json!({ "date": 1, "day": 1 }),
            "MonthGrid" => json!({ "date": "2024-01-01" }),
            "MonthDayName" => json!({ "label": "Mon" }),
            "WeekDayName" => json!({ "date": 1, "dayName": "Mon" }),
            "Timezone" => json!({ "timezoneOffset": 0 }),
            "CurrentTime" => clock.clone(),
            "DateRange" => range.clone(),
            other => panic!("unexpected input kind {}", other),
        };
        assert!(
            templates.render_value(*name, value).is_ok(),
            "{} failed to render",
            name
        );
    }
}

#[test]
fn render_value_reads_timestamps_without_offset() {
    let templates = Templates::default();
    let out = templates
        .render_value(
            TemplateName::PopupDetailDate,
            json!({ "start": "2024-01-01T09:00", "end": "2024-01-01T17:00" }),
        )
        .unwrap();
    assert_eq!(out.to_string(), "2024.01.01 09:00 am - 05:00 pm");

    let out = templates
        .render_value(
            TemplateName::Time,
            json!({ "title": "Sync", "start": "2024-01-01T09:00:00" }),
        )
        .unwrap();
    assert_eq!(out.text_content(), "09:00\u{a0}Sync");

    let out = templates
        .render_value(
            TemplateName::TimegridCurrentTime,
            json!({ "time": "2024-01-01 18:05" }),
        )
        .unwrap();
    assert_eq!(out.to_string(), "18:05");
}

#[test]
fn render_value_reports_shape_errors() {
    let templates = Templates::default();
    let err = templates
        .render_value(TemplateName::PopupDetailDate, json!({ "start": "yesterday" }))
        .unwrap_err();
    assert!(matches!(err, RenderError::InvalidInput { template: "popupDetailDate", .. }));
}

#[test]
fn render_by_name_matches_typed_call() {
    let templates = Templates::default();
    let name: TemplateName = "monthGridHeaderExceed".parse().unwrap();
    assert_eq!(
        templates.render(name, TemplateInput::Count(7)).unwrap(),
        templates.month_grid_header_exceed(&7)
    );
    assert!(matches!(
        templates.render(name, TemplateInput::None),
        Err(RenderError::InputMismatch { expected: "Count", actual: "None", .. })
    ));
}

#[test]
fn registry_works_across_threads() {
    let mut templates = Templates::default();
    templates.set_week_grid_footer_exceed(|_, n| format!("{} weitere", n).into());
    let templates = std::sync::Arc::new(templates);

    let handles: Vec<_> = (0..4usize)
        .map(|i| {
            let templates = std::sync::Arc::clone(&templates);
            std::thread::spawn(move || templates.week_grid_footer_exceed(&i).to_string())
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["0 weitere", "1 weitere", "2 weitere", "3 weitere"]);
}
