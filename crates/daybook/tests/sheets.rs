use std::io::Write;

use daybook::{
    EventCategory, EventModel, OutputMode, RenderError, TemplateName, TemplateSheet, Templates,
};
use insta::assert_snapshot;
use tempfile::NamedTempFile;

const GERMAN: &str = r#"
classPrefix: "tui-"
labels:
  popupSave: Speichern
  popupDelete: Löschen
  taskTitle: "[left-content]Aufgaben[/left-content]"
templates:
  task: "[task-marker]#[/task-marker]{{ title | strip_tags }}"
  goingDuration: "Hinweg {{ (goingDuration // 60) | pad(2) }}:{{ (goingDuration % 60) | pad(2) }}"
  popupDetailDate: "{{ start | datefmt('DD.MM.YYYY') }}"
theme:
  tui-left-content:
    fg: cyan
    bold: true
  tui-task-marker: tui-left-content
"#;

#[test]
fn sheet_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(GERMAN.as_bytes()).unwrap();

    let sheet = TemplateSheet::from_path(file.path()).unwrap();
    assert_eq!(sheet.class_prefix(), Some("tui-"));
    assert_eq!(sheet.theme().len(), 2);
    assert_eq!(
        sheet.overridden(),
        vec![
            TemplateName::Task,
            TemplateName::TaskTitle,
            TemplateName::GoingDuration,
            TemplateName::PopupSave,
            TemplateName::PopupDelete,
            TemplateName::PopupDetailDate,
        ]
    );
}

#[test]
fn compiled_entries_flow_through_dispatch() {
    let sheet = TemplateSheet::from_yaml(GERMAN).unwrap();
    let templates = sheet.templates();

    let task = EventModel::new("<b>Steuern</b>", "task");
    assert_snapshot!(
        templates.event(&task).render(OutputMode::Html, sheet.theme()),
        @r#"<span class="tui-task-marker">#</span>Steuern"#
    );
    assert_snapshot!(
        templates.day_grid_title(&EventCategory::Task).render(OutputMode::Markup, sheet.theme()),
        @"[tui-left-content]Aufgaben[/tui-left-content]"
    );
}

#[test]
fn compiled_entries_render_inputs() {
    let templates = TemplateSheet::from_yaml(GERMAN).unwrap().templates();

    let mut event = EventModel::default();
    event.going_duration = 75;
    assert_eq!(templates.going_duration(&event).to_string(), "Hinweg 01:15");

    let out = templates
        .render_value(
            TemplateName::PopupDetailDate,
            serde_json::json!({
                "start": "2024-12-24T18:00:00+01:00",
                "end": "2024-12-24T22:00:00+01:00"
            }),
        )
        .unwrap();
    assert_eq!(out.to_string(), "24.12.2024");
}

#[test]
fn failing_override_falls_back_to_previous_entry() {
    let sheet = TemplateSheet::from_yaml(
        r#"
labels:
  timezoneDisplayLabel: "UTC?"
templates:
  timezoneDisplayLabel: "{{ displayLabel | datefmt('HH:mm') }}"
  monthDayname: "{{ label | datefmt('HH:mm') }}"
"#,
    )
    .unwrap();
    let templates = sheet.templates();

    // Compiled template errors on any input, so the label underneath answers.
    let zone = daybook::TimezoneLabelModel {
        display_label: Some("KST".into()),
        timezone_offset: None,
    };
    assert_eq!(templates.timezone_display_label(&zone).to_string(), "UTC?");

    let day = daybook::MonthDayNameModel { label: "Mo".into() };
    assert_eq!(templates.month_dayname(&day).to_string(), "Mo");
}

#[test]
fn sheet_applies_on_top_of_code_overrides() {
    let sheet = TemplateSheet::from_yaml("labels:\n  popupEdit: Bearbeiten\n").unwrap();
    let mut templates = Templates::default();
    templates.set_popup_update(|_, _| "Aktualisieren".into());
    sheet.apply(&mut templates);

    assert_eq!(templates.popup_edit(&()).to_string(), "Bearbeiten");
    assert_eq!(templates.popup_update(&()).to_string(), "Aktualisieren");
}

#[test]
fn sheet_errors_are_reported_at_load() {
    assert!(matches!(
        TemplateSheet::from_yaml("templates:\n  bogus: x\n"),
        Err(RenderError::UnknownTemplate(_))
    ));
    assert!(matches!(
        TemplateSheet::from_yaml("templates:\n  task: \"{% if %}\"\n"),
        Err(RenderError::Template(_))
    ));
    assert!(matches!(
        TemplateSheet::from_yaml("classPrefix: [1, 2]\n"),
        Err(RenderError::Sheet(_))
    ));
}
