//! Template sheets: YAML documents that customize a registry.
//!
//! ```yaml
//! classPrefix: "tui-"
//! labels:
//!   popupSave: Speichern
//!   taskTitle: "[left-content]Aufgaben[/left-content]"
//! templates:
//!   goingDuration: "→ {{ goingDuration }} min"
//! theme:
//!   tui-left-content:
//!     fg: cyan
//!     bold: true
//! ```
//!
//! Every key under `labels` and `templates` must be a registry entry name.
//! Templates are compiled when the sheet is loaded, so a typo or a syntax
//! error is reported before anything renders.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use daybook_markup::ClassNames;
use serde::Deserialize;

use crate::engine::OverrideEngine;
use crate::error::RenderError;
use crate::templates::{TemplateName, Templates};
use crate::theme::Theme;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SheetFile {
    class_prefix: Option<String>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    templates: BTreeMap<String, String>,
    #[serde(default)]
    theme: serde_yaml::Value,
}

/// A parsed and compiled template sheet.
#[derive(Debug, Default)]
pub struct TemplateSheet {
    class_prefix: Option<String>,
    labels: Vec<(TemplateName, String)>,
    templates: Vec<TemplateName>,
    engine: Arc<OverrideEngine>,
    theme: Theme,
}

impl TemplateSheet {
    /// Parses a sheet from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let file: SheetFile = serde_yaml::from_str(yaml)?;

        let labels = file
            .labels
            .into_iter()
            .map(|(name, text)| Ok((name.parse::<TemplateName>()?, text)))
            .collect::<Result<Vec<_>, RenderError>>()?;

        let mut engine = OverrideEngine::new();
        let mut templates = Vec::with_capacity(file.templates.len());
        for (name, source) in &file.templates {
            let name: TemplateName = name.parse()?;
            engine.add_template(name, source)?;
            templates.push(name);
        }

        let theme = Theme::from_value(&file.theme)?;

        tracing::debug!(
            labels = labels.len(),
            templates = templates.len(),
            styles = theme.len(),
            "template sheet loaded"
        );

        Ok(Self {
            class_prefix: file.class_prefix,
            labels,
            templates,
            engine: Arc::new(engine),
            theme,
        })
    }

    /// Reads and parses a sheet file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading template sheet");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Installs the sheet into a registry.
    ///
    /// The class prefix is set first, then labels, then templates; a name
    /// listed under both `labels` and `templates` ends up with the template,
    /// falling back to the label when the template fails.
    pub fn apply(&self, templates: &mut Templates) {
        if let Some(prefix) = &self.class_prefix {
            templates.set_class_names(ClassNames::new(prefix.clone()));
        }
        for (name, text) in &self.labels {
            templates.set_label(*name, text);
        }
        for name in &self.templates {
            templates.set_compiled(*name, &self.engine);
        }
    }

    /// A default registry with this sheet applied.
    pub fn templates(&self) -> Templates {
        let mut templates = Templates::default();
        self.apply(&mut templates);
        templates
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn class_prefix(&self) -> Option<&str> {
        self.class_prefix.as_deref()
    }

    /// Names overridden by the sheet, labels and templates together.
    pub fn overridden(&self) -> Vec<TemplateName> {
        let mut names: Vec<TemplateName> = self
            .labels
            .iter()
            .map(|(name, _)| *name)
            .chain(self.templates.iter().copied())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
