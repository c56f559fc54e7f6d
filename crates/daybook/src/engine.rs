//! MiniJinja engine for sheet-defined overrides.
//!
//! A sheet can replace any registry entry with a MiniJinja template. The
//! template sees the serialized input under `model` and, when the input is
//! an object, each of its fields at top level:
//!
//! ```rust
//! use daybook::{EventModel, OverrideEngine, TemplateName};
//!
//! let mut engine = OverrideEngine::new();
//! engine
//!     .add_template(
//!         TemplateName::GoingDuration,
//!         "{{ (goingDuration // 60) | pad(2) }}h{{ (goingDuration % 60) | pad(2) }}",
//!     )
//!     .unwrap();
//!
//! let mut event = EventModel::default();
//! event.going_duration = 95;
//! let out = engine.render(TemplateName::GoingDuration, &event).unwrap();
//! assert_eq!(out, "01h35");
//! ```
//!
//! The output is bracket markup; the registry turns it into a fragment.
//!
//! # Filters
//!
//! | Filter | Effect |
//! |--------|--------|
//! | `pad(width)` | zero-pads a number or string to `width` |
//! | `strip_tags` | removes `<...>` tags |
//! | `datefmt(pattern)` | formats a timestamp with a token pattern; no offset means UTC |
//! | `gmt_offset` | minutes from UTC as `GMT±HH:MM` |

use std::collections::BTreeMap;

use minijinja::{Environment, Error, ErrorKind, Value};
use serde::Serialize;

use crate::error::RenderError;
use crate::templates::TemplateName;
use crate::time::{format_gmt_offset, leading_zero, parse_timestamp, to_format};

/// Compiled override templates, keyed by entry name.
pub struct OverrideEngine {
    env: Environment<'static>,
}

impl OverrideEngine {
    /// Creates an engine with the calendar filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        Self { env }
    }

    /// Compiles `source` as the override for `name`.
    ///
    /// Syntax errors surface here, not at render time.
    pub fn add_template(&mut self, name: TemplateName, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.as_str().to_string(), source.to_string())?;
        tracing::debug!(template = name.as_str(), "override compiled");
        Ok(())
    }

    pub fn has_template(&self, name: TemplateName) -> bool {
        self.env.get_template(name.as_str()).is_ok()
    }

    /// Renders the override for `name` with `input` as context.
    pub fn render<T>(&self, name: TemplateName, input: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let tmpl = self.env.get_template(name.as_str())?;
        let context = build_context(input)?;
        Ok(tmpl.render(context)?)
    }

    /// Renders an ad-hoc template string with the same context rules.
    pub fn render_str<T>(&self, source: &str, input: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let context = build_context(input)?;
        Ok(self.env.render_str(source, context)?)
    }
}

impl Default for OverrideEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OverrideEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideEngine").finish_non_exhaustive()
    }
}

fn build_context<T>(input: &T) -> Result<BTreeMap<String, Value>, RenderError>
where
    T: Serialize + ?Sized,
{
    let data = serde_json::to_value(input)?;
    let mut context = BTreeMap::new();
    if let serde_json::Value::Object(fields) = &data {
        for (key, value) in fields {
            context.insert(key.clone(), Value::from_serialize(value));
        }
    }
    context.insert("model".to_string(), Value::from_serialize(&data));
    Ok(context)
}

/// Registers the calendar filters on a MiniJinja environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("pad", |value: Value, width: usize| -> String {
        match value.as_i64() {
            Some(n) => leading_zero(n, width),
            None => format!("{:0>width$}", value.to_string(), width = width),
        }
    });

    env.add_filter("strip_tags", |value: String| -> String {
        daybook_markup::strip_tags(&value)
    });

    env.add_filter(
        "datefmt",
        |value: String, pattern: String| -> Result<String, Error> {
            let dt = parse_timestamp(&value).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("datefmt expects a timestamp, got '{}'", value),
                )
            })?;
            Ok(to_format(&dt, &pattern))
        },
    );

    env.add_filter("gmt_offset", |minutes: i32| -> String {
        format_gmt_offset(minutes)
    });
}
