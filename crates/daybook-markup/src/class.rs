//! Prefixed CSS class-name builder.

/// Prefix applied to class names when none is configured.
pub const DEFAULT_CLASS_PREFIX: &str = "calendar-";

/// Builds presentation class names sharing a common prefix.
///
/// ```rust
/// use daybook_markup::ClassNames;
///
/// let names = ClassNames::default();
/// let classes: Vec<String> = names
///     .list()
///     .add("weekday-grid-date")
///     .add_if("weekday-grid-date-decorator", false)
///     .into_iter()
///     .collect();
/// assert_eq!(classes, vec!["calendar-weekday-grid-date".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    prefix: String,
}

impl ClassNames {
    /// Creates a builder with the given prefix. An empty prefix leaves names untouched.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns a single prefixed class name.
    pub fn name(&self, class: &str) -> String {
        format!("{}{}", self.prefix, class)
    }

    /// Starts an empty class list.
    pub fn list(&self) -> ClassList<'_> {
        ClassList {
            names: self,
            classes: Vec::new(),
        }
    }

    /// Shorthand for a list built from unconditional classes.
    pub fn of<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> ClassList<'_> {
        classes
            .into_iter()
            .fold(self.list(), |list, class| list.add(class))
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

/// An ordered list of prefixed class names under construction.
#[derive(Debug, Clone)]
pub struct ClassList<'a> {
    names: &'a ClassNames,
    classes: Vec<String>,
}

impl ClassList<'_> {
    /// Appends a class.
    pub fn add(mut self, class: &str) -> Self {
        self.classes.push(self.names.name(class));
        self
    }

    /// Appends a class only when `condition` holds.
    pub fn add_if(self, class: &str, condition: bool) -> Self {
        if condition {
            self.add(class)
        } else {
            self
        }
    }

    /// Space-separated form, as written into a `class` attribute.
    pub fn joined(&self) -> String {
        self.classes.join(" ")
    }
}

impl IntoIterator for ClassList<'_> {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}
