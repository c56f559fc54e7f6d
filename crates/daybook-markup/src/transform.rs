/// What happens to class tags when a fragment is rendered as bracket markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTransform {
    /// Replace each styled class with its ANSI codes (terminal output).
    Apply,

    /// Drop the tags and keep only their text.
    Remove,

    /// Emit `[class]text[/class]` unchanged, for inspecting structure.
    Keep,
}

/// What `Apply` does with a class the theme has no style for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnknownTagBehavior {
    /// Leave the `[class]...[/class]` tags in the output.
    Passthrough,

    /// Keep the text, drop the tags.
    #[default]
    Strip,

    /// Keep the text behind a marker such as `(!?)`.
    Indicate(String),
}
