use alloc::string::String;

/// Configuration of a [`MappedDocument`](crate::MappedDocument).
///
/// These options only affect how diagnostics are rendered; decoding and line
/// mapping behave the same whatever they hold.
///
/// # Default
///
/// No filename, one line of context before and after the reported position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DocumentOptions {
    /// Name of the file the document was read from.
    ///
    /// When set, debug snippets start with an `In file <name>` line, and an
    /// empty source is reported with the name attached.
    ///
    /// # Default
    ///
    /// `None`
    pub filename: Option<String>,

    /// Number of whole lines shown above the reported line in debug
    /// snippets.
    ///
    /// A value of `0` is treated as `1`.
    ///
    /// # Default
    ///
    /// `1`
    pub context_before: usize,

    /// Number of whole lines shown below the caret line in debug snippets.
    ///
    /// A value of `0` is treated as `1`.
    ///
    /// # Default
    ///
    /// `1`
    pub context_after: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            filename: None,
            context_before: 1,
            context_after: 1,
        }
    }
}

impl DocumentOptions {
    /// Default options labelled with `filename`.
    #[must_use]
    pub fn named(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    /// Sets the number of lines shown before and after the reported line.
    #[must_use]
    pub fn with_context(mut self, before: usize, after: usize) -> Self {
        self.context_before = before;
        self.context_after = after;
        self
    }

    /// Replaces zero context sizes with `1`.
    pub(crate) fn normalized(mut self) -> Self {
        self.context_before = self.context_before.max(1);
        self.context_after = self.context_after.max(1);
        self
    }
}
