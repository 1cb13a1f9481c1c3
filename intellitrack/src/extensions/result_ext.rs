pub(crate) trait ResultExt<T, E> {
    /// Logs the error with `context` at warn level and hands the result back untouched.
    fn warn_context<C: std::fmt::Display>(self, context: C) -> Result<T, E>;
    fn debug_context<C: std::fmt::Display>(self, context: C) -> Result<T, E>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn warn_context<C: std::fmt::Display>(self, context: C) -> Result<T, E> {
        self.inspect_err(|e| {
            tracing::warn!("{}: {}", context, e);
        })
    }

    fn debug_context<C: std::fmt::Display>(self, context: C) -> Result<T, E> {
        self.inspect_err(|e| {
            tracing::debug!("{}: {}", context, e);
        })
    }
}
