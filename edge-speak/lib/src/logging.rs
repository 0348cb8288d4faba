//! Explicitly constructed logging context.
//!
//! Instead of installing a process-wide subscriber, the binary builds one
//! [`LogContext`] at start-up and hands it to whatever needs to log. Events
//! emitted inside [`LogContext::in_scope`] or a future wrapped with
//! [`LogContext::instrument`] go to that context's writer as timestamped,
//! level-tagged lines.

use std::future::Future;

use tracing::Dispatch;
use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// How log lines are filtered and rendered.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    /// Most verbose level emitted.
    pub level: LevelFilter,
    /// Colour the level tags.
    pub ansi: bool,
    /// Let `RUST_LOG` override `level`.
    pub env_filter: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            ansi: false,
            env_filter: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, env_filter: bool) -> Self {
        self.env_filter = env_filter;
        self
    }
}

/// A tracing dispatcher owned by the caller rather than installed globally.
#[derive(Clone)]
pub struct LogContext {
    dispatch: Dispatch,
}

impl std::fmt::Debug for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogContext").finish_non_exhaustive()
    }
}

impl LogContext {
    /// Builds a context that writes to `writer`.
    pub fn new<W>(config: LogConfig, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(config.ansi)
            .with_target(false);

        let dispatch = if config.env_filter {
            let filter = EnvFilter::builder()
                .with_default_directive(config.level.into())
                .from_env_lossy();
            Dispatch::new(builder.with_env_filter(filter).finish())
        } else {
            Dispatch::new(builder.with_max_level(config.level).finish())
        };

        Self { dispatch }
    }

    /// Builds a context that writes to standard error.
    pub fn stderr(config: LogConfig) -> Self {
        Self::new(config, std::io::stderr)
    }

    /// Runs `f` with this context receiving its events.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Wraps `future` so every poll logs into this context.
    pub fn instrument<F: Future>(&self, future: F) -> WithDispatch<F> {
        future.with_subscriber(self.dispatch.clone())
    }
}
