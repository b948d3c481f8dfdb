//! Logging configuration for Forma (Layer 3).
//!
//! Evaluation never prints anything on its own. The combinator crates emit
//! `tracing` events from two places:
//!
//! - [`Source::Lifecycle`]: start and stop of parametric units, at `DEBUG`
//!   under the `forma_fn::lifecycle` target
//! - [`Source::Builds`]: freezing a composition or construction, at `TRACE`
//!   under `forma_fn::composition` and `forma_fn::construction`
//!
//! [`TracingConfig`] turns a baseline level plus per-source levels into an
//! `EnvFilter` directive string and installs a `tracing-subscriber` stack
//! printing in one [`TracingFormat`].
//!
//! # Example
//!
//! ```
//! use forma_tracing::{Source, TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! let config = TracingConfig::new()
//!     .with_level(Level::WARN)
//!     .with_source(Source::Lifecycle, Level::DEBUG)
//!     .with_format(TracingFormat::Json);
//!
//! assert_eq!(config.directives(), "warn,forma_fn::lifecycle=debug");
//! ```

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// How events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line, colored.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

/// A group of Forma's own log targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Parametric unit start and stop.
    Lifecycle,
    /// Composition and construction builds.
    Builds,
}

impl Source {
    /// The `tracing` targets this source emits under.
    #[must_use]
    pub fn targets(self) -> &'static [&'static str] {
        match self {
            Source::Lifecycle => &["forma_fn::lifecycle"],
            Source::Builds => &["forma_fn::composition", "forma_fn::construction"],
        }
    }
}

/// Subscriber settings for an application embedding Forma.
///
/// The baseline level applies to every target, Forma's included. Per-source
/// levels and raw directives are appended after it, so they win for the
/// targets they name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    level: Level,
    sources: Vec<(Source, Level)>,
    extra: Option<String>,
    format: TracingFormat,
    span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            sources: Vec::new(),
            extra: None,
            format: TracingFormat::Pretty,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Baseline `INFO`, pretty output, no per-source levels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs lifecycle transitions at `DEBUG` on top of the defaults.
    #[must_use]
    pub fn lifecycle() -> Self {
        Self::new().with_source(Source::Lifecycle, Level::DEBUG)
    }

    /// Logs every Forma event, builds included.
    #[must_use]
    pub fn verbose() -> Self {
        Self::lifecycle().with_source(Source::Builds, Level::TRACE)
    }

    /// Sets the baseline level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the level for one source, replacing any earlier setting for it.
    #[must_use]
    pub fn with_source(mut self, source: Source, level: Level) -> Self {
        self.sources.retain(|(existing, _)| *existing != source);
        self.sources.push((source, level));
        self
    }

    /// Appends raw `target=level` directives, e.g. for the host application.
    #[must_use]
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.extra = Some(directives.into());
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Logs span enter and exit when enabled.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Baseline level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Level set for `source`, if any.
    #[must_use]
    pub fn source_level(&self, source: Source) -> Option<Level> {
        self.sources
            .iter()
            .find(|(existing, _)| *existing == source)
            .map(|(_, level)| *level)
    }

    /// Output format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// The `EnvFilter` directive string: baseline first, then each source's
    /// targets in the order they were set, then the raw directives.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut directives = lower(self.level);
        for (source, level) in &self.sources {
            for target in source.targets() {
                directives.push(',');
                directives.push_str(target);
                directives.push('=');
                directives.push_str(&lower(*level));
            }
        }
        if let Some(extra) = self.extra.as_deref().filter(|extra| !extra.is_empty()) {
            directives.push(',');
            directives.push_str(extra);
        }
        directives
    }

    // Unparseable raw directives drop back to the baseline level alone.
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.directives())
            .unwrap_or_else(|_| EnvFilter::new(lower(self.level)))
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let spans = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };
        let output = tracing_subscriber::fmt::layer();
        let filter = self.filter();

        match self.format {
            TracingFormat::Pretty => output
                .pretty()
                .with_span_events(spans)
                .with_filter(filter)
                .boxed(),
            TracingFormat::Compact => output
                .compact()
                .with_span_events(spans)
                .with_filter(filter)
                .boxed(),
            TracingFormat::Json => output
                .json()
                .with_span_events(spans)
                .with_filter(filter)
                .boxed(),
        }
    }

    /// Installs the subscriber as the global default.
    ///
    /// Returns `false` and leaves the existing subscriber in place when one is
    /// already installed.
    pub fn install(&self) -> bool {
        let installed = tracing_subscriber::registry()
            .with(self.layer())
            .try_init()
            .is_ok();

        if installed {
            tracing::info!(
                directives = %self.directives(),
                format = ?self.format,
                "tracing initialized"
            );
        }
        installed
    }
}

fn lower(level: Level) -> String {
    level.as_str().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn defaults() {
        let config = TracingConfig::default();
        assert_eq!(config.level(), Level::INFO);
        assert_eq!(config.format(), TracingFormat::Pretty);
        assert_eq!(config.directives(), "info");
        assert!(!config.span_events);
    }

    #[test]
    fn sources_map_to_their_targets() {
        let config = TracingConfig::new()
            .with_source(Source::Builds, Level::TRACE)
            .with_source(Source::Lifecycle, Level::DEBUG);
        assert_eq!(
            config.directives(),
            "info,forma_fn::composition=trace,forma_fn::construction=trace,forma_fn::lifecycle=debug"
        );
    }

    #[test]
    fn later_source_level_replaces_earlier() {
        let config = TracingConfig::new()
            .with_source(Source::Lifecycle, Level::TRACE)
            .with_source(Source::Lifecycle, Level::WARN);
        assert_eq!(config.source_level(Source::Lifecycle), Some(Level::WARN));
        assert_eq!(config.source_level(Source::Builds), None);
        assert_eq!(config.directives(), "info,forma_fn::lifecycle=warn");
    }

    #[test]
    fn presets() {
        let lifecycle = TracingConfig::lifecycle();
        assert_eq!(lifecycle.source_level(Source::Lifecycle), Some(Level::DEBUG));
        let verbose = TracingConfig::verbose();
        assert_eq!(verbose.source_level(Source::Builds), Some(Level::TRACE));
        assert_eq!(verbose.source_level(Source::Lifecycle), Some(Level::DEBUG));
    }

    #[test]
    fn raw_directives_come_last() {
        let config = TracingConfig::lifecycle()
            .with_level(Level::ERROR)
            .with_directives("my_app=info");
        assert_eq!(config.directives(), "error,forma_fn::lifecycle=debug,my_app=info");
        assert_eq!(TracingConfig::new().with_directives("").directives(), "info");
    }

    #[test]
    fn filter_honors_the_most_verbose_directive() {
        let config = TracingConfig::new()
            .with_level(Level::WARN)
            .with_source(Source::Builds, Level::TRACE);
        assert_eq!(config.filter().max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn unparseable_directives_fall_back_to_baseline() {
        let config = TracingConfig::new()
            .with_level(Level::WARN)
            .with_source(Source::Lifecycle, Level::DEBUG)
            .with_directives("my_app=[");
        assert_eq!(config.filter().max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn every_format_builds_a_layer() {
        for format in [TracingFormat::Pretty, TracingFormat::Compact, TracingFormat::Json] {
            let _layer = TracingConfig::verbose()
                .with_format(format)
                .with_span_events(true)
                .layer();
        }
    }

    #[test]
    fn second_install_keeps_the_first() {
        let config = TracingConfig::new().with_format(TracingFormat::Compact);
        config.install();
        assert!(!config.install());
    }
}
