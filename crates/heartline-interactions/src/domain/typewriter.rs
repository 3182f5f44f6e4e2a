//! Typewriter engine.
//!
//! Reveals text one character per tick. The single-line variant enables the
//! continue control once the line is complete; the multi-line variant used on
//! the finale pauses between lines and simply stops ticking when it runs out.

use heartline_core::engine::InteractionEngine;

use super::events::{EventRecorder, InteractionEvent, InteractionEventKind};

/// Tick interval for the opening line.
pub const CHAR_INTERVAL_MS: u64 = 52;

/// Tick interval for the finale lines.
pub const FINALE_CHAR_INTERVAL_MS: u64 = 48;

/// Pause between finished finale lines.
pub const LINE_PAUSE_MS: u64 = 480;

/// Timing and completion behavior of a typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub char_interval_ms: u64,
    pub line_pause_ms: u64,
    /// Emit `ContinueEnabled` after the last line.
    pub signals_completion: bool,
}

impl TypewriterConfig {
    /// One line, 52 ms per character, enables continue when done.
    #[must_use]
    pub fn single_line() -> Self {
        Self {
            char_interval_ms: CHAR_INTERVAL_MS,
            line_pause_ms: 0,
            signals_completion: true,
        }
    }

    /// Several lines, 48 ms per character, 480 ms between lines, no
    /// completion signal.
    #[must_use]
    pub fn multi_line() -> Self {
        Self {
            char_interval_ms: FINALE_CHAR_INTERVAL_MS,
            line_pause_ms: LINE_PAUSE_MS,
            signals_completion: false,
        }
    }
}

/// Typewriter state.
#[derive(Debug)]
pub struct Typewriter {
    lines: Vec<String>,
    config: TypewriterConfig,
    line_index: usize,
    char_index: usize,
    completed_text: String,
    rendered: String,
    pending_delay_ms: Option<u64>,
    waited_ms: u64,
    continue_enabled: bool,
    recorder: EventRecorder,
}

impl Typewriter {
    /// Creates the engine and renders the first (empty) prefix immediately.
    #[must_use]
    pub fn new(lines: Vec<String>, config: TypewriterConfig) -> Self {
        let mut typewriter = Self {
            lines,
            config,
            line_index: 0,
            char_index: 0,
            completed_text: String::new(),
            rendered: String::new(),
            pending_delay_ms: None,
            waited_ms: 0,
            continue_enabled: false,
            recorder: EventRecorder::new(),
        };
        typewriter.step();
        typewriter
    }

    /// Convenience constructor for the single-line variant.
    #[must_use]
    pub fn single_line(line: impl Into<String>) -> Self {
        Self::new(vec![line.into()], TypewriterConfig::single_line())
    }

    /// Text currently on screen: finished lines followed by the visible
    /// prefix of the current one.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Finished lines, each followed by a line break.
    #[must_use]
    pub fn completed_text(&self) -> &str {
        &self.completed_text
    }

    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Returns whether the continue control has been enabled.
    #[must_use]
    pub fn continue_enabled(&self) -> bool {
        self.continue_enabled
    }

    /// Delay until the next tick, or `None` once nothing is scheduled.
    #[must_use]
    pub fn next_tick_in_ms(&self) -> Option<u64> {
        self.pending_delay_ms
            .map(|delay| delay.saturating_sub(self.waited_ms))
    }

    fn step(&mut self) {
        let Some(line) = self.lines.get(self.line_index).cloned() else {
            self.pending_delay_ms = None;
            return;
        };

        let prefix: String = line.chars().take(self.char_index).collect();
        self.rendered = format!("{}{prefix}", self.completed_text);
        self.char_index += 1;

        if self.char_index <= line.chars().count() {
            self.pending_delay_ms = Some(self.config.char_interval_ms);
            return;
        }

        self.completed_text.push_str(&line);
        self.completed_text.push('\n');
        self.recorder.record(InteractionEventKind::LineCompleted {
            line_index: self.line_index,
        });
        self.line_index += 1;
        self.char_index = 0;

        if self.line_index < self.lines.len() {
            self.pending_delay_ms = Some(self.config.line_pause_ms);
            return;
        }

        self.pending_delay_ms = None;
        if self.config.signals_completion && !self.continue_enabled {
            self.continue_enabled = true;
            tracing::info!("typewriter finished; continue enabled");
            self.recorder.record(InteractionEventKind::ContinueEnabled);
        }
    }
}

impl InteractionEngine for Typewriter {
    type Event = InteractionEvent;

    fn engine_name(&self) -> &'static str {
        "typewriter"
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.recorder.tick(elapsed_ms);
        self.waited_ms += elapsed_ms;
        while let Some(delay) = self.pending_delay_ms {
            if self.waited_ms < delay {
                break;
            }
            self.waited_ms -= delay;
            self.step();
        }
        if self.pending_delay_ms.is_none() {
            self.waited_ms = 0;
        }
    }

    fn is_settled(&self) -> bool {
        self.pending_delay_ms.is_none()
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        self.recorder.events()
    }

    fn clear_uncommitted_events(&mut self) {
        self.recorder.clear();
    }
}
