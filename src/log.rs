use anyhow::Result;
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::config::data_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub timestamp: String,
    pub level: Level,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RunEvent {
    /// The line shown to the operator for this event.
    pub fn console_line(&self) -> String {
        match (&self.message, &self.story_name) {
            (Some(message), _) => message.clone(),
            (None, Some(name)) => format!("{}: {name}", self.event),
            (None, None) => self.event.clone(),
        }
    }
}

pub fn new_event(
    level: Level,
    event_type: &str,
    story_name: Option<&str>,
    message: Option<&str>,
) -> RunEvent {
    RunEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level,
        event: event_type.to_string(),
        story_name: story_name.map(String::from),
        message: message.map(String::from),
    }
}

pub trait LogSink: Send + Sync {
    fn record(&self, event: &RunEvent);
}

/// Prints events to the terminal. Errors go to stderr in red.
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn record(&self, event: &RunEvent) {
        let line = event.console_line();
        match event.level {
            Level::Info => println!("{line}"),
            Level::Warn => eprintln!("{}", line.yellow()),
            Level::Error => eprintln!("{}", line.red()),
        }
    }
}

/// Appends every event as one JSON line.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        data_dir().join("activity.jsonl")
    }

    fn append(&self, event: &RunEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(event)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl LogSink for JsonlSink {
    fn record(&self, event: &RunEvent) {
        // A broken activity log must not stop an import.
        if let Err(e) = self.append(event) {
            eprintln!("activity log write to {} failed: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
pub fn read_events(path: &std::path::Path) -> Vec<RunEvent> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

/// Fans events out to every configured sink.
#[derive(Default)]
pub struct Logger {
    sinks: Vec<Box<dyn LogSink>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn emit(&self, event: RunEvent) {
        for sink in &self.sinks {
            sink.record(&event);
        }
    }

    pub fn info(&self, event_type: &str, story_name: Option<&str>, message: Option<&str>) {
        self.emit(new_event(Level::Info, event_type, story_name, message));
    }

    pub fn warn(&self, event_type: &str, message: &str) {
        self.emit(new_event(Level::Warn, event_type, None, Some(message)));
    }

    pub fn error(&self, event_type: &str, story_name: Option<&str>, message: &str) {
        self.emit(new_event(Level::Error, event_type, story_name, Some(message)));
    }
}
