//! I/O handling
//!
//! PRN and PRA are the only program-visible output. Emitted values are
//! recorded, written through to a sink as they are produced, or both. A
//! streaming handler keeps nothing, so a program that prints forever runs in
//! constant memory.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// A single value emitted by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// PRN: decimal integer followed by a newline
    Number(u8),
    /// PRA: a single character
    Char(u8),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Output::Number(value) => writeln!(f, "{}", value),
            Output::Char(value) => write!(f, "{}", value as char),
        }
    }
}

pub struct IOHandler {
    outputs: Vec<Output>,
    sink: Option<Box<dyn Write>>,
    record: bool,
}

impl IOHandler {
    /// Record outputs without writing them anywhere
    pub fn new() -> Self {
        IOHandler {
            outputs: Vec::new(),
            sink: None,
            record: true,
        }
    }

    /// Record outputs and stream them to `sink`
    pub fn with_sink(sink: impl Write + 'static) -> Self {
        IOHandler {
            outputs: Vec::new(),
            sink: Some(Box::new(sink)),
            record: true,
        }
    }

    /// Stream outputs to `sink` without recording them
    pub fn streaming(sink: impl Write + 'static) -> Self {
        IOHandler {
            outputs: Vec::new(),
            sink: Some(Box::new(sink)),
            record: false,
        }
    }

    /// Check if emitted values are kept for [`outputs`](Self::outputs)
    pub fn is_recording(&self) -> bool {
        self.record
    }

    /// Emit a value
    pub fn emit(&mut self, output: Output) -> io::Result<()> {
        if self.record {
            self.outputs.push(output);
        }
        if let Some(sink) = self.sink.as_mut() {
            write!(sink, "{}", output)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<Output> {
        std::mem::take(&mut self.outputs)
    }

    /// Everything emitted so far, rendered as the console would show it
    pub fn text(&self) -> String {
        render(&self.outputs)
    }
}

/// Render outputs as console text
pub fn render(outputs: &[Output]) -> String {
    outputs.iter().map(|o| o.to_string()).collect()
}

impl Default for IOHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IOHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IOHandler")
            .field("outputs", &self.outputs)
            .field("sink", &self.sink.is_some())
            .field("record", &self.record)
            .finish()
    }
}
