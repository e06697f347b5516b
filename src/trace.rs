//! Debug tracing sink.
//!
//! A trait object rather than `eprintln!` calls sprinkled through the
//! hot path, so a caller could swap in a real subscriber later without
//! touching the core engine. `--debug` wires up [`ConsoleTrace`]; the
//! default is [`NullTrace`].

/// Per-cycle and per-instruction trace sink.
pub trait Trace {
    fn cycle(&self, _cycle: u64, _message: &str) {}
    fn diagnostic(&self, _message: &str) {}
}

/// Discards everything. The default when `--debug` is not passed.
pub struct NullTrace;

impl Trace for NullTrace {}

/// Writes every event to stderr, one line each.
pub struct ConsoleTrace;

impl Trace for ConsoleTrace {
    fn cycle(&self, cycle: u64, message: &str) {
        eprintln!("[cycle {:>6}] {}", cycle, message);
    }

    fn diagnostic(&self, message: &str) {
        eprintln!("[diagnostic] {}", message);
    }
}

/// Builds the trace sink selected by the `--debug` flag.
pub fn build(debug: bool) -> Box<dyn Trace> {
    if debug {
        Box::new(ConsoleTrace)
    } else {
        Box::new(NullTrace)
    }
}
