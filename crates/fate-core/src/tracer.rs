use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

#[doc(hidden)]
pub mod macros;
pub mod traceable;
pub use traceable::Traceable;

pub const TRACER_CAPACITY: usize = 100_000;

pub static TRACER: Lazy<Mutex<Tracer>> = Lazy::new(|| Mutex::new(Tracer::new(TRACER_CAPACITY)));

/// Global event history for spins, rollbacks and deletions.
///
/// Only the most recent `capacity` lines are kept.
pub struct Tracer {
    history: VecDeque<String>,
    capacity: usize,
}

impl Tracer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity.min(TRACER_CAPACITY)),
            capacity,
        }
    }

    pub fn write(&mut self, msg: String) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(msg);
    }

    pub fn print(&self) {
        for (i, line) in self.history.iter().enumerate() {
            println!("{:04}: {}", i, line);
        }
    }

    pub fn log<T: Traceable>(&mut self, thing: &T) {
        if let Some(trace) = thing.trace() {
            self.write(trace);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(Option<u8>);

    impl Traceable for Probe {
        fn trace_name(&self) -> &'static str {
            "PROBE"
        }

        fn trace_state(&self) -> Option<String> {
            self.0.map(|v| format!("v={}", v))
        }
    }

    #[test]
    fn write_evicts_oldest_when_full() {
        let mut tracer = Tracer::new(3);
        for i in 0..5 {
            tracer.write(format!("line {}", i));
        }
        assert_eq!(tracer.len(), 3);
        let lines: Vec<&str> = tracer.lines().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut tracer = Tracer::new(0);
        tracer.write("dropped".into());
        assert!(tracer.is_empty());
    }

    #[test]
    fn log_prefixes_trace_name() {
        let mut tracer = Tracer::new(4);
        tracer.log(&Probe(Some(7)));
        tracer.log(&Probe(None)); // nothing to record
        let lines: Vec<&str> = tracer.lines().collect();
        assert_eq!(lines, vec!["PROBE v=7"]);
    }

    #[test]
    fn clear_empties_history() {
        let mut tracer = Tracer::new(2);
        tracer.write("a".into());
        tracer.clear();
        assert_eq!(tracer.len(), 0);
    }
}
