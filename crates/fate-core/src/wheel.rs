pub mod error;
pub mod fate_table;
pub mod ring;
pub mod trace;


use crate::tracer::Traceable;
use crate::{trace, trace_obj, trace_wheel_event};
use error::FateError;
use fate_table::{FateTable, signature_of};
use ring::{EntryId, Ring};
use std::io;
use trace::{TraceStep, preview_step_size};

/// Circular ring of entries with spin history and a signature table.
///
/// Spinning advances `current` by a step size derived from the current
/// entry's signature, the visit counter and the previously visited value.
/// Every spin is recorded so it can be rolled back.
pub struct WheelOfFate {
    ring: Ring,
    fate: FateTable,
    history: Vec<EntryId>,
    current: Option<EntryId>,
    visit_count: u64,
}

impl Default for WheelOfFate {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelOfFate {
    pub fn new() -> Self {
        Self {
            ring: Ring::new(),
            fate: FateTable::new(),
            history: Vec::new(),
            current: None,
            visit_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn current(&self) -> Option<EntryId> {
        self.current
    }

    pub fn current_value(&self) -> Option<i32> {
        self.current
            .and_then(|id| self.ring.get(id))
            .map(|entry| entry.value)
    }

    pub fn current_step_size(&self) -> Option<usize> {
        self.current
            .and_then(|id| self.ring.get(id))
            .map(|entry| entry.step_size)
    }

    pub fn head_value(&self) -> Option<i32> {
        self.ring
            .head()
            .and_then(|id| self.ring.get(id))
            .map(|entry| entry.value)
    }

    /// Stored signature of a live entry.
    pub fn signature(&self, id: EntryId) -> Option<u32> {
        self.fate.get(id)
    }

    /// Ring values in order, starting at the head.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.ring.iter().map(|(_, entry)| entry.value)
    }

    /// Appends `value` at the end of the ring. The first entry also becomes
    /// current.
    pub fn insert(&mut self, value: i32) -> EntryId {
        let id = self.ring.push_back(value);
        self.fate.insert(id, value);
        if self.current.is_none() {
            self.current = Some(id);
        }
        id
    }

    /// Moves `current` forward by a freshly computed step size.
    ///
    /// No-op on an empty wheel.
    pub fn spin_once(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let size = self.ring.len();
        let Some(value) = self.ring.get(current).map(|entry| entry.value) else {
            return;
        };

        self.history.push(current);
        self.visit_count += 1;

        let previous_data = self
            .history
            .iter()
            .rev()
            .nth(1)
            .and_then(|&id| self.ring.get(id))
            .map_or(0, |entry| entry.value);

        let signature = self.fate.get(current).unwrap_or_else(|| signature_of(value));
        let step_size = spin_step_size(signature, self.visit_count, previous_data, size);
        if let Some(entry) = self.ring.get_mut(current) {
            entry.step_size = step_size;
        }

        self.current = self.ring.advance(current, step_size);

        log::debug!(
            "spin #{}: from {} (signature {}, previous {}) by {}",
            self.visit_count,
            value,
            signature,
            previous_data,
            step_size
        );
        trace!(
            "SPIN visit={} from={} sig={} prev={} step={}",
            self.visit_count,
            value,
            signature,
            previous_data,
            step_size
        );
        trace_obj!(&*self);
    }

    /// Spins exactly `count` times.
    pub fn spin_until(&mut self, count: usize) {
        for _ in 0..count {
            self.spin_once();
        }
    }

    /// Undoes up to `count` spins, stopping early once history is exhausted.
    ///
    /// Positions are restored; step sizes stored during those spins are not.
    pub fn rollback(&mut self, count: usize) {
        let mut undone = 0;
        while undone < count {
            let Some(id) = self.history.pop() else {
                break;
            };
            self.current = Some(id);
            self.visit_count -= 1;
            undone += 1;
        }

        if undone > 0 {
            log::debug!(
                "rollback: undid {} of {} spin(s), current is now {:?}",
                undone,
                count,
                self.current_value()
            );
            trace_wheel_event!("ROLLBACK {} -> current={:?}", undone, self.current_value());
        }
    }

    /// Removes the current entry; its successor becomes current.
    ///
    /// Any history references to the removed entry are dropped.
    pub fn delete_current(&mut self) -> Option<i32> {
        let current = self.current?;
        let (entry, follower) = self.ring.remove(current)?;

        self.current = follower;
        self.fate.remove(current);
        self.history.retain(|&id| id != current);

        log::debug!(
            "deleted {}, {} entries left, current is now {:?}",
            entry.value,
            self.ring.len(),
            self.current_value()
        );
        trace_wheel_event!("DELETE {} size={}", entry.value, self.ring.len());
        Some(entry.value)
    }

    /// Writes `Current Node: <value>` when the wheel has a current entry.
    pub fn print_current<W: io::Write>(&self, out: &mut W) -> io::Result<Option<i32>> {
        let value = self.current_value();
        if let Some(value) = value {
            writeln!(out, "Current Node: {}", value)?;
        }
        Ok(value)
    }

    /// Previews `steps` hypothetical spins from `current` without touching
    /// any state.
    ///
    /// The preview uses `(signature ^ step) mod size + 1`, which ignores the
    /// visit counter and the previously visited value.
    pub fn traverse_with_trace(&self, steps: usize) -> Result<Vec<TraceStep>, FateError> {
        let size = self.ring.len();
        let Some(mut cursor) = self.current.filter(|_| size > 0) else {
            log::warn!("trace of {} step(s) requested on an empty wheel", steps);
            return Err(FateError::EmptyWheel);
        };

        let mut rows = Vec::with_capacity(steps);
        for step in 1..=steps {
            let entry = self.ring.get(cursor).ok_or(FateError::EmptyWheel)?;
            let signature = self
                .fate
                .get(cursor)
                .unwrap_or_else(|| signature_of(entry.value));
            let step_size = preview_step_size(signature, step, size);
            let next = self
                .ring
                .advance(cursor, step_size)
                .ok_or(FateError::EmptyWheel)?;
            let next_value = self.ring.get(next).ok_or(FateError::EmptyWheel)?.value;

            rows.push(TraceStep {
                step,
                value: entry.value,
                signature,
                step_size,
                next_value,
            });
            cursor = next;
        }
        Ok(rows)
    }
}

impl Traceable for WheelOfFate {
    fn trace_name(&self) -> &'static str {
        "WHEEL"
    }

    fn trace_state(&self) -> Option<String> {
        let current = match self.current_value() {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };
        Some(format!(
            "current={} visits={} size={} history={}",
            current,
            self.visit_count,
            self.ring.len(),
            self.history.len()
        ))
    }
}

/// `(signature ^ visits ^ previous) mod size + 1`, always in `1..=size`.
fn spin_step_size(signature: u32, visits: u64, previous: i32, size: usize) -> usize {
    let mixed = i64::from(signature) ^ visits as i64 ^ i64::from(previous);
    mixed.rem_euclid(size as i64) as usize + 1
}
