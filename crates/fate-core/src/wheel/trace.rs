use std::fmt;

pub const TRACE_HEADER: &str = "Step | Data | Signature | Skip | Next\n------------------------------------";

/// One row of a hypothetical spin preview.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub step: usize,
    pub value: i32,
    pub signature: u32,
    pub step_size: usize,
    pub next_value: i32,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<4} | {:<4} | {:<9} | {:<4} | {}",
            self.step, self.value, self.signature, self.step_size, self.next_value
        )
    }
}

/// Step size used by the preview: `(signature ^ step) mod size + 1`.
pub(crate) fn preview_step_size(signature: u32, step: usize, size: usize) -> usize {
    let mixed = i64::from(signature) ^ step as i64;
    mixed.rem_euclid(size as i64) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_column_aligned() {
        let row = TraceStep {
            step: 1,
            value: 10,
            signature: 27,
            step_size: 2,
            next_value: 7,
        };
        assert_eq!(row.to_string(), "1    | 10   | 27        | 2    | 7");
    }

    #[test]
    fn preview_step_size_in_range() {
        for size in 1..8 {
            for step in 1..20 {
                let s = preview_step_size(97, step, size);
                assert!(s >= 1 && s <= size);
            }
        }
        // (27 ^ 1) % 5 + 1 = 26 % 5 + 1
        assert_eq!(preview_step_size(27, 1, 5), 2);
    }
}
