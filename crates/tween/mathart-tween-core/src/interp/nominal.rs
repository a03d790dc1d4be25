//! Nominal (flag) arrays.
//!
//! A plan lists the atomic edits that turn the start array into the end array:
//! trailing deletions, trailing insertions, flags to switch on and other
//! differing flags. Playback position picks how many of those edits are
//! applied, so consecutive steps differ by exactly one edit.

use mathart_api_core::coercion::is_truthy;
use mathart_api_core::Value;

/// Edit plan between two flag arrays. Built once per start/end pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NominalPlan {
    pub num_delete: usize,
    pub num_add: usize,
    /// Indices (in the shared prefix) that go from off to on
    pub to_set: Vec<usize>,
    /// Other indices (in the shared prefix) whose values differ
    pub to_clear: Vec<usize>,
}

impl NominalPlan {
    pub fn new(start: &[Value], end: &[Value]) -> Self {
        let (num_delete, num_add) = if start.len() >= end.len() {
            (start.len() - end.len(), 0)
        } else {
            (0, end.len() - start.len())
        };
        let mut to_set = Vec::new();
        let mut to_clear = Vec::new();
        for (i, (a, b)) in start.iter().zip(end).enumerate() {
            if is_truthy(b) && !is_truthy(a) {
                to_set.push(i);
            } else if a != b {
                to_clear.push(i);
            }
        }
        Self {
            num_delete,
            num_add,
            to_set,
            to_clear,
        }
    }

    /// Total number of atomic edits.
    pub fn steps(&self) -> usize {
        self.num_delete + self.num_add + self.to_set.len() + self.to_clear.len()
    }

    /// Array at playback position `t`. Looping runs the plan forwards over the
    /// first half and undoes it over the second (insertions and deletions swap
    /// roles, changed flags revert to their start values).
    pub fn apply(&self, start: &[Value], end: &[Value], t: f64, looping: bool) -> Vec<Value> {
        let (phase, reverse) = match (looping, t > 0.5) {
            (false, _) => (t, false),
            (true, false) => (t * 2.0, false),
            (true, true) => ((t - 0.5) * 2.0, true),
        };
        let step = ((self.steps() + 1) as f64 * phase).trunc().max(0.0) as usize;
        self.apply_steps(start, end, step, looping, reverse)
    }

    /// Array after `step` edits. `reverse` selects the return half of a loop,
    /// where step 0 is the end array.
    pub fn apply_steps(
        &self,
        start: &[Value],
        end: &[Value],
        mut step: usize,
        looping: bool,
        reverse: bool,
    ) -> Vec<Value> {
        let (mut num_add, num_delete, initial, target) = if reverse {
            (self.num_delete, self.num_add, end, start)
        } else {
            (self.num_add, self.num_delete, start, end)
        };

        // trailing deletions first (forward only)
        let mut value: Vec<Value> = if !reverse && num_delete.min(step) > 0 {
            let deleted = num_delete.min(step);
            step -= deleted;
            initial[..initial.len().saturating_sub(deleted)].to_vec()
        } else {
            initial.to_vec()
        };

        // insertions next on the way out of a loop
        let start_len = value.len();
        if looping && !reverse {
            num_add = num_add.min(step);
            value.extend(end.iter().skip(start_len).take(num_add).cloned());
            step -= num_add;
        }

        let num_set = step.min(self.to_set.len());
        for &index in &self.to_set[..num_set] {
            copy_at(&mut value, target, index);
        }
        step -= num_set;

        let num_clear = step.min(self.to_clear.len());
        for &index in &self.to_clear[..num_clear] {
            copy_at(&mut value, target, index);
        }

        // insertions last when not looping; length changes last on the way back
        if !looping || reverse {
            step -= num_clear;
            let grown = num_add.min(step);
            value.extend(target.iter().skip(start_len).take(grown).cloned());
            if reverse {
                let removed = num_delete.min(step);
                let current_len = start_len + grown;
                let from = current_len.saturating_sub(removed);
                value.drain(from..current_len.min(value.len()).max(from));
            }
        }

        value
    }
}

#[inline]
fn copy_at(value: &mut [Value], source: &[Value], index: usize) {
    if let (Some(slot), Some(v)) = (value.get_mut(index), source.get(index)) {
        *slot = v.clone();
    }
}
