//! Array-backed max-heap over variable activity (§4.4). Keyed externally:
//! callers pass the current activity slice into every operation rather
//! than the heap owning it, so [`super::Assignment`] can bump an activity
//! and re-heapify in one call without a second borrow.

use crate::types::VarId;

pub(crate) struct VarHeap {
    heap: Vec<VarId>,
    /// Current heap index of each variable, or `None` if not in the heap.
    pos: Vec<Option<u32>>,
}

impl VarHeap {
    pub(crate) fn new(num_vars: usize) -> VarHeap {
        let heap: Vec<VarId> = (0..num_vars as u32).collect();
        let pos: Vec<Option<u32>> = (0..num_vars as u32).map(Some).collect();
        VarHeap { heap, pos }
    }

    pub(crate) fn add_var_slot(&mut self, v: VarId, activity: &[f64]) {
        debug_assert_eq!(v as usize, self.pos.len());
        self.pos.push(None);
        self.push(v, activity);
    }

    pub(crate) fn contains(&self, v: VarId) -> bool {
        self.pos[v as usize].is_some()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn push(&mut self, v: VarId, activity: &[f64]) {
        if self.contains(v) {
            return;
        }
        let i = self.heap.len();
        self.heap.push(v);
        self.pos[v as usize] = Some(i as u32);
        self.sift_up(i, activity);
    }

    pub(crate) fn pop_max(&mut self, activity: &[f64]) -> Option<VarId> {
        let root = *self.heap.first()?;
        let last = self.heap.pop().expect("checked non-empty above");
        self.pos[root as usize] = None;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.pos[last as usize] = Some(0);
            self.sift_down(0, activity);
        }
        Some(root)
    }

    pub(crate) fn bump(&mut self, v: VarId, activity: &[f64]) {
        if let Some(i) = self.pos[v as usize] {
            self.sift_up(i as usize, activity);
        }
    }

    /// Wholesale reconstruction over the variables in `vars` (used by
    /// `reduce_CNF` after dropping satisfied clauses at level 0).
    pub(crate) fn rebuild(&mut self, vars: impl IntoIterator<Item = VarId>, activity: &[f64]) {
        for p in self.pos.iter_mut() {
            *p = None;
        }
        self.heap.clear();
        self.heap.extend(vars);
        for (i, &v) in self.heap.iter().enumerate() {
            self.pos[v as usize] = Some(i as u32);
        }
        let n = self.heap.len();
        for i in (0..n / 2).rev() {
            self.sift_down(i, activity);
        }
    }

    fn sift_up(&mut self, mut i: usize, activity: &[f64]) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if activity[self.heap[parent] as usize] >= activity[self.heap[i] as usize] {
                break;
            }
            self.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize, activity: &[f64]) {
        let n = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            let mut largest = i;
            if l < n && activity[self.heap[l] as usize] > activity[self.heap[largest] as usize] {
                largest = l;
            }
            if r < n && activity[self.heap[r] as usize] > activity[self.heap[largest] as usize] {
                largest = r;
            }
            if largest == i {
                break;
            }
            self.swap(i, largest);
            i = largest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.pos[self.heap[i] as usize] = Some(i as u32);
        self.pos[self.heap[j] as usize] = Some(j as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_max_returns_highest_activity_first() {
        let activity = [0.5, 3.0, 1.0, 2.0];
        let mut heap = VarHeap::new(4);
        for v in 0..4 {
            heap.push(v, &activity);
        }
        assert_eq!(heap.pop_max(&activity), Some(1));
        assert_eq!(heap.pop_max(&activity), Some(3));
        assert_eq!(heap.pop_max(&activity), Some(2));
        assert_eq!(heap.pop_max(&activity), Some(0));
        assert_eq!(heap.pop_max(&activity), None);
    }

    #[test]
    fn bump_after_bookkeeping_update_restores_heap_order() {
        let mut activity = [1.0, 1.0, 1.0];
        let mut heap = VarHeap::new(3);
        activity[2] = 10.0;
        heap.bump(2, &activity);
        assert_eq!(heap.pop_max(&activity), Some(2));
    }

    #[test]
    fn rebuild_only_contains_the_given_variables() {
        let activity = [1.0, 2.0, 3.0, 4.0];
        let mut heap = VarHeap::new(4);
        heap.rebuild([0u32, 2].into_iter(), &activity);
        assert!(heap.contains(0));
        assert!(!heap.contains(1));
        assert!(heap.contains(2));
        assert!(!heap.contains(3));
        assert_eq!(heap.pop_max(&activity), Some(2));
        assert_eq!(heap.pop_max(&activity), Some(0));
    }
}
