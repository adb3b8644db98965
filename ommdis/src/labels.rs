use color_print::ceprintln;
use m65816::Emitter;

use crate::header::AddressSpace;
use crate::symbols;

/// Addresses that need a label definition, collected during the scan pass
/// and consumed in ascending order during the emission pass.
///
/// Kept sorted descending after `finalize` so the smallest pending address
/// pops from the tail. The full set is retained even after consumption:
/// operand formatting must keep spelling `_xxxx` for backward references
/// whose definition has already been emitted.
pub struct LabelSet {
    addrs: Vec<u32>,
    /// Labels `addrs[..pending]` are still waiting for placement.
    pending: usize,
    space: AddressSpace,
}

impl LabelSet {
    pub fn new(space: AddressSpace) -> Self {
        LabelSet {
            addrs: Vec::new(),
            pending: 0,
            space,
        }
    }

    /// Add a referenced address; anything outside the module's address
    /// space cannot be labeled here and is discarded.
    pub fn insert(&mut self, address: u32) {
        if self.space.contains(address) {
            self.addrs.push(address);
        }
    }

    /// Add the ampersand sub-table address. The header check already pinned
    /// it inside the address space, so no filtering.
    pub fn insert_table(&mut self, address: u32) {
        self.addrs.push(address);
    }

    /// Deduplicate and order for consumption. Must run before the emission
    /// pass; the set is read-only afterwards apart from placement.
    pub fn finalize(&mut self) {
        self.addrs.sort_unstable_by(|a, b| b.cmp(a));
        self.addrs.dedup();
        self.pending = self.addrs.len();
    }

    pub fn contains(&self, address: u32) -> bool {
        self.addrs.contains(&address)
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// Backpatch driver. `pc == None` peeks the smallest pending address.
    /// Otherwise, every pending label up to `pc` is resolved: an exact hit
    /// emits a definition through `em`, a missed label (its address fell
    /// inside an instruction or a multi-byte line) gets one warning and is
    /// dropped. Returns the next still-pending address.
    pub fn next_label(&mut self, pc: Option<u32>, em: &mut Emitter) -> Option<u32> {
        let pc = match pc {
            None => return self.peek(),
            Some(pc) => pc,
        };
        while let Some(a) = self.peek() {
            if a > pc {
                return Some(a);
            }
            if a == pc {
                em.label(&symbols::synth(a));
            } else {
                ceprintln!("<yellow,bold>warning</>: unable to place label {}", symbols::synth(a));
            }
            self.pending -= 1;
        }
        None
    }

    fn peek(&self) -> Option<u32> {
        if self.pending == 0 {
            None
        } else {
            Some(self.addrs[self.pending - 1])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(addrs: &[u32]) -> LabelSet {
        let mut s = LabelSet::new(AddressSpace { start: 0x1000, end: 0x2000 });
        for a in addrs {
            s.insert(*a);
        }
        s.finalize();
        s
    }

    fn take(s: &mut LabelSet, pc: Option<u32>) -> (Vec<String>, Option<u32>) {
        let mut out = Vec::new();
        let next = {
            let mut em = Emitter::new(&mut out);
            s.next_label(pc, &mut em)
        };
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), next)
    }

    #[test]
    fn discards_out_of_range() {
        let s = set(&[0x0fff, 0x1000, 0x1fff, 0x2000]);
        assert_eq!(s.len(), 2);
        assert!(s.contains(0x1000));
        assert!(s.contains(0x1fff));
        assert!(!s.contains(0x2000));
    }

    #[test]
    fn deduplicates() {
        let s = set(&[0x1234, 0x1234, 0x1234]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn query_peeks_without_consuming() {
        let mut s = set(&[0x1800, 0x1400]);
        assert_eq!(take(&mut s, None), (vec![], Some(0x1400)));
        assert_eq!(take(&mut s, None), (vec![], Some(0x1400)));
    }

    #[test]
    fn exact_hit_defines_once() {
        let mut s = set(&[0x1400, 0x1800]);
        let (defs, next) = take(&mut s, Some(0x1400));
        assert_eq!(defs, vec!["_1400".to_string()]);
        assert_eq!(next, Some(0x1800));
    }

    #[test]
    fn skipped_label_is_dropped_without_definition() {
        let mut s = set(&[0x1401, 0x1800]);
        // pc moved past 0x1401 without landing on it
        let (defs, next) = take(&mut s, Some(0x1402));
        assert!(defs.is_empty());
        assert_eq!(next, Some(0x1800));
    }

    #[test]
    fn empty_set_returns_none() {
        let mut s = set(&[]);
        assert_eq!(take(&mut s, None), (vec![], None));
        assert_eq!(take(&mut s, Some(0x1000)), (vec![], None));
    }

    #[test]
    fn consumed_labels_stay_resolvable() {
        let mut s = set(&[0x1400]);
        take(&mut s, Some(0x1400));
        assert!(s.contains(0x1400));
        assert_eq!(take(&mut s, None), (vec![], None));
    }
}
