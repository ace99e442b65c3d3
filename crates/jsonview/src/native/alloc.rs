//! Backing storage for a parsed document.
//!
//! The allocator owns two arenas: a preorder tape of typed slots and a byte
//! arena holding every string and raw number. Containers record their element
//! count and the index one past their last descendant, so siblings can be
//! skipped without walking the subtree.

/// A single node on the tape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    /// Decoded string bytes in the byte arena.
    Str { start: usize, len: usize },
    /// Unparsed number text in the byte arena.
    Raw { start: usize, len: usize },
    /// `len` elements; descendants end before `end`.
    Arr { len: usize, end: usize },
    /// `len` key/value pairs; descendants end before `end`.
    Obj { len: usize, end: usize },
}

/// Arena storage owned by exactly one native document.
#[derive(Debug, Default)]
pub struct Allocator {
    slots: Vec<Slot>,
    bytes: Vec<u8>,
}

impl Allocator {
    /// Create an allocator sized for an input of `input_len` bytes.
    ///
    /// Every JSON value takes at least two bytes of source text once
    /// separators are counted, so half the input bounds the slot count.
    /// Only a quarter is reserved up front; dense inputs grow the tape.
    #[must_use]
    pub fn with_capacity(input_len: usize) -> Self {
        Self {
            slots: Vec::with_capacity(input_len / 4 + 1),
            bytes: Vec::with_capacity(input_len / 2),
        }
    }

    pub(crate) fn push(&mut self, slot: Slot) -> usize {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    pub(crate) fn push_str(&mut self, s: &str) -> usize {
        let (start, len) = self.push_bytes(s.as_bytes());
        self.push(Slot::Str { start, len })
    }

    pub(crate) fn push_raw(&mut self, text: &str) -> usize {
        let slot = self.raw_slot(text);
        self.push(slot)
    }

    /// Store `text` in the byte arena and return a raw slot for it without
    /// placing the slot on the tape.
    pub(crate) fn raw_slot(&mut self, text: &str) -> Slot {
        let (start, len) = self.push_bytes(text.as_bytes());
        Slot::Raw { start, len }
    }

    fn push_bytes(&mut self, b: &[u8]) -> (usize, usize) {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(b);
        (start, b.len())
    }

    /// Index the next pushed slot will receive.
    pub(crate) fn next_index(&self) -> usize {
        self.slots.len()
    }

    /// Overwrite a container placeholder once its children are on the tape.
    pub(crate) fn finish(&mut self, at: usize, slot: Slot) {
        if let Some(s) = self.slots.get_mut(at) {
            *s = slot;
        }
    }

    pub(crate) fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub(crate) fn bytes(&self, start: usize, len: usize) -> Option<&[u8]> {
        self.bytes.get(start..start.checked_add(len)?)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Release any spare capacity left over from the size estimate.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.bytes.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_share_one_byte_arena() {
        let mut alloc = Allocator::with_capacity(16);
        let a = alloc.push_str("ab");
        let b = alloc.push_str("cde");
        assert_eq!(alloc.slot(a), Some(Slot::Str { start: 0, len: 2 }));
        assert_eq!(alloc.slot(b), Some(Slot::Str { start: 2, len: 3 }));
        assert_eq!(alloc.bytes(2, 3), Some(&b"cde"[..]));
    }

    #[test]
    fn capacity_is_a_quarter_and_the_tape_grows_past_it() {
        let mut alloc = Allocator::with_capacity(100);
        assert!(alloc.slots.capacity() >= 26);
        // "[1,1,...]" of 100 bytes holds 50 values.
        for _ in 0..50 {
            alloc.push(Slot::Int(1));
        }
        assert_eq!(alloc.slot_count(), 50);
        assert_eq!(alloc.slot(49), Some(Slot::Int(1)));
    }

    #[test]
    fn raw_slots_are_not_pushed() {
        let mut alloc = Allocator::with_capacity(8);
        let slot = alloc.raw_slot("1.50");
        assert_eq!(alloc.slot_count(), 0);
        assert_eq!(slot, Slot::Raw { start: 0, len: 4 });
        assert_eq!(alloc.bytes(0, 4), Some(&b"1.50"[..]));
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let alloc = Allocator::default();
        assert_eq!(alloc.slot(0), None);
        assert_eq!(alloc.bytes(0, 1), None);
        assert_eq!(alloc.bytes(usize::MAX, 2), None);
    }
}
