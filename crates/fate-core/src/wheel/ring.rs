//! Circular sequence of entries stored in a slot arena.
//!
//! Entries are addressed by generational [`EntryId`] handles. The forward
//! link of each entry is a slot index, so removing an entry never leaves a
//! dangling owner: the slot is cleared, its generation bumped and the index
//! parked on a free list for the next insertion.
//!
//! # Invariants
//! - If the ring is non-empty, following `next` from any live entry returns
//!   to it after exactly `len` steps.
//! - `len` equals the number of occupied slots.
//! - A handle is live iff its generation matches its slot's generation and
//!   the slot is occupied.

/// Stable handle to one ring entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryId {
    index: usize,
    generation: u32,
}

impl EntryId {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// One ring slot's payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub value: i32,
    /// Advance distance computed the last time a spin left this entry.
    pub step_size: usize,
}

impl Entry {
    pub fn new(value: i32) -> Entry {
        Entry {
            value,
            step_size: 1,
        }
    }
}

struct Node {
    entry: Entry,
    next: usize,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

pub struct Ring {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<EntryId>,
    len: usize,
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl Ring {
    pub fn new() -> Ring {
        Ring {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<EntryId> {
        self.head
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.node(id).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut().map(|node| &mut node.entry)
    }

    /// Appends `value` just before the head so ring order follows insertion
    /// order. The first entry links to itself.
    pub fn push_back(&mut self, value: i32) -> EntryId {
        let tail = self.head.and_then(|head| self.prev(head));
        let id = self.allocate(Entry::new(value));

        match (self.head, tail) {
            (Some(head), Some(tail)) => {
                self.set_next(id, head.index);
                self.set_next(tail, id.index);
            }
            _ => {
                self.set_next(id, id.index);
                self.head = Some(id);
            }
        }
        self.len += 1;
        id
    }

    /// Entry one forward link after `id`.
    pub fn next(&self, id: EntryId) -> Option<EntryId> {
        let next = self.node(id)?.next;
        Some(self.id_at(next))
    }

    /// Entry whose forward link points at `id`. Walks the ring.
    pub fn prev(&self, id: EntryId) -> Option<EntryId> {
        self.node(id)?;
        let mut cursor = id;
        loop {
            let next = self.next(cursor)?;
            if next == id {
                return Some(cursor);
            }
            cursor = next;
        }
    }

    /// Follows `steps` forward links starting at `id`.
    pub fn advance(&self, id: EntryId, steps: usize) -> Option<EntryId> {
        let mut cursor = id;
        for _ in 0..steps {
            cursor = self.next(cursor)?;
        }
        Some(cursor)
    }

    /// Unlinks `id`, returning its payload and the entry that followed it.
    /// The follower is `None` when the ring became empty.
    pub fn remove(&mut self, id: EntryId) -> Option<(Entry, Option<EntryId>)> {
        let prev = self.prev(id)?;
        let successor = self.next(id)?;

        let follower = if prev == id {
            self.head = None;
            None
        } else {
            self.set_next(prev, successor.index);
            if self.head == Some(id) {
                self.head = Some(successor);
            }
            Some(successor)
        };

        let slot = &mut self.slots[id.index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        Some((node.entry, follower))
    }

    /// Walks the ring once starting at the head.
    pub fn iter(&self) -> RingIter<'_> {
        RingIter {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, id: EntryId) -> Option<&Node> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn id_at(&self, index: usize) -> EntryId {
        EntryId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn set_next(&mut self, id: EntryId, next: usize) {
        if let Some(node) = self.slots[id.index].node.as_mut() {
            node.next = next;
        }
    }

    fn allocate(&mut self, entry: Entry) -> EntryId {
        let node = Node {
            entry,
            next: usize::MAX,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                EntryId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                EntryId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }
}

pub struct RingIter<'a> {
    ring: &'a Ring,
    cursor: Option<EntryId>,
    remaining: usize,
}

impl<'a> Iterator for RingIter<'a> {
    type Item = (EntryId, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        let entry = self.ring.get(id)?;
        self.cursor = self.ring.next(id);
        self.remaining -= 1;
        Some((id, entry))
    }
}
