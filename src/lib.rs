//! A double-ended sequence container backed by a map of fixed-size storage
//! blocks instead of one contiguous allocation. Growing at either end never
//! moves element payloads, only block ownership handles.

extern crate alloc;

use alloc::{
    alloc::{alloc, dealloc, handle_alloc_error, Layout},
    vec::Vec,
};

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::{self, FusedIterator},
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Bound, Index, IndexMut, Range, RangeBounds},
    ptr::{self, NonNull},
    slice,
};

/// Elements per block. Blocks are never resized, so every position maps to
/// a fixed `(block, offset)` pair for as long as the block map is unchanged.
const BLOCK_CAP: usize = 512;

/// Slot count of the first allocated block map.
const MIN_MAP_LEN: usize = 8;

#[inline]
fn block_layout<T>() -> Layout {
    match Layout::array::<T>(BLOCK_CAP) {
        Ok(l) if l.size() <= isize::MAX as usize => l,
        _ => panic!("capacity overflow"),
    }
}

#[inline]
fn slot_array_layout<T>(len: usize) -> Layout {
    match Layout::array::<Option<NonNull<T>>>(len) {
        Ok(l) if l.size() <= isize::MAX as usize => l,
        _ => panic!("capacity overflow"),
    }
}

fn allocate_block<T>() -> NonNull<T> {
    if mem::size_of::<T>() == 0 {
        return NonNull::dangling();
    }
    let layout = block_layout::<T>();
    match NonNull::new(unsafe { alloc(layout) }) {
        Some(ptr) => ptr.cast(),
        None => handle_alloc_error(layout),
    }
}

fn release_block_storage<T>(block: NonNull<T>) {
    if mem::size_of::<T>() != 0 {
        unsafe { dealloc(block.as_ptr().cast(), block_layout::<T>()) };
    }
}

/// Resolves a range bound against `len`, panicking before the caller
/// mutates anything if the range is invalid.
fn check_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).expect("range start overflows usize"),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).expect("range end overflows usize"),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    if start > end {
        panic!("range start {start} is greater than range end {end}");
    }
    if end > len {
        panic!("range end {end} is out of bounds for a deque of length {len}");
    }
    start..end
}

/// Growable array of block-ownership slots. Each occupied slot owns exactly
/// one block; growth and recentering move the slot handles, never the
/// element storage they point at.
struct BlockMap<T> {
    slots: NonNull<Option<NonNull<T>>>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> BlockMap<T> {
    #[inline]
    const fn new() -> Self {
        Self { slots: NonNull::dangling(), len: 0, _marker: PhantomData }
    }

    #[inline]
    const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn slot(&self, idx: usize) -> Option<NonNull<T>> {
        assert!(idx < self.len, "slot index {idx} out of bounds for a map of {} slots", self.len);
        unsafe { self.slots.as_ptr().add(idx).read() }
    }

    /// Returns the block at `idx`. A missing or out-of-bounds block here
    /// means the window bookkeeping is broken, so fail loudly instead of
    /// wrapping the index around.
    #[inline]
    fn block(&self, idx: usize) -> NonNull<T> {
        match self.slot(idx) {
            Some(block) => block,
            None => panic!("block {idx} is not allocated"),
        }
    }

    fn ensure_block(&mut self, idx: usize) -> NonNull<T> {
        if let Some(block) = self.slot(idx) {
            return block;
        }
        let block = allocate_block::<T>();
        unsafe { self.slots.as_ptr().add(idx).write(Some(block)) };
        block
    }

    fn release_block(&mut self, idx: usize) {
        if let Some(block) = self.slot(idx) {
            unsafe { self.slots.as_ptr().add(idx).write(None) };
            release_block_storage(block);
        }
    }

    fn release_all(&mut self) {
        for idx in 0..self.len {
            self.release_block(idx);
        }
    }

    /// Moves the occupied slot run `old` so that it starts at `new_first`,
    /// clearing the slots it vacates. Handles overlap in both directions.
    fn relocate(&mut self, old: Range<usize>, new_first: usize) {
        let count = old.len();
        debug_assert!(old.end <= self.len && new_first + count <= self.len);
        if count == 0 || old.start == new_first {
            return;
        }
        let base = self.slots.as_ptr();
        unsafe {
            ptr::copy(base.add(old.start), base.add(new_first), count);
            if new_first > old.start {
                for idx in old.start..old.end.min(new_first) {
                    base.add(idx).write(None);
                }
            } else {
                for idx in old.start.max(new_first + count)..old.end {
                    base.add(idx).write(None);
                }
            }
        }
    }

    /// Replaces the slot array with one of `new_len` slots and moves the
    /// occupied run `old` to start at `new_first`. Only slot handles move;
    /// block storage stays where it is.
    fn grow(&mut self, new_len: usize, old: Range<usize>, new_first: usize) {
        debug_assert!(new_len > self.len && new_first + old.len() <= new_len);
        let layout = slot_array_layout::<T>(new_len);
        let new_slots = match NonNull::new(unsafe { alloc(layout) }) {
            Some(ptr) => ptr.cast::<Option<NonNull<T>>>(),
            None => handle_alloc_error(layout),
        };
        unsafe {
            for idx in 0..new_len {
                new_slots.as_ptr().add(idx).write(None);
            }
            if old.len() != 0 {
                ptr::copy_nonoverlapping(
                    self.slots.as_ptr().add(old.start),
                    new_slots.as_ptr().add(new_first),
                    old.len(),
                );
            }
            if self.len != 0 {
                dealloc(self.slots.as_ptr().cast(), slot_array_layout::<T>(self.len));
            }
        }
        self.slots = new_slots;
        self.len = new_len;
    }
}

impl<T> Drop for BlockMap<T> {
    fn drop(&mut self) {
        self.release_all();
        if self.len != 0 {
            unsafe { dealloc(self.slots.as_ptr().cast(), slot_array_layout::<T>(self.len)) };
        }
    }
}

/// A double-ended queue over a block map.
///
/// The live elements form a window described by `(start_block, start_index,
/// len)`: element `i` lives at linear position `start_index + i`, which
/// resolves to a block index and an in-block offset. Pushing at either end
/// allocates blocks on demand and popping frees them as soon as they are
/// vacated, so memory use tracks the live window plus map headroom.
pub struct Deque<T> {
    map: BlockMap<T>,
    start_block: usize,
    start_index: usize,
    len: usize,
}

impl<T> Deque<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { map: BlockMap::new(), start_block: 0, start_index: 0, len: 0 }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut this = Self::new();
        this.reserve(capacity);
        this
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements the deque can hold without growing the block map at the
    /// back. Blocks themselves are still allocated lazily.
    ///
    /// The value reflects the window's current position in the map:
    /// emptying the deque recenters the window, so headroom established
    /// by [`with_capacity`](Self::with_capacity) is not durable across a
    /// fill/empty cycle. Call [`reserve`](Self::reserve) again to
    /// re-establish back-end headroom.
    #[inline]
    pub fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            return usize::MAX;
        }
        (self.map.len() - self.start_block) * BLOCK_CAP - self.start_index
    }

    /// Converts a logical index into a `(block, offset)` pair. All block
    /// boundary arithmetic funnels through here.
    #[inline]
    fn locate(&self, idx: usize) -> (usize, usize) {
        let pos = self.start_index + idx;
        (self.start_block + pos / BLOCK_CAP, pos % BLOCK_CAP)
    }

    /// # Safety
    /// The block holding logical index `idx` must be allocated. If acquired
    /// through a const ref, the returned pointer may not be used to mutate
    /// the element.
    #[inline]
    unsafe fn ptr_at(&self, idx: usize) -> *mut T {
        if mem::size_of::<T>() == 0 {
            return NonNull::dangling().as_ptr();
        }
        let (block, offset) = self.locate(idx);
        self.map.block(block).as_ptr().add(offset)
    }

    /// Number of map slots the live window currently spans.
    #[inline]
    fn blocks_spanned(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            (self.start_index + self.len + BLOCK_CAP - 1) / BLOCK_CAP
        }
    }

    #[inline]
    fn reset_window(&mut self) {
        self.start_index = 0;
        self.start_block = self.map.len() / 2;
    }

    /// Makes room for `added` more blocks adjacent to the window, either by
    /// recentering the occupied slot run inside the current map or by
    /// growing the map. Growth triggered at the back leaves most of the new
    /// headroom at the high end of the map, and vice versa, so the growing
    /// end stays cheap to extend.
    #[cold]
    fn grow_map(&mut self, added: usize, at_front: bool) {
        debug_assert!(added > 0);
        let spanned = self.blocks_spanned();
        let needed = spanned + added;
        let old_run = self.start_block..self.start_block + spanned;

        if self.map.len() > 2 * needed {
            let region = (self.map.len() - needed) / 2;
            let first = if at_front { region + added } else { region };
            self.map.relocate(old_run, first);
            self.start_block = first;
        } else {
            let mut new_len = (self.map.len() * 2).max(MIN_MAP_LEN);
            while new_len < needed + 2 {
                new_len *= 2;
            }
            let spare = new_len - needed;
            let region = if at_front { new_len - needed - spare / 4 } else { spare / 4 };
            let first = if at_front { region + added } else { region };
            self.map.grow(new_len, old_run, first);
            self.start_block = first;
        }
    }

    /// Guarantees the map can address blocks for `additional` more elements
    /// past the current back end. No blocks are allocated here.
    pub fn reserve(&mut self, additional: usize) {
        let new_len = self.len.checked_add(additional).expect("capacity overflow");
        if mem::size_of::<T>() == 0 || additional == 0 {
            return;
        }
        let needed = (self.start_index + new_len + BLOCK_CAP - 1) / BLOCK_CAP;
        if self.start_block + needed > self.map.len() {
            self.grow_map(needed - self.blocks_spanned(), false);
        }
    }

    pub fn push_back(&mut self, val: T) {
        if mem::size_of::<T>() == 0 {
            self.len = self.len.checked_add(1).expect("capacity overflow");
            unsafe { ptr::write(NonNull::dangling().as_ptr(), val) };
            return;
        }
        let end = self.start_index + self.len;
        if self.start_block + end / BLOCK_CAP == self.map.len() {
            self.grow_map(1, false);
        }
        let end = self.start_index + self.len;
        let block = self.map.ensure_block(self.start_block + end / BLOCK_CAP);
        unsafe { block.as_ptr().add(end % BLOCK_CAP).write(val) };
        self.len += 1;
    }

    pub fn push_front(&mut self, val: T) {
        if mem::size_of::<T>() == 0 {
            self.len = self.len.checked_add(1).expect("capacity overflow");
            unsafe { ptr::write(NonNull::dangling().as_ptr(), val) };
            return;
        }
        if self.start_index == 0 {
            if self.start_block == 0 {
                self.grow_map(1, true);
            }
            let block = self.map.ensure_block(self.start_block - 1);
            unsafe { block.as_ptr().add(BLOCK_CAP - 1).write(val) };
            self.start_block -= 1;
            self.start_index = BLOCK_CAP - 1;
        } else {
            let block = self.map.ensure_block(self.start_block);
            self.start_index -= 1;
            unsafe { block.as_ptr().add(self.start_index).write(val) };
        }
        self.len += 1;
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if mem::size_of::<T>() == 0 {
            self.len -= 1;
            return Some(unsafe { ptr::read(NonNull::dangling().as_ptr()) });
        }
        let last = self.start_index + self.len - 1;
        let block = self.start_block + last / BLOCK_CAP;
        let offset = last % BLOCK_CAP;

        // We wrap the read value in a ManuallyDrop just in case something
        // unwinds before the bookkeeping is done.
        let val = ManuallyDrop::new(unsafe { self.map.block(block).as_ptr().add(offset).read() });
        self.len -= 1;
        if self.len == 0 {
            self.map.release_block(block);
            self.reset_window();
        } else if offset == 0 {
            self.map.release_block(block);
        }
        Some(ManuallyDrop::into_inner(val))
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if mem::size_of::<T>() == 0 {
            self.len -= 1;
            return Some(unsafe { ptr::read(NonNull::dangling().as_ptr()) });
        }
        let block = self.map.block(self.start_block);
        let val = ManuallyDrop::new(unsafe { block.as_ptr().add(self.start_index).read() });
        self.len -= 1;
        if self.len == 0 {
            self.map.release_block(self.start_block);
            self.reset_window();
        } else if self.start_index + 1 == BLOCK_CAP {
            self.map.release_block(self.start_block);
            self.start_block += 1;
            self.start_index = 0;
        } else {
            self.start_index += 1;
        }
        Some(ManuallyDrop::into_inner(val))
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &*self.ptr_at(0) })
        }
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &*self.ptr_at(self.len - 1) })
        }
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &mut *self.ptr_at(0) })
        }
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &mut *self.ptr_at(self.len - 1) })
        }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked(idx) })
        }
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        &*self.ptr_at(idx)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            None
        } else {
            Some(unsafe { self.get_unchecked_mut(idx) })
        }
    }

    /// # Safety
    /// Callers must ensure that `idx < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        &mut *self.ptr_at(idx)
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        if i >= self.len || j >= self.len {
            panic!(
                "tried to swap indices {i} and {j} on a deque of length {}",
                self.len
            );
        }
        unsafe { ptr::swap(self.ptr_at(i), self.ptr_at(j)) };
    }

    /// Copies `count` elements from logical positions `src..` to `dst..`,
    /// walking block by block in the direction that keeps overlapping
    /// ranges correct (like `ptr::copy`).
    ///
    /// # Safety
    /// Every source and destination position must lie in an allocated
    /// block. Overwritten destinations are not dropped.
    unsafe fn copy_elements(&mut self, src: usize, dst: usize, count: usize) {
        if mem::size_of::<T>() == 0 || count == 0 || src == dst {
            return;
        }
        if dst < src {
            let mut copied = 0;
            while copied < count {
                let (sb, soff) = self.locate(src + copied);
                let (db, doff) = self.locate(dst + copied);
                let chunk = (BLOCK_CAP - soff).min(BLOCK_CAP - doff).min(count - copied);
                ptr::copy(
                    self.map.block(sb).as_ptr().add(soff),
                    self.map.block(db).as_ptr().add(doff),
                    chunk,
                );
                copied += chunk;
            }
        } else {
            let mut left = count;
            while left > 0 {
                let (sb, soff) = self.locate(src + left - 1);
                let (db, doff) = self.locate(dst + left - 1);
                let chunk = (soff + 1).min(doff + 1).min(left);
                ptr::copy(
                    self.map.block(sb).as_ptr().add(soff + 1 - chunk),
                    self.map.block(db).as_ptr().add(doff + 1 - chunk),
                    chunk,
                );
                left -= chunk;
            }
        }
    }

    /// Moves the window's front edge forward by `count` positions, freeing
    /// every block the edge leaves behind. The skipped positions must
    /// already be vacated.
    fn advance_front(&mut self, count: usize) {
        if mem::size_of::<T>() == 0 {
            return;
        }
        let new_start = self.start_index + count;
        let vacated = new_start / BLOCK_CAP;
        for block in 0..vacated {
            self.map.release_block(self.start_block + block);
        }
        self.start_block += vacated;
        self.start_index = new_start % BLOCK_CAP;
    }

    /// Frees blocks past the back edge after `self.len` shrank from
    /// `old_len`. The vacated positions must already be dead.
    fn shrink_back_blocks(&mut self, old_len: usize) {
        debug_assert!(old_len >= self.len);
        if mem::size_of::<T>() == 0 {
            return;
        }
        let old_span = (self.start_index + old_len + BLOCK_CAP - 1) / BLOCK_CAP;
        let new_span = self.blocks_spanned();
        for block in new_span..old_span {
            self.map.release_block(self.start_block + block);
        }
        if self.len == 0 {
            self.reset_window();
        }
    }

    pub fn insert(&mut self, idx: usize, val: T) {
        if idx > self.len {
            panic!("tried to insert at index {idx} into a deque of length {}", self.len);
        }
        if idx == 0 {
            return self.push_front(val);
        }
        if idx == self.len {
            return self.push_back(val);
        }
        if mem::size_of::<T>() == 0 {
            self.len = self.len.checked_add(1).expect("capacity overflow");
            unsafe { ptr::write(NonNull::dangling().as_ptr(), val) };
            return;
        }

        let back_len = self.len - idx;
        if idx < back_len {
            // open the gap by shifting the shorter front part one step out
            if self.start_index == 0 {
                if self.start_block == 0 {
                    self.grow_map(1, true);
                }
                self.map.ensure_block(self.start_block - 1);
                self.start_block -= 1;
                self.start_index = BLOCK_CAP - 1;
            } else {
                self.map.ensure_block(self.start_block);
                self.start_index -= 1;
            }
            self.len += 1;
            unsafe {
                self.copy_elements(1, 0, idx);
                self.ptr_at(idx).write(val);
            }
        } else {
            // shift the shorter back part one step out instead
            let end = self.start_index + self.len;
            if self.start_block + end / BLOCK_CAP == self.map.len() {
                self.grow_map(1, false);
            }
            let end = self.start_index + self.len;
            self.map.ensure_block(self.start_block + end / BLOCK_CAP);
            self.len += 1;
            unsafe {
                self.copy_elements(idx, idx + 1, back_len);
                self.ptr_at(idx).write(val);
            }
        }
    }

    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len {
            return None;
        }
        if mem::size_of::<T>() == 0 {
            self.len -= 1;
            return Some(unsafe { ptr::read(NonNull::dangling().as_ptr()) });
        }

        let val = ManuallyDrop::new(unsafe { ptr::read(self.ptr_at(idx)) });
        let back_len = self.len - idx - 1;
        if idx < back_len {
            unsafe { self.copy_elements(0, 1, idx) };
            self.len -= 1;
            if self.start_index + 1 == BLOCK_CAP {
                self.map.release_block(self.start_block);
                self.start_block += 1;
                self.start_index = 0;
            } else {
                self.start_index += 1;
            }
        } else {
            unsafe { self.copy_elements(idx + 1, idx, back_len) };
            self.len -= 1;
            if self.len == 0 {
                self.map.release_block(self.start_block);
                self.reset_window();
            } else {
                let end = self.start_index + self.len;
                if end % BLOCK_CAP == 0 {
                    self.map.release_block(self.start_block + end / BLOCK_CAP);
                }
            }
        }
        Some(ManuallyDrop::into_inner(val))
    }

    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        if mem::size_of::<T>() == 0 {
            while self.len > new_len {
                self.len -= 1;
                unsafe { ptr::drop_in_place(NonNull::<T>::dangling().as_ptr()) };
            }
            return;
        }

        // destroy the tail run by run, freeing each block as it empties
        while self.len > new_len {
            let last = self.start_index + self.len - 1;
            let block = self.start_block + last / BLOCK_CAP;
            let block_lo = last - last % BLOCK_CAP;
            let run_lo = block_lo.max(self.start_index + new_len);
            let count = last - run_lo + 1;
            let run = unsafe { self.map.block(block).as_ptr().add(run_lo % BLOCK_CAP) };
            // shrink the window first so an unwinding destructor can't
            // observe (or re-drop) the dying run
            self.len -= count;
            if mem::needs_drop::<T>() {
                unsafe { ptr::drop_in_place(slice::from_raw_parts_mut(run, count)) };
            }
            if run_lo == block_lo || self.len == 0 {
                self.map.release_block(block);
            }
        }
        if self.len == 0 {
            self.reset_window();
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    pub fn resize(&mut self, new_len: usize, val: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || val.clone())
    }

    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, generator: F) {
        if new_len > self.len {
            let additional = new_len - self.len;
            // build the new tail first so a panicking generator leaves the
            // container untouched
            let mut tail = Deque::with_capacity(additional);
            tail.extend(iter::repeat_with(generator).take(additional));
            self.reserve(additional);
            for val in tail {
                self.push_back(val);
            }
        } else {
            self.truncate(new_len);
        }
    }

    pub fn append(&mut self, other: &mut Self) {
        self.reserve(other.len);
        while let Some(val) = other.pop_front() {
            self.push_back(val);
        }
    }

    #[inline]
    pub fn contains(&self, val: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == val)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { deque: self, head: 0, tail: self.len }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let tail = self.len;
        IterMut { deque: NonNull::from(&mut *self), head: 0, tail, _marker: PhantomData }
    }

    #[inline]
    pub fn range<R: RangeBounds<usize>>(&self, range: R) -> Iter<'_, T> {
        let Range { start, end } = check_range(range, self.len);
        Iter { deque: self, head: start, tail: end }
    }

    #[inline]
    pub fn range_mut<R: RangeBounds<usize>>(&mut self, range: R) -> IterMut<'_, T> {
        let Range { start, end } = check_range(range, self.len);
        IterMut { deque: NonNull::from(&mut *self), head: start, tail: end, _marker: PhantomData }
    }

    /// Removes and yields the elements in `range`. The range is validated
    /// before any state changes; dropping the `Drain` closes the gap from
    /// whichever side has fewer elements to move and frees vacated blocks.
    #[inline]
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T> {
        let Range { start, end } = check_range(range, self.len);
        // Truncate the visible length up front: if the Drain is leaked the
        // tail elements leak with it, but nothing is ever dropped twice.
        let orig_len = mem::replace(&mut self.len, start);
        Drain {
            deque: self,
            orig_len,
            drain_start: start,
            drain_len: end - start,
            idx: start,
            remaining: end - start,
        }
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        // destroys every live element and releases each block as it
        // empties; the map's destructor then frees the slot array
        self.truncate(0);
    }
}

impl<T> Default for Deque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<T: Send> Send for Deque<T> {}

unsafe impl<T: Sync> Sync for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for val in iter {
            self.push_back(val);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Deque<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<T> From<Deque<T>> for Vec<T> {
    #[inline]
    fn from(d: Deque<T>) -> Self {
        d.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    #[inline]
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut this = Self::with_capacity(self.len);
        this.extend(self.iter().cloned());
        this
    }

    fn clone_from(&mut self, source: &Self) {
        // build the copy first so the old contents survive a panicking clone
        *self = source.clone();
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Deque<U>> for Deque<T> {
    fn eq(&self, other: &Deque<U>) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Deque<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Deque<T> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.eq(other.as_slice())
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Deque<T> {
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        self.eq(other.as_slice())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: PartialOrd> PartialOrd for Deque<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Deque<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Hash> Hash for Deque<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|t| t.hash(state));
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Out of bounds access")
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Shared iterator. Positions are logical indices resolved through the
/// block map on each step, so advancing across a block boundary needs no
/// state beyond the index itself.
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    head: usize,
    tail: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        let item = unsafe { &*self.deque.ptr_at(self.head) };
        self.head += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.tail - self.head {
            self.head = self.tail;
            return None;
        }
        self.head += n;
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(unsafe { &*self.deque.ptr_at(self.tail) })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.tail - self.head {
            self.head = self.tail;
            return None;
        }
        self.tail -= n;
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { deque: self.deque, head: self.head, tail: self.tail }
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Exclusive iterator. Holds the deque through a raw pointer so the
/// handed-out element references can outlive each individual `next` call.
pub struct IterMut<'a, T> {
    deque: NonNull<Deque<T>>,
    head: usize,
    tail: usize,
    _marker: PhantomData<&'a mut Deque<T>>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter { deque: unsafe { self.deque.as_ref() }, head: self.head, tail: self.tail }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        // the handed-out references never alias: each index is produced once
        let item = unsafe { &mut *self.deque.as_ref().ptr_at(self.head) };
        self.head += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.tail - self.head {
            self.head = self.tail;
            return None;
        }
        self.head += n;
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(unsafe { &mut *self.deque.as_ref().ptr_at(self.tail) })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.tail - self.head {
            self.head = self.tail;
            return None;
        }
        self.tail -= n;
        self.next_back()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}

unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_iter()).finish()
    }
}

#[derive(Clone, Debug)]
pub struct IntoIter<T>(Deque<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.0.len
    }
}

impl<T> FusedIterator for IntoIter<T> {}

/// Draining iterator returned by [`Deque::drain`].
pub struct Drain<'a, T> {
    deque: &'a mut Deque<T>,
    orig_len: usize,
    drain_start: usize,
    drain_len: usize,
    idx: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = unsafe { self.deque.ptr_at(self.idx) };
        self.idx += 1;
        self.remaining -= 1;
        unsafe { Some(ptr::read(ptr)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Drain<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let ptr = unsafe { self.deque.ptr_at(self.idx + self.remaining) };
        unsafe { Some(ptr::read(ptr)) }
    }
}

impl<'a, T> ExactSizeIterator for Drain<'a, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, T> FusedIterator for Drain<'a, T> {}

impl<'a, T> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        struct DropGuard<'a, 'b, T>(&'a mut Drain<'b, T>);

        impl<'a, 'b, T> Drop for DropGuard<'a, 'b, T> {
            fn drop(&mut self) {
                for _ in &mut *self.0 {}

                let drain_start = self.0.drain_start;
                let drain_len = self.0.drain_len;
                let orig_len = self.0.orig_len;
                let deque = &mut *self.0.deque;

                let head_len = drain_start;
                let tail_len = orig_len - drain_start - drain_len;

                // close the gap from whichever side has fewer elements to
                // move, then free every block the window no longer covers
                if head_len < tail_len {
                    unsafe { deque.copy_elements(0, drain_len, head_len) };
                    deque.advance_front(drain_len);
                    deque.len = orig_len - drain_len;
                } else {
                    unsafe {
                        deque.copy_elements(drain_start + drain_len, drain_start, tail_len)
                    };
                    deque.len = orig_len - drain_len;
                    deque.shrink_back_blocks(orig_len);
                }
            }
        }

        while let Some(item) = self.next() {
            let guard = DropGuard(self);
            drop(item);
            mem::forget(guard);
        }

        DropGuard(self);
    }
}

/// Creates a [`Deque`] containing the given elements, with the same two
/// forms as `vec!`: a list of values or `value; count`.
#[macro_export]
macro_rules! deque {
    () => {
        $crate::Deque::new()
    };
    ($elem:expr; $n:expr) => {{
        let n = $n;
        let mut d = $crate::Deque::with_capacity(n);
        d.resize(n, $elem);
        d
    }};
    ($($x:expr),+ $(,)?) => {
        <$crate::Deque<_> as ::core::iter::FromIterator<_>>::from_iter([$($x),+])
    };
}
