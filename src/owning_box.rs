//! A value type that exclusively owns zero or one heap-allocated resource.
//!
//! `OwningBox` is either owning (exactly one live resource) or empty. Copying
//! duplicates the resource into a fresh allocation, moving transfers the
//! allocation and leaves the source empty, and dropping releases whatever is
//! owned. An empty box releases nothing.
//!
//! Self-assignment through references cannot be written: the target is
//! borrowed mutably, so the source can never alias it. Assignment between
//! slots of a slice, where the slots may coincide, goes through
//! [`copy_assign_at`] and [`move_assign_at`], which treat `dst == src` as a
//! no-op.

use std::alloc::{alloc, Layout};
use std::fmt;

use crate::diagnostics::{self, ptr_to_string, to_cout};
use crate::error::{OwnershipError, Result};

/// Default payload: a single integer, cheap to duplicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Resource {
    pub x: i32,
}

impl Resource {
    pub fn new(x: i32) -> Self {
        Resource { x }
    }
}

/// Exclusive owner of zero or one heap-allocated `T`.
pub struct OwningBox<T = Resource> {
    slot: Option<Box<T>>,
}

// =============================================================================
// Allocation
// =============================================================================

/// Moves `value` to the heap, reporting exhaustion instead of aborting.
fn try_box<T>(value: T) -> Result<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: layout has a non-zero size.
    let raw = unsafe { alloc(layout) }.cast::<T>();
    if raw.is_null() {
        return Err(OwnershipError::allocation_failed::<T>());
    }

    // SAFETY: raw is non-null and was allocated by the global allocator with
    // Layout::new::<T>(), the layout Box<T> expects.
    unsafe {
        raw.write(value);
        Ok(Box::from_raw(raw))
    }
}

fn trace<T>(event: &str, ptr: *const T) {
    if diagnostics::ENABLED {
        to_cout(&format!("{} {}", event, ptr_to_string(ptr)));
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T> OwningBox<T> {
    /// A box that owns nothing.
    pub const fn empty() -> Self {
        OwningBox { slot: None }
    }

    pub fn from_value(value: T) -> Self {
        Self::adopt(Box::new(value))
    }

    pub fn try_from_value(value: T) -> Result<Self> {
        Ok(Self::adopt(try_box(value)?))
    }

    fn adopt(owned: Box<T>) -> Self {
        trace("acquire", &*owned as *const T);
        OwningBox { slot: Some(owned) }
    }

    /// Owns a default-constructed resource.
    pub fn new() -> Self
    where
        T: Default,
    {
        Self::from_value(T::default())
    }

    pub fn try_new() -> Result<Self>
    where
        T: Default,
    {
        Self::try_from_value(T::default())
    }
}

impl<T: Default> Default for OwningBox<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Observation
// =============================================================================

impl<T> OwningBox<T> {
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_deref_mut()
    }

    /// Address of the owned resource, or null when empty.
    pub fn as_ptr(&self) -> *const T {
        match &self.slot {
            Some(owned) => &**owned as *const T,
            None => std::ptr::null(),
        }
    }

    /// Identity comparison: true only for the very same box.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }

    /// Unwraps the resource, leaving nothing to release.
    pub fn into_inner(mut self) -> Option<T> {
        self.slot.take().map(|owned| *owned)
    }
}

// =============================================================================
// Release and move
// =============================================================================

impl<T> OwningBox<T> {
    /// Drops the owned resource now. Returns whether anything was released.
    pub fn release(&mut self) -> bool {
        match self.slot.take() {
            Some(owned) => {
                trace("release", &*owned as *const T);
                drop(owned);
                true
            }
            None => false,
        }
    }

    /// Move construction: a new box takes the allocation, `self` is left empty.
    pub fn take(&mut self) -> Self {
        OwningBox {
            slot: self.slot.take(),
        }
    }

    /// Move assignment: releases the current resource, then takes `source`'s.
    pub fn move_from(&mut self, source: &mut Self) {
        self.release();
        self.slot = source.slot.take();
    }
}

impl<T> Drop for OwningBox<T> {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Copy
// =============================================================================

impl<T: Clone> OwningBox<T> {
    /// Copy construction that reports allocation failure.
    pub fn try_clone(&self) -> Result<Self> {
        match self.get() {
            Some(value) => Self::try_from_value(value.clone()),
            None => Ok(Self::empty()),
        }
    }

    /// Copy assignment. The current resource is released before the
    /// duplicate is made.
    pub fn assign_from(&mut self, source: &Self) {
        self.release();
        if let Some(value) = source.get() {
            *self = Self::from_value(value.clone());
        }
    }

    /// Copy assignment that reports allocation failure. On failure `self` is
    /// left empty: its previous resource has already been released.
    pub fn try_assign_from(&mut self, source: &Self) -> Result<()> {
        self.assign_with(source, try_box)
    }

    fn assign_with<F>(&mut self, source: &Self, allocate: F) -> Result<()>
    where
        F: FnOnce(T) -> Result<Box<T>>,
    {
        self.release();
        if let Some(value) = source.get() {
            *self = Self::adopt(allocate(value.clone())?);
        }
        Ok(())
    }
}

impl<T: Clone> Clone for OwningBox<T> {
    fn clone(&self) -> Self {
        match self.get() {
            Some(value) => Self::from_value(value.clone()),
            None => Self::empty(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

// =============================================================================
// Slot-to-slot assignment
// =============================================================================

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (low, high) = items.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}

/// Copies `boxes[src]` into `boxes[dst]`. Does nothing when `dst == src`.
///
/// # Panics
///
/// Panics if either index is out of bounds.
pub fn copy_assign_at<T: Clone>(boxes: &mut [OwningBox<T>], dst: usize, src: usize) {
    if dst == src {
        assert!(dst < boxes.len(), "slot {} out of bounds", dst);
        return;
    }
    let (target, source) = pair_mut(boxes, dst, src);
    target.assign_from(source);
}

/// Fallible form of [`copy_assign_at`].
pub fn try_copy_assign_at<T: Clone>(
    boxes: &mut [OwningBox<T>],
    dst: usize,
    src: usize,
) -> Result<()> {
    if dst == src {
        assert!(dst < boxes.len(), "slot {} out of bounds", dst);
        return Ok(());
    }
    let (target, source) = pair_mut(boxes, dst, src);
    target.try_assign_from(source)
}

/// Moves `boxes[src]` into `boxes[dst]`, emptying the source slot. Does
/// nothing when `dst == src`; in particular the box is not emptied.
///
/// # Panics
///
/// Panics if either index is out of bounds.
pub fn move_assign_at<T>(boxes: &mut [OwningBox<T>], dst: usize, src: usize) {
    if dst == src {
        assert!(dst < boxes.len(), "slot {} out of bounds", dst);
        return;
    }
    let (target, source) = pair_mut(boxes, dst, src);
    target.move_from(source);
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> From<T> for OwningBox<T> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: PartialEq> PartialEq for OwningBox<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq> Eq for OwningBox<T> {}

impl<T: fmt::Debug> fmt::Debug for OwningBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("OwningBox").field(value).finish(),
            None => f.write_str("OwningBox(<empty>)"),
        }
    }
}
