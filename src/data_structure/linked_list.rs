use std::fmt::{self, Debug, Display};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

use crate::data_structure::node::{Link, Node};

/// Singly linked list that owns every node reachable from `head`.
///
/// Values only leave the list by copy (`Option<T>` queries) or by move
/// (`pop_first`, `remove_at`, consuming iteration); no handle into the chain
/// is ever given out.
pub struct LinkedList<T> {
    head: Link<T>,
    _marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for LinkedList<T> {}
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            head: None,
            _marker: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends `value`. O(1).
    pub fn add_first(&mut self, value: T) {
        self.head = Some(Node::alloc(value, self.head));
    }

    /// Appends `value` after the current tail. O(n), the tail is found by walking.
    pub fn add_last(&mut self, value: T) {
        let node = Node::alloc(value, None);
        self.link_after(self.tail(), node);
    }

    pub fn length(&self) -> usize {
        self.iter().count()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.unlink(None, head))
    }

    /// Removes the node at `index` (0-based) and returns its value.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let mut seen = 0;
        let found = self.position(|_| {
            let hit = seen == index;
            seen += 1;
            hit
        });

        match found {
            Some((prev, ptr)) => Some(self.unlink(prev, ptr)),
            None => {
                trace!("remove_at({}) is past the end of the list", index);
                None
            }
        }
    }

    /// Relinks every node in place so traversal order is inverted.
    /// No node is allocated or freed.
    pub fn reverse(&mut self) {
        let mut prev = None;
        let mut current = self.head;

        while let Some(mut ptr) = current {
            unsafe {
                let node = ptr.as_mut();
                current = node.next();
                node.set_next(prev);
            }
            prev = Some(ptr);
        }

        self.head = prev;
    }

    /// Floyd's tortoise and hare. O(n) time, O(1) space.
    pub fn has_cycle(&self) -> bool {
        self.meeting_point().is_some()
    }

    /// Test fixture: links the last node back to the head.
    ///
    /// Does nothing on an empty list or when a cycle already exists. While the
    /// cycle is in place only `has_cycle`, `clear` and drop may be used; every
    /// other operation would walk the ring forever.
    pub fn create_cycle(&mut self) {
        let Some(head) = self.head else {
            return;
        };
        if self.has_cycle() {
            return;
        }

        if let Some(mut tail) = self.tail() {
            unsafe { tail.as_mut().set_next(Some(head)) };
            debug!("linked tail back to head, list now holds a cycle");
        }
    }

    /// Frees every node. Safe to call on a list that holds a cycle.
    pub fn clear(&mut self) {
        self.break_cycle();
        while self.pop_first().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            _marker: PhantomData,
        }
    }

    fn node(&self, ptr: NonNull<Node<T>>) -> &Node<T> {
        unsafe { ptr.as_ref() }
    }

    fn successor(ptr: NonNull<Node<T>>) -> Link<T> {
        unsafe { ptr.as_ref().next() }
    }

    fn tail(&self) -> Link<T> {
        let mut current = self.head?;
        while let Some(next) = Self::successor(current) {
            current = next;
        }
        Some(current)
    }

    /// First node whose value satisfies `predicate`, with its predecessor.
    fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<(Link<T>, NonNull<Node<T>>)> {
        let mut prev = None;
        let mut current = self.head;

        while let Some(ptr) = current {
            if predicate(self.node(ptr).data()) {
                return Some((prev, ptr));
            }
            prev = current;
            current = Self::successor(ptr);
        }
        None
    }

    /// Hangs `node` after `prev`, or makes it the head when `prev` is `None`.
    /// The caller sets `node`'s own successor beforehand.
    fn link_after(&mut self, prev: Link<T>, node: NonNull<Node<T>>) {
        match prev {
            Some(mut prev) => unsafe { prev.as_mut().set_next(Some(node)) },
            None => self.head = Some(node),
        }
    }

    fn unlink(&mut self, prev: Link<T>, ptr: NonNull<Node<T>>) -> T {
        let (data, next) = unsafe { Node::into_parts(ptr) };
        match prev {
            Some(mut prev) => unsafe { prev.as_mut().set_next(next) },
            None => self.head = next,
        }
        data
    }

    fn meeting_point(&self) -> Link<T> {
        let mut slow = self.head;
        let mut fast = self.head;

        while let Some(hare) = fast {
            let hare_next = Self::successor(hare)?;
            fast = Self::successor(hare_next);
            slow = slow.and_then(Self::successor);
            if fast.is_some() && fast == slow {
                return fast;
            }
        }
        None
    }

    /// Cuts the link that closes a cycle, turning the list back into a chain.
    fn break_cycle(&mut self) {
        let (Some(head), Some(meeting)) = (self.head, self.meeting_point()) else {
            return;
        };

        // runners from the head and from the meeting point meet at the entry
        let mut from_head = head;
        let mut from_meeting = meeting;
        while from_head != from_meeting {
            let (Some(a), Some(b)) = (Self::successor(from_head), Self::successor(from_meeting)) else {
                return;
            };
            from_head = a;
            from_meeting = b;
        }

        let entry = from_head;
        let mut last = entry;
        while let Some(next) = Self::successor(last) {
            if next == entry {
                break;
            }
            last = next;
        }
        unsafe { last.as_mut().set_next(None) };
        debug!("broke cycle before releasing nodes");
    }

    #[cfg(test)]
    pub(crate) fn node_addrs(&self) -> Vec<*const Node<T>> {
        let mut addrs = Vec::new();
        let mut current = self.head;
        while let Some(ptr) = current {
            addrs.push(ptr.as_ptr() as *const Node<T>);
            current = Self::successor(ptr);
        }
        addrs
    }
}

impl<T: PartialEq> LinkedList<T> {
    pub fn search(&self, value: &T) -> bool {
        self.iter().any(|data| data == value)
    }

    /// Removes the first node holding `value`. No-op when there is none.
    pub fn delete(&mut self, value: &T) {
        match self.position(|data| data == value) {
            Some((prev, ptr)) => {
                self.unlink(prev, ptr);
            }
            None => trace!("delete found no matching value, list unchanged"),
        }
    }
}

impl<T: PartialOrd> LinkedList<T> {
    /// Inserts `value` into a list sorted in ascending order, keeping it
    /// sorted. Equal values go after the ones already present.
    ///
    /// Sortedness is assumed, not checked.
    pub fn insert_ascending(&mut self, value: T) {
        let (prev, next) = match self.position(|data| data > &value) {
            Some((prev, ptr)) => (prev, Some(ptr)),
            None => (self.tail(), None),
        };
        self.link_after(prev, Node::alloc(value, next));
    }
}

impl<T: Clone> LinkedList<T> {
    pub fn get_first(&self) -> Option<T> {
        self.head.map(|ptr| self.node(ptr).data().clone())
    }

    pub fn get_last(&self) -> Option<T> {
        self.tail().map(|ptr| self.node(ptr).data().clone())
    }

    /// Value at the 0-based `index`, `None` when `index >= length()`.
    pub fn get_at_index(&self, index: usize) -> Option<T> {
        self.iter().nth(index).cloned()
    }

    /// Value at index `length() / 2`, found in a single fast/slow pass.
    pub fn find_middle_value(&self) -> Option<T> {
        let mut slow = self.head?;
        let mut fast = self.head;

        while let Some(hare) = fast {
            let Some(hare_next) = Self::successor(hare) else {
                break;
            };
            fast = Self::successor(hare_next);
            slow = Self::successor(slow)?;
        }

        Some(self.node(slow).data().clone())
    }

    /// Value `n` places before the tail (`n == 0` is the tail itself).
    /// `None` when `n >= length()`.
    pub fn find_nth_from_end(&self, n: usize) -> Option<T> {
        let mut lead = self.head?;
        for _ in 0..n {
            lead = Self::successor(lead)?;
        }

        let mut trail = self.head?;
        while let Some(next) = Self::successor(lead) {
            lead = next;
            trail = Self::successor(trail)?;
        }

        Some(self.node(trail).data().clone())
    }
}

impl<T: PartialOrd + Clone> LinkedList<T> {
    pub fn find_max(&self) -> Option<T> {
        let mut iter = self.iter();
        let mut max = iter.next()?;
        for data in iter {
            if data > max {
                max = data;
            }
        }
        Some(max.clone())
    }

    pub fn find_min(&self) -> Option<T> {
        let mut iter = self.iter();
        let mut min = iter.next()?;
        for data in iter {
            if data < min {
                min = data;
            }
        }
        Some(min.clone())
    }
}

impl<T: Display> LinkedList<T> {
    /// Writes every value, one per line, head to tail.
    pub fn visit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for data in self.iter() {
            writeln!(out, "{}", data)?;
        }
        Ok(())
    }

    pub fn visit_stdout(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.visit(&mut handle)
    }
}

pub struct Iter<'a, T> {
    next: Link<T>,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|ptr| unsafe {
            let node = &*ptr.as_ptr();
            self.next = node.next();
            node.data()
        })
    }
}

pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut list = LinkedList::new();
        for item in vec.into_iter().rev() {
            list.add_first(item);
        }
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = self.tail();
        for value in iter {
            let node = Node::alloc(value, None);
            self.link_after(tail, node);
            tail = Some(node);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Debug> Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            write!(f, "{:?}", first)?;
            for item in iter {
                write!(f, ", {:?}", item)?;
            }
        }

        write!(f, "]")
    }
}
