use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A single cell of the list. Only `LinkedList` creates or frees nodes.
pub(crate) struct Node<T> {
    data: T,
    next: Link<T>,
}

impl<T> Node<T> {
    /// Moves a new node to the heap and hands back its address.
    pub(crate) fn alloc(data: T, next: Link<T>) -> NonNull<Node<T>> {
        let node = Box::new(Node { data, next });
        unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
    }

    /// Takes the node back from the heap and splits it into its parts.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `Node::alloc`, must not have been freed already
    /// and no reference into the node may be alive.
    pub(crate) unsafe fn into_parts(ptr: NonNull<Node<T>>) -> (T, Link<T>) {
        let node = Box::from_raw(ptr.as_ptr());
        (node.data, node.next)
    }

    pub(crate) fn data(&self) -> &T {
        &self.data
    }

    pub(crate) fn next(&self) -> Link<T> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Link<T>) {
        self.next = next;
    }
}
