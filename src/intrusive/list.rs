use core::{cmp::Ordering, fmt, marker::PhantomData, ptr::NonNull};

use crate::error::{ensure, Error, ErrorPolicy, Report};

use super::{
    iter::Iter,
    single::ForwardLink,
    traits::{Link, Linked, ListLink, Push},
};

/// A position in an [`IntrusiveForwardList`].
///
/// `BeforeBegin` is the list's sentinel, `End` is one past the last node.
pub enum Position<T> {
    BeforeBegin,
    At(NonNull<T>),
    End,
}

impl<T> Position<T> {
    /// Get the node at this position, if there is one.
    pub fn node(&self) -> Option<NonNull<T>> {
        match self {
            Position::At(node) => Some(*node),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Position::End)
    }
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Position::BeforeBegin, Position::BeforeBegin) => true,
            (Position::At(a), Position::At(b)) => a == b,
            (Position::End, Position::End) => true,
            _ => false,
        }
    }
}

impl<T> Eq for Position<T> {}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::BeforeBegin => f.write_str("BeforeBegin"),
            Position::At(node) => f.debug_tuple("At").field(node).finish(),
            Position::End => f.write_str("End"),
        }
    }
}

/// An intrusive singly linked list.
///
/// The list holds a `before_begin` sentinel link and a count. It works over
/// both [`ForwardLink`] and [`BidirectionalLink`](super::double::BidirectionalLink)
/// roles; with a bidirectional role the first node's `previous` is kept
/// cleared, so no node ever points back into the list itself and the list can
/// be moved freely. The last node points at [`ListLink::TERMINATOR`], so
/// every member reads as linked.
///
/// Every node that leaves the list has its link cleared. Dropping the list
/// does not touch its nodes; call [`clear`](Self::clear) first if the nodes are
/// going to be reused.
pub struct IntrusiveForwardList<T, L = ForwardLink, P = Report>
where
    T: Linked<L>,
    L: ListLink,
{
    start: L,
    count: usize,
    _marker: PhantomData<(*const T, P)>,
}

impl<T, L, P> IntrusiveForwardList<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    /// Creates a new, empty list.
    pub const fn new() -> Self {
        IntrusiveForwardList {
            start: L::TERMINATED,
            count: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn start_ptr(&mut self) -> NonNull<L> {
        NonNull::from(&mut self.start)
    }

    #[inline]
    fn head(&self) -> Option<NonNull<L>> {
        self.start.next()
    }

    #[inline]
    unsafe fn node_of<'n>(link: NonNull<L>) -> &'n T {
        unsafe { &*T::from_link(link).as_ptr() }
    }

    /// Turn a position into the link it names. `End` has no link.
    #[inline]
    fn link_at(&mut self, position: Position<T>) -> Option<NonNull<L>> {
        match position {
            Position::BeforeBegin => Some(self.start_ptr()),
            Position::At(node) => Some(T::to_link(node)),
            Position::End => None,
        }
    }

    /// Forget any back pointer from the head into the sentinel.
    #[inline]
    fn release_head(&mut self) {
        if let Some(head) = self.head() {
            unsafe { L::detach_previous(head) };
        }
    }

    /// Returns true if the list holds fewer than two nodes.
    fn is_trivial(&self) -> bool {
        match self.head() {
            None => true,
            Some(head) => unsafe { head.as_ref().next().is_none() },
        }
    }

    fn is_sorted_by<F>(&self, compare: &mut F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut nodes = self.iter();
        let Some(mut previous) = nodes.next() else {
            return true;
        };
        for node in nodes {
            if compare(node, previous) == Ordering::Less {
                return false;
            }
            previous = node;
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    /// Get the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Get the first node.
    pub fn front(&self) -> Option<&T> {
        self.head().map(|head| unsafe { &*T::from_link(head).as_ptr() })
    }

    pub fn iter(&self) -> Iter<'_, T, L> {
        unsafe { Iter::new(self.head(), self.count) }
    }

    /// The position before the first node.
    pub fn before_begin(&self) -> Position<T> {
        Position::BeforeBegin
    }

    /// The position of the first node, or `End` if the list is empty.
    pub fn begin(&self) -> Position<T> {
        match self.head() {
            Some(head) => Position::At(unsafe { T::from_link(head) }),
            None => Position::End,
        }
    }

    /// The position one past the last node.
    pub fn end(&self) -> Position<T> {
        Position::End
    }

    /// The position `index` steps from `begin`. `index == len()` is `End`.
    pub fn position_at(&self, index: usize) -> Position<T> {
        let mut current = self.head();
        for _ in 0..index {
            match current {
                Some(link) => current = unsafe { link.as_ref().next() },
                None => break,
            }
        }
        match current {
            Some(link) => Position::At(unsafe { T::from_link(link) }),
            None => Position::End,
        }
    }

    /// The position after `position`. The position after `End` is `End`.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list.
    pub unsafe fn next_position(&self, position: Position<T>) -> Position<T> {
        let next = match position {
            Position::BeforeBegin => self.head(),
            Position::At(node) => unsafe { T::to_link(node).as_ref().next() },
            Position::End => None,
        };
        match next {
            Some(link) => Position::At(unsafe { T::from_link(link) }),
            None => Position::End,
        }
    }

    /// Get the node at `position`.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list.
    pub unsafe fn get(&self, position: Position<T>) -> Option<&T> {
        position.node().map(|node| unsafe { &*node.as_ptr() })
    }

    /// Unlink every node, clearing each link.
    pub fn clear(&mut self) {
        let mut current = self.head();
        while let Some(link) = current {
            unsafe {
                current = link.as_ref().next();
                (*link.as_ptr()).clear();
            }
        }
        self.start = L::TERMINATED;
        self.count = 0;
    }

    /// Replace the contents of the list with `nodes`, in order.
    ///
    /// # Safety
    ///
    /// Every node must stay valid, and must not move, while it is in the list.
    pub unsafe fn assign<I>(&mut self, nodes: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = NonNull<T>>,
        I::IntoIter: Clone,
    {
        let nodes = nodes.into_iter();
        unsafe { Self::check_batch(&nodes)? };

        self.clear();
        unsafe { self.link_all_after(Position::BeforeBegin, nodes) };
        Ok(())
    }

    /// Push a node to the front of the list.
    ///
    /// # Safety
    ///
    /// `node` must stay valid, and must not move, while it is in the list.
    pub unsafe fn push_front(&mut self, node: NonNull<T>) -> Result<(), Error> {
        unsafe { self.insert_after(Position::BeforeBegin, node).map(|_| ()) }
    }

    /// Pop the first node and clear its link.
    pub fn pop_front(&mut self) -> Result<NonNull<T>, Error> {
        let start = self.start_ptr();
        let Some(head) = self.head() else {
            return Err(P::raise(Error::Empty));
        };

        unsafe {
            L::unlink_after(start);
            (*head.as_ptr()).clear();
        }
        self.count -= 1;
        self.release_head();
        Ok(unsafe { T::from_link(head) })
    }

    /// Insert `node` after `position` and return the node's position.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list, and `node` must
    /// stay valid, and must not move, while it is in the list.
    pub unsafe fn insert_after(&mut self, position: Position<T>, node: NonNull<T>) -> Result<Position<T>, Error> {
        let Some(before) = self.link_at(position) else {
            return Err(P::raise(Error::InvalidPosition));
        };
        let link = T::to_link(node);
        ensure::<P, _>(|| unsafe { !link.as_ref().is_linked() }, Error::AlreadyLinked)?;

        unsafe {
            (*link.as_ptr()).clear();
            L::link_splice(Some(before), Some(link));
        }
        self.count += 1;
        self.release_head();
        Ok(Position::At(node))
    }

    /// Insert `nodes` after `position`, in order, and return the position of
    /// the last inserted node (`position` itself if `nodes` is empty).
    ///
    /// With a checking policy every node is validated before the first one is
    /// inserted.
    ///
    /// # Safety
    ///
    /// As for [`insert_after`](Self::insert_after), for every node.
    pub unsafe fn insert_after_range<I>(&mut self, position: Position<T>, nodes: I) -> Result<Position<T>, Error>
    where
        I: IntoIterator<Item = NonNull<T>>,
        I::IntoIter: Clone,
    {
        if position.is_end() {
            return Err(P::raise(Error::InvalidPosition));
        }
        let nodes = nodes.into_iter();
        unsafe { Self::check_batch(&nodes)? };

        Ok(unsafe { self.link_all_after(position, nodes) })
    }

    /// Check that every node of a batch is unlinked and appears only once.
    ///
    /// Each node is marked as linked while the batch is scanned, so a repeat
    /// is caught like any other linked node. The marks are cleared before
    /// returning.
    unsafe fn check_batch<I>(nodes: &I) -> Result<(), Error>
    where
        I: Iterator<Item = NonNull<T>> + Clone,
    {
        if !P::CHECKS {
            return Ok(());
        }

        let mut marked = 0;
        let mut rejected = false;
        for node in nodes.clone() {
            let link = T::to_link(node);
            if unsafe { link.as_ref().is_linked() } {
                rejected = true;
                break;
            }
            unsafe { L::link(Some(link), Some(L::TERMINATOR)) };
            marked += 1;
        }

        for node in nodes.clone().take(marked) {
            unsafe { (*T::to_link(node).as_ptr()).clear() };
        }
        ensure::<P, _>(|| !rejected, Error::AlreadyLinked)
    }

    /// Link `nodes` one after the other behind `position`, which is not `End`.
    unsafe fn link_all_after<I>(&mut self, position: Position<T>, nodes: I) -> Position<T>
    where
        I: Iterator<Item = NonNull<T>>,
    {
        let mut at = position;
        for node in nodes {
            let Some(before) = self.link_at(at) else {
                break;
            };
            let link = T::to_link(node);
            unsafe {
                (*link.as_ptr()).clear();
                L::link_splice(Some(before), Some(link));
            }
            self.count += 1;
            at = Position::At(node);
        }
        self.release_head();
        at
    }

    /// Remove the node after `position`, clear its link, and return the
    /// position of the node that now follows `position`.
    ///
    /// Erasing after the last node, or after `End`, changes nothing and
    /// returns `End`.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list.
    pub unsafe fn erase_after(&mut self, position: Position<T>) -> Position<T> {
        let Some(before) = self.link_at(position) else {
            return Position::End;
        };

        unsafe {
            let Some(erased) = before.as_ref().next() else {
                return Position::End;
            };
            L::unlink_after(before);
            (*erased.as_ptr()).clear();
            self.count -= 1;
            self.release_head();

            match before.as_ref().next() {
                Some(next) => Position::At(T::from_link(next)),
                None => Position::End,
            }
        }
    }

    /// Remove every node strictly between `first` and `last`, clearing each
    /// link, and return `last`.
    ///
    /// # Safety
    ///
    /// `first` and `last` must be current positions of this list, with `last`
    /// at or after `first`.
    pub unsafe fn erase_after_range(&mut self, first: Position<T>, last: Position<T>) -> Position<T> {
        if first == last {
            return last;
        }
        let Some(before) = self.link_at(first) else {
            return last;
        };
        let stop = match last {
            Position::At(node) => Some(T::to_link(node)),
            _ => None,
        };

        unsafe {
            let mut current = before.as_ref().next();
            while current != stop {
                let Some(link) = current else {
                    break;
                };
                current = link.as_ref().next();
                (*link.as_ptr()).clear();
                self.count -= 1;
            }
            L::link(Some(before), L::or_terminator(stop));
        }
        self.release_head();
        last
    }

    /// Move every node of `other` after `position`. `other` is left empty.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list, and the nodes of
    /// `other` must stay valid while they are in this list.
    pub unsafe fn splice_after(&mut self, position: Position<T>, other: &mut Self) -> Result<(), Error> {
        let Some(before) = self.link_at(position) else {
            return Err(P::raise(Error::InvalidPosition));
        };
        let Some(first) = other.head() else {
            return Ok(());
        };

        unsafe {
            let mut last = first;
            while let Some(next) = last.as_ref().next() {
                last = next;
            }
            L::link_splice_range(Some(before), first, last);
        }
        self.count += other.count;
        other.start = L::TERMINATED;
        other.count = 0;
        self.release_head();
        Ok(())
    }

    /// Move the node after `other_position` in `other` to after `position`.
    ///
    /// Nothing happens if there is no node after `other_position`.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list and
    /// `other_position` a current position of `other`.
    pub unsafe fn splice_after_one(
        &mut self,
        position: Position<T>,
        other: &mut Self,
        other_position: Position<T>,
    ) -> Result<(), Error> {
        let (Some(before), Some(source)) = (self.link_at(position), other.link_at(other_position)) else {
            return Err(P::raise(Error::InvalidPosition));
        };

        unsafe {
            let Some(moved) = source.as_ref().next() else {
                return Ok(());
            };
            L::unlink_after(source);
            L::link_splice(Some(before), Some(moved));
        }
        other.count -= 1;
        self.count += 1;
        other.release_head();
        self.release_head();
        Ok(())
    }

    /// Move the nodes strictly between `first` and `last` in `other` to after
    /// `position`.
    ///
    /// # Safety
    ///
    /// `position` must be a current position of this list; `first` and `last`
    /// must be current positions of `other`.
    pub unsafe fn splice_after_range(
        &mut self,
        position: Position<T>,
        other: &mut Self,
        first: Position<T>,
        last: Position<T>,
    ) -> Result<(), Error> {
        let (Some(before), Some(source)) = (self.link_at(position), other.link_at(first)) else {
            return Err(P::raise(Error::InvalidPosition));
        };
        if first == last {
            return Ok(());
        }
        let stop = other.link_at(last);

        let Some((run_first, run_last, moved)) = (unsafe { Self::find_run(source, stop, None)? }) else {
            return Ok(());
        };

        unsafe {
            L::unlink_after_range(source, run_last);
            L::link_splice_range(Some(before), run_first, run_last);
        }
        other.count -= moved;
        self.count += moved;
        other.release_head();
        self.release_head();
        Ok(())
    }

    /// Move the nodes strictly between `first` and `last` to after `position`,
    /// all within this list.
    ///
    /// Splicing to `first` itself, or splicing an empty range, leaves the list
    /// unchanged. A `position` inside the moved range is
    /// [`Error::InvalidPosition`] and the list keeps its order.
    ///
    /// # Safety
    ///
    /// `position`, `first` and `last` must be current positions of this list.
    pub unsafe fn splice_after_within(
        &mut self,
        position: Position<T>,
        first: Position<T>,
        last: Position<T>,
    ) -> Result<(), Error> {
        let (Some(before), Some(source)) = (self.link_at(position), self.link_at(first)) else {
            return Err(P::raise(Error::InvalidPosition));
        };
        if before == source || first == last {
            return Ok(());
        }
        let stop = self.link_at(last);

        let Some((run_first, run_last, _)) = (unsafe { Self::find_run(source, stop, Some(before))? }) else {
            return Ok(());
        };

        unsafe {
            L::unlink_after_range(source, run_last);
            L::link_splice_range(Some(before), run_first, run_last);
        }
        self.release_head();
        Ok(())
    }

    /// Walk the run strictly between `source` and `stop`, returning its first
    /// and last links and its length, or `None` if it is empty.
    ///
    /// Fails if `stop` is never reached, or if `forbidden` lies inside the run.
    unsafe fn find_run(
        source: NonNull<L>,
        stop: Option<NonNull<L>>,
        forbidden: Option<NonNull<L>>,
    ) -> Result<Option<(NonNull<L>, NonNull<L>, usize)>, Error> {
        unsafe {
            let first = source.as_ref().next();
            let Some(run_first) = first.filter(|&link| Some(link) != stop) else {
                return Ok(None);
            };

            let mut run_last = run_first;
            let mut moved = 1;
            loop {
                if Some(run_last) == forbidden {
                    return Err(P::raise(Error::InvalidPosition));
                }
                match run_last.as_ref().next() {
                    next if next == stop => break,
                    Some(next) => {
                        run_last = next;
                        moved += 1;
                    }
                    None => return Err(P::raise(Error::InvalidPosition)),
                }
            }
            Ok(Some((run_first, run_last, moved)))
        }
    }

    /// Merge the sorted list `other` into this sorted list. See [`merge_by`](Self::merge_by).
    pub fn merge(&mut self, other: &mut Self) -> Result<(), Error>
    where
        T: Ord,
    {
        self.merge_by(other, T::cmp)
    }

    /// Merge the sorted list `other` into this sorted list, leaving `other`
    /// empty.
    ///
    /// The merge is stable: of two equal nodes, the one from `self` comes
    /// first. With a checking policy unsorted input is rejected with
    /// [`Error::Unsorted`] before anything moves.
    pub fn merge_by<F>(&mut self, other: &mut Self, mut compare: F) -> Result<(), Error>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if other.is_empty() {
            return Ok(());
        }
        ensure::<P, _>(
            || self.is_sorted_by(&mut compare) && other.is_sorted_by(&mut compare),
            Error::Unsorted,
        )?;

        let start = self.start_ptr();
        let mut tail = start;
        let mut left = unsafe { start.as_ref().next() };
        let mut right = other.head();

        unsafe {
            while let (Some(a), Some(b)) = (left, right) {
                let picked = if compare(Self::node_of(b), Self::node_of(a)) == Ordering::Less {
                    right = b.as_ref().next();
                    b
                } else {
                    left = a.as_ref().next();
                    a
                };
                L::link(Some(tail), Some(picked));
                tail = picked;
            }
            L::link(Some(tail), L::or_terminator(left.or(right)));
        }

        self.count += other.count;
        other.start = L::TERMINATED;
        other.count = 0;
        self.release_head();
        Ok(())
    }

    /// Sort the list. See [`sort_by`](Self::sort_by).
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Sort the list with a bottom-up merge sort over the links.
    ///
    /// The sort is stable and does not allocate.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.is_trivial() {
            return;
        }

        let start = self.start_ptr();
        let mut run = 1usize;

        unsafe {
            loop {
                let mut left = start.as_ref().next();
                let mut tail = start;
                let mut merges = 0usize;

                while let Some(run_start) = left {
                    merges += 1;

                    // Step `run` places along from left to find right.
                    let mut right = Some(run_start);
                    let mut left_size = 0usize;
                    for _ in 0..run {
                        left_size += 1;
                        right = right.and_then(|link| link.as_ref().next());
                        if right.is_none() {
                            break;
                        }
                    }
                    let mut right_size = run;

                    loop {
                        let from_left = match (left, right) {
                            (Some(a), Some(b)) if left_size > 0 && right_size > 0 => {
                                compare(Self::node_of(b), Self::node_of(a)) != Ordering::Less
                            }
                            (Some(_), _) if left_size > 0 => true,
                            (_, Some(_)) if right_size > 0 => false,
                            _ => break,
                        };

                        let picked = if from_left {
                            let Some(link) = left else { break };
                            left = link.as_ref().next();
                            left_size -= 1;
                            link
                        } else {
                            let Some(link) = right else { break };
                            right = link.as_ref().next();
                            right_size -= 1;
                            link
                        };

                        L::link(Some(tail), Some(picked));
                        tail = picked;
                    }

                    left = right;
                }

                L::link(Some(tail), Some(L::TERMINATOR));

                if merges <= 1 {
                    break;
                }
                run *= 2;
            }
        }

        self.release_head();
    }

    /// Remove consecutive equal nodes, keeping the first of each group.
    /// Returns the number of nodes removed.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|a, b| a == b)
    }

    /// Remove every node that `same` reports equal to the node kept before
    /// it. `same` is called as `same(current, kept)`.
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let Some(mut kept) = self.head() else {
            return 0;
        };
        let mut removed = 0;

        unsafe {
            while let Some(current) = kept.as_ref().next() {
                if same(Self::node_of(current), Self::node_of(kept)) {
                    L::unlink_after(kept);
                    (*current.as_ptr()).clear();
                    removed += 1;
                } else {
                    kept = current;
                }
            }
        }

        self.count -= removed;
        removed
    }

    /// Remove every node equal to `value`. Returns the number removed.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|node| node == value)
    }

    /// Remove every node matching `predicate`, keeping the order of the rest.
    /// Returns the number removed.
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut before = self.start_ptr();
        let mut removed = 0;

        unsafe {
            while let Some(current) = before.as_ref().next() {
                if predicate(Self::node_of(current)) {
                    L::unlink_after(before);
                    (*current.as_ptr()).clear();
                    removed += 1;
                } else {
                    before = current;
                }
            }
        }

        self.count -= removed;
        self.release_head();
        removed
    }

    /// Reverse the order of the list in place.
    pub fn reverse(&mut self) {
        if self.is_trivial() {
            return;
        }

        let start = self.start_ptr();
        let mut reversed: Option<NonNull<L>> = None;

        unsafe {
            let mut current = start.as_ref().next();
            while let Some(link) = current {
                current = link.as_ref().next();
                L::link(Some(link), L::or_terminator(reversed));
                reversed = Some(link);
            }
            L::link(Some(start), reversed);
        }

        self.release_head();
    }
}

impl<T, L, P> Push<T> for IntrusiveForwardList<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    #[inline]
    unsafe fn push(&mut self, node: NonNull<T>) -> Result<(), Error> {
        unsafe { self.push_front(node) }
    }
}

impl<T, L, P> Default for IntrusiveForwardList<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, L, P> IntoIterator for &'a IntrusiveForwardList<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, L, P> fmt::Debug for IntrusiveForwardList<T, L, P>
where
    T: Linked<L> + fmt::Debug,
    L: ListLink,
    P: ErrorPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

unsafe impl<T: Linked<L> + Send, L: ListLink, P> Send for IntrusiveForwardList<T, L, P> {}
