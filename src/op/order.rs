use crate::config::Order;
use crate::cursor::{Cursor, drain, element, unpositioned};
use crate::storage::OwnedCursor;
use itertools::Itertools;
use log::trace;
use std::cmp::Reverse;

/// 排序：首次推进时取尽内层游标并按键稳定排序，之后依次产出。
pub struct Sorted<C: Cursor, F> {
    inner: C,
    key: F,
    order: Order,
    buffer: Option<OwnedCursor<C::View>>,
}

impl<C: Cursor, F> Sorted<C, F> {
    pub(crate) fn new(inner: C, key: F, order: Order) -> Self {
        Self { inner, key, order, buffer: None }
    }
}

impl<C: Cursor, F: Clone> Clone for Sorted<C, F> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), key: self.key.clone(), order: self.order, buffer: self.buffer.clone() }
    }
}

impl<C, F, K> Cursor for Sorted<C, F>
where
    C: Cursor,
    C::View: Clone,
    F: Fn(&C::Element) -> K + Clone,
    K: Ord,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        if self.buffer.is_none() {
            let key = &self.key;
            let views = if self.order.is_desc() {
                drain(&mut self.inner).sorted_by_key(|view| Reverse(key(element::<C>(view)))).collect_vec()
            } else {
                drain(&mut self.inner).sorted_by_key(|view| key(element::<C>(view))).collect_vec()
            };
            trace!("sorted {} buffered elements in {:?} order", views.len(), self.order);
            self.buffer = Some(OwnedCursor::moved(views));
        }
        self.buffer.as_mut().is_some_and(Cursor::advance)
    }

    fn current(&self) -> C::View {
        match &self.buffer {
            Some(buffer) => buffer.current(),
            None => unpositioned(),
        }
    }
}

/// 反转：首次推进时取尽内层游标，之后逆序产出。
pub struct Reversed<C: Cursor> {
    inner: C,
    buffer: Option<OwnedCursor<C::View>>,
}

impl<C: Cursor> Reversed<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner, buffer: None }
    }
}

impl<C: Cursor> Clone for Reversed<C> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), buffer: self.buffer.clone() }
    }
}

impl<C> Cursor for Reversed<C>
where
    C: Cursor,
    C::View: Clone,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        if self.buffer.is_none() {
            let mut views = drain(&mut self.inner).collect_vec();
            views.reverse();
            trace!("reversed {} buffered elements", views.len());
            self.buffer = Some(OwnedCursor::moved(views));
        }
        self.buffer.as_mut().is_some_and(Cursor::advance)
    }

    fn current(&self) -> C::View {
        match &self.buffer {
            Some(buffer) => buffer.current(),
            None => unpositioned(),
        }
    }
}
