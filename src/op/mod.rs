pub mod flatten;
pub mod join;
pub mod order;
pub mod set;
pub mod slice;

use crate::cursor::{Cursor, element};
use std::marker::PhantomData;

/// 过滤：只保留满足谓词的元素。
#[derive(Debug, Clone)]
pub struct Where<C, P> {
    inner: C,
    predicate: P,
}

impl<C, P> Where<C, P> {
    pub(crate) fn new(inner: C, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

impl<C, P> Cursor for Where<C, P>
where
    C: Cursor,
    P: Fn(&C::Element) -> bool + Clone,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            if (self.predicate)(element::<C>(&self.inner.current())) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

/// 映射：对每个元素应用转换，结果按值返回。
#[derive(Debug, Clone)]
pub struct Select<C, F> {
    inner: C,
    transform: F,
}

impl<C, F> Select<C, F> {
    pub(crate) fn new(inner: C, transform: F) -> Self {
        Self { inner, transform }
    }
}

impl<C, F, U> Cursor for Select<C, F>
where
    C: Cursor,
    F: Fn(C::View) -> U + Clone,
{
    type Element = U;
    type View = U;

    fn advance(&mut self) -> bool {
        self.inner.advance()
    }

    fn current(&self) -> U {
        (self.transform)(self.inner.current())
    }
}

/// 连接：先取尽第一个游标，再切换到第二个游标，切换后不再回到第一个游标。
///
/// 两侧的所有权方式可以不同（例如借用的序列后接一个单值），因此视图统一为克隆出的元素。
/// 两侧视图类型相同时见[`Chain`]。
#[derive(Debug, Clone)]
pub struct Concat<C, D> {
    first: C,
    second: D,
    on_second: bool,
}

impl<C, D> Concat<C, D> {
    pub(crate) fn new(first: C, second: D) -> Self {
        Self { first, second, on_second: false }
    }
}

impl<C: Cursor, D: Cursor> Concat<C, D> {
    fn step(&mut self) -> bool {
        if !self.on_second {
            if self.first.advance() {
                return true;
            }
            self.on_second = true;
        }
        self.second.advance()
    }
}

impl<C, D> Cursor for Concat<C, D>
where
    C: Cursor,
    D: Cursor<Element = C::Element>,
    C::Element: Clone,
{
    type Element = C::Element;
    type View = C::Element;

    fn advance(&mut self) -> bool {
        self.step()
    }

    fn current(&self) -> C::Element {
        if self.on_second {
            element::<D>(&self.second.current()).clone()
        } else {
            element::<C>(&self.first.current()).clone()
        }
    }
}

/// 视图类型相同的连接：直接透传两侧的视图，借用的序列连接后仍指向原存储，元素无需支持克隆。
#[derive(Debug, Clone)]
pub struct Chain<C, D> {
    inner: Concat<C, D>,
}

impl<C, D> Chain<C, D> {
    pub(crate) fn new(first: C, second: D) -> Self {
        Self { inner: Concat::new(first, second) }
    }
}

impl<C, D> Cursor for Chain<C, D>
where
    C: Cursor,
    D: Cursor<Element = C::Element, View = C::View>,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        self.inner.step()
    }

    fn current(&self) -> C::View {
        if self.inner.on_second { self.inner.second.current() } else { self.inner.first.current() }
    }
}

/// 引用投影：元素本身即为指向外部存储的引用，物化时不再克隆。
///
/// 只适用于视图为长期引用的游标（借用外部存储的叶子游标，以及过滤、截取等不改变视图的适配器）。
#[derive(Debug, Clone)]
pub struct Refs<'a, C> {
    inner: C,
    marker: PhantomData<&'a ()>,
}

impl<C> Refs<'_, C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner, marker: PhantomData }
    }
}

impl<'a, C, E> Cursor for Refs<'a, C>
where
    C: Cursor<Element = E, View = &'a E>,
    E: 'a,
{
    type Element = &'a E;
    type View = &'a E;

    fn advance(&mut self) -> bool {
        self.inner.advance()
    }

    fn current(&self) -> &'a E {
        self.inner.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{CursorIter, SliceCursor};
    use crate::storage::OwnedCursor;
    use std::cell::Cell;

    fn collect<C: Cursor>(cursor: C) -> Vec<C::Element>
    where
        C::Element: Clone,
    {
        CursorIter::new(cursor).map(|view| element::<C>(&view).clone()).collect()
    }

    #[test]
    fn test_where() {
        let items = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let evens = Where::new(SliceCursor::new(&items), |x: &i32| x % 2 == 0);
        assert_eq!(collect(evens), vec![0, 2, 4, 6, 8, 10]);
        let none = Where::new(SliceCursor::new(&items), |x: &i32| *x > 100);
        assert_eq!(collect(none), Vec::<i32>::new());
    }

    #[test]
    fn test_where_keeps_alias() {
        let items = [String::from("a"), String::from("bb")];
        let mut cursor = Where::new(SliceCursor::new(&items), |s: &String| s.len() > 1);
        assert!(cursor.advance());
        assert!(std::ptr::eq(cursor.current(), &items[1]));
        assert!(!cursor.advance());
    }

    #[test]
    fn test_select() {
        let items = [1, 2, 3];
        let doubled = Select::new(SliceCursor::new(&items), |x: &i32| x * 2);
        assert_eq!(collect(doubled), vec![2, 4, 6]);
        let names = Select::new(OwnedCursor::moved(vec![1, 22]), |x: i32| x.to_string());
        assert_eq!(collect(names), vec!["1", "22"]);
    }

    #[test]
    fn test_concat() {
        let left = [1, 2];
        let right = [3];
        let cursor = Concat::new(SliceCursor::new(&left), OwnedCursor::copied(&right));
        assert_eq!(collect(cursor), vec![1, 2, 3]);
        let empty: [i32; 0] = [];
        let cursor = Concat::new(SliceCursor::new(&empty), SliceCursor::new(&left));
        assert_eq!(collect(cursor), vec![1, 2]);
        let cursor = Concat::new(SliceCursor::new(&left), SliceCursor::new(&empty));
        assert_eq!(collect(cursor), vec![1, 2]);
    }

    #[test]
    fn test_concat_latch() {
        let left = [1];
        let right = [2];
        let mut cursor = Concat::new(SliceCursor::new(&left), SliceCursor::new(&right));
        assert!(cursor.advance());
        assert_eq!(cursor.current(), 1);
        assert!(cursor.advance());
        assert_eq!(cursor.current(), 2);
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_chain_keeps_alias() {
        let left = [String::from("a")];
        let right = [String::from("b"), String::from("c")];
        let mut cursor = Chain::new(SliceCursor::new(&left), SliceCursor::new(&right));
        assert!(cursor.advance());
        assert!(std::ptr::eq(cursor.current(), &left[0]));
        assert!(cursor.advance());
        assert!(std::ptr::eq(cursor.current(), &right[0]));
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_chain_without_clone() {
        struct Token(u8);
        let left = [Token(1)];
        let right = [Token(2)];
        let cursor = Chain::new(SliceCursor::new(&left), SliceCursor::new(&right));
        assert_eq!(CursorIter::new(cursor).map(|t| t.0).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_refs_observe_mutation() {
        let cells = [Cell::new(1), Cell::new(2)];
        let refs = collect(Refs::new(SliceCursor::new(&cells)));
        let snapshot = collect(SliceCursor::new(&cells));
        cells[0].set(10);
        assert_eq!(refs[0].get(), 10);
        assert_eq!(snapshot[0].get(), 1);
    }
}
