use crate::cursor::{Cursor, element};

/// 截取：保留前N个元素，计数归零后永久耗尽，即使内层游标仍有剩余元素。
#[derive(Debug, Clone)]
pub struct Take<C> {
    inner: C,
    remaining: usize,
}

impl<C> Take<C> {
    pub(crate) fn new(inner: C, count: usize) -> Self {
        Self { inner, remaining: count }
    }
}

impl<C: Cursor> Cursor for Take<C> {
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.inner.advance()
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

/// 跳过：丢弃前N个元素，保留后续的其他元素。
#[derive(Debug, Clone)]
pub struct Skip<C> {
    inner: C,
    remaining: usize,
}

impl<C> Skip<C> {
    pub(crate) fn new(inner: C, count: usize) -> Self {
        Self { inner, remaining: count }
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        while self.remaining > 0 {
            self.remaining -= 1;
            if !self.inner.advance() {
                self.remaining = 0;
                return false;
            }
        }
        self.inner.advance()
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

/// 持续保留满足谓词的元素，直到谓词首次不满足。
#[derive(Debug, Clone)]
pub struct TakeWhile<C, P> {
    inner: C,
    predicate: P,
    done: bool,
}

impl<C, P> TakeWhile<C, P> {
    pub(crate) fn new(inner: C, predicate: P) -> Self {
        Self { inner, predicate, done: false }
    }
}

impl<C, P> Cursor for TakeWhile<C, P>
where
    C: Cursor,
    P: Fn(&C::Element) -> bool + Clone,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        if self.inner.advance() && (self.predicate)(element::<C>(&self.inner.current())) {
            return true;
        }
        self.done = true;
        false
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

/// 持续丢弃满足谓词的元素，直到谓词首次不满足，之后的元素全部保留。
#[derive(Debug, Clone)]
pub struct SkipWhile<C, P> {
    inner: C,
    predicate: P,
    skipping: bool,
}

impl<C, P> SkipWhile<C, P> {
    pub(crate) fn new(inner: C, predicate: P) -> Self {
        Self { inner, predicate, skipping: true }
    }
}

impl<C, P> Cursor for SkipWhile<C, P>
where
    C: Cursor,
    P: Fn(&C::Element) -> bool + Clone,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        if !self.skipping {
            return self.inner.advance();
        }
        self.skipping = false;
        while self.inner.advance() {
            if !(self.predicate)(element::<C>(&self.inner.current())) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{CursorIter, SliceCursor};

    const ITEMS: [i32; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

    fn collect<C: Cursor<Element = i32>>(cursor: C) -> Vec<i32> {
        CursorIter::new(cursor).map(|view| *element::<C>(&view)).collect()
    }

    #[test]
    fn test_take() {
        assert_eq!(collect(Take::new(SliceCursor::new(&ITEMS), 3)), vec![0, 1, 2]);
        assert_eq!(collect(Take::new(SliceCursor::new(&ITEMS), 0)), Vec::<i32>::new());
        assert_eq!(collect(Take::new(SliceCursor::new(&ITEMS), 100)), ITEMS.to_vec());
    }

    #[test]
    fn test_take_latch() {
        let mut cursor = Take::new(SliceCursor::new(&ITEMS), 1);
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(cursor.remaining, 0);
    }

    #[test]
    fn test_skip() {
        assert_eq!(collect(Skip::new(SliceCursor::new(&ITEMS), 8)), vec![8, 9, 10]);
        assert_eq!(collect(Skip::new(SliceCursor::new(&ITEMS), 0)), ITEMS.to_vec());
        assert_eq!(collect(Skip::new(SliceCursor::new(&ITEMS), 11)), Vec::<i32>::new());
        assert_eq!(collect(Skip::new(SliceCursor::new(&ITEMS), 20)), Vec::<i32>::new());
    }

    #[test]
    fn test_take_while() {
        let cursor = TakeWhile::new(SliceCursor::new(&ITEMS), |x: &i32| *x < 4);
        assert_eq!(collect(cursor), vec![0, 1, 2, 3]);
        let cursor = TakeWhile::new(SliceCursor::new(&ITEMS), |x: &i32| *x > 4);
        assert_eq!(collect(cursor), Vec::<i32>::new());
    }

    #[test]
    fn test_take_while_stops_for_good() {
        let items = [1, 5, 1];
        let mut cursor = TakeWhile::new(SliceCursor::new(&items), |x: &i32| *x < 3);
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_skip_while() {
        let items = [1, 2, 5, 1, 2];
        let cursor = SkipWhile::new(SliceCursor::new(&items), |x: &i32| *x < 3);
        assert_eq!(collect(cursor), vec![5, 1, 2]);
        let cursor = SkipWhile::new(SliceCursor::new(&items), |_: &i32| true);
        assert_eq!(collect(cursor), Vec::<i32>::new());
    }
}
