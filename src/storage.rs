use crate::cursor::{Cursor, IntoCursor, unpositioned};
use std::rc::Rc;

/// 持有数据的叶子游标。
///
/// 数据存放在引用计数的共享存储中，克隆游标（以及克隆[`crate::Pipe`]）只增加引用计数，不会深拷贝数据。
/// 数据归游标自身所有，因此当前元素以克隆值的形式返回。
#[derive(Debug)]
pub struct OwnedCursor<T> {
    store: Rc<[T]>,
    pos: usize,
    started: bool,
}

impl<T> OwnedCursor<T> {
    /// 复制一份私有数据，源数据不受影响。
    pub fn copied(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::new(Rc::from(items))
    }

    /// 移入数据。
    pub fn moved(items: Vec<T>) -> Self {
        Self::new(Rc::from(items))
    }

    fn new(store: Rc<[T]>) -> Self {
        Self { store, pos: 0, started: false }
    }
}

impl<T> Clone for OwnedCursor<T> {
    fn clone(&self) -> Self {
        Self { store: Rc::clone(&self.store), pos: self.pos, started: self.started }
    }
}

impl<T: Clone> Cursor for OwnedCursor<T> {
    type Element = T;
    type View = T;

    fn advance(&mut self) -> bool {
        if self.pos >= self.store.len() {
            return false;
        }
        if self.started {
            self.pos += 1;
        }
        self.started = true;
        self.pos < self.store.len()
    }

    fn current(&self) -> T {
        match self.store.get(self.pos) {
            Some(item) if self.started => item.clone(),
            _ => unpositioned(),
        }
    }
}

/// 持有字符串的叶子游标，逐个产出字符。
#[derive(Debug, Clone)]
pub struct OwnedStrCursor {
    text: Rc<str>,
    /// 当前字符的字节偏移
    offset: usize,
    started: bool,
}

impl OwnedStrCursor {
    pub fn new(text: String) -> Self {
        Self { text: Rc::from(text), offset: 0, started: false }
    }
}

impl Cursor for OwnedStrCursor {
    type Element = char;
    type View = char;

    fn advance(&mut self) -> bool {
        if self.offset >= self.text.len() {
            return false;
        }
        if self.started {
            self.offset += self.text[self.offset..].chars().next().map_or(1, char::len_utf8);
        }
        self.started = true;
        self.offset < self.text.len()
    }

    fn current(&self) -> char {
        match self.text.get(self.offset..).and_then(|rest| rest.chars().next()) {
            Some(c) if self.started => c,
            _ => unpositioned(),
        }
    }
}

impl<T: Clone> IntoCursor for Vec<T> {
    type Cursor = OwnedCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        OwnedCursor::moved(self)
    }
}

impl<T: Clone, const N: usize> IntoCursor for [T; N] {
    type Cursor = OwnedCursor<T>;

    fn into_cursor(self) -> Self::Cursor {
        OwnedCursor::moved(Vec::from(self))
    }
}

impl IntoCursor for String {
    type Cursor = OwnedStrCursor;

    fn into_cursor(self) -> Self::Cursor {
        OwnedStrCursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorIter;

    #[test]
    fn test_copied_is_a_snapshot() {
        let mut items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 0];
        let mut cursor = OwnedCursor::copied(&items);
        assert!(cursor.advance());
        assert_eq!(cursor.current(), items[0]);
        items[0] += 1;
        assert_ne!(cursor.current(), items[0]);
    }

    #[test]
    fn test_moved() {
        let mut cursor = OwnedCursor::moved(vec![String::from("x"), String::from("y")]);
        assert!(cursor.advance());
        assert_eq!(cursor.current(), "x");
        assert!(cursor.advance());
        assert_eq!(cursor.current(), "y");
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_empty_store() {
        let mut cursor = OwnedCursor::<i32>::moved(vec![]);
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_clone_shares_store() {
        let mut cursor = OwnedCursor::moved(vec![1, 2]);
        let copy = cursor.clone();
        assert!(Rc::ptr_eq(&cursor.store, &copy.store));
        assert!(cursor.advance());
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(CursorIter::new(copy).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "preceding successful `advance`")]
    fn test_read_after_exhausted() {
        let mut cursor = OwnedCursor::moved(vec![1]);
        assert!(cursor.advance());
        assert!(!cursor.advance());
        cursor.current();
    }

    #[test]
    fn test_owned_str_cursor() {
        let cursor = OwnedStrCursor::new(String::from("你好ab"));
        assert_eq!(CursorIter::new(cursor).collect::<Vec<_>>(), vec!['你', '好', 'a', 'b']);
        assert!(!OwnedStrCursor::new(String::new()).advance());
    }

    #[test]
    fn test_into_cursor_owned() {
        assert_eq!(CursorIter::new(vec![1, 2].into_cursor()).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(CursorIter::new([3, 4].into_cursor()).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(CursorIter::new(String::from("ok").into_cursor()).collect::<String>(), "ok");
    }
}
