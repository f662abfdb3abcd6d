use std::borrow::Borrow;

/// 游标：拉取式的外部迭代原语。
///
/// 协议为“先推进、后读取”：新建的游标没有当前元素，需要先调用一次[`Cursor::advance`]，
/// 返回`true`后才能通过[`Cursor::current`]读取当前元素。推进返回`false`后游标即耗尽，后续推进持续返回`false`。
///
/// 游标是值类型，克隆出的副本与原游标互不影响。
pub trait Cursor: Clone {
    /// 元素类型，去除引用后的值类型。
    type Element;
    /// 当前元素的视图，可能是指向上游存储的引用，也可能是临时计算出的值。
    type View: Borrow<Self::Element>;

    /// 移动到下一个元素，返回移动后是否存在当前元素。
    fn advance(&mut self) -> bool;

    /// 读取当前元素。
    ///
    /// 必须在[`Cursor::advance`]返回`true`之后调用，否则panic。
    fn current(&self) -> Self::View;
}

/// 从视图中借出元素。
#[inline]
pub(crate) fn element<C: Cursor>(view: &C::View) -> &C::Element {
    <C::View as Borrow<C::Element>>::borrow(view)
}

#[cold]
#[track_caller]
pub(crate) fn unpositioned() -> ! {
    panic!("[Cursor] `current` called without a preceding successful `advance`")
}

/// 依次推进并取出游标中剩余的全部视图。
pub(crate) fn drain<C: Cursor>(cursor: &mut C) -> impl Iterator<Item = C::View> + '_ {
    std::iter::from_fn(move || if cursor.advance() { Some(cursor.current()) } else { None })
}

/// 借用外部切片的叶子游标，不延长数据的生命周期。
#[derive(Debug)]
pub struct SliceCursor<'a, T> {
    /// 尚未越过的部分，首元素即当前元素
    rest: &'a [T],
    started: bool,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { rest: items, started: false }
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        Self { rest: self.rest, started: self.started }
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Element = T;
    type View = &'a T;

    fn advance(&mut self) -> bool {
        if self.rest.is_empty() {
            return false;
        }
        // 首次推进只标记开始，不越过首元素
        if self.started {
            self.rest = &self.rest[1..];
        }
        self.started = true;
        !self.rest.is_empty()
    }

    fn current(&self) -> &'a T {
        let rest: &'a [T] = self.rest;
        match rest.first() {
            Some(item) if self.started => item,
            _ => unpositioned(),
        }
    }
}

/// 借用外部字符串的叶子游标，逐个产出字符。
#[derive(Debug, Clone, Copy)]
pub struct StrCursor<'a> {
    rest: &'a str,
    started: bool,
}

impl<'a> StrCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text, started: false }
    }
}

impl Cursor for StrCursor<'_> {
    type Element = char;
    type View = char;

    fn advance(&mut self) -> bool {
        if self.rest.is_empty() {
            return false;
        }
        if self.started {
            let mut chars = self.rest.chars();
            chars.next();
            self.rest = chars.as_str();
        }
        self.started = true;
        !self.rest.is_empty()
    }

    fn current(&self) -> char {
        match self.rest.chars().next() {
            Some(c) if self.started => c,
            _ => unpositioned(),
        }
    }
}

/// 可以转换为游标的序列。
///
/// 借用形式（`&Vec<T>`、`&[T]`、`&str`等）转换为借用游标；值形式（`Vec<T>`、`String`等，见[`crate::storage`]）
/// 转换为持有数据的游标。[`crate::Pipe::select_many`]据此在编译期决定内层序列的所有权方式。
pub trait IntoCursor {
    type Cursor: Cursor;

    fn into_cursor(self) -> Self::Cursor;
}

impl<'a, T> IntoCursor for &'a [T] {
    type Cursor = SliceCursor<'a, T>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, T> IntoCursor for &'a Vec<T> {
    type Cursor = SliceCursor<'a, T>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }
}

impl<'a, T, const N: usize> IntoCursor for &'a [T; N] {
    type Cursor = SliceCursor<'a, T>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }
}

impl<'a> IntoCursor for &'a str {
    type Cursor = StrCursor<'a>;

    fn into_cursor(self) -> Self::Cursor {
        StrCursor::new(self)
    }
}

impl<'a> IntoCursor for &'a String {
    type Cursor = StrCursor<'a>;

    fn into_cursor(self) -> Self::Cursor {
        StrCursor::new(self.as_str())
    }
}

/// 将游标桥接为标准库迭代器，产出视图。
#[derive(Debug, Clone)]
pub struct CursorIter<C> {
    cursor: C,
}

impl<C: Cursor> CursorIter<C> {
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C: Cursor> Iterator for CursorIter<C> {
    type Item = C::View;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.advance() { Some(self.cursor.current()) } else { None }
    }
}
