use crate::Integer;
use crate::cursor::{Cursor, IntoCursor, unpositioned};
use crate::pipe::Pipe;
use crate::storage::OwnedCursor;

/// 以任意可转换为游标的序列作为输入。
///
/// 借用形式（`&Vec<T>`、`&[T; N]`、`&str`等）不复制数据，产出指向源数据的引用，源数据必须比管道活得更久；
/// 值形式（`Vec<T>`、`String`等）由管道接管数据。
pub fn from<S: IntoCursor>(source: S) -> Pipe<S::Cursor> {
    Pipe::new(source.into_cursor())
}

/// 复制一份私有数据作为输入，之后对源数据的修改不影响管道。
pub fn from_copy<T: Clone>(items: &[T]) -> Pipe<OwnedCursor<T>> {
    Pipe::new(OwnedCursor::copied(items))
}

/// 移走数据作为输入，调用后源容器为空。
pub fn from_move<T: Clone>(items: &mut Vec<T>) -> Pipe<OwnedCursor<T>> {
    Pipe::new(OwnedCursor::moved(std::mem::take(items)))
}

/// 只有一个元素的输入。
pub fn singleton<T: Clone>(value: T) -> Pipe<OwnedCursor<T>> {
    Pipe::new(OwnedCursor::moved(vec![value]))
}

/// 没有元素的输入。
pub fn empty<T: Clone>() -> Pipe<OwnedCursor<T>> {
    Pipe::new(OwnedCursor::moved(Vec::new()))
}

/// 从`start`开始的`count`个连续整数，超出整数最大值的部分被截断。
pub fn range(start: Integer, count: usize) -> Pipe<RangeCursor> {
    Pipe::new(RangeCursor::new(start, count))
}

/// 将`value`重复`count`次。
pub fn repeat<T: Clone>(value: T, count: usize) -> Pipe<RepeatCursor<T>> {
    Pipe::new(RepeatCursor { value, remaining: count, positioned: false })
}

impl<T: Clone> FromIterator<T> for Pipe<OwnedCursor<T>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Pipe::new(OwnedCursor::moved(iter.into_iter().collect()))
    }
}

/// 连续整数的游标，按需计算，不占用存储。
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RangeCursor {
    start: Integer,
    count: usize,
    /// 已越过的元素个数，当前元素为`start + pos - 1`
    pos: usize,
}

impl RangeCursor {
    fn new(start: Integer, count: usize) -> Self {
        let count = match usize::try_from(Integer::MAX.abs_diff(start)) {
            Ok(room) => count.min(room.saturating_add(1)),
            Err(_) => count,
        };
        Self { start, count, pos: 0 }
    }
}

impl Cursor for RangeCursor {
    type Element = Integer;
    type View = Integer;

    fn advance(&mut self) -> bool {
        if self.pos >= self.count {
            return false;
        }
        self.pos += 1;
        true
    }

    fn current(&self) -> Integer {
        if self.pos == 0 || self.pos > self.count {
            unpositioned();
        }
        self.start.wrapping_add((self.pos - 1) as Integer)
    }
}

/// 重复同一个值的游标。
#[derive(Debug, Clone)]
pub struct RepeatCursor<T> {
    value: T,
    remaining: usize,
    positioned: bool,
}

impl<T: Clone> Cursor for RepeatCursor<T> {
    type Element = T;
    type View = T;

    fn advance(&mut self) -> bool {
        self.positioned = self.remaining > 0;
        if self.positioned {
            self.remaining -= 1;
        }
        self.positioned
    }

    fn current(&self) -> T {
        if !self.positioned {
            unpositioned();
        }
        self.value.clone()
    }
}
