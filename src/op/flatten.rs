use crate::cursor::{Cursor, IntoCursor, unpositioned};

/// 展开：对每个外层元素求出一个内层序列，依次产出内层序列的全部元素。
///
/// 内层游标的所有权方式由转换函数的返回类型在编译期决定，见[`IntoCursor`]：
/// 返回借用（例如字段的引用）时内层游标直接借用该存储；返回临时值时内层游标接管该值的所有权。
pub struct SelectMany<C, F, S: IntoCursor> {
    outer: C,
    transform: F,
    inner: Option<S::Cursor>,
}

impl<C, F, S> SelectMany<C, F, S>
where
    C: Cursor,
    F: Fn(C::View) -> S,
    S: IntoCursor,
{
    pub(crate) fn new(outer: C, transform: F) -> Self {
        Self { outer, transform, inner: None }
    }
}

impl<C: Clone, F: Clone, S: IntoCursor> Clone for SelectMany<C, F, S> {
    fn clone(&self) -> Self {
        Self { outer: self.outer.clone(), transform: self.transform.clone(), inner: self.inner.clone() }
    }
}

impl<C, F, S> Cursor for SelectMany<C, F, S>
where
    C: Cursor,
    F: Fn(C::View) -> S + Clone,
    S: IntoCursor,
{
    type Element = <S::Cursor as Cursor>::Element;
    type View = <S::Cursor as Cursor>::View;

    fn advance(&mut self) -> bool {
        if let Some(inner) = self.inner.as_mut() {
            if inner.advance() {
                return true;
            }
        }
        // 空的内层序列直接跳过
        while self.outer.advance() {
            let mut inner = (self.transform)(self.outer.current()).into_cursor();
            if inner.advance() {
                self.inner = Some(inner);
                return true;
            }
        }
        self.inner = None;
        false
    }

    fn current(&self) -> Self::View {
        match &self.inner {
            Some(inner) => inner.current(),
            None => unpositioned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{CursorIter, SliceCursor};

    struct Person {
        name: String,
        tags: Vec<u8>,
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "fabio".to_owned(), tags: vec![1, 2] },
            Person { name: "ivan".to_owned(), tags: vec![] },
            Person { name: "kidding".to_owned(), tags: vec![3] },
        ]
    }

    #[test]
    fn test_select_many_borrowed() {
        let people = people();
        let cursor = SelectMany::new(SliceCursor::new(&people), |p| &p.name);
        assert_eq!(CursorIter::new(cursor).collect::<String>(), "fabioivankidding");
    }

    #[test]
    fn test_select_many_owned() {
        let people = people();
        let cursor = SelectMany::new(SliceCursor::new(&people), |p| p.name.to_uppercase());
        assert_eq!(CursorIter::new(cursor).collect::<String>(), "FABIOIVANKIDDING");
    }

    #[test]
    fn test_select_many_skips_empty_inner() {
        let people = people();
        let cursor = SelectMany::new(SliceCursor::new(&people), |p| &p.tags);
        assert_eq!(CursorIter::new(cursor).copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_many_empty_outer() {
        let people: Vec<Person> = vec![];
        let mut cursor = SelectMany::new(SliceCursor::new(&people), |p| &p.name);
        assert!(!cursor.advance());
        assert!(cursor.inner.is_none());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_select_many_exhausted_drops_inner() {
        let people = people();
        let mut cursor = SelectMany::new(SliceCursor::new(&people), |p| p.tags.clone());
        while cursor.advance() {}
        assert!(cursor.inner.is_none());
    }
}
