use crate::cursor::{Cursor, drain, element};
use log::trace;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// 去重：按键保留首次出现的元素，后续键重复的元素全部丢弃。
pub struct Distinct<C, F, K> {
    inner: C,
    key: F,
    seen: FxHashSet<K>,
}

impl<C, F, K> Distinct<C, F, K>
where
    C: Cursor,
    F: Fn(&C::Element) -> K,
{
    pub(crate) fn new(inner: C, key: F) -> Self {
        Self { inner, key, seen: FxHashSet::default() }
    }
}

impl<C: Clone, F: Clone, K: Clone> Clone for Distinct<C, F, K> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), key: self.key.clone(), seen: self.seen.clone() }
    }
}

impl<C, F, K> Cursor for Distinct<C, F, K>
where
    C: Cursor,
    F: Fn(&C::Element) -> K + Clone,
    K: Hash + Eq + Clone,
{
    type Element = C::Element;
    type View = C::View;

    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            let key = (self.key)(element::<C>(&self.inner.current()));
            if self.seen.insert(key) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}

/// 以另一个序列为参照的集合运算
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SetOp {
    /// 交集：只保留在参照序列中出现过的元素
    Intersect,
    /// 差集：只保留未在参照序列中出现过的元素
    Except,
}

/// 集合过滤：首次推进时取尽参照序列建立查找表，之后按集合运算过滤当前序列，结果不含重复元素。
pub struct SetFilter<C: Cursor, D> {
    inner: C,
    other: D,
    op: SetOp,
    lookup: Option<FxHashSet<C::Element>>,
    seen: FxHashSet<C::Element>,
}

impl<C: Cursor, D> SetFilter<C, D> {
    pub(crate) fn new(inner: C, other: D, op: SetOp) -> Self {
        Self { inner, other, op, lookup: None, seen: FxHashSet::default() }
    }
}

impl<C, D> Clone for SetFilter<C, D>
where
    C: Cursor,
    C::Element: Clone,
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            other: self.other.clone(),
            op: self.op,
            lookup: self.lookup.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<C, D, E> Cursor for SetFilter<C, D>
where
    C: Cursor<Element = E>,
    D: Cursor<Element = E>,
    E: Hash + Eq + Clone,
{
    type Element = E;
    type View = C::View;

    fn advance(&mut self) -> bool {
        let lookup = self.lookup.get_or_insert_with(|| {
            let lookup: FxHashSet<E> = drain(&mut self.other).map(|view| element::<D>(&view).clone()).collect();
            trace!("{:?} lookup built with {} distinct elements", self.op, lookup.len());
            lookup
        });
        let keep = self.op == SetOp::Intersect;
        while self.inner.advance() {
            let view = self.inner.current();
            let item = element::<C>(&view);
            if lookup.contains(item) == keep && !self.seen.contains(item) {
                self.seen.insert(item.clone());
                return true;
            }
        }
        false
    }

    fn current(&self) -> C::View {
        self.inner.current()
    }
}
