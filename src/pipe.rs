use crate::config::Order;
use crate::cursor::{Cursor, CursorIter, IntoCursor, element};
use crate::err::{LinqErr, LinqRes};
use crate::op::flatten::SelectMany;
use crate::op::join::Join;
use crate::op::order::{Reversed, Sorted};
use crate::op::set::{Distinct, SetFilter, SetOp};
use crate::op::slice::{Skip, SkipWhile, Take, TakeWhile};
use crate::op::{Chain, Concat, Refs, Select, Where};
use crate::storage::OwnedCursor;
use itertools::Itertools;
use std::hash::Hash;

/// 以元素本身作为去重键
type Identity<E> = fn(&E) -> E;

/// 查询管道。
///
/// 管道只是对游标的一层包装，是值类型：组合操作和终结操作都以`&self`调用，内部克隆一份游标后使用，
/// 原管道保持不变，可以被多次组合和求值，每次求值都从头开始。
///
/// 除排序、反转、连接和集合运算需要在首次推进时缓存一侧的数据外，所有操作都是惰性的，按需逐个拉取元素。
#[derive(Debug, Clone)]
pub struct Pipe<C> {
    pub(crate) cursor: C,
}

impl<C: Cursor> Pipe<C> {
    /// 包装任意游标，例如自定义的叶子游标。
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }

    /// 取出一份游标的副本。
    pub fn cursor(&self) -> C {
        self.cursor.clone()
    }

    /// 标准库迭代器形式的只读遍历，产出视图。
    pub fn iter(&self) -> CursorIter<C> {
        CursorIter::new(self.cursor.clone())
    }
}

/// 组合操作
impl<C: Cursor> Pipe<C> {
    /// 过滤，只保留满足谓词的元素。
    pub fn where_by<P>(&self, predicate: P) -> Pipe<Where<C, P>>
    where
        P: Fn(&C::Element) -> bool + Clone,
    {
        Pipe::new(Where::new(self.cursor.clone(), predicate))
    }

    /// 映射，转换函数按值接收视图。
    pub fn select<F, U>(&self, transform: F) -> Pipe<Select<C, F>>
    where
        F: Fn(C::View) -> U + Clone,
    {
        Pipe::new(Select::new(self.cursor.clone(), transform))
    }

    /// 展开，转换函数返回借用时内层元素为引用，返回值时内层序列归管道所有。
    pub fn select_many<F, S>(&self, transform: F) -> Pipe<SelectMany<C, F, S>>
    where
        F: Fn(C::View) -> S + Clone,
        S: IntoCursor,
    {
        Pipe::new(SelectMany::new(self.cursor.clone(), transform))
    }

    /// 保留前`count`个元素。
    ///
    /// 个数为无符号数，为0时结果为空；从有符号整数换算时需先把负数截断为0，直接`as usize`会得到一个极大的个数。
    pub fn take(&self, count: usize) -> Pipe<Take<C>> {
        Pipe::new(Take::new(self.cursor.clone(), count))
    }

    pub fn skip(&self, count: usize) -> Pipe<Skip<C>> {
        Pipe::new(Skip::new(self.cursor.clone(), count))
    }

    pub fn take_while<P>(&self, predicate: P) -> Pipe<TakeWhile<C, P>>
    where
        P: Fn(&C::Element) -> bool + Clone,
    {
        Pipe::new(TakeWhile::new(self.cursor.clone(), predicate))
    }

    pub fn skip_while<P>(&self, predicate: P) -> Pipe<SkipWhile<C, P>>
    where
        P: Fn(&C::Element) -> bool + Clone,
    {
        Pipe::new(SkipWhile::new(self.cursor.clone(), predicate))
    }

    /// 连接另一个元素类型相同的管道，两侧的所有权方式可以不同。
    pub fn concat<D>(&self, other: &Pipe<D>) -> Pipe<Concat<C, D>>
    where
        D: Cursor<Element = C::Element>,
        C::Element: Clone,
    {
        Pipe::new(Concat::new(self.cursor.clone(), other.cursor.clone()))
    }

    /// 连接另一个视图类型相同的管道，视图原样透传。
    ///
    /// 两侧都借用时结果仍指向源数据，可以继续[`Pipe::refs`]，元素也无需支持克隆。
    pub fn chain<D>(&self, other: &Pipe<D>) -> Pipe<Chain<C, D>>
    where
        D: Cursor<Element = C::Element, View = C::View>,
    {
        Pipe::new(Chain::new(self.cursor.clone(), other.cursor.clone()))
    }

    /// 在末尾追加一个值。
    pub fn concat_value(&self, value: C::Element) -> Pipe<Concat<C, OwnedCursor<C::Element>>>
    where
        C::Element: Clone,
    {
        Pipe::new(Concat::new(self.cursor.clone(), OwnedCursor::moved(vec![value])))
    }

    /// 内连接，结果按左侧顺序产出，同一左侧元素的多个匹配按右侧原有顺序产出。
    pub fn join<R, KL, KR, F, K, U>(
        &self,
        other: &Pipe<R>,
        left_key: KL,
        right_key: KR,
        combiner: F,
    ) -> Pipe<Join<C, R, KL, KR, F, K>>
    where
        R: Cursor,
        R::View: Clone,
        KL: Fn(&C::Element) -> K + Clone,
        KR: Fn(&R::Element) -> K + Clone,
        F: Fn(&C::Element, &R::Element) -> U + Clone,
        K: Ord + Clone,
    {
        Pipe::new(Join::new(self.cursor.clone(), other.cursor.clone(), left_key, right_key, combiner))
    }

    /// 引用投影，物化结果中保留指向源数据的引用。
    ///
    /// 只适用于视图为`&'a Element`的管道，即借用外部存储的输入（[`crate::from`]传入引用）及其上不改变视图的操作
    /// （过滤、截取、[`Pipe::chain`]、排序等）。持有数据的输入（[`crate::from_copy`]、[`crate::from_move`]、
    /// [`crate::singleton`]）以及映射、[`Pipe::concat`]的结果产出的是克隆值，调用`refs`无法通过编译。
    pub fn refs<'a, E>(&self) -> Pipe<Refs<'a, C>>
    where
        C: Cursor<Element = E, View = &'a E>,
        E: 'a,
    {
        Pipe::new(Refs::new(self.cursor.clone()))
    }

    /// 按键稳定排序。
    pub fn order_by<F, K>(&self, key: F, order: Order) -> Pipe<Sorted<C, F>>
    where
        C::View: Clone,
        F: Fn(&C::Element) -> K + Clone,
        K: Ord,
    {
        Pipe::new(Sorted::new(self.cursor.clone(), key, order))
    }

    pub fn reverse(&self) -> Pipe<Reversed<C>>
    where
        C::View: Clone,
    {
        Pipe::new(Reversed::new(self.cursor.clone()))
    }

    /// 去重，保留首次出现的元素。
    pub fn distinct(&self) -> Pipe<Distinct<C, Identity<C::Element>, C::Element>>
    where
        C::Element: Hash + Eq + Clone,
    {
        Pipe::new(Distinct::new(self.cursor.clone(), Clone::clone as Identity<C::Element>))
    }

    /// 按键去重，保留每个键首次出现的元素。
    pub fn distinct_by<F, K>(&self, key: F) -> Pipe<Distinct<C, F, K>>
    where
        F: Fn(&C::Element) -> K + Clone,
        K: Hash + Eq + Clone,
    {
        Pipe::new(Distinct::new(self.cursor.clone(), key))
    }

    /// 并集，即去重后的连接。
    pub fn union<D>(&self, other: &Pipe<D>) -> Pipe<Distinct<Concat<C, D>, Identity<C::Element>, C::Element>>
    where
        D: Cursor<Element = C::Element>,
        C::Element: Hash + Eq + Clone,
    {
        let concat = Concat::new(self.cursor.clone(), other.cursor.clone());
        Pipe::new(Distinct::new(concat, Clone::clone as Identity<C::Element>))
    }

    /// 交集，保留在另一个管道中出现过的元素，结果不含重复元素。
    pub fn intersect<D>(&self, other: &Pipe<D>) -> Pipe<SetFilter<C, D>>
    where
        D: Cursor<Element = C::Element>,
        C::Element: Hash + Eq + Clone,
    {
        Pipe::new(SetFilter::new(self.cursor.clone(), other.cursor.clone(), SetOp::Intersect))
    }

    /// 差集，保留未在另一个管道中出现过的元素，结果不含重复元素。
    pub fn except<D>(&self, other: &Pipe<D>) -> Pipe<SetFilter<C, D>>
    where
        D: Cursor<Element = C::Element>,
        C::Element: Hash + Eq + Clone,
    {
        Pipe::new(SetFilter::new(self.cursor.clone(), other.cursor.clone(), SetOp::Except))
    }
}

/// 终结操作，每次都从头遍历一份游标副本
impl<C: Cursor> Pipe<C> {
    /// 从左到右折叠。
    pub fn aggregate<A, F>(&self, seed: A, mut combiner: F) -> A
    where
        F: FnMut(A, &C::Element) -> A,
    {
        self.iter().fold(seed, |acc, view| combiner(acc, element::<C>(&view)))
    }

    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&C::Element) -> bool,
    {
        self.iter().any(|view| predicate(element::<C>(&view)))
    }

    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&C::Element) -> bool,
    {
        self.iter().all(|view| predicate(element::<C>(&view)))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn contains(&self, value: &C::Element) -> bool
    where
        C::Element: PartialEq,
    {
        self.any(|item| item == value)
    }

    /// 逐个比较两个管道的元素，长度不同视为不相等。
    pub fn sequence_equal<D>(&self, other: &Pipe<D>) -> bool
    where
        D: Cursor,
        C::Element: PartialEq<D::Element>,
    {
        let (mut left, mut right) = (self.cursor.clone(), other.cursor.clone());
        loop {
            match (left.advance(), right.advance()) {
                (true, true) => {
                    if element::<C>(&left.current()) != element::<D>(&right.current()) {
                        return false;
                    }
                }
                (false, false) => return true,
                _ => return false,
            }
        }
    }

    /// 物化为向量。
    pub fn to_vec(&self) -> Vec<C::Element>
    where
        C::Element: Clone,
    {
        self.iter().map(|view| element::<C>(&view).clone()).collect_vec()
    }

    pub fn first(&self) -> LinqRes<C::Element>
    where
        C::Element: Clone,
    {
        let mut cursor = self.cursor.clone();
        if cursor.advance() {
            Ok(element::<C>(&cursor.current()).clone())
        } else {
            Err(LinqErr::EmptySequence { op: "first" })
        }
    }

    pub fn last(&self) -> LinqRes<C::Element>
    where
        C::Element: Clone,
    {
        match self.iter().last() {
            Some(view) => Ok(element::<C>(&view).clone()),
            None => Err(LinqErr::EmptySequence { op: "last" }),
        }
    }

    pub fn element_at(&self, index: usize) -> LinqRes<C::Element>
    where
        C::Element: Clone,
    {
        match self.iter().nth(index) {
            Some(view) => Ok(element::<C>(&view).clone()),
            None => Err(LinqErr::IndexOutOfRange { op: "element_at", index, len: self.count() }),
        }
    }

    /// 取唯一的元素，序列为空或元素多于一个时失败。
    pub fn single(&self) -> LinqRes<C::Element>
    where
        C::Element: Clone,
    {
        match self.iter().at_most_one() {
            Ok(Some(view)) => Ok(element::<C>(&view).clone()),
            Ok(None) => Err(LinqErr::EmptySequence { op: "single" }),
            Err(_) => Err(LinqErr::MoreThanOne { op: "single" }),
        }
    }

    /// 最小的元素，有多个时取第一个。
    pub fn min(&self) -> LinqRes<C::Element>
    where
        C::Element: Ord + Clone,
    {
        match self.iter().min_by(|l, r| element::<C>(l).cmp(element::<C>(r))) {
            Some(view) => Ok(element::<C>(&view).clone()),
            None => Err(LinqErr::EmptySequence { op: "min" }),
        }
    }

    /// 最大的元素，有多个时取最后一个。
    pub fn max(&self) -> LinqRes<C::Element>
    where
        C::Element: Ord + Clone,
    {
        match self.iter().max_by(|l, r| element::<C>(l).cmp(element::<C>(r))) {
            Some(view) => Ok(element::<C>(&view).clone()),
            None => Err(LinqErr::EmptySequence { op: "max" }),
        }
    }
}

impl<C: Cursor> IntoIterator for Pipe<C> {
    type Item = C::View;
    type IntoIter = CursorIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        CursorIter::new(self.cursor)
    }
}

impl<C: Cursor> IntoIterator for &Pipe<C> {
    type Item = C::View;
    type IntoIter = CursorIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 管道本身也可以作为[`Pipe::select_many`]的内层序列。
impl<C: Cursor> IntoCursor for Pipe<C> {
    type Cursor = C;

    fn into_cursor(self) -> C {
        self.cursor
    }
}
