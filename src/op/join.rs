use crate::cursor::{Cursor, drain, element, unpositioned};
use log::debug;

/// 内连接（等值连接）：对每个左侧元素，与键相等的每个右侧元素组合出一个结果。
///
/// 首次推进时取尽右侧游标，按键稳定排序后缓存，相同键的元素按右侧原有顺序相邻存放；
/// 之后左侧逐个推进，在缓存中二分查找其键对应的连续区间并依次产出。
/// 输出顺序为左侧顺序，同一左侧元素的多个匹配保持右侧的插入顺序。
pub struct Join<L, R: Cursor, KL, KR, F, K> {
    left: L,
    right: R,
    left_key: KL,
    right_key: KR,
    combiner: F,
    built: bool,
    cache: Vec<(K, R::View)>,
    /// 当前匹配在缓存中的位置
    pos: Option<usize>,
}

impl<L, R, KL, KR, F, K> Join<L, R, KL, KR, F, K>
where
    L: Cursor,
    R: Cursor,
{
    pub(crate) fn new<U>(left: L, right: R, left_key: KL, right_key: KR, combiner: F) -> Self
    where
        KL: Fn(&L::Element) -> K,
        KR: Fn(&R::Element) -> K,
        F: Fn(&L::Element, &R::Element) -> U,
    {
        Self { left, right, left_key, right_key, combiner, built: false, cache: Vec::new(), pos: None }
    }
}

impl<L, R, KL, KR, F, K> Clone for Join<L, R, KL, KR, F, K>
where
    L: Clone,
    R: Cursor,
    R::View: Clone,
    KL: Clone,
    KR: Clone,
    F: Clone,
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            left_key: self.left_key.clone(),
            right_key: self.right_key.clone(),
            combiner: self.combiner.clone(),
            built: self.built,
            cache: self.cache.clone(),
            pos: self.pos,
        }
    }
}

impl<L, R, KL, KR, F, K, U> Cursor for Join<L, R, KL, KR, F, K>
where
    L: Cursor,
    R: Cursor,
    R::View: Clone,
    KL: Fn(&L::Element) -> K + Clone,
    KR: Fn(&R::Element) -> K + Clone,
    F: Fn(&L::Element, &R::Element) -> U + Clone,
    K: Ord + Clone,
{
    type Element = U;
    type View = U;

    fn advance(&mut self) -> bool {
        if !self.built {
            self.built = true;
            self.build_cache();
        }
        if self.cache.is_empty() {
            return false;
        }

        // 仍在同一个键的匹配区间内
        if let Some(pos) = self.pos {
            let next = pos + 1;
            if next < self.cache.len() && self.cache[next].0 == self.cache[pos].0 {
                self.pos = Some(next);
                return true;
            }
        }

        while self.left.advance() {
            let key = (self.left_key)(element::<L>(&self.left.current()));
            let start = self.cache.partition_point(|(k, _)| *k < key);
            if start < self.cache.len() && self.cache[start].0 == key {
                self.pos = Some(start);
                return true;
            }
        }
        self.pos = None;
        false
    }

    fn current(&self) -> U {
        let Some((_, right)) = self.pos.and_then(|pos| self.cache.get(pos)) else { unpositioned() };
        (self.combiner)(element::<L>(&self.left.current()), element::<R>(right))
    }
}

impl<L, R, KL, KR, F, K> Join<L, R, KL, KR, F, K>
where
    R: Cursor,
    KR: Fn(&R::Element) -> K,
    K: Ord,
{
    fn build_cache(&mut self) {
        let right_key = &self.right_key;
        let mut cache: Vec<(K, R::View)> =
            drain(&mut self.right).map(|view| (right_key(element::<R>(&view)), view)).collect();
        // 稳定排序，相同键保持插入顺序
        cache.sort_by(|(l, _), (r, _)| l.cmp(r));
        debug!(
            "join cache built with {} entries across {} keys",
            cache.len(),
            cache.chunk_by(|(l, _), (r, _)| l == r).count()
        );
        self.cache = cache;
    }
}
