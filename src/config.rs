/// 排序方向
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Order {
    /// 正序
    #[default]
    Asc,
    /// 逆序
    Desc,
}

impl Order {
    #[inline]
    pub(crate) fn is_desc(self) -> bool {
        self == Order::Desc
    }
}
