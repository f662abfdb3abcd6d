use thiserror::Error;

pub type LinqRes<T> = Result<T, LinqErr>;

/// 终结操作的失败原因。
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum LinqErr {
    #[error("[Empty Sequence] Sequence contains no elements for `{op}`")]
    EmptySequence { op: &'static str },

    #[error("[Index Out Of Range] Index `{index}` is out of range for `{op}`, sequence length: {len}")]
    IndexOutOfRange { op: &'static str, index: usize, len: usize },

    #[error("[More Than One] Sequence contains more than one element for `{op}`")]
    MoreThanOne { op: &'static str },
}

impl LinqErr {
    /// 产生该错误的终结操作名称
    pub fn op(&self) -> &'static str {
        match self {
            LinqErr::EmptySequence { op } => *op,
            LinqErr::IndexOutOfRange { op, .. } => *op,
            LinqErr::MoreThanOne { op } => *op,
        }
    }
}
