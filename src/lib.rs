//! 惰性、可组合的内存序列查询库。
//!
//! 查询由入口构造出的叶子游标开始，逐层包装过滤、映射、展开、截取、连接等适配器，最终由终结操作驱动求值：
//!
//! ```
//! use rlinq::from;
//!
//! let items = [1, 2, 3, 4, 5, 6, 7, 8];
//! let pipe = from(&items).where_by(|x| x % 2 == 0).select(|x| x / 2).take(2);
//! assert_eq!(pipe.to_vec(), vec![1, 2]);
//! ```

pub mod config;
pub mod cursor;
pub mod err;
pub mod input;
pub mod op;
mod pipe;
pub mod storage;

pub use config::Order;
pub use cursor::{Cursor, CursorIter, IntoCursor};
pub use err::{LinqErr, LinqRes};
pub use input::{empty, from, from_copy, from_move, range, repeat, singleton};
pub use pipe::Pipe;

/// 整数类型
pub type Integer = i64;
