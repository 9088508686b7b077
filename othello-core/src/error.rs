//! 错误类型定义

use thiserror::Error;

/// 黑白棋规则与格式错误
#[derive(Error, Debug)]
pub enum OthelloError {
    /// 非法走法
    #[error("Illegal move: square {square} is not a legal move")]
    IllegalMove { square: usize },

    /// 无效的存档文件
    #[error("Invalid save file: {reason}")]
    InvalidSaveFile { reason: String },

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 规则库操作结果类型
pub type Result<T> = std::result::Result<T, OthelloError>;
