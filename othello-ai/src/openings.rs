//! 开局库
//!
//! 纯文本格式，两行一组交替出现：
//! - 第一行为开局序列键：历史落子格索引以逗号连接（如 `44,29,20`）
//! - 第二行为该序列下推荐的下一手格索引
//!
//! 空行与行首尾空白会被忽略。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use othello_core::NUM_SQUARES;

/// 开局库加载错误
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid next-move square '{value}'")]
    InvalidNextMove { line: usize, value: String },

    #[error("line {line}: opening sequence has no next-move line")]
    MissingNextMove { line: usize },
}

/// 开局序列到推荐落子的映射
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<String, usize>,
}

impl OpeningBook {
    /// 从文件加载开局库
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// 解析开局库文本
    pub fn parse(text: &str) -> Result<Self, BookError> {
        let mut entries = HashMap::new();
        let mut pending: Option<(usize, &str)> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match pending.take() {
                None => pending = Some((index + 1, line)),
                Some((_, key)) => {
                    let square = line
                        .parse::<usize>()
                        .ok()
                        .filter(|sq| *sq < NUM_SQUARES)
                        .ok_or_else(|| BookError::InvalidNextMove {
                            line: index + 1,
                            value: line.to_string(),
                        })?;
                    entries.insert(key.to_string(), square);
                }
            }
        }

        if let Some((line, _)) = pending {
            return Err(BookError::MissingNextMove { line });
        }

        Ok(Self { entries })
    }

    /// 查询开局序列对应的推荐落子
    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.entries.get(key).copied()
    }

    /// 库中条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空库
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
