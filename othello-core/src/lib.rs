//! 黑白棋共享规则库
//!
//! 包含:
//! - 棋盘与棋子核心数据结构
//! - 合法走法生成与落子规则
//! - 坐标表示法 (A1 ~ H8)
//! - 存档文件格式
//! - 棋谱记录格式 (JSON)

mod board;
mod constants;
mod error;
mod notation;
mod record;
mod savefile;

pub use board::{Board, Color, Move, MoveMap};
pub use constants::*;
pub use error::{OthelloError, Result};
pub use notation::Notation;
pub use record::{GameMetadata, GameRecord, MoveRecord, RECORD_VERSION};
pub use savefile::{SaveFile, SavedGame};
