//! 黑白棋 AI 引擎
//!
//! 包含:
//! - 局面评估函数（按开局/中局/残局分阶段加权）
//! - Minimax + Alpha-Beta 搜索（显式栈实现）
//! - 迭代加深与实时时间控制
//! - 开局库

mod evaluate;
mod openings;
mod search;

pub use evaluate::Evaluator;
pub use openings::{BookError, OpeningBook};
pub use search::{AiConfig, AiEngine, Decision};
