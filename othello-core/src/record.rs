//! 棋谱记录格式
//!
//! 支持 JSON 格式的棋谱存储

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::notation::Notation;

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 对局元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 黑方玩家名
    pub black_player: String,
    /// 白方玩家名
    pub white_player: String,
    /// 对局日期
    pub date: String,
    /// 每步时间限制（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<f32>,
    /// 对局结果
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// 单手记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 行棋方
    pub color: Color,
    /// 落子格索引，弃权时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square: Option<usize>,
    /// 坐标表示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 逐手记录（含弃权）
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 创建新的棋谱记录
    pub fn new(black_player: String, white_player: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                black_player,
                white_player,
                date: Utc::now().format("%Y-%m-%d").to_string(),
                time_limit_secs: None,
                result: None,
            },
            moves: Vec::new(),
        }
    }

    /// 设置时间限制
    pub fn set_time_limit(&mut self, secs: f32) {
        self.metadata.time_limit_secs = Some(secs);
    }

    /// 追加一手；`square` 为空表示弃权
    pub fn push_move(&mut self, color: Color, square: Option<usize>) {
        self.moves.push(MoveRecord {
            color,
            square,
            notation: square.and_then(Notation::square_to_coord),
        });
    }

    /// 记录对局结果
    pub fn set_result(&mut self, result: String) {
        self.metadata.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_moves_and_passes() {
        let mut record = GameRecord::new("Human".into(), "Computer".into());
        record.set_time_limit(10.0);
        record.push_move(Color::Black, Some(19));
        record.push_move(Color::White, None);
        record.set_result("Black wins 40-24".into());

        assert_eq!(record.version, RECORD_VERSION);
        assert_eq!(record.moves.len(), 2);
        assert_eq!(record.moves[0].notation.as_deref(), Some("D3"));
        assert_eq!(record.moves[1].square, None);
        assert_eq!(record.moves[1].notation, None);
        assert_eq!(record.metadata.result.as_deref(), Some("Black wins 40-24"));
    }
}
