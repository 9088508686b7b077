//! 存档文件格式
//!
//! 纯文本格式：
//! - 8 行棋盘，每行 8 个以空格分隔的符号，0 = 空，1 = 黑，2 = 白
//! - 1 行行棋方标记（1 = 黑，2 = 白）
//! - 1 行每步时间限制（秒，正数）

use std::fs;
use std::path::Path;

use crate::board::{Board, Color};
use crate::constants::BOARD_SIZE;
use crate::error::{OthelloError, Result};

/// 从存档恢复出的对局状态
#[derive(Debug, Clone, PartialEq)]
pub struct SavedGame {
    /// 棋盘
    pub board: Board,
    /// 行棋方
    pub to_move: Color,
    /// 每步时间限制（秒）
    pub time_limit_secs: f32,
}

/// 存档文件读写
pub struct SaveFile;

impl SaveFile {
    /// 从文件加载对局
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SavedGame> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// 解析存档文本
    pub fn parse(text: &str) -> Result<SavedGame> {
        let mut lines = text.lines();
        let mut board = Board::empty();

        for row in 0..BOARD_SIZE {
            let line = lines.next().ok_or_else(|| invalid(format!(
                "expected {} board rows, got {}",
                BOARD_SIZE, row
            )))?;

            let symbols: Vec<&str> = line.split_whitespace().collect();
            if symbols.len() != BOARD_SIZE {
                return Err(invalid(format!(
                    "board row {} has {} symbols, expected {}",
                    row + 1,
                    symbols.len(),
                    BOARD_SIZE
                )));
            }

            for (col, symbol) in symbols.iter().enumerate() {
                let cell = match *symbol {
                    "0" => None,
                    "1" => Some(Color::Black),
                    "2" => Some(Color::White),
                    other => {
                        return Err(invalid(format!(
                            "invalid board symbol '{}' at row {}",
                            other,
                            row + 1
                        )))
                    }
                };
                board.set(row * BOARD_SIZE + col, cell);
            }
        }

        let to_move = match lines.next().map(str::trim) {
            Some("1") => Color::Black,
            Some("2") => Color::White,
            Some(other) => {
                return Err(invalid(format!(
                    "player to move must be 1 (black) or 2 (white), got '{}'",
                    other
                )))
            }
            None => return Err(invalid("save file does not specify player to move".into())),
        };

        let time_limit_secs = match lines.next().map(str::trim) {
            Some(value) => value
                .parse::<f32>()
                .ok()
                .filter(|t| *t > 0.0)
                .ok_or_else(|| invalid(format!(
                    "time limit must be a positive number, got '{}'",
                    value
                )))?,
            None => {
                return Err(invalid(
                    "save file does not specify computer time limit".into(),
                ))
            }
        };

        Ok(SavedGame {
            board,
            to_move,
            time_limit_secs,
        })
    }

    /// 渲染为存档文本
    pub fn render(game: &SavedGame) -> String {
        let mut out = String::new();

        for row in 0..BOARD_SIZE {
            let symbols: Vec<&str> = (0..BOARD_SIZE)
                .map(|col| match game.board.get(row * BOARD_SIZE + col) {
                    None => "0",
                    Some(Color::Black) => "1",
                    Some(Color::White) => "2",
                })
                .collect();
            out.push_str(&symbols.join(" "));
            out.push('\n');
        }

        out.push_str(match game.to_move {
            Color::Black => "1\n",
            Color::White => "2\n",
        });
        out.push_str(&format!("{}\n", game.time_limit_secs));

        out
    }
}

fn invalid(reason: String) -> OthelloError {
    OthelloError::InvalidSaveFile { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL_SAVE: &str = "\
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 2 1 0 0 0
0 0 0 1 2 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
1
10
";

    #[test]
    fn test_parse_initial_position() {
        let game = SaveFile::parse(INITIAL_SAVE).unwrap();

        assert_eq!(game.board, Board::initial());
        assert_eq!(game.board.discs_on_board(), 4);
        assert_eq!(game.to_move, Color::Black);
        assert_eq!(game.time_limit_secs, 10.0);
    }

    #[test]
    fn test_render_round_trip() {
        let game = SaveFile::parse(INITIAL_SAVE).unwrap();
        let rendered = SaveFile::render(&game);
        let reparsed = SaveFile::parse(&rendered).unwrap();

        assert_eq!(reparsed, game);
    }

    #[test]
    fn test_invalid_board_symbol() {
        let text = INITIAL_SAVE.replacen('2', "x", 1);
        let err = SaveFile::parse(&text).unwrap_err();
        assert!(matches!(err, OthelloError::InvalidSaveFile { .. }));
        assert!(err.to_string().contains("invalid board symbol"));
    }

    #[test]
    fn test_invalid_player_marker() {
        let text = INITIAL_SAVE.replace("\n1\n10\n", "\n3\n10\n");
        let err = SaveFile::parse(&text).unwrap_err();
        assert!(err.to_string().contains("player to move"));
    }

    #[test]
    fn test_missing_or_invalid_time_limit() {
        let truncated: String = INITIAL_SAVE.lines().take(9).collect::<Vec<_>>().join("\n");
        let err = SaveFile::parse(&truncated).unwrap_err();
        assert!(err.to_string().contains("time limit"));

        let negative = INITIAL_SAVE.replace("\n10\n", "\n-1\n");
        let err = SaveFile::parse(&negative).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");
        std::fs::write(&path, INITIAL_SAVE).unwrap();

        let game = SaveFile::load(&path).unwrap();
        assert_eq!(game.to_move, Color::Black);
    }
}
