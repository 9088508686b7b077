//! 对局循环
//!
//! 双方交替行棋，无合法走法时弃权，连续两次弃权即终局。
//! 每一手都重新计算合法走法并校验玩家的选择。

use anyhow::Result;
use tracing::info;

use othello_ai::Decision;
use othello_core::{Board, Color, GameRecord, Move, OthelloError};

use crate::display;
use crate::player::Player;

/// 一盘对局
pub struct Game {
    board: Board,
    to_move: Color,
    black: Box<dyn Player>,
    white: Box<dyn Player>,
    /// 双方实际落子格的序列，不含弃权
    history: Vec<usize>,
    record: GameRecord,
    show_board: bool,
}

impl Game {
    pub fn new(
        board: Board,
        to_move: Color,
        black: Box<dyn Player>,
        white: Box<dyn Player>,
    ) -> Self {
        let record = GameRecord::new(black.name().to_string(), white.name().to_string());
        Self {
            board,
            to_move,
            black,
            white,
            history: Vec::new(),
            record,
            show_board: true,
        }
    }

    /// 记录每步时间限制到棋谱
    pub fn set_time_limit(&mut self, secs: f32) {
        self.record.set_time_limit(secs);
    }

    /// 关闭终端渲染
    pub fn silent(mut self) -> Self {
        self.show_board = false;
        self
    }

    /// 运行对局直至终局，返回完整棋谱
    pub fn play(mut self) -> Result<GameRecord> {
        loop {
            let moves = self.board.legal_moves(self.to_move);

            if self.show_board {
                println!("{}", display::render_board(&self.board, &moves, self.to_move));
                let name = match self.to_move {
                    Color::Black => self.black.name(),
                    Color::White => self.white.name(),
                };
                println!("{} to move ({})", name, self.to_move);
                if !moves.is_empty() {
                    print!("{}", display::render_legal_moves(&moves));
                }
            }

            let player = match self.to_move {
                Color::Black => &mut self.black,
                Color::White => &mut self.white,
            };
            let decision = player.choose(&self.board, &moves, &self.history)?;

            match decision {
                Decision::Play(mv) => {
                    // 翻转列表以本回合生成的为准
                    let flips = moves
                        .get(&mv.square)
                        .ok_or(OthelloError::IllegalMove { square: mv.square })?;
                    let mv = Move::new(mv.square, flips.clone());

                    self.board.apply_move(self.to_move, &mv);
                    self.history.push(mv.square);
                    self.record.push_move(self.to_move, Some(mv.square));
                    self.board.record_ply(false);
                }
                Decision::Pass => {
                    self.record.push_move(self.to_move, None);
                    self.board.record_ply(true);
                }
            }

            if self.board.terminal_state() {
                break;
            }
            self.to_move = self.to_move.opponent();
        }

        let result = final_result(&self.board);
        info!(%result, "game over");
        if self.show_board {
            let no_moves = othello_core::MoveMap::new();
            println!("{}", display::render_board(&self.board, &no_moves, self.to_move));
            println!("{}", result);
        }

        self.record.set_result(result);
        Ok(self.record)
    }
}

/// 终局结果：棋子多者胜
fn final_result(board: &Board) -> String {
    let black = board.count(Color::Black);
    let white = board.count(Color::White);
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => format!("Black wins {}-{}", black, white),
        std::cmp::Ordering::Less => format!("White wins {}-{}", white, black),
        std::cmp::Ordering::Equal => format!("Draw {}-{}", black, white),
    }
}
