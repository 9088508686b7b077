//! 玩家抽象
//!
//! 人类玩家从标准输入读取落子，电脑玩家委托搜索引擎。

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::info;

use othello_ai::{AiEngine, Decision};
use othello_core::{Board, Move, MoveMap, Notation};

/// 对局中的一方
pub trait Player {
    /// 玩家名，用于棋谱与终端提示
    fn name(&self) -> &str;

    /// 为当前局面选择落子或弃权
    ///
    /// `history` 为双方实际落子格的序列（不含弃权）。
    fn choose(&mut self, board: &Board, moves: &MoveMap, history: &[usize]) -> Result<Decision>;
}

/// 人类玩家，通过终端输入选择走法
pub struct HumanPlayer {
    name: String,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, _board: &Board, moves: &MoveMap, _history: &[usize]) -> Result<Decision> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        if moves.is_empty() {
            println!("No legal moves!");
            print!("\tPress Enter to pass: ");
            io::stdout().flush()?;
            lines.next().transpose()?;
            println!();
            return Ok(Decision::Pass);
        }

        loop {
            print!("\tSelect move number/square coordinate: ");
            io::stdout().flush()?;

            let line = match lines.next().transpose()? {
                Some(line) => line,
                None => anyhow::bail!("standard input closed"),
            };

            match parse_selection(line.trim(), moves) {
                Some(mv) => {
                    println!();
                    return Ok(Decision::Play(mv));
                }
                None => println!("\tInvalid input. Please try again.\n"),
            }
        }
    }
}

/// 解析一次输入：先按坐标（如 `C4`）匹配，再按走法编号（从 1 起）匹配
fn parse_selection(input: &str, moves: &MoveMap) -> Option<Move> {
    if let Some(square) = Notation::coord_to_square(input) {
        if let Some(flips) = moves.get(&square) {
            return Some(Move::new(square, flips.clone()));
        }
    }

    let number: usize = input.parse().ok()?;
    if (1..=moves.len()).contains(&number) {
        let (&square, flips) = moves.iter().nth(number - 1)?;
        return Some(Move::new(square, flips.clone()));
    }

    None
}

/// 电脑玩家，委托搜索引擎决策
pub struct ComputerPlayer {
    name: String,
    engine: AiEngine,
}

impl ComputerPlayer {
    pub fn new(name: impl Into<String>, engine: AiEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, board: &Board, moves: &MoveMap, history: &[usize]) -> Result<Decision> {
        let decision = self.engine.choose_move(board, moves, history);
        if let Decision::Play(mv) = &decision {
            info!(player = %self.name, %mv, "computer move");
        }
        Ok(decision)
    }
}
