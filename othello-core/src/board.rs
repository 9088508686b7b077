//! 棋盘状态与走法生成

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, DIRECTIONS, NUM_SQUARES};
use crate::notation::Notation;

/// 棋子颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 黑方（先手）
    Black,
    /// 白方（后手）
    White,
}

impl Color {
    /// 获取对方颜色
    pub fn opponent(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// 棋子符号：黑 +1，白 -1（用于评估中的内积与求和）
    pub fn sign(&self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// 走法：落子格与该步翻转的所有对方棋子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// 落子格索引 (0..64)
    pub square: usize,
    /// 被翻转的格子索引，为 8 个方向贡献的并集
    pub flips: Vec<usize>,
}

impl Move {
    /// 创建新走法
    pub fn new(square: usize, flips: Vec<usize>) -> Self {
        Self { square, flips }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Notation::square_to_coord(self.square) {
            Some(coord) => write!(f, "{}", coord),
            None => write!(f, "#{}", self.square),
        }
    }
}

/// 当前行棋方的合法走法映射：落子格 -> 翻转列表
///
/// 使用 BTreeMap 保证按格子索引升序遍历，搜索结果在给定随机种子下可复现。
/// 每一手都重新计算，从不跨回合保留。
pub type MoveMap = BTreeMap<usize, Vec<usize>>;

/// 棋盘
///
/// 格子按行优先编号 0..63（`row = index / 8`，`col = index % 8`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 64 个格子，使用 Vec 以支持 serde
    cells: Vec<Option<Color>>,
    /// 盘面棋子数，随每次落子或摆子维护
    discs_on_board: usize,
    /// passes[0] / passes[1] 分别记录最近一手 / 上上一手是否弃权
    passes: [bool; 2],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            cells: vec![None; NUM_SQUARES],
            discs_on_board: 0,
            passes: [false, false],
        }
    }

    /// 创建初始棋盘：d4/e5 白，e4/d5 黑
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(27, Some(Color::White));
        board.set(28, Some(Color::Black));
        board.set(35, Some(Color::Black));
        board.set(36, Some(Color::White));
        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: usize) -> Option<Color> {
        self.cells.get(square).copied().flatten()
    }

    /// 摆放或清除指定格子的棋子，同时维护棋子计数
    pub fn set(&mut self, square: usize, cell: Option<Color>) {
        if square < NUM_SQUARES {
            if self.cells[square].is_some() {
                self.discs_on_board -= 1;
            }
            if cell.is_some() {
                self.discs_on_board += 1;
            }
            self.cells[square] = cell;
        }
    }

    /// 格子符号：黑 +1，白 -1，空 0
    pub fn sign_at(&self, square: usize) -> i32 {
        match self.get(square) {
            Some(color) => color.sign(),
            None => 0,
        }
    }

    /// 盘面棋子数
    pub fn discs_on_board(&self) -> usize {
        self.discs_on_board
    }

    /// 剩余空格数
    pub fn empty_squares(&self) -> usize {
        NUM_SQUARES - self.discs_on_board
    }

    /// 统计指定颜色的棋子数
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// 生成指定颜色的所有合法走法
    ///
    /// 从每颗己方棋子沿 8 个方向向外扫描，越过连续的对方棋子后遇到的
    /// 第一个空格即为合法落子格。同一落子格可由多颗棋子/多个方向到达时，
    /// 翻转列表取并集。
    pub fn legal_moves(&self, color: Color) -> MoveMap {
        let mut moves = MoveMap::new();

        for square in 0..NUM_SQUARES {
            if self.cells[square] == Some(color) {
                for (dr, dc) in DIRECTIONS {
                    self.scan_direction(square, color, dr, dc, &mut moves);
                }
            }
        }

        moves
    }

    /// 从一颗己方棋子出发，沿单一方向收集可翻转的对方棋子
    fn scan_direction(
        &self,
        disc: usize,
        color: Color,
        dr: i32,
        dc: i32,
        moves: &mut MoveMap,
    ) {
        let mut row = (disc / BOARD_SIZE) as i32 + dr;
        let mut col = (disc % BOARD_SIZE) as i32 + dc;
        let mut flips: Vec<usize> = Vec::new();

        // 以 (行, 列) 坐标行走，出界即停，索引不会绕到相邻行
        while (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            let square = (row * BOARD_SIZE as i32 + col) as usize;
            match self.cells[square] {
                Some(c) if c == color => break,
                Some(_) => flips.push(square),
                None => {
                    if !flips.is_empty() {
                        // 并集语义：已存在的落子格合并翻转列表
                        moves.entry(square).or_default().extend(flips);
                    }
                    break;
                }
            }
            row += dr;
            col += dc;
        }
    }

    /// 落子：落子格与所有被翻转的格子都变为己方颜色
    ///
    /// 调用方在下一手前必须为下一行棋方重新计算合法走法。
    pub fn apply_move(&mut self, color: Color, mv: &Move) {
        self.set(mv.square, Some(color));
        for &square in &mv.flips {
            self.cells[square] = Some(color);
        }
    }

    /// 记录一手（落子或弃权），向前推移弃权标记
    pub fn record_ply(&mut self, passed: bool) {
        self.passes[1] = self.passes[0];
        self.passes[0] = passed;
    }

    /// 终局判定：最近两手均为弃权
    pub fn terminal_state(&self) -> bool {
        self.passes[0] && self.passes[1]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        assert_eq!(board.get(27), Some(Color::White));
        assert_eq!(board.get(28), Some(Color::Black));
        assert_eq!(board.get(35), Some(Color::Black));
        assert_eq!(board.get(36), Some(Color::White));
        assert_eq!(board.discs_on_board(), 4);
        assert_eq!(board.empty_squares(), 60);
        assert!(!board.terminal_state());
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::initial();

        // 黑方开局的四个对称落子点
        let moves = board.legal_moves(Color::Black);
        let squares: Vec<usize> = moves.keys().copied().collect();
        assert_eq!(squares, vec![19, 26, 37, 44]);

        // 每个落子点恰好翻转一颗白子
        assert_eq!(moves[&19], vec![27]);
        assert_eq!(moves[&26], vec![27]);
        assert_eq!(moves[&37], vec![36]);
        assert_eq!(moves[&44], vec![36]);

        let white_moves = board.legal_moves(Color::White);
        let squares: Vec<usize> = white_moves.keys().copied().collect();
        assert_eq!(squares, vec![20, 29, 34, 43]);
    }

    #[test]
    fn test_flip_lists_are_unioned_across_directions() {
        // 格子 16 既可由 0 号黑子沿列到达（翻转 8），
        // 也可由 18 号黑子沿行到达（翻转 17）
        let mut board = Board::empty();
        board.set(0, Some(Color::Black));
        board.set(8, Some(Color::White));
        board.set(18, Some(Color::Black));
        board.set(17, Some(Color::White));

        let moves = board.legal_moves(Color::Black);
        let mut flips = moves[&16].clone();
        flips.sort_unstable();
        assert_eq!(flips, vec![8, 17]);
    }

    #[test]
    fn test_scan_stops_at_board_edge_without_wraparound() {
        // 7 号黑子右侧已到边界；8 号白子在下一行行首，
        // 索引相邻但坐标不相邻，不得产生绕行走法
        let mut board = Board::empty();
        board.set(7, Some(Color::Black));
        board.set(8, Some(Color::White));

        let moves = board.legal_moves(Color::Black);
        assert!(!moves.contains_key(&9));

        // 合法的只有沿列方向越过 8 号格的情形（7 -> 15 方向无子，无走法）
        assert!(moves.is_empty());
    }

    #[test]
    fn test_apply_move_never_reoffers_played_square() {
        let mut board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        let mv = Move::new(19, moves[&19].clone());

        board.apply_move(Color::Black, &mv);

        assert_eq!(board.get(19), Some(Color::Black));
        assert_eq!(board.get(27), Some(Color::Black));
        assert_eq!(board.discs_on_board(), 5);

        for color in [Color::Black, Color::White] {
            let next = board.legal_moves(color);
            assert!(!next.contains_key(&19), "{} re-offered square 19", color);
            for (&square, flips) in &next {
                assert_eq!(board.get(square), None);
                assert!(!flips.is_empty());
            }
        }
    }

    #[test]
    fn test_flip_list_is_contiguous_opponent_run() {
        // 一行内：黑 0，白 1 2 3，空 4
        let mut board = Board::empty();
        board.set(0, Some(Color::Black));
        board.set(1, Some(Color::White));
        board.set(2, Some(Color::White));
        board.set(3, Some(Color::White));

        let moves = board.legal_moves(Color::Black);
        let mut flips = moves[&4].clone();
        flips.sort_unstable();
        assert_eq!(flips, vec![1, 2, 3]);
    }

    #[test]
    fn test_own_disc_blocks_direction() {
        // 黑 0，黑 1：方向上先遇到己方棋子，不产生走法
        let mut board = Board::empty();
        board.set(0, Some(Color::Black));
        board.set(1, Some(Color::Black));

        assert!(board.legal_moves(Color::Black).is_empty());
    }

    #[test]
    fn test_terminal_after_two_consecutive_passes() {
        let mut board = Board::initial();
        assert!(!board.terminal_state());

        board.record_ply(true);
        assert!(!board.terminal_state());

        board.record_ply(false);
        board.record_ply(true);
        assert!(!board.terminal_state());

        board.record_ply(true);
        assert!(board.terminal_state());
    }

    #[test]
    fn test_disc_count_tracks_occupied_cells() {
        let mut board = Board::empty();
        board.set(10, Some(Color::Black));
        board.set(10, Some(Color::White));
        assert_eq!(board.discs_on_board(), 1);

        board.set(10, None);
        assert_eq!(board.discs_on_board(), 0);

        board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        board.apply_move(Color::Black, &Move::new(26, moves[&26].clone()));
        assert_eq!(board.discs_on_board(), 5);
        assert_eq!(board.count(Color::Black), 4);
        assert_eq!(board.count(Color::White), 1);
    }
}
