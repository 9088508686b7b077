//! Minimax + Alpha-Beta 搜索
//!
//! 搜索以显式栈实现：每个栈帧对应一个深度，持有该节点的局面、
//! 走法列表与 alpha/beta 窗口。迭代加深从 1 层开始逐层加深，
//! 时间耗尽时返回最后一个完整完成的深度的结果。

use std::collections::BTreeMap;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use othello_core::{Board, Color, Move, MoveMap, NUM_SQUARES};

use crate::evaluate::Evaluator;
use crate::openings::OpeningBook;

/// 时间预算的可用比例，剩余部分留给收尾开销
const DEADLINE_FACTOR: f32 = 0.998;

/// 迭代加深的停止阈值：已用时超过预算的一半则不再加深
const DEEPENING_CUTOFF: f32 = 0.5;

/// 剩余空格少于该值时直接搜索到终局
const EXACT_SEARCH_THRESHOLD: usize = 10;

/// 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// 每步时间限制（毫秒）
    pub time_limit_ms: u64,
    /// 是否启用开局库
    pub use_opening_book: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 5000,
            use_opening_book: true,
        }
    }
}

impl AiConfig {
    /// 以秒为单位设置时间限制
    pub fn with_time_limit_secs(secs: f32) -> Self {
        Self {
            time_limit_ms: (secs * 1000.0) as u64,
            ..Self::default()
        }
    }
}

/// 引擎给出的决策
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// 落子
    Play(Move),
    /// 无合法走法，弃权
    Pass,
}

/// 搜索栈帧
struct SearchFrame {
    /// 本层是否为极大节点（引擎方行棋）
    is_max: bool,
    alpha: i32,
    beta: i32,
    /// 已合并的子节点得分
    score: i32,
    /// 本层的局面
    board: Board,
    /// 本层的走法，按格子索引升序
    moves: Vec<Move>,
    /// 下一个待展开的走法下标
    cursor: usize,
    /// 最近展开的走法下标，回传最优着时使用
    prev: usize,
}

impl SearchFrame {
    fn empty() -> Self {
        Self {
            is_max: true,
            alpha: i32::MIN,
            beta: i32::MAX,
            score: i32::MIN,
            board: Board::empty(),
            moves: Vec::new(),
            cursor: 0,
            prev: 0,
        }
    }

    fn exhausted(&self) -> bool {
        self.cursor >= self.moves.len()
    }
}

/// 剪枝回传时对子节点得分的保守修正：
/// 剪枝得到的是界而非精确值，极大方收缩 1，极小方放宽 1
fn cutoff_score(parent_is_max: bool, child_score: i32) -> i32 {
    if parent_is_max {
        child_score.saturating_sub(1)
    } else {
        child_score.saturating_add(1)
    }
}

/// 黑白棋搜索引擎
pub struct AiEngine {
    /// 引擎执的颜色
    color: Color,
    config: AiConfig,
    book: OpeningBook,
    /// 平局随机打破用，可注入种子以复现
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建引擎，随机种子
    pub fn new(color: Color, config: AiConfig) -> Self {
        Self {
            color,
            config,
            book: OpeningBook::default(),
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
            nodes_searched: 0,
        }
    }

    /// 指定随机种子，同一种子下搜索结果可复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// 挂载开局库
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    /// 上一次决策展开的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 为当前局面选择一手
    ///
    /// `history` 为双方实际落子格的序列（不含弃权），用于查询开局库。
    pub fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &MoveMap,
        history: &[usize],
    ) -> Decision {
        self.nodes_searched = 0;

        let (&first_square, first_flips) = match legal_moves.iter().next() {
            Some(entry) => entry,
            None => {
                info!(color = %self.color, "no legal moves, passing");
                return Decision::Pass;
            }
        };

        if legal_moves.len() == 1 {
            info!(color = %self.color, square = first_square, "single legal move");
            return Decision::Play(Move::new(first_square, first_flips.clone()));
        }

        if self.config.use_opening_book && !self.book.is_empty() {
            let key = history
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            if let Some(square) = self.book.lookup(&key) {
                if let Some(flips) = legal_moves.get(&square) {
                    info!(color = %self.color, square, "opening book hit");
                    return Decision::Play(Move::new(square, flips.clone()));
                }
                warn!(square, "opening book suggested an illegal move, searching instead");
            }
        }

        let start = Instant::now();
        let budget_secs = self.config.time_limit_ms as f32 / 1000.0;
        let max_depth = NUM_SQUARES - board.discs_on_board();

        // 搜索中止时的兜底着法
        let mut best = Move::new(first_square, first_flips.clone());

        if max_depth < EXACT_SEARCH_THRESHOLD {
            // 终局可数清：一次性搜到底
            match self.search_to_depth(board, legal_moves, max_depth, start) {
                Some(mv) => best = mv,
                None => warn!("exact search ran out of time, playing first legal move"),
            }
        } else {
            for depth_limit in 1..=max_depth {
                match self.search_to_depth(board, legal_moves, depth_limit, start) {
                    Some(mv) => {
                        debug!(depth_limit, square = mv.square, "completed depth");
                        best = mv;
                    }
                    None => {
                        info!(depth_limit, "deadline reached, keeping previous depth");
                        break;
                    }
                }
                if start.elapsed().as_secs_f32() > DEEPENING_CUTOFF * budget_secs {
                    break;
                }
            }
        }

        info!(
            color = %self.color,
            square = best.square,
            nodes = self.nodes_searched,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
        Decision::Play(best)
    }

    /// 深度受限的 Alpha-Beta 搜索
    ///
    /// 在截止时刻前完成则返回最优着法；超时返回 `None`，
    /// 调用方应保留上一深度的结果。
    fn search_to_depth(
        &mut self,
        board: &Board,
        legal_moves: &MoveMap,
        depth_limit: usize,
        start: Instant,
    ) -> Option<Move> {
        let deadline = DEADLINE_FACTOR * self.config.time_limit_ms as f32 / 1000.0;

        let mut frames: Vec<SearchFrame> = (0..=depth_limit.max(1))
            .map(|_| SearchFrame::empty())
            .collect();
        frames[0].board = board.clone();
        frames[0].moves = moves_from_map(legal_moves);

        let mut depth = 0usize;
        let mut best_cursor = 0usize;

        loop {
            // 展开每个节点前检查截止时刻
            if start.elapsed().as_secs_f32() >= deadline {
                return None;
            }

            if frames[depth].exhausted() {
                if depth == 0 {
                    // 根节点收尾：最后一个子节点的得分再合并一次
                    let child_score = frames[1].score;
                    if child_score > frames[0].score
                        || (child_score == frames[0].score && self.rng.gen_bool(0.5))
                    {
                        frames[0].score = child_score;
                        best_cursor = frames[0].prev;
                    }
                    if frames[0].score > frames[0].alpha {
                        frames[0].alpha = frames[0].score;
                    }
                    break;
                }

                depth -= 1;
                let child_score = frames[depth + 1].score;
                self.merge_child(&mut frames, depth, child_score, &mut best_cursor);
            } else if frames[depth].beta <= frames[depth].alpha {
                if depth == 0 {
                    let child_score = frames[1].score;
                    if child_score > frames[0].score
                        || (child_score == frames[0].score && self.rng.gen_bool(0.5))
                    {
                        frames[0].score = child_score;
                        best_cursor = frames[0].prev;
                    }
                    if frames[0].score > frames[0].alpha {
                        frames[0].alpha = frames[0].score;
                    }
                    break;
                }

                depth -= 1;
                let raw = frames[depth + 1].score;
                let frame = &mut frames[depth];
                if frame.is_max {
                    if raw > frame.score || (raw == frame.score && self.rng.gen_bool(0.5)) {
                        frame.score = cutoff_score(true, raw);
                        if depth == 0 {
                            best_cursor = frame.prev;
                        }
                    }
                    if frame.score > frame.alpha {
                        frame.alpha = frame.score;
                    }
                } else {
                    if raw < frame.score {
                        frame.score = cutoff_score(false, raw);
                    }
                    if frame.score < frame.beta {
                        frame.beta = frame.score;
                    }
                }
            } else {
                // 展开下一个子节点
                let mover = if frames[depth].is_max {
                    self.color
                } else {
                    self.color.opponent()
                };
                let mv = frames[depth].moves[frames[depth].cursor].clone();
                let mut child_board = frames[depth].board.clone();
                child_board.apply_move(mover, &mv);
                frames[depth].prev = frames[depth].cursor;
                frames[depth].cursor += 1;
                self.nodes_searched += 1;

                if depth + 1 < depth_limit {
                    let is_max = !frames[depth].is_max;
                    let alpha = frames[depth].alpha;
                    let beta = frames[depth].beta;
                    let next_mover = if is_max { self.color } else { self.color.opponent() };
                    // 子节点无合法走法时走法列表为空，
                    // 其哨兵得分会在回溯时按原样合并
                    let moves = moves_from_map(&child_board.legal_moves(next_mover));

                    depth += 1;
                    let frame = &mut frames[depth];
                    frame.is_max = is_max;
                    frame.alpha = alpha;
                    frame.beta = beta;
                    frame.score = if is_max { i32::MIN } else { i32::MAX };
                    frame.board = child_board;
                    frame.moves = moves;
                    frame.cursor = 0;
                    frame.prev = 0;
                } else {
                    // 叶节点：直接评估，无随机平局打破
                    let leaf_score = Evaluator::evaluate(&child_board, self.color);
                    let frame = &mut frames[depth];
                    if frame.is_max {
                        if leaf_score > frame.score {
                            frame.score = leaf_score;
                            if depth == 0 {
                                best_cursor = frame.prev;
                            }
                        }
                        if frame.score > frame.alpha {
                            frame.alpha = frame.score;
                        }
                    } else {
                        if leaf_score < frame.score {
                            frame.score = leaf_score;
                        }
                        if frame.score < frame.beta {
                            frame.beta = frame.score;
                        }
                    }
                }
            }
        }

        frames[0].moves.get(best_cursor).cloned()
    }

    /// 子节点搜索完毕后向父节点合并得分。
    /// 极大节点在得分相同时抛硬币决定是否更换着法。
    fn merge_child(
        &mut self,
        frames: &mut [SearchFrame],
        depth: usize,
        child_score: i32,
        best_cursor: &mut usize,
    ) {
        let frame = &mut frames[depth];
        if frame.is_max {
            if child_score > frame.score
                || (child_score == frame.score && self.rng.gen_bool(0.5))
            {
                frame.score = child_score;
                if depth == 0 {
                    *best_cursor = frame.prev;
                }
            }
            if frame.score > frame.alpha {
                frame.alpha = frame.score;
            }
        } else {
            if child_score < frame.score {
                frame.score = child_score;
            }
            if frame.score < frame.beta {
                frame.beta = frame.score;
            }
        }
    }
}

/// 将走法映射展开为按格子索引升序的走法列表
fn moves_from_map(map: &BTreeMap<usize, Vec<usize>>) -> Vec<Move> {
    map.iter()
        .map(|(&square, flips)| Move::new(square, flips.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(color: Color, time_limit_ms: u64) -> AiEngine {
        let config = AiConfig {
            time_limit_ms,
            use_opening_book: true,
        };
        AiEngine::new(color, config).with_seed(7)
    }

    #[test]
    fn test_cutoff_score_shrinks_toward_parent() {
        assert_eq!(cutoff_score(true, 10), 9);
        assert_eq!(cutoff_score(false, 10), 11);
        assert_eq!(cutoff_score(true, i32::MIN), i32::MIN);
        assert_eq!(cutoff_score(false, i32::MAX), i32::MAX);
    }

    #[test]
    fn test_depth_one_search_picks_a_legal_opening_move() {
        let board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        let mut ai = engine(Color::Black, 5000);

        let best = ai
            .search_to_depth(&board, &moves, 1, Instant::now())
            .unwrap();
        assert!([19, 26, 37, 44].contains(&best.square));
        assert!(ai.nodes_searched() > 0);
    }

    #[test]
    fn test_zero_budget_aborts_before_any_node() {
        let board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        let mut ai = engine(Color::Black, 0);

        assert!(ai
            .search_to_depth(&board, &moves, 3, Instant::now())
            .is_none());
        assert_eq!(ai.nodes_searched(), 0);
    }

    #[test]
    fn test_no_legal_moves_passes() {
        let board = Board::empty();
        let moves = board.legal_moves(Color::Black);
        let mut ai = engine(Color::Black, 1000);

        assert_eq!(ai.choose_move(&board, &moves, &[]), Decision::Pass);
        assert_eq!(ai.nodes_searched(), 0);
    }

    #[test]
    fn test_single_legal_move_skips_search() {
        let mut board = Board::empty();
        board.set(0, Some(Color::Black));
        board.set(1, Some(Color::White));

        let moves = board.legal_moves(Color::Black);
        assert_eq!(moves.len(), 1);

        let mut ai = engine(Color::Black, 1000);
        match ai.choose_move(&board, &moves, &[]) {
            Decision::Play(mv) => {
                assert_eq!(mv.square, 2);
                assert_eq!(mv.flips, vec![1]);
            }
            Decision::Pass => panic!("expected a move"),
        }
        assert_eq!(ai.nodes_searched(), 0);
    }

    #[test]
    fn test_opening_book_hit_overrides_search() {
        let mut board = Board::initial();
        let black_moves = board.legal_moves(Color::Black);
        board.apply_move(Color::Black, &Move::new(44, black_moves[&44].clone()));

        let white_moves = board.legal_moves(Color::White);
        assert!(white_moves.contains_key(&29));

        let book = OpeningBook::parse("44\n29\n").unwrap();
        let mut ai = engine(Color::White, 1000).with_book(book);

        match ai.choose_move(&board, &white_moves, &[44]) {
            Decision::Play(mv) => assert_eq!(mv.square, 29),
            Decision::Pass => panic!("expected a move"),
        }
        assert_eq!(ai.nodes_searched(), 0);
    }

    #[test]
    fn test_same_seed_reproduces_search_result() {
        let board = Board::initial();
        let moves = board.legal_moves(Color::Black);

        let mut first = engine(Color::Black, 5000);
        let mut second = engine(Color::Black, 5000);

        let a = first
            .search_to_depth(&board, &moves, 3, Instant::now())
            .unwrap();
        let b = second
            .search_to_depth(&board, &moves, 3, Instant::now())
            .unwrap();
        assert_eq!(a.square, b.square);
    }

    #[test]
    fn test_deeper_search_still_returns_legal_move() {
        let board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        let mut ai = engine(Color::Black, 5000);

        let best = ai
            .search_to_depth(&board, &moves, 4, Instant::now())
            .unwrap();
        assert!(moves.contains_key(&best.square));
    }

    #[test]
    fn test_choose_move_returns_legal_move() {
        let board = Board::initial();
        let moves = board.legal_moves(Color::Black);
        let mut ai = engine(Color::Black, 200);

        match ai.choose_move(&board, &moves, &[]) {
            Decision::Play(mv) => assert!(moves.contains_key(&mv.square)),
            Decision::Pass => panic!("expected a move"),
        }
        assert!(ai.nodes_searched() > 0);
    }
}
