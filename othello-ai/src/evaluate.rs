//! 局面评估函数
//!
//! 始终从指定颜色的视角评分，分值越大对该方越有利。
//! 按盘面棋子数分三个阶段，各阶段使用不同的子启发式加权组合。

use othello_core::{Board, Color, BOARD_SIZE, CORNERS, NUM_SQUARES};

/// 终局分值系数：胜/负/平压倒其余所有启发式
const TERMINAL_SCALE: i32 = 100_000;

/// 静态位置权重
mod square_tables {
    /// 64 格位置权重：角最高，角的斜邻与边邻为负
    pub const WEIGHTS: [i32; 64] = [
         200, -100,  100,   50,   50,  100, -100,  200,
        -100, -200,  -50,  -50,  -50,  -50, -200, -100,
         100,  -50,  100,    0,    0,  100,  -50,  100,
          50,  -50,    0,    0,    0,    0,  -50,   50,
          50,  -50,    0,    0,    0,    0,  -50,   50,
         100,  -50,  100,    0,    0,  100,  -50,  100,
        -100, -200,  -50,  -50,  -50,  -50, -200, -100,
         200, -100,  100,   50,   50,  100, -100,  200,
    ];

    /// 各角被占据后清零的"危险区"：通向该角的边格与斜格
    pub const UPPER_LEFT_ZONE: [usize; 12] = [1, 2, 3, 8, 9, 10, 11, 16, 17, 18, 24, 25];
    pub const UPPER_RIGHT_ZONE: [usize; 12] = [4, 5, 6, 12, 13, 14, 15, 21, 22, 23, 30, 31];
    pub const LOWER_LEFT_ZONE: [usize; 12] = [32, 33, 40, 41, 42, 48, 49, 50, 51, 57, 58, 59];
    pub const LOWER_RIGHT_ZONE: [usize; 12] = [38, 39, 45, 46, 47, 52, 53, 54, 55, 60, 61, 62];
}

/// 潜在行动力考察的格子集合
mod frontier {
    /// 距边界一圈的 16 个内部格
    pub const INTERIOR: [usize; 16] = [
        18, 19, 20, 21,
        26, 27, 28, 29,
        34, 35, 36, 37,
        42, 43, 44, 45,
    ];
    /// 上边行（不含角邻格），只看左右邻
    pub const TOP_ROW: [usize; 4] = [10, 11, 12, 13];
    /// 下边行，只看左右邻
    pub const BOTTOM_ROW: [usize; 4] = [50, 51, 52, 53];
    /// 左边列，只看上下邻
    pub const LEFT_COLUMN: [usize; 4] = [17, 25, 33, 41];
    /// 右边列，只看上下邻
    pub const RIGHT_COLUMN: [usize; 4] = [22, 30, 38, 46];
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估局面
    pub fn evaluate(board: &Board, color: Color) -> i32 {
        if board.terminal_state() {
            return TERMINAL_SCALE * Self::utility(board, color);
        }

        match board.discs_on_board() {
            // 开局
            0..=20 => {
                5 * Self::mobility(board, color)
                    + 5 * Self::potential_mobility(board, color)
                    + 20 * Self::square_weights(board, color)
                    + 10_000 * Self::corners(board, color)
                    + 10_000 * Self::stability(board, color)
            }
            // 中局
            21..=58 => {
                10 * Self::disc_difference(board, color)
                    + 2 * Self::mobility(board, color)
                    + 2 * Self::potential_mobility(board, color)
                    + 10 * Self::square_weights(board, color)
                    + 100 * Self::parity(board)
                    + 10_000 * Self::corners(board, color)
                    + 10_000 * Self::stability(board, color)
            }
            // 残局
            _ => {
                500 * Self::disc_difference(board, color)
                    + 500 * Self::parity(board)
                    + 10_000 * Self::corners(board, color)
                    + 10_000 * Self::stability(board, color)
            }
        }
    }

    /// 终局净子差（己方视角）
    pub fn utility(board: &Board, color: Color) -> i32 {
        let net: i32 = (0..NUM_SQUARES).map(|square| board.sign_at(square)).sum();
        color.sign() * net
    }

    /// 相对子数差
    pub fn disc_difference(board: &Board, color: Color) -> i32 {
        let mine = board.count(color) as i32;
        let theirs = board.count(color.opponent()) as i32;
        100 * (mine - theirs) / (mine + theirs)
    }

    /// 行动力：双方合法走法数的归一化差值
    pub fn mobility(board: &Board, color: Color) -> i32 {
        let mine = board.legal_moves(color).len() as i32;
        let theirs = board.legal_moves(color.opponent()).len() as i32;
        100 * (mine - theirs) / (mine + theirs + 1)
    }

    /// 潜在行动力：双方"邻接空格的对方棋子"计数的归一化差值
    pub fn potential_mobility(board: &Board, color: Color) -> i32 {
        let mine = Self::player_potential_mobility(board, color);
        let theirs = Self::player_potential_mobility(board, color.opponent());
        100 * (mine - theirs) / (mine + theirs + 1)
    }

    /// 单方潜在行动力：对每个考察格，己方每个与空格相邻的对方棋子各计一次
    fn player_potential_mobility(board: &Board, color: Color) -> i32 {
        let opponent = color.opponent();
        let step = BOARD_SIZE as i32;
        let mut count = 0;

        // 内部格考察全部 8 个邻格
        for &square in &frontier::INTERIOR {
            if board.get(square) != Some(opponent) {
                continue;
            }
            let square = square as i32;
            for offset in [-step - 1, -step, -step + 1, -1, 1, step - 1, step, step + 1] {
                if board.get((square + offset) as usize).is_none() {
                    count += 1;
                }
            }
        }

        // 上下边行只考察左右邻
        for &square in frontier::TOP_ROW.iter().chain(&frontier::BOTTOM_ROW) {
            if board.get(square) != Some(opponent) {
                continue;
            }
            for offset in [-1i32, 1] {
                if board.get((square as i32 + offset) as usize).is_none() {
                    count += 1;
                }
            }
        }

        // 左右边列只考察上下邻
        for &square in frontier::LEFT_COLUMN.iter().chain(&frontier::RIGHT_COLUMN) {
            if board.get(square) != Some(opponent) {
                continue;
            }
            for offset in [-step, step] {
                if board.get((square as i32 + offset) as usize).is_none() {
                    count += 1;
                }
            }
        }

        count
    }

    /// 静态位置权重的内积
    ///
    /// 某个角被占据后，通向该角的危险区权重清零：这些格子代表的
    /// 战略风险已经兑现。
    pub fn square_weights(board: &Board, color: Color) -> i32 {
        let mut weights = square_tables::WEIGHTS;

        let zones: [(usize, &[usize]); 4] = [
            (0, &square_tables::UPPER_LEFT_ZONE),
            (7, &square_tables::UPPER_RIGHT_ZONE),
            (56, &square_tables::LOWER_LEFT_ZONE),
            (63, &square_tables::LOWER_RIGHT_ZONE),
        ];
        for (corner, zone) in zones {
            if board.get(corner).is_some() {
                for &square in zone {
                    weights[square] = 0;
                }
            }
        }

        let score: i32 = (0..NUM_SQUARES)
            .map(|square| board.sign_at(square) * weights[square])
            .sum();
        color.sign() * score
    }

    /// 占角数的归一化差值
    pub fn corners(board: &Board, color: Color) -> i32 {
        let mut mine = 0;
        let mut theirs = 0;
        for corner in CORNERS {
            match board.get(corner) {
                Some(c) if c == color => mine += 1,
                Some(_) => theirs += 1,
                None => {}
            }
        }
        100 * (mine - theirs) / (mine + theirs + 1)
    }

    /// 稳定子数下界之差
    ///
    /// 从每个角沿两条边行走，再从边上的每颗己方棋子垂直延伸，
    /// 收集一个保守的不可翻转棋子集合。
    pub fn stability(board: &Board, color: Color) -> i32 {
        let mine = Self::stable_disc_count(board, color);
        let theirs = Self::stable_disc_count(board, color.opponent());
        mine - theirs
    }

    fn stable_disc_count(board: &Board, color: Color) -> i32 {
        let mut stable = [false; NUM_SQUARES];
        let mut count = 0;
        for corner in CORNERS {
            count += Self::stable_discs_from_corner(board, corner, color, &mut stable);
        }
        count
    }

    /// 从一个角出发收集稳定子，返回新增数量
    fn stable_discs_from_corner(
        board: &Board,
        corner: usize,
        color: Color,
        stable: &mut [bool; NUM_SQUARES],
    ) -> i32 {
        let right = corner % BOARD_SIZE == 0;
        let down = corner / BOARD_SIZE == 0;

        let (horiz_incr, horiz_stop) = if right { (1i32, 7) } else { (-1, -7) };
        let (vert_incr, vert_stop) = if down { (8i32, 56) } else { (-8, -56) };

        let corner = corner as i32;
        let mut count = 0;

        // 沿角所在的行行走，中断于第一个非己方格
        let mut i = corner;
        while i != corner + horiz_incr + horiz_stop {
            if board.get(i as usize) != Some(color) {
                break;
            }

            // 从行上每颗己方棋子垂直延伸
            let mut j = i;
            while j != i + vert_stop {
                if board.get(j as usize) == Some(color) && !stable[j as usize] {
                    stable[j as usize] = true;
                    count += 1;
                } else {
                    break;
                }
                j += vert_incr;
            }

            i += horiz_incr;
        }

        count
    }

    /// 奇偶性：剩余空格为偶数时 -1，奇数时 +1
    pub fn parity(board: &Board) -> i32 {
        if board.empty_squares() % 2 == 0 {
            -1
        } else {
            1
        }
    }
}
