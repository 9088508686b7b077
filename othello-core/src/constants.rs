//! 规则常量定义

/// 棋盘边长
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// 四个角的格子索引
pub const CORNERS: [usize; 4] = [0, 7, 56, 63];

/// 8 个扫描方向 (行增量, 列增量)
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
