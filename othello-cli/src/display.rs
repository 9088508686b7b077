//! 终端棋盘渲染
//!
//! 绿底棋盘，黑白棋子用实心圆点，当前行棋方的合法落子格用叉号标出。

use othello_core::{Board, Color, MoveMap, Notation, BOARD_SIZE};

const GREEN_BG: &str = "\u{1b}[48;5;34m";
const BLACK_FG: &str = "\u{1b}[38;5;232m";
const WHITE_FG: &str = "\u{1b}[38;5;15m";
const RESET: &str = "\u{1b}[0m";

const DISC: char = '\u{2022}';
const MOVE_MARK: char = '\u{2613}';
const EMPTY_MARK: char = '\u{00B7}';

/// 渲染棋盘，并在右侧标注双方棋子数
pub fn render_board(board: &Board, moves: &MoveMap, to_move: Color) -> String {
    let mut out = String::from("    A B C D E F G H\n");

    for row in 0..BOARD_SIZE {
        out.push_str(&format!(
            " {} {}{} {}",
            row + 1,
            GREEN_BG,
            BLACK_FG,
            RESET
        ));

        for col in 0..BOARD_SIZE {
            let square = row * BOARD_SIZE + col;
            let cell = match board.get(square) {
                Some(Color::Black) => format!("{}{}{} {}", GREEN_BG, BLACK_FG, DISC, RESET),
                Some(Color::White) => format!("{}{}{} {}", GREEN_BG, WHITE_FG, DISC, RESET),
                None if moves.contains_key(&square) => {
                    let fg = match to_move {
                        Color::Black => BLACK_FG,
                        Color::White => WHITE_FG,
                    };
                    format!("{}{}{} {}", GREEN_BG, fg, MOVE_MARK, RESET)
                }
                None => format!("{}{}{} {}", GREEN_BG, BLACK_FG, EMPTY_MARK, RESET),
            };
            out.push_str(&cell);
        }

        if row == 3 {
            out.push_str(&format!("\t\tBlack: {}", board.count(Color::Black)));
        } else if row == 4 {
            out.push_str(&format!("\t\tWhite: {}", board.count(Color::White)));
        }
        out.push('\n');
    }

    out.push('\n');
    out
}

/// 渲染编号的合法走法列表，含每一手将翻转的格子
pub fn render_legal_moves(moves: &MoveMap) -> String {
    let mut out = String::from("Legal moves:\n");

    for (number, (&square, flips)) in moves.iter().enumerate() {
        let coord = Notation::square_to_coord(square).unwrap_or_else(|| format!("#{}", square));
        out.push_str(&format!("\t{}\t{} will flip: ", number + 1, coord));
        for &flip in flips {
            if let Some(coord) = Notation::square_to_coord(flip) {
                out.push_str(&coord);
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out.push('\n');
    out
}
