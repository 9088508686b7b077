//! 坐标表示法
//!
//! 列为字母 A~H，行为数字 1~8：格子 26 记作 "C4"。

use crate::constants::{BOARD_SIZE, NUM_SQUARES};

/// 列坐标字母
const COLUMNS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// 坐标表示法
pub struct Notation;

impl Notation {
    /// 将格子索引转换为坐标字符串
    pub fn square_to_coord(square: usize) -> Option<String> {
        if square >= NUM_SQUARES {
            return None;
        }
        let col = square % BOARD_SIZE;
        let row = square / BOARD_SIZE;
        Some(format!("{}{}", COLUMNS[col], row + 1))
    }

    /// 将坐标字符串解析为格子索引，大小写不敏感
    pub fn coord_to_square(coord: &str) -> Option<usize> {
        let mut chars = coord.chars();
        let col_char = chars.next()?.to_ascii_uppercase();
        let row_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        let col = COLUMNS.iter().position(|&c| c == col_char)?;
        let row = row_char.to_digit(10)? as usize;
        if !(1..=BOARD_SIZE).contains(&row) {
            return None;
        }

        Some((row - 1) * BOARD_SIZE + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_to_coord() {
        assert_eq!(Notation::square_to_coord(0).as_deref(), Some("A1"));
        assert_eq!(Notation::square_to_coord(26).as_deref(), Some("C4"));
        assert_eq!(Notation::square_to_coord(63).as_deref(), Some("H8"));
        assert_eq!(Notation::square_to_coord(64), None);
    }

    #[test]
    fn test_coord_to_square() {
        assert_eq!(Notation::coord_to_square("A1"), Some(0));
        assert_eq!(Notation::coord_to_square("c4"), Some(26));
        assert_eq!(Notation::coord_to_square("H8"), Some(63));

        assert_eq!(Notation::coord_to_square("I1"), None);
        assert_eq!(Notation::coord_to_square("A9"), None);
        assert_eq!(Notation::coord_to_square("A0"), None);
        assert_eq!(Notation::coord_to_square("A12"), None);
        assert_eq!(Notation::coord_to_square(""), None);
    }

    #[test]
    fn test_round_trip() {
        for square in 0..NUM_SQUARES {
            let coord = Notation::square_to_coord(square).unwrap();
            assert_eq!(Notation::coord_to_square(&coord), Some(square));
        }
    }
}
