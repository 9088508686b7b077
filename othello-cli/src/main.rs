//! 黑白棋终端程序
//!
//! 支持新开对局或从存档继续，双方各自可选人类或电脑，
//! 终局后可将棋谱导出为 JSON。

mod display;
mod game;
mod player;

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use othello_ai::{AiConfig, AiEngine, OpeningBook};
use othello_core::{Board, Color, SaveFile, SavedGame};

use game::Game;
use player::{ComputerPlayer, HumanPlayer, Player};

const OPENING_BOOK_PATH: &str = "lib/openings.txt";

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("othello_cli=info".parse()?)
                .add_directive("othello_ai=info".parse()?),
        )
        .init();

    println!("Othello\n");

    let saved = prompt_game_setup()?;

    let book = match OpeningBook::load(OPENING_BOOK_PATH) {
        Ok(book) => {
            info!(entries = book.len(), "opening book loaded");
            book
        }
        Err(err) => {
            warn!(%err, path = OPENING_BOOK_PATH, "opening book unavailable");
            OpeningBook::default()
        }
    };

    let black = prompt_player(Color::Black, saved.time_limit_secs, &book)?;
    let white = prompt_player(Color::White, saved.time_limit_secs, &book)?;

    let mut game = Game::new(saved.board, saved.to_move, black, white);
    game.set_time_limit(saved.time_limit_secs);
    let record = game.play()?;

    if prompt_yes_no("Save game record? (y/n): ")? {
        let path = prompt_line("Record file path: ")?;
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        info!(path = %path, "game record saved");
    }

    Ok(())
}

/// 询问新开对局或读取存档
fn prompt_game_setup() -> Result<SavedGame> {
    println!("1. New game");
    println!("2. Load game");
    loop {
        match prompt_line("Select: ")?.as_str() {
            "1" => {
                let time_limit_secs = prompt_time_limit()?;
                return Ok(SavedGame {
                    board: Board::initial(),
                    to_move: Color::Black,
                    time_limit_secs,
                });
            }
            "2" => {
                let path = prompt_line("Save file path: ")?;
                match SaveFile::load(&path) {
                    Ok(saved) => return Ok(saved),
                    Err(err) => println!("Could not load '{}': {}", path, err),
                }
            }
            _ => println!("Please select 1 or 2."),
        }
    }
}

/// 为指定颜色选择人类或电脑玩家
fn prompt_player(color: Color, time_limit_secs: f32, book: &OpeningBook) -> Result<Box<dyn Player>> {
    let computer = prompt_yes_no(&format!("Is {} a computer? (y/n): ", color))?;
    if computer {
        let engine = AiEngine::new(color, AiConfig::with_time_limit_secs(time_limit_secs))
            .with_book(book.clone());
        Ok(Box::new(ComputerPlayer::new(
            format!("Computer ({})", color),
            engine,
        )))
    } else {
        Ok(Box::new(HumanPlayer::new(format!("Human ({})", color))))
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        anyhow::bail!("standard input closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_yes_no(prompt: &str) -> Result<bool> {
    loop {
        match prompt_line(prompt)?.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn prompt_time_limit() -> Result<f32> {
    loop {
        let line = prompt_line("Time limit per computer move (seconds): ")?;
        match line.parse::<f32>() {
            Ok(secs) if secs > 0.0 => return Ok(secs),
            _ => println!("Please enter a positive number."),
        }
    }
}
