//! Line-oriented text protocol for driving a game from another program.
//!
//! The framing follows GTP: each line is an optional numeric id followed by a
//! command and its arguments. A successful response starts with `=`, a failure
//! with `?`, and every response ends with a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the command loop
//! - `clear_board` - Start a new game
//! - `showboard` - Print the board
//! - `play <color> <coord>` - Play a move for the side to move
//! - `genmove <color>` - Let the engine strategy choose and play a move
//! - `legal_moves <color>` - List legal moves for the side to move
//! - `score` - Current stone counts
//! - `stage` - Current game stage
//!
//! Coordinates are a column letter starting at `a` followed by a 1-based row
//! number, so `d3` is `x = 3, y = 2`.

use std::io::{self, BufRead, Write};

use crate::board::{Board, StoneColor};
use crate::constants::{SIZE_X, SIZE_Y};
use crate::game::{Game, MoveReport, Score};
use crate::position::Position;
use crate::strategy::Strategy;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "quit",
    "score",
    "showboard",
    "stage",
    "version",
];

/// Parse a coordinate such as `d3` into `(x, y)`.
pub fn parse_coord(s: &str) -> Option<(usize, usize)> {
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_lowercase();
    if !col.is_ascii_lowercase() {
        return None;
    }
    let x = (col as u8 - b'a') as usize;
    let row = chars.as_str();
    if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = row.parse().ok()?;
    let y = row.checked_sub(1)?;
    Board::in_bounds(x, y).then_some((x, y))
}

/// Format `(x, y)` as a coordinate such as `d3`.
pub fn str_coord(x: usize, y: usize) -> String {
    format!("{}{}", (b'a' + x as u8) as char, y + 1)
}

fn parse_color(s: &str) -> Option<StoneColor> {
    match s.to_lowercase().as_str() {
        "b" | "black" => Some(StoneColor::Black),
        "w" | "white" => Some(StoneColor::White),
        _ => None,
    }
}

/// Command loop state: one game and the strategy that answers `genmove`.
pub struct ProtocolEngine {
    game: Game,
    strategy: Box<dyn Strategy>,
}

impl ProtocolEngine {
    /// A fresh game answered by `strategy`.
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            game: Game::new(),
            strategy,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game = Game::new();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "score" => {
                let Score { black, white } = self.game.score();
                (true, format!("Black {black} White {white}"))
            }

            "stage" => (true, self.game.stage().to_string()),

            "legal_moves" => match self.check_turn(args.first()) {
                Ok(Some(_)) => {
                    let moves: Vec<_> = self
                        .game
                        .legal_moves()
                        .iter()
                        .map(|m| str_coord(m.x, m.y))
                        .collect();
                    (true, moves.join(" "))
                }
                Ok(None) => (true, String::new()),
                Err(msg) => (false, msg),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                match self.check_turn(args.first()) {
                    Ok(Some(_)) => {}
                    Ok(None) => return (false, "no legal move".to_string()),
                    Err(msg) => return (false, msg),
                }
                let Some((x, y)) = parse_coord(args[1]) else {
                    let last = str_coord(SIZE_X - 1, SIZE_Y - 1);
                    return (false, format!("invalid coordinate, expected a1..{last}"));
                };
                match self.game.play(x, y) {
                    Ok(report) => (true, Self::describe(&report)),
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                match self.check_turn(args.first()) {
                    Ok(Some(_)) => {}
                    Ok(None) => return (true, "pass".to_string()),
                    Err(msg) => return (false, msg),
                }
                match self.game.play_with(self.strategy.as_mut()) {
                    Ok(report) => {
                        let coord = str_coord(report.placed.x, report.placed.y);
                        let details = Self::describe(&report);
                        (true, format!("{coord} {details}").trim_end().to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Check that `arg` names the side to move.
    ///
    /// `Ok(None)` means that side has no legal move and has to pass.
    fn check_turn(&self, arg: Option<&&str>) -> Result<Option<StoneColor>, String> {
        let arg = arg.ok_or_else(|| "missing argument".to_string())?;
        let color = parse_color(arg).ok_or_else(|| format!("invalid color: {arg}"))?;
        if self.game.to_move() == Some(color) {
            return Ok(Some(color));
        }
        if Position::new(self.game.board()).has_legal_move(color) {
            let to_move = color.opponent();
            return Err(format!("it is {to_move}'s turn"));
        }
        Ok(None)
    }

    /// Flips and any skipped turn, e.g. `flipped d4 e4; White skipped`.
    fn describe(report: &MoveReport) -> String {
        let mut parts = Vec::new();
        if !report.flipped.is_empty() {
            let flipped: Vec<_> = report
                .flipped
                .iter()
                .map(|c| str_coord(c.x, c.y))
                .collect();
            parts.push(format!("flipped {}", flipped.join(" ")));
        }
        if let Some(skipped) = report.skipped {
            parts.push(format!("{skipped} skipped"));
        }
        parts.join("; ")
    }
}
