use chrono::Utc;
use sweeper_core::{GameId, GeometryPolicy, MoveKind};
use sweeper_protocol::{
    CreateGameRequest, GameView, MoveRequest, MoveResponse, ProtocolError, Result, encode,
};
use sweeper_store::{GameService, MemoryStore, StoreError};

pub const HELP: &str = "\
commands:
  new NAME [ROWS COLUMNS MINES]   create a game (default 9x9 with 10 mines)
  move ID ROW COLUMN [F|?|clear]  reveal a cell, or flag/question/clear its mark
  show ID                         print a game
  pause ID | resume ID            stop or restart the clock
  list [QUERY]                    games whose name contains QUERY
  delete ID                       remove a game
  help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New(CreateGameRequest),
    Move(GameId, MoveRequest),
    Show(GameId),
    Pause(GameId),
    Resume(GameId),
    List(Option<String>),
    Delete(GameId),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            ["new", name] => Self::New(CreateGameRequest {
                name: (*name).to_owned(),
                rows: 9,
                columns: 9,
                mines: 10,
            }),
            ["new", name, rows, columns, mines] => Self::New(CreateGameRequest {
                name: (*name).to_owned(),
                rows: number(rows)?,
                columns: number(columns)?,
                mines: number(mines)?,
            }),
            ["move", id, row, column, rest @ ..] if rest.len() <= 1 => {
                let sign = match rest.first() {
                    None => None,
                    Some(&"clear") => Some(String::new()),
                    Some(sign) => Some((*sign).to_owned()),
                };
                Self::Move(
                    game_id(id)?,
                    MoveRequest {
                        row: Some(number(row)?),
                        column: Some(number(column)?),
                        sign,
                    },
                )
            }
            ["show", id] => Self::Show(game_id(id)?),
            ["pause", id] => Self::Pause(game_id(id)?),
            ["resume", id] => Self::Resume(game_id(id)?),
            ["list"] => Self::List(None),
            ["list", query] => Self::List(Some((*query).to_owned())),
            ["delete", id] => Self::Delete(game_id(id)?),
            ["help"] => Self::Help,
            ["quit"] | ["exit"] => Self::Quit,
            _ => return Err(ProtocolError::Malformed(format!("unknown command {line:?}"))),
        };
        Ok(command)
    }
}

fn number(word: &str) -> Result<i64> {
    word.parse()
        .map_err(|_| ProtocolError::Malformed(format!("{word:?} is not a number")))
}

fn game_id(word: &str) -> Result<GameId> {
    word.parse()
        .map(GameId)
        .map_err(|_| ProtocolError::Malformed(format!("{word:?} is not a game id")))
}

/// One player's interactive session over an in-memory store.
pub struct Session {
    service: GameService<MemoryStore>,
    policy: GeometryPolicy,
    user: String,
    json: bool,
}

impl Session {
    pub fn new(
        service: GameService<MemoryStore>,
        policy: GeometryPolicy,
        user: String,
        json: bool,
    ) -> Self {
        Self {
            service,
            policy,
            user,
            json,
        }
    }

    /// Runs a command and returns the text to print.
    pub fn execute(&self, command: Command) -> Result<String> {
        let now = Utc::now();
        match command {
            Command::New(request) => {
                let config = request.to_config_with(&self.policy)?;
                let game = self.service.create_game(&self.user, &request.name, config)?;
                self.render(&GameView::new(&game, now))
            }
            Command::Move(id, request) => {
                let (row, column, kind) = request.to_move()?;
                let (game, report) = self.service.make_move(&self.user, id, row, column, kind)?;
                let response = MoveResponse::new(&game, report, now);
                if self.json {
                    encode(&response)
                } else {
                    Ok(format!(
                        "{}: {:?}\n{}",
                        describe(kind),
                        response.outcome,
                        response.game
                    ))
                }
            }
            Command::Show(id) => self.render(&GameView::new(&self.service.game(id)?, now)),
            Command::Pause(id) => {
                self.render(&GameView::new(&self.service.pause(&self.user, id)?, now))
            }
            Command::Resume(id) => {
                self.render(&GameView::new(&self.service.resume(&self.user, id)?, now))
            }
            Command::List(query) => {
                let views: Vec<GameView> = self
                    .service
                    .list(query.as_deref())?
                    .iter()
                    .map(|game| GameView::new(game, now))
                    .collect();
                if self.json {
                    encode(&views)
                } else {
                    Ok(views
                        .iter()
                        .map(|view| format!("{}\t{}\t{:?}", view.id, view.name, view.status))
                        .collect::<Vec<_>>()
                        .join("\n"))
                }
            }
            Command::Delete(id) => {
                self.service.delete(&self.user, id)?;
                Ok(format!("deleted game {id}"))
            }
            Command::Help => Ok(HELP.to_owned()),
            Command::Quit => Ok(String::new()),
        }
    }

    fn render(&self, view: &GameView) -> Result<String> {
        if self.json {
            encode(view)
        } else {
            Ok(view.to_string())
        }
    }
}

fn describe(kind: MoveKind) -> &'static str {
    match kind {
        MoveKind::Reveal => "reveal",
        MoveKind::Flag => "flag",
        MoveKind::Question => "question",
        MoveKind::Clear => "clear",
    }
}

/// Formats a failed command the way the API would report it.
pub fn describe_error(err: &ProtocolError) -> String {
    match err {
        ProtocolError::Store(StoreError::Poisoned) => {
            log::error!("{err}");
            format!("error {}: {}", err.status_code(), err)
        }
        _ => format!("error {} ({}): {}", err.status_code(), err.kind(), err),
    }
}
