//! Append-only журналы движка в формате JSONL.
//!
//! Пишет движок, не боты. Ошибка записи не фатальна: движок жалуется
//! в stderr и продолжает турнир.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::chips::Chips;
use crate::domain::hand::{RecordedActionKind, Street};
use crate::domain::PlayerIndex;

/// Пара (тип, сумма) для журнала некорректных ходов.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ActionTuple {
    pub kind: RecordedActionKind,
    pub amount: Chips,
}

/// Строка журнала illegal_moves.log: что бот объявил и во что это
/// превратил валидатор.
#[derive(Clone, Debug, Serialize)]
pub struct IllegalMoveEntry {
    pub round: u32,
    pub hand: u32,
    pub street: Street,
    pub player_index: PlayerIndex,
    pub declared: ActionTuple,
    pub corrected: ActionTuple,
    pub reason: &'static str,
}

/// Строка журнала bot_events.log: таймауты, паники и превышения памяти.
#[derive(Clone, Debug, Serialize)]
pub struct BotEventEntry {
    pub round: u32,
    pub street: Street,
    pub player_index: PlayerIndex,
    pub event: &'static str,
}

/// Append-only файл, одна JSON-строка на запись.
#[derive(Debug)]
pub struct JsonlLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl JsonlLog {
    pub fn append_to<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.as_ref().to_path_buf(),
        })
    }

    fn append<T: Serialize>(&mut self, entry: &T) -> std::io::Result<()> {
        let line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Журналы движка. Любой из них может отсутствовать (логирование выключено).
#[derive(Debug, Default)]
pub struct EngineLogs {
    illegal_moves: Option<JsonlLog>,
    bot_events: Option<JsonlLog>,
}

impl EngineLogs {
    /// Без файлов — все записи уходят в никуда.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Журналы в каталоге: `illegal_moves.log` и `bot_events.log`.
    /// Не смогли открыть файл — жалуемся в stderr и едем дальше без него.
    pub fn in_dir(dir: &Path) -> Self {
        let open = |name: &str| match JsonlLog::append_to(dir.join(name)) {
            Ok(log) => Some(log),
            Err(err) => {
                eprintln!("poker-arena: не удалось открыть журнал {name}: {err}");
                None
            }
        };
        Self {
            illegal_moves: open("illegal_moves.log"),
            bot_events: open("bot_events.log"),
        }
    }

    pub fn illegal_move(&mut self, entry: &IllegalMoveEntry) {
        if let Some(log) = self.illegal_moves.as_mut() {
            if let Err(err) = log.append(entry) {
                eprintln!(
                    "poker-arena: сбой записи в {}: {err}",
                    log.path.display()
                );
            }
        }
    }

    pub fn bot_event(&mut self, entry: &BotEventEntry) {
        if let Some(log) = self.bot_events.as_mut() {
            if let Err(err) = log.append(entry) {
                eprintln!(
                    "poker-arena: сбой записи в {}: {err}",
                    log.path.display()
                );
            }
        }
    }
}
