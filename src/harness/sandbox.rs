use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::card::Card;
use crate::domain::gamestate::PublicGameState;
use crate::engine::actions::BotAction;
use crate::harness::bot::Bot;

/// Лимиты на одно решение бота в restricted-режиме.
#[derive(Clone, Copy, Debug)]
pub struct ResourceLimits {
    /// Жёсткий дедлайн на ход (по умолчанию 1000 мс).
    pub time_limit: Duration,
    /// Потолок по резидентной памяти процесса (по умолчанию 500 МиБ).
    pub memory_limit_bytes: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(1000),
            memory_limit_bytes: 500 * 1024 * 1024,
        }
    }
}

/// Что стряслось с ботом на этом решении.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotIncident {
    /// Не уложился в дедлайн.
    Timeout,
    /// Паника внутри get_action.
    Crash,
    /// Превышен потолок памяти.
    MemoryExceeded,
}

impl BotIncident {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotIncident::Timeout => "timeout",
            BotIncident::Crash => "crash",
            BotIncident::MemoryExceeded => "memory_limit",
        }
    }
}

/// Решение, которое харнес возвращает движку.
///
/// При любом инциденте действие — Check: валидатор сам превратит его в
/// Fold, если чек в текущем контексте нелегален. Так fallback всегда
/// "check, если можно, иначе fold".
#[derive(Clone, Copy, Debug)]
pub struct Decision {
    pub action: BotAction,
    pub incident: Option<BotIncident>,
}

const FALLBACK: BotAction = BotAction::Check;

enum Request {
    Decide {
        id: u64,
        state: Box<PublicGameState>,
        hole_cards: [Card; 2],
    },
    Close,
}

struct Response {
    id: u64,
    /// Err(()) — бот запаниковал.
    result: Result<BotAction, ()>,
}

/// Рабочий поток restricted-режима: владеет ботом на весь турнир.
struct Worker {
    requests: Sender<Request>,
    responses: Receiver<Response>,
    next_id: u64,
    /// Поток (или сам бот) признан мёртвым — дальше только fallback.
    dead: bool,
}

enum Inner {
    /// Unrestricted: прямой вызов в том же потоке, без лимитов.
    Direct(Box<dyn Bot>),
    /// Restricted: бот изолирован в отдельном потоке.
    Sandboxed(Worker, ResourceLimits),
}

/// Харнес одного бота. Живёт весь турнир; движок общается со стратегией
/// только через него.
pub struct BotHarness {
    inner: Inner,
}

impl BotHarness {
    /// Полная изоляция: отдельный поток, дедлайн, потолок памяти,
    /// перехват паник. Режим соревнований.
    pub fn restricted(bot: Box<dyn Bot>, limits: ResourceLimits) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (resp_tx, resp_rx) = mpsc::channel::<Response>();

        thread::spawn(move || worker_loop(bot, req_rx, resp_tx));

        Self {
            inner: Inner::Sandboxed(
                Worker {
                    requests: req_tx,
                    responses: resp_rx,
                    next_id: 0,
                    dead: false,
                },
                limits,
            ),
        }
    }

    /// Прямой вызов без изоляции — для доверенного self-play.
    /// При одинаковом поведении ботов исход игры идентичен restricted.
    pub fn unrestricted(bot: Box<dyn Bot>) -> Self {
        Self {
            inner: Inner::Direct(bot),
        }
    }

    /// Запросить у бота решение. Снапшот передаётся по значению:
    /// бот в любом режиме работает только со своей копией состояния.
    pub fn decide(&mut self, state: PublicGameState, hole_cards: [Card; 2]) -> Decision {
        match &mut self.inner {
            Inner::Direct(bot) => Decision {
                action: bot.get_action(&state, hole_cards),
                incident: None,
            },
            Inner::Sandboxed(worker, limits) => decide_sandboxed(worker, *limits, state, hole_cards),
        }
    }

    /// Завершение турнира: дать боту прибраться.
    pub fn close(&mut self) {
        match &mut self.inner {
            Inner::Direct(bot) => bot.close(),
            Inner::Sandboxed(worker, _) => {
                // Поток завершится сам, когда обработает Close или потеряет канал.
                let _ = worker.requests.send(Request::Close);
                worker.dead = true;
            }
        }
    }
}

fn worker_loop(mut bot: Box<dyn Bot>, requests: Receiver<Request>, responses: Sender<Response>) {
    while let Ok(request) = requests.recv() {
        match request {
            Request::Decide {
                id,
                state,
                hole_cards,
            } => {
                let result = catch_unwind(AssertUnwindSafe(|| bot.get_action(&state, hole_cards)))
                    .map_err(|_| ());
                if responses.send(Response { id, result }).is_err() {
                    // Движок ушёл — выходим тихо.
                    break;
                }
            }
            Request::Close => {
                let _ = catch_unwind(AssertUnwindSafe(|| bot.close()));
                break;
            }
        }
    }
}

fn decide_sandboxed(
    worker: &mut Worker,
    limits: ResourceLimits,
    state: PublicGameState,
    hole_cards: [Card; 2],
) -> Decision {
    if worker.dead {
        return Decision {
            action: FALLBACK,
            incident: Some(BotIncident::Crash),
        };
    }

    // Потолок памяти проверяем до запроса: раз превышен — ход не даём.
    if let Some(rss) = current_rss_bytes() {
        if rss > limits.memory_limit_bytes {
            return Decision {
                action: FALLBACK,
                incident: Some(BotIncident::MemoryExceeded),
            };
        }
    }

    worker.next_id += 1;
    let id = worker.next_id;

    if worker
        .requests
        .send(Request::Decide {
            id,
            state: Box::new(state),
            hole_cards,
        })
        .is_err()
    {
        worker.dead = true;
        return Decision {
            action: FALLBACK,
            incident: Some(BotIncident::Crash),
        };
    }

    let deadline = Instant::now() + limits.time_limit;
    loop {
        let now = Instant::now();
        let remaining = deadline.saturating_duration_since(now);
        match worker.responses.recv_timeout(remaining) {
            Ok(response) if response.id == id => {
                return match response.result {
                    Ok(action) => Decision {
                        action,
                        incident: None,
                    },
                    Err(()) => Decision {
                        action: FALLBACK,
                        incident: Some(BotIncident::Crash),
                    },
                };
            }
            // Ответ на просроченный запрос с прошлого хода — выбрасываем.
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) => {
                // Поток оставляем жить: ответ на этот id будет отброшен,
                // следующий запрос пойдёт тому же боту.
                return Decision {
                    action: FALLBACK,
                    incident: Some(BotIncident::Timeout),
                };
            }
            Err(RecvTimeoutError::Disconnected) => {
                worker.dead = true;
                return Decision {
                    action: FALLBACK,
                    incident: Some(BotIncident::Crash),
                };
            }
        }
    }
}

/// Резидентная память процесса. Потолок задуман на бот-процесс;
/// в in-process-харнесе приближаем его RSS всего процесса.
#[cfg(target_os = "linux")]
fn current_rss_bytes() -> Option<u64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let resident_pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(resident_pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn current_rss_bytes() -> Option<u64> {
    None
}
