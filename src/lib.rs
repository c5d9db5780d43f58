//! poker-arena — движок No-Limit Texas Hold'em турниров для
//! соревнований автономных ботов.
//!
//! Движок однопоточен по отношению к состоянию игры: в каждый момент
//! опрашивается ровно один бот, мутации стола происходят только между
//! опросами. Боты изолированы харнесом (дедлайн, потолок памяти,
//! перехват паник), каждое их объявление проходит через валидатор и
//! сводится к легальному действию. Жёсткие инварианты — сохранение
//! фишек и отсутствие утечки карманных карт в снапшотах.
//!
//! Слои:
//!   - [`domain`] — карты, фишки, колода, места, блайнды, записи раздач;
//!   - [`engine`] — машина состояний раздачи, валидация, сайд-поты;
//!   - [`eval`] — оценка силы рук и выбор победителей;
//!   - [`harness`] — контракт бота и песочница вокруг него;
//!   - [`infra`] — RNG, деривация seed'ов, журналы;
//!   - [`tournament`] — конфиг и прогон турнира.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod harness;
pub mod infra;
pub mod tournament;
