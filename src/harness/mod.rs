//! Харнес ботов: контракт стратегии и песочница вокруг неё.
//!
//! Движок никогда не зовёт бота напрямую — только через [`BotHarness`],
//! который в restricted-режиме изолирует стратегию в отдельном потоке,
//! следит за дедлайном и памятью и превращает любой сбой в fallback-ход.

pub mod bot;
pub mod sandbox;

pub use bot::Bot;
pub use sandbox::{BotHarness, BotIncident, Decision, ResourceLimits};
