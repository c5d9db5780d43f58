use crate::domain::card::Card;
use crate::domain::gamestate::PublicGameState;
use crate::engine::actions::BotAction;

/// Контракт стратегии. Ровно один обязательный метод.
///
/// Бот создаётся один раз на весь турнир и может копить состояние между
/// решениями. Индекс собственного места бот получает при конструировании
/// (по соглашению — аргументом конструктора) и может сверять его с
/// контекстом снапшота.
///
/// Движку всё равно, насколько действие легально: любое объявление
/// пройдёт через валидатор и будет сведено к легальному. Паника, зависание
/// или прожорливость по памяти в restricted-режиме превращаются в
/// fallback-действие (check, а против ставки — fold).
pub trait Bot: Send {
    /// Принять решение по текущему снапшоту и своим карманным картам.
    fn get_action(&mut self, state: &PublicGameState, hole_cards: [Card; 2]) -> BotAction;

    /// Необязательный хук завершения — вызывается в конце турнира.
    fn close(&mut self) {}
}
