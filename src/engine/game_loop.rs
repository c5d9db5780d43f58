use std::collections::BTreeMap;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{
    HandOutcome, RecordedAction, RecordedActionKind, ShowdownDetails, Street, WinnerEntry,
};
use crate::domain::player::SeatStatus;
use crate::domain::table::Table;
use crate::domain::PlayerIndex;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::positions::{active_from, blind_positions, next_non_busted, non_busted_from};
use crate::engine::side_pots::reconcile_bets_to_pots;
use crate::engine::validation::{validate_action, ValidatedAction};
use crate::engine::RandomSource;
use crate::eval::evaluator::{determine_winners, evaluate_best_hand};
use crate::harness::BotHarness;
use crate::infra::logging::{ActionTuple, BotEventEntry, EngineLogs, IllegalMoveEntry};

/// Сыграть одну раздачу от начала до конца.
///
/// Машина состояний: SETUP → PREFLOP → FLOP → TURN → RIVER → SHOWDOWN →
/// FINALIZE, с досрочным выходом в FINALIZE, как только в раздаче остаётся
/// один не сфолдивший игрок. Все решения ботов идут через харнесы,
/// все объявления — через валидатор.
pub fn play_hand<R: RandomSource>(
    table: &mut Table,
    harnesses: &mut [BotHarness],
    rng: &mut R,
    logs: &mut EngineLogs,
) -> Result<HandOutcome, EngineError> {
    if table.non_busted_count() < 2 {
        return Err(EngineError::Internal(
            "раздача запрошена, когда за столом меньше двух игроков",
        ));
    }

    reset_hand_state(table, rng);
    deal_hole_cards(table)?;
    post_blinds(table);

    let mut final_street = Street::Preflop;

    for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
        if street != Street::Preflop {
            deal_board(table, street)?;
        }
        final_street = street;
        table.current_hand.street_mut(street).community_cards = table.board.clone();

        if table.in_hand_count() > 1 {
            run_betting_round(table, harnesses, logs, street)?;
        }

        reconcile_bets_to_pots(table);

        if table.in_hand_count() <= 1 {
            let outcome = finish_uncontested(table, final_street)?;
            return finalize_hand(table, outcome);
        }
    }

    let outcome = run_showdown(table)?;
    finalize_hand(table, outcome)
}

/// SETUP: очистить состояние раздачи, перемешать колоду.
/// Запись прошлой раздачи уходит в архив именно здесь, чтобы к этому
/// моменту в ней уже лежали детали шоудауна.
fn reset_hand_state<R: RandomSource>(table: &mut Table, rng: &mut R) {
    let archived = std::mem::take(&mut table.current_hand);
    if !archived.is_empty() {
        table.previous_hands.push(archived);
    }

    table.board.clear();
    table.pots.clear();
    table.min_raise = table.blinds.big_blind;
    for c in table.contributions.iter_mut() {
        *c = Chips::ZERO;
    }

    for seat in table.seats.iter_mut() {
        seat.hole_cards = None;
        seat.street_bet = Chips::ZERO;
        seat.can_raise = true;
        seat.acted_this_street = false;
        if seat.status != SeatStatus::Busted {
            seat.status = SeatStatus::Active;
        }
    }

    table.deck = Deck::standard_52();
    rng.shuffle(table.deck.cards_mut());
}

/// Раздать карманные карты: два круга по одной карте, начиная слева
/// от кнопки.
fn deal_hole_cards(table: &mut Table) -> Result<(), EngineError> {
    let order = non_busted_from(table, (table.button + 1) % table.num_players());

    let mut first_pass = Vec::with_capacity(order.len());
    for _ in &order {
        first_pass.push(table.deck.deal_one()?);
    }
    for (k, &idx) in order.iter().enumerate() {
        let second = table.deck.deal_one()?;
        table.seats[idx].hole_cards = Some([first_pass[k], second]);
    }
    Ok(())
}

/// Постинг блайндов. Короткий стек ставит сколько есть и уходит в олл-ин.
fn post_blinds(table: &mut Table) {
    let Some((sb, bb)) = blind_positions(table) else {
        return;
    };

    let sb_paid = table.seats[sb].commit(table.blinds.small_blind);
    table.contributions[sb] += sb_paid;
    table.current_hand.preflop.actions.push(RecordedAction {
        player_index: sb,
        kind: RecordedActionKind::SmallBlind,
        amount: sb_paid,
    });

    let bb_paid = table.seats[bb].commit(table.blinds.big_blind);
    table.contributions[bb] += bb_paid;
    table.current_hand.preflop.actions.push(RecordedAction {
        player_index: bb,
        kind: RecordedActionKind::BigBlind,
        amount: bb_paid,
    });
}

/// Открыть карты борда для улицы: burn + 3/1/1.
fn deal_board(table: &mut Table, street: Street) -> Result<(), EngineError> {
    let count = match street {
        Street::Flop => 3,
        Street::Turn | Street::River => 1,
        Street::Preflop | Street::Showdown => return Ok(()),
    };

    table.deck.burn()?;
    for _ in 0..count {
        let card = table.deck.deal_one()?;
        table.board.push(card);
    }
    Ok(())
}

/// Раунд ставок одной улицы.
///
/// Очередь ходов живёт в BettingState: ход снимает актёра, полный рейз
/// пересобирает очередь, неполный олл-ин добирает неуравненных.
/// На префлопе очередь начинается после BB и заканчивается самим BB —
/// так BB получает опцию даже в пролимпленном банке.
fn run_betting_round(
    table: &mut Table,
    harnesses: &mut [BotHarness],
    logs: &mut EngineLogs,
    street: Street,
) -> Result<(), EngineError> {
    let n = table.num_players();

    let mut betting = if street == Street::Preflop {
        let Some((_sb, bb)) = blind_positions(table) else {
            return Ok(());
        };
        let queue = active_from(table, (bb + 1) % n);
        // Целевая ставка — максимум реально выставленных блайндов:
        // короткий BB не обязывает остальных докладывать сверх него.
        BettingState::new(street, table.current_bet(), table.blinds.big_blind, queue)
    } else {
        for seat in table.seats.iter_mut() {
            seat.can_raise = true;
            seat.acted_this_street = false;
        }
        let queue = active_from(table, (table.button + 1) % n);
        BettingState::new(street, Chips::ZERO, table.blinds.big_blind, queue)
    };
    table.min_raise = betting.min_raise;

    while let Some(actor) = betting.next_actor() {
        if !table.seats[actor].can_act() {
            betting.mark_acted(actor);
            continue;
        }

        let to_call = betting
            .current_bet
            .saturating_sub(table.seats[actor].street_bet);

        // Торговля мертва: ставить больше некому, уравнивать нечего.
        if table.can_act_count() <= 1 && to_call.is_zero() {
            break;
        }

        let snapshot = table.public_snapshot();
        let hole = table.seats[actor]
            .hole_cards
            .ok_or(EngineError::Internal("у актёра нет карманных карт"))?;

        let decision = harnesses[actor].decide(snapshot, hole);
        if let Some(incident) = decision.incident {
            logs.bot_event(&BotEventEntry {
                round: table.round_number,
                street,
                player_index: actor,
                event: incident.as_str(),
            });
        }

        let declared = decision.action;
        let validation = validate_action(&declared, &table.seats[actor], &betting);
        if let Some(reason) = validation.correction {
            logs.illegal_move(&IllegalMoveEntry {
                round: table.round_number,
                hand: table.round_number,
                street,
                player_index: actor,
                declared: ActionTuple {
                    kind: declared.kind(),
                    amount: declared.declared_amount(),
                },
                corrected: ActionTuple {
                    kind: validation.action.kind,
                    amount: validation.action.amount,
                },
                reason,
            });
        }

        apply_validated(table, &mut betting, actor, validation.action);
        table.seats[actor].acted_this_street = true;
        betting.mark_acted(actor);
        table.min_raise = betting.min_raise;

        if table.in_hand_count() <= 1 {
            break;
        }
    }

    Ok(())
}

/// Применить провалидированное действие к столу и состоянию торговли.
fn apply_validated(
    table: &mut Table,
    betting: &mut BettingState,
    actor: PlayerIndex,
    action: ValidatedAction,
) {
    let record_amount = match action.kind {
        RecordedActionKind::Fold => {
            // street_bet сфолдившего остаётся замороженным до сверки банков.
            table.seats[actor].status = SeatStatus::Folded;
            Chips::ZERO
        }

        RecordedActionKind::Check => Chips::ZERO,

        RecordedActionKind::Call => {
            let paid = table.seats[actor].commit(action.amount);
            table.contributions[actor] += paid;
            paid
        }

        RecordedActionKind::Bet => {
            let paid = table.seats[actor].commit(action.amount);
            table.contributions[actor] += paid;
            let new_bet = table.seats[actor].street_bet;
            // Первая ставка улицы: размер рейза = размер ставки.
            reopen_betting(table, betting, actor, new_bet, new_bet);
            action.amount
        }

        RecordedActionKind::Raise => {
            let to_call = betting
                .current_bet
                .saturating_sub(table.seats[actor].street_bet);
            let cost = to_call + action.amount;
            let paid = table.seats[actor].commit(cost);
            table.contributions[actor] += paid;
            let new_bet = table.seats[actor].street_bet;
            reopen_betting(table, betting, actor, new_bet, action.amount);
            action.amount
        }

        RecordedActionKind::AllIn => {
            let stack = table.seats[actor].stack;
            let paid = table.seats[actor].commit(stack);
            table.contributions[actor] += paid;
            let new_bet = table.seats[actor].street_bet;
            let prev_bet = betting.current_bet;

            if new_bet > prev_bet {
                let increment = new_bet - prev_bet;
                if increment >= betting.min_raise {
                    // Олл-ин размером с полный рейз открывает торговлю заново.
                    reopen_betting(table, betting, actor, new_bet, increment);
                } else {
                    // Короткий олл-ин: уже ходившие теряют право на рейз,
                    // неуравненные обязаны доплатить или сфолдить.
                    close_raise_rights(table, actor);
                    let unmatched = unmatched_active_after(table, actor, new_bet);
                    betting.on_short_all_in(new_bet, unmatched);
                }
            }
            paid
        }

        // Блайнды валидатор не возвращает, их постит сам движок.
        RecordedActionKind::SmallBlind | RecordedActionKind::BigBlind => action.amount,
    };

    table
        .current_hand
        .street_mut(betting.street)
        .actions
        .push(RecordedAction {
            player_index: actor,
            kind: action.kind,
            amount: record_amount,
        });
}

/// Полный bet/raise: вернуть всем право на рейз и пересобрать очередь —
/// все активные, кроме агрессора, начиная со следующего за ним.
fn reopen_betting(
    table: &mut Table,
    betting: &mut BettingState,
    raiser: PlayerIndex,
    new_bet: Chips,
    raise_size: Chips,
) {
    for seat in table.seats.iter_mut() {
        if seat.can_act() {
            seat.can_raise = true;
        }
    }
    let n = table.num_players();
    let queue: Vec<PlayerIndex> = active_from(table, (raiser + 1) % n)
        .into_iter()
        .filter(|&p| p != raiser)
        .collect();
    betting.on_full_raise(raiser, new_bet, raise_size, queue);
}

/// Закрыть право на рейз всем активным, кто уже ходил на этой улице.
fn close_raise_rights(table: &mut Table, except: PlayerIndex) {
    for (idx, seat) in table.seats.iter_mut().enumerate() {
        if idx != except && seat.can_act() && seat.acted_this_street {
            seat.can_raise = false;
        }
    }
}

/// Активные игроки после `after`, не уравнявшие ставку `target`.
fn unmatched_active_after(table: &Table, after: PlayerIndex, target: Chips) -> Vec<PlayerIndex> {
    let n = table.num_players();
    active_from(table, (after + 1) % n)
        .into_iter()
        .filter(|&p| p != after && table.seats[p].street_bet < target)
        .collect()
}

/// Раздача закончилась фолдами: единственный оставшийся забирает всё.
/// Оставшийся борд не открывается.
fn finish_uncontested(table: &mut Table, final_street: Street) -> Result<HandOutcome, EngineError> {
    let winner = table
        .seats
        .iter()
        .position(|s| s.is_in_hand())
        .ok_or(EngineError::Internal("в раздаче не осталось ни одного игрока"))?;

    let pots = std::mem::take(&mut table.pots);
    let total: Chips = pots.iter().map(|p| p.amount).sum();
    table.seats[winner].stack += total;

    let mut winners = BTreeMap::new();
    winners.insert(
        winner,
        WinnerEntry {
            hand_name: "uncontested".to_string(),
            chips_won: total,
        },
    );

    Ok(HandOutcome {
        winners,
        eligible_for_showdown: Vec::new(),
        showdown: false,
        showdown_details: None,
        eliminated: Vec::new(),
        final_street,
        total_pot: total,
    })
}

/// Шоудаун: вскрыть карты всех дошедших, раздать банки по порядку.
fn run_showdown(table: &mut Table) -> Result<HandOutcome, EngineError> {
    let n = table.num_players();
    let order = non_busted_from(table, (table.button + 1) % n);
    let eligible_for_showdown: Vec<PlayerIndex> = order
        .into_iter()
        .filter(|&i| table.seats[i].is_in_hand())
        .collect();

    // Вскрываются ВСЕ дошедшие, не только победители.
    let mut details = ShowdownDetails {
        players: eligible_for_showdown.clone(),
        hands: BTreeMap::new(),
        hole_cards: BTreeMap::new(),
    };

    let hole_cards: Vec<Option<[crate::domain::card::Card; 2]>> =
        table.seats.iter().map(|s| s.hole_cards).collect();

    for &idx in &eligible_for_showdown {
        let hole = hole_cards[idx]
            .ok_or(EngineError::Internal("на шоудауне нет карманных карт"))?;
        let rank = evaluate_best_hand(&hole, &table.board);
        details.hands.insert(idx, rank.name().to_string());
        details.hole_cards.insert(idx, hole);
    }

    let pots = std::mem::take(&mut table.pots);
    let total: Chips = pots.iter().map(|p| p.amount).sum();
    let mut winners_map: BTreeMap<PlayerIndex, WinnerEntry> = BTreeMap::new();

    for pot in &pots {
        if pot.eligible.is_empty() {
            return Err(EngineError::EmptyPotEligibility {
                round: table.round_number,
            });
        }

        let winners = determine_winners(&hole_cards, &table.board, &pot.eligible);
        if winners.is_empty() {
            return Err(EngineError::EmptyPotEligibility {
                round: table.round_number,
            });
        }

        let (share, remainder) = pot.amount.split(winners.len());

        for (k, &w) in winners.iter().enumerate() {
            // Нечётная фишка — первому победителю по часовой от кнопки.
            let prize = if k == 0 { share + remainder } else { share };
            table.seats[w].stack += prize;

            let hand_name = details
                .hands
                .get(&w)
                .cloned()
                .unwrap_or_else(|| "high_card".to_string());
            winners_map
                .entry(w)
                .and_modify(|e| e.chips_won += prize)
                .or_insert(WinnerEntry {
                    hand_name,
                    chips_won: prize,
                });
        }
    }

    table.current_hand.showdown_details = Some(details.clone());

    Ok(HandOutcome {
        winners: winners_map,
        eligible_for_showdown,
        showdown: true,
        showdown_details: Some(details),
        eliminated: Vec::new(),
        final_street: Street::Showdown,
        total_pot: total,
    })
}

/// FINALIZE: проверка сохранения фишек, вылеты, кнопка, блайнды.
fn finalize_hand(table: &mut Table, mut outcome: HandOutcome) -> Result<HandOutcome, EngineError> {
    // Между раздачами все фишки обязаны лежать в стеках.
    let actual: Chips = table.seats.iter().map(|s| s.stack).sum();
    if actual != table.expected_total {
        return Err(EngineError::ChipConservation {
            expected: table.expected_total,
            actual,
            round: table.round_number,
        });
    }

    for (idx, seat) in table.seats.iter_mut().enumerate() {
        if seat.status != SeatStatus::Busted && seat.stack.is_zero() {
            seat.status = SeatStatus::Busted;
            outcome.eliminated.push(idx);
        }
    }

    if let Some(next_button) = next_non_busted(table, table.button) {
        table.button = next_button;
    }
    table.round_number += 1;
    if let Some(blinds) = table.blinds_schedule.blinds_for_round(table.round_number) {
        table.blinds = blinds;
    }

    Ok(outcome)
}
