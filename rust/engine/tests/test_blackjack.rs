use croupier_engine::blackjack::{settle_hand, BlackjackHand, HandStatus};
use croupier_engine::errors::ActionError;
use croupier_engine::game::{Game, GameState, Variant};
use croupier_engine::player::{Outcome, PlayerId};
use croupier_engine::rules::Action;

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

fn hand(s: &str) -> BlackjackHand {
    BlackjackHand::from_cards(s.split_whitespace().map(|c| c.parse().unwrap()).collect())
}

fn started(seed: u64, seats: &[PlayerId]) -> Game {
    let mut game = Game::with_seed(Variant::Blackjack { decks: 1 }, 1, 7, seed);
    for &id in seats {
        game.add_player(id, 10).unwrap();
    }
    game.start().unwrap();
    game
}

fn run_dealer(game: &mut Game) {
    while let Some(step) = game.next_dealer_action() {
        step.run(game).expect("dealer step");
    }
}

#[test]
fn hand_values() {
    let soft = hand("AH 6D");
    assert_eq!(soft.value(), 17);
    assert!(soft.is_soft_17());

    let natural = hand("AS KD");
    assert_eq!(natural.value(), 21);
    assert!(natural.is_blackjack());

    let bust = hand("KH QC 5D");
    assert_eq!(bust.value(), 25);
    assert!(bust.is_busted());
    assert!(!hand("7H 7C 7D").is_blackjack());
}

#[test]
fn settlement_precedence() {
    let dealer_bust = hand("KH 6C 9D");
    let dealer_20 = hand("KH QD");
    let dealer_natural = hand("AH QD");

    assert_eq!(settle_hand(&hand("AS KD"), HandStatus::Blackjack, &dealer_natural), Outcome::Won);
    assert_eq!(settle_hand(&hand("KS QS 5C"), HandStatus::Busted, &dealer_bust), Outcome::Lost);
    assert_eq!(settle_hand(&hand("10S 2C"), HandStatus::Stood, &dealer_bust), Outcome::Won);
    assert_eq!(settle_hand(&hand("10S 9C"), HandStatus::Stood, &dealer_20), Outcome::Lost);
    assert_eq!(settle_hand(&hand("10S QC"), HandStatus::Stood, &dealer_20), Outcome::Tie);
    assert_eq!(settle_hand(&hand("10S 5C 6D"), HandStatus::Stood, &dealer_20), Outcome::Won);
    assert!(HandStatus::DoubledDown.is_terminal());
    assert!(!HandStatus::Playing.is_terminal());
}

#[test]
fn stand_then_dealer_completes_with_even_money() {
    for seed in 0..40 {
        let mut game = started(seed, &[P1]);
        if game.can_act(P1) {
            assert!(game.next_dealer_action().is_none(), "dealer waits for players");
            assert!(game.public_view(P1).contains("??"), "hole card hidden");
            game.apply_action(P1, Action::Stand).unwrap();
        }
        run_dealer(&mut game);
        assert_eq!(game.state(), GameState::Complete, "seed {}", seed);
        let payout = game.payout(P1, game.total_pot()).unwrap();
        assert!([-10, 0, 10].contains(&payout), "seed {} payout {}", seed, payout);
        assert!(!game.public_view(P1).contains("??"));
    }
}

#[test]
fn double_down_doubles_wager_and_ends_turn() {
    let mut tried = 0;
    for seed in 0..40 {
        let mut game = started(seed, &[P1]);
        if !game.can_act(P1) {
            continue;
        }
        tried += 1;
        game.apply_action(P1, Action::DoubleDown).unwrap();
        assert_eq!(game.player(P1).unwrap().wager(), 20);
        assert!(!game.can_act(P1));
        run_dealer(&mut game);
        let payout = game.payout(P1, game.total_pot()).unwrap();
        assert!([-20, 0, 20].contains(&payout));
    }
    assert!(tried > 0);
}

#[test]
fn double_down_after_a_hit_is_illegal() {
    let mut tried = 0;
    for seed in 0..80 {
        let mut game = started(seed, &[P1]);
        if !game.can_act(P1) {
            continue;
        }
        game.apply_action(P1, Action::Hit).unwrap();
        if !game.can_act(P1) {
            continue;
        }
        tried += 1;
        let err = game.apply_action(P1, Action::DoubleDown).unwrap_err();
        assert!(matches!(err, ActionError::IllegalAction(_)));
        assert_eq!(game.player(P1).unwrap().wager(), 10);
    }
    assert!(tried > 0);
}

#[test]
fn turn_goes_to_the_seat_with_fewest_actions() {
    let mut checked = 0;
    for seed in 0..60 {
        let mut game = started(seed, &[P1, P2]);
        if playing_seats(&game) != 2 {
            continue;
        }
        assert_eq!(game.current_player(), Some(P1));
        assert_eq!(
            game.apply_action(P2, Action::Stand),
            Err(ActionError::NotPlayersTurn(P2))
        );
        game.apply_action(P1, Action::Hit).unwrap();
        if playing_seats(&game) != 2 {
            continue;
        }
        // P1 could still act, but P2 has taken fewer actions
        assert_eq!(game.current_player(), Some(P2));
        assert!(!game.can_act(P1));
        game.apply_action(P2, Action::Hit).unwrap();
        if playing_seats(&game) == 2 {
            assert_eq!(game.current_player(), Some(P1));
        }
        checked += 1;
    }
    assert!(checked > 0);
}

fn playing_seats(game: &Game) -> usize {
    game.public_view(P1).matches("[Playing]").count()
}

#[test]
fn blackjack_actions_only() {
    for seed in 0..20 {
        let mut game = started(seed, &[P1]);
        if game.can_act(P1) {
            let err = game.apply_action(P1, Action::Pull).unwrap_err();
            assert!(matches!(err, ActionError::IllegalAction(_)));
            return;
        }
    }
    panic!("no playable seed");
}

#[test]
fn bots_and_dealer_finish_the_table() {
    for seed in 0..20 {
        let mut game = Game::with_seed(Variant::Blackjack { decks: 2 }, 1, 7, seed);
        for id in 1..=5 {
            game.add_bot(PlayerId(id), 25).unwrap();
        }
        game.start().unwrap();
        while let Some(step) = game.next_ai_action().or_else(|| game.next_dealer_action()) {
            step.run(&mut game).unwrap();
        }
        assert!(game.is_complete(), "seed {}", seed);
        for p in game.players() {
            assert_ne!(p.outcome(), Outcome::NoResult);
            // bot policy never doubles
            assert!(!p.actions().contains(&Action::DoubleDown));
        }
    }
}

#[test]
fn hitting_every_seat_to_the_end_terminates() {
    let mut game = Game::with_seed(Variant::Blackjack { decks: 1 }, 1, 7, 9);
    for id in 1..=7 {
        game.add_player(PlayerId(id), 1).unwrap();
    }
    game.start().unwrap();
    let mut guard = 0;
    while let Some(p) = game.current_player() {
        game.apply_action(p, Action::Hit).unwrap();
        guard += 1;
        assert!(guard < 200, "hits must terminate");
    }
    run_dealer(&mut game);
    assert!(game.is_complete());
}
