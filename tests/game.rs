//! Table integration tests.

use bjchat::{
    Action, ActionAvailability, ActionError, Card, DealerStep, Hand, Outcome, Owner, RoundState,
    Shoe, Suit, Table, TableEvent, TableOptions, values,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// A table that deals `draws` in order: player, dealer, player, dealer, ...
fn table_dealing(draws: &[Card]) -> Table {
    Table::with_shoe(TableOptions::default(), Shoe::from_cards(draws))
}

fn ranks(ranks: &[u8]) -> Vec<Card> {
    ranks.iter().map(|&rank| card(Suit::Spades, rank)).collect()
}

#[test]
fn hand_values_follow_soft_ace_rule() {
    assert_eq!(values(&[]), (0, 0));
    assert_eq!(values(&ranks(&[1, 13])), (11, 21));
    assert_eq!(values(&ranks(&[1, 1, 9])), (11, 21));
    assert_eq!(values(&ranks(&[10, 9, 5])), (24, 24));
    assert_eq!(values(&ranks(&[1, 6, 10])), (17, 17));
    assert_eq!(values(&ranks(&[11, 12, 13])), (30, 30));

    let empty = Hand::new(Owner::Player);
    assert!(!empty.is_blackjack());
    assert!(!empty.is_bust());
    assert_eq!(empty.best_value(), 0);

    let natural = Hand::with_cards(Owner::Player, &ranks(&[1, 13]));
    assert!(natural.is_blackjack());
    assert!(natural.is_soft());
    assert_eq!(natural.best_value(), 21);

    let three_card_21 = Hand::with_cards(Owner::Player, &ranks(&[7, 7, 7]));
    assert!(!three_card_21.is_blackjack());
    assert_eq!(three_card_21.best_value(), 21);

    let bust = Hand::with_cards(Owner::Dealer, &ranks(&[10, 9, 5]));
    assert!(bust.is_bust());
    assert_eq!(bust.best_value(), 24);
}

#[test]
fn low_and_high_differ_by_zero_or_ten() {
    for a in 1..=13 {
        for b in 1..=13 {
            for c in 0..=13 {
                let mut cards = ranks(&[a, b]);
                if c > 0 {
                    cards.push(card(Suit::Hearts, c));
                }
                let (low, high) = values(&cards);
                assert!(low <= high, "{cards:?}");
                assert!(high - low == 0 || high - low == 10, "{cards:?}");
                assert!(high <= 21 || high == low, "{cards:?}");
            }
        }
    }
}

#[test]
fn seeded_round_dealer_draws_to_twenty() {
    // Player 2, 3; dealer 9, 6; player hits a king; dealer draws a five.
    let mut table = table_dealing(&[
        card(Suit::Hearts, 2),  // player
        card(Suit::Clubs, 9),   // dealer up
        card(Suit::Hearts, 3),  // player
        card(Suit::Spades, 6),  // dealer hole
        card(Suit::Hearts, 13), // player hit
        card(Suit::Clubs, 5),   // dealer draw
    ]);

    table.apply(Action::Deal).unwrap();
    assert_eq!(table.state(), RoundState::PlayerTurn);
    assert_eq!(table.player_hand().values(), (5, 5));
    assert_eq!(table.dealer_hand().values(), (15, 15));

    let view = table.view();
    assert_eq!(view.dealer_totals, None);
    assert!(view.dealer_cards[0].visible);
    assert!(!view.dealer_cards[1].visible);
    assert_eq!(view.status, "Dealing new hand...");

    let drawn = table.hit().unwrap();
    assert_eq!(drawn.rank, 13);
    assert_eq!(table.player_hand().values(), (15, 15));
    assert_eq!(table.view().status, "Player drew: K♥");

    table.apply(Action::Stand).unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert!(table.is_hole_revealed());
    assert_eq!(table.view().dealer_totals, Some((15, 15)));

    let step = table.advance_dealer_turn().unwrap();
    assert_eq!(step, DealerStep::Drew(card(Suit::Clubs, 5)));
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert_eq!(table.dealer_hand().values(), (20, 20));
    assert_eq!(table.view().status, "Dealer drew: 5♣");

    let step = table.advance_dealer_turn().unwrap();
    assert_eq!(step, DealerStep::Finished(Outcome::DealerWins));
    assert_eq!(table.state(), RoundState::RoundOver);

    let view = table.view();
    assert_eq!(view.outcome, Some("Dealer wins!"));
    assert_eq!(view.status, "Dealer wins!");
}

#[test]
fn hit_after_round_over_is_rejected_without_mutation() {
    let mut table = table_dealing(&ranks(&[10, 9, 9, 8, 5, 4]));
    table.deal().unwrap();
    table.stand().unwrap();
    table.finish_dealer_turn().unwrap();
    assert_eq!(table.state(), RoundState::RoundOver);

    let before = table.player_hand().clone();
    let remaining = table.cards_remaining();

    assert_eq!(
        table.hit().unwrap_err(),
        ActionError::InvalidAction {
            action: Action::Hit,
            state: RoundState::RoundOver,
        }
    );
    assert_eq!(table.player_hand(), &before);
    assert_eq!(table.cards_remaining(), remaining);
}

#[test]
fn actions_out_of_turn_are_rejected() {
    let mut table = table_dealing(&ranks(&[10, 10, 6, 6, 2, 3]));

    assert!(matches!(
        table.apply(Action::Hit),
        Err(ActionError::InvalidAction { state: RoundState::AwaitingDeal, .. })
    ));
    assert!(matches!(
        table.apply(Action::Stand),
        Err(ActionError::InvalidAction { state: RoundState::AwaitingDeal, .. })
    ));
    assert_eq!(
        table.advance_dealer_turn().unwrap_err(),
        ActionError::NotDealerTurn {
            state: RoundState::AwaitingDeal
        }
    );

    table.deal().unwrap();
    assert!(matches!(
        table.apply(Action::Deal),
        Err(ActionError::InvalidAction { state: RoundState::PlayerTurn, .. })
    ));

    table.stand().unwrap();
    let dealer_before = table.dealer_hand().clone();
    assert!(matches!(
        table.apply(Action::Hit),
        Err(ActionError::InvalidAction { state: RoundState::DealerTurn, .. })
    ));
    assert!(matches!(
        table.apply(Action::Deal),
        Err(ActionError::InvalidAction { state: RoundState::DealerTurn, .. })
    ));
    assert_eq!(table.dealer_hand(), &dealer_before);
    assert_eq!(table.player_hand().len(), 2);
}

#[test]
fn player_blackjack_wins_without_dealer_play() {
    let mut table = table_dealing(&[
        card(Suit::Hearts, 1),
        card(Suit::Clubs, 9),
        card(Suit::Hearts, 13),
        card(Suit::Clubs, 7),
        card(Suit::Clubs, 5),
    ]);

    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(table.outcome(), Some(Outcome::PlayerBlackjack));
    assert!(table.is_hole_revealed());
    assert_eq!(table.dealer_hand().len(), 2);
    assert_eq!(table.cards_remaining(), 1);
    assert_eq!(
        table.view().outcome,
        Some("Blackjack! Player wins immediately.")
    );
}

#[test]
fn double_blackjack_pays_player_unless_push_rule_enabled() {
    let draws = ranks(&[1, 1, 12, 13]);

    let mut table = table_dealing(&draws);
    table.deal().unwrap();
    assert_eq!(table.outcome(), Some(Outcome::PlayerBlackjack));

    let options = TableOptions::default().with_push_on_double_blackjack(true);
    let mut table = Table::with_shoe(options, Shoe::from_cards(&draws));
    table.deal().unwrap();
    assert_eq!(table.outcome(), Some(Outcome::Push));
}

#[test]
fn player_bust_ends_round_and_reveals_hole_card() {
    let mut table = table_dealing(&ranks(&[10, 9, 6, 7, 8, 2]));
    table.deal().unwrap();

    table.hit().unwrap();
    assert_eq!(table.player_hand().values(), (24, 24));
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(table.outcome(), Some(Outcome::PlayerBust));
    assert!(table.is_hole_revealed());
    assert_eq!(table.dealer_hand().len(), 2);
    assert_eq!(table.view().outcome, Some("Player busts! Dealer wins."));
    assert_eq!(table.available_actions(), ActionAvailability {
        deal: true,
        hit: false,
        stand: false,
    });
}

#[test]
fn dealer_bust_pays_player() {
    let mut table = table_dealing(&ranks(&[10, 10, 8, 6, 13]));
    table.deal().unwrap();
    table.stand().unwrap();

    let (drawn, outcome) = table.finish_dealer_turn().unwrap();
    assert_eq!(drawn, ranks(&[13]));
    assert_eq!(outcome, Outcome::DealerBust);
    assert_eq!(table.view().outcome, Some("Dealer busts! Player wins!"));
}

#[test]
fn equal_totals_push() {
    let mut table = table_dealing(&ranks(&[10, 10, 8, 8]));
    table.deal().unwrap();
    table.stand().unwrap();

    assert_eq!(
        table.advance_dealer_turn().unwrap(),
        DealerStep::Finished(Outcome::Push)
    );
    assert_eq!(table.view().outcome, Some("It's a tie!"));
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let mut table = table_dealing(&ranks(&[10, 1, 9, 6, 5]));
    table.deal().unwrap();
    table.stand().unwrap();
    assert!(!table.dealer_must_draw());

    let (drawn, outcome) = table.finish_dealer_turn().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(outcome, Outcome::PlayerWins);
    assert_eq!(table.view().outcome, Some("Player wins!"));
}

#[test]
fn dealer_keeps_drawing_when_ace_can_no_longer_be_soft() {
    // Dealer A,5 (soft 16) draws a ten to hard 16, then a five to 21.
    let mut table = table_dealing(&ranks(&[10, 1, 13, 5, 10, 5]));
    table.deal().unwrap();
    table.stand().unwrap();

    let (drawn, outcome) = table.finish_dealer_turn().unwrap();
    assert_eq!(drawn, ranks(&[10, 5]));
    assert_eq!(table.dealer_hand().best_value(), 21);
    assert_eq!(outcome, Outcome::DealerWins);
}

#[test]
fn outcome_compares_best_values() {
    let player = Hand::with_cards(Owner::Player, &ranks(&[1, 7]));
    let dealer = Hand::with_cards(Owner::Dealer, &ranks(&[10, 7]));
    assert_eq!(Outcome::compare(&player, &dealer), Outcome::PlayerWins);

    let busted = Hand::with_cards(Owner::Player, &ranks(&[10, 10, 5]));
    let dealer_bust = Hand::with_cards(Owner::Dealer, &ranks(&[10, 6, 9]));
    assert_eq!(Outcome::compare(&busted, &dealer_bust), Outcome::PlayerBust);
    assert!(!Outcome::PlayerBust.player_won());
    assert!(Outcome::DealerBust.player_won());
}

#[test]
fn deal_with_short_shoe_leaves_table_untouched() {
    let mut table = table_dealing(&ranks(&[10, 9, 8]));
    assert_eq!(table.deal().unwrap_err(), ActionError::EmptyShoe);
    assert_eq!(table.state(), RoundState::AwaitingDeal);
    assert!(table.player_hand().is_empty());
    assert_eq!(table.cards_remaining(), 3);
}

#[test]
fn empty_shoe_on_hit_voids_the_round() {
    let mut table = table_dealing(&ranks(&[5, 9, 6, 7]));
    table.deal().unwrap();

    assert_eq!(table.hit().unwrap_err(), ActionError::EmptyShoe);
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(table.outcome(), None);
    assert_eq!(table.player_hand().len(), 2);
    assert_eq!(table.last_event(), Some(TableEvent::ShoeExhausted));
    assert!(table.hit().is_err());
}

#[test]
fn empty_shoe_on_dealer_step_voids_the_round() {
    let mut table = table_dealing(&ranks(&[10, 10, 6, 6]));
    table.deal().unwrap();
    table.stand().unwrap();

    assert_eq!(table.advance_dealer_turn().unwrap_err(), ActionError::EmptyShoe);
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(table.outcome(), None);
    assert_eq!(table.view().status, "The shoe is empty. Round void.");
}

#[test]
fn views_do_not_change_state() {
    let mut table = table_dealing(&ranks(&[4, 9, 5, 6, 2, 3]));
    table.deal().unwrap();

    let first = table.view();
    let second = table.view();
    assert_eq!(first, second);
    assert_eq!(table.player_hand().values(), table.player_hand().values());
    assert_eq!(table.cards_remaining(), 2);
    assert_eq!(table.state(), RoundState::PlayerTurn);
}

#[test]
fn action_availability_tracks_state() {
    let mut table = table_dealing(&ranks(&[10, 10, 8, 6, 13]));
    assert_eq!(table.view().status, bjchat::view::WELCOME);
    assert!(table.available_actions().deal);

    table.deal().unwrap();
    let actions = table.available_actions();
    assert!(!actions.deal && actions.hit && actions.stand);

    table.stand().unwrap();
    assert_eq!(table.available_actions(), ActionAvailability::default());
    assert_eq!(table.view().status, "Player stands");

    table.finish_dealer_turn().unwrap();
    assert!(table.available_actions().deal);
}

#[test]
fn next_deal_starts_a_fresh_round() {
    let mut table = table_dealing(&ranks(&[10, 10, 8, 8, 2, 3, 4, 5]));
    table.deal().unwrap();
    table.stand().unwrap();
    table.finish_dealer_turn().unwrap();

    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::PlayerTurn);
    assert_eq!(table.player_hand().cards(), ranks(&[2, 4]).as_slice());
    assert_eq!(table.dealer_hand().cards(), ranks(&[3, 5]).as_slice());
    assert!(!table.is_hole_revealed());
    assert_eq!(table.outcome(), None);
}

#[test]
fn abandon_round_discards_partial_hands() {
    let mut table = table_dealing(&ranks(&[10, 2, 8, 3, 4, 5]));
    table.deal().unwrap();
    table.stand().unwrap();
    table.advance_dealer_turn().unwrap();

    table.abandon_round();
    assert_eq!(table.state(), RoundState::AwaitingDeal);
    assert!(table.dealer_hand().is_empty());
    assert!(table.player_hand().is_empty());
    assert_eq!(table.view().status, bjchat::view::WELCOME);
}

#[test]
fn shoe_is_rebuilt_after_break_marker() {
    let options = TableOptions::default().with_decks(1).with_cut_depth(40, 40);
    let mut table = Table::new(options, 9);

    while !table.shoe.needs_reshuffle() {
        table.shoe.draw().unwrap();
    }
    assert_eq!(table.cards_remaining(), 39);

    table.deal().unwrap();
    assert_eq!(table.cards_remaining(), 48);
    assert!(!table.shoe.needs_reshuffle());
}

#[test]
fn break_marker_is_ignored_when_reshuffle_disabled() {
    let options = TableOptions::default()
        .with_decks(1)
        .with_cut_depth(40, 40)
        .with_reshuffle_at_break(false);
    let mut table = Table::new(options, 9);

    while !table.shoe.needs_reshuffle() {
        table.shoe.draw().unwrap();
    }

    table.deal().unwrap();
    assert_eq!(table.cards_remaining(), 35);
}

#[test]
fn reshuffle_rejected_mid_round() {
    let mut table = table_dealing(&ranks(&[10, 10, 6, 6, 2]));
    table.deal().unwrap();
    assert!(table.reshuffle().is_err());
    assert_eq!(table.cards_remaining(), 1);
}

#[test]
fn error_messages_name_action_and_state() {
    let err = ActionError::InvalidAction {
        action: Action::Hit,
        state: RoundState::RoundOver,
    };
    assert_eq!(err.to_string(), "cannot hit while the round is over");
    assert_eq!(ActionError::EmptyShoe.to_string(), "no cards left in the shoe");
}
