//! Duel board: two sides of cards, life totals and turn bookkeeping.

use tracing::{debug, info, warn};

use crate::animation::Move;
use crate::cards::{Card, CardCatalog, CardId, CardType, CatalogError, StatKey};
use crate::core::{CardConfig, GameRng};
use crate::phases::PhaseRequest;
use crate::render::RenderSurface;

/// Number of players in a duel.
pub const PLAYERS: usize = 2;

/// Horizontal distance between neighbouring card slots.
const SLOT_SPACING: f32 = 110.0;
/// X of the first hand or field slot.
const FIRST_SLOT_X: f32 = 150.0;
/// X of the deck pile.
const DECK_X: f32 = 20.0;

/// Row heights per player: (deck and hand, field).
const ROWS: [(f32, f32); PLAYERS] = [(600.0, 420.0), (20.0, 200.0)];

/// One player's cards and life.
#[derive(Debug, Default)]
pub struct Side {
    /// Top of the deck is the last card.
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
    pub field: Vec<Card>,
    pub life: i32,
}

impl Side {
    fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter().chain(&self.hand).chain(&self.field)
    }

    fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.deck
            .iter_mut()
            .chain(self.hand.iter_mut())
            .chain(self.field.iter_mut())
    }

    /// Total attack of the battle cards on the field.
    #[must_use]
    pub fn field_attack(&self) -> i32 {
        self.field
            .iter()
            .filter_map(|card| card.stat(StatKey::Ap).ok())
            .sum()
    }
}

/// Tunable rules of a duel.
#[derive(Clone, Debug, PartialEq)]
pub struct DuelSettings {
    pub starting_life: i32,
    pub opening_hand: usize,
    pub draw_per_turn: usize,
    /// Travel time of a card between piles, in milliseconds.
    pub deal_duration: u32,
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            starting_life: 20,
            opening_hand: 3,
            draw_per_turn: 1,
            deal_duration: 300,
        }
    }
}

/// State of a duel, shared by all duel phases.
#[derive(Debug)]
pub struct DuelBoard {
    sides: [Side; PLAYERS],
    active: usize,
    turn: u32,
    winner: Option<usize>,
    rng: GameRng,
    settings: DuelSettings,
    history: Vec<PhaseRequest>,
}

/// Builder for creating a DuelBoard.
#[derive(Clone, Debug)]
pub struct DuelBuilder {
    seed: u64,
    settings: DuelSettings,
    card_config: CardConfig,
}

impl Default for DuelBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            settings: DuelSettings::default(),
            card_config: CardConfig::default(),
        }
    }
}

impl DuelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn starting_life(mut self, life: i32) -> Self {
        assert!(life > 0, "Starting life must be positive");
        self.settings.starting_life = life;
        self
    }

    pub fn opening_hand(mut self, size: usize) -> Self {
        self.settings.opening_hand = size;
        self
    }

    pub fn draw_per_turn(mut self, count: usize) -> Self {
        self.settings.draw_per_turn = count;
        self
    }

    pub fn deal_duration(mut self, duration: u32) -> Self {
        self.settings.deal_duration = duration;
        self
    }

    pub fn card_config(mut self, config: CardConfig) -> Self {
        self.card_config = config;
        self
    }

    /// Build the board with each player's deck list, bottom card first.
    ///
    /// Fails if a deck names a card the catalog does not have or whose
    /// content is invalid.
    pub fn build(self, catalog: &CardCatalog, decks: [Vec<CardId>; PLAYERS]) -> Result<DuelBoard, CatalogError> {
        let mut sides: [Side; PLAYERS] = Default::default();

        for (player, (side, list)) in sides.iter_mut().zip(decks).enumerate() {
            side.life = self.settings.starting_life;
            let (deck_x, deck_y) = deck_position(player);
            for id in list {
                let mut card = catalog.create_card(id, &self.card_config)?;
                card.move_position(deck_x, deck_y);
                card.pre_update(0);
                side.deck.push(card);
            }
        }

        let rng = GameRng::new(self.seed);
        let active = rng.for_context("first-player").gen_index(0..PLAYERS);

        Ok(DuelBoard {
            sides,
            active,
            turn: 0,
            winner: None,
            rng,
            settings: self.settings,
            history: Vec::new(),
        })
    }
}

fn deck_position(player: usize) -> (f32, f32) {
    (DECK_X, ROWS[player].0)
}

fn hand_position(player: usize, slot: usize) -> (f32, f32) {
    (FIRST_SLOT_X + slot as f32 * SLOT_SPACING, ROWS[player].0)
}

fn field_position(player: usize, slot: usize) -> (f32, f32) {
    (FIRST_SLOT_X + slot as f32 * SLOT_SPACING, ROWS[player].1)
}

impl DuelBoard {
    // === Queries ===

    #[must_use]
    pub fn active_player(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn opponent(&self) -> usize {
        (self.active + 1) % PLAYERS
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    #[must_use]
    pub fn side(&self, player: usize) -> &Side {
        &self.sides[player]
    }

    #[must_use]
    pub fn settings(&self) -> &DuelSettings {
        &self.settings
    }

    /// Phases entered so far, in order.
    #[must_use]
    pub fn history(&self) -> &[PhaseRequest] {
        &self.history
    }

    /// Whether every card has finished its animations.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.sides
            .iter()
            .flat_map(Side::cards)
            .all(|card| !card.is_animating())
    }

    // === Per-tick ===

    /// Advance every card's animation by `delta` milliseconds.
    pub fn tick(&mut self, delta: u32) {
        for card in self.sides.iter_mut().flat_map(Side::cards_mut) {
            card.pre_update(delta);
        }
    }

    /// Draw the table: decks (top card only), fields, then hands.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        for side in &self.sides {
            if let Some(top) = side.deck.last() {
                top.render(surface);
            }
            for card in side.field.iter().chain(&side.hand) {
                card.render(surface);
            }
        }
    }

    // === Rules ===

    pub(crate) fn record(&mut self, request: &PhaseRequest) {
        self.history.push(request.clone());
    }

    /// Start a new turn. The first turn shuffles both decks and deals the
    /// opening hands.
    pub(crate) fn begin_turn(&mut self) {
        self.turn += 1;
        info!(turn = self.turn, player = self.active, "turn started");
        if self.turn > 1 {
            return;
        }

        for player in 0..PLAYERS {
            let mut shuffler = self.rng.for_context(&format!("deck-{player}"));
            shuffler.shuffle(&mut self.sides[player].deck);
            self.draw(player, self.settings.opening_hand);
        }
    }

    /// Move up to `count` cards from the top of the deck into the hand,
    /// turning them face up on arrival. Returns the number drawn.
    pub(crate) fn draw(&mut self, player: usize, count: usize) -> usize {
        let duration = self.settings.deal_duration;
        let (deck_x, deck_y) = deck_position(player);
        let side = &mut self.sides[player];

        let mut drawn = 0;
        while drawn < count {
            let Some(mut card) = side.deck.pop() else {
                warn!(player, "deck is empty, nothing to draw");
                break;
            };
            let (x, y) = hand_position(player, side.hand.len());
            card.move_from_to(deck_x, deck_y, x, y, duration);
            // Flip once the card has arrived so it turns over in place.
            card.animate([Move::new().on_complete(|card: &mut Card| {
                card.flip();
            })], 0);
            side.hand.push(card);
            drawn += 1;
        }
        debug!(player, drawn, hand = side.hand.len(), "cards drawn");
        drawn
    }

    /// Put the first battle card of the hand onto the field.
    pub(crate) fn summon(&mut self, player: usize) -> Option<CardId> {
        let duration = self.settings.deal_duration;
        let side = &mut self.sides[player];
        let index = side
            .hand
            .iter()
            .position(|card| card.card_type() == CardType::Battle)?;

        let mut card = side.hand.remove(index);
        let (x, y) = field_position(player, side.field.len());
        card.animate([Move::to(x, y)], duration);
        let id = card.id();
        side.field.push(card);
        Self::layout_hand(player, side, duration);

        debug!(player, card = %id, "card summoned");
        Some(id)
    }

    /// Spend the first power card of the hand to raise the attack of every
    /// battle card on the field by one. Returns whether a card was spent.
    pub(crate) fn compile(&mut self, player: usize) -> bool {
        let duration = self.settings.deal_duration;
        let side = &mut self.sides[player];
        let Some(index) = side
            .hand
            .iter()
            .position(|card| card.card_type() == CardType::Power)
        else {
            return false;
        };

        let spent = side.hand.remove(index);
        for card in &mut side.field {
            let boosted = card
                .stat(StatKey::Ap)
                .and_then(|ap| card.change_ap_display(ap + 1));
            if let Err(err) = boosted {
                warn!(player, card = %card.id(), %err, "cannot boost card");
            }
        }
        Self::layout_hand(player, side, duration);

        debug!(player, card = %spent.id(), "power card compiled");
        true
    }

    /// Deal the active field's attack to the opponent.
    pub(crate) fn battle(&mut self) -> i32 {
        let damage = self.sides[self.active].field_attack();
        let opponent = self.opponent();
        let target = &mut self.sides[opponent];
        target.life -= damage;

        info!(attacker = self.active, damage, life = target.life, "battle resolved");
        if target.life <= 0 {
            info!(winner = self.active, "duel won");
            self.winner = Some(self.active);
        }
        damage
    }

    /// Hand the turn to the other player.
    pub(crate) fn pass_turn(&mut self) {
        self.active = self.opponent();
    }

    /// Slide hand cards into consecutive slots after one was removed.
    fn layout_hand(player: usize, side: &mut Side, duration: u32) {
        for (slot, card) in side.hand.iter_mut().enumerate() {
            let (x, y) = hand_position(player, slot);
            if card.x() != x || card.y() != y {
                card.animate([Move::to(x, y)], duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog
            .register(CardData::battle(CardId::new(1), "Knight", "red", 3, 7))
            .unwrap();
        catalog
            .register(CardData::power(CardId::new(2), "Spark", "white"))
            .unwrap();
        catalog
    }

    fn board(decks: [Vec<u32>; PLAYERS]) -> DuelBoard {
        let decks: [Vec<CardId>; PLAYERS] = decks.map(|ids| ids.into_iter().map(CardId::new).collect());
        DuelBuilder::new().seed(3).build(&catalog(), decks).unwrap()
    }

    fn settle(board: &mut DuelBoard) {
        board.tick(10_000);
        assert!(board.is_settled());
    }

    #[test]
    fn test_build_places_decks() {
        let board = board([vec![1, 2, 1], vec![2]]);

        assert_eq!(board.side(0).deck.len(), 3);
        assert_eq!(board.side(1).deck.len(), 1);
        assert_eq!(board.side(0).life, 20);
        assert!(board.is_settled());
        assert_eq!(board.side(0).deck[0].y(), 600.0);
        assert_eq!(board.side(1).deck[0].y(), 20.0);
        assert!(board.active_player() < PLAYERS);
    }

    #[test]
    #[should_panic(expected = "Starting life must be positive")]
    fn test_invalid_starting_life() {
        DuelBuilder::new().starting_life(0);
    }

    #[test]
    fn test_draw_flips_on_arrival() {
        let mut board = board([vec![1, 1], vec![]]);

        assert_eq!(board.draw(0, 1), 1);
        let card = &board.side(0).hand[0];
        assert!(!card.is_face_up());

        settle(&mut board);
        let card = &board.side(0).hand[0];
        assert!(card.is_face_up());
        assert_eq!((card.x(), card.y()), (150.0, 600.0));
    }

    #[test]
    fn test_draw_from_short_deck() {
        let mut board = board([vec![1], vec![]]);
        assert_eq!(board.draw(0, 3), 1);
        assert_eq!(board.draw(1, 3), 0);
    }

    #[test]
    fn test_summon_and_compile() {
        let mut board = board([vec![1, 2, 1], vec![]]);
        board.draw(0, 3);
        settle(&mut board);

        assert_eq!(board.summon(0), Some(CardId::new(1)));
        assert_eq!(board.side(0).field.len(), 1);
        assert_eq!(board.side(0).hand.len(), 2);
        settle(&mut board);
        assert_eq!(board.side(0).field[0].y(), 420.0);

        assert!(board.compile(0));
        assert_eq!(board.side(0).field[0].display_text(), "04/07");
        assert_eq!(board.side(0).field_attack(), 4);
        assert!(!board.compile(0));
    }

    #[test]
    fn test_summon_without_battle_card() {
        let mut board = board([vec![2, 2], vec![]]);
        board.draw(0, 2);
        assert_eq!(board.summon(0), None);
        assert!(board.side(0).field.is_empty());
    }

    #[test]
    fn test_battle_decides_winner() {
        let mut board = DuelBuilder::new()
            .seed(3)
            .starting_life(3)
            .build(&catalog(), [vec![CardId::new(1)], vec![CardId::new(1)]])
            .unwrap();
        let attacker = board.active_player();
        board.draw(attacker, 1);
        settle(&mut board);
        board.summon(attacker);

        assert_eq!(board.battle(), 3);
        assert_eq!(board.side(board.opponent()).life, 0);
        assert_eq!(board.winner(), Some(attacker));
    }

    #[test]
    fn test_pass_turn() {
        let mut board = board([vec![], vec![]]);
        let first = board.active_player();
        board.pass_turn();
        assert_eq!(board.active_player(), (first + 1) % PLAYERS);
        assert_eq!(board.opponent(), first);
    }
}
