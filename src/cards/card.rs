//! Card entity - a card as it appears on the table.
//!
//! A `Card` combines immutable `CardData` with its on-screen state:
//! transform, face, open/closed flags, displayed stats and the active
//! visual state. Every motion goes through the visual state machine:
//!
//! - A move request while not `Moving` installs a fresh `Moving` state
//! - A move request while `Moving` is appended to the running queue
//! - `pre_update` advances the queue and runs completion callbacks
//!
//! ## Flipping
//!
//! `flip` issues a close and an open back to back without waiting for
//! the close to finish. Both land in the same queue, so they play one
//! after the other; the face texture swaps when the close completes,
//! while the card is edge-on.

use std::rc::Rc;

use smallvec::smallvec;
use tracing::{debug, trace, warn};

use super::color::CardColor;
use super::data::{CardData, CardId, CardType};
use super::display::StatDisplay;
use super::error::CardError;
use super::state::{MoveBatch, StateChange, StatUpdate, VisualState};
use super::stats::{CardStats, StatKey};
use crate::animation::{Easing, Move, MoveQueue, OnComplete, Step, Transform};
use crate::core::config::CardConfig;
use crate::render::{Rect, RenderSurface, Rgb};

/// A card on the table.
pub struct Card {
    data: Rc<CardData>,
    card_type: CardType,
    color: CardColor,
    config: CardConfig,
    transform: Transform,
    face_up: bool,
    closed: bool,
    disabled: bool,
    stats: CardStats,
    display: StatDisplay,
    state: VisualState,
}

impl Card {
    /// Build a card from catalog data.
    ///
    /// The card starts at the origin, face down, open and `Static`.
    ///
    /// ## Errors
    ///
    /// - `UnknownColor` if the color is not one of the six card colors
    /// - `UnknownCardType` if the type id is neither `battle` nor `power`
    /// - `MissingStat` if a battle card lacks attack or health
    pub fn create(data: Rc<CardData>, config: &CardConfig) -> Result<Self, CardError> {
        let color: CardColor = data.color.parse()?;
        let card_type: CardType = data.type_id.parse()?;
        let stats = CardStats::from_data(&data);
        let display = StatDisplay::for_card(card_type, &stats, config)?;

        let mut card = Self {
            data,
            card_type,
            color,
            config: config.clone(),
            transform: Transform::default(),
            face_up: false,
            closed: false,
            disabled: false,
            stats,
            display,
            state: VisualState::Static,
        };
        card.change_state(StateChange::Static);
        Ok(card)
    }

    // === Identity ===

    /// Get the catalog ID.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.data.id
    }

    /// Get the shared card content.
    #[must_use]
    pub fn data(&self) -> &CardData {
        &self.data
    }

    /// Get the parsed card type.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Get the parsed card color.
    #[must_use]
    pub fn color(&self) -> CardColor {
        self.color
    }

    /// Background fill resolved from the card color.
    #[must_use]
    pub fn background(&self) -> Rgb {
        self.color.background()
    }

    // === Presentation state ===

    /// Get the current position and horizontal scale.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Get the current x position.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.transform.x
    }

    /// Get the current y position.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.transform.y
    }

    /// Get the card width in logical units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.config.width
    }

    /// Get the card height in logical units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Check if the card image is showing.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Check if the card is folded edge-on.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check if the card is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the card.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Texture currently shown: the card image when face up, the card
    /// back otherwise.
    #[must_use]
    pub fn texture(&self) -> &str {
        if self.face_up {
            &self.data.image_name
        } else {
            &self.config.back_texture
        }
    }

    /// Get the displayed stats.
    #[must_use]
    pub fn stats(&self) -> &CardStats {
        &self.stats
    }

    /// Current value of a displayed stat.
    pub fn stat(&self, key: StatKey) -> Result<i32, CardError> {
        self.stats.require(key)
    }

    /// Get the stat label text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display.text
    }

    // === Visual state machine ===

    /// Get the active visual state.
    #[must_use]
    pub fn visual_state(&self) -> &VisualState {
        &self.state
    }

    /// Number of move segments still to play.
    #[must_use]
    pub fn pending_moves(&self) -> usize {
        self.state.pending_moves()
    }

    /// Whether any move is queued or playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pending_moves() > 0
    }

    /// Replace the active visual state and run the new state's creation
    /// routine.
    ///
    /// The old state is dropped without a teardown hook; moves still
    /// queued in a replaced `Moving` state never play and their callbacks
    /// never run.
    pub fn change_state(&mut self, change: StateChange) {
        let from = self.state.kind();
        let dropped = self.state.pending_moves();
        if dropped > 0 {
            warn!(card = %self.id(), dropped, to = %change.kind(), "replacing moving state with queued moves");
        }
        debug!(card = %self.id(), %from, to = %change.kind(), "visual state change");

        match change {
            StateChange::Static => {
                self.state = VisualState::Static;
            }
            StateChange::Moving { moves, duration } => {
                let mut queue = MoveQueue::new();
                queue.append(moves, duration);
                self.state = VisualState::Moving(queue);
            }
            StateChange::Updating(update) => {
                self.state = VisualState::Updating(update);
                self.stats.set(StatKey::Ap, update.ap);
                self.display.set_stats(self.card_type, update.ap, update.hp);
            }
        }
    }

    /// Per-tick hook. Advances the active state by `delta` milliseconds.
    ///
    /// Only `Moving` does work here: it plays queued segments, carrying
    /// leftover time into the next one, and runs each segment's callback
    /// as it completes. Callbacks may queue further moves or change state.
    pub fn pre_update(&mut self, delta: u32) {
        let mut budget = delta;
        loop {
            let VisualState::Moving(queue) = &mut self.state else {
                return;
            };
            match queue.advance(self.transform, &mut budget) {
                Step::Idle => return,
                Step::Playing(transform) => {
                    self.transform = transform;
                    return;
                }
                Step::Completed { transform, callback } => {
                    self.transform = transform;
                    trace!(card = %self.id(), x = transform.x, y = transform.y, "move segment completed");
                    if let Some(callback) = callback {
                        callback(self);
                    }
                }
            }
        }
    }

    /// Request moves, merging into the running queue when already moving.
    ///
    /// Moves without their own duration take `duration`.
    pub fn animate<I>(&mut self, moves: I, duration: u32)
    where
        I: IntoIterator<Item = Move<Card>>,
    {
        if let VisualState::Moving(queue) = &mut self.state {
            let appended = queue.append(moves, duration);
            let pending = queue.len();
            trace!(card = %self.data.id, appended, pending, "merged moves into running queue");
            return;
        }
        self.change_state(StateChange::Moving {
            moves: moves.into_iter().collect::<MoveBatch>(),
            duration,
        });
    }

    // === Card operations ===

    /// Jump to `(x, y)`.
    pub fn move_position(&mut self, x: f32, y: f32) {
        self.animate([Move::to(x, y)], 0);
    }

    /// Snap to `(x_from, y_from)`, then travel to `(x_to, y_to)` over
    /// `duration` milliseconds.
    pub fn move_from_to(&mut self, x_from: f32, y_from: f32, x_to: f32, y_to: f32, duration: u32) {
        let moves: MoveBatch = smallvec![
            Move::to(x_from, y_from).with_duration(0),
            Move::to(x_to, y_to).with_duration(duration),
        ];
        self.animate(moves, duration);
    }

    /// Unfold a closed card to full width.
    ///
    /// Returns `false` without queuing anything if the card is already open.
    pub fn open(&mut self) -> bool {
        self.open_inner(None)
    }

    /// Like [`Card::open`], running `on_opened` once the card is open.
    pub fn open_then(&mut self, on_opened: impl FnOnce(&mut Card) + 'static) -> bool {
        let callback: OnComplete<Card> = Box::new(on_opened);
        self.open_inner(Some(callback))
    }

    /// Fold an open card to zero width around its center.
    ///
    /// Returns `false` without queuing anything if the card is already closed.
    pub fn close(&mut self) -> bool {
        self.close_inner(None)
    }

    /// Like [`Card::close`], running `on_closed` once the card is closed.
    pub fn close_then(&mut self, on_closed: impl FnOnce(&mut Card) + 'static) -> bool {
        let callback: OnComplete<Card> = Box::new(on_closed);
        self.close_inner(Some(callback))
    }

    /// Turn the card over.
    ///
    /// Queues a close, which swaps the face texture when it completes,
    /// and immediately an open. Returns `false` if the card is closed.
    pub fn flip(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let swap_face: OnComplete<Card> = Box::new(Card::toggle_image);
        self.queue_close(Some(swap_face));
        self.queue_open(None);
        true
    }

    /// Swap between the card image and the card back.
    pub fn toggle_image(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Show a new attack value alongside the current health.
    ///
    /// Goes through the `Updating` state, which replaces any running
    /// animation.
    pub fn change_ap_display(&mut self, ap: i32) -> Result<(), CardError> {
        let hp = self.stats.require(StatKey::Hp)?;
        self.change_state(StateChange::Updating(StatUpdate { ap, hp }));
        Ok(())
    }

    fn open_inner(&mut self, on_opened: Option<OnComplete<Card>>) -> bool {
        if !self.closed {
            return false;
        }
        self.queue_open(on_opened);
        true
    }

    fn close_inner(&mut self, on_closed: Option<OnComplete<Card>>) -> bool {
        if self.closed {
            return false;
        }
        self.queue_close(on_closed);
        true
    }

    fn queue_open(&mut self, on_opened: Option<OnComplete<Card>>) {
        let opening = Move::new()
            .with_x(self.transform.x)
            .with_scale_x(1.0)
            .with_ease(Easing::Linear)
            .on_complete(move |card: &mut Card| {
                card.closed = false;
                if let Some(callback) = on_opened {
                    callback(card);
                }
            });
        self.animate([opening], self.config.flip_duration);
    }

    fn queue_close(&mut self, on_closed: Option<OnComplete<Card>>) {
        let closing = Move::new()
            .with_x(self.transform.x + self.config.width / 2.0)
            .with_scale_x(0.0)
            .with_ease(Easing::Linear)
            .on_complete(move |card: &mut Card| {
                card.closed = true;
                if let Some(callback) = on_closed {
                    callback(card);
                }
            });
        self.animate([closing], self.config.flip_duration);
    }

    // === Rendering ===

    /// Draw the card: background, fitted image, then the stat label.
    ///
    /// Everything is scaled horizontally by the current `scale_x` about
    /// the card's left edge.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let Transform { x, y, scale_x } = self.transform;
        let (width, height) = (self.config.width, self.config.height);

        surface.fill_rect(Rect::new(x, y, width * scale_x, height), self.background());

        let texture = self.texture();
        match surface.texture_size(texture) {
            Some((tw, th)) if tw > 0.0 && th > 0.0 => {
                let inset = self.config.image_inset;
                let fit = ((width - inset) / tw).min((height - inset) / th);
                let (dw, dh) = (tw * fit, th * fit);
                let rect = Rect::new(
                    x + (width - dw) / 2.0 * scale_x,
                    y + (height - dh) / 2.0,
                    dw * scale_x,
                    dh,
                );
                surface.draw_image(texture, rect);
            }
            _ => warn!(card = %self.id(), texture, "texture not available, skipping card image"),
        }

        surface.draw_text(
            &self.display.text,
            x + self.display.offset_x * scale_x,
            y + self.display.offset_y,
            scale_x,
            &self.config.stat_style,
        );
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.data.id)
            .field("type", &self.card_type)
            .field("color", &self.color)
            .field("transform", &self.transform)
            .field("face_up", &self.face_up)
            .field("closed", &self.closed)
            .field("disabled", &self.disabled)
            .field("display", &self.display.text)
            .field("state", &self.state.kind())
            .finish()
    }
}
