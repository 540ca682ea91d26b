//! Animation primitives and the interpolation of a single segment.

use super::easing::Easing;

/// The animated attributes of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    /// Horizontal scale. 1.0 is full width, 0.0 is flattened.
    pub scale_x: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
        }
    }
}

impl Transform {
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self { x, y, scale_x: 1.0 }
    }

    /// Linear blend between `self` and `to`.
    #[must_use]
    pub fn lerp(self, to: Transform, progress: f32) -> Transform {
        let mix = |a: f32, b: f32| a + (b - a) * progress;
        Transform {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale_x: mix(self.scale_x, to.scale_x),
        }
    }
}

/// Completion callback run against the animated object.
pub type OnComplete<T> = Box<dyn FnOnce(&mut T)>;

/// One queued transition of an object's transform.
///
/// Every target attribute is optional; `None` leaves that attribute as
/// it is when the segment starts playing. A missing `duration` is filled
/// in from the default of the request that queued the move.
pub struct Move<T> {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale_x: Option<f32>,
    /// Duration in milliseconds.
    pub duration: Option<u32>,
    pub ease: Easing,
    on_complete: Option<OnComplete<T>>,
}

impl<T> Default for Move<T> {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            scale_x: None,
            duration: None,
            ease: Easing::default(),
            on_complete: None,
        }
    }
}

impl<T> Move<T> {
    /// A move that changes nothing until targets are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A move to position `(x, y)`.
    #[must_use]
    pub fn to(x: f32, y: f32) -> Self {
        Self::new().with_x(x).with_y(y)
    }

    #[must_use]
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    #[must_use]
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn with_scale_x(mut self, scale_x: f32) -> Self {
        self.scale_x = Some(scale_x);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    /// Run `callback` once this move has finished playing.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(&mut T) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.on_complete.is_some()
    }

    /// The transform this move ends on when started from `from`.
    #[must_use]
    pub fn target(&self, from: Transform) -> Transform {
        Transform {
            x: self.x.unwrap_or(from.x),
            y: self.y.unwrap_or(from.y),
            scale_x: self.scale_x.unwrap_or(from.scale_x),
        }
    }

    pub(crate) fn take_callback(&mut self) -> Option<OnComplete<T>> {
        self.on_complete.take()
    }
}

impl<T> std::fmt::Debug for Move<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Move")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("scale_x", &self.scale_x)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// The running interpolation of one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: Transform,
    to: Transform,
    duration: u32,
    elapsed: u32,
    ease: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: Transform, to: Transform, duration: u32, ease: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0,
            ease,
        }
    }

    /// Advance by up to `delta` milliseconds.
    ///
    /// Returns the time actually consumed, which is less than `delta`
    /// only when the tween finishes during this step.
    pub fn advance(&mut self, delta: u32) -> u32 {
        let used = delta.min(self.duration - self.elapsed);
        self.elapsed += used;
        used
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            self.elapsed as f32 / self.duration as f32
        }
    }

    /// The interpolated transform at the current time.
    #[must_use]
    pub fn current(&self) -> Transform {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.ease.apply(self.progress()))
    }

    #[must_use]
    pub fn target(&self) -> Transform {
        self.to
    }
}
