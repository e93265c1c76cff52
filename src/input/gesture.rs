use std::{cell::Cell, rc::Rc};

/// Raw input event as delivered by the host environment.
///
/// Vertical coordinates grow downwards; a positive wheel delta means "scroll down".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RawInput {
    /// Mouse wheel or trackpad scroll.
    Wheel {
        /// Vertical delta in pixels.
        delta_y: f64,
    },
    /// Finger touched the surface.
    TouchStart {
        /// Vertical position.
        y: f64,
    },
    /// Finger moved.
    TouchMove {
        /// Vertical position.
        y: f64,
    },
    /// Finger lifted.
    TouchEnd,
    /// Pointer button pressed.
    PointerDown {
        /// Vertical position.
        y: f64,
    },
    /// Pointer moved (only counts while pressed).
    PointerMove {
        /// Vertical position.
        y: f64,
    },
    /// Pointer button released.
    PointerUp,
}

/// Discrete navigation signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureSignal {
    /// Scroll down / swipe up: go to the next chapter.
    Forward,
    /// Scroll up / swipe down: go to the previous chapter.
    Backward,
}

/// Turns raw wheel/touch/pointer events into [`GestureSignal`]s.
///
/// Deltas accumulate until their magnitude reaches the tolerance; the accumulator resets when
/// a signal fires, when the movement reverses, and when a drag ends. Upward motion (after the
/// wheel multiplier) is [`GestureSignal::Forward`].
#[derive(Clone, Debug)]
pub struct GestureNormalizer {
    tolerance: f64,
    wheel_speed: f64,
    accumulated: f64,
    drag_y: Option<f64>,
}

impl GestureNormalizer {
    /// Create a normalizer; `wheel_speed = -1` makes scrolling down read as upward motion.
    pub fn new(tolerance: f64, wheel_speed: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            wheel_speed,
            accumulated: 0.0,
            drag_y: None,
        }
    }

    /// Feed one event; returns a signal when the tolerance is crossed.
    pub fn feed(&mut self, input: RawInput) -> Option<GestureSignal> {
        let delta = match input {
            RawInput::Wheel { delta_y } => delta_y * self.wheel_speed,
            RawInput::TouchStart { y } | RawInput::PointerDown { y } => {
                self.drag_y = Some(y);
                self.accumulated = 0.0;
                return None;
            }
            RawInput::TouchMove { y } | RawInput::PointerMove { y } => {
                let last = self.drag_y?;
                self.drag_y = Some(y);
                y - last
            }
            RawInput::TouchEnd | RawInput::PointerUp => {
                self.drag_y = None;
                self.accumulated = 0.0;
                return None;
            }
        };

        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        if self.accumulated != 0.0 && self.accumulated.signum() != delta.signum() {
            self.accumulated = 0.0;
        }
        self.accumulated += delta;

        if self.accumulated.abs() < self.tolerance {
            return None;
        }
        let signal = if self.accumulated < 0.0 {
            GestureSignal::Forward
        } else {
            GestureSignal::Backward
        };
        self.accumulated = 0.0;
        Some(signal)
    }

    /// Forget any partial gesture.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.drag_y = None;
    }
}

/// Handle returned by [`GestureSource::attach`]; disposing it detaches the listener.
///
/// Disposal is idempotent. Dropping the handle does not detach: the owning view must call
/// [`Disposer::dispose`] on teardown.
#[derive(Debug)]
pub struct Disposer {
    alive: Rc<Cell<bool>>,
}

impl Disposer {
    /// Detach the listener. Returns `true` only on the call that actually detached it.
    pub fn dispose(&self) -> bool {
        self.alive.replace(false)
    }

    /// Whether the listener is still attached.
    pub fn is_attached(&self) -> bool {
        self.alive.get()
    }
}

/// Gesture input source with a single attachable listener.
#[derive(Debug)]
pub struct GestureSource {
    normalizer: GestureNormalizer,
    listener: Option<Rc<Cell<bool>>>,
}

impl GestureSource {
    /// Source with the given tolerance and wheel multiplier.
    pub fn new(tolerance: f64, wheel_speed: f64) -> Self {
        Self {
            normalizer: GestureNormalizer::new(tolerance, wheel_speed),
            listener: None,
        }
    }

    /// Attach the listener, replacing (and detaching) any previous one.
    pub fn attach(&mut self) -> Disposer {
        if let Some(prev) = self.listener.take() {
            prev.set(false);
        }
        let alive = Rc::new(Cell::new(true));
        self.listener = Some(Rc::clone(&alive));
        self.normalizer.reset();
        Disposer { alive }
    }

    /// Whether a listener is attached.
    pub fn is_attached(&self) -> bool {
        self.listener.as_ref().is_some_and(|alive| alive.get())
    }

    /// Feed one event; yields a signal only while a listener is attached.
    pub fn push(&mut self, input: RawInput) -> Option<GestureSignal> {
        if !self.is_attached() {
            return None;
        }
        self.normalizer.feed(input)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/gesture.rs"]
mod tests;
