// Keyboard input - scancode queue and button latching
//
// The host delivers raw scancodes from its input thread through a bounded
// queue; the scheduler drains the queue between frames. A mapped scancode
// latches its button for a fixed number of refreshes, synthesizing a
// brief hold out of a single key event.
//
// Mapping (scancode set of the original machine):
//
// | Key | Scancode | Button |
// |-----|----------|--------|
// |  W  |    17    | Up     |
// |  A  |    30    | Left   |
// |  S  |    31    | Down   |
// |  D  |    32    | Right  |
// |  I  |    23    | Start  |
// |  J  |    36    | B      |
// |  K  |    37    | A      |
// |  U  |    22    | Select |

use super::Controller;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum queued scancodes; the newest event is dropped when full
pub const KEY_QUEUE_SIZE: usize = 32;

/// Refreshes a latched button stays held after its key event
pub const KEY_HOLD_REFRESHES: u8 = 30;

/// Scancodes of the mapped keys
pub mod scancodes {
    pub const W: u8 = 17;
    pub const U: u8 = 22;
    pub const I: u8 = 23;
    pub const A: u8 = 30;
    pub const S: u8 = 31;
    pub const D: u8 = 32;
    pub const J: u8 = 36;
    pub const K: u8 = 37;
}

/// Buttons in joypad shift order
const BUTTON_COUNT: usize = 8;
const BTN_A: usize = 0;
const BTN_B: usize = 1;
const BTN_SELECT: usize = 2;
const BTN_START: usize = 3;
const BTN_UP: usize = 4;
const BTN_DOWN: usize = 5;
const BTN_LEFT: usize = 6;
const BTN_RIGHT: usize = 7;

/// Thread-safe scancode inlet, cloneable into the host's input thread
///
/// `push_key` never blocks; when the queue is full the event is dropped.
#[derive(Clone)]
pub struct KeyboardQueue {
    queue: Arc<Mutex<VecDeque<u8>>>,
}

impl KeyboardQueue {
    pub fn new() -> Self {
        KeyboardQueue {
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(KEY_QUEUE_SIZE))),
        }
    }

    /// Push a scancode from the host; lossy when the queue is full
    pub fn push_key(&self, scancode: u8) {
        let mut queue = self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if queue.len() >= KEY_QUEUE_SIZE {
            return;
        }
        queue.push_back(scancode);
    }

    /// Drain all queued scancodes (scheduler side)
    fn drain(&self) -> Vec<u8> {
        let mut queue = self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        queue.drain(..).collect()
    }

    /// Number of queued events (diagnostics)
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KeyboardQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps drained scancodes onto latched button holds
pub struct KeyboardHandler {
    queue: KeyboardQueue,

    /// Remaining refreshes each button stays held; 0 = released
    hold: [u8; BUTTON_COUNT],
}

impl KeyboardHandler {
    pub fn new() -> Self {
        KeyboardHandler {
            queue: KeyboardQueue::new(),
            hold: [0; BUTTON_COUNT],
        }
    }

    /// A cloneable inlet for the host input thread
    pub fn queue(&self) -> KeyboardQueue {
        self.queue.clone()
    }

    /// Drain pending scancodes, age existing holds, and produce the pad
    /// state for the coming frame
    pub fn refresh(&mut self) -> Controller {
        for slot in self.hold.iter_mut() {
            if *slot > 0 {
                *slot -= 1;
            }
        }

        for scancode in self.queue.drain() {
            if let Some(button) = map_scancode(scancode) {
                self.hold[button] = KEY_HOLD_REFRESHES;
            }
        }

        Controller {
            button_a: self.hold[BTN_A] > 0,
            button_b: self.hold[BTN_B] > 0,
            select: self.hold[BTN_SELECT] > 0,
            start: self.hold[BTN_START] > 0,
            up: self.hold[BTN_UP] > 0,
            down: self.hold[BTN_DOWN] > 0,
            left: self.hold[BTN_LEFT] > 0,
            right: self.hold[BTN_RIGHT] > 0,
        }
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a scancode to its button slot; unmapped codes are ignored
fn map_scancode(scancode: u8) -> Option<usize> {
    match scancode {
        scancodes::W => Some(BTN_UP),
        scancodes::A => Some(BTN_LEFT),
        scancodes::S => Some(BTN_DOWN),
        scancodes::D => Some(BTN_RIGHT),
        scancodes::I => Some(BTN_START),
        scancodes::J => Some(BTN_B),
        scancodes::K => Some(BTN_A),
        scancodes::U => Some(BTN_SELECT),
        _ => None,
    }
}
