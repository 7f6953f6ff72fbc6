//! App navigation state - an explicit stack of named screens
//!
//! Lives outside the engine: screens never touch board or hand state.
//! Navigation is push/pop on a stack rooted at the menu, so "back" is
//! always well-defined.

use crate::types::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Options,
    HighScores,
    Game(Mode),
}

/// Screen stack rooted at the main menu. The root cannot be popped.
#[derive(Debug, Clone)]
pub struct ScreenStack {
    stack: Vec<Screen>,
}

impl ScreenStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Menu],
        }
    }

    pub fn current(&self) -> Screen {
        *self.stack.last().expect("stack is never empty")
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    /// Pop back to the previous screen; the root menu stays put.
    /// Returns the screen that is now current.
    pub fn pop(&mut self) -> Screen {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    /// Swap the current screen without growing the stack
    pub fn replace(&mut self, screen: Screen) {
        self.stack.pop();
        self.stack.push(screen);
        if self.stack.is_empty() {
            self.stack.push(Screen::Menu);
        }
    }
}

impl Default for ScreenStack {
    fn default() -> Self {
        Self::new()
    }
}
