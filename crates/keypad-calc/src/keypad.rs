//! Keypad layout, button identities and the keyboard mirror
//!
//! Visual feedback: every on-screen button has a keyboard equivalent, and
//! both routes produce the same [`KeypadAction`].

use crate::core::Operation;
use crate::view::DomElement;

/// Actions that keypad buttons and keys perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter a decimal point
    Decimal,
    /// Accept a binary operator
    Operator(Operation),
    /// Evaluate the pending operation
    Equals,
    /// Divide the entry by 100
    Percent,
    /// Remove the last entry character
    Backspace,
    /// Reset everything
    Clear,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            KeypadAction::Digit(d) => d.to_string(),
            KeypadAction::Decimal => ".".to_string(),
            KeypadAction::Operator(op) => op.symbol().to_string(),
            KeypadAction::Equals => "=".to_string(),
            KeypadAction::Percent => "%".to_string(),
            KeypadAction::Backspace => "\u{232b}".to_string(),
            KeypadAction::Clear => "C".to_string(),
        }
    }

    /// Element id of the button carrying this action
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op_name(*op)),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Percent => "btn-percent".to_string(),
            KeypadAction::Backspace => "btn-backspace".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
        }
    }

    /// The `data-*` attribute identifying the button to event handlers
    #[must_use]
    pub fn data_attr(&self) -> (&'static str, String) {
        match self {
            KeypadAction::Digit(d) => ("data-number", d.to_string()),
            KeypadAction::Operator(op) => ("data-operator", op.token().to_string()),
            KeypadAction::Percent => ("data-operator", "%".to_string()),
            KeypadAction::Backspace => ("data-operator", "backspace".to_string()),
            KeypadAction::Decimal => ("data-action", "decimal".to_string()),
            KeypadAction::Equals => ("data-action", "calculate".to_string()),
            KeypadAction::Clear => ("data-action", "clear".to_string()),
        }
    }
}

/// Returns a name for an operator (for element IDs)
fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
        Operation::Modulo => "mod",
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Columns covered
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self::spanning(action, row, col, 1)
    }

    /// Creates a button covering `span` columns
    #[must_use]
    pub fn spanning(action: KeypadAction, row: usize, col: usize, span: usize) -> Self {
        Self {
            id: action.element_id(),
            action,
            row,
            col,
            span,
        }
    }

    /// Whether this button covers the given cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

/// Keypad layout definition
/// Layout:
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ − ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [    0    ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Backspace, Clear, Decimal, Digit, Equals, Operator, Percent};

        let buttons = vec![
            // Row 0: C ⌫ % ÷
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(Backspace, 0, 1),
            KeypadButtonDef::new(Percent, 0, 2),
            KeypadButtonDef::new(Operator(Operation::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(Operator(Operation::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(Operator(Operation::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(Operator(Operation::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButtonDef::spanning(Digit(0), 4, 0, 2),
            KeypadButtonDef::new(Decimal, 4, 2),
            KeypadButtonDef::new(Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button for an action
    #[must_use]
    pub fn find_button_by_action(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Processes a button click and returns its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key name to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "." => Some(KeypadAction::Decimal),
            "+" => Some(KeypadAction::Operator(Operation::Add)),
            "-" => Some(KeypadAction::Operator(Operation::Subtract)),
            "*" => Some(KeypadAction::Operator(Operation::Multiply)),
            "/" => Some(KeypadAction::Operator(Operation::Divide)),
            "%" => Some(KeypadAction::Percent),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "Delete" => Some(KeypadAction::Clear),
            "Backspace" => Some(KeypadAction::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10).map(|d| KeypadAction::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                let (attr, value) = btn.action.data_attr();
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr(attr, &value)
            })
            .collect()
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div").with_id("calc-keypad").with_class("keypad"),
            DomElement::with_child,
        )
    }
}
