/// Number of digits in an emailed one-time code.
pub const OTP_LEN: usize = 6;

/// Six single-digit cells plus the index of the focused cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    cells: [Option<char>; OTP_LEN],
    focus: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Apply the new content of cell `index`.
    ///
    /// A single ASCII digit fills the cell and moves focus to the next one.
    /// An empty value clears the cell in place. Anything else, including
    /// pasted multi-character input, is ignored. Returns whether the input
    /// was accepted.
    pub fn input(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LEN {
            return false;
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                self.cells[index] = None;
                self.focus = index;
                true
            }
            (Some(c), None) if c.is_ascii_digit() => {
                self.cells[index] = Some(c);
                self.focus = (index + 1).min(OTP_LEN - 1);
                true
            }
            _ => false,
        }
    }

    /// Backspace pressed in cell `index`: clears a filled cell, or moves focus
    /// back one cell when it is already empty.
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LEN {
            return;
        }
        if self.cells[index].is_some() {
            self.cells[index] = None;
            self.focus = index;
        } else {
            self.focus = index.saturating_sub(1);
        }
    }

    /// Submit is only enabled once every cell holds a digit.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn code(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
