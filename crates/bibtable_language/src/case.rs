//! Case conversion for `change.case$`.
//!
//! Text inside braces is protected and never changes case.

/// A `change.case$` mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMode {
    /// `t`: lowercase all but the first character and any character after
    /// a colon and whitespace.
    Title,
    /// `l`: lowercase everything.
    Lower,
    /// `u`: uppercase everything.
    Upper,
}

impl CaseMode {
    /// Parses a mode string (`t`, `l`, or `u`, either case).
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "t" | "T" => Some(Self::Title),
            "l" | "L" => Some(Self::Lower),
            "u" | "U" => Some(Self::Upper),
            _ => None,
        }
    }
}

/// Changes the case of `text` outside braces.
#[must_use]
pub fn change_case(text: &str, mode: CaseMode) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut keep_next = mode == CaseMode::Title;
    let mut after_colon = false;

    for c in text.chars() {
        match c {
            '{' => {
                depth += 1;
                keep_next = false;
                out.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            _ if depth > 0 => out.push(c),
            _ => match mode {
                CaseMode::Lower => out.extend(c.to_lowercase()),
                CaseMode::Upper => out.extend(c.to_uppercase()),
                CaseMode::Title => {
                    if c.is_whitespace() {
                        if after_colon {
                            keep_next = true;
                        }
                        out.push(c);
                    } else if keep_next {
                        keep_next = false;
                        out.push(c);
                    } else {
                        out.extend(c.to_lowercase());
                    }
                }
            },
        }
        after_colon = c == ':' || (after_colon && c.is_whitespace());
    }
    out
}
