//! FILENAME: core/parser/src/normalize.rs
//! PURPOSE: Canonicalizes raw equation text (typed or OCR output) into ASCII.
//! CONTEXT: First stage of the pipeline. Everything downstream assumes the
//! output of this pass: no whitespace, lowercase letters, '-' as the only
//! minus, '=' as the only equals, and squared x written as "x^2".
//!
//! MAPPINGS:
//! - Full-width forms (U+FF01..U+FF5E) to their ASCII counterparts
//! - Minus glyphs (− – — ‐ ‑ ﹣) to '-', equals glyphs (﹦) to '='
//! - Multiplication marks (× · ∙ ⋅ *) between a number and a variable are
//!   dropped; elsewhere they stay as '*'. "**" means power
//! - Superscripts ² ³ to "^2" "^3", radical '√' to "sqrt"
//! - "x2" (a common OCR misread of x²) to "x^2"
//! - ';' separates lines like a newline

use std::iter::Peekable;
use std::str::Chars;

/// Letters the equation families treat as unknowns.
const VARIABLE_LETTERS: &str = "xyz";

/// Normalizes a whole text blob. Empty lines are dropped.
pub fn normalize(raw: &str) -> String {
    raw.split(['\n', ';'])
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalizes a single line.
pub fn normalize_line(line: &str) -> String {
    let mapped = map_glyphs(line);
    Normalizer::new(&mapped).run()
}

/// Character-level glyph mapping and whitespace removal.
fn map_glyphs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        let ch = fold_full_width(ch);
        match ch {
            c if c.is_whitespace() => {}
            '−' | '–' | '—' | '‐' | '‑' | '﹣' => out.push('-'),
            '﹦' => out.push('='),
            '×' | '·' | '∙' | '⋅' => out.push('*'),
            '²' => out.push_str("^2"),
            '³' => out.push_str("^3"),
            '√' => out.push_str("sqrt"),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Maps a full-width form onto ASCII; other characters pass through.
fn fold_full_width(ch: char) -> char {
    match ch {
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
        '\u{3000}' => ' ',
        _ => ch,
    }
}

/// Scanner that rewrites power notation after glyph mapping.
struct Normalizer<'a> {
    input: Peekable<Chars<'a>>,
    output: String,
}

impl<'a> Normalizer<'a> {
    fn new(input: &'a str) -> Self {
        Normalizer {
            input: input.chars().peekable(),
            output: String::new(),
        }
    }

    fn run(mut self) -> String {
        while let Some(ch) = self.input.next() {
            match ch {
                '*' => self.read_star(),
                'x' => self.read_variable(),
                c => self.output.push(c),
            }
        }
        self.output
    }

    /// "**" is a power operator. A lone '*' is dropped only between a
    /// coefficient and a variable ("3*x" to "3x"); anywhere else it stays.
    fn read_star(&mut self) {
        if self.input.peek() == Some(&'*') {
            self.input.next();
            self.output.push('^');
            return;
        }

        let after_number =
            matches!(self.output.chars().last(), Some(c) if c.is_ascii_digit() || c == '.');
        let before_variable =
            matches!(self.input.peek(), Some(c) if VARIABLE_LETTERS.contains(*c));
        if !(after_number && before_variable) {
            self.output.push('*');
        }
    }

    /// Rewrites "x2" to "x^2" when the 2 is not the start of a longer number.
    fn read_variable(&mut self) {
        self.output.push('x');
        if self.input.peek() != Some(&'2') {
            return;
        }

        let mut lookahead = self.input.clone();
        lookahead.next();
        let continues_number =
            matches!(lookahead.peek(), Some(c) if c.is_ascii_digit() || *c == '.');
        if !continues_number {
            self.input.next();
            self.output.push_str("^2");
        }
    }
}
