// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub const REPORT_TITLE: &str = "Global Trends in Cereal Production: A 1960-2020 Overview";

// Figures quoted here were worked out by hand from the source data and are
// printed as-is.
pub const OBSERVATIONS: [&str; 7] = [
    "Global cereal production increased by approximately 305.5% from 1960 to 2020.",
    "In 2020, Upper Middle-Income countries produced 42% of the cereal, High-Income countries 28%, \
     Lower Middle-Income countries 27%, and Low-Income countries 3%.",
    "Asia's cereal production increased by about 41.3% from 2000 to 2020.",
    "In 2020, High-Income and Lower Middle-Income countries were nearly equal in cereal production, \
     contributing 28% and 27%, respectively.",
    "Climate change and technological advancements have played a significant role in shaping \
     cereal production trends over the last six decades.",
    "The increasing global population has driven the demand for higher cereal production, \
     influencing agricultural practices and policies worldwide.",
    "Sustainability and food security challenges are increasingly prominent, highlighting the need \
     for equitable and efficient cereal production and distribution systems.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A panel holding only text, no axes.
#[derive(Debug, Clone)]
pub struct TextPanel {
    pub paragraphs: Vec<String>,
    pub font_size: u32,
    pub align: Align,
    pub wrap: bool,
}

impl TextPanel {
    pub fn observations() -> Self {
        Self {
            paragraphs: OBSERVATIONS.iter().map(|o| format!("- {}", o)).collect(),
            font_size: 30,
            align: Align::Left,
            wrap: true,
        }
    }

    pub fn attribution(text: &str) -> Self {
        Self {
            paragraphs: vec![text.to_string()],
            font_size: 27,
            align: Align::Right,
            wrap: false,
        }
    }

    /// Lines to draw when at most `max_chars` fit on one line.
    pub fn lines(&self, max_chars: usize) -> Vec<String> {
        if !self.wrap {
            return self.paragraphs.clone();
        }
        self.paragraphs
            .iter()
            .flat_map(|p| wrap_text(p, max_chars))
            .collect()
    }
}

/// Greedy word wrap. Words longer than `max_chars` get a line of their own.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
