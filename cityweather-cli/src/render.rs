//! Text layout for the weather page and its cards.

use std::fmt::Write;

use cityweather_core::view::{CardList, CardView, Control, PageView};

/// Inner width of a card, between the borders.
const CARD_WIDTH: usize = 34;
/// Spaces between a card border and its text.
const PADDING: usize = 1;
/// Full width of the page; the globe sits flush right.
const PAGE_WIDTH: usize = CARD_WIDTH + 2;

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, len: usize) -> String {
    let fill = len.saturating_sub(width(s));
    format!("{s}{}", " ".repeat(fill))
}

fn button(control: &Control) -> String {
    format!("[ {} ]", control.label)
}

pub fn temperature(celsius: f64) -> String {
    format!("{celsius:.1}°C")
}

pub fn card(card: &CardView) -> String {
    let inner = CARD_WIDTH - 2 * PADDING;
    let pad = " ".repeat(PADDING);
    let temp = temperature(card.temperature);
    let city_line = format!(
        "{}{temp}",
        pad_right(&card.city, inner.saturating_sub(width(&temp)))
    );

    let mut out = String::new();
    let _ = writeln!(out, "┌{}┐", "─".repeat(CARD_WIDTH));
    for line in [card.country.as_str(), city_line.as_str(), card.weather.as_str()] {
        let _ = writeln!(out, "│{pad}{}{pad}│", pad_right(line, inner));
    }
    let _ = write!(out, "└{}┘", "─".repeat(CARD_WIDTH));
    out
}

pub fn page(view: &PageView) -> String {
    let [first, second] = view.header.greeting;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}{}",
        pad_right(first, PAGE_WIDTH.saturating_sub(width(view.header.globe.label))),
        view.header.globe.label
    );
    let _ = writeln!(out, "{second}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", button(&view.search_button));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.section_title);
    let _ = writeln!(out, "{}", "=".repeat(width(view.section_title)));

    match &view.body {
        CardList::Loading(text) => {
            let _ = write!(out, "{text}");
        }
        CardList::Cards(cards) => {
            let rendered: Vec<String> = cards.iter().map(card).collect();
            let _ = write!(out, "{}", rendered.join("\n"));
        }
    }

    out
}
