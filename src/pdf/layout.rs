//! Page geometry, word wrap, and pagination for the exported letter.
//!
//! Widths use a coarse table of Helvetica advance widths (in em). It is an
//! approximation: lines may come out slightly short, never visibly long.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

pub const TITLE_FONT_SIZE_PT: f32 = 16.0;
pub const BODY_FONT_SIZE_PT: f32 = 11.0;
/// Gap between the title baseline and the first body line.
pub const BODY_OFFSET_MM: f32 = 15.0;

const LINE_HEIGHT_FACTOR: f32 = 1.15;
const MM_PER_PT: f32 = 25.4 / 72.0;

fn char_width_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' => 0.222,
        ' ' | 'f' | 't' | 'I' | '.' | ',' | ':' | ';' | '!' | '/' | '[' | ']' => 0.278,
        'r' | '(' | ')' | '-' | '"' => 0.333,
        'm' | 'M' => 0.833,
        'w' | 'C' | 'D' | 'G' | 'H' | 'N' | 'O' | 'Q' | 'R' | 'U' => 0.722,
        'W' => 0.944,
        '@' => 1.015,
        'A'..='Z' => 0.667,
        _ => 0.556,
    }
}

pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let em: f32 = text.chars().map(char_width_em).sum();
    em * font_size_pt * MM_PER_PT
}

pub fn line_height_mm(font_size_pt: f32) -> f32 {
    font_size_pt * LINE_HEIGHT_FACTOR * MM_PER_PT
}

/// Greedy word wrap. Paragraph breaks and blank lines are kept; runs of
/// whitespace inside a paragraph collapse to one space; words wider than the
/// line are split.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, font_size_pt) <= max_width_mm;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if fits(word) {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if !fits(&current) {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }
        lines.push(current);
    }

    lines
}

/// Split wrapped lines into pages. The first page has less room because the
/// title sits above the body.
pub fn paginate(lines: Vec<String>, font_size_pt: f32) -> Vec<Vec<String>> {
    let line_height = line_height_mm(font_size_pt);
    let bottom = PAGE_HEIGHT_MM - MARGIN_MM;
    let capacity = |top: f32| ((bottom - top) / line_height).floor() as usize + 1;

    let first_capacity = capacity(MARGIN_MM + BODY_OFFSET_MM);
    let later_capacity = capacity(MARGIN_MM);

    let mut pages = Vec::new();
    let mut remaining = lines.into_iter().peekable();
    let mut page_capacity = first_capacity;

    loop {
        let page: Vec<String> = remaining.by_ref().take(page_capacity).collect();
        pages.push(page);
        page_capacity = later_capacity;
        if remaining.peek().is_none() {
            break;
        }
    }

    pages
}

/// Baseline of the first body line on a page, measured from the top edge.
pub fn body_top_mm(page_index: usize) -> f32 {
    if page_index == 0 {
        MARGIN_MM + BODY_OFFSET_MM
    } else {
        MARGIN_MM
    }
}
