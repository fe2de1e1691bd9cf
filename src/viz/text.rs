//! Text measurement helpers.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Largest font size in `min_px..=preferred_px` whose estimated width fits `max_px`.
pub fn fit_font_px(text: &str, preferred_px: u32, min_px: u32, max_px: u32) -> u32 {
    let mut px = preferred_px;
    while px > min_px && estimate_text_width_px(text, px) > max_px {
        px -= 1;
    }
    px
}
