//! Reel overlay component.
//!
//! Layout, top to bottom:
//!
//! ```text
//! [volume icon, right aligned]
//! [mute indicator, when shown]
//! [poster line while paused / playing marker]
//! [scroll hint, first reel only]
//! [username · seller role]
//! [title]
//! [price]
//! [like · comment · share · buy]
//! ```

use crate::ui::helpers::{line, line_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ButtonKind, ReelViewModel, VolumeIcon};

const VOLUME_MUTED: &str = "🔇";
const VOLUME_ON: &str = "🔊";
const PLAYING_MARKER: &str = "▶";

fn button_glyph(kind: ButtonKind) -> &'static str {
    match kind {
        ButtonKind::Like => "♥",
        ButtonKind::Comment => "💬",
        ButtonKind::Share => "↗",
        ButtonKind::Buy => "🛍",
    }
}

/// Renders the overlay of one reel.
pub fn render_reel(out: &mut String, vm: &ReelViewModel, theme: &Theme, cols: usize) {
    let colors = &theme.colors;

    let volume = match vm.volume_icon {
        VolumeIcon::Muted => VOLUME_MUTED,
        VolumeIcon::Unmuted => VOLUME_ON,
    };
    line(
        out,
        &format!("{}{volume}", " ".repeat(cols.saturating_sub(2))),
        &Theme::fg(&colors.text),
        cols,
    );

    if let Some(indicator) = &vm.mute_indicator {
        let style = format!("{}{}", Theme::fg(&colors.indicator_fg), Theme::bg(&colors.indicator_bg));
        line_centered(out, &format!(" {indicator} "), &style, cols);
    }

    match &vm.poster {
        Some(poster) => line_centered(out, &format!("[{poster}]"), &Theme::fg(&colors.text_dim), cols),
        None => line_centered(out, PLAYING_MARKER, &Theme::fg(&colors.text), cols),
    }

    if let Some(hint) = &vm.scroll_hint {
        line_centered(out, &format!("⌄ {hint}"), &Theme::fg(&colors.accent), cols);
    }

    let bold_text = format!("{}{}", Theme::bold(), Theme::fg(&colors.text));
    line(out, &vm.username, &bold_text, cols);
    line(out, &vm.seller_label, &Theme::fg(&colors.text_dim), cols);
    line(out, &vm.title, &bold_text, cols);
    line(
        out,
        &vm.price,
        &format!("{}{}", Theme::bold(), Theme::fg(&colors.price)),
        cols,
    );

    let buttons = vm
        .buttons
        .iter()
        .map(|button| format!("{} {}", button_glyph(button.kind), button.caption))
        .collect::<Vec<_>>()
        .join("   ");
    line(out, &buttons, &Theme::fg(&colors.text), cols);
}
