//! Terminal styling: inquire theme, colored output blocks and the request spinner.

use crate::adapters::ui::banner::{CYBER_GREEN, NEON_PURPLE};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Attributes, Color as PromptColor, RenderConfig, StyleSheet, Styled};
use std::io::{Write, stdout};
use std::time::Duration;

const ERROR_RED: (u8, u8, u8) = (0xff, 0x3b, 0x5c);

fn prompt_color((r, g, b): (u8, u8, u8)) -> PromptColor {
    PromptColor::Rgb { r, g, b }
}

fn term_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Neon theme for every subsequent inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(prompt_color(NEON_PURPLE)))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(prompt_color(CYBER_GREEN)))
        .with_answer(
            StyleSheet::new()
                .with_fg(prompt_color(CYBER_GREEN))
                .with_attr(Attributes::BOLD),
        )
        .with_help_message(StyleSheet::new().with_fg(PromptColor::DarkGrey));
    inquire::set_global_render_config(config);
}

pub fn clear_screen() {
    let mut out = stdout();
    let _ = out.execute(Clear(ClearType::All));
    let _ = out.execute(crossterm::cursor::MoveTo(0, 0));
}

pub fn print_heading(title: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(term_color(CYBER_GREEN)));
    let _ = out.execute(SetAttribute(Attribute::Bold));
    let _ = out.execute(Print(format!("\r\n== {} ==\r\n", title)));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

/// Model or server output, printed as-is.
pub fn print_block(text: &str) {
    let mut out = stdout();
    let _ = out.execute(Print("\r\n"));
    for line in text.lines() {
        let _ = out.execute(Print(format!("  {}\r\n", line)));
    }
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

pub fn print_error(message: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(term_color(ERROR_RED)));
    let _ = out.execute(Print(format!("✖ {}\r\n", message)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

/// Spinner shown while a request is in flight. Call `finish_and_clear` when done.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.magenta} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
