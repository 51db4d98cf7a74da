//! Styling helpers for terminal output.
//!
//! The [`GuideStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GuideStyle {
    fn banner_style(&self) -> ColoredString;
    fn chapter_style(&self) -> ColoredString;
    fn battle_style(&self) -> ColoredString;
    fn shop_style(&self) -> ColoredString;
    fn grid_style(&self) -> ColoredString;
    fn macro_style(&self) -> ColoredString;
    fn note_style(&self) -> ColoredString;
    fn condition_label_style(&self) -> ColoredString;
    fn gain_style(&self) -> ColoredString;
    fn spend_style(&self) -> ColoredString;
    fn flag_style(&self) -> ColoredString;
    fn placeholder_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn dim_style(&self) -> ColoredString;
}

impl GuideStyle for &str {
    fn banner_style(&self) -> ColoredString {
        self.bold().truecolor(102, 208, 250)
    }
    fn chapter_style(&self) -> ColoredString {
        self.bold().underline().truecolor(223, 170, 40)
    }
    fn battle_style(&self) -> ColoredString {
        self.bold().truecolor(230, 80, 80)
    }
    fn shop_style(&self) -> ColoredString {
        self.bold().truecolor(220, 180, 40)
    }
    fn grid_style(&self) -> ColoredString {
        self.bold().truecolor(150, 110, 250)
    }
    fn macro_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
    fn note_style(&self) -> ColoredString {
        self.italic().truecolor(160, 160, 160)
    }
    fn condition_label_style(&self) -> ColoredString {
        self.italic().truecolor(75, 180, 255)
    }
    fn gain_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn spend_style(&self) -> ColoredString {
        self.truecolor(230, 140, 60)
    }
    fn flag_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220)
    }
    fn placeholder_style(&self) -> ColoredString {
        self.italic().truecolor(230, 30, 30)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn dim_style(&self) -> ColoredString {
        self.truecolor(120, 120, 120)
    }
}

impl GuideStyle for String {
    fn banner_style(&self) -> ColoredString {
        self.as_str().banner_style()
    }
    fn chapter_style(&self) -> ColoredString {
        self.as_str().chapter_style()
    }
    fn battle_style(&self) -> ColoredString {
        self.as_str().battle_style()
    }
    fn shop_style(&self) -> ColoredString {
        self.as_str().shop_style()
    }
    fn grid_style(&self) -> ColoredString {
        self.as_str().grid_style()
    }
    fn macro_style(&self) -> ColoredString {
        self.as_str().macro_style()
    }
    fn note_style(&self) -> ColoredString {
        self.as_str().note_style()
    }
    fn condition_label_style(&self) -> ColoredString {
        self.as_str().condition_label_style()
    }
    fn gain_style(&self) -> ColoredString {
        self.as_str().gain_style()
    }
    fn spend_style(&self) -> ColoredString {
        self.as_str().spend_style()
    }
    fn flag_style(&self) -> ColoredString {
        self.as_str().flag_style()
    }
    fn placeholder_style(&self) -> ColoredString {
        self.as_str().placeholder_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn dim_style(&self) -> ColoredString {
        self.as_str().dim_style()
    }
}
