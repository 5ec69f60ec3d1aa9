//! Terminal colors that turn themselves off when stderr isn't a terminal.
use crate::config::get_config;
use colored::{Color, Colorize};

pub trait MaybeColorize {
    fn green(&self) -> String;
    fn red(&self) -> String;
    fn purple(&self) -> String;
    fn yellow(&self) -> String;
}

fn paint(text: &str, color: Color) -> String {
    if get_config().general.tty {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

impl<T: AsRef<str>> MaybeColorize for T {
    fn green(&self) -> String {
        paint(self.as_ref(), Color::Green)
    }

    fn red(&self) -> String {
        paint(self.as_ref(), Color::Red)
    }

    fn purple(&self) -> String {
        paint(self.as_ref(), Color::Magenta)
    }

    fn yellow(&self) -> String {
        paint(self.as_ref(), Color::Yellow)
    }
}
