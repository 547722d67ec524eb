use std::convert::Infallible;

use lantern_core::{
    nav::MoveRequest,
    reactions::{ChromeView, Reactions, TransitionPlan},
};
use log::info;

/// Parsed stdin command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Move(MoveRequest),
    Dim,
    Toggle,
    History,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        if let Ok(request) = MoveRequest::parse(line) {
            return Some(Self::Move(request));
        }
        if let Ok(index) = line.parse::<u32>() {
            return Some(Self::Move(MoveRequest::Absolute(index)));
        }

        match line {
            "n" => Some(Self::Move(MoveRequest::Next)),
            "p" => Some(Self::Move(MoveRequest::Prev)),
            "dim" | "." => Some(Self::Dim),
            "toggle" | "t" => Some(Self::Toggle),
            "history" => Some(Self::History),
            "quit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Console rendition of the navigation chrome. Printing cannot meaningfully
/// fail, so reactions are infallible here.
#[derive(Debug)]
pub struct ConsoleChrome {
    tag_prefix: String,
    show_buttons: bool,
    show_counter: bool,
    reveal_requested: bool,
}

impl ConsoleChrome {
    pub fn new(tag_prefix: &str, show_buttons: bool, show_counter: bool) -> Self {
        Self {
            tag_prefix: tag_prefix.to_owned(),
            show_buttons,
            show_counter,
            reveal_requested: false,
        }
    }

    /// Whether initialization asked for the delayed chrome reveal.
    pub fn take_reveal_request(&mut self) -> bool {
        std::mem::take(&mut self.reveal_requested)
    }
}

impl Reactions for ConsoleChrome {
    type Error = Infallible;

    fn set_dimmer(&mut self, active: bool) -> Result<(), Self::Error> {
        println!("[dimmer] {}", if active { "on" } else { "off" });
        Ok(())
    }

    fn set_ui_visible(&mut self, visible: bool) -> Result<(), Self::Error> {
        println!("[chrome] {}", if visible { "shown" } else { "hidden" });
        Ok(())
    }

    fn begin_transition(&mut self, plan: TransitionPlan) -> Result<(), Self::Error> {
        println!(
            "[transition] {} -> {} (leave {:?}, enter {:?})",
            plan.from,
            plan.to,
            plan.leave_animation(),
            plan.enter_animation()
        );
        Ok(())
    }

    fn refresh_chrome(&mut self, view: ChromeView) -> Result<(), Self::Error> {
        if self.show_counter {
            println!("[counter] {}", view.counter_label());
        }
        if self.show_buttons {
            let buttons = view.button_states();
            println!(
                "[buttons] first={} prev={} next={} last={}",
                buttons.first, buttons.prev, buttons.next, buttons.last
            );
        }
        println!("[location] #{}", view.location_tag(&self.tag_prefix));
        Ok(())
    }

    fn app_initialized(&mut self) -> Result<(), Self::Error> {
        info!("host: presentation initialized");
        if self.show_buttons {
            self.reveal_requested = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_terse_and_full_forms() {
        assert_eq!(Command::parse("next"), Some(Command::Move(MoveRequest::Next)));
        assert_eq!(Command::parse("p"), Some(Command::Move(MoveRequest::Prev)));
        assert_eq!(
            Command::parse("7"),
            Some(Command::Move(MoveRequest::Absolute(7)))
        );
        assert_eq!(Command::parse("."), Some(Command::Dim));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("sideways"), None);
    }

    #[test]
    fn reveal_request_latches_until_taken() {
        let mut chrome = ConsoleChrome::new("slide", true, true);
        chrome.app_initialized().unwrap();
        assert!(chrome.take_reveal_request());
        assert!(!chrome.take_reveal_request());

        let mut hidden = ConsoleChrome::new("slide", false, true);
        hidden.app_initialized().unwrap();
        assert!(!hidden.take_reveal_request());
    }
}
