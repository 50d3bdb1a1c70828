use glfw::{Action, Key, WindowEvent};
use indoc::indoc;

/// Something the user asked for with the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    PrintHelp,
    ToggleCollapse,
    ToggleFullscreen,
}

pub const HELP_TEXT: &str = indoc!(
    "
    Particle Image

    h/H             Prints this help output
    q/Q/ESC         Exits the visualization
    SPACE           Starts or pauses the collapse of the image
    f/F             Toggles fullscreen
    "
);

/// Map a window event to a command. Only key presses trigger commands.
pub fn command_for(event: &WindowEvent) -> Option<Command> {
    match event {
        WindowEvent::Key(key, _, Action::Press, _) => match key {
            Key::Escape | Key::Q => Some(Command::Quit),
            Key::H => Some(Command::PrintHelp),
            Key::Space => Some(Command::ToggleCollapse),
            Key::F => Some(Command::ToggleFullscreen),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glfw::Modifiers;

    fn key(key: Key, action: Action) -> WindowEvent {
        WindowEvent::Key(key, 0, action, Modifiers::empty())
    }

    #[test]
    fn presses_map_to_commands() {
        assert_eq!(command_for(&key(Key::Q, Action::Press)), Some(Command::Quit));
        assert_eq!(
            command_for(&key(Key::Escape, Action::Press)),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for(&key(Key::H, Action::Press)),
            Some(Command::PrintHelp)
        );
        assert_eq!(
            command_for(&key(Key::Space, Action::Press)),
            Some(Command::ToggleCollapse)
        );
        assert_eq!(
            command_for(&key(Key::F, Action::Press)),
            Some(Command::ToggleFullscreen)
        );
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        assert_eq!(command_for(&key(Key::Space, Action::Release)), None);
        assert_eq!(command_for(&key(Key::Space, Action::Repeat)), None);
    }

    #[test]
    fn other_events_are_ignored() {
        assert_eq!(command_for(&key(Key::A, Action::Press)), None);
        assert_eq!(command_for(&WindowEvent::FramebufferSize(10, 10)), None);
    }

    #[test]
    fn help_lists_every_binding() {
        for binding in &["h/H", "q/Q/ESC", "SPACE", "f/F"] {
            assert!(HELP_TEXT.contains(binding));
        }
    }
}
