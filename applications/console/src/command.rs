//! Interactive line commands

use crate::error::{ConsoleError, Result};
use mood_playback::{Channel, MediaAction};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  play              toggle play/pause
  mute              toggle mute
  next <channel>    next track on epic | reflex | cool
  prev <channel>    previous track on a channel
  vol <0-100>       set volume
  seek <secs>       drag the seek bar to a position
  back [secs]       system seek backward
  forward [secs]    system seek forward
  stop              system stop
  hover <channel>   pointer enters a channel button
  leave <channel>   pointer leaves a channel button
  frames <n>        advance the simulation by n frames
  status            show the player display
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Mute,
    Next(Channel),
    Prev(Channel),
    Volume(u8),
    Seek(f64),
    Media(MediaAction),
    Hover(Channel),
    Leave(Channel),
    Frames(u32),
    Status,
    Help,
    Quit,
}

fn argument<'a>(command: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| ConsoleError::Command(format!("'{command}' needs an argument")))
}

fn parse_arg<T: FromStr>(command: &str, arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| ConsoleError::Command(format!("'{command}': invalid argument '{arg}'")))
}

fn channel(command: &str, arg: Option<&str>) -> Result<Channel> {
    let arg = argument(command, arg)?;
    arg.parse()
        .map_err(|e: mood_playback::PlaybackError| ConsoleError::Command(e.to_string()))
}

fn offset(command: &str, arg: Option<&str>) -> Result<Option<f64>> {
    arg.map(|a| parse_arg(command, a)).transpose()
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ConsoleError::Command("empty command".to_string()));
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(ConsoleError::Command(format!(
                "'{name}': unexpected argument '{extra}'"
            )));
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "play" | "pause" | "p" => Command::Play,
            "mute" | "m" => Command::Mute,
            "next" | "n" => Command::Next(channel(name, arg)?),
            "prev" => Command::Prev(channel(name, arg)?),
            "vol" | "volume" => {
                let level: u8 = parse_arg(name, argument(name, arg)?)?;
                if level > 100 {
                    return Err(ConsoleError::Command(format!(
                        "volume must be 0-100, got {level}"
                    )));
                }
                Command::Volume(level)
            }
            "seek" => Command::Seek(parse_arg(name, argument(name, arg)?)?),
            "back" => Command::Media(MediaAction::SeekBackward {
                offset: offset(name, arg)?,
            }),
            "forward" => Command::Media(MediaAction::SeekForward {
                offset: offset(name, arg)?,
            }),
            "stop" => Command::Media(MediaAction::Stop),
            "hover" => Command::Hover(channel(name, arg)?),
            "leave" => Command::Leave(channel(name, arg)?),
            "frames" | "f" => Command::Frames(parse_arg(name, argument(name, arg)?)?),
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ConsoleError::Command(format!("unknown command '{other}'"))),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_channel_commands() {
        assert_eq!(
            "next epic".parse::<Command>().unwrap(),
            Command::Next(Channel::Epic)
        );
        assert_eq!(
            "prev chill".parse::<Command>().unwrap(),
            Command::Prev(Channel::Cool)
        );
        assert!("next".parse::<Command>().is_err());
        assert!("next jazz".parse::<Command>().is_err());
    }

    #[test]
    fn parses_numeric_arguments() {
        assert_eq!("vol 40".parse::<Command>().unwrap(), Command::Volume(40));
        assert_eq!("seek 61.5".parse::<Command>().unwrap(), Command::Seek(61.5));
        assert_eq!("frames 10".parse::<Command>().unwrap(), Command::Frames(10));
        assert!("vol 101".parse::<Command>().is_err());
        assert!("vol loud".parse::<Command>().is_err());
    }

    #[test]
    fn parses_media_commands() {
        assert_eq!(
            "back".parse::<Command>().unwrap(),
            Command::Media(MediaAction::SeekBackward { offset: None })
        );
        assert_eq!(
            "forward 5".parse::<Command>().unwrap(),
            Command::Media(MediaAction::SeekForward { offset: Some(5.0) })
        );
        assert_eq!(
            "stop".parse::<Command>().unwrap(),
            Command::Media(MediaAction::Stop)
        );
    }

    #[test]
    fn rejects_noise() {
        assert!("".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
        assert!("play now please".parse::<Command>().is_err());
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!("PLAY".parse::<Command>().unwrap(), Command::Play);
        assert_eq!("Quit".parse::<Command>().unwrap(), Command::Quit);
    }
}
