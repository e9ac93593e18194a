//! Commands handed to a remote actor that plays on behalf of a tribe.
//!
//! Delivery into the target is not part of this crate; callers plug in their
//! own [`CommandSink`].

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Action requested for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandKind {
    Research { tech: u16 },
    EndTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Command {
    pub player_id: u8,
    #[serde(flatten)]
    pub kind: CommandKind,
}

impl Command {
    pub fn research(player_id: u8, tech: u16) -> Self {
        Self {
            player_id,
            kind: CommandKind::Research { tech },
        }
    }

    pub fn end_turn(player_id: u8) -> Self {
        Self {
            player_id,
            kind: CommandKind::EndTurn,
        }
    }
}

/// Receiver of commands
pub trait CommandSink {
    fn submit(&mut self, command: &Command) -> Result<()>;
}

/// Sink that only logs what it is given
#[derive(Debug, Default)]
pub struct LoggingSink {
    submitted: usize,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl CommandSink for LoggingSink {
    fn submit(&mut self, command: &Command) -> Result<()> {
        self.submitted += 1;
        match command.kind {
            CommandKind::Research { tech } => {
                info!("Player {} researches tech {}", command.player_id, tech)
            }
            CommandKind::EndTurn => info!("Player {} ends turn", command.player_id),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Default)]
    struct RecordingSink {
        commands: Vec<Command>,
        reject_after: Option<usize>,
    }

    impl CommandSink for RecordingSink {
        fn submit(&mut self, command: &Command) -> Result<()> {
            if self.reject_after.is_some_and(|n| self.commands.len() >= n) {
                return Err(Error::Config("sink closed".to_string()));
            }
            self.commands.push(*command);
            Ok(())
        }
    }

    fn play_turn(sink: &mut dyn CommandSink, player_id: u8) -> Result<()> {
        sink.submit(&Command::research(player_id, 7))?;
        sink.submit(&Command::end_turn(player_id))
    }

    #[test]
    fn test_commands_delivered_in_order() {
        let mut sink = RecordingSink::default();
        play_turn(&mut sink, 2).unwrap();

        assert_eq!(
            sink.commands,
            vec![
                Command {
                    player_id: 2,
                    kind: CommandKind::Research { tech: 7 }
                },
                Command::end_turn(2),
            ]
        );
    }

    #[test]
    fn test_sink_error_is_returned() {
        let mut sink = RecordingSink {
            reject_after: Some(1),
            ..Default::default()
        };
        assert!(play_turn(&mut sink, 1).is_err());
        assert_eq!(sink.commands.len(), 1);
    }

    #[test]
    fn test_logging_sink_counts() {
        let mut sink = LoggingSink::new();
        play_turn(&mut sink, 1).unwrap();
        assert_eq!(sink.submitted(), 2);
    }

    #[test]
    fn test_command_json() {
        let json = serde_json::to_string(&Command::research(3, 12)).unwrap();
        assert_eq!(json, r#"{"player_id":3,"kind":"research","tech":12}"#);
    }
}
