use crate::error::ParseError;
use crate::plan::Plan;
use crate::types::Command;

/// Encode a command as its one-letter code.
/// A = Attack, B = Block, C = Counter, I = Idle, - = forced skip
pub fn encode_command(command: Command) -> char {
    match command {
        Command::Attack => 'A',
        Command::Block => 'B',
        Command::Counter => 'C',
        Command::Idle => 'I',
        Command::ForcedSkip => '-',
    }
}

/// Decode a one-letter code, case-insensitively.
pub fn decode_command(code: char) -> Result<Command, ParseError> {
    match code.to_ascii_uppercase() {
        'A' => Ok(Command::Attack),
        'B' => Ok(Command::Block),
        'C' => Ok(Command::Counter),
        'I' => Ok(Command::Idle),
        '-' => Ok(Command::ForcedSkip),
        _ => Err(ParseError::UnknownCommand(code)),
    }
}

/// Decode a command string, ignoring whitespace. Length is not checked.
pub fn decode_commands(text: &str) -> Result<Vec<Command>, ParseError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(decode_command)
        .collect()
}

pub fn encode_plan(plan: &Plan) -> String {
    plan.commands().iter().copied().map(encode_command).collect()
}

/// Decode a 12-letter plan string such as `"AABICAAIBIAI"`.
pub fn decode_plan(text: &str) -> Result<Plan, ParseError> {
    Ok(Plan::new(&decode_commands(text)?)?)
}
