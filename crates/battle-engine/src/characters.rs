use std::str::FromStr;

use crate::error::ParseError;
use crate::types::Character;

/// Static roster entry. Rule effects live in `damage.rs`; this is labelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterInfo {
    pub character: Character,
    pub name: &'static str,
    pub colour: &'static str,
    pub ability: &'static str,
}

pub const CHARACTERS: [CharacterInfo; 9] = [
    // 0: Normal: no modifiers
    CharacterInfo {
        character: Character::Normal,
        name: "Normal",
        colour: "Grey",
        ability: "No special ability.",
    },
    // 1: Fighter: planner quota only
    CharacterInfo {
        character: Character::Fighter,
        name: "Fighter",
        colour: "Red",
        ability: "May plan 6 attacks instead of 5.",
    },
    // 2: HiJump: recovery immunity
    CharacterInfo {
        character: Character::HiJump,
        name: "HiJump",
        colour: "Blue",
        ability: "Cannot be hit during a failed-counter recovery turn.",
    },
    // 3: Stone: perfect block
    CharacterInfo {
        character: Character::Stone,
        name: "Stone",
        colour: "Brown",
        ability: "Blocking takes no damage.",
    },
    // 4: Plasma: shield retaliation
    CharacterInfo {
        character: Character::Plasma,
        name: "Plasma",
        colour: "Green",
        ability: "Blocks zap back 0.5; counters deal 0.5 extra unless the attacker is Fire.",
    },
    // 5: Mirror: double counter
    CharacterInfo {
        character: Character::Mirror,
        name: "Mirror",
        colour: "White",
        ability: "Successful counters deal 2 instead of 1.",
    },
    // 6: Fire: unstoppable attack
    CharacterInfo {
        character: Character::Fire,
        name: "Fire",
        colour: "Orange",
        ability: "Attacks still land through a counter.",
    },
    // 7: Beam: double idle
    CharacterInfo {
        character: Character::Beam,
        name: "Beam",
        colour: "Yellow",
        ability: "When both fighters idle, the opponent takes 1.",
    },
    // 8: Ninja: clash chip
    CharacterInfo {
        character: Character::Ninja,
        name: "Ninja",
        colour: "Purple",
        ability: "When both fighters attack, the opponent still takes 0.5.",
    },
];

pub fn get_character(character: Character) -> &'static CharacterInfo {
    &CHARACTERS[character.id() as usize]
}

impl CharacterInfo {
    /// Display label in `Colour Name` form, e.g. `Orange Fire`.
    pub fn label(&self) -> String {
        match self.character {
            Character::Normal => self.name.to_string(),
            _ => format!("{} {}", self.colour, self.name),
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&get_character(*self).label())
    }
}

/// Accepts the name (`fire`), the colour (`orange`) or both (`orange-fire`,
/// `orange fire`, `orange_fire`), case-insensitively.
impl FromStr for Character {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        CHARACTERS
            .iter()
            .find(|info| {
                let name = info.name.to_ascii_lowercase();
                let colour = info.colour.to_ascii_lowercase();
                wanted == name || wanted == colour || wanted == format!("{colour}{name}")
            })
            .map(|info| info.character)
            .ok_or_else(|| ParseError::UnknownCharacter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_9_characters_indexed_by_id() {
        for (i, info) in CHARACTERS.iter().enumerate() {
            assert_eq!(info.character.id() as usize, i);
            assert_eq!(get_character(info.character), info);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Character::Normal.to_string(), "Normal");
        assert_eq!(Character::Fire.to_string(), "Orange Fire");
        assert_eq!(Character::HiJump.to_string(), "Blue HiJump");
    }

    #[test]
    fn parses_names_and_colours() {
        assert_eq!("fire".parse::<Character>(), Ok(Character::Fire));
        assert_eq!("Orange".parse::<Character>(), Ok(Character::Fire));
        assert_eq!("orange-fire".parse::<Character>(), Ok(Character::Fire));
        assert_eq!("HI_JUMP".parse::<Character>(), Ok(Character::HiJump));
        assert_eq!("purple ninja".parse::<Character>(), Ok(Character::Ninja));
        assert_eq!("grey".parse::<Character>(), Ok(Character::Normal));
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(
            "pink".parse::<Character>(),
            Err(ParseError::UnknownCharacter("pink".to_string()))
        );
    }

    #[test]
    fn display_parses_back() {
        for character in Character::ALL {
            assert_eq!(character.to_string().parse::<Character>(), Ok(character));
        }
    }
}
