use crate::Unit;

pub type CharacterId = u32;

pub const CHARACTER_COUNT: CharacterId = 26;

/// Home unit of a character (ids 1-26). Virtual singers (21-26) belong to `vs`
/// regardless of the support unit printed on their cards.
pub fn unit_of(character_id: CharacterId) -> Option<Unit> {
    Some(match character_id {
        1..=4 => Unit::LeoNeed,
        5..=8 => Unit::MoreMoreJump,
        9..=12 => Unit::VividBadSquad,
        13..=16 => Unit::WonderlandsShowtime,
        17..=20 => Unit::NightCord,
        21..=26 => Unit::VirtualSinger,
        _ => return None,
    })
}

impl Unit {
    pub fn members(self) -> impl Iterator<Item = CharacterId> {
        (1..=CHARACTER_COUNT).filter(move |&id| unit_of(id) == Some(self))
    }
}
