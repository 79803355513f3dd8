//! Sprite URL derivation from an entry id.
//!
//! Lets a consumer render artwork before the full entity record is cached;
//! the URLs follow the PokeAPI sprite repository layout.

pub const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteVariant {
    Front,
    Back,
    Shiny,
    OfficialArtwork,
    Home,
}

pub fn sprite_url(id: u32, variant: SpriteVariant) -> String {
    match variant {
        SpriteVariant::Front => format!("{SPRITE_BASE}/{id}.png"),
        SpriteVariant::Back => format!("{SPRITE_BASE}/back/{id}.png"),
        SpriteVariant::Shiny => format!("{SPRITE_BASE}/shiny/{id}.png"),
        SpriteVariant::OfficialArtwork => {
            format!("{SPRITE_BASE}/other/official-artwork/{id}.png")
        }
        SpriteVariant::Home => format!("{SPRITE_BASE}/other/home/{id}.png"),
    }
}
