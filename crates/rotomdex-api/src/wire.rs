//! Wire-format payloads as the remote API ships them, plus conversions into
//! the core domain types. Optional fields default rather than fail: a detail
//! payload missing a sprite tree is still a usable record.

use serde::Deserialize;

use rotomdex_core::{EntityRecord, Entry, MoveRecord, MoveRef, SpriteSet, id_from_url};

/// `{ name, url }` pair used throughout the API.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Bare `{ url }` pointer (species to evolution chain).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourcePointer {
    pub url: String,
}

/// One page of the paginated catalog index.
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub results: Vec<NamedResource>,
    pub next: Option<String>,
}

impl PageResponse {
    /// Parse the page rows into entries, skipping rows whose URL carries no id.
    pub fn entries(&self) -> Vec<Entry> {
        self.results
            .iter()
            .filter_map(|r| {
                id_from_url(&r.url).map(|id| Entry {
                    id,
                    name: r.name.clone(),
                    url: r.url.clone(),
                })
            })
            .collect()
    }
}

// ── Entity detail ──

#[derive(Debug, Deserialize)]
pub struct EntityResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub sprites: SpritesNode,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub species: Option<NamedResource>,
    pub cries: Option<CriesNode>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpritesNode {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: OtherSpritesNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct OtherSpritesNode {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: ArtworkNode,
    #[serde(default)]
    pub home: HomeNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtworkNode {
    pub front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeNode {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CriesNode {
    pub latest: Option<String>,
    pub legacy: Option<String>,
}

impl From<EntityResponse> for EntityRecord {
    fn from(resp: EntityResponse) -> Self {
        let sprites = SpriteSet {
            front_default: resp.sprites.front_default,
            back_default: resp.sprites.back_default,
            front_shiny: resp.sprites.front_shiny,
            official_artwork: resp.sprites.other.official_artwork.front_default,
            home_front: resp.sprites.other.home.front_default,
            home_front_shiny: resp.sprites.other.home.front_shiny,
        };
        EntityRecord {
            id: resp.id,
            name: resp.name,
            types: resp.types.into_iter().map(|t| t.type_.name).collect(),
            abilities: resp.abilities.into_iter().map(|a| a.ability.name).collect(),
            moves: resp
                .moves
                .into_iter()
                .map(|m| MoveRef {
                    name: m.move_.name,
                    url: m.move_.url,
                })
                .collect(),
            sprites,
            height: resp.height,
            weight: resp.weight,
            base_experience: resp.base_experience,
            species_url: resp.species.map(|s| s.url).unwrap_or_default(),
            cry: resp.cries.and_then(|c| c.latest.or(c.legacy)),
        }
    }
}

// ── Move detail ──

#[derive(Debug, Deserialize)]
pub struct MoveResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: Option<NamedResource>,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    pub effect_chance: Option<u32>,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

impl From<MoveResponse> for MoveRecord {
    fn from(resp: MoveResponse) -> Self {
        let effect_text = resp
            .effect_entries
            .iter()
            .find(|e| e.language.name == "en")
            .map(|e| {
                let text = if e.short_effect.is_empty() { &e.effect } else { &e.short_effect };
                match resp.effect_chance {
                    Some(chance) => text.replace("$effect_chance", &chance.to_string()),
                    None => text.clone(),
                }
            })
            .unwrap_or_default();
        MoveRecord {
            name: resp.name,
            type_name: resp.type_.map(|t| t.name).unwrap_or_default(),
            power: resp.power,
            accuracy: resp.accuracy,
            pp: resp.pp,
            effect_text,
        }
    }
}

// ── Encounters ──

#[derive(Debug, Deserialize)]
pub struct EncounterRow {
    pub location_area: NamedResource,
}

// ── Species / evolution chain ──

#[derive(Debug, Deserialize)]
pub struct SpeciesResponse {
    pub evolution_chain: Option<ResourcePointer>,
}

#[derive(Debug, Deserialize)]
pub struct EvolutionChainResponse {
    pub chain: ChainLink,
}

#[derive(Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl EvolutionChainResponse {
    /// Flatten the chain into species names, base form first, branches in
    /// payload order.
    pub fn names(&self) -> Vec<String> {
        let mut out = Vec::new();
        flatten_chain(&self.chain, &mut out);
        out
    }
}

fn flatten_chain(link: &ChainLink, out: &mut Vec<String>) {
    out.push(link.species.name.clone());
    for next in &link.evolves_to {
        flatten_chain(next, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_rows_with_bad_urls_are_skipped() {
        let json = r#"{
            "count": 3,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=300&limit=300",
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "broken", "url": "https://pokeapi.co/api/v2/pokemon/not-a-number/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        let entries = page.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[1].name, "ivysaur");
        assert!(page.next.is_some());
    }

    #[test]
    fn final_page_has_no_next() {
        let json = r#"{"next": null, "results": []}"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert!(page.next.is_none());
        assert!(page.entries().is_empty());
    }

    #[test]
    fn entity_payload_decodes_into_record() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "types": [{"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}],
            "abilities": [{"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}, "is_hidden": false}],
            "moves": [{"move": {"name": "thunder-shock", "url": "https://pokeapi.co/api/v2/move/84/"}}],
            "sprites": {
                "front_default": "front.png",
                "back_default": "back.png",
                "front_shiny": null,
                "other": {
                    "official-artwork": {"front_default": "art.png"},
                    "home": {"front_default": "home.png", "front_shiny": "home-shiny.png"}
                }
            },
            "species": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/"},
            "cries": {"latest": "cry.ogg", "legacy": null}
        }"#;
        let resp: EntityResponse = serde_json::from_str(json).unwrap();
        let record = EntityRecord::from(resp);
        assert_eq!(record.id, 25);
        assert_eq!(record.types, vec!["electric"]);
        assert_eq!(record.abilities, vec!["static"]);
        assert_eq!(record.moves[0].name, "thunder-shock");
        assert_eq!(record.sprites.official_artwork.as_deref(), Some("art.png"));
        assert_eq!(record.sprites.home_front_shiny.as_deref(), Some("home-shiny.png"));
        assert_eq!(record.species_url, "https://pokeapi.co/api/v2/pokemon-species/25/");
        assert_eq!(record.cry.as_deref(), Some("cry.ogg"));
    }

    #[test]
    fn entity_payload_with_missing_optionals_still_decodes() {
        let json = r#"{"id": 999, "name": "sparse"}"#;
        let resp: EntityResponse = serde_json::from_str(json).unwrap();
        let record = EntityRecord::from(resp);
        assert_eq!(record.id, 999);
        assert!(record.types.is_empty());
        assert!(record.sprites.gallery().is_empty());
        assert!(record.species_url.is_empty());
        assert_eq!(record.height, 0);
    }

    #[test]
    fn move_effect_text_substitutes_chance() {
        let json = r#"{
            "name": "thunderbolt",
            "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"},
            "power": 90,
            "accuracy": 100,
            "pp": 15,
            "effect_chance": 10,
            "effect_entries": [
                {"effect": "Inflicts damage...", "short_effect": "Has a $effect_chance% chance to paralyze the target.", "language": {"name": "en", "url": ""}},
                {"effect": "...", "short_effect": "...", "language": {"name": "de", "url": ""}}
            ]
        }"#;
        let resp: MoveResponse = serde_json::from_str(json).unwrap();
        let record = MoveRecord::from(resp);
        assert_eq!(record.type_name, "electric");
        assert_eq!(record.power, Some(90));
        assert_eq!(record.effect_text, "Has a 10% chance to paralyze the target.");
    }

    #[test]
    fn move_without_english_effect_has_empty_text() {
        let json = r#"{"name": "mystery", "power": null, "accuracy": null, "pp": 5}"#;
        let resp: MoveResponse = serde_json::from_str(json).unwrap();
        let record = MoveRecord::from(resp);
        assert_eq!(record.name, "mystery");
        assert!(record.power.is_none());
        assert!(record.effect_text.is_empty());
        assert!(record.type_name.is_empty());
    }

    #[test]
    fn evolution_chain_flattens_in_order() {
        let json = r#"{
            "chain": {
                "species": {"name": "pichu", "url": ""},
                "evolves_to": [{
                    "species": {"name": "pikachu", "url": ""},
                    "evolves_to": [{
                        "species": {"name": "raichu", "url": ""},
                        "evolves_to": []
                    }]
                }]
            }
        }"#;
        let resp: EvolutionChainResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.names(), vec!["pichu", "pikachu", "raichu"]);
    }

    #[test]
    fn branched_evolution_chain_keeps_payload_order() {
        let json = r#"{
            "chain": {
                "species": {"name": "eevee", "url": ""},
                "evolves_to": [
                    {"species": {"name": "vaporeon", "url": ""}, "evolves_to": []},
                    {"species": {"name": "jolteon", "url": ""}, "evolves_to": []},
                    {"species": {"name": "flareon", "url": ""}, "evolves_to": []}
                ]
            }
        }"#;
        let resp: EvolutionChainResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.names(), vec!["eevee", "vaporeon", "jolteon", "flareon"]);
    }

    #[test]
    fn species_without_chain_pointer() {
        let json = r#"{"name": "pikachu", "evolution_chain": null}"#;
        let resp: SpeciesResponse = serde_json::from_str(json).unwrap();
        assert!(resp.evolution_chain.is_none());
    }
}
