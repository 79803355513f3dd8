//! Static category tags backed by fixed National-Dex id sets.
//!
//! The sets are not mutually exclusive (a handful of ids are both legendary
//! and mythical); the view engine combines selected categories by union.

use serde::{Deserialize, Serialize};

/// A fixed classification an entry may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Legendary,
    Mythical,
    Pseudolegendary,
}

// Sorted ascending; membership checks binary-search these.

const LEGENDARY_IDS: &[u32] = &[
    144, 145, 146, 150, 243, 244, 245, 249, 250, 377, 378, 379, 380, 381, 382, 383, 384, 480, 481,
    482, 483, 484, 485, 486, 487, 488, 638, 639, 640, 641, 642, 643, 644, 645, 646, 647, 649, 716,
    717, 718, 789, 790, 791, 792, 793, 794, 795, 796, 797, 798, 799, 800, 803, 804, 805, 806, 888,
    889, 890, 891, 892, 893, 894, 895, 896, 897, 898, 905, 1004, 1005, 1006, 1007, 1008, 1009,
    1010, 1011, 1012, 1013, 1014, 1015, 1016, 1017,
];

const MYTHICAL_IDS: &[u32] = &[
    151, 251, 385, 386, 489, 490, 491, 492, 493, 494, 648, 649, 719, 720, 721, 801, 802, 807, 808,
    809, 893, 1025,
];

const PSEUDOLEGENDARY_IDS: &[u32] = &[
    147, 148, 149, 246, 247, 248, 371, 372, 373, 374, 375, 376, 443, 444, 445, 633, 634, 635, 704,
    705, 706, 782, 783, 784, 885, 886, 887,
];

impl Category {
    pub const ALL: &'static [Category] =
        &[Category::Legendary, Category::Mythical, Category::Pseudolegendary];

    /// The static id set backing this tag.
    pub fn ids(self) -> &'static [u32] {
        match self {
            Category::Legendary => LEGENDARY_IDS,
            Category::Mythical => MYTHICAL_IDS,
            Category::Pseudolegendary => PSEUDOLEGENDARY_IDS,
        }
    }

    pub fn contains(self, id: u32) -> bool {
        self.ids().binary_search(&id).is_ok()
    }
}
