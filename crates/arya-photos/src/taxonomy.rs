//! The static photo category taxonomy.

/// A photo category and its subdirectory names.
///
/// Subcategory names use underscores on disk; intent matching replaces
/// them with spaces when scanning question text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoCategory {
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

/// The hostel's photo taxonomy. Not user-mutable; the scan order here is
/// also the match order for photo-intent detection.
pub fn default_taxonomy() -> Vec<PhotoCategory> {
    vec![
        PhotoCategory {
            name: "rooms",
            subcategories: &["rooms"],
        },
        PhotoCategory {
            name: "mess",
            subcategories: &["dining", "kitchen", "food"],
        },
        PhotoCategory {
            name: "facilities",
            subcategories: &["common_room", "washing_area", "sports", "toilet"],
        },
        PhotoCategory {
            name: "exterior",
            subcategories: &["building", "entrance", "garden"],
        },
    ]
}
