//! Data model types for the gadget catalog.
//!
//! These types are the persistent schema shared by the remote document,
//! the local cache snapshot, and YAML seed files.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an item. New ids are millisecond timestamps (see
/// [`Collection::next_id`]).
pub type ItemId = i64;

// ── Appearance ──────────────────────────────────────────────────────────────

/// Where an item shows up in the show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAppearance", into = "RawAppearance")]
pub enum Appearance {
    /// A TV season plus episode, e.g. "第1季" / "第3集". Stored records may
    /// leave the episode out.
    Season {
        value: String,
        episode: Option<String>,
    },
    /// A feature film plus release year.
    Movie { value: String, year: Option<String> },
    /// Any other tag. Older documents carry bare `episode` records; they are
    /// kept as-is so they survive a round trip.
    Other { kind: String, value: String },
}

impl Appearance {
    pub fn season(value: impl Into<String>, episode: impl Into<String>) -> Self {
        Self::Season {
            value: value.into(),
            episode: Some(episode.into()),
        }
    }

    pub fn movie(value: impl Into<String>, year: impl Into<String>) -> Self {
        Self::Movie {
            value: value.into(),
            year: Some(year.into()),
        }
    }

    /// The wire discriminant (`season`, `movie`, or the original tag).
    pub fn kind(&self) -> &str {
        match self {
            Self::Season { .. } => "season",
            Self::Movie { .. } => "movie",
            Self::Other { kind, .. } => kind,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Season { value, .. } | Self::Movie { value, .. } | Self::Other { value, .. } => {
                value
            }
        }
    }

    /// True when every field a form would require is filled in.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Season { value, episode } => !value.trim().is_empty() && filled(episode),
            Self::Movie { value, year } => !value.trim().is_empty() && filled(year),
            Self::Other { value, .. } => !value.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Season {
                value,
                episode: Some(episode),
            } => write!(f, "{} {}", value, episode),
            Self::Movie {
                value,
                year: Some(year),
            } => write!(f, "{} ({})", value, year),
            Self::Season { value, .. } | Self::Movie { value, .. } | Self::Other { value, .. } => {
                write!(f, "{}", value)
            }
        }
    }
}

/// Flat wire shape of an appearance: `{type, value, episode?, year?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAppearance {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    episode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<String>,
}

impl From<RawAppearance> for Appearance {
    fn from(raw: RawAppearance) -> Self {
        match raw.kind.as_str() {
            "season" => Self::Season {
                value: raw.value,
                episode: raw.episode,
            },
            "movie" => Self::Movie {
                value: raw.value,
                year: raw.year,
            },
            _ => Self::Other {
                kind: raw.kind,
                value: raw.value,
            },
        }
    }
}

impl From<Appearance> for RawAppearance {
    fn from(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Season { value, episode } => Self {
                kind: "season".to_string(),
                value,
                episode,
                year: None,
            },
            Appearance::Movie { value, year } => Self {
                kind: "movie".to_string(),
                value,
                episode: None,
                year,
            },
            Appearance::Other { kind, value } => Self {
                kind,
                value,
                episode: None,
                year: None,
            },
        }
    }
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|f| !f.trim().is_empty())
}

/// Stored documents sometimes hold `null` where a value is expected; read it
/// as the field's empty value instead of rejecting the whole document.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Item ────────────────────────────────────────────────────────────────────

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Image URL, rendered as-is.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// One of the known labels in [`crate::KNOWN_CATEGORIES`], not enforced.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub appearances: Vec<Appearance>,
}

impl Item {
    /// Build an item from submitted fields.
    pub fn from_fields(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            image: fields.image,
            category: fields.category,
            features: fields.features,
            appearances: fields.appearances,
        }
    }

    /// The editable fields of this item, e.g. to prefill an edit form.
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            category: self.category.clone(),
            features: self.features.clone(),
            appearances: self.appearances.clone(),
        }
    }
}

/// Everything about an item except its id, as submitted by an add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub features: Vec<String>,
    pub appearances: Vec<Appearance>,
}

impl ItemFields {
    /// Split a comma-separated feature list, trimming and dropping blanks.
    pub fn parse_features(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Trim text fields and drop incomplete appearance rows.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.category = self.category.trim().to_string();
        self.image = self.image.trim().to_string();
        self.features = self
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        self.appearances.retain(Appearance::is_complete);
        self
    }
}

// ── Collection ──────────────────────────────────────────────────────────────

/// The ordered list of items. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }
}

impl From<Vec<Item>> for Collection {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
