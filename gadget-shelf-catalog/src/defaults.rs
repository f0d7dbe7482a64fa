//! Built-in data used before anything has been saved.

use crate::types::{Appearance, Collection, Item};

/// Category labels offered by the add/edit forms.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "交通工具",
    "生活用品",
    "战斗道具",
    "娱乐道具",
    "学习道具",
    "医疗道具",
    "时空道具",
    "空间道具",
    "飞行道具",
];

const DEFAULT_IMAGE: &str =
    "https://c-ssl.duitang.com/uploads/item/201610/14/20161014172408_WkHMy.jpeg";

/// The three starter items shown on a fresh install.
///
/// These are never pushed on their own; a remote document that is merely
/// unreachable must not be overwritten with them.
pub fn default_collection() -> Collection {
    let starter = |id, name: &str, description: &str, category: &str, episode: &str| Item {
        id,
        name: name.to_string(),
        description: description.to_string(),
        image: DEFAULT_IMAGE.to_string(),
        category: category.to_string(),
        features: Vec::new(),
        appearances: vec![
            Appearance::Season {
                value: "第1季".to_string(),
                episode: None,
            },
            Appearance::Other {
                kind: "episode".to_string(),
                value: episode.to_string(),
            },
        ],
    };

    Collection::new(vec![
        starter(
            1,
            "时光机",
            "可以穿越时空的机器，能够前往过去和未来。",
            "时空道具",
            "第1集",
        ),
        starter(2, "任意门", "打开门就能到达任何想去的地方。", "空间道具", "第2集"),
        starter(3, "竹蜻蜓", "戴在头上就能飞行的道具。", "飞行道具", "第3集"),
    ])
}
