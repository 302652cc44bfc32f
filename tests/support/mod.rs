// Fixture builders shared by the integration tests. Explorer items get a
// Windows-style item path derived from the title, matching how the source
// tool lays out its library on disk.

use assetdeck::catalog::{
    CuratedAvatar, CuratedSummary, CuratedWearable, CuratedWorld, ExplorerItem, ExplorerKind,
};

pub fn item_path(title: &str) -> String {
    format!(r"Datas\Items\{title}")
}

pub fn explorer_item_with(
    title: &str,
    kind: ExplorerKind,
    category: &str,
    created_at_millis: i64,
) -> ExplorerItem {
    ExplorerItem {
        title: title.to_string(),
        author: String::new(),
        memo: String::new(),
        item_path: item_path(title),
        image_path: String::new(),
        supported_avatar_paths: Vec::new(),
        kind,
        category: category.to_string(),
        created_date: String::new(),
        created_at_millis,
        item_id: None,
    }
}

pub fn explorer_avatar(title: &str) -> ExplorerItem {
    explorer_item_with(title, ExplorerKind::Avatar, "", 0)
}

pub fn explorer_item(title: &str, category: &str) -> ExplorerItem {
    explorer_item_with(title, ExplorerKind::Other, category, 0)
}

pub fn summary(name: &str) -> CuratedSummary {
    CuratedSummary {
        name: name.to_string(),
        creator: "creator".to_string(),
        ..CuratedSummary::default()
    }
}

pub fn curated_avatar(name: &str) -> CuratedAvatar {
    CuratedAvatar {
        summary: summary(name),
    }
}

pub fn curated_wearable(name: &str, category: &str, avatars: &[&str]) -> CuratedWearable {
    CuratedWearable {
        summary: summary(name),
        category: category.to_string(),
        supported_avatars: avatars.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn curated_world(name: &str, category: &str) -> CuratedWorld {
    CuratedWorld {
        summary: summary(name),
        category: category.to_string(),
    }
}
