use std::collections::HashMap;

use crate::Platform;

// Manual hashtag selection per platform. An empty selection means "no manual
// override"; composition falls back to the caption's default group.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selected: HashMap<Platform, Vec<String>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, platform: Platform, hashtag: &str) {
        let tags = self.selected.entry(platform).or_default();
        if let Some(position) = tags.iter().position(|tag| tag == hashtag) {
            tags.remove(position);
        } else {
            tags.push(hashtag.to_string());
        }
    }

    pub fn get(&self, platform: Platform) -> &[String] {
        self.selected
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }
}
