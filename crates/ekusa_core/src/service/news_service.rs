//! News article use-cases for the public feed and the admin manager.

use super::error::{writable, ServiceError, ServiceResult};
use crate::model::news::{NewsDraft, NewsItem};
use crate::model::{new_record_id, sort_newest_first};
use crate::seed::initial_news;
use crate::store::collection::{find_by_id, remove_by_id, update_by_id};
use crate::store::{keys, KeyValueBackend, RecordStore};
use chrono::Utc;
use log::info;

/// Public news page split.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsFeed {
    pub featured: Vec<NewsItem>,
    pub regular: Vec<NewsItem>,
}

pub struct NewsService<'s, B: KeyValueBackend> {
    store: &'s RecordStore<B>,
}

impl<'s, B: KeyValueBackend> NewsService<'s, B> {
    pub fn new(store: &'s RecordStore<B>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Vec<NewsItem> {
        self.store.load(keys::NEWS, initial_news())
    }

    fn load_for_write(&self) -> ServiceResult<Vec<NewsItem>> {
        writable(self.store.load_checked(keys::NEWS, initial_news()), keys::NEWS)
    }

    /// All articles, newest first.
    pub fn list(&self) -> Vec<NewsItem> {
        let mut items = self.load_all();
        sort_newest_first(&mut items, |item| Some(item.created_at));
        items
    }

    pub fn feed(&self) -> NewsFeed {
        let (featured, regular) = self.list().into_iter().partition(|item| item.featured);
        NewsFeed { featured, regular }
    }

    pub fn get(&self, id: &str) -> Option<NewsItem> {
        find_by_id(&self.load_all(), id).cloned()
    }

    pub fn create(&self, draft: NewsDraft) -> ServiceResult<NewsItem> {
        draft.validate()?;
        let mut items = self.load_for_write()?;
        let item = NewsItem::from_draft(new_record_id(), draft, Utc::now());
        items.push(item.clone());
        self.store.save(keys::NEWS, &items);
        info!("event=news_create module=service status=ok id={}", item.id);
        Ok(item)
    }

    /// Replaces the editable fields of an existing article.
    pub fn update(&self, id: &str, draft: NewsDraft) -> ServiceResult<NewsItem> {
        draft.validate()?;
        let mut items = self.load_for_write()?;
        let mut updated = None;
        update_by_id(&mut items, id, |item| {
            item.apply_draft(draft);
            updated = Some(item.clone());
        });
        let Some(updated) = updated else {
            return Err(ServiceError::not_found(keys::NEWS, id));
        };
        self.store.save(keys::NEWS, &items);
        info!("event=news_update module=service status=ok id={id}");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut items = self.load_for_write()?;
        if !remove_by_id(&mut items, id) {
            return Err(ServiceError::not_found(keys::NEWS, id));
        }
        self.store.save(keys::NEWS, &items);
        info!("event=news_delete module=service status=ok id={id}");
        Ok(())
    }
}
